//! Location formatting for diagnostics and debugging.

use std::fmt::Write;

use super::{Location, LocationData, UnknownLoc};
use crate::Context;

impl Context {
    /// Format a location in its textual form, e.g. `"a.cc":1:2` or
    /// `callsite("f" at "a.cc":3:1)`.
    pub fn format_location(&self, loc: Location) -> String {
        let mut buf = String::new();
        self.format_location_into(loc, &mut buf);
        buf
    }

    /// Format a location into an existing string buffer.
    pub fn format_location_into(&self, loc: Location, buf: &mut String) {
        match self.record(loc) {
            LocationData::Unknown => buf.push_str("unknown"),
            LocationData::FileLineCol {
                filename,
                line,
                column,
            } => {
                push_quoted(buf, &self.ident_str(filename));
                // Writing to a String cannot fail.
                let _ = write!(buf, ":{line}:{column}");
            }
            LocationData::Name { name, child } => {
                push_quoted(buf, &self.ident_str(name));
                if !child.isa::<UnknownLoc>() {
                    buf.push('(');
                    self.format_location_into(child, buf);
                    buf.push(')');
                }
            }
            LocationData::CallSite { callee, caller } => {
                buf.push_str("callsite(");
                self.format_location_into(callee, buf);
                buf.push_str(" at ");
                self.format_location_into(caller, buf);
                buf.push(')');
            }
            LocationData::Fused {
                locations,
                metadata,
            } => {
                buf.push_str("fused");
                if let Some(metadata) = metadata {
                    buf.push('<');
                    push_quoted(buf, &self.ident_str(metadata));
                    buf.push('>');
                }
                buf.push('[');
                for (i, &loc) in locations.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_location_into(loc, buf);
                }
                buf.push(']');
            }
        }
    }
}

/// Append `text` in double quotes, escaping `"` and `\`.
fn push_quoted(buf: &mut String, text: &str) {
    buf.reserve(text.len() + 2);
    buf.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            buf.push('\\');
        }
        buf.push(c);
    }
    buf.push('"');
}
