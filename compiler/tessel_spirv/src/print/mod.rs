//! Canonical text of SPIR-V types.
//!
//! Output is always in the form the parser accepts, with a single space
//! after each comma and around the array `x`, and every image component
//! written out. `parse(format(t)) == t` for every type.

use std::fmt::Write;

use tessel_ir::Context;

use crate::{SpirvType, TypeData};

/// Format a type in its canonical textual form.
pub fn format_type(ctx: &Context, ty: SpirvType) -> String {
    let mut buf = String::new();
    format_type_into(ctx, ty, &mut buf);
    buf
}

/// Format a type into an existing string buffer.
pub fn format_type_into(ctx: &Context, ty: SpirvType, buf: &mut String) {
    // Writing to a String cannot fail.
    match ctx.record(ty) {
        TypeData::Integer { width } => {
            let _ = write!(buf, "i{width}");
        }
        TypeData::Float { width } => {
            let _ = write!(buf, "f{width}");
        }
        TypeData::Array { element, count } => {
            let _ = write!(buf, "array<{count} x ");
            format_type_into(ctx, element, buf);
            buf.push('>');
        }
        TypeData::Pointer {
            pointee,
            storage_class,
        } => {
            buf.push_str("ptr<");
            format_type_into(ctx, pointee, buf);
            let _ = write!(buf, ", {storage_class}>");
        }
        TypeData::RuntimeArray { element } => {
            buf.push_str("rtarray<");
            format_type_into(ctx, element, buf);
            buf.push('>');
        }
        TypeData::Image(key) => {
            buf.push_str("image<");
            format_type_into(ctx, key.element, buf);
            let _ = write!(
                buf,
                ", {}, {}, {}, {}, {}, {}>",
                key.dim, key.depth, key.arrayed, key.sampling, key.sampler_use, key.format
            );
        }
    }
}

#[cfg(test)]
mod tests;
