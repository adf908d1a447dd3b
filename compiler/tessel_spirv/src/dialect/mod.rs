//! Entry point tying the SPIR-V type family to a [`Context`].

use tessel_diagnostic::DiagnosticSink;
use tessel_ir::{Context, Location};

use crate::parse::parse_type_str;
use crate::print::format_type_into;
use crate::{SpirvType, SpirvTypes};

/// The SPIR-V dialect: type family registration plus the textual codec.
#[derive(Copy, Clone, Debug, Default)]
pub struct SpirvDialect;

impl SpirvDialect {
    /// Namespace prefix of the dialect.
    pub const NAMESPACE: &'static str = "spv";

    /// Register the SPIR-V type family with `ctx`. Returns `false` if it was
    /// already registered.
    pub fn register(ctx: &mut Context) -> bool {
        ctx.register_family::<SpirvTypes>()
    }

    /// Check whether the SPIR-V type family is registered with `ctx`.
    pub fn is_registered(ctx: &Context) -> bool {
        ctx.has_family::<SpirvTypes>()
    }

    /// Parse a type string.
    ///
    /// On failure a diagnostic tagged with `loc` goes to `sink` and `None`
    /// is returned; the caller may go on with other input.
    pub fn parse_type(
        ctx: &Context,
        spec: &str,
        loc: Location,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<SpirvType> {
        match parse_type_str(ctx, spec) {
            Ok(ty) => Some(ty),
            Err(err) => {
                tracing::debug!(spec, offset = err.offset, error = %err, "type parse failed");
                sink.emit(err.to_diagnostic(spec, loc));
                None
            }
        }
    }

    /// Canonical text of `ty`.
    pub fn print_type(ctx: &Context, ty: SpirvType) -> String {
        let mut buf = String::new();
        Self::print_type_into(ctx, ty, &mut buf);
        buf
    }

    /// Append the canonical text of `ty` to `buf`.
    pub fn print_type_into(ctx: &Context, ty: SpirvType, buf: &mut String) {
        format_type_into(ctx, ty, buf);
    }
}
