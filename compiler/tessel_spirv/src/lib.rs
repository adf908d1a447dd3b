//! Tessel SPIR-V - Type Family and Textual Codec
//!
//! The SPIR-V dialect's structural types, uniqued in a
//! [`Context`](tessel_ir::Context):
//! - Scalars: `i1`, `i8`, `i16`, `i32`, `i64`, `f16`, `f32`, `f64`
//! - `array<N x T>`, `ptr<T, StorageClass>`, `rtarray<T>`
//! - `image<T, Dim, Depth, Arrayed, Sampling, SamplerUse, Format>`
//!
//! Parsing reports failures as diagnostics and never panics; printing is
//! canonical, so `print(parse(s))` is stable and `parse(print(t)) == t`.
//!
//! ```text
//! let mut ctx = Context::new();
//! SpirvDialect::register(&mut ctx);
//! let ty = SpirvDialect::parse_type(&ctx, "array<4 x f32>", loc, &mut queue);
//! ```

mod dialect;
mod enums;
pub mod parse;
mod print;
mod types;

pub use dialect::SpirvDialect;
pub use enums::{
    Dim, ImageArrayedInfo, ImageDepthInfo, ImageFormat, ImageSamplerUseInfo, ImageSamplingInfo,
    SpirvEnum, StorageClass,
};
pub use parse::{parse_type_str, TypeParseError, TypeParseErrorKind};
pub use print::{format_type, format_type_into};
pub use types::{
    ArrayType, FloatType, ImageKey, ImageType, IntegerType, PointerType, RuntimeArrayType,
    SpirvType, SpirvTypes, TypeData, TypeError, TypeKind, FLOAT_WIDTHS, INTEGER_WIDTHS,
};

tessel_ir::static_assert_size!(SpirvType, 12);
