//! Recursive-descent parser for the textual type syntax.
//!
//! ```text
//! type    := scalar | array | ptr | rtarray | image
//! scalar  := "i1" | "i8" | "i16" | "i32" | "i64" | "f16" | "f32" | "f64"
//! array   := "array" "<" COUNT "x" type ">"
//! ptr     := "ptr" "<" type "," STORAGE-CLASS ">"
//! rtarray := "rtarray" "<" type ">"
//! image   := "image" "<" type "," DIM ("," DEPTH ("," ARRAYED ("," SAMPLING
//!            ("," SAMPLER-USE ("," FORMAT)?)?)?)?)? ">"
//! ```
//!
//! Whitespace is allowed between tokens. Omitted image components take
//! their defaults, left to right.

mod cursor;

use std::fmt;

use tessel_diagnostic::{Diagnostic, ErrorCode};
use tessel_ir::{Context, Location};

use crate::{
    ArrayType, Dim, FloatType, ImageArrayedInfo, ImageDepthInfo, ImageFormat, ImageKey,
    ImageSamplerUseInfo, ImageSamplingInfo, ImageType, IntegerType, PointerType,
    RuntimeArrayType, SpirvEnum, SpirvType, StorageClass, TypeError,
};
use cursor::Cursor;

/// Maximum nesting depth of element/pointee types.
pub const MAX_NESTING: u32 = 64;

/// What went wrong while parsing a type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeParseErrorKind {
    /// The leading keyword names no type.
    UnknownType(String),
    /// A token other than the one the grammar requires.
    Expected {
        expected: &'static str,
        found: String,
    },
    /// Element types nested deeper than [`MAX_NESTING`].
    TooDeep,
    /// An enumerant spelling not in its enumeration.
    UnknownEnumerant {
        what: &'static str,
        spelling: String,
    },
    /// The type is well formed but fails verification.
    InvalidElement(TypeError),
    /// An array element count that is zero or out of range.
    InvalidCount {
        text: String,
        reason: &'static str,
    },
}

/// A type string that failed to parse, with the byte offset of the problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParseError {
    pub kind: TypeParseErrorKind,
    pub offset: usize,
}

impl TypeParseError {
    /// Error code reported for this failure.
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            TypeParseErrorKind::UnknownType(_) => ErrorCode::E1001,
            TypeParseErrorKind::Expected { .. } | TypeParseErrorKind::TooDeep => ErrorCode::E1002,
            TypeParseErrorKind::UnknownEnumerant { .. } => ErrorCode::E1003,
            TypeParseErrorKind::InvalidElement(_) => ErrorCode::E1004,
            TypeParseErrorKind::InvalidCount { .. } => ErrorCode::E1005,
        }
    }

    /// Diagnostic for this failure, reported at `location`.
    pub fn to_diagnostic(&self, spec: &str, location: Location) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at(location)
            .with_note(format!("in type `{spec}` at offset {}", self.offset))
    }
}

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeParseErrorKind::UnknownType(keyword) => write!(f, "unknown type '{keyword}'"),
            TypeParseErrorKind::Expected { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            TypeParseErrorKind::TooDeep => {
                write!(f, "type nesting exceeds {MAX_NESTING} levels")
            }
            TypeParseErrorKind::UnknownEnumerant { what, spelling } => {
                write!(f, "unknown {what} '{spelling}'")
            }
            TypeParseErrorKind::InvalidElement(err) => write!(f, "{err}"),
            TypeParseErrorKind::InvalidCount { text, reason } => {
                write!(f, "invalid array element count '{text}': {reason}")
            }
        }
    }
}

impl std::error::Error for TypeParseError {}

/// Parse `spec` into a canonical type of `ctx`.
///
/// The SPIR-V type family must be registered with `ctx`.
#[tracing::instrument(level = "trace", skip(ctx))]
pub fn parse_type_str(ctx: &Context, spec: &str) -> Result<SpirvType, TypeParseError> {
    let mut parser = Parser {
        ctx,
        cursor: Cursor::new(spec),
        depth: 0,
    };
    let ty = parser.parse_type()?;
    parser.cursor.skip_whitespace();
    if !parser.cursor.is_eof() {
        return Err(parser.expected("end of type"));
    }
    Ok(ty)
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

struct Parser<'a, 'ctx> {
    ctx: &'ctx Context,
    cursor: Cursor<'a>,
    depth: u32,
}

impl<'a> Parser<'a, '_> {
    fn error(&self, offset: usize, kind: TypeParseErrorKind) -> TypeParseError {
        TypeParseError { kind, offset }
    }

    /// Describe the next token for an "expected X, found Y" message.
    fn found(&self) -> String {
        if self.cursor.is_eof() {
            return "end of input".to_string();
        }
        let mut ahead = self.cursor;
        let start = ahead.pos();
        ahead.eat_while(is_word_byte);
        let word = ahead.slice_from(start);
        if word.is_empty() {
            let c = self.cursor.rest().chars().next().unwrap_or('?');
            format!("'{c}'")
        } else {
            format!("'{word}'")
        }
    }

    fn expected(&self, expected: &'static str) -> TypeParseError {
        let found = self.found();
        self.error(self.cursor.pos(), TypeParseErrorKind::Expected { expected, found })
    }

    /// Consume `byte` after optional whitespace.
    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), TypeParseError> {
        self.cursor.skip_whitespace();
        if self.cursor.eat(byte) {
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    /// Consume `byte` after optional whitespace, if it is next.
    fn eat(&mut self, byte: u8) -> bool {
        self.cursor.skip_whitespace();
        self.cursor.eat(byte)
    }

    /// Consume a `[A-Za-z0-9_]+` word after optional whitespace. Empty if
    /// the next token is not a word.
    fn word(&mut self) -> (usize, &'a str) {
        self.cursor.skip_whitespace();
        let start = self.cursor.pos();
        self.cursor.eat_while(is_word_byte);
        (start, self.cursor.slice_from(start))
    }

    fn parse_type(&mut self) -> Result<SpirvType, TypeParseError> {
        let (start, keyword) = self.word();
        if keyword.is_empty() {
            return Err(self.expected("a type"));
        }
        if self.depth >= MAX_NESTING {
            return Err(self.error(start, TypeParseErrorKind::TooDeep));
        }
        self.depth += 1;
        let ty = match keyword {
            "array" => self.parse_array(),
            "ptr" => self.parse_pointer(),
            "rtarray" => self.parse_runtime_array(),
            "image" => self.parse_image(),
            _ => self.parse_scalar(start, keyword),
        };
        self.depth -= 1;
        ty
    }

    fn parse_scalar(&mut self, start: usize, keyword: &str) -> Result<SpirvType, TypeParseError> {
        let ty: SpirvType = match keyword {
            "i1" => IntegerType::get(self.ctx, 1).into(),
            "i8" => IntegerType::get(self.ctx, 8).into(),
            "i16" => IntegerType::get(self.ctx, 16).into(),
            "i32" => IntegerType::get(self.ctx, 32).into(),
            "i64" => IntegerType::get(self.ctx, 64).into(),
            "f16" => FloatType::get(self.ctx, 16).into(),
            "f32" => FloatType::get(self.ctx, 32).into(),
            "f64" => FloatType::get(self.ctx, 64).into(),
            _ => {
                return Err(self.error(
                    start,
                    TypeParseErrorKind::UnknownType(keyword.to_string()),
                ))
            }
        };
        Ok(ty)
    }

    fn parse_array(&mut self) -> Result<SpirvType, TypeParseError> {
        self.expect(b'<', "'<'")?;

        self.cursor.skip_whitespace();
        let count_start = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let text = self.cursor.slice_from(count_start);
        if text.is_empty() {
            return Err(self.expected("an element count"));
        }
        let invalid = |reason| TypeParseErrorKind::InvalidCount {
            text: text.to_string(),
            reason,
        };
        let count = text
            .parse::<u64>()
            .map_err(|_| self.error(count_start, invalid("does not fit in 64 bits")))?;
        if count == 0 {
            return Err(self.error(count_start, invalid("must be positive")));
        }

        self.expect(b'x', "'x'")?;
        let element = self.parse_type()?;
        self.expect(b'>', "'>'")?;

        ArrayType::try_get(self.ctx, element, count)
            .map(SpirvType::from)
            .map_err(|_| self.error(count_start, invalid("must be positive")))
    }

    fn parse_pointer(&mut self) -> Result<SpirvType, TypeParseError> {
        self.expect(b'<', "'<'")?;
        let pointee = self.parse_type()?;
        self.expect(b',', "','")?;
        let storage_class = self.parse_enum::<StorageClass>()?;
        self.expect(b'>', "'>'")?;
        Ok(PointerType::get(self.ctx, pointee, storage_class).into())
    }

    fn parse_runtime_array(&mut self) -> Result<SpirvType, TypeParseError> {
        self.expect(b'<', "'<'")?;
        let element = self.parse_type()?;
        self.expect(b'>', "'>'")?;
        Ok(RuntimeArrayType::get(self.ctx, element).into())
    }

    fn parse_image(&mut self) -> Result<SpirvType, TypeParseError> {
        self.expect(b'<', "'<'")?;
        self.cursor.skip_whitespace();
        let element_start = self.cursor.pos();
        let element = self.parse_type()?;
        self.expect(b',', "','")?;
        let mut key = ImageKey::new(element, self.parse_enum::<Dim>()?);

        if self.eat(b',') {
            key.depth = self.parse_enum::<ImageDepthInfo>()?;
            if self.eat(b',') {
                key.arrayed = self.parse_enum::<ImageArrayedInfo>()?;
                if self.eat(b',') {
                    key.sampling = self.parse_enum::<ImageSamplingInfo>()?;
                    if self.eat(b',') {
                        key.sampler_use = self.parse_enum::<ImageSamplerUseInfo>()?;
                        if self.eat(b',') {
                            key.format = self.parse_enum::<ImageFormat>()?;
                        }
                    }
                }
            }
        }
        self.expect(b'>', "'>'")?;

        ImageType::try_get_with(self.ctx, key)
            .map(SpirvType::from)
            .map_err(|err| self.error(element_start, TypeParseErrorKind::InvalidElement(err)))
    }

    fn parse_enum<E: SpirvEnum>(&mut self) -> Result<E, TypeParseError> {
        let (start, spelling) = self.word();
        if spelling.is_empty() {
            return Err(self.expected(E::WHAT));
        }
        E::from_spelling(spelling).ok_or_else(|| {
            self.error(
                start,
                TypeParseErrorKind::UnknownEnumerant {
                    what: E::WHAT,
                    spelling: spelling.to_string(),
                },
            )
        })
    }
}
