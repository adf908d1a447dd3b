//! The SPIR-V type family.
//!
//! Composite types (arrays, pointers, runtime arrays, images) are uniqued by
//! their full structural key in the owning [`Context`]. Integer and float
//! scalars are uniqued the same way and serve as leaf element types.
//!
//! The family must be registered before use; see
//! [`SpirvDialect::register`](crate::SpirvDialect::register).

use std::fmt;

use tessel_ir::{define_variant, Context, ContextId, Family, Handle};

use crate::{
    Dim, ImageArrayedInfo, ImageDepthInfo, ImageFormat, ImageSamplerUseInfo, ImageSamplingInfo,
    StorageClass,
};

/// Kind tag of a SPIR-V type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TypeKind {
    Integer = 0,
    Float = 1,
    Array = 2,
    Pointer = 3,
    RuntimeArray = 4,
    Image = 5,
}

impl TypeKind {
    /// Every kind, in tag order.
    pub const ALL: [TypeKind; 6] = [
        TypeKind::Integer,
        TypeKind::Float,
        TypeKind::Array,
        TypeKind::Pointer,
        TypeKind::RuntimeArray,
        TypeKind::Image,
    ];

    /// Check if this is a scalar (integer or float) kind.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(self, TypeKind::Integer | TypeKind::Float)
    }

    /// Get the name of this kind as a static string.
    pub const fn name(self) -> &'static str {
        match self {
            TypeKind::Integer => "integer",
            TypeKind::Float => "float",
            TypeKind::Array => "array",
            TypeKind::Pointer => "ptr",
            TypeKind::RuntimeArray => "rtarray",
            TypeKind::Image => "image",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Full structural key of an image type. Two images are the same canonical
/// type iff all seven components match.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImageKey {
    pub element: SpirvType,
    pub dim: Dim,
    pub depth: ImageDepthInfo,
    pub arrayed: ImageArrayedInfo,
    pub sampling: ImageSamplingInfo,
    pub sampler_use: ImageSamplerUseInfo,
    pub format: ImageFormat,
}

impl ImageKey {
    /// Key with every optional component at its default.
    pub fn new(element: SpirvType, dim: Dim) -> Self {
        ImageKey {
            element,
            dim,
            depth: ImageDepthInfo::default(),
            arrayed: ImageArrayedInfo::default(),
            sampling: ImageSamplingInfo::default(),
            sampler_use: ImageSamplerUseInfo::default(),
            format: ImageFormat::default(),
        }
    }

    #[must_use]
    pub fn with_depth(mut self, depth: ImageDepthInfo) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_arrayed(mut self, arrayed: ImageArrayedInfo) -> Self {
        self.arrayed = arrayed;
        self
    }

    #[must_use]
    pub fn with_sampling(mut self, sampling: ImageSamplingInfo) -> Self {
        self.sampling = sampling;
        self
    }

    #[must_use]
    pub fn with_sampler_use(mut self, sampler_use: ImageSamplerUseInfo) -> Self {
        self.sampler_use = sampler_use;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }
}

/// Canonical storage record (and uniquing key) of a SPIR-V type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Integer { width: u8 },
    Float { width: u8 },
    Array { element: SpirvType, count: u64 },
    Pointer { pointee: SpirvType, storage_class: StorageClass },
    RuntimeArray { element: SpirvType },
    Image(ImageKey),
}

/// The SPIR-V type family.
pub enum SpirvTypes {}

impl Family for SpirvTypes {
    const NAME: &'static str = "SpirvType";
    type Kind = TypeKind;
    type Record = TypeData;

    fn kind_of(record: &TypeData) -> TypeKind {
        match record {
            TypeData::Integer { .. } => TypeKind::Integer,
            TypeData::Float { .. } => TypeKind::Float,
            TypeData::Array { .. } => TypeKind::Array,
            TypeData::Pointer { .. } => TypeKind::Pointer,
            TypeData::RuntimeArray { .. } => TypeKind::RuntimeArray,
            TypeData::Image(_) => TypeKind::Image,
        }
    }

    fn visit_owners(record: &TypeData, visit: &mut dyn FnMut(ContextId)) {
        match record {
            TypeData::Integer { .. } | TypeData::Float { .. } => {}
            TypeData::Array { element, .. } | TypeData::RuntimeArray { element } => {
                visit(element.owner());
            }
            TypeData::Pointer { pointee, .. } => visit(pointee.owner()),
            TypeData::Image(key) => visit(key.element.owner()),
        }
    }
}

/// Handle to a canonical SPIR-V type.
pub type SpirvType = Handle<SpirvTypes>;

/// Integer widths accepted for scalar integer types.
pub const INTEGER_WIDTHS: [u8; 5] = [1, 8, 16, 32, 64];

/// Float widths accepted for scalar float types.
pub const FLOAT_WIDTHS: [u8; 3] = [16, 32, 64];

/// Verification failures when building a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Integer width outside [`INTEGER_WIDTHS`].
    InvalidIntegerWidth(u8),
    /// Float width outside [`FLOAT_WIDTHS`].
    InvalidFloatWidth(u8),
    /// Array with an element count of zero.
    ZeroLengthArray,
    /// Image whose element type is not a scalar.
    NonScalarImageElement(TypeKind),
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::InvalidIntegerWidth(width) => {
                write!(f, "invalid integer width {width}")
            }
            TypeError::InvalidFloatWidth(width) => write!(f, "invalid float width {width}"),
            TypeError::ZeroLengthArray => write!(f, "array element count must be positive"),
            TypeError::NonScalarImageElement(kind) => {
                write!(f, "image element type must be a scalar, found {kind} type")
            }
        }
    }
}

impl std::error::Error for TypeError {}

define_variant! {
    /// A scalar integer type `iN`.
    pub struct IntegerType: SpirvTypes = TypeKind::Integer;
}

define_variant! {
    /// A scalar float type `fN`.
    pub struct FloatType: SpirvTypes = TypeKind::Float;
}

define_variant! {
    /// A fixed-length array `array<N x T>`.
    pub struct ArrayType: SpirvTypes = TypeKind::Array;
}

define_variant! {
    /// A pointer `ptr<T, StorageClass>`.
    pub struct PointerType: SpirvTypes = TypeKind::Pointer;
}

define_variant! {
    /// An array of unbounded length `rtarray<T>`.
    pub struct RuntimeArrayType: SpirvTypes = TypeKind::RuntimeArray;
}

define_variant! {
    /// An image `image<T, Dim, Depth, Arrayed, Sampling, SamplerUse, Format>`.
    pub struct ImageType: SpirvTypes = TypeKind::Image;
}

/// Unwrap a verified construction, panicking with the verification message.
#[track_caller]
fn unwrap_verified<T>(result: Result<T, TypeError>) -> T {
    result.unwrap_or_else(|e| panic!("precondition violated: {e}"))
}

impl IntegerType {
    /// # Panics
    /// Panics if `width` is not one of [`INTEGER_WIDTHS`].
    #[track_caller]
    pub fn get(ctx: &Context, width: u8) -> Self {
        unwrap_verified(Self::try_get(ctx, width))
    }

    pub fn try_get(ctx: &Context, width: u8) -> Result<Self, TypeError> {
        if !INTEGER_WIDTHS.contains(&width) {
            return Err(TypeError::InvalidIntegerWidth(width));
        }
        Ok(IntegerType(ctx.intern::<SpirvTypes>(TypeData::Integer { width })))
    }

    pub fn width(self, ctx: &Context) -> u8 {
        ctx.with_record(self.0, |data| match data {
            TypeData::Integer { width } => *width,
            other => unreachable!("IntegerType points at {other:?}"),
        })
    }
}

impl FloatType {
    /// # Panics
    /// Panics if `width` is not one of [`FLOAT_WIDTHS`].
    #[track_caller]
    pub fn get(ctx: &Context, width: u8) -> Self {
        unwrap_verified(Self::try_get(ctx, width))
    }

    pub fn try_get(ctx: &Context, width: u8) -> Result<Self, TypeError> {
        if !FLOAT_WIDTHS.contains(&width) {
            return Err(TypeError::InvalidFloatWidth(width));
        }
        Ok(FloatType(ctx.intern::<SpirvTypes>(TypeData::Float { width })))
    }

    pub fn width(self, ctx: &Context) -> u8 {
        ctx.with_record(self.0, |data| match data {
            TypeData::Float { width } => *width,
            other => unreachable!("FloatType points at {other:?}"),
        })
    }
}

impl ArrayType {
    /// Uniqued array of `count` elements of `element`.
    ///
    /// # Panics
    /// Panics if `count` is zero.
    #[track_caller]
    pub fn get(ctx: &Context, element: SpirvType, count: u64) -> Self {
        unwrap_verified(Self::try_get(ctx, element, count))
    }

    /// Fallible constructor; rejects zero-length arrays.
    pub fn try_get(ctx: &Context, element: SpirvType, count: u64) -> Result<Self, TypeError> {
        if count == 0 {
            return Err(TypeError::ZeroLengthArray);
        }
        Ok(ArrayType(ctx.intern::<SpirvTypes>(TypeData::Array { element, count })))
    }

    fn parts(self, ctx: &Context) -> (SpirvType, u64) {
        ctx.with_record(self.0, |data| match data {
            TypeData::Array { element, count } => (*element, *count),
            other => unreachable!("ArrayType points at {other:?}"),
        })
    }

    pub fn element_type(self, ctx: &Context) -> SpirvType {
        self.parts(ctx).0
    }

    pub fn element_count(self, ctx: &Context) -> u64 {
        self.parts(ctx).1
    }
}

impl PointerType {
    /// Uniqued pointer to `pointee` in `storage_class`.
    pub fn get(ctx: &Context, pointee: SpirvType, storage_class: StorageClass) -> Self {
        PointerType(ctx.intern::<SpirvTypes>(TypeData::Pointer {
            pointee,
            storage_class,
        }))
    }

    fn parts(self, ctx: &Context) -> (SpirvType, StorageClass) {
        ctx.with_record(self.0, |data| match data {
            TypeData::Pointer {
                pointee,
                storage_class,
            } => (*pointee, *storage_class),
            other => unreachable!("PointerType points at {other:?}"),
        })
    }

    pub fn pointee_type(self, ctx: &Context) -> SpirvType {
        self.parts(ctx).0
    }

    pub fn storage_class(self, ctx: &Context) -> StorageClass {
        self.parts(ctx).1
    }

    /// Canonical spelling of the storage class.
    pub fn storage_class_str(self, ctx: &Context) -> &'static str {
        self.storage_class(ctx).as_str()
    }
}

impl RuntimeArrayType {
    /// Uniqued unbounded array of `element`.
    pub fn get(ctx: &Context, element: SpirvType) -> Self {
        RuntimeArrayType(ctx.intern::<SpirvTypes>(TypeData::RuntimeArray { element }))
    }

    pub fn element_type(self, ctx: &Context) -> SpirvType {
        ctx.with_record(self.0, |data| match data {
            TypeData::RuntimeArray { element } => *element,
            other => unreachable!("RuntimeArrayType points at {other:?}"),
        })
    }
}

impl ImageType {
    /// Uniqued image of `element` with dimensionality `dim` and every other
    /// component defaulted.
    ///
    /// # Panics
    /// Panics if `element` is not a scalar type.
    #[track_caller]
    pub fn get(ctx: &Context, element: SpirvType, dim: Dim) -> Self {
        Self::get_with(ctx, ImageKey::new(element, dim))
    }

    /// Uniqued image for a full seven-component key.
    ///
    /// # Panics
    /// Panics if the element type is not a scalar type.
    #[track_caller]
    pub fn get_with(ctx: &Context, key: ImageKey) -> Self {
        unwrap_verified(Self::try_get_with(ctx, key))
    }

    /// Fallible constructor; rejects non-scalar element types.
    pub fn try_get_with(ctx: &Context, key: ImageKey) -> Result<Self, TypeError> {
        let kind = key.element.kind();
        if !kind.is_scalar() {
            return Err(TypeError::NonScalarImageElement(kind));
        }
        Ok(ImageType(ctx.intern::<SpirvTypes>(TypeData::Image(key))))
    }

    /// The full structural key.
    pub fn key(self, ctx: &Context) -> ImageKey {
        ctx.with_record(self.0, |data| match data {
            TypeData::Image(key) => *key,
            other => unreachable!("ImageType points at {other:?}"),
        })
    }

    pub fn element_type(self, ctx: &Context) -> SpirvType {
        self.key(ctx).element
    }

    pub fn dim(self, ctx: &Context) -> Dim {
        self.key(ctx).dim
    }

    pub fn depth_info(self, ctx: &Context) -> ImageDepthInfo {
        self.key(ctx).depth
    }

    pub fn arrayed_info(self, ctx: &Context) -> ImageArrayedInfo {
        self.key(ctx).arrayed
    }

    pub fn sampling_info(self, ctx: &Context) -> ImageSamplingInfo {
        self.key(ctx).sampling
    }

    pub fn sampler_use_info(self, ctx: &Context) -> ImageSamplerUseInfo {
        self.key(ctx).sampler_use
    }

    pub fn image_format(self, ctx: &Context) -> ImageFormat {
        self.key(ctx).format
    }
}
