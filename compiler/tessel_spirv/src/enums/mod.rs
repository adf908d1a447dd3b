//! SPIR-V enumerations used as type-key components.
//!
//! Each enumerant carries its SPIR-V numeric value and its canonical
//! spelling, which is also the spelling used in textual types.

use std::fmt;

/// Common surface of the SPIR-V enumerations, for code generic over them.
pub trait SpirvEnum: Copy + 'static {
    /// Human-readable name of the enumeration, for diagnostics.
    const WHAT: &'static str;

    /// Enumerant with the given canonical spelling.
    fn from_spelling(spelling: &str) -> Option<Self>;

    /// Canonical spelling.
    fn as_str(self) -> &'static str;
}

macro_rules! spirv_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident($what:literal) {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal => $spelling:literal,)+
        }
    ) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        $(#[$meta])*
        #[repr(u32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Every enumerant, in numeric order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Canonical spelling.
            #[inline]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $spelling,)+
                }
            }

            /// Enumerant with the given canonical spelling.
            pub fn from_spelling(spelling: &str) -> Option<Self> {
                match spelling {
                    $($spelling => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// SPIR-V numeric value.
            #[inline]
            pub const fn value(self) -> u32 {
                self as u32
            }

            /// Enumerant with the given SPIR-V numeric value.
            pub fn from_value(value: u32) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl SpirvEnum for $name {
            const WHAT: &'static str = $what;

            fn from_spelling(spelling: &str) -> Option<Self> {
                $name::from_spelling(spelling)
            }

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

spirv_enum! {
    /// Storage class of a pointer's pointee.
    pub enum StorageClass("storage class") {
        UniformConstant = 0 => "UniformConstant",
        Input = 1 => "Input",
        Uniform = 2 => "Uniform",
        Output = 3 => "Output",
        Workgroup = 4 => "Workgroup",
        CrossWorkgroup = 5 => "CrossWorkgroup",
        Private = 6 => "Private",
        Function = 7 => "Function",
        Generic = 8 => "Generic",
        PushConstant = 9 => "PushConstant",
        AtomicCounter = 10 => "AtomicCounter",
        Image = 11 => "Image",
        StorageBuffer = 12 => "StorageBuffer",
    }
}

spirv_enum! {
    /// Image dimensionality.
    pub enum Dim("image dimensionality") {
        Dim1D = 0 => "1D",
        Dim2D = 1 => "2D",
        Dim3D = 2 => "3D",
        Cube = 3 => "Cube",
        Rect = 4 => "Rect",
        Buffer = 5 => "Buffer",
        SubpassData = 6 => "SubpassData",
    }
}

spirv_enum! {
    /// Whether an image is a depth image.
    #[derive(Default)]
    pub enum ImageDepthInfo("image depth info") {
        NoDepth = 0 => "NoDepth",
        IsDepth = 1 => "IsDepth",
        #[default]
        DepthUnknown = 2 => "DepthUnknown",
    }
}

spirv_enum! {
    /// Whether an image is arrayed.
    #[derive(Default)]
    pub enum ImageArrayedInfo("image arrayed info") {
        #[default]
        NonArrayed = 0 => "NonArrayed",
        Arrayed = 1 => "Arrayed",
    }
}

spirv_enum! {
    /// Whether an image is multisampled.
    #[derive(Default)]
    pub enum ImageSamplingInfo("image sampling info") {
        #[default]
        SingleSampled = 0 => "SingleSampled",
        MultiSampled = 1 => "MultiSampled",
    }
}

spirv_enum! {
    /// Whether an image is used with a sampler.
    #[derive(Default)]
    pub enum ImageSamplerUseInfo("image sampler use info") {
        #[default]
        SamplerUnknown = 0 => "SamplerUnknown",
        NeedSampler = 1 => "NeedSampler",
        NoSampler = 2 => "NoSampler",
    }
}

spirv_enum! {
    /// Image texel format.
    #[derive(Default)]
    pub enum ImageFormat("image format") {
        #[default]
        Unknown = 0 => "Unknown",
        Rgba32f = 1 => "Rgba32f",
        Rgba16f = 2 => "Rgba16f",
        R32f = 3 => "R32f",
        Rgba8 = 4 => "Rgba8",
        Rgba8Snorm = 5 => "Rgba8Snorm",
        Rg32f = 6 => "Rg32f",
        Rg16f = 7 => "Rg16f",
        R11fG11fB10f = 8 => "R11fG11fB10f",
        R16f = 9 => "R16f",
        Rgba16 = 10 => "Rgba16",
        Rgb10A2 = 11 => "Rgb10A2",
        Rg16 = 12 => "Rg16",
        Rg8 = 13 => "Rg8",
        R16 = 14 => "R16",
        R8 = 15 => "R8",
        Rgba16Snorm = 16 => "Rgba16Snorm",
        Rg16Snorm = 17 => "Rg16Snorm",
        Rg8Snorm = 18 => "Rg8Snorm",
        R16Snorm = 19 => "R16Snorm",
        R8Snorm = 20 => "R8Snorm",
        Rgba32i = 21 => "Rgba32i",
        Rgba16i = 22 => "Rgba16i",
        Rgba8i = 23 => "Rgba8i",
        R32i = 24 => "R32i",
        Rg32i = 25 => "Rg32i",
        Rg16i = 26 => "Rg16i",
        Rg8i = 27 => "Rg8i",
        R16i = 28 => "R16i",
        R8i = 29 => "R8i",
        Rgba32ui = 30 => "Rgba32ui",
        Rgba16ui = 31 => "Rgba16ui",
        Rgba8ui = 32 => "Rgba8ui",
        R32ui = 33 => "R32ui",
        Rgb10a2ui = 34 => "Rgb10a2ui",
        Rg32ui = 35 => "Rg32ui",
        Rg16ui = 36 => "Rg16ui",
        Rg8ui = 37 => "Rg8ui",
        R16ui = 38 => "R16ui",
        R8ui = 39 => "R8ui",
    }
}
