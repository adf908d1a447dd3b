use super::*;
use crate::{
    ArrayType, Dim, FloatType, ImageFormat, ImageKey, ImageType, IntegerType, PointerType,
    RuntimeArrayType, SpirvDialect, StorageClass,
};
use pretty_assertions::assert_eq;

fn context() -> Context {
    let mut ctx = Context::new();
    SpirvDialect::register(&mut ctx);
    ctx
}

#[test]
fn scalars() {
    let ctx = context();
    assert_eq!(format_type(&ctx, IntegerType::get(&ctx, 1).into()), "i1");
    assert_eq!(format_type(&ctx, FloatType::get(&ctx, 16).into()), "f16");
}

#[test]
fn composites() {
    let ctx = context();
    let f32_ty: SpirvType = FloatType::get(&ctx, 32).into();
    let array: SpirvType = ArrayType::get(&ctx, f32_ty, 4).into();
    assert_eq!(format_type(&ctx, array), "array<4 x f32>");
    assert_eq!(
        format_type(&ctx, PointerType::get(&ctx, array, StorageClass::StorageBuffer).into()),
        "ptr<array<4 x f32>, StorageBuffer>"
    );
    assert_eq!(
        format_type(&ctx, RuntimeArrayType::get(&ctx, array).into()),
        "rtarray<array<4 x f32>>"
    );
}

#[test]
fn image_prints_every_component() {
    let ctx = context();
    let i32_ty: SpirvType = IntegerType::get(&ctx, 32).into();
    assert_eq!(
        format_type(&ctx, ImageType::get(&ctx, i32_ty, Dim::Cube).into()),
        "image<i32, Cube, DepthUnknown, NonArrayed, SingleSampled, SamplerUnknown, Unknown>"
    );
    let key = ImageKey::new(i32_ty, Dim::Dim2D).with_format(ImageFormat::R32i);
    assert_eq!(
        format_type(&ctx, ImageType::get_with(&ctx, key).into()),
        "image<i32, 2D, DepthUnknown, NonArrayed, SingleSampled, SamplerUnknown, R32i>"
    );
}

#[test]
fn format_into_appends() {
    let ctx = context();
    let mut buf = String::from("type: ");
    format_type_into(&ctx, FloatType::get(&ctx, 64).into(), &mut buf);
    assert_eq!(buf, "type: f64");
}
