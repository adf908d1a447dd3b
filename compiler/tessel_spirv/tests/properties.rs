//! End-to-end checks of the interning guarantees across the location and
//! SPIR-V type families.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tessel_diagnostic::Diagnostic;
use tessel_ir::{
    CallSiteLoc, Context, FileLineColLoc, FusedLoc, Location, LocationError, LocationKind, NameLoc,
    UnknownLoc,
};
use tessel_spirv::{
    ArrayType, Dim, FloatType, ImageFormat, ImageKey, ImageType, PointerType, SpirvDialect,
    SpirvType, StorageClass, TypeKind,
};

fn spirv_context() -> Context {
    let mut ctx = Context::new();
    SpirvDialect::register(&mut ctx);
    ctx
}

fn parse(ctx: &Context, spec: &str) -> SpirvType {
    let loc = UnknownLoc::get(ctx).into();
    let mut sink: Vec<Diagnostic> = Vec::new();
    SpirvDialect::parse_type(ctx, spec, loc, &mut sink)
        .unwrap_or_else(|| panic!("`{spec}` failed to parse: {sink:?}"))
}

#[test]
fn canonicalization() {
    let ctx = spirv_context();
    let a = FileLineColLoc::get(&ctx, "a.cc", 1, 1);
    assert_eq!(a, FileLineColLoc::get(&ctx, "a.cc", 1, 1));

    let f32_ty: SpirvType = FloatType::get(&ctx, 32).into();
    assert_eq!(
        PointerType::get(&ctx, f32_ty, StorageClass::Uniform),
        PointerType::get(&ctx, f32_ty, StorageClass::Uniform)
    );
    assert_eq!(parse(&ctx, "array<4 x f32>"), parse(&ctx, "array<4xf32>"));
}

#[test]
fn kind_stability() {
    let ctx = spirv_context();
    let loc: Location = NameLoc::get_unknown(&ctx, "n").into();
    let ty = parse(&ctx, "rtarray<i32>");
    for _ in 0..3 {
        let _ = FileLineColLoc::get(&ctx, "more.cc", 1, 1);
        let _ = parse(&ctx, "rtarray<rtarray<i32>>");
        assert_eq!(loc.kind(), LocationKind::Name);
        assert_eq!(ty.kind(), TypeKind::RuntimeArray);
    }
    assert!(LocationKind::ALL.contains(&loc.kind()));
    assert!(TypeKind::ALL.contains(&ty.kind()));
}

#[test]
fn downcast_soundness() {
    let ctx = spirv_context();
    let f32_ty = parse(&ctx, "f32");
    let array = parse(&ctx, "array<2 x f32>");
    let ptr = parse(&ctx, "ptr<f32, Input>");
    let image = parse(&ctx, "image<f32, 2D>");

    assert!(array.isa::<ArrayType>() && !array.isa::<PointerType>() && !array.isa::<ImageType>());
    assert!(ptr.isa::<PointerType>() && !ptr.isa::<ArrayType>());
    assert!(image.isa::<ImageType>() && !image.isa::<FloatType>());
    assert!(f32_ty.isa::<FloatType>() && !f32_ty.isa::<ArrayType>());
    assert_eq!(array.dyn_cast::<PointerType>(), None);
    assert!(array.dyn_cast::<ArrayType>().is_some());
}

#[test]
fn name_nesting_rejection() {
    let ctx = Context::new();
    let inner: Location = NameLoc::get_unknown(&ctx, "m").into();
    assert_eq!(
        NameLoc::try_get(&ctx, "n", inner),
        Err(LocationError::NestedName)
    );
}

#[test]
fn fused_ordering_round_trip() {
    let ctx = Context::new();
    let l1: Location = FileLineColLoc::get(&ctx, "a.cc", 1, 1).into();
    let l2: Location = FileLineColLoc::get(&ctx, "a.cc", 2, 1).into();
    let l3: Location = FileLineColLoc::get(&ctx, "a.cc", 3, 1).into();
    let fused = FusedLoc::get(&ctx, &[l1, l2, l3]);
    assert_eq!(fused.locations(&ctx), vec![l1, l2, l3]);
    assert_eq!(fused.metadata(&ctx), None);
}

#[test]
fn call_chain_construction() {
    let ctx = Context::new();
    let site: Location = NameLoc::get_unknown(&ctx, "site").into();
    let f1: Location = FileLineColLoc::get(&ctx, "f.cc", 1, 1).into();
    let f2: Location = FileLineColLoc::get(&ctx, "f.cc", 2, 1).into();
    let f3: Location = FileLineColLoc::get(&ctx, "f.cc", 3, 1).into();

    let call = CallSiteLoc::get_chain(&ctx, site, &[f1, f2, f3]);
    let caller = call.caller(&ctx).cast::<CallSiteLoc>();
    assert_eq!(caller.callee(&ctx), f1);
    let caller_caller = caller.caller(&ctx).cast::<CallSiteLoc>();
    assert_eq!(caller_caller.callee(&ctx), f2);
    assert_eq!(caller_caller.caller(&ctx), f3);
}

#[test]
fn type_text_round_trip() {
    let ctx = spirv_context();

    let array = parse(&ctx, "array<4 x f32>").cast::<ArrayType>();
    assert_eq!(array.element_count(&ctx), 4);
    assert_eq!(array.element_type(&ctx), SpirvType::from(FloatType::get(&ctx, 32)));
    assert_eq!(SpirvDialect::print_type(&ctx, array.into()), "array<4 x f32>");

    let ptr = parse(&ctx, "ptr<f32, Uniform>").cast::<PointerType>();
    assert_eq!(ptr.storage_class(&ctx), StorageClass::Uniform);
    assert_eq!(SpirvDialect::print_type(&ctx, ptr.into()), "ptr<f32, Uniform>");
}

#[test]
fn cross_context_non_identity() {
    let a = Context::new();
    let b = Context::new();
    let la: Location = FileLineColLoc::get(&a, "a.cc", 1, 1).into();
    let lb: Location = FileLineColLoc::get(&b, "a.cc", 1, 1).into();
    assert_ne!(la, lb);
    assert_eq!(a.format_location(la), b.format_location(lb));
}

#[test]
fn composite_key_discrimination() {
    let ctx = spirv_context();
    let f32_ty: SpirvType = FloatType::get(&ctx, 32).into();
    let key = ImageKey::new(f32_ty, Dim::Dim2D);
    let unknown = ImageType::get_with(&ctx, key);
    let rgba = ImageType::get_with(&ctx, key.with_format(ImageFormat::Rgba32f));
    assert_ne!(unknown, rgba);
    assert_eq!(unknown, ImageType::get_with(&ctx, key));
}

fn scalar_spec() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["i1", "i8", "i16", "i32", "i64", "f16", "f32", "f64"])
        .prop_map(str::to_string)
}

fn enum_spelling<E: tessel_spirv::SpirvEnum + std::fmt::Debug>(
    all: &'static [E],
) -> impl Strategy<Value = String> {
    prop::sample::select(all).prop_map(|e| e.as_str().to_string())
}

fn image_spec() -> impl Strategy<Value = String> {
    (
        scalar_spec(),
        enum_spelling(Dim::ALL),
        enum_spelling(tessel_spirv::ImageDepthInfo::ALL),
        enum_spelling(tessel_spirv::ImageArrayedInfo::ALL),
        enum_spelling(tessel_spirv::ImageSamplingInfo::ALL),
        enum_spelling(tessel_spirv::ImageSamplerUseInfo::ALL),
        enum_spelling(ImageFormat::ALL),
    )
        .prop_map(|(elem, dim, depth, arrayed, sampling, sampler_use, format)| {
            format!("image<{elem}, {dim}, {depth}, {arrayed}, {sampling}, {sampler_use}, {format}>")
        })
}

/// Canonically spelled type strings, nested a few levels deep.
fn type_spec() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![scalar_spec(), image_spec()];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (1u64..=1024, inner.clone()).prop_map(|(n, t)| format!("array<{n} x {t}>")),
            (inner.clone(), enum_spelling(StorageClass::ALL))
                .prop_map(|(t, sc)| format!("ptr<{t}, {sc}>")),
            inner.prop_map(|t| format!("rtarray<{t}>")),
        ]
    })
}

proptest! {
    #[test]
    fn canonical_text_round_trips(spec in type_spec()) {
        let ctx = spirv_context();
        let ty = parse(&ctx, &spec);
        prop_assert_eq!(SpirvDialect::print_type(&ctx, ty), spec.clone());
        prop_assert_eq!(parse(&ctx, &spec), ty);
    }

    #[test]
    fn printed_text_reparses_to_same_type(spec in type_spec()) {
        let ctx = spirv_context();
        let ty = parse(&ctx, &spec);
        let again = parse(&ctx, &SpirvDialect::print_type(&ctx, ty));
        prop_assert_eq!(again, ty);
    }

    #[test]
    fn equal_file_locations_are_identical(
        file in "[a-z]{1,8}\\.cc",
        line in 0u32..1000,
        column in 0u32..200,
    ) {
        let ctx = Context::new();
        let a = FileLineColLoc::get(&ctx, &file, line, column);
        let b = FileLineColLoc::get(&ctx, &file, line, column);
        prop_assert_eq!(a, b);
        prop_assert_eq!(ctx.record_count::<tessel_ir::LocationFamily>(), 1);
    }
}
