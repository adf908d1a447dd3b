use super::*;
use pretty_assertions::assert_eq;

#[test]
fn unknown_is_a_singleton() {
    let ctx = Context::new();
    assert_eq!(UnknownLoc::get(&ctx), UnknownLoc::get(&ctx));
    assert_eq!(ctx.record_count::<LocationFamily>(), 1);
}

#[test]
fn file_line_col_is_canonical() {
    let ctx = Context::new();
    let a = FileLineColLoc::get(&ctx, "a.cc", 1, 1);
    let b = FileLineColLoc::get(&ctx, "a.cc", 1, 1);
    let c = FileLineColLoc::get(&ctx, "a.cc", 1, 2);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(&*a.filename(&ctx), "a.cc");
    assert_eq!(a.line(&ctx), 1);
    assert_eq!(c.column(&ctx), 2);
}

#[test]
fn zero_line_and_column_are_accepted() {
    let ctx = Context::new();
    let loc = FileLineColLoc::get(&ctx, "gen.cc", 0, 0);
    assert_eq!(loc.line(&ctx), 0);
    assert_eq!(loc.column(&ctx), 0);
}

#[test]
fn kinds_are_exclusive() {
    let ctx = Context::new();
    let unknown: Location = UnknownLoc::get(&ctx).into();
    let file: Location = FileLineColLoc::get(&ctx, "a.cc", 1, 1).into();
    let name: Location = NameLoc::get(&ctx, "x", file).into();
    let call: Location = CallSiteLoc::get(&ctx, name, file).into();
    let fused: Location = FusedLoc::get(&ctx, &[file, name]).into();

    let cases = [
        (unknown, LocationKind::Unknown),
        (file, LocationKind::FileLineCol),
        (name, LocationKind::Name),
        (call, LocationKind::CallSite),
        (fused, LocationKind::Fused),
    ];
    for (loc, kind) in cases {
        assert_eq!(loc.kind(), kind);
        assert_eq!(loc.isa::<UnknownLoc>(), kind == LocationKind::Unknown);
        assert_eq!(loc.isa::<FileLineColLoc>(), kind == LocationKind::FileLineCol);
        assert_eq!(loc.isa::<NameLoc>(), kind == LocationKind::Name);
        assert_eq!(loc.isa::<CallSiteLoc>(), kind == LocationKind::CallSite);
        assert_eq!(loc.isa::<FusedLoc>(), kind == LocationKind::Fused);
    }
}

#[test]
fn name_wraps_child() {
    let ctx = Context::new();
    let file: Location = FileLineColLoc::get(&ctx, "a.cc", 3, 4).into();
    let name = NameLoc::get(&ctx, "foo", file);
    assert_eq!(&*name.name(&ctx), "foo");
    assert_eq!(name.child(&ctx), file);
}

#[test]
fn name_without_child_uses_unknown() {
    let ctx = Context::new();
    let name = NameLoc::get_unknown(&ctx, "foo");
    assert!(name.child(&ctx).isa::<UnknownLoc>());
    assert_eq!(name, NameLoc::get(&ctx, "foo", UnknownLoc::get(&ctx).into()));
}

#[test]
fn name_of_name_is_rejected() {
    let ctx = Context::new();
    let inner: Location = NameLoc::get_unknown(&ctx, "m").into();
    assert_eq!(
        NameLoc::try_get(&ctx, "n", inner),
        Err(LocationError::NestedName)
    );
}

#[test]
#[should_panic(expected = "cannot wrap another name location")]
fn name_of_name_panics() {
    let ctx = Context::new();
    let inner: Location = NameLoc::get_unknown(&ctx, "m").into();
    let _ = NameLoc::get(&ctx, "n", inner);
}

#[test]
fn call_chain_is_right_associated() {
    let ctx = Context::new();
    let site: Location = NameLoc::get_unknown(&ctx, "site").into();
    let f1: Location = FileLineColLoc::get(&ctx, "f.cc", 1, 1).into();
    let f2: Location = FileLineColLoc::get(&ctx, "f.cc", 2, 1).into();
    let f3: Location = FileLineColLoc::get(&ctx, "f.cc", 3, 1).into();

    let call = CallSiteLoc::get_chain(&ctx, site, &[f1, f2, f3]);
    assert_eq!(call.callee(&ctx), site);

    let first = call.caller(&ctx).cast::<CallSiteLoc>();
    assert_eq!(first.callee(&ctx), f1);
    let second = first.caller(&ctx).cast::<CallSiteLoc>();
    assert_eq!(second.callee(&ctx), f2);
    assert_eq!(second.caller(&ctx), f3);

    assert_eq!(call.frames(&ctx), vec![f1, f2, f3]);
}

#[test]
fn call_chain_with_one_frame_is_a_plain_call_site() {
    let ctx = Context::new();
    let site: Location = NameLoc::get_unknown(&ctx, "site").into();
    let frame: Location = FileLineColLoc::get(&ctx, "f.cc", 9, 9).into();
    assert_eq!(
        CallSiteLoc::get_chain(&ctx, site, &[frame]),
        CallSiteLoc::get(&ctx, site, frame)
    );
}

#[test]
fn empty_call_chain_is_rejected() {
    let ctx = Context::new();
    let site: Location = UnknownLoc::get(&ctx).into();
    assert_eq!(
        CallSiteLoc::try_get_chain(&ctx, site, &[]),
        Err(LocationError::EmptyCallStack)
    );
}

#[test]
fn fused_keeps_order_and_has_no_metadata() {
    let ctx = Context::new();
    let l1: Location = FileLineColLoc::get(&ctx, "a.cc", 1, 1).into();
    let l2: Location = FileLineColLoc::get(&ctx, "b.cc", 2, 2).into();
    let l3: Location = FileLineColLoc::get(&ctx, "c.cc", 3, 3).into();

    let fused = FusedLoc::get(&ctx, &[l1, l2, l3]);
    assert_eq!(fused.locations(&ctx), vec![l1, l2, l3]);
    assert_eq!(fused.len(&ctx), 3);
    assert_eq!(fused.primary(&ctx), l1);
    assert_eq!(fused.metadata(&ctx), None);

    // Order is part of the key.
    assert_ne!(fused, FusedLoc::get(&ctx, &[l3, l2, l1]));
}

#[test]
fn fused_metadata_is_part_of_the_key() {
    let ctx = Context::new();
    let l1: Location = FileLineColLoc::get(&ctx, "a.cc", 1, 1).into();
    let plain = FusedLoc::get(&ctx, &[l1]);
    let tagged = FusedLoc::get_with_metadata(&ctx, &[l1], "inlined");
    assert_ne!(plain, tagged);
    assert_eq!(tagged.metadata(&ctx), Some(ctx.ident("inlined")));
}

#[test]
fn empty_fused_is_rejected() {
    let ctx = Context::new();
    assert_eq!(
        FusedLoc::try_get(&ctx, &[], None),
        Err(LocationError::EmptyFused)
    );
}

#[test]
fn fuse_simplifies() {
    let ctx = Context::new();
    let unknown: Location = UnknownLoc::get(&ctx).into();
    let a: Location = FileLineColLoc::get(&ctx, "a.cc", 1, 1).into();
    let b: Location = FileLineColLoc::get(&ctx, "b.cc", 1, 1).into();
    let inner: Location = FusedLoc::get(&ctx, &[a, b]).into();

    assert_eq!(FusedLoc::fuse(&ctx, &[], None), unknown);
    assert_eq!(FusedLoc::fuse(&ctx, &[unknown, a, a], None), a);

    let flat = FusedLoc::fuse(&ctx, &[inner, b, unknown], None);
    assert_eq!(flat, inner);

    let tagged = FusedLoc::fuse(&ctx, &[a], Some(ctx.ident("meta")));
    assert_eq!(tagged.cast::<FusedLoc>().locations(&ctx), vec![a]);
}

#[test]
fn walk_visits_each_location_once_in_pre_order() {
    let ctx = Context::new();
    let a: Location = FileLineColLoc::get(&ctx, "a.cc", 1, 1).into();
    let name: Location = NameLoc::get(&ctx, "n", a).into();
    let call: Location = CallSiteLoc::get(&ctx, name, a).into();
    let fused: Location = FusedLoc::get(&ctx, &[call, a]).into();

    let mut seen = Vec::new();
    ctx.walk_location(fused, |loc| seen.push(loc));
    assert_eq!(seen, vec![fused, call, name, a]);
}

#[test]
fn formatting_matches_surface_syntax() {
    let ctx = Context::new();
    let unknown: Location = UnknownLoc::get(&ctx).into();
    let file: Location = FileLineColLoc::get(&ctx, "a.cc", 10, 8).into();
    let bare: Location = NameLoc::get_unknown(&ctx, "foo").into();
    let named: Location = NameLoc::get(&ctx, "bar", file).into();
    let call: Location = CallSiteLoc::get(&ctx, bare, file).into();
    let fused: Location = FusedLoc::get(&ctx, &[file, bare]).into();
    let tagged: Location = FusedLoc::get_with_metadata(&ctx, &[file], "m").into();

    assert_eq!(ctx.format_location(unknown), "unknown");
    assert_eq!(ctx.format_location(file), "\"a.cc\":10:8");
    assert_eq!(ctx.format_location(bare), "\"foo\"");
    assert_eq!(ctx.format_location(named), "\"bar\"(\"a.cc\":10:8)");
    assert_eq!(ctx.format_location(call), "callsite(\"foo\" at \"a.cc\":10:8)");
    assert_eq!(ctx.format_location(fused), "fused[\"a.cc\":10:8, \"foo\"]");
    assert_eq!(ctx.format_location(tagged), "fused<\"m\">[\"a.cc\":10:8]");
}

#[test]
fn kind_names_are_distinct() {
    let names: std::collections::HashSet<_> =
        LocationKind::ALL.iter().map(|k| k.name()).collect();
    assert_eq!(names.len(), LocationKind::ALL.len());
    assert_eq!(LocationKind::CallSite.to_string(), "callsite");
}

#[test]
fn formatting_escapes_quotes_and_backslashes() {
    let ctx = Context::new();
    let file: Location = FileLineColLoc::get(&ctx, "dir\\a\"b.cc", 1, 2).into();
    let name: Location = NameLoc::get_unknown(&ctx, "a\"b\\c").into();
    let tagged: Location = FusedLoc::get_with_metadata(&ctx, &[file], "m\"").into();

    assert_eq!(ctx.format_location(file), r#""dir\\a\"b.cc":1:2"#);
    assert_eq!(ctx.format_location(name), r#""a\"b\\c""#);
    assert_eq!(ctx.format_location(tagged), r#"fused<"m\"">["dir\\a\"b.cc":1:2]"#);
}

#[test]
#[should_panic(expected = "precondition violated")]
fn file_line_col_rejects_foreign_filename() {
    let ctx = Context::new();
    let other = Context::new();
    let filename = other.ident("f0.cc");
    let _ = FileLineColLoc::get_ident(&ctx, filename, 1, 1);
}

#[test]
#[should_panic(expected = "precondition violated")]
fn name_rejects_foreign_child() {
    let ctx = Context::new();
    let other = Context::new();
    let child: Location = FileLineColLoc::get(&other, "f0.cc", 1, 1).into();
    let _ = NameLoc::try_get(&ctx, "n", child);
}

#[test]
#[should_panic(expected = "precondition violated")]
fn call_site_rejects_foreign_caller() {
    let ctx = Context::new();
    let other = Context::new();
    let callee: Location = FileLineColLoc::get(&ctx, "a.cc", 1, 1).into();
    let caller: Location = FileLineColLoc::get(&other, "b.cc", 2, 2).into();
    let _ = CallSiteLoc::get(&ctx, callee, caller);
}

#[test]
#[should_panic(expected = "precondition violated")]
fn fused_rejects_foreign_location() {
    let ctx = Context::new();
    let other = Context::new();
    let mine: Location = FileLineColLoc::get(&ctx, "a.cc", 1, 1).into();
    let theirs: Location = FileLineColLoc::get(&other, "a.cc", 1, 1).into();
    let _ = FusedLoc::try_get(&ctx, &[mine, theirs], None);
}

#[test]
#[should_panic(expected = "precondition violated")]
fn fused_rejects_foreign_metadata() {
    let ctx = Context::new();
    let other = Context::new();
    let mine: Location = FileLineColLoc::get(&ctx, "a.cc", 1, 1).into();
    let _ = FusedLoc::try_get(&ctx, &[mine], Some(other.ident("m")));
}

#[test]
#[should_panic(expected = "precondition violated")]
fn fuse_rejects_a_single_foreign_location() {
    let ctx = Context::new();
    let other = Context::new();
    let theirs: Location = FileLineColLoc::get(&other, "a.cc", 1, 1).into();
    let _ = FusedLoc::fuse(&ctx, &[theirs], None);
}

#[test]
fn rejected_foreign_parts_leave_no_record() {
    let ctx = Context::new();
    let other = Context::new();
    let child: Location = UnknownLoc::get(&other).into();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        NameLoc::get(&ctx, "n", child)
    }));
    assert!(result.is_err());
    assert_eq!(ctx.record_count::<LocationFamily>(), 0);
}
