#![allow(dead_code)]

use super::*;
use std::collections::HashSet;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
enum ShapeKind {
    Circle,
    Square,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
enum ShapeData {
    Circle(u32),
    Square(u32),
}

enum Shapes {}

impl Family for Shapes {
    const NAME: &'static str = "Shape";
    type Kind = ShapeKind;
    type Record = ShapeData;

    fn kind_of(record: &ShapeData) -> ShapeKind {
        match record {
            ShapeData::Circle(_) => ShapeKind::Circle,
            ShapeData::Square(_) => ShapeKind::Square,
        }
    }
}

define_variant! {
    struct Circle: Shapes = ShapeKind::Circle;
}

define_variant! {
    struct Square: Shapes = ShapeKind::Square;
}

fn circle(owner: ContextId, index: u32) -> Handle<Shapes> {
    Handle::new(owner, index, ShapeKind::Circle)
}

#[test]
fn context_ids_are_unique() {
    let a = ContextId::fresh();
    let b = ContextId::fresh();
    assert_ne!(a, b);
    assert_ne!(a.raw(), b.raw());
}

#[test]
fn isa_matches_only_own_kind() {
    let h = circle(ContextId::fresh(), 0);
    assert!(h.isa::<Circle>());
    assert!(!h.isa::<Square>());
    assert_eq!(h.kind(), ShapeKind::Circle);
}

#[test]
fn dyn_cast_returns_view_or_none() {
    let h = circle(ContextId::fresh(), 3);
    let view = h.dyn_cast::<Circle>();
    assert_eq!(view.map(Circle::handle), Some(h));
    assert!(h.dyn_cast::<Square>().is_none());
}

#[test]
fn cast_round_trips_through_into() {
    let h = circle(ContextId::fresh(), 7);
    let view: Circle = h.cast();
    let back: Handle<Shapes> = view.into();
    assert_eq!(back, h);
}

#[test]
#[should_panic(expected = "precondition violated")]
fn cast_to_wrong_kind_panics() {
    let h = circle(ContextId::fresh(), 1);
    let _ = h.cast::<Square>();
}

#[test]
fn identity_includes_owner() {
    let a = ContextId::fresh();
    let b = ContextId::fresh();
    assert_eq!(circle(a, 0), circle(a, 0));
    assert_ne!(circle(a, 0), circle(b, 0));
    assert_ne!(circle(a, 0), circle(a, 1));
}

#[test]
fn handles_work_as_hash_keys() {
    let owner = ContextId::fresh();
    let mut set = HashSet::new();
    set.insert(circle(owner, 0));
    set.insert(circle(owner, 0));
    set.insert(Handle::<Shapes>::new(owner, 1, ShapeKind::Square));
    assert_eq!(set.len(), 2);
}

#[test]
fn debug_names_family_and_kind() {
    let owner = ContextId::fresh();
    let text = format!("{:?}", circle(owner, 4));
    assert_eq!(text, format!("Shape(Circle, ctx#{}#4)", owner.raw()));
}

#[test]
fn handle_is_copy_and_small() {
    let h = circle(ContextId::fresh(), 0);
    let copy = h;
    assert_eq!(h, copy);
    assert!(std::mem::size_of::<Handle<Shapes>>() <= 12);
}

#[test]
fn kind_of_reads_record_tag() {
    assert_eq!(Shapes::kind_of(&ShapeData::Square(2)), ShapeKind::Square);
    assert_eq!(Shapes::kind_of(&ShapeData::Circle(1)), ShapeKind::Circle);
}
