use super::*;

#[test]
fn test_ident_layout() {
    let owner = ContextId::fresh();
    let ident = Ident::new(owner, 5, 1000);
    assert_eq!(ident.shard(), 5);
    assert_eq!(ident.local(), 1000);
    assert_eq!(ident.owner(), Some(owner));
}

#[test]
fn test_ident_empty() {
    assert_eq!(Ident::EMPTY.shard(), 0);
    assert_eq!(Ident::EMPTY.local(), 0);
    assert_eq!(Ident::EMPTY.owner(), None);
    assert_eq!(Ident::default(), Ident::EMPTY);
    assert_eq!(format!("{:?}", Ident::EMPTY), "Ident(empty)");
}

#[test]
fn test_ident_max_local() {
    let ident = Ident::new(ContextId::fresh(), 15, Ident::MAX_LOCAL);
    assert_eq!(ident.shard(), 15);
    assert_eq!(ident.local(), Ident::MAX_LOCAL as usize);
}

#[test]
fn test_ident_owner_is_part_of_identity() {
    let a = ContextId::fresh();
    let b = ContextId::fresh();
    assert_ne!(Ident::new(a, 0, 1), Ident::new(b, 0, 1));
}

#[test]
fn test_ident_hash() {
    use std::collections::HashSet;
    let owner = ContextId::fresh();
    let mut set = HashSet::new();
    set.insert(Ident::new(owner, 0, 1));
    set.insert(Ident::new(owner, 0, 1));
    set.insert(Ident::new(owner, 0, 2));
    assert_eq!(set.len(), 2);
}
