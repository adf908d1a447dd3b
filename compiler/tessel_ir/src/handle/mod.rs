//! Canonical handles into a [`Context`](crate::Context)'s uniquing tables.
//!
//! A `Handle<F>` names one canonical storage record of the variant family
//! `F`. Handles are `Copy`, compared and hashed by identity (issuing
//! context + arena index), and carry the kind tag written when the record
//! was first interned, so narrowing never needs a context.
//!
//! # Narrowing
//!
//! Each concrete variant of a family has a view type implementing
//! [`Variant`]. [`Handle::isa`] tests the kind tag, [`Handle::dyn_cast`]
//! returns `Some(view)` on a match, and [`Handle::cast`] panics on a
//! mismatch (a precondition violation, never undefined behavior).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU32, Ordering};

/// Process-unique identity of a [`Context`](crate::Context).
///
/// Every handle remembers the context that issued it. Two contexts never
/// share an id, so handles built from equal keys in different contexts
/// never compare equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ContextId(u32);

impl ContextId {
    /// Owner of values shared by every context, such as [`Ident::EMPTY`](crate::Ident::EMPTY).
    /// Never handed out by [`fresh`](Self::fresh).
    pub(crate) const SHARED: ContextId = ContextId(0);

    /// Allocate a fresh id.
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        ContextId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx#{}", self.0)
    }
}

/// A closed family of uniqued variants (locations, a dialect's types, ...).
///
/// The family fixes the storage record type, which doubles as the
/// structural uniquing key, and the closed kind enumeration.
pub trait Family: Sized + 'static {
    /// Human-readable family name, used in diagnostics and `Debug` output.
    const NAME: &'static str;

    /// Closed kind enumeration for this family.
    type Kind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// Immutable storage record; also the structural uniquing key.
    type Record: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// Kind tag of a record.
    fn kind_of(record: &Self::Record) -> Self::Kind;

    /// Report the issuing context of every handle and identifier stored in
    /// `record`. Interning rejects a record whose parts come from another
    /// context. Families whose records hold no handles keep the default.
    fn visit_owners(record: &Self::Record, visit: &mut dyn FnMut(ContextId)) {
        let _ = (record, visit);
    }
}

/// Identity handle to a canonical record of family `F`.
pub struct Handle<F: Family> {
    owner: ContextId,
    index: u32,
    kind: F::Kind,
    _family: PhantomData<fn() -> F>,
}

impl<F: Family> Handle<F> {
    #[inline]
    pub(crate) fn new(owner: ContextId, index: u32, kind: F::Kind) -> Self {
        Handle {
            owner,
            index,
            kind,
            _family: PhantomData,
        }
    }

    /// Kind tag written when the record was interned.
    #[inline]
    pub fn kind(self) -> F::Kind {
        self.kind
    }

    /// Context that issued this handle.
    #[inline]
    pub fn owner(self) -> ContextId {
        self.owner
    }

    /// Arena index of the canonical record within its family table.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    /// Check whether this handle is of variant `V`.
    #[inline]
    pub fn isa<V: Variant<F>>(self) -> bool {
        self.kind == V::KIND
    }

    /// Narrow to variant `V`, or `None` if the kind does not match.
    #[inline]
    pub fn dyn_cast<V: Variant<F>>(self) -> Option<V> {
        if self.isa::<V>() {
            Some(V::from_handle_unchecked(self))
        } else {
            None
        }
    }

    /// Narrow to variant `V`.
    ///
    /// # Panics
    /// Panics if the handle is not of variant `V`. Callers are expected to
    /// have checked with [`isa`](Self::isa) or to use
    /// [`dyn_cast`](Self::dyn_cast).
    #[inline]
    #[track_caller]
    pub fn cast<V: Variant<F>>(self) -> V {
        self.dyn_cast::<V>().unwrap_or_else(|| {
            panic!(
                "precondition violated: cannot cast {} handle of kind {:?} to {:?}",
                F::NAME,
                self.kind,
                V::KIND
            )
        })
    }
}

impl<F: Family> Clone for Handle<F> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Family> Copy for Handle<F> {}

impl<F: Family> PartialEq for Handle<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.index == other.index
    }
}

impl<F: Family> Eq for Handle<F> {}

impl<F: Family> Hash for Handle<F> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        ((u64::from(self.owner.raw()) << 32) | u64::from(self.index)).hash(state);
    }
}

impl<F: Family> fmt::Debug for Handle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?}, {}#{})",
            F::NAME,
            self.kind,
            self.owner,
            self.index
        )
    }
}

/// A narrowed view of a [`Handle`] whose kind is statically known.
pub trait Variant<F: Family>: Copy + Into<Handle<F>> {
    /// The kind tag this view accepts.
    const KIND: F::Kind;

    /// Wrap a handle without checking its kind.
    ///
    /// Only [`Handle::dyn_cast`] and [`Handle::cast`] call this after the
    /// kind has been checked.
    #[doc(hidden)]
    fn from_handle_unchecked(handle: Handle<F>) -> Self;
}

/// Declare a narrowed view type over a family's [`Handle`].
///
/// ```text
/// define_variant! {
///     /// A `name(child)` location.
///     pub struct NameLoc: LocationFamily = LocationKind::Name;
/// }
/// ```
#[macro_export]
macro_rules! define_variant {
    ($(#[$meta:meta])* $vis:vis struct $name:ident : $family:ty = $kind:expr;) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        #[repr(transparent)]
        $vis struct $name($crate::Handle<$family>);

        impl $name {
            /// The underlying untyped handle.
            #[inline]
            pub fn handle(self) -> $crate::Handle<$family> {
                self.0
            }
        }

        impl $crate::Variant<$family> for $name {
            const KIND: <$family as $crate::Family>::Kind = $kind;

            #[inline]
            fn from_handle_unchecked(handle: $crate::Handle<$family>) -> Self {
                $name(handle)
            }
        }

        impl ::std::convert::From<$name> for $crate::Handle<$family> {
            #[inline]
            fn from(view: $name) -> Self {
                view.0
            }
        }
    };
}

#[cfg(test)]
mod tests;
