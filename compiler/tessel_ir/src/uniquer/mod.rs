//! Sharded uniquing table backing one variant family.
//!
//! Follows the same pattern as [`IdentInterner`](crate::IdentInterner):
//! the structural key is hashed to one of 16 shards, each guarded by a
//! `RwLock`. Canonical records are appended to a single arena vector and
//! never moved out of it, so an index stays valid for the lifetime of the
//! owning context.
//!
//! # Publication order
//!
//! A new record is pushed into the arena before its index is inserted into
//! the shard map. A reader that finds an index in a shard map therefore
//! always finds a fully constructed record behind it.

use std::fmt;
use std::hash::{Hash, Hasher};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::{ContextId, Family, Handle};

/// Number of shards per uniquing table.
const NUM_SHARDS: usize = 16;

/// Arena exhaustion while interning a new canonical record.
///
/// Fatal: there is no recovery other than abandoning the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationFailure {
    /// Family whose arena is exhausted.
    pub family: &'static str,
    /// Number of records already allocated.
    pub count: usize,
}

impl fmt::Display for AllocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} arena exhausted after {} canonical records (max {})",
            self.family,
            self.count,
            u32::MAX
        )
    }
}

impl std::error::Error for AllocationFailure {}

/// Uniquing table plus arena for the family `F`.
pub struct Uniquer<F: Family> {
    owner: ContextId,
    /// Structural key to arena index, split by key hash.
    shards: [RwLock<FxHashMap<F::Record, u32>>; NUM_SHARDS],
    /// Canonical records, indexed by arena index.
    records: RwLock<Vec<F::Record>>,
}

impl<F: Family> Uniquer<F> {
    /// Create an empty table owned by `owner`.
    pub fn new(owner: ContextId, capacity: usize) -> Self {
        Self {
            owner,
            shards: std::array::from_fn(|_| RwLock::new(FxHashMap::default())),
            records: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    #[inline]
    fn shard_for(record: &F::Record) -> usize {
        let mut hasher = FxHasher::default();
        record.hash(&mut hasher);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "truncation is fine for hash-based shard selection"
        )]
        let hash_usize = hasher.finish() as usize;
        hash_usize % NUM_SHARDS
    }

    /// Return the canonical handle for `record`, allocating on first request.
    ///
    /// # Panics
    /// Panics if `record` holds a handle or identifier issued by another
    /// context.
    #[track_caller]
    pub fn try_intern(&self, record: F::Record) -> Result<Handle<F>, AllocationFailure> {
        self.check_record_owners(&record);
        let kind = F::kind_of(&record);
        let shard = &self.shards[Self::shard_for(&record)];

        // Fast path: check if already interned
        {
            let guard = shard.read();
            if let Some(&index) = guard.get(&record) {
                return Ok(Handle::new(self.owner, index, kind));
            }
        }

        let mut guard = shard.write();

        // Double-check after acquiring write lock
        if let Some(&index) = guard.get(&record) {
            return Ok(Handle::new(self.owner, index, kind));
        }

        let index = {
            let mut records = self.records.write();
            let count = records.len();
            let index = u32::try_from(count).map_err(|_| AllocationFailure {
                family: F::NAME,
                count,
            })?;
            records.push(record.clone());
            index
        };
        guard.insert(record, index);

        tracing::trace!(family = F::NAME, index, ?kind, "allocated canonical record");

        Ok(Handle::new(self.owner, index, kind))
    }

    /// Return the canonical handle for `record`.
    ///
    /// # Panics
    /// Panics on arena exhaustion or a foreign part, see
    /// [`try_intern`](Self::try_intern).
    #[track_caller]
    pub fn intern(&self, record: F::Record) -> Handle<F> {
        self.try_intern(record).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Run `f` on the canonical record behind `handle`.
    ///
    /// `f` runs under the arena's read lock and must not intern into the
    /// same family.
    ///
    /// # Panics
    /// Panics if `handle` was issued by a different context.
    #[track_caller]
    pub fn with<T>(&self, handle: Handle<F>, f: impl FnOnce(&F::Record) -> T) -> T {
        self.check_owner(handle);
        let records = self.records.read();
        f(&records[handle.index() as usize])
    }

    /// Clone the canonical record behind `handle`.
    ///
    /// # Panics
    /// Panics if `handle` was issued by a different context.
    #[track_caller]
    pub fn get(&self, handle: Handle<F>) -> F::Record {
        self.with(handle, Clone::clone)
    }

    /// Check whether `handle` was issued by this table's context.
    #[inline]
    pub fn owns(&self, handle: Handle<F>) -> bool {
        handle.owner() == self.owner
    }

    /// # Panics
    /// Panics if `handle` was issued by a different context.
    #[track_caller]
    pub fn check_owner(&self, handle: Handle<F>) {
        assert!(
            self.owns(handle),
            "precondition violated: {handle:?} was not issued by {}",
            self.owner
        );
    }

    #[track_caller]
    fn check_record_owners(&self, record: &F::Record) {
        let mut foreign = None;
        F::visit_owners(record, &mut |owner| {
            if owner != self.owner && foreign.is_none() {
                foreign = Some(owner);
            }
        });
        if let Some(owner) = foreign {
            panic!(
                "precondition violated: {} record {record:?} holds a part issued by {owner}, not {}",
                F::NAME,
                self.owner
            );
        }
    }

    /// Number of canonical records allocated so far.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if no record has been allocated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: Family> fmt::Debug for Uniquer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uniquer")
            .field("family", &F::NAME)
            .field("owner", &self.owner)
            .field("len", &self.len())
            .finish()
    }
}
