//! Sharded identifier interner owned by a [`Context`](crate::Context).
//!
//! Provides O(1) interning and lookup with thread-safe concurrent access
//! via per-shard locking. Interned text lives as long as the interner.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{ContextId, Ident};

/// Per-shard storage for interned strings.
struct InternShard {
    /// Map from string content to local index.
    map: FxHashMap<Arc<str>, u32>,
    /// Storage for string contents, indexed by local index.
    strings: Vec<Arc<str>>,
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Shard exceeded its 28-bit local index space.
    ShardOverflow { shard_idx: usize, count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::ShardOverflow { shard_idx, count } => write!(
                f,
                "identifier shard {shard_idx} exceeded capacity: {count} strings, max is {}",
                Ident::MAX_LOCAL
            ),
        }
    }
}

impl std::error::Error for InternError {}

impl InternShard {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(capacity),
        }
    }

    fn with_empty(capacity: usize) -> Self {
        let mut shard = Self::with_capacity(capacity);
        // Pre-intern empty string at index 0
        let empty: Arc<str> = Arc::from("");
        shard.map.insert(Arc::clone(&empty), 0);
        shard.strings.push(empty);
        shard
    }
}

/// Sharded identifier interner for concurrent access.
///
/// # Thread Safety
/// Uses `RwLock` per shard for concurrent read/write access.
pub struct IdentInterner {
    /// Identity stamped into every `Ident` this interner hands out.
    owner: ContextId,
    shards: [RwLock<InternShard>; Ident::NUM_SHARDS],
    /// Total count of interned strings across all shards (O(1) `len()`).
    total_count: AtomicUsize,
}

impl IdentInterner {
    /// Create a new interner holding only the empty string.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create an interner whose shards are pre-sized for roughly
    /// `capacity` identifiers in total.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_owner(ContextId::fresh(), capacity)
    }

    /// Create the interner of the context `owner`.
    pub(crate) fn with_owner(owner: ContextId, capacity: usize) -> Self {
        let per_shard = capacity / Ident::NUM_SHARDS + 1;
        let shards = std::array::from_fn(|i| {
            if i == 0 {
                RwLock::new(InternShard::with_empty(per_shard))
            } else {
                RwLock::new(InternShard::with_capacity(per_shard))
            }
        });

        Self {
            owner,
            shards,
            total_count: AtomicUsize::new(1),
        }
    }

    /// Compute shard for a string based on its first bytes.
    #[inline]
    fn shard_for(s: &str) -> usize {
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Ident::NUM_SHARDS
    }

    /// Try to intern a string, returning its `Ident` or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Ident, InternError> {
        if s.is_empty() {
            return Ok(Ident::EMPTY);
        }
        let shard_idx = Self::shard_for(s);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_idx_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        // Fast path: check if already interned
        {
            let guard = shard.read();
            if let Some(&local) = guard.map.get(s) {
                return Ok(Ident::new(self.owner, shard_idx_u32, local));
            }
        }

        let mut guard = shard.write();

        // Double-check after acquiring write lock
        if let Some(&local) = guard.map.get(s) {
            return Ok(Ident::new(self.owner, shard_idx_u32, local));
        }

        let count = guard.strings.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|&local| local <= Ident::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow { shard_idx, count })?;

        let text: Arc<str> = Arc::from(s);
        guard.strings.push(Arc::clone(&text));
        guard.map.insert(text, local);

        self.total_count.fetch_add(1, Ordering::Relaxed);

        Ok(Ident::new(self.owner, shard_idx_u32, local))
    }

    /// Intern a string, returning its `Ident`.
    ///
    /// # Panics
    /// Panics if a shard exceeds its capacity. Use `try_intern` for
    /// fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Ident {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the text for an `Ident`.
    ///
    /// # Panics
    /// Panics if the `Ident` was not produced by this interner.
    #[track_caller]
    pub fn lookup(&self, ident: Ident) -> Arc<str> {
        self.try_lookup(ident).unwrap_or_else(|| {
            panic!(
                "precondition violated: {ident:?} was not interned by {}",
                self.owner
            )
        })
    }

    /// Look up the text for an `Ident`, or `None` if another interner
    /// produced it.
    pub fn try_lookup(&self, ident: Ident) -> Option<Arc<str>> {
        match ident.owner() {
            None => Some(Arc::from("")),
            Some(owner) if owner == self.owner => self.shards[ident.shard()]
                .read()
                .strings
                .get(ident.local())
                .cloned(),
            Some(_) => None,
        }
    }

    /// Identity stamped into this interner's identifiers.
    pub fn owner(&self) -> ContextId {
        self.owner
    }

    /// Get the number of interned strings (O(1)).
    pub fn len(&self) -> usize {
        self.total_count.load(Ordering::Relaxed)
    }

    /// Check if the interner only holds the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for IdentInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdentInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentInterner")
            .field("owner", &self.owner)
            .field("len", &self.len())
            .finish()
    }
}
