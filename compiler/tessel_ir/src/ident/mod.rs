//! Interned identifier.
//!
//! Filenames, location names and fused-location metadata are stored as
//! `Ident`s so that location keys hash and compare in O(1).

use std::fmt;

use crate::ContextId;

/// Interned string identifier.
///
/// Layout: the owning context plus a 32-bit index split into shard (4 bits)
/// and local index (28 bits):
/// - Bits 31-28: Shard index (0-15)
/// - Bits 27-0: Local index within shard
///
/// An `Ident` is only meaningful together with the
/// [`IdentInterner`](crate::IdentInterner) that produced it; looking it up
/// anywhere else is a precondition violation. [`Ident::EMPTY`] is the one
/// identifier shared by every interner.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Ident {
    owner: ContextId,
    raw: u32,
}

impl Ident {
    /// Pre-interned empty string.
    pub const EMPTY: Ident = Ident {
        owner: ContextId::SHARED,
        raw: 0,
    };

    /// Maximum local index per shard.
    pub const MAX_LOCAL: u32 = 0x0FFF_FFFF;

    /// Number of shards.
    pub const NUM_SHARDS: usize = 16;

    /// Create from owner, shard and local index.
    #[inline]
    pub(crate) const fn new(owner: ContextId, shard: u32, local: u32) -> Self {
        debug_assert!(shard < 16);
        debug_assert!(local <= Self::MAX_LOCAL);
        Ident {
            owner,
            raw: (shard << 28) | local,
        }
    }

    /// Interner that produced this identifier, or `None` for [`Ident::EMPTY`].
    #[inline]
    pub fn owner(self) -> Option<ContextId> {
        (self.owner != ContextId::SHARED).then_some(self.owner)
    }

    /// Extract shard index.
    #[inline]
    pub const fn shard(self) -> usize {
        (self.raw >> 28) as usize
    }

    /// Extract local index.
    #[inline]
    pub const fn local(self) -> usize {
        (self.raw & Self::MAX_LOCAL) as usize
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.raw
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner() {
            Some(owner) => write!(
                f,
                "Ident({owner}, shard={}, local={})",
                self.shard(),
                self.local()
            ),
            None => f.write_str("Ident(empty)"),
        }
    }
}

impl Default for Ident {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests;
