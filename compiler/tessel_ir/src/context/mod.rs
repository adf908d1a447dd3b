//! The compilation context: root of every canonical value's lifetime.
//!
//! A [`Context`] owns the identifier interner and one [`Uniquer`] per
//! registered variant family. The location family is always present;
//! dialects register their type families during setup. Handles issued by
//! a context are only valid while it is alive and only with that context.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::location::LocationFamily;
use crate::{AllocationFailure, ContextId, Family, Handle, Ident, IdentInterner, Uniquer};

/// Pre-sizing hints for a new [`Context`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ContextConfig {
    /// Expected number of distinct locations.
    pub location_capacity: usize,
    /// Expected number of distinct identifiers (filenames, names).
    pub ident_capacity: usize,
    /// Expected number of records per registered dialect family.
    pub family_capacity: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            location_capacity: 256,
            ident_capacity: 256,
            family_capacity: 256,
        }
    }
}

/// Owner of all canonical storage for one compilation unit.
///
/// # Thread Safety
/// Interning takes `&self` and is safe to call from several threads; each
/// family table locks only its lookup-or-insert critical section.
/// Registering a family takes `&mut self` and belongs to setup.
pub struct Context {
    id: ContextId,
    config: ContextConfig,
    idents: IdentInterner,
    families: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Context {
    /// Create a context with default sizing and the location family.
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    /// Create a context with explicit sizing hints.
    pub fn with_config(config: ContextConfig) -> Self {
        let id = ContextId::fresh();
        let mut families: FxHashMap<TypeId, Box<dyn Any + Send + Sync>> = FxHashMap::default();
        families.insert(
            TypeId::of::<LocationFamily>(),
            Box::new(Uniquer::<LocationFamily>::new(id, config.location_capacity)),
        );
        tracing::debug!(context = %id, "created context");
        Context {
            id,
            idents: IdentInterner::with_owner(id, config.ident_capacity),
            config,
            families,
        }
    }

    /// Identity of this context; every handle it issues carries it.
    #[inline]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Sizing hints this context was created with.
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Register the family `F`. Returns `false` if it was already registered.
    pub fn register_family<F: Family>(&mut self) -> bool {
        let key = TypeId::of::<F>();
        if self.families.contains_key(&key) {
            return false;
        }
        let table = Uniquer::<F>::new(self.id, self.config.family_capacity);
        self.families.insert(key, Box::new(table));
        tracing::debug!(context = %self.id, family = F::NAME, "registered family");
        true
    }

    /// Check whether the family `F` is registered.
    pub fn has_family<F: Family>(&self) -> bool {
        self.families.contains_key(&TypeId::of::<F>())
    }

    /// Uniquing table of the family `F`.
    ///
    /// # Panics
    /// Panics if `F` was never registered with this context.
    #[track_caller]
    pub fn uniquer<F: Family>(&self) -> &Uniquer<F> {
        self.families
            .get(&TypeId::of::<F>())
            .and_then(|table| table.downcast_ref::<Uniquer<F>>())
            .unwrap_or_else(|| {
                panic!(
                    "precondition violated: family `{}` is not registered with {}",
                    F::NAME,
                    self.id
                )
            })
    }

    /// Canonical handle for `record`, allocating it on first request.
    #[track_caller]
    pub fn try_intern<F: Family>(&self, record: F::Record) -> Result<Handle<F>, AllocationFailure> {
        self.uniquer::<F>().try_intern(record)
    }

    /// Canonical handle for `record`.
    ///
    /// # Panics
    /// Panics if `F` is not registered or its arena is exhausted.
    #[track_caller]
    pub fn intern<F: Family>(&self, record: F::Record) -> Handle<F> {
        self.uniquer::<F>().intern(record)
    }

    /// Clone of the canonical record behind `handle`.
    #[track_caller]
    pub fn record<F: Family>(&self, handle: Handle<F>) -> F::Record {
        self.uniquer::<F>().get(handle)
    }

    /// Run `f` on the canonical record behind `handle` without cloning it.
    #[track_caller]
    pub fn with_record<F: Family, T>(
        &self,
        handle: Handle<F>,
        f: impl FnOnce(&F::Record) -> T,
    ) -> T {
        self.uniquer::<F>().with(handle, f)
    }

    /// Number of canonical records of the family `F`.
    pub fn record_count<F: Family>(&self) -> usize {
        self.uniquer::<F>().len()
    }

    /// Intern an identifier.
    pub fn ident(&self, text: &str) -> Ident {
        self.idents.intern(text)
    }

    /// Text of an identifier interned in this context.
    ///
    /// # Panics
    /// Panics if `ident` was interned by another context.
    #[track_caller]
    pub fn ident_str(&self, ident: Ident) -> Arc<str> {
        self.idents.lookup(ident)
    }

    /// The identifier interner.
    pub fn idents(&self) -> &IdentInterner {
        &self.idents
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.id)
            .field("families", &self.families.len())
            .field("idents", &self.idents.len())
            .finish()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        tracing::debug!(context = %self.id, "destroying context");
    }
}
