//! Tessel IR - Context, Handles and Uniqued Locations
//!
//! This crate contains the storage core shared by every Tessel dialect:
//! - [`Context`]: owner of all canonical storage for a compilation unit
//! - [`Handle`]: `Copy` identity handles with kind-tag narrowing
//! - [`Uniquer`]: sharded hash-consing tables, one per variant family
//! - Locations: unknown, file/line/column, name, call site and fused
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: strings become [`Ident`], records become handles
//! - **Identity Equality**: equal keys in one context give equal handles,
//!   so comparing or hashing a handle never inspects the record
//! - **Explicit Context**: no ambient or global context; every constructor
//!   and accessor takes `&Context`

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod context;
mod handle;
mod ident;
mod interner;
pub mod location;
mod slot;
mod uniquer;

use std::sync::Once;

pub use context::{Context, ContextConfig};
pub use handle::{ContextId, Family, Handle, Variant};
pub use ident::Ident;
pub use interner::{IdentInterner, InternError};
pub use location::{
    CallSiteLoc, FileLineColLoc, FusedLoc, Location, LocationData, LocationError, LocationFamily,
    LocationKind, NameLoc, UnknownLoc,
};
pub use slot::{HandleSet, Slot};
pub use uniquer::{AllocationFailure, Uniquer};

static_assert_size!(Ident, 8);
static_assert_size!(ContextId, 4);
static_assert_size!(Location, 12);

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Call once at tool startup. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=tessel_ir=trace` to see every new canonical record.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
