//! Source-provenance locations.
//!
//! Locations form a closed family of five variants, all uniqued in the
//! owning [`Context`]:
//!
//! | Variant | Key |
//! |---|---|
//! | [`UnknownLoc`] | none (singleton per context) |
//! | [`FileLineColLoc`] | filename, line, column (0 = unknown) |
//! | [`NameLoc`] | name, child (never another name) |
//! | [`CallSiteLoc`] | callee, caller |
//! | [`FusedLoc`] | ordered non-empty list, optional metadata |

mod format;

use std::fmt;
use std::sync::Arc;

use crate::slot::HandleSet;
use crate::{define_variant, Context, ContextId, Family, Handle, Ident};

/// Kind tag of a location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum LocationKind {
    /// No source information.
    Unknown = 0,
    /// A `file:line:column` position.
    FileLineCol = 1,
    /// An identity name attached to a child location.
    Name = 2,
    /// A callee location together with its caller.
    CallSite = 3,
    /// Several locations fused into one.
    Fused = 4,
}

impl LocationKind {
    /// Every kind, in tag order.
    pub const ALL: [LocationKind; 5] = [
        LocationKind::Unknown,
        LocationKind::FileLineCol,
        LocationKind::Name,
        LocationKind::CallSite,
        LocationKind::Fused,
    ];

    /// Get the name of this kind as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            LocationKind::Unknown => "unknown",
            LocationKind::FileLineCol => "file_line_col",
            LocationKind::Name => "name",
            LocationKind::CallSite => "callsite",
            LocationKind::Fused => "fused",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical storage record (and uniquing key) of a location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum LocationData {
    Unknown,
    FileLineCol {
        filename: Ident,
        line: u32,
        column: u32,
    },
    Name {
        name: Ident,
        child: Location,
    },
    CallSite {
        callee: Location,
        caller: Location,
    },
    Fused {
        /// Exactly the fused locations, in order.
        locations: Box<[Location]>,
        metadata: Option<Ident>,
    },
}

/// The location variant family.
pub enum LocationFamily {}

impl Family for LocationFamily {
    const NAME: &'static str = "Location";
    type Kind = LocationKind;
    type Record = LocationData;

    fn kind_of(record: &LocationData) -> LocationKind {
        match record {
            LocationData::Unknown => LocationKind::Unknown,
            LocationData::FileLineCol { .. } => LocationKind::FileLineCol,
            LocationData::Name { .. } => LocationKind::Name,
            LocationData::CallSite { .. } => LocationKind::CallSite,
            LocationData::Fused { .. } => LocationKind::Fused,
        }
    }

    fn visit_owners(record: &LocationData, visit: &mut dyn FnMut(ContextId)) {
        match record {
            LocationData::Unknown => {}
            LocationData::FileLineCol { filename, .. } => {
                if let Some(owner) = filename.owner() {
                    visit(owner);
                }
            }
            LocationData::Name { name, child } => {
                if let Some(owner) = name.owner() {
                    visit(owner);
                }
                visit(child.owner());
            }
            LocationData::CallSite { callee, caller } => {
                visit(callee.owner());
                visit(caller.owner());
            }
            LocationData::Fused {
                locations,
                metadata,
            } => {
                locations.iter().for_each(|loc| visit(loc.owner()));
                if let Some(owner) = metadata.and_then(Ident::owner) {
                    visit(owner);
                }
            }
        }
    }
}

/// Handle to a canonical location.
pub type Location = Handle<LocationFamily>;

/// Precondition failures when building a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// A name location's child was itself a name location.
    NestedName,
    /// A fused location was requested with no locations.
    EmptyFused,
    /// A call stack was requested with no frames.
    EmptyCallStack,
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::NestedName => write!(
                f,
                "precondition violated: a name location cannot wrap another name location"
            ),
            LocationError::EmptyFused => write!(
                f,
                "precondition violated: a fused location needs at least one location"
            ),
            LocationError::EmptyCallStack => write!(
                f,
                "precondition violated: a call stack needs at least one frame"
            ),
        }
    }
}

impl std::error::Error for LocationError {}

define_variant! {
    /// The per-context unknown location.
    pub struct UnknownLoc: LocationFamily = LocationKind::Unknown;
}

define_variant! {
    /// A `"file":line:column` location. Line or column 0 means unknown.
    pub struct FileLineColLoc: LocationFamily = LocationKind::FileLineCol;
}

define_variant! {
    /// An identity name attached to a child location.
    pub struct NameLoc: LocationFamily = LocationKind::Name;
}

define_variant! {
    /// A call site: the concrete callee location and the caller's location.
    ///
    /// Callers may themselves be call sites, forming a call stack.
    pub struct CallSiteLoc: LocationFamily = LocationKind::CallSite;
}

define_variant! {
    /// Several locations fused into one. The first is primary in
    /// diagnostics; the rest are rendered as "fused from here" notes.
    pub struct FusedLoc: LocationFamily = LocationKind::Fused;
}

impl UnknownLoc {
    /// The unknown location of `ctx`.
    pub fn get(ctx: &Context) -> Self {
        UnknownLoc(ctx.intern::<LocationFamily>(LocationData::Unknown))
    }
}

impl FileLineColLoc {
    /// Uniqued `"filename":line:column` location.
    pub fn get(ctx: &Context, filename: &str, line: u32, column: u32) -> Self {
        Self::get_ident(ctx, ctx.ident(filename), line, column)
    }

    /// Uniqued location for an already interned filename.
    pub fn get_ident(ctx: &Context, filename: Ident, line: u32, column: u32) -> Self {
        FileLineColLoc(ctx.intern::<LocationFamily>(LocationData::FileLineCol {
            filename,
            line,
            column,
        }))
    }

    fn parts(self, ctx: &Context) -> (Ident, u32, u32) {
        ctx.with_record(self.0, |data| match data {
            LocationData::FileLineCol {
                filename,
                line,
                column,
            } => (*filename, *line, *column),
            other => unreachable!("FileLineColLoc points at {other:?}"),
        })
    }

    /// Interned filename.
    pub fn filename_ident(self, ctx: &Context) -> Ident {
        self.parts(ctx).0
    }

    /// Filename text.
    pub fn filename(self, ctx: &Context) -> Arc<str> {
        ctx.ident_str(self.filename_ident(ctx))
    }

    pub fn line(self, ctx: &Context) -> u32 {
        self.parts(ctx).1
    }

    pub fn column(self, ctx: &Context) -> u32 {
        self.parts(ctx).2
    }
}

impl NameLoc {
    /// Uniqued name location wrapping `child`.
    ///
    /// # Panics
    /// Panics if `child` is itself a name location.
    #[track_caller]
    pub fn get(ctx: &Context, name: &str, child: Location) -> Self {
        Self::try_get(ctx, name, child).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Uniqued name location wrapping `child`, rejecting name-of-name nesting.
    pub fn try_get(ctx: &Context, name: &str, child: Location) -> Result<Self, LocationError> {
        if child.isa::<NameLoc>() {
            return Err(LocationError::NestedName);
        }
        Ok(NameLoc(ctx.intern::<LocationFamily>(LocationData::Name {
            name: ctx.ident(name),
            child,
        })))
    }

    /// Uniqued name location with an unknown child.
    pub fn get_unknown(ctx: &Context, name: &str) -> Self {
        let child: Location = UnknownLoc::get(ctx).into();
        NameLoc(ctx.intern::<LocationFamily>(LocationData::Name {
            name: ctx.ident(name),
            child,
        }))
    }

    fn parts(self, ctx: &Context) -> (Ident, Location) {
        ctx.with_record(self.0, |data| match data {
            LocationData::Name { name, child } => (*name, *child),
            other => unreachable!("NameLoc points at {other:?}"),
        })
    }

    /// Interned name.
    pub fn name_ident(self, ctx: &Context) -> Ident {
        self.parts(ctx).0
    }

    /// Name text.
    pub fn name(self, ctx: &Context) -> Arc<str> {
        ctx.ident_str(self.name_ident(ctx))
    }

    /// The wrapped location.
    pub fn child(self, ctx: &Context) -> Location {
        self.parts(ctx).1
    }
}

impl CallSiteLoc {
    /// Uniqued call site of `callee` called from `caller`.
    pub fn get(ctx: &Context, callee: Location, caller: Location) -> Self {
        CallSiteLoc(ctx.intern::<LocationFamily>(LocationData::CallSite { callee, caller }))
    }

    /// Call site of `callee` within a stack of `frames`, innermost first.
    ///
    /// `[f1, f2, f3]` builds `callsite(callee at callsite(f1 at callsite(f2 at f3)))`.
    ///
    /// # Panics
    /// Panics if `frames` is empty.
    #[track_caller]
    pub fn get_chain(ctx: &Context, callee: Location, frames: &[Location]) -> Self {
        Self::try_get_chain(ctx, callee, frames).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible form of [`get_chain`](Self::get_chain).
    pub fn try_get_chain(
        ctx: &Context,
        callee: Location,
        frames: &[Location],
    ) -> Result<Self, LocationError> {
        let (&outermost, inner) = frames.split_last().ok_or(LocationError::EmptyCallStack)?;
        let caller = inner
            .iter()
            .rev()
            .fold(outermost, |caller, &frame| Self::get(ctx, frame, caller).into());
        Ok(Self::get(ctx, callee, caller))
    }

    fn parts(self, ctx: &Context) -> (Location, Location) {
        ctx.with_record(self.0, |data| match data {
            LocationData::CallSite { callee, caller } => (*callee, *caller),
            other => unreachable!("CallSiteLoc points at {other:?}"),
        })
    }

    /// The concrete location this call site presents.
    pub fn callee(self, ctx: &Context) -> Location {
        self.parts(ctx).0
    }

    /// The caller's location.
    pub fn caller(self, ctx: &Context) -> Location {
        self.parts(ctx).1
    }

    /// Frames of the call stack above the callee, innermost first.
    ///
    /// Inverse of [`get_chain`](Self::get_chain).
    pub fn frames(self, ctx: &Context) -> Vec<Location> {
        let mut frames = Vec::new();
        let mut caller = self.caller(ctx);
        while let Some(link) = caller.dyn_cast::<CallSiteLoc>() {
            frames.push(link.callee(ctx));
            caller = link.caller(ctx);
        }
        frames.push(caller);
        frames
    }
}

impl FusedLoc {
    /// Uniqued fused location over `locations`, verbatim and in order.
    ///
    /// # Panics
    /// Panics if `locations` is empty.
    #[track_caller]
    pub fn get(ctx: &Context, locations: &[Location]) -> Self {
        Self::try_get(ctx, locations, None).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Like [`get`](Self::get) with attached metadata.
    #[track_caller]
    pub fn get_with_metadata(ctx: &Context, locations: &[Location], metadata: &str) -> Self {
        Self::try_get(ctx, locations, Some(ctx.ident(metadata))).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible constructor; rejects an empty list.
    pub fn try_get(
        ctx: &Context,
        locations: &[Location],
        metadata: Option<Ident>,
    ) -> Result<Self, LocationError> {
        if locations.is_empty() {
            return Err(LocationError::EmptyFused);
        }
        Ok(FusedLoc(ctx.intern::<LocationFamily>(LocationData::Fused {
            locations: locations.into(),
            metadata,
        })))
    }

    /// Fuse `locations` into the simplest equivalent location.
    ///
    /// Unknown locations are dropped, duplicates keep their first position,
    /// and nested fused locations with the same metadata are flattened.
    /// Nothing left yields the unknown location; a single survivor without
    /// metadata is returned as is.
    ///
    /// # Panics
    /// Panics if any location or the metadata belongs to another context.
    #[track_caller]
    pub fn fuse(ctx: &Context, locations: &[Location], metadata: Option<Ident>) -> Location {
        let table = ctx.uniquer::<LocationFamily>();
        locations.iter().for_each(|&loc| table.check_owner(loc));
        if let Some(owner) = metadata.and_then(Ident::owner) {
            assert!(
                owner == ctx.id(),
                "precondition violated: fuse metadata was interned by {owner}, not {}",
                ctx.id()
            );
        }
        let mut seen = HandleSet::with_capacity(locations.len());
        let mut flat = Vec::with_capacity(locations.len());
        let mut push = |loc: Location| {
            if !loc.isa::<UnknownLoc>() && seen.insert(loc) {
                flat.push(loc);
            }
        };
        for &loc in locations {
            match loc.dyn_cast::<FusedLoc>() {
                Some(fused) if fused.metadata(ctx) == metadata => {
                    fused.locations(ctx).into_iter().for_each(&mut push);
                }
                _ => push(loc),
            }
        }

        if flat.is_empty() {
            return UnknownLoc::get(ctx).into();
        }
        if flat.len() == 1 && metadata.is_none() {
            return flat[0];
        }
        ctx.intern::<LocationFamily>(LocationData::Fused {
            locations: flat.into_boxed_slice(),
            metadata,
        })
    }

    /// The fused locations, in order.
    pub fn locations(self, ctx: &Context) -> Vec<Location> {
        ctx.with_record(self.0, |data| match data {
            LocationData::Fused { locations, .. } => locations.to_vec(),
            other => unreachable!("FusedLoc points at {other:?}"),
        })
    }

    /// Number of fused locations.
    pub fn len(self, ctx: &Context) -> usize {
        ctx.with_record(self.0, |data| match data {
            LocationData::Fused { locations, .. } => locations.len(),
            other => unreachable!("FusedLoc points at {other:?}"),
        })
    }

    /// The first fused location, which leads in diagnostics.
    pub fn primary(self, ctx: &Context) -> Location {
        ctx.with_record(self.0, |data| match data {
            LocationData::Fused { locations, .. } => locations[0],
            other => unreachable!("FusedLoc points at {other:?}"),
        })
    }

    /// Attached metadata, if any.
    pub fn metadata(self, ctx: &Context) -> Option<Ident> {
        ctx.with_record(self.0, |data| match data {
            LocationData::Fused { metadata, .. } => *metadata,
            other => unreachable!("FusedLoc points at {other:?}"),
        })
    }
}

impl Context {
    /// Visit `root` and every location reachable from it, pre-order, each
    /// distinct location once.
    pub fn walk_location(&self, root: Location, mut visit: impl FnMut(Location)) {
        let mut seen = HandleSet::new();
        let mut stack = vec![root];
        while let Some(loc) = stack.pop() {
            if !seen.insert(loc) {
                continue;
            }
            visit(loc);
            // Children are pushed in reverse so they are visited in order.
            match self.record(loc) {
                LocationData::Unknown | LocationData::FileLineCol { .. } => {}
                LocationData::Name { child, .. } => stack.push(child),
                LocationData::CallSite { callee, caller } => {
                    stack.push(caller);
                    stack.push(callee);
                }
                LocationData::Fused { locations, .. } => {
                    stack.extend(locations.iter().rev().copied());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
