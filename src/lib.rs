//! mapmerge resolves symbol names across three naming schemes used for the
//! same obfuscated program — a stable intermediate namespace, a
//! human-curated namespace and a vendor-released namespace — producing a
//! unified lookup table keyed by the original obfuscated identifiers.
//!
//! Pipeline: raw artifact text goes through a format parser ([`mod@parse`])
//! into a per-namespace [`store`], and the [`mod@merge`] engine joins the
//! three stores into one ordered record list, re-encoding member descriptors
//! through the [`descriptor`] codec at every join step (descriptors embed
//! class names, which change per namespace). I/O, artifact retrieval and
//! presentation are the caller's business; this crate is a pure in-process
//! transform.

/// One-call load pipeline
pub mod api;
/// Descriptor codec (binary <-> common form)
pub mod descriptor;
/// Error types
pub mod error;
/// Tracing setup helpers
pub mod logging;
/// Three-way namespace merge
pub mod merge;
/// Mapping artifact parsers
pub mod parse;
/// Per-namespace mapping tables
pub mod store;

pub use api::{load, load_sequential, LoadInput};
pub use error::{MappingError, Result};
pub use merge::{merge, MappingSet, MergedRecord};
pub use parse::{detect_format, parse, MappingFormat, ParsedMappings};
pub use store::{EntryKind, MemberKey, MemberMappings, NameMappings};
