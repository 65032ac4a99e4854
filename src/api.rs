//! One-call load pipeline: three raw mapping artifacts in, merged records
//! out.
//!
//! The three parses are independent and run as parallel rayon tasks; the
//! merge is the single join point and only starts once all three stores are
//! fully populated. Any parse failure aborts the whole load with no partial
//! output — the caller's previous successful result, if any, stays
//! authoritative.

use tracing::debug;

use crate::error::Result;
use crate::merge::{merge, MappingSet, MergedRecord};
use crate::parse::{proguard, tiny};

/// Raw per-namespace artifact text, as handed over by whatever fetched it.
#[derive(Debug, Clone, Copy)]
pub struct LoadInput<'a> {
    /// Tree-format artifact mapping obfuscated -> intermediate names.
    pub intermediate: &'a str,
    /// Tree-format artifact mapping intermediate -> human names.
    pub human: &'a str,
    /// Hierarchical artifact mapping vendor -> obfuscated names.
    pub vendor: &'a str,
}

/// Parse all three namespaces in parallel and merge them.
pub fn load(input: LoadInput<'_>) -> Result<Vec<MergedRecord>> {
    let ((intermediate, human), vendor) = rayon::join(
        || {
            rayon::join(
                || tiny::parse(input.intermediate),
                || tiny::parse(input.human),
            )
        },
        || proguard::parse(input.vendor),
    );

    let set = MappingSet {
        intermediate: intermediate?,
        human: human?,
        vendor,
    };
    debug!(entries = set.intermediate.len(), "namespaces parsed");
    merge(&set)
}

/// Same pipeline without the thread pool, for callers that want the parses
/// on the current thread.
pub fn load_sequential(input: LoadInput<'_>) -> Result<Vec<MergedRecord>> {
    let set = MappingSet {
        intermediate: tiny::parse(input.intermediate)?,
        human: tiny::parse(input.human)?,
        vendor: proguard::parse(input.vendor),
    };
    merge(&set)
}
