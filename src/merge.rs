//! Three-way merge of the intermediate, human and vendor namespaces.
//!
//! All entries in the intermediate store are keyed by the obfuscated
//! identifier, which is the shared join axis: human mappings are keyed
//! relative to intermediate names, vendor mappings relative to obfuscated
//! names. Because member descriptors embed class names, the descriptor must
//! be re-encoded for each namespace before its lookup key is valid — the
//! human lookup needs the descriptor in intermediate binary form, while the
//! vendor side works from the original obfuscated descriptor. Using the
//! wrong form does not fail; it silently yields an empty join, which is why
//! the recomputation below is unconditional.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::{descriptor_to_common, descriptor_to_tiny, format_member, simple_name};
use crate::error::Result;
use crate::store::{EntryKind, MemberKey, MemberMappings, NameMappings};

/// The three populated per-namespace stores a merge consumes.
#[derive(Debug, Clone, Default)]
pub struct MappingSet {
    /// Obfuscated -> intermediate, descriptor-keyed. Source of truth for
    /// which entities exist; drives output order.
    pub intermediate: MemberMappings,
    /// Intermediate -> human, descriptor-keyed.
    pub human: MemberMappings,
    /// Obfuscated -> vendor, name-keyed.
    pub vendor: NameMappings,
}

/// One resolved entity across all four naming schemes. The human/vendor
/// sides are optional: an absent cross-reference is an expected outcome,
/// not an error. Display strings are populated for fields and methods only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub kind: EntryKind,
    pub obfuscated_name: String,
    pub intermediate_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfuscated_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intermediate_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_display: Option<String>,
}

/// Merge the three namespaces into one record per intermediate-store entry.
///
/// Output order is stable: classes, then methods, then fields, each in the
/// order they appeared in the intermediate artifact. A malformed descriptor
/// anywhere aborts the whole merge; no partial output is produced.
pub fn merge(set: &MappingSet) -> Result<Vec<MergedRecord>> {
    let mut records = Vec::with_capacity(set.intermediate.len());

    for (obfuscated, intermediate) in &set.intermediate.classes {
        records.push(merge_class(set, obfuscated, intermediate));
    }
    for (key, intermediate) in &set.intermediate.methods {
        records.push(merge_member(set, EntryKind::Method, key, intermediate)?);
    }
    for (key, intermediate) in &set.intermediate.fields {
        records.push(merge_member(set, EntryKind::Field, key, intermediate)?);
    }

    debug!(records = records.len(), "merged namespaces");
    Ok(records)
}

fn merge_class(set: &MappingSet, obfuscated: &str, intermediate: &str) -> MergedRecord {
    let human_name = set
        .human
        .classes
        .get(intermediate)
        .map(String::to_string);
    let vendor_name = set
        .vendor
        .get(EntryKind::Class, obfuscated)
        .map(str::to_string);

    MergedRecord {
        kind: EntryKind::Class,
        obfuscated_name: obfuscated.to_string(),
        intermediate_name: intermediate.to_string(),
        vendor_short_name: vendor_name.as_deref().map(|n| simple_name(n).to_string()),
        human_short_name: human_name.as_deref().map(|n| simple_name(n).to_string()),
        vendor_name,
        human_name,
        obfuscated_display: None,
        intermediate_display: None,
        vendor_display: None,
        human_display: None,
    }
}

fn merge_member(
    set: &MappingSet,
    kind: EntryKind,
    key: &MemberKey,
    intermediate: &str,
) -> Result<MergedRecord> {
    // Four descriptor forms, one per join/display context. The human join
    // key must use the intermediate binary descriptor; the vendor side is
    // derived from the original obfuscated one.
    let obfuscated_common = descriptor_to_common(kind, &key.descriptor, None)?;
    let intermediate_common =
        descriptor_to_common(kind, &key.descriptor, Some(&set.intermediate.classes))?;
    let intermediate_tiny = descriptor_to_tiny(kind, &intermediate_common)?;
    let human_common = descriptor_to_common(kind, &intermediate_tiny, Some(&set.human.classes))?;
    let vendor_common = descriptor_to_common(kind, &key.descriptor, Some(&set.vendor.classes))?;

    let human_name = set
        .human
        .get_member(kind, &intermediate_tiny, intermediate)
        .map(str::to_string);
    let vendor_name = set.vendor.get(kind, &key.name).map(str::to_string);

    let display =
        |name: &str, common: &str| format_member(kind, display_name(name), common);

    Ok(MergedRecord {
        kind,
        obfuscated_name: key.name.clone(),
        intermediate_name: intermediate.to_string(),
        vendor_short_name: vendor_name.as_deref().map(short_member_name),
        human_short_name: human_name.as_deref().map(short_member_name),
        obfuscated_display: Some(display(&key.name, &obfuscated_common)),
        intermediate_display: Some(display(intermediate, &intermediate_common)),
        vendor_display: vendor_name.as_deref().map(|n| display(n, &vendor_common)),
        human_display: human_name.as_deref().map(|n| display(n, &human_common)),
        vendor_name,
        human_name,
    })
}

/// Drop a parenthesized parameter list, if any.
fn strip_parenthesized(path: &str) -> &str {
    match path.find('(') {
        Some(open) => &path[..open],
        None => path,
    }
}

/// Member name as rendered inside a display string: own name only.
fn display_name(path: &str) -> &str {
    simple_name(strip_parenthesized(path))
}

/// Trailing `Outer.member` context of a qualified member path, parameter
/// list stripped.
fn short_member_name(path: &str) -> String {
    let base = strip_parenthesized(path);
    let components: Vec<&str> = base.split('.').collect();
    components[components.len().saturating_sub(2)..].join(".")
}
