//! In-memory mapping tables, one per namespace.
//!
//! Two variants exist because the two input formats key their members
//! differently: the tree format carries a binary descriptor per member and
//! can therefore disambiguate overloads, while the hierarchical format keys
//! members by qualified name alone. Both are populated exactly once by a
//! parser and are read-only afterwards.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of a mapped program entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Class,
    Field,
    Method,
}

/// Composite join key for fields and methods.
///
/// Two members of different signature can share a name (overloading), so a
/// name alone is not a valid join key; the binary descriptor disambiguates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberKey {
    /// Binary (compact) descriptor, e.g. `(IZ)V` or `I`.
    pub descriptor: String,
    /// Fully qualified dotted member path, e.g. `a.b`.
    pub name: String,
}

impl MemberKey {
    pub fn new(descriptor: impl Into<String>, name: impl Into<String>) -> Self {
        MemberKey {
            descriptor: descriptor.into(),
            name: name.into(),
        }
    }
}

/// Class-rename lookup used by the descriptor codec when translating a
/// descriptor between namespaces. Absent entries mean identity.
pub trait ClassRenames {
    fn rename(&self, class: &str) -> Option<&str>;
}

impl ClassRenames for HashMap<String, String> {
    fn rename(&self, class: &str) -> Option<&str> {
        self.get(class).map(String::as_str)
    }
}

impl ClassRenames for IndexMap<String, String> {
    fn rename(&self, class: &str) -> Option<&str> {
        self.get(class).map(String::as_str)
    }
}

/// Descriptor-aware mapping table (tree-format input).
///
/// Iteration order of every table is insertion order, which the merge engine
/// relies on for stable output ordering.
#[derive(Debug, Clone, Default)]
pub struct MemberMappings {
    pub classes: IndexMap<String, String>,
    pub fields: IndexMap<MemberKey, String>,
    pub methods: IndexMap<MemberKey, String>,
}

impl MemberMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_class(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.classes.insert(from.into(), to.into());
    }

    /// Insert a field or method under its composite key. `kind` must not be
    /// `Class`; class entries carry no descriptor.
    pub fn insert_member(&mut self, kind: EntryKind, key: MemberKey, to: impl Into<String>) {
        match kind {
            EntryKind::Field => {
                self.fields.insert(key, to.into());
            }
            EntryKind::Method => {
                self.methods.insert(key, to.into());
            }
            EntryKind::Class => {
                debug_assert!(false, "class entries are keyed by name, not MemberKey");
            }
        }
    }

    /// Look up a member by descriptor + qualified name. Absent keys are an
    /// expected outcome (unresolved namespace), not an error.
    pub fn get_member(&self, kind: EntryKind, descriptor: &str, name: &str) -> Option<&str> {
        let key = MemberKey::new(descriptor, name);
        let table = match kind {
            EntryKind::Field => &self.fields,
            EntryKind::Method => &self.methods,
            EntryKind::Class => return None,
        };
        table.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.fields.is_empty() && self.methods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.fields.len() + self.methods.len()
    }
}

/// Name-keyed mapping table (hierarchical-format input).
///
/// The hierarchical format does not carry binary descriptors, so members are
/// keyed by their qualified name alone; an overload collision here resolves
/// last-write-wins, which well-formed input never triggers.
#[derive(Debug, Clone, Default)]
pub struct NameMappings {
    pub classes: HashMap<String, String>,
    pub fields: HashMap<String, String>,
    pub methods: HashMap<String, String>,
}

impl NameMappings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: EntryKind, from: impl Into<String>, to: impl Into<String>) {
        let table = match kind {
            EntryKind::Class => &mut self.classes,
            EntryKind::Field => &mut self.fields,
            EntryKind::Method => &mut self.methods,
        };
        table.insert(from.into(), to.into());
    }

    pub fn get(&self, kind: EntryKind, name: &str) -> Option<&str> {
        let table = match kind {
            EntryKind::Class => &self.classes,
            EntryKind::Field => &self.fields,
            EntryKind::Method => &self.methods,
        };
        table.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.fields.is_empty() && self.methods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.fields.len() + self.methods.len()
    }
}
