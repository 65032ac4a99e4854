//! Mapping artifact parsers.
//!
//! Two line-based formats are supported, one per mapping artifact family:
//! the hierarchical vendor format ([`proguard`]) and the tree-structured
//! tiny v2-style format ([`tiny`]). The formats are self-describing: only
//! the tree format opens with a tab-separated header line, so a cheap sniff
//! of the first line is enough to dispatch.

use crate::error::Result;
use crate::store::{MemberMappings, NameMappings};

pub mod proguard;
pub mod tiny;

/// Mapping artifact format, as sniffed from the first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingFormat {
    /// `class -> obfuscated:` hierarchy with indented members, no header.
    Hierarchical,
    /// Tab-delimited rows behind a `<tag>\t<version>` header.
    Tree,
}

/// Result of [`parse`]: one populated store, variant per input format.
#[derive(Debug, Clone)]
pub enum ParsedMappings {
    Hierarchical(NameMappings),
    Tree(MemberMappings),
}

/// Sniff the artifact format from its first line.
pub fn detect_format(text: &str) -> MappingFormat {
    match text.lines().next() {
        Some(first) if first.contains('\t') => MappingFormat::Tree,
        _ => MappingFormat::Hierarchical,
    }
}

/// Parse an artifact of either format, dispatching on the sniffed header.
pub fn parse(text: &str) -> Result<ParsedMappings> {
    match detect_format(text) {
        MappingFormat::Hierarchical => Ok(ParsedMappings::Hierarchical(proguard::parse(text))),
        MappingFormat::Tree => Ok(ParsedMappings::Tree(tiny::parse(text)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_tree_format_by_header() {
        assert_eq!(detect_format("tiny\t2\n"), MappingFormat::Tree);
        assert_eq!(
            detect_format("com.example.Foo -> a:\n"),
            MappingFormat::Hierarchical
        );
        assert_eq!(detect_format(""), MappingFormat::Hierarchical);
    }

    #[test]
    fn dispatch_parses_either_format() {
        match parse("tiny\t2\nc\ta\tFoo\n").unwrap() {
            ParsedMappings::Tree(m) => assert_eq!(m.classes.len(), 1),
            other => panic!("expected tree mappings, got {other:?}"),
        }
        match parse("com.example.Foo -> a:\n").unwrap() {
            ParsedMappings::Hierarchical(m) => assert_eq!(m.classes.len(), 1),
            other => panic!("expected hierarchical mappings, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_propagates_header_errors() {
        assert!(parse("v1\t2\n").is_err());
    }
}
