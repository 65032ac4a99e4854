//! Parser for the tree-structured mapping format (tiny v2-style).
//!
//! The artifact is tab-delimited. The first line is a `<tag>\t<version>`
//! header; only version 2 is handled and the legacy `v1` tag is rejected
//! up front. Each subsequent row's nesting depth is the index of its first
//! non-empty field; an explicit stack of enclosing (intermediate, named)
//! name pairs tracks scope, truncated when depth decreases. Rows whose tag
//! we do not know are skipped for forward compatibility.

use tracing::debug;

use crate::error::{MappingError, Result};
use crate::store::{EntryKind, MemberKey, MemberMappings};

/// Row-by-row parser state: the depth stack plus the names of the most
/// recently declared entity (pushed as a frame when depth grows).
#[derive(Debug, Default)]
struct TreeParser {
    /// (intermediate, named) pairs for the enclosing scope, slash form.
    stack: Vec<(String, String)>,
    current_intermediate: String,
    current_named: String,
    mappings: MemberMappings,
}

impl TreeParser {
    fn parse_row(&mut self, line_no: usize, line: &str) -> Result<()> {
        let fields: Vec<&str> = line.split('\t').collect();
        let Some(depth) = fields.iter().position(|f| !f.is_empty()) else {
            return Ok(());
        };

        if self.stack.len() > depth {
            self.stack.truncate(depth);
        } else if self.stack.len() < depth {
            self.stack.push((
                self.current_intermediate.clone(),
                self.current_named.clone(),
            ));
        }

        let tag = fields[depth];
        let rest = &fields[depth + 1..];
        match tag {
            "c" if depth == 0 => {
                let [intermediate, named, ..] = rest else {
                    return Err(malformed(line_no, "class row needs 2 name fields"));
                };
                self.mappings
                    .insert_class(dotted(intermediate), dotted(named));
                self.current_intermediate = intermediate.to_string();
                self.current_named = named.to_string();
            }
            "m" | "f" => {
                let [descriptor, intermediate, named, ..] = rest else {
                    return Err(malformed(line_no, "member row needs descriptor + 2 names"));
                };
                let kind = if tag == "m" {
                    EntryKind::Method
                } else {
                    EntryKind::Field
                };
                let path_intermediate = self.qualified(intermediate, |frame| &frame.0);
                let path_named = self.qualified(named, |frame| &frame.1);
                self.mappings.insert_member(
                    kind,
                    MemberKey::new(*descriptor, path_intermediate),
                    path_named,
                );
                self.current_intermediate = intermediate.to_string();
                self.current_named = named.to_string();
            }
            // Unknown tags (parameters, comments, ...) are skipped.
            _ => {}
        }
        Ok(())
    }

    /// Join the enclosing stack names with the member's own name, dotted.
    fn qualified(
        &self,
        name: &str,
        side: impl Fn(&(String, String)) -> &String,
    ) -> String {
        let mut parts: Vec<&str> = self.stack.iter().map(|f| side(f).as_str()).collect();
        parts.push(name);
        dotted(&parts.join("."))
    }
}

fn dotted(path: &str) -> String {
    path.replace('/', ".")
}

fn malformed(line: usize, message: &str) -> MappingError {
    MappingError::MalformedLine {
        line,
        message: message.to_string(),
    }
}

/// Parse a whole tree-format artifact, header first.
pub fn parse(text: &str) -> Result<MemberMappings> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| MappingError::UnsupportedFormat("empty mapping artifact".to_string()))?;
    let mut header_fields = header.split('\t');
    let tag = header_fields.next().unwrap_or("");
    let version = header_fields.next().unwrap_or("");

    if tag == "v1" {
        return Err(MappingError::UnsupportedFormat(
            "tiny v1 mappings are not supported".to_string(),
        ));
    }
    if version != "2" {
        return Err(MappingError::UnsupportedFormat(format!(
            "unrecognized header: {header:?}"
        )));
    }

    let mut parser = TreeParser::default();
    for (idx, line) in lines.enumerate() {
        // Header was line 1.
        parser.parse_row(idx + 2, line)?;
    }

    debug!(
        classes = parser.mappings.classes.len(),
        fields = parser.mappings.fields.len(),
        methods = parser.mappings.methods.len(),
        "parsed tree mappings"
    );
    Ok(parser.mappings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
tiny\t2\t0\tofficial\tintermediary
c\ta\tcom/example/Foo
\tf\tI\tb\tbar
\tm\t(ILd;)V\tc\trun
c\td\tcom/example/Baz
\tf\tLa;\te\towner
";

    #[test]
    fn parses_classes_and_members() {
        let m = parse(SAMPLE).unwrap();

        assert_eq!(m.classes.get("a").map(String::as_str), Some("com.example.Foo"));
        assert_eq!(m.classes.get("d").map(String::as_str), Some("com.example.Baz"));
        assert_eq!(
            m.get_member(EntryKind::Field, "I", "a.b"),
            Some("com.example.Foo.bar")
        );
        assert_eq!(
            m.get_member(EntryKind::Method, "(ILd;)V", "a.c"),
            Some("com.example.Foo.run")
        );
        assert_eq!(
            m.get_member(EntryKind::Field, "La;", "d.e"),
            Some("com.example.Baz.owner")
        );
    }

    #[test]
    fn rejects_tiny_v1_header() {
        let err = parse("v1\t2\nwhatever\n").unwrap_err();
        assert!(matches!(err, MappingError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_unknown_version() {
        let err = parse("tiny\t3\n").unwrap_err();
        assert!(matches!(err, MappingError::UnsupportedFormat(_)));
        assert!(parse("").is_err());
    }

    #[test]
    fn depth_stack_truncates_on_class_exit() {
        let text = "tiny\t2\nc\ta\tFoo\n\tf\tI\tb\tbar\nc\tc\tBaz\n\tf\tI\td\tqux\n";
        let m = parse(text).unwrap();
        assert_eq!(m.get_member(EntryKind::Field, "I", "a.b"), Some("Foo.bar"));
        assert_eq!(m.get_member(EntryKind::Field, "I", "c.d"), Some("Baz.qux"));
    }

    #[test]
    fn unknown_tags_are_skipped() {
        let text = "tiny\t2\nc\ta\tFoo\n\tm\t(I)V\tb\trun\n\t\tp\t0\tamount\nc\tc\tBaz\n";
        let m = parse(text).unwrap();
        assert_eq!(m.methods.len(), 1);
        assert_eq!(m.classes.len(), 2);
    }

    #[test]
    fn truncated_member_row_is_fatal() {
        let err = parse("tiny\t2\nc\ta\tFoo\n\tf\tI\tb\n").unwrap_err();
        assert!(matches!(err, MappingError::MalformedLine { line: 3, .. }));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let m = parse("tiny\t2\n\n\t\t\nc\ta\tFoo\n").unwrap();
        assert_eq!(m.classes.len(), 1);
    }

    #[test]
    fn overloaded_members_keep_distinct_keys() {
        let text = "tiny\t2\nc\ta\tFoo\n\tm\t(I)V\tb\trunInt\n\tm\t(J)V\tb\trunLong\n";
        let m = parse(text).unwrap();
        assert_eq!(
            m.get_member(EntryKind::Method, "(I)V", "a.b"),
            Some("Foo.runInt")
        );
        assert_eq!(
            m.get_member(EntryKind::Method, "(J)V", "a.b"),
            Some("Foo.runLong")
        );
    }
}
