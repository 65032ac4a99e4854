//! Parser for the hierarchical vendor mapping format (proguard-style).
//!
//! Grammar, line by line:
//! - class lines have no leading whitespace and end with `:`,
//!   `<VendorName> -> <ObfuscatedName>:`; they set the class context for
//!   the indented member lines that follow;
//! - member lines are indented. With a `(`/`)` pair they are method lines,
//!   `<Return> <Name>(<Params>) -> <Obfuscated>`, otherwise field lines,
//!   `<Type> <Name> -> <Obfuscated>`. Either may carry an ignored
//!   `line:line:` range prefix.
//!
//! Parsing is tolerant: blank lines, `#` comments and member lines that do
//! not tokenize are skipped rather than failing the load. Scanning is done
//! with explicit tokenizers, not regexes.

use tracing::{debug, warn};

use crate::store::{EntryKind, NameMappings};

#[derive(Debug, Clone)]
struct ClassContext {
    obfuscated: String,
    vendor: String,
}

/// Line-by-line parser state: the enclosing class context threads across
/// member lines, everything else is per-line.
#[derive(Debug, Default)]
pub struct ProguardParser {
    current: Option<ClassContext>,
    mappings: NameMappings,
    skipped: usize,
}

impl ProguardParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one line of input.
    pub fn parse_line(&mut self, line: &str) {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let indented = line.starts_with(char::is_whitespace);
        if !indented && line.ends_with(':') {
            if let Some((vendor, obfuscated)) = parse_class_line(line) {
                self.mappings
                    .insert(EntryKind::Class, obfuscated, vendor);
                self.current = Some(ClassContext {
                    obfuscated: obfuscated.to_string(),
                    vendor: vendor.to_string(),
                });
            }
            return;
        }
        if !indented {
            return;
        }

        let body = strip_line_range(line.trim_start());
        if body.starts_with('#') {
            return;
        }

        let Some(ctx) = &self.current else {
            self.skipped += 1;
            warn!("member line outside any class context: {line:?}");
            return;
        };

        if body.contains('(') && body.contains(')') {
            if let Some(method) = parse_method_line(body) {
                self.mappings.insert(
                    EntryKind::Method,
                    format!("{}.{}", ctx.obfuscated, method.obfuscated),
                    format!("{}.{}({})", ctx.vendor, method.vendor, method.params),
                );
                return;
            }
        } else if let Some(field) = parse_field_line(body) {
            self.mappings.insert(
                EntryKind::Field,
                format!("{}.{}", ctx.obfuscated, field.obfuscated),
                format!("{}.{}", ctx.vendor, field.vendor),
            );
            return;
        }

        self.skipped += 1;
        warn!("skipping unmatched member line: {line:?}");
    }

    pub fn finish(self) -> NameMappings {
        debug!(
            classes = self.mappings.classes.len(),
            fields = self.mappings.fields.len(),
            methods = self.mappings.methods.len(),
            skipped = self.skipped,
            "parsed hierarchical mappings"
        );
        self.mappings
    }
}

/// Parse a whole hierarchical artifact. Never fails: individual malformed
/// member lines are skipped, not fatal.
pub fn parse(text: &str) -> NameMappings {
    let mut parser = ProguardParser::new();
    for line in text.lines() {
        parser.parse_line(line);
    }
    parser.finish()
}

/// `<VendorName> -> <ObfuscatedName>:`
fn parse_class_line(line: &str) -> Option<(&str, &str)> {
    let line = line.strip_suffix(':')?;
    let (vendor, obfuscated) = line.split_once("->")?;
    let vendor = vendor.trim();
    let obfuscated = obfuscated.trim();
    if vendor.is_empty()
        || obfuscated.is_empty()
        || vendor.contains(char::is_whitespace)
        || obfuscated.contains(char::is_whitespace)
    {
        return None;
    }
    Some((vendor, obfuscated))
}

/// Strip an optional `12:34:` prefix; returns the input unchanged when the
/// prefix is absent or incomplete.
fn strip_line_range(body: &str) -> &str {
    let mut rest = body;
    for _ in 0..2 {
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 {
            return body;
        }
        match rest[digits..].strip_prefix(':') {
            Some(after) => rest = after,
            None => return body,
        }
    }
    rest
}

fn is_type_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '[' | ']' | '.' | '<' | '>'))
}

struct MethodLine<'a> {
    vendor: &'a str,
    params: &'a str,
    obfuscated: &'a str,
}

/// `<Return> <VendorName>(<Params>) -> <Obfuscated>`
fn parse_method_line(body: &str) -> Option<MethodLine<'_>> {
    let (decl, obfuscated) = body.split_once("->")?;
    let obfuscated = obfuscated.trim();
    if obfuscated.is_empty() || obfuscated.contains(char::is_whitespace) {
        return None;
    }

    let (return_type, signature) = decl.trim().split_once(char::is_whitespace)?;
    if !is_type_token(return_type) {
        return None;
    }

    let signature = signature.trim();
    let open = signature.find('(')?;
    if !signature.ends_with(')') || open == 0 {
        return None;
    }
    let vendor = &signature[..open];
    let params = &signature[open + 1..signature.len() - 1];
    if vendor.contains(char::is_whitespace) || params.contains(')') {
        return None;
    }

    Some(MethodLine {
        vendor,
        params,
        obfuscated,
    })
}

struct FieldLine<'a> {
    vendor: &'a str,
    obfuscated: &'a str,
}

/// `<Type> <VendorName> -> <Obfuscated>`
fn parse_field_line(body: &str) -> Option<FieldLine<'_>> {
    let (decl, obfuscated) = body.split_once("->")?;
    let obfuscated = obfuscated.trim();
    if obfuscated.is_empty() || obfuscated.contains(char::is_whitespace) {
        return None;
    }

    let mut decl_tokens = decl.split_whitespace();
    let field_type = decl_tokens.next()?;
    let vendor = decl_tokens.next()?;
    if decl_tokens.next().is_some() || !is_type_token(field_type) {
        return None;
    }
    // A truncated method signature must not sneak through as a field.
    if vendor.contains('(') || vendor.contains(')') {
        return None;
    }

    Some(FieldLine { vendor, obfuscated })
}
