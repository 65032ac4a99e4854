//! Bidirectional codec between compact binary type descriptors and a
//! human-readable "common" form.
//!
//! Binary form: single-character primitive codes (`I`, `Z`, ...) and object
//! tokens `L<slash/separated/path>;`. A method descriptor is
//! `(<params>)<return>`. Common form uses dotted class names; a method is
//! `<Return>::<Param1>,<Param2>,...`.
//!
//! Binary descriptors are scanned character-by-character rather than with a
//! regex: object tokens have unbounded length terminated by `;`, primitive
//! tokens are always exactly one character, so a greedy single-pass scanner
//! is unambiguous for this grammar.
//!
//! When translating a descriptor between namespaces, a [`ClassRenames`]
//! table substitutes every embedded class name; unmatched classes pass
//! through unchanged. Going back to binary form assumes class names are
//! already in the target namespace's vocabulary.

use crate::error::{MappingError, Result};
use crate::store::{ClassRenames, EntryKind};

fn primitive_to_common(token: &str) -> Option<&'static str> {
    Some(match token {
        "V" => "void",
        "I" => "int",
        "F" => "float",
        "D" => "double",
        "J" => "long",
        "Z" => "boolean",
        "B" => "byte",
        "C" => "char",
        "S" => "short",
        _ => return None,
    })
}

fn primitive_to_tiny(token: &str) -> Option<&'static str> {
    Some(match token {
        "void" => "V",
        "int" => "I",
        "float" => "F",
        "double" => "D",
        "long" => "J",
        "boolean" => "Z",
        "byte" => "B",
        "char" => "C",
        "short" => "S",
        _ => return None,
    })
}

/// Convert a single binary type token to common form, substituting the
/// class name through `renames` when the token is an object type.
///
/// Array tokens (`[`) are explicitly unsupported and fail loudly; silently
/// treating them as object tokens would mis-resolve the join key.
pub fn type_to_common(token: &str, renames: Option<&dyn ClassRenames>) -> Result<String> {
    if let Some(primitive) = primitive_to_common(token) {
        return Ok(primitive.to_string());
    }
    if let Some(inner) = token.strip_prefix('L').and_then(|t| t.strip_suffix(';')) {
        if inner.is_empty() {
            return Err(MappingError::MalformedDescriptor(token.to_string()));
        }
        let dotted = inner.replace('/', ".");
        let renamed = renames
            .and_then(|r| r.rename(&dotted))
            .map(str::to_string)
            .unwrap_or(dotted);
        return Ok(renamed);
    }
    if token.starts_with('[') {
        return Err(MappingError::MalformedDescriptor(format!(
            "array types are not supported: {token}"
        )));
    }
    Err(MappingError::MalformedDescriptor(token.to_string()))
}

/// Convert a common-form type token back to binary form. Primitives map
/// through the fixed table; anything else is wrapped as an object token.
pub fn type_to_tiny(token: &str) -> String {
    if let Some(primitive) = primitive_to_tiny(token) {
        return primitive.to_string();
    }
    format!("L{};", token.replace('.', "/"))
}

fn method_to_common(descriptor: &str, renames: Option<&dyn ClassRenames>) -> Result<String> {
    let rest = descriptor.strip_prefix('(').ok_or_else(|| {
        MappingError::MalformedDescriptor(format!("expected '(<params>)<return>': {descriptor}"))
    })?;
    let close = rest.find(')').ok_or_else(|| {
        MappingError::MalformedDescriptor(format!("unterminated parameter list: {descriptor}"))
    })?;
    let (param_str, return_code) = (&rest[..close], &rest[close + 1..]);
    if return_code.is_empty() {
        return Err(MappingError::MalformedDescriptor(format!(
            "missing return type: {descriptor}"
        )));
    }

    let return_type = type_to_common(return_code, renames)?;

    let mut params = Vec::new();
    let mut remaining = param_str;
    while !remaining.is_empty() {
        if remaining.starts_with('L') {
            // Object token runs to the next ';' inclusive.
            let end = remaining.find(';').ok_or_else(|| {
                MappingError::MalformedDescriptor(format!(
                    "unterminated object token in {descriptor}"
                ))
            })?;
            params.push(type_to_common(&remaining[..=end], renames)?);
            remaining = &remaining[end + 1..];
        } else {
            let len = remaining.chars().next().map(char::len_utf8).unwrap_or(1);
            params.push(type_to_common(&remaining[..len], renames)?);
            remaining = &remaining[len..];
        }
    }

    Ok(format!("{}::{}", return_type, params.join(",")))
}

fn method_to_tiny(common: &str) -> String {
    let (return_type, params) = common.split_once("::").unwrap_or((common, ""));
    let mut out = String::from("(");
    if !params.is_empty() {
        for param in params.split(',') {
            out.push_str(&type_to_tiny(param));
        }
    }
    out.push(')');
    out.push_str(&type_to_tiny(return_type));
    out
}

/// Convert a binary field/method descriptor to common form.
pub fn descriptor_to_common(
    kind: EntryKind,
    descriptor: &str,
    renames: Option<&dyn ClassRenames>,
) -> Result<String> {
    match kind {
        EntryKind::Method => method_to_common(descriptor, renames),
        EntryKind::Field => type_to_common(descriptor, renames),
        EntryKind::Class => Err(MappingError::MalformedDescriptor(
            "class entries carry no descriptor".to_string(),
        )),
    }
}

/// Convert a common-form field/method descriptor back to binary form.
/// No rename substitution happens in this direction.
pub fn descriptor_to_tiny(kind: EntryKind, common: &str) -> Result<String> {
    match kind {
        EntryKind::Method => Ok(method_to_tiny(common)),
        EntryKind::Field => Ok(type_to_tiny(common)),
        EntryKind::Class => Err(MappingError::MalformedDescriptor(
            "class entries carry no descriptor".to_string(),
        )),
    }
}

/// Last dot-separated component of a fully qualified name.
pub fn simple_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Build a display string for a member: `int bar` for fields,
/// `void run(int, String)` for methods. Types are reduced to their simple
/// names; the member name is rendered as given.
pub fn format_member(kind: EntryKind, name: &str, common_descriptor: &str) -> String {
    match kind {
        EntryKind::Method => {
            let (return_type, params) = common_descriptor
                .split_once("::")
                .unwrap_or((common_descriptor, ""));
            let short_params: Vec<&str> = if params.is_empty() {
                Vec::new()
            } else {
                params.split(',').map(simple_name).collect()
            };
            format!(
                "{} {}({})",
                simple_name(return_type),
                name,
                short_params.join(", ")
            )
        }
        EntryKind::Field => format!("{} {}", simple_name(common_descriptor), name),
        // Classes display as their dotted name; nothing to combine.
        EntryKind::Class => name.to_string(),
    }
}
