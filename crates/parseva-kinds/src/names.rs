//! Canonical token names for structural labels.
//!
//! Parser generators name the node type of rule `fieldDeclaration` something
//! like `FieldDeclarationContext`. The canonical token name of that rule is the
//! label without its `Context` suffix, in `UPPER_SNAKE_CASE`:
//! `FIELD_DECLARATION`.

use crate::Error;

/// Suffix every structural label carries.
pub const CONTEXT_SUFFIX: &str = "Context";

/// Removes [`CONTEXT_SUFFIX`] from `label`.
pub fn strip_context_suffix(label: &str) -> Result<&str, Error> {
    label.strip_suffix(CONTEXT_SUFFIX).ok_or_else(|| Error::MalformedLabel { label: label.into() })
}

/// Converts `CamelCase` to `UPPER_SNAKE_CASE`.
///
/// An underscore goes before every uppercase character except the first one.
/// Digits and existing underscores are copied as they are.
pub fn camel_to_upper_snake(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 4);
    for (index, ch) in text.chars().enumerate() {
        if index != 0 && ch.is_uppercase() {
            result.push('_');
        }
        result.extend(ch.to_uppercase());
    }
    result
}

/// The canonical token name for a structural label.
pub fn canonical_name(label: &str) -> Result<String, Error> {
    strip_context_suffix(label).map(camel_to_upper_snake)
}
