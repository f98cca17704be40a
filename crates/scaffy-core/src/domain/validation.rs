//! String checks shared by the CLI and configuration layers.
//!
//! All validation logic lives here, not scattered across callers.

use thiserror::Error;

/// Upper bound, in characters, for project names, authors, language keys and
/// file extensions.
pub const MAX_NAME_LENGTH: usize = 255;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("project name cannot be empty")]
    Empty,

    #[error("project name exceeds maximum length: max length is {max} characters")]
    TooLong { max: usize },

    #[error("project name '{raw}' contains no usable characters")]
    NothingLeft { raw: String },
}

/// `true` when `s` is empty or only whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// `true` when `s` is longer than [`MAX_NAME_LENGTH`] characters.
pub fn exceeds_max_length(s: &str) -> bool {
    s.chars().count() > MAX_NAME_LENGTH
}

/// Normalise free text into a file-system friendly identifier.
///
/// | Input                          | Output                         |
/// |--------------------------------|--------------------------------|
/// | `"Inverse Binary Search Tree"` | `"inverse_binary_search_tree"` |
/// | `"  __Two--Sum__ "`            | `"two_sum"`                    |
/// | `"!!!"`                        | `""`                           |
pub fn normalize_name(s: &str) -> String {
    let replaced: String = s
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    let mut out = String::with_capacity(replaced.len());
    for c in replaced.trim_matches('_').chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Check a raw project name and return its normalised form.
pub fn validate_project_name(raw: &str) -> Result<String, NameError> {
    if is_blank(raw) {
        return Err(NameError::Empty);
    }
    if exceeds_max_length(raw) {
        return Err(NameError::TooLong {
            max: MAX_NAME_LENGTH,
        });
    }

    let normalized = normalize_name(raw);
    if normalized.is_empty() {
        return Err(NameError::NothingLeft { raw: raw.into() });
    }
    Ok(normalized)
}
