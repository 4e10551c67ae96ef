//! SQL identifier validation and quoting.
//!
//! Group and role names arrive from the request path and end up
//! interpolated into DDL text, because the engine's role/user DDL does not
//! accept bound parameters for identifiers. Every identifier must pass
//! [`validate`] and go through [`quote`] before it reaches statement text.
//!
//! The accepted charset covers plain SQL identifiers plus the characters
//! that appear in domain-qualified directory group names
//! (`CORP\Data Readers`). The closing bracket is excluded, so a quoted
//! identifier can never terminate its own delimiter.

use crate::error::{EngineError, EngineResult};

/// Maximum identifier length accepted by the engine catalog.
pub const MAX_IDENTIFIER_LEN: usize = 128;

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '$' | '#' | '@' | ' ' | '\\')
}

/// Validate a caller-supplied identifier.
///
/// Accepts ASCII letters, digits, `_ - . $ # @`, spaces, and `\` for
/// domain-qualified names, up to [`MAX_IDENTIFIER_LEN`] characters.
/// Everything else (quotes, brackets, semicolons, control characters) is
/// rejected with [`EngineError::InvalidIdentifier`].
pub fn validate(name: &str) -> EngineResult<()> {
    if name.is_empty() {
        return Err(EngineError::InvalidIdentifier {
            name: name.to_string(),
            reason: "must not be empty",
        });
    }
    if name.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(EngineError::InvalidIdentifier {
            name: name.to_string(),
            reason: "longer than 128 characters",
        });
    }
    if name.trim() != name {
        return Err(EngineError::InvalidIdentifier {
            name: name.to_string(),
            reason: "must not start or end with whitespace",
        });
    }
    if !name.chars().all(is_identifier_char) {
        return Err(EngineError::InvalidIdentifier {
            name: name.to_string(),
            reason: "contains a character outside the safe identifier set",
        });
    }
    Ok(())
}

/// Validate and bracket-quote an identifier for interpolation into DDL.
///
/// The validated charset excludes `]`, so no escaping inside the
/// delimiters is required.
pub fn quote(name: &str) -> EngineResult<String> {
    validate(name)?;
    Ok(format!("[{name}]"))
}
