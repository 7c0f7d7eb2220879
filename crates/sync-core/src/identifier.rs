//! Table and column name validation.
//!
//! Identifiers are interpolated into statements, values never are. A name
//! is accepted when it starts with an ASCII letter or underscore and
//! continues with ASCII letters, digits or underscores.

/// A table or column name that cannot be used as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid identifier '{name}': names must start with a letter or underscore and contain only letters, digits and underscores")]
pub struct IdentifierError {
    pub name: String,
}

/// Return `name` unchanged if it is a valid identifier.
pub fn sanitize_identifier(name: &str) -> Result<&str, IdentifierError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(name)
    } else {
        Err(IdentifierError {
            name: name.to_string(),
        })
    }
}
