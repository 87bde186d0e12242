use std::fmt;

/// Indicates that a priority designator could not be resolved to a priority value
///
/// Raised by [`get_priority`](crate::priority::get_priority) and friends. These are configuration-time errors, so they're never caught
/// inside the crate and are expected to fail whatever registration step triggered them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityError {
    /// An integer priority was outside the inclusive range 0..=100
    OutOfRange {
        /// the value received. Wide enough to hold any integer a JSON document can carry
        value: i128,
    },
    /// A priority name did not match any [`Priority`](crate::priority::Priority) level, even ignoring case
    UnknownName {
        /// the name received
        name: String,
    },
    /// The designator was neither an integer, a [`Priority`](crate::priority::Priority) level, nor a level name
    InvalidType {
        /// a short description of what was received instead, e.g. "float" or "null"
        found: &'static str,
    },
}

impl fmt::Display for PriorityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PriorityError::OutOfRange { value } => {
                write!(f, "priority must be between 0 and 100, got {}", value)
            }
            PriorityError::UnknownName { name } => {
                write!(f, "no priority level is named '{}'", name)
            }
            PriorityError::InvalidType { found } => write!(
                f,
                "priority must be an integer or Priority enum value, got {}",
                found
            ),
        }
    }
}

impl std::error::Error for PriorityError {}
