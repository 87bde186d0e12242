//! Priorities decide the order in which an executor dispatches lifecycle events to its hooks.
//!
//! A priority is an integer in `0..=100`, where a lower value means the hook runs earlier. The seven [`Priority`] levels name the
//! commonly used values, and [`get_priority`] accepts either form (or a level's name) and returns the canonical integer.

use log::trace;
use serde_json::Value;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

pub(crate) mod priority_error;
pub use priority_error::PriorityError;

/// The lowest value a priority can take, i.e. the value of [`Priority::Highest`]
pub const MIN_PRIORITY: i64 = 0;
/// The highest value a priority can take, i.e. the value of [`Priority::Lowest`]
pub const MAX_PRIORITY: i64 = 100;

/// Hook priority levels.
///
/// | Level      | Value |
/// |------------|-------|
/// | HIGHEST    | 0     |
/// | VERY_HIGH  | 10    |
/// | HIGH       | 30    |
/// | NORMAL     | 50    |
/// | LOW        | 70    |
/// | VERY_LOW   | 90    |
/// | LOWEST     | 100   |
///
/// Levels are ordered by value, so `Priority::Highest < Priority::Lowest`.
/// Parsing is case-insensitive against the upper-case names in the table above:
/// ```
/// use trainhook::priority::Priority;
///
/// assert_eq!("very_high".parse::<Priority>(), Ok(Priority::VeryHigh));
/// assert_eq!(Priority::VeryHigh.to_string(), "VERY_HIGH");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[repr(u8)]
pub enum Priority {
    /// 0. Runs before everything else
    Highest = 0,
    /// 10
    VeryHigh = 10,
    /// 30
    High = 30,
    /// 50. The default level
    Normal = 50,
    /// 70
    Low = 70,
    /// 90
    VeryLow = 90,
    /// 100. Runs after everything else
    Lowest = 100,
}

impl Default for Priority {
    /// Returns [`Priority::Normal`]
    fn default() -> Self {
        Priority::Normal
    }
}

impl Priority {
    /// The integer value associated with this level
    pub fn value(self) -> u8 {
        self as u8
    }

    /// The canonical (upper-case) name of this level, e.g. `"VERY_HIGH"`
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Returns the level whose value is exactly `value`, if there is one.
    pub fn from_value(value: u8) -> Option<Priority> {
        Priority::iter().find(|level| level.value() == value)
    }
}

/// Anything that can be resolved to a priority value with [`get_priority`].
///
/// Values of this type are usually built implicitly through one of the `From` implementations, so `get_priority(30)`, `get_priority(Priority::High)`
/// and `get_priority("high")` all work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrioritySpec {
    /// An already-resolved integer priority. Must fall in `0..=100`
    Value(i64),
    /// A named level
    Level(Priority),
    /// The name of a level, matched case-insensitively
    Name(String),
}

impl From<i64> for PrioritySpec {
    fn from(value: i64) -> Self {
        PrioritySpec::Value(value)
    }
}

impl From<i32> for PrioritySpec {
    fn from(value: i32) -> Self {
        PrioritySpec::Value(value as i64)
    }
}

impl From<u32> for PrioritySpec {
    fn from(value: u32) -> Self {
        PrioritySpec::Value(value as i64)
    }
}

impl From<u8> for PrioritySpec {
    fn from(value: u8) -> Self {
        PrioritySpec::Value(value as i64)
    }
}

impl From<Priority> for PrioritySpec {
    fn from(level: Priority) -> Self {
        PrioritySpec::Level(level)
    }
}

impl From<&str> for PrioritySpec {
    fn from(name: &str) -> Self {
        PrioritySpec::Name(name.to_string())
    }
}

impl From<String> for PrioritySpec {
    fn from(name: String) -> Self {
        PrioritySpec::Name(name)
    }
}

impl TryFrom<&Value> for PrioritySpec {
    type Error = PriorityError;

    /// Interpret a JSON value as a priority designator.
    ///
    /// Integers become [`PrioritySpec::Value`] and strings become [`PrioritySpec::Name`]. Anything else, including floats with no fractional part,
    /// is a [`PriorityError::InvalidType`]. Unsigned integers too large for an `i64` are rejected as [`PriorityError::OutOfRange`] straight away.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Ok(PrioritySpec::Value(int))
                } else if let Some(int) = number.as_u64() {
                    Err(PriorityError::OutOfRange { value: int as i128 })
                } else {
                    Err(PriorityError::InvalidType { found: "float" })
                }
            }
            Value::String(name) => Ok(PrioritySpec::Name(name.clone())),
            Value::Null => Err(PriorityError::InvalidType { found: "null" }),
            Value::Bool(_) => Err(PriorityError::InvalidType { found: "bool" }),
            Value::Array(_) => Err(PriorityError::InvalidType { found: "array" }),
            Value::Object(_) => Err(PriorityError::InvalidType { found: "object" }),
        }
    }
}

/// Get the priority value of a designator.
///
/// * integers are returned unchanged, provided they fall within `0..=100`
/// * [`Priority`] levels return their associated value
/// * strings are matched case-insensitively against the level names and return the matched level's value
///
/// # Errors
/// * [`PriorityError::OutOfRange`] if an integer is less than 0 or greater than 100
/// * [`PriorityError::UnknownName`] if a string doesn't name any level
///
/// # Example
/// ```
/// use trainhook::priority::{get_priority, Priority, PriorityError};
///
/// assert_eq!(get_priority(42)?, 42);
/// assert_eq!(get_priority(Priority::Low)?, 70);
/// assert_eq!(get_priority("very_low")?, 90);
/// assert_eq!(get_priority(101), Err(PriorityError::OutOfRange { value: 101 }));
/// # Ok::<(), PriorityError>(())
/// ```
pub fn get_priority<P: Into<PrioritySpec>>(priority: P) -> Result<u8, PriorityError> {
    let spec = priority.into();
    trace!("resolving priority {:?}", spec);
    match spec {
        PrioritySpec::Value(value) => {
            if value < MIN_PRIORITY || value > MAX_PRIORITY {
                return Err(PriorityError::OutOfRange {
                    value: value as i128,
                });
            }
            Ok(value as u8)
        }
        PrioritySpec::Level(level) => Ok(level.value()),
        PrioritySpec::Name(name) => match Priority::from_str(&name) {
            Ok(level) => Ok(level.value()),
            Err(_) => Err(PriorityError::UnknownName { name }),
        },
    }
}

/// Get the priority value of a designator read from a JSON document, such as a hook configuration file.
///
/// Same rules as [`get_priority`], with the addition that values which are neither integers nor strings (floats, `null`, booleans, arrays, objects)
/// are rejected with [`PriorityError::InvalidType`].
pub fn get_priority_from_json(priority: &Value) -> Result<u8, PriorityError> {
    get_priority(PrioritySpec::try_from(priority)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use test_log::test;

    #[test]
    fn test_every_in_range_integer_is_returned_unchanged() {
        for value in MIN_PRIORITY..=MAX_PRIORITY {
            assert_eq!(get_priority(value), Ok(value as u8), "value {}", value);
        }
    }

    #[test]
    fn test_out_of_range_integers() {
        for value in [-1_i64, -100, 101, 255, i64::MIN, i64::MAX] {
            assert_eq!(
                get_priority(value),
                Err(PriorityError::OutOfRange {
                    value: value as i128
                }),
                "value {}",
                value
            );
        }
    }

    #[test]
    fn test_level_values() {
        let values: Vec<u8> = Priority::iter().map(|level| level.value()).collect();
        assert_eq!(values, vec![0, 10, 30, 50, 70, 90, 100]);
    }

    #[test]
    fn test_levels_resolve_by_value_and_name() {
        for level in Priority::iter() {
            assert_eq!(get_priority(level), Ok(level.value()));
            assert_eq!(get_priority(level.name()), Ok(level.value()));
            assert_eq!(
                get_priority(level.name().to_lowercase()),
                Ok(level.value())
            );
        }
    }

    #[test]
    fn test_mixed_case_name() {
        assert_eq!(get_priority("Very_High"), Ok(10));
        assert_eq!(get_priority("nOrMaL"), Ok(50));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            get_priority("bogus"),
            Err(PriorityError::UnknownName {
                name: "bogus".to_string()
            })
        );
        // the separator is part of the name
        assert!(get_priority("very high").is_err());
        assert!(get_priority("").is_err());
    }

    #[test]
    fn test_levels_are_ordered_by_value() {
        let levels: Vec<Priority> = Priority::iter().collect();
        let mut sorted = levels.clone();
        sorted.sort();
        assert_eq!(levels, sorted);
        assert!(Priority::Highest < Priority::Lowest);
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Priority::from_value(30), Some(Priority::High));
        assert_eq!(Priority::from_value(31), None);
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn test_display_uses_screaming_snake_case() {
        assert_eq!(Priority::VeryLow.to_string(), "VERY_LOW");
        assert_eq!(Priority::Highest.name(), "HIGHEST");
    }

    #[test]
    fn test_json_designators() {
        assert_eq!(get_priority_from_json(&json!(0)), Ok(0));
        assert_eq!(get_priority_from_json(&json!("lowest")), Ok(100));
        assert_eq!(
            get_priority_from_json(&json!(-5)),
            Err(PriorityError::OutOfRange { value: -5 })
        );
        assert_eq!(
            get_priority_from_json(&json!(u64::MAX)),
            Err(PriorityError::OutOfRange {
                value: u64::MAX as i128
            })
        );
        assert_eq!(
            get_priority_from_json(&json!(i64::MAX as u64 + 1)),
            Err(PriorityError::OutOfRange {
                value: i64::MAX as i128 + 1
            })
        );
    }

    #[test]
    fn test_json_invalid_types() {
        assert_eq!(
            get_priority_from_json(&json!(3.14)),
            Err(PriorityError::InvalidType { found: "float" })
        );
        assert_eq!(
            get_priority_from_json(&json!(50.0)),
            Err(PriorityError::InvalidType { found: "float" })
        );
        assert_eq!(
            get_priority_from_json(&Value::Null),
            Err(PriorityError::InvalidType { found: "null" })
        );
        assert_eq!(
            get_priority_from_json(&json!(true)),
            Err(PriorityError::InvalidType { found: "bool" })
        );
        assert_eq!(
            get_priority_from_json(&json!([50])),
            Err(PriorityError::InvalidType { found: "array" })
        );
    }
}
