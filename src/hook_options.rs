use std::{fmt, io::Read};

use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::executor::Executor;
use crate::hook::{LoggerHook, ProgressHook};
use crate::hook_registry::HookRegistry;
use crate::priority::{get_priority, get_priority_from_json, PriorityError, PrioritySpec};

/// Declares which built-in hooks an executor should run, and with what priority.
///
/// Options are usually read from a JSON array, one object per hook, each naming its hook in a `type` field. `priority` is optional,
/// and accepts an integer or a level name:
/// ```
/// use trainhook::executor::ExecutorState;
/// use trainhook::hook_options::HookOptions;
///
/// let options = HookOptions::from_json_str(r#"[
///     { "type": "LoggerHook", "interval": 50, "priority": "low" },
///     { "type": "ProgressHook", "hidden": true, "priority": 20 }
/// ]"#)?;
/// let hooks = options.build::<ExecutorState>()?;
/// assert_eq!(hooks.priorities(), vec![("ProgressHook", 20), ("LoggerHook", 70)]);
/// # Ok::<(), trainhook::hook_options::HookOptionsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct HookOptions {
    /// the hooks to build, in registration order
    pub hooks: Vec<HookEntry>,
}

/// One hook declared in [`HookOptions`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum HookEntry {
    /// Builds a [`LoggerHook`]
    LoggerHook {
        /// see [`LoggerHook::new`]. Must be greater than 0
        #[serde(default = "default_log_interval")]
        interval: usize,
        /// defaults to [`LoggerHook::DEFAULT_PRIORITY`]
        #[serde(default, deserialize_with = "present_value")]
        priority: Option<Value>,
    },
    /// Builds a [`ProgressHook`]
    ProgressHook {
        /// see [`ProgressHook::new`]
        #[serde(default)]
        hidden: bool,
        /// see [`ProgressHook::new`]
        #[serde(default)]
        log_output: bool,
        /// defaults to [`ProgressHook::DEFAULT_PRIORITY`]
        #[serde(default, deserialize_with = "present_value")]
        priority: Option<Value>,
    },
}

fn default_log_interval() -> usize {
    10
}

// a plain Option<Value> would read an explicit `null` as "absent", hiding it from the priority resolver
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl HookOptions {
    /// Parse options from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, HookOptionsError> {
        serde_json::from_str(json).map_err(|e| HookOptionsError::Parse(e.to_string()))
    }

    /// Parse options from a reader producing JSON, such as an open file
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HookOptionsError> {
        serde_json::from_reader(reader).map_err(|e| HookOptionsError::Parse(e.to_string()))
    }

    /// Build every declared hook and register it, in declaration order, in a new [`HookRegistry`].
    ///
    /// # Errors
    /// Returns a [`HookOptionsError`] if...
    /// * a LoggerHook has an `interval` of 0,
    /// * a `priority` fails to resolve (see [`get_priority_from_json`]).
    pub fn build<E: Executor + ?Sized>(&self) -> Result<HookRegistry<E>, HookOptionsError> {
        let mut registry = HookRegistry::new();
        for (index, entry) in self.hooks.iter().enumerate() {
            let priority_error = |source| HookOptionsError::Priority { index, source };
            match entry {
                HookEntry::LoggerHook { interval, priority } => {
                    if *interval == 0 {
                        return Err(HookOptionsError::ZeroLogInterval { index });
                    }
                    let priority = resolve(priority.as_ref(), LoggerHook::DEFAULT_PRIORITY.into())
                        .map_err(priority_error)?;
                    registry
                        .register(LoggerHook::new(*interval), priority)
                        .map_err(priority_error)?;
                }
                HookEntry::ProgressHook {
                    hidden,
                    log_output,
                    priority,
                } => {
                    let priority =
                        resolve(priority.as_ref(), ProgressHook::DEFAULT_PRIORITY.into())
                            .map_err(priority_error)?;
                    registry
                        .register(ProgressHook::new(*hidden, *log_output), priority)
                        .map_err(priority_error)?;
                }
            }
        }
        debug!("built hooks {:?}", registry.priorities());
        Ok(registry)
    }
}

fn resolve(priority: Option<&Value>, default: PrioritySpec) -> Result<u8, PriorityError> {
    match priority {
        Some(value) => get_priority_from_json(value),
        None => get_priority(default),
    }
}

impl Default for HookOptions {
    /// Returns options for a [`LoggerHook`] with an interval of 10 and a visible [`ProgressHook`], both at their default priorities
    fn default() -> Self {
        HookOptions {
            hooks: vec![
                HookEntry::LoggerHook {
                    interval: default_log_interval(),
                    priority: None,
                },
                HookEntry::ProgressHook {
                    hidden: false,
                    log_output: false,
                    priority: None,
                },
            ],
        }
    }
}

/// Errors that can occur when reading [`HookOptions`] or building hooks from them
#[derive(Debug, Clone, PartialEq)]
pub enum HookOptionsError {
    /// The options could not be parsed
    Parse(String),
    /// A LoggerHook was declared with an interval of 0
    ZeroLogInterval {
        /// position of the offending hook in the options
        index: usize,
    },
    /// A hook's priority could not be resolved
    Priority {
        /// position of the offending hook in the options
        index: usize,
        /// the resolution error
        source: PriorityError,
    },
}

impl fmt::Display for HookOptionsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HookOptionsError::Parse(reason) => write!(f, "Unable to parse hook options: {}", reason),
            HookOptionsError::ZeroLogInterval { index } => {
                write!(f, "hook {}: LoggerHook interval must be greater than 0", index)
            }
            HookOptionsError::Priority { index, source } => {
                write!(f, "hook {}: {}", index, source)
            }
        }
    }
}

impl std::error::Error for HookOptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HookOptionsError::Priority { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::executor::ExecutorState;

    #[test]
    fn test_defaults() {
        let registry = HookOptions::default().build::<ExecutorState>().unwrap();
        assert_eq!(
            registry.priorities(),
            vec![("LoggerHook", 90), ("ProgressHook", 100)]
        );
    }

    #[test]
    fn test_parse_fills_field_defaults() {
        let options = HookOptions::from_json_str(r#"[{"type": "LoggerHook"}, {"type": "ProgressHook"}]"#).unwrap();
        assert_eq!(
            options.hooks,
            vec![
                HookEntry::LoggerHook {
                    interval: 10,
                    priority: None
                },
                HookEntry::ProgressHook {
                    hidden: false,
                    log_output: false,
                    priority: None
                }
            ]
        );
    }

    #[test]
    fn test_explicit_null_priority_is_invalid() {
        let options = HookOptions::from_json_str(r#"[{"type": "LoggerHook", "priority": null}]"#).unwrap();
        assert_eq!(
            options.build::<ExecutorState>().err(),
            Some(HookOptionsError::Priority {
                index: 0,
                source: PriorityError::InvalidType { found: "null" }
            })
        );
    }

    #[test]
    fn test_float_priority_is_invalid() {
        let options = HookOptions::from_json_str(
            r#"[{"type": "ProgressHook"}, {"type": "LoggerHook", "priority": 3.14}]"#,
        )
        .unwrap();
        assert_eq!(
            options.build::<ExecutorState>().err(),
            Some(HookOptionsError::Priority {
                index: 1,
                source: PriorityError::InvalidType { found: "float" }
            })
        );
    }

    #[test]
    fn test_zero_interval() {
        let options = HookOptions::from_json_str(r#"[{"type": "LoggerHook", "interval": 0}]"#).unwrap();
        assert_eq!(
            options.build::<ExecutorState>().err(),
            Some(HookOptionsError::ZeroLogInterval { index: 0 })
        );
    }

    #[test]
    fn test_unknown_hook_type() {
        let result = HookOptions::from_json_str(r#"[{"type": "CheckpointHook"}]"#);
        assert!(matches!(result, Err(HookOptionsError::Parse(_))));
    }

    #[test]
    fn test_unknown_field() {
        let result = HookOptions::from_json_str(r#"[{"type": "LoggerHook", "intervall": 5}]"#);
        assert!(matches!(result, Err(HookOptionsError::Parse(_))));
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;
        let error = HookOptionsError::Priority {
            index: 3,
            source: PriorityError::OutOfRange { value: -1 },
        };
        assert!(error.source().is_some());
        assert_eq!(
            error.to_string(),
            "hook 3: priority must be between 0 and 100, got -1"
        );
    }

    #[test]
    fn test_error_send() {
        fn assert_send<T: Send>() {}
        assert_send::<HookOptionsError>();
    }

    #[test]
    fn test_error_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<HookOptionsError>();
    }
}
