#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Priority-ordered lifecycle hooks for training-loop executors.
//!
//! The `trainhook` crate defines the extension point through which an executor (the code that owns a training loop) lets other code
//! run at fixed moments of a run: before and after the run, each epoch, and each iteration, with separate training and validation variants.
//! The executor itself is not part of this crate.
//!
//! The [hook] module contains the [`hook::Hook`] trait, whose methods all default to doing nothing, along with two ready-made hooks.
//! The [priority] module resolves the priorities that decide which hook runs first, and the [`hook_registry::HookRegistry`] keeps hooks
//! in that order and dispatches events to them.
//!
//! # Examples
//! Write a hook, register it alongside a built-in one, and dispatch events to both from an executor's loop:
//! ```
//! use trainhook::executor::{Executor, ExecutorState};
//! use trainhook::hook::{Hook, HookEvent, LoggerHook};
//! use trainhook::hook_registry::HookRegistry;
//! use trainhook::priority::Priority;
//!
//! // decays the learning rate at the start of every training epoch
//! struct LrDecay {
//!     lr: f64,
//!     factor: f64,
//! }
//!
//! impl Hook<ExecutorState> for LrDecay {
//!     fn before_train_epoch(&mut self, executor: &mut ExecutorState) {
//!         if executor.epoch() > 0 {
//!             self.lr *= self.factor;
//!         }
//!         executor.set_log_var("lr", self.lr);
//!     }
//! }
//!
//! let mut hooks: HookRegistry<ExecutorState> = HookRegistry::new();
//! hooks.register(LrDecay { lr: 0.1, factor: 0.5 }, Priority::VeryHigh)?;
//! hooks.register(LoggerHook::new(5), "low")?;
//!
//! let mut state = ExecutorState::new(3, Some(10));
//! hooks.call(HookEvent::BeforeRun, &mut state);
//! for epoch in 0..3 {
//!     state.epoch = epoch;
//!     hooks.call(HookEvent::BeforeTrainEpoch, &mut state);
//!     for inner_iter in 0..10 {
//!         state.inner_iter = inner_iter;
//!         hooks.call(HookEvent::BeforeTrainIter, &mut state);
//!         /* run a training step */
//!         state.iter += 1;
//!         hooks.call(HookEvent::AfterTrainIter, &mut state);
//!     }
//!     hooks.call(HookEvent::AfterTrainEpoch, &mut state);
//! }
//! hooks.call(HookEvent::AfterRun, &mut state);
//!
//! assert_eq!(state.log_vars, vec![("lr".to_string(), 0.025)]);
//! # Ok::<(), trainhook::priority::PriorityError>(())
//! ```

/// Describes the executor state visible to hooks. See [`executor::Executor`]
pub mod executor;
pub mod hook;
/// Contains [`hook_options::HookOptions`], for declaring built-in hooks and their priorities in a JSON file.
pub mod hook_options;
/// Contains [`hook_registry::HookRegistry`], which keeps hooks in priority order and dispatches events to them.
pub mod hook_registry;
pub mod priority;
