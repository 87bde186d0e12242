//! The [`Hook`] trait and the lifecycle events an executor fires at its hooks.
//!
//! Every method of [`Hook`] has a default implementation, so a hook only implements the events it cares about.
//! The train/val specific methods delegate to the generic epoch and iteration methods by default, so overriding [`Hook::before_epoch`]
//! affects both training and validation epochs, while overriding [`Hook::before_train_epoch`] affects training epochs only.
//!
//! ```
//! use trainhook::hook::Hook;
//!
//! #[derive(Default)]
//! struct EpochCounter {
//!     epochs_started: usize,
//! }
//!
//! impl<E> Hook<E> for EpochCounter {
//!     fn before_epoch(&mut self, _executor: &mut E) {
//!         self.epochs_started += 1;
//!     }
//! }
//!
//! let mut counter = EpochCounter::default();
//! counter.before_train_epoch(&mut ());
//! counter.before_val_epoch(&mut ());
//! assert_eq!(counter.epochs_started, 2);
//! ```

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

pub(crate) mod logger_hook;
pub(crate) mod progress_hook;
pub use logger_hook::LoggerHook;
pub use progress_hook::ProgressHook;

/// A set of callbacks invoked by an executor at fixed points of its run.
///
/// `E` is the executor type. Each callback receives the executor so it can inspect or update executor-owned state.
/// All callbacks do nothing by default.
pub trait Hook<E: ?Sized> {
    /// called once, before the first epoch
    fn before_run(&mut self, _executor: &mut E) {}

    /// called once, after the last epoch
    fn after_run(&mut self, _executor: &mut E) {}

    /// called before every epoch, unless [`Hook::before_train_epoch`] or [`Hook::before_val_epoch`] is overridden
    fn before_epoch(&mut self, _executor: &mut E) {}

    /// called after every epoch, unless [`Hook::after_train_epoch`] or [`Hook::after_val_epoch`] is overridden
    fn after_epoch(&mut self, _executor: &mut E) {}

    /// called before every iteration, unless [`Hook::before_train_iter`] or [`Hook::before_val_iter`] is overridden
    fn before_iter(&mut self, _executor: &mut E) {}

    /// called after every iteration, unless [`Hook::after_train_iter`] or [`Hook::after_val_iter`] is overridden
    fn after_iter(&mut self, _executor: &mut E) {}

    /// calls [`Hook::before_epoch`] by default
    fn before_train_epoch(&mut self, executor: &mut E) {
        self.before_epoch(executor);
    }

    /// calls [`Hook::before_epoch`] by default
    fn before_val_epoch(&mut self, executor: &mut E) {
        self.before_epoch(executor);
    }

    /// calls [`Hook::after_epoch`] by default
    fn after_train_epoch(&mut self, executor: &mut E) {
        self.after_epoch(executor);
    }

    /// calls [`Hook::after_epoch`] by default
    fn after_val_epoch(&mut self, executor: &mut E) {
        self.after_epoch(executor);
    }

    /// calls [`Hook::before_iter`] by default
    fn before_train_iter(&mut self, executor: &mut E) {
        self.before_iter(executor);
    }

    /// calls [`Hook::before_iter`] by default
    fn before_val_iter(&mut self, executor: &mut E) {
        self.before_iter(executor);
    }

    /// calls [`Hook::after_iter`] by default
    fn after_train_iter(&mut self, executor: &mut E) {
        self.after_iter(executor);
    }

    /// calls [`Hook::after_iter`] by default
    fn after_val_iter(&mut self, executor: &mut E) {
        self.after_iter(executor);
    }

    /// The name used for this hook in logs and by [`HookRegistry::names`](crate::hook_registry::HookRegistry::names). Defaults to the type name,
    /// without its module path or generic arguments
    fn name(&self) -> &str {
        let full_name = std::any::type_name::<Self>();
        // generic arguments carry paths of their own, so strip them before taking the last segment
        let base = full_name.split('<').next().unwrap_or(full_name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

/// The lifecycle points at which an executor calls its hooks, one per [`Hook`] method.
///
/// Events display as, and parse from, the snake_case name of their method:
/// ```
/// use trainhook::hook::HookEvent;
///
/// assert_eq!(HookEvent::AfterValIter.to_string(), "after_val_iter");
/// assert_eq!("before_run".parse::<HookEvent>(), Ok(HookEvent::BeforeRun));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum HookEvent {
    BeforeRun,
    AfterRun,
    BeforeEpoch,
    AfterEpoch,
    BeforeIter,
    AfterIter,
    BeforeTrainEpoch,
    BeforeValEpoch,
    AfterTrainEpoch,
    AfterValEpoch,
    BeforeTrainIter,
    BeforeValIter,
    AfterTrainIter,
    AfterValIter,
}

impl HookEvent {
    /// Call the method of `hook` corresponding to this event
    pub fn dispatch<E, H>(self, hook: &mut H, executor: &mut E)
    where
        E: ?Sized,
        H: Hook<E> + ?Sized,
    {
        match self {
            HookEvent::BeforeRun => hook.before_run(executor),
            HookEvent::AfterRun => hook.after_run(executor),
            HookEvent::BeforeEpoch => hook.before_epoch(executor),
            HookEvent::AfterEpoch => hook.after_epoch(executor),
            HookEvent::BeforeIter => hook.before_iter(executor),
            HookEvent::AfterIter => hook.after_iter(executor),
            HookEvent::BeforeTrainEpoch => hook.before_train_epoch(executor),
            HookEvent::BeforeValEpoch => hook.before_val_epoch(executor),
            HookEvent::AfterTrainEpoch => hook.after_train_epoch(executor),
            HookEvent::AfterValEpoch => hook.after_val_epoch(executor),
            HookEvent::BeforeTrainIter => hook.before_train_iter(executor),
            HookEvent::BeforeValIter => hook.before_val_iter(executor),
            HookEvent::AfterTrainIter => hook.after_train_iter(executor),
            HookEvent::AfterValIter => hook.after_val_iter(executor),
        }
    }
}

// EmptyHook has no state, so there's no point in implementing any other common traits
/// A hook that does nothing when called.
#[derive(Default, Debug)]
pub struct EmptyHook {}

impl EmptyHook {
    /// Create a new instance of the EmptyHook
    pub fn new() -> Self {
        EmptyHook {}
    }
}

impl<E: ?Sized> Hook<E> for EmptyHook {}
