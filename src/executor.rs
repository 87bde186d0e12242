use strum::{Display, EnumString};

/// Whether the executor is currently training or validating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// The executor is running training epochs/iterations
    Train,
    /// The executor is running validation epochs/iterations
    Val,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Train
    }
}

/// The view of an executor's state available to the built-in hooks.
///
/// The [`Hook`](crate::hook::Hook) trait itself is generic over the executor type, so a hook that needs nothing from the executor works with any type at all.
/// Hooks that want to report on training progress, like [`LoggerHook`](crate::hook::LoggerHook), require this trait instead.
pub trait Executor {
    /// the current mode
    fn mode(&self) -> Mode;
    /// zero-indexed epoch currently running
    fn epoch(&self) -> usize;
    /// total number of epochs the executor intends to run
    fn max_epochs(&self) -> usize;
    /// number of training iterations completed over the whole run
    fn iter(&self) -> usize;
    /// zero-indexed iteration within the current epoch
    fn inner_iter(&self) -> usize;
    /// number of iterations in an epoch of the current mode, if known ahead of time
    fn iters_per_epoch(&self) -> Option<usize>;
    /// named scalar values (losses, learning rate, ...) the executor wants reported. Empty by default
    fn log_vars(&self) -> &[(String, f64)] {
        &[]
    }
}

/// A plain bundle of executor state.
///
/// Executors that don't want to implement [`Executor`] themselves can keep one of these up to date and hand it to their hooks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecutorState {
    /// see [`Executor::mode`]
    pub mode: Mode,
    /// see [`Executor::epoch`]
    pub epoch: usize,
    /// see [`Executor::max_epochs`]
    pub max_epochs: usize,
    /// see [`Executor::iter`]
    pub iter: usize,
    /// see [`Executor::inner_iter`]
    pub inner_iter: usize,
    /// see [`Executor::iters_per_epoch`]
    pub iters_per_epoch: Option<usize>,
    /// see [`Executor::log_vars`]
    pub log_vars: Vec<(String, f64)>,
}

impl ExecutorState {
    /// Create a new state in training mode at the very start of a run of `max_epochs` epochs
    pub fn new(max_epochs: usize, iters_per_epoch: Option<usize>) -> Self {
        ExecutorState {
            max_epochs,
            iters_per_epoch,
            ..Default::default()
        }
    }

    /// Set the value reported under `name`, replacing any earlier value with the same name
    pub fn set_log_var(&mut self, name: &str, value: f64) {
        match self.log_vars.iter_mut().find(|(var, _)| var == name) {
            Some((_, old)) => *old = value,
            None => self.log_vars.push((name.to_string(), value)),
        }
    }
}

impl Executor for ExecutorState {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn epoch(&self) -> usize {
        self.epoch
    }

    fn max_epochs(&self) -> usize {
        self.max_epochs
    }

    fn iter(&self) -> usize {
        self.iter
    }

    fn inner_iter(&self) -> usize {
        self.inner_iter
    }

    fn iters_per_epoch(&self) -> Option<usize> {
        self.iters_per_epoch
    }

    fn log_vars(&self) -> &[(String, f64)] {
        &self.log_vars
    }
}
