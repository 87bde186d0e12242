use log::info;

use crate::executor::{Executor, Mode};
use crate::hook::Hook;
use crate::priority::Priority;

/// Logs training progress through the [`log`] crate at info level.
///
/// A line is logged every `interval` training iterations and at the end of every validation epoch. Each line carries the executor's
/// mode, epoch and iteration, followed by everything in [`Executor::log_vars`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerHook {
    interval: usize,
}

impl LoggerHook {
    /// The priority this hook is registered with when none is given. Logging runs late, so other hooks have already updated the executor's log vars
    pub const DEFAULT_PRIORITY: Priority = Priority::VeryLow;

    /// Create a hook that logs every `interval` training iterations. An `interval` of 0 disables the per-iteration lines
    pub fn new(interval: usize) -> Self {
        LoggerHook { interval }
    }

    /// The number of training iterations between log lines
    pub fn interval(&self) -> usize {
        self.interval
    }

    /// whether a line is due after the iteration at zero-indexed position `inner_iter`
    fn every_n_inner_iters(&self, inner_iter: usize) -> bool {
        self.interval > 0 && (inner_iter + 1) % self.interval == 0
    }

    /// Build the line this hook logs for the executor's current state
    pub fn format_line<E: Executor + ?Sized>(&self, executor: &E) -> String {
        let mut line = match executor.mode() {
            Mode::Train => {
                let iters = executor
                    .iters_per_epoch()
                    .map_or("?".to_string(), |iters| iters.to_string());
                format!(
                    "Epoch [{}/{}][{}/{}]",
                    executor.epoch() + 1,
                    executor.max_epochs(),
                    executor.inner_iter() + 1,
                    iters
                )
            }
            Mode::Val => format!("Epoch(val) [{}/{}]", executor.epoch() + 1, executor.max_epochs()),
        };
        for (name, value) in executor.log_vars() {
            line.push_str(&format!(", {}: {:.4}", name, value));
        }
        line
    }
}

impl Default for LoggerHook {
    /// Returns a LoggerHook with an `interval` of 10
    fn default() -> Self {
        LoggerHook::new(10)
    }
}

impl<E: Executor + ?Sized> Hook<E> for LoggerHook {
    fn before_run(&mut self, executor: &mut E) {
        info!("starting run of {} epochs", executor.max_epochs());
    }

    fn after_run(&mut self, executor: &mut E) {
        info!(
            "finished run after {} training iterations",
            executor.iter()
        );
    }

    fn after_train_iter(&mut self, executor: &mut E) {
        if self.every_n_inner_iters(executor.inner_iter()) {
            info!("{}", self.format_line(&*executor));
        }
    }

    fn after_val_epoch(&mut self, executor: &mut E) {
        info!("{}", self.format_line(&*executor));
    }

    fn name(&self) -> &str {
        "LoggerHook"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::executor::ExecutorState;
    use crate::hook::HookEvent;
    use strum::IntoEnumIterator;
    use test_log::test;

    #[test]
    fn test_train_line() {
        let mut state = ExecutorState::new(12, Some(100));
        state.epoch = 2;
        state.inner_iter = 9;
        state.set_log_var("loss", 0.25);
        state.set_log_var("lr", 0.001);
        let line = LoggerHook::new(10).format_line(&state);
        assert_eq!(line, "Epoch [3/12][10/100], loss: 0.2500, lr: 0.0010");
    }

    #[test]
    fn test_train_line_unknown_epoch_length() {
        let state = ExecutorState::new(1, None);
        let line = LoggerHook::default().format_line(&state);
        assert_eq!(line, "Epoch [1/1][1/?]");
    }

    #[test]
    fn test_val_line() {
        let mut state = ExecutorState::new(5, Some(20));
        state.mode = Mode::Val;
        state.epoch = 4;
        state.set_log_var("accuracy", 0.875);
        let line = LoggerHook::default().format_line(&state);
        assert_eq!(line, "Epoch(val) [5/5], accuracy: 0.8750");
    }

    #[test]
    fn test_interval() {
        let hook = LoggerHook::new(5);
        let due: Vec<usize> = (0..20).filter(|i| hook.every_n_inner_iters(*i)).collect();
        assert_eq!(due, vec![4, 9, 14, 19]);
        let never = LoggerHook::new(0);
        assert!((0..20).all(|i| !never.every_n_inner_iters(i)));
    }

    #[test]
    fn test_all_events_leave_executor_untouched() {
        let mut hook = LoggerHook::new(1);
        let mut state = ExecutorState::new(2, Some(3));
        state.set_log_var("loss", 1.0);
        let before = state.clone();
        for event in HookEvent::iter() {
            event.dispatch(&mut hook, &mut state);
        }
        assert_eq!(state, before);
    }
}
