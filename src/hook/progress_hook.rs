use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::warn;

use crate::executor::Executor;
use crate::hook::Hook;
use crate::priority::Priority;

const BAR_TEMPLATE: &str =
    "[{elapsed_precise}] [{bar:40.green/white}] {human_pos}/{human_len} {per_sec} ({eta}) {msg}";
const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner} {human_pos} {per_sec} {msg}";

/// Draws a progress bar over the training iterations of a run and prints a timestamped summary after every training epoch.
///
/// The bar is sized as `max_epochs * iters_per_epoch` when the executor knows its epoch length and that product fits a `usize`, and is a spinner otherwise.
pub struct ProgressHook {
    pb: Option<ProgressBar>,
    hidden: bool,
    log_output: bool,
}

impl ProgressHook {
    /// The priority this hook is registered with when none is given
    pub const DEFAULT_PRIORITY: Priority = Priority::Lowest;

    /// Create a new ProgressHook.
    ///
    /// If `hidden` is true the bar keeps count but never draws to the terminal. If `log_output` is true epoch summaries are also
    /// written to stdout, allowing output to be piped
    pub fn new(hidden: bool, log_output: bool) -> Self {
        ProgressHook {
            pb: None,
            hidden,
            log_output,
        }
    }

    /// Number of training iterations counted since the start of the run, or 0 before the run starts
    pub fn position(&self) -> u64 {
        self.pb.as_ref().map_or(0, |pb| pb.position())
    }

    /// The length of the bar for the current run, if the run has started and the executor knew its epoch length
    pub fn length(&self) -> Option<u64> {
        self.pb.as_ref().and_then(|pb| pb.length())
    }

    fn build_bar(&self, length: Option<u64>) -> ProgressBar {
        let target = if self.hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };
        let pb = ProgressBar::with_draw_target(length, target);
        let template = match length {
            Some(_) => BAR_TEMPLATE,
            None => SPINNER_TEMPLATE,
        };
        match ProgressStyle::default_bar().template(template) {
            Ok(style) => pb.set_style(style),
            Err(e) => warn!("unable to style progress bar: {}", e),
        }
        pb
    }
}

impl Default for ProgressHook {
    /// Returns a visible ProgressHook that doesn't log to stdout
    fn default() -> Self {
        ProgressHook::new(false, false)
    }
}

impl<E: Executor + ?Sized> Hook<E> for ProgressHook {
    fn before_run(&mut self, executor: &mut E) {
        let length = executor
            .iters_per_epoch()
            .and_then(|iters| iters.checked_mul(executor.max_epochs()))
            .map(|total| total as u64);
        self.pb = Some(self.build_bar(length));
    }

    fn after_train_iter(&mut self, _executor: &mut E) {
        if let Some(pb) = &self.pb {
            pb.inc(1);
        }
    }

    fn after_train_epoch(&mut self, executor: &mut E) {
        let mut summary = format!(
            "{} Epoch {}/{}",
            chrono::Local::now(),
            executor.epoch() + 1,
            executor.max_epochs()
        );
        for (name, value) in executor.log_vars() {
            summary.push_str(&format!(", {}: {}", name, value));
        }
        if let Some(pb) = &self.pb {
            pb.println(&summary);
        }
        if self.log_output {
            println!("{}", summary);
        }
    }

    fn after_run(&mut self, _executor: &mut E) {
        if let Some(pb) = &self.pb {
            pb.finish_with_message("Training complete");
        }
    }

    fn name(&self) -> &str {
        "ProgressHook"
    }
}
