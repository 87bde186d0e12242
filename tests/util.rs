use std::{cell::RefCell, rc::Rc};

use trainhook::hook::Hook;

pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Records every generic callback it receives, so tests can see which generic method a mode-specific event ended up calling
pub struct GenericRecorder {
    pub label: &'static str,
    pub log: CallLog,
}

impl GenericRecorder {
    pub fn new(label: &'static str, log: &CallLog) -> Self {
        GenericRecorder {
            label,
            log: log.clone(),
        }
    }

    fn record(&self, method: &str) {
        self.log
            .borrow_mut()
            .push(format!("{}:{}", self.label, method));
    }
}

impl<E: ?Sized> Hook<E> for GenericRecorder {
    fn before_run(&mut self, _executor: &mut E) {
        self.record("before_run");
    }
    fn after_run(&mut self, _executor: &mut E) {
        self.record("after_run");
    }
    fn before_epoch(&mut self, _executor: &mut E) {
        self.record("before_epoch");
    }
    fn after_epoch(&mut self, _executor: &mut E) {
        self.record("after_epoch");
    }
    fn before_iter(&mut self, _executor: &mut E) {
        self.record("before_iter");
    }
    fn after_iter(&mut self, _executor: &mut E) {
        self.record("after_iter");
    }
    fn name(&self) -> &str {
        self.label
    }
}
