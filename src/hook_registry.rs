use log::{debug, trace};

use crate::hook::{Hook, HookEvent};
use crate::priority::{get_priority, PriorityError, PrioritySpec};

/// An ordered collection of hooks, for executors to dispatch lifecycle events through.
///
/// Hooks are kept sorted by ascending priority value, so a hook registered with [`Priority::Highest`](crate::priority::Priority::Highest) is called before one
/// registered with [`Priority::Lowest`](crate::priority::Priority::Lowest). Hooks with the same priority are called in the order they were registered.
///
/// # Example
/// ```
/// use trainhook::executor::ExecutorState;
/// use trainhook::hook::{EmptyHook, HookEvent, LoggerHook};
/// use trainhook::hook_registry::HookRegistry;
/// use trainhook::priority::Priority;
///
/// let mut hooks: HookRegistry<ExecutorState> = HookRegistry::new();
/// hooks.register(LoggerHook::new(10), "very_low")?;
/// hooks.register(EmptyHook::new(), Priority::High)?;
/// assert_eq!(hooks.names(), vec!["EmptyHook", "LoggerHook"]);
///
/// let mut state = ExecutorState::new(1, Some(10));
/// hooks.call(HookEvent::BeforeRun, &mut state);
/// # Ok::<(), trainhook::priority::PriorityError>(())
/// ```
pub struct HookRegistry<E: ?Sized> {
    hooks: Vec<(u8, Box<dyn Hook<E>>)>,
}

impl<E: ?Sized> HookRegistry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        HookRegistry { hooks: Vec::new() }
    }

    /// Register `hook` with the given priority designator.
    ///
    /// # Errors
    /// Returns the [`PriorityError`] from resolving `priority`, in which case the hook is not registered.
    pub fn register<H, P>(&mut self, hook: H, priority: P) -> Result<(), PriorityError>
    where
        H: Hook<E> + 'static,
        P: Into<PrioritySpec>,
    {
        self.register_boxed(Box::new(hook), priority)
    }

    /// Register an already boxed hook. See [`HookRegistry::register`]
    pub fn register_boxed<P: Into<PrioritySpec>>(
        &mut self,
        hook: Box<dyn Hook<E>>,
        priority: P,
    ) -> Result<(), PriorityError> {
        let priority = get_priority(priority)?;
        // insert after every hook with an equal or higher precedence
        let position = self
            .hooks
            .iter()
            .position(|(existing, _)| *existing > priority)
            .unwrap_or(self.hooks.len());
        debug!(
            "registering hook {} with priority {} at position {}",
            hook.name(),
            priority,
            position
        );
        self.hooks.insert(position, (priority, hook));
        Ok(())
    }

    /// Call the method corresponding to `event` on every registered hook, in priority order
    pub fn call(&mut self, event: HookEvent, executor: &mut E) {
        trace!("dispatching {} to {} hooks", event, self.hooks.len());
        for (_, hook) in self.hooks.iter_mut() {
            event.dispatch(hook.as_mut(), executor);
        }
    }

    /// Number of registered hooks
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// True if no hooks are registered
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Names of the registered hooks, in the order they are called
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|(_, hook)| hook.name()).collect()
    }

    /// Name and resolved priority of each registered hook, in the order they are called
    pub fn priorities(&self) -> Vec<(&str, u8)> {
        self.hooks
            .iter()
            .map(|(priority, hook)| (hook.name(), *priority))
            .collect()
    }
}

impl<E: ?Sized> Default for HookRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
