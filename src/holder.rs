//! Replaceable delegation: the mechanic behind Strategy, Command and Invoker.
//!
//! A [`Holder`] keeps at most one active unit of some contract (usually a
//! `dyn Trait`) and forwards calls to it. Swapping the unit changes behaviour
//! without touching the caller.

use std::fmt;

use tracing::debug;

use crate::error::PatternError;

pub struct Holder<T: ?Sized> {
    label: String,
    active: Option<Box<T>>,
}

impl<T: ?Sized> Holder<T> {
    /// Creates an unbound holder. `label` names it in errors and log lines.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            active: None,
        }
    }

    pub fn with_active(label: impl Into<String>, unit: Box<T>) -> Self {
        Self {
            label: label.into(),
            active: Some(unit),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_bound(&self) -> bool {
        self.active.is_some()
    }

    /// Replaces the active unit and hands back the previous one.
    pub fn set_active(&mut self, unit: Box<T>) -> Option<Box<T>> {
        debug!(holder = %self.label, replaced = self.active.is_some(), "active unit set");
        self.active.replace(unit)
    }

    pub fn clear(&mut self) -> Option<Box<T>> {
        debug!(holder = %self.label, "active unit cleared");
        self.active.take()
    }

    pub fn invoke<R>(&self, call: impl FnOnce(&T) -> R) -> Result<R, PatternError> {
        let unit = self
            .active
            .as_deref()
            .ok_or_else(|| PatternError::unbound_delegate(self.label()))?;
        debug!(holder = %self.label, "invoking active unit");
        Ok(call(unit))
    }

    pub fn invoke_mut<R>(&mut self, call: impl FnOnce(&mut T) -> R) -> Result<R, PatternError> {
        let unit = self
            .active
            .as_deref_mut()
            .ok_or_else(|| PatternError::unbound_delegate(&self.label))?;
        debug!(holder = %self.label, "invoking active unit (mut)");
        Ok(call(unit))
    }
}

impl<T: ?Sized> fmt::Debug for Holder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Holder")
            .field("label", &self.label())
            .field("bound", &self.is_bound())
            .finish()
    }
}

// ============================================================================
// Undo / redo history
// ============================================================================

/// An operation that knows how to take itself back.
pub trait Reversible {
    fn apply(&self);
    fn revert(&self);

    fn describe(&self) -> String {
        String::from("operation")
    }
}

/// Executed operations plus a cursor; everything past the cursor is redoable.
#[derive(Default)]
pub struct History {
    entries: Vec<Box<dyn Reversible>>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute(&mut self, operation: Box<dyn Reversible>) {
        operation.apply();
        debug!(operation = %operation.describe(), "executed");
        // A fresh operation invalidates whatever was undone before it.
        self.entries.truncate(self.cursor);
        self.entries.push(operation);
        self.cursor += 1;
    }

    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let operation = &self.entries[self.cursor];
        operation.revert();
        debug!(operation = %operation.describe(), "undone");
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(operation) = self.entries.get(self.cursor) else {
            return false;
        };
        operation.apply();
        debug!(operation = %operation.describe(), "redone");
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    trait Greeter {
        fn greet(&self, name: &str) -> String;
    }

    struct English;
    impl Greeter for English {
        fn greet(&self, name: &str) -> String {
            format!("Hello, {name}")
        }
    }

    struct Spanish;
    impl Greeter for Spanish {
        fn greet(&self, name: &str) -> String {
            format!("Hola, {name}")
        }
    }

    struct Counter {
        hits: u32,
    }

    #[test]
    fn test_unbound_invoke_fails() {
        let holder: Holder<dyn Greeter> = Holder::new("greeter");
        let err = holder.invoke(|g| g.greet("Ada")).unwrap_err();
        assert_eq!(err, PatternError::unbound_delegate("greeter"));
    }

    #[test]
    fn test_invoke_delegates_to_active_unit() {
        let holder: Holder<dyn Greeter> = Holder::with_active("greeter", Box::new(English));
        assert_eq!(holder.invoke(|g| g.greet("Ada")).unwrap(), "Hello, Ada");
    }

    #[test]
    fn test_set_active_swaps_behaviour() {
        let mut holder: Holder<dyn Greeter> = Holder::new("greeter");
        assert!(holder.set_active(Box::new(English)).is_none());
        assert_eq!(holder.invoke(|g| g.greet("Ada")).unwrap(), "Hello, Ada");

        let previous = holder.set_active(Box::new(Spanish));
        assert!(previous.is_some());
        assert_eq!(holder.invoke(|g| g.greet("Ada")).unwrap(), "Hola, Ada");
    }

    #[test]
    fn test_set_active_is_idempotent() {
        let mut holder: Holder<dyn Greeter> = Holder::new("greeter");
        holder.set_active(Box::new(Spanish));
        holder.set_active(Box::new(Spanish));
        assert!(holder.is_bound());
        assert_eq!(holder.invoke(|g| g.greet("Bo")).unwrap(), "Hola, Bo");
    }

    #[test]
    fn test_clear_unbinds() {
        let mut holder: Holder<dyn Greeter> = Holder::with_active("greeter", Box::new(English));
        assert!(holder.clear().is_some());
        assert!(!holder.is_bound());
        assert!(holder.invoke(|g| g.greet("Ada")).is_err());
    }

    #[test]
    fn test_invoke_mut() {
        let mut holder: Holder<Counter> = Holder::new("counter");
        assert!(holder.invoke_mut(|c| c.hits += 1).is_err());

        holder.set_active(Box::new(Counter { hits: 0 }));
        holder.invoke_mut(|c| c.hits += 1).unwrap();
        holder.invoke_mut(|c| c.hits += 1).unwrap();
        assert_eq!(holder.invoke(|c| c.hits).unwrap(), 2);
    }

    #[test]
    fn test_closure_units() {
        let mut holder: Holder<dyn Fn(i32) -> i32> = Holder::new("op");
        holder.set_active(Box::new(|x| x * 2));
        assert_eq!(holder.invoke(|f| f(21)).unwrap(), 42);

        let offset = 10;
        holder.set_active(Box::new(move |x| x + offset));
        assert_eq!(holder.invoke(|f| f(21)).unwrap(), 31);
    }

    #[test]
    fn test_label_names_holder() {
        let holder: Holder<dyn Greeter> = Holder::new("greeter");
        assert_eq!(holder.label(), "greeter");
        let err = holder.invoke(|g| g.greet("Ada")).unwrap_err();
        assert_eq!(err, PatternError::unbound_delegate(holder.label()));
    }

    #[test]
    fn test_debug_shows_binding() {
        let holder: Holder<dyn Greeter> = Holder::new("greeter");
        let rendered = format!("{holder:?}");
        assert!(rendered.contains("greeter"));
        assert!(rendered.contains("false"));
    }

    struct Append {
        log: Rc<RefCell<String>>,
        text: &'static str,
    }

    impl Reversible for Append {
        fn apply(&self) {
            self.log.borrow_mut().push_str(self.text);
        }

        fn revert(&self) {
            let mut log = self.log.borrow_mut();
            let new_len = log.len().saturating_sub(self.text.len());
            log.truncate(new_len);
        }
    }

    fn append(log: &Rc<RefCell<String>>, text: &'static str) -> Box<dyn Reversible> {
        Box::new(Append {
            log: Rc::clone(log),
            text,
        })
    }

    #[test]
    fn test_history_undo_redo() {
        let log = Rc::new(RefCell::new(String::new()));
        let mut history = History::new();

        history.execute(append(&log, "Hello "));
        history.execute(append(&log, "World"));
        assert_eq!(*log.borrow(), "Hello World");

        assert!(history.undo());
        assert_eq!(*log.borrow(), "Hello ");
        assert!(history.can_redo());

        assert!(history.redo());
        assert_eq!(*log.borrow(), "Hello World");
        assert!(!history.redo());
    }

    #[test]
    fn test_history_bounds() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_history_execute_discards_redo_tail() {
        let log = Rc::new(RefCell::new(String::new()));
        let mut history = History::new();

        history.execute(append(&log, "a"));
        history.execute(append(&log, "b"));
        history.undo();
        history.execute(append(&log, "c"));

        assert_eq!(*log.borrow(), "ac");
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
    }
}
