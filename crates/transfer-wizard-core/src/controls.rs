//! Toolkit-neutral form controls.
//!
//! Every editable control owns a [`ChangeNotifier`]. The hosting shell renders
//! the controls and writes user edits back through `set_text`/`select`, which
//! fires the listener installed at creation time.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

pub type ChangeListener = Rc<dyn Fn()>;

#[derive(Default)]
pub struct ChangeNotifier {
    listener: RefCell<Option<ChangeListener>>,
    suppressed: Cell<usize>,
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("has_listener", &self.listener.borrow().is_some())
            .field("suppressed", &self.suppressed.get())
            .finish()
    }
}

impl ChangeNotifier {
    pub fn set_listener(&self, listener: ChangeListener) {
        *self.listener.borrow_mut() = Some(listener);
    }

    /// Silences the listener until the returned guard is dropped. Guards nest.
    pub fn suppress(&self) -> SuppressGuard<'_> {
        self.suppressed.set(self.suppressed.get() + 1);
        SuppressGuard { notifier: self }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed.get() > 0
    }

    fn notify(&self) {
        if self.is_suppressed() {
            return;
        }
        // Clone out so the listener may touch this control again.
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}

#[must_use = "notifications resume as soon as the guard is dropped"]
pub struct SuppressGuard<'a> {
    notifier: &'a ChangeNotifier,
}

impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        let n = self.notifier.suppressed.get();
        self.notifier.suppressed.set(n.saturating_sub(1));
    }
}

#[derive(Debug, Default)]
pub struct TextInput {
    text: RefCell<String>,
    notifier: ChangeNotifier,
}

impl TextInput {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(initial.into()),
            notifier: ChangeNotifier::default(),
        }
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        if *self.text.borrow() == text {
            return;
        }
        *self.text.borrow_mut() = text;
        self.notifier.notify();
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}

/// Single-select list. Selection is an index into the visible entries.
#[derive(Debug, Default)]
pub struct ChoiceInput {
    entries: RefCell<Vec<String>>,
    selected: Cell<Option<usize>>,
    notifier: ChangeNotifier,
}

impl ChoiceInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.get()
    }

    pub fn selected_entry(&self) -> Option<String> {
        let index = self.selected.get()?;
        self.entries.borrow().get(index).cloned()
    }

    pub fn add(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    /// Drops every entry and the selection.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.set_selected(None);
    }

    /// Out-of-range indices are ignored.
    pub fn select(&self, index: usize) {
        if index < self.len() {
            self.set_selected(Some(index));
        }
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    fn set_selected(&self, selected: Option<usize>) {
        if self.selected.replace(selected) != selected {
            self.notifier.notify();
        }
    }
}

#[derive(Debug, Default)]
pub struct ReadonlyText {
    text: RefCell<String>,
}

impl ReadonlyText {
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    pub fn clear(&self) {
        self.text.borrow_mut().clear();
    }
}

#[derive(Debug, Clone)]
pub enum ControlHandle {
    Text(Rc<TextInput>),
    Choice(Rc<ChoiceInput>),
    Readonly(Rc<ReadonlyText>),
}

impl ControlHandle {
    pub fn as_text(&self) -> Option<&Rc<TextInput>> {
        match self {
            ControlHandle::Text(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&Rc<ChoiceInput>> {
        match self {
            ControlHandle::Choice(input) => Some(input),
            _ => None,
        }
    }

    pub fn as_readonly(&self) -> Option<&Rc<ReadonlyText>> {
        match self {
            ControlHandle::Readonly(mirror) => Some(mirror),
            _ => None,
        }
    }
}

/// Where controls are created. Carries the listener every editable control fires on change.
#[derive(Clone)]
pub struct ControlParent {
    on_change: ChangeListener,
}

impl ControlParent {
    pub fn new(on_change: ChangeListener) -> Self {
        Self { on_change }
    }

    /// A parent whose controls notify nobody.
    pub fn detached() -> Self {
        Self::new(Rc::new(|| {}))
    }

    pub fn on_change(&self) -> ChangeListener {
        Rc::clone(&self.on_change)
    }
}
