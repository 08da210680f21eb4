//! Focus state for a detail view.
//!
//! Tracks which single item is open for detail editing. Only the id is
//! stored; callers resolve the live item from their data on every read so
//! the view always reflects the latest state.

/// At most one focused item plus an "open" flag.
#[derive(Clone, Debug)]
pub struct FocusState<Id> {
    selected: Option<Id>,
    open: bool,
}

impl<Id> Default for FocusState<Id> {
    fn default() -> Self {
        Self {
            selected: None,
            open: false,
        }
    }
}

impl<Id: Clone + PartialEq> FocusState<Id> {
    /// Create a new focus state with nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the detail view for `id`, replacing any previous focus.
    pub fn open(&mut self, id: Id) {
        self.selected = Some(id);
        self.open = true;
    }

    /// Close the detail view and clear the focus.
    pub fn close(&mut self) {
        self.selected = None;
        self.open = false;
    }

    pub fn selected(&self) -> Option<&Id> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.as_ref() == Some(id)
    }
}
