//! Open/closed, keyboard focus, and text input state.
//!
//! Two states only: Closed and Open. Closing always drops the active row so
//! focus returns to the text input.

/// State related to ongoing keyboard/pointer interaction.
///
/// Responsibilities:
/// - Tracking whether the list is open
/// - Tracking the keyboard-focused row (`None` means focus is in the input)
/// - Holding the text input value when the combobox owns it
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Whether the list is open
    is_open: bool,
    /// Keyboard-focused row index
    active_index: Option<usize>,
    /// Current text input value
    input_value: String,
}

impl InteractionState {
    /// Creates a closed state with an empty input.
    pub fn new() -> Self {
        Self {
            is_open: false,
            active_index: None,
            input_value: String::new(),
        }
    }

    /// Resets all interaction state.
    pub fn reset(&mut self) {
        self.is_open = false;
        self.active_index = None;
        self.input_value.clear();
    }

    // ===== Queries =====

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    // ===== Transitions =====

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Closes the list and returns focus to the input.
    pub fn close(&mut self) {
        self.is_open = false;
        self.active_index = None;
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn set_active_index(&mut self, index: Option<usize>) {
        self.active_index = index;
    }

    /// Stores a new input value. Any text change opens the list.
    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
        self.is_open = true;
    }

    // ===== Low-Level Accessors (for input handlers) =====

    /// Returns mutable references for the key handler (splits borrows).
    ///
    /// # Returns
    /// Tuple of (is_open, active_index)
    pub(crate) fn for_input_handler(&mut self) -> (&mut bool, &mut Option<usize>) {
        (&mut self.is_open, &mut self.active_index)
    }
}
