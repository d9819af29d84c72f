//! State management modules for the combobox.
//!
//! This module contains state-only logic (no rendering concerns):
//! - Tree state (expansion)
//! - Selection state (ground-truth selection)
//! - Interaction state (open flag, active row, input value)
//! - Viewport state (scroll offset, viewport height)

mod tree_state;
mod selection;
mod interaction;
mod viewport;

pub use tree_state::TreeState;
pub use selection::SelectionState;
pub use interaction::InteractionState;
pub use viewport::ViewportState;
