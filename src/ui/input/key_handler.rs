//! Keyboard handling for the combobox.
//!
//! This module interprets key presses against the current row list:
//! - Opening the list from the closed state
//! - Moving the active row (arrows, Home/End, jump to parent)
//! - Selecting the active row (Enter single, Space cascading)
//! - Expanding and collapsing the active row
//! - Closing (Escape, Tab)
//!
//! The row list is re-read on every press since it can grow or shrink between
//! keystrokes.

use crate::node::{FlatTreeNode, NodeId};

/// A key press, already decoded from the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Home,
    End,
    Escape,
    Tab,
    /// Printable character other than space
    Char(char),
    Other,
}

/// Engine command produced by a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Toggle one node, no cascade
    SelectSingle(NodeId),
    /// Toggle a node and cascade through its subtree and ancestors
    SelectCascade(NodeId),
    /// Expand or collapse a node
    ToggleExpansion(NodeId),
}

/// Result of keyboard input handling
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyResult {
    /// Host must suppress the key's default action
    pub prevent_default: bool,
    /// Command to apply to the engine, if any
    pub action: Option<RowAction>,
}

impl KeyResult {
    /// Key passes through untouched.
    pub fn ignored() -> Self {
        Self::default()
    }

    fn handled() -> Self {
        Self {
            prevent_default: true,
            action: None,
        }
    }

    fn with_action(action: RowAction) -> Self {
        Self {
            prevent_default: true,
            action: Some(action),
        }
    }
}

/// Handles one key press and updates open/active state.
///
/// # Arguments
/// * `key` - The decoded key
/// * `rows` - The current flat row list
/// * `is_open` - Open flag (mutable)
/// * `active_index` - Keyboard-focused row, `None` when focus is in the input (mutable)
///
/// # Returns
/// Whether the default action must be suppressed, plus the engine command to apply
pub fn handle_key(
    key: Key,
    rows: &[FlatTreeNode],
    is_open: &mut bool,
    active_index: &mut Option<usize>,
) -> KeyResult {
    let last = rows.len().checked_sub(1);

    if !*is_open {
        return match key {
            Key::ArrowDown => {
                *is_open = true;
                *active_index = last.map(|_| 0);
                KeyResult::handled()
            }
            Key::ArrowUp | Key::Enter => {
                *is_open = true;
                KeyResult::handled()
            }
            _ => KeyResult::ignored(),
        };
    }

    // Row under keyboard focus, if the index still points into the list
    let active_row = active_index.and_then(|index| rows.get(index));

    match key {
        Key::ArrowDown => {
            if let Some(last) = last {
                *active_index = Some(match *active_index {
                    Some(index) => (index + 1).min(last),
                    None => 0,
                });
            }
            KeyResult::handled()
        }
        Key::ArrowUp => {
            if let Some(last) = last {
                *active_index = Some(match *active_index {
                    Some(index) => index.min(last).saturating_sub(1),
                    None => 0,
                });
            }
            KeyResult::handled()
        }
        Key::Enter => match active_row {
            Some(row) => KeyResult::with_action(RowAction::SelectSingle(row.id.clone())),
            None => KeyResult::handled(),
        },
        Key::Space => {
            if active_index.is_none() {
                // Focus is in the input: a literal space
                return KeyResult::ignored();
            }
            match active_row {
                Some(row) => KeyResult::with_action(RowAction::SelectCascade(row.id.clone())),
                None => KeyResult::handled(),
            }
        }
        Key::ArrowRight => match active_row {
            Some(row) if row.has_children && !row.is_expanded => {
                KeyResult::with_action(RowAction::ToggleExpansion(row.id.clone()))
            }
            Some(_) => KeyResult::handled(),
            None => KeyResult::ignored(),
        },
        Key::ArrowLeft => match active_row {
            Some(row) if row.has_children && row.is_expanded => {
                KeyResult::with_action(RowAction::ToggleExpansion(row.id.clone()))
            }
            Some(row) => {
                if let Some(parent_id) = &row.parent_id {
                    if let Some(parent_index) = rows.iter().position(|r| &r.id == parent_id) {
                        *active_index = Some(parent_index);
                    }
                }
                KeyResult::handled()
            }
            None => KeyResult::ignored(),
        },
        Key::Home => {
            *active_index = last.map(|_| 0);
            KeyResult::handled()
        }
        Key::End => {
            *active_index = last;
            KeyResult::handled()
        }
        Key::Escape => {
            *is_open = false;
            *active_index = None;
            KeyResult::handled()
        }
        Key::Tab => {
            // Focus moves on; only close
            *is_open = false;
            *active_index = None;
            KeyResult::ignored()
        }
        Key::Char(_) | Key::Other => KeyResult::ignored(),
    }
}
