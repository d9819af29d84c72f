//! Input handling subsystem for combobox interactions.
//!
//! Keyboard input is decoded by the host into [`Key`](key_handler::Key) and
//! interpreted here against the current row list.

pub mod key_handler;

pub use key_handler::{handle_key, Key, KeyResult, RowAction};
