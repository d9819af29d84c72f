//! Application-level modules for the combobox.
//!
//! This module contains the tree engine, the combobox coordinator that wires
//! it to input and viewport state, and settings persistence.

mod tree_engine;
mod combobox;
mod settings_coordinator;

pub use tree_engine::TreeEngine;
pub use combobox::{Combobox, SelectedTag};
pub use settings_coordinator::{
    FileSettingsStorage, MemorySettingsStorage, SettingsCoordinator, SettingsStorage,
    COMBOBOX_CONFIG_KEY, DEFAULT_SETTINGS_PATH,
};
