//! Rendering-facing helpers.
//!
//! The combobox core does not draw anything. This module holds what a renderer
//! needs from it:
//! - Virtual scrolling constants and visible row type
//! - Virtual scroll manager (row/slice join and padding)
//! - Input handling (keyboard)

pub mod virtual_scrolling;
pub mod virtual_scroll_manager;
pub mod input;
