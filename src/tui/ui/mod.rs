//! UI module for the TUI.

mod charts;
mod fare;
mod footer;
mod form;
mod header;
mod layout;

pub use layout::draw_ui;
