//! Widgets for the TUI.

pub mod chart;
pub mod header;
pub mod report_list;
pub mod table;
