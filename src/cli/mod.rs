//! Command handlers and terminal rendering.

pub mod rates;
pub mod ui;
