//! UI modules for the partner dashboard.

pub mod app_shell;
pub mod constants;
pub mod controls;
pub mod details;
pub mod map_view;
pub mod partners;
pub mod rendering;
pub mod stats;
pub mod utils;
