// src/ui/mod.rs

pub mod panel;

pub use panel::parameter_panel_system;
