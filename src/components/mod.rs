pub mod app;
pub mod settings_panel;
pub mod tap_pad;
