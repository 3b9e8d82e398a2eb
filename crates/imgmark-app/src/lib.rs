//! imgmark Application
//!
//! Numbered command menu on stdin plus one modal eframe window per drawing
//! or viewing command.

mod app;
mod config;
mod menu;
mod shortcuts;
mod view;

pub use app::{App, AppError, Cli, EframeHost, WindowHost, run};
pub use config::{AppConfig, ConfigError};
pub use menu::{MenuCommand, MenuError};
pub use shortcuts::{Shortcut, ShortcutRegistry};
