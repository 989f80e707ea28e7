//! carik-plugins - plugin registry for carik-bot
//!
//! A plugin groups related commands and roles under a name and can be
//! enabled or disabled as a unit.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{BotError, CommandError, ConfigError, PluginError};
pub use application::services::{PluginInfo, PluginManager, SharedPluginManager};
pub use domain::entities::{
    add_command_to_plugin, new_plugin, Command, ModuleCommand, Plugin, PluginKind, Role,
};
pub use infrastructure::config::Config;
