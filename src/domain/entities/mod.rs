//! Domain entities - Core business objects

pub mod command;
pub mod module_command;
pub mod plugin;
pub mod role;

pub use command::{Command, CommandHandler};
pub use module_command::ModuleCommand;
pub use plugin::{add_command_to_plugin, new_plugin, Plugin, PluginKind};
pub use role::Role;
