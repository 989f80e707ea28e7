pub mod plugin_manager;

pub use plugin_manager::{create_plugin_manager, PluginInfo, PluginManager, SharedPluginManager};
