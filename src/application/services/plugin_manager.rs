//! Plugin manager - owns registered plugins and gates command dispatch

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use serde::Serialize;
use tracing::{info, warn};

use crate::application::errors::{BotError, CommandError, PluginError};
use crate::domain::entities::{Command, Plugin};

/// Manages all plugins for the bot
#[derive(Debug, Default)]
pub struct PluginManager {
    plugins: HashMap<String, Plugin>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register(&mut self, plugin: Plugin) -> Result<(), PluginError> {
        let name = plugin.name().to_string();

        if self.plugins.contains_key(&name) {
            let msg = format!("Plugin [{}] already registered", name);
            return Err(PluginError::Plugin(Some(msg)));
        }

        info!("Registering plugin: {}", name);
        self.plugins.insert(name, plugin);
        Ok(())
    }

    /// Unregister a plugin, handing it back to the caller
    pub fn unregister(&mut self, name: &str) -> Result<Plugin, PluginError> {
        let plugin = self.plugins.remove(name)
            .ok_or_else(|| PluginError::not_found(name))?;
        info!("Unregistered plugin: {}", name);
        Ok(plugin)
    }

    pub fn get(&self, name: &str) -> Result<&Plugin, PluginError> {
        self.plugins.get(name).ok_or_else(|| PluginError::not_found(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Plugin, PluginError> {
        self.plugins.get_mut(name).ok_or_else(|| PluginError::not_found(name))
    }

    pub fn enable(&mut self, name: &str) -> Result<(), PluginError> {
        self.get_mut(name)?.activate();
        info!("Enabled plugin: {}", name);
        Ok(())
    }

    pub fn disable(&mut self, name: &str) -> Result<(), PluginError> {
        self.get_mut(name)?.deactivate();
        info!("Disabled plugin: {}", name);
        Ok(())
    }

    /// Resolve a command for invocation.
    ///
    /// Fails if the plugin is unknown or disabled, or if the command is
    /// missing or deactivated.
    pub fn resolve(&self, plugin: &str, command: &str) -> Result<Arc<Command>, BotError> {
        let found = self.get(plugin).map_err(|e| {
            warn!("{}", e);
            e
        })?;

        if !found.is_enabled() {
            let err = PluginError::disabled(plugin);
            warn!("{}", err);
            return Err(err.into());
        }

        let cmd = found.match_command(command)
            .ok_or_else(|| CommandError::NotFound(command.to_string()))?;

        if !cmd.is_enabled() {
            return Err(CommandError::Disabled(cmd.qualified_name().to_string()).into());
        }

        Ok(cmd)
    }

    /// Resolve and run a command
    pub fn execute(
        &self,
        plugin: &str,
        command: &str,
        args: &[String],
    ) -> Result<String, BotError> {
        let cmd = self.resolve(plugin, command)?;
        Ok(cmd.execute(args)?)
    }

    /// List all registered plugins, sorted by name
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        let mut infos: Vec<PluginInfo> = self.plugins.values().map(PluginInfo::from).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Check if a plugin exists
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// Plugin information for listing
#[derive(Debug, Clone, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub enabled: bool,
    pub commands: Vec<CommandInfo>,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandInfo {
    pub name: String,
    pub qualified_name: String,
    pub description: Option<String>,
    pub enabled: bool,
}

impl From<&Plugin> for PluginInfo {
    fn from(plugin: &Plugin) -> Self {
        let mut commands: Vec<CommandInfo> = plugin.commands().map(|c| CommandInfo {
            name: c.name.clone(),
            qualified_name: c.qualified_name().to_string(),
            description: c.description.clone(),
            enabled: c.is_enabled(),
        }).collect();
        commands.sort_by(|a, b| a.name.cmp(&b.name));

        let mut roles: Vec<String> = plugin.roles().map(|r| r.name.clone()).collect();
        roles.sort();

        Self {
            name: plugin.name().to_string(),
            enabled: plugin.is_enabled(),
            commands,
            roles,
        }
    }
}

/// Thread-safe wrapper for PluginManager
pub type SharedPluginManager = Arc<RwLock<PluginManager>>;

/// Create a new shared plugin manager
pub fn create_plugin_manager(manager: PluginManager) -> SharedPluginManager {
    Arc::new(RwLock::new(manager))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{new_plugin, Role};

    fn weather() -> Plugin {
        new_plugin(
            "weather",
            vec![
                Command::new("forecast")
                    .with_module("Weather")
                    .with_handler(|args| Ok(format!("Sunny in {}", args.join(" ")))),
                Command::new("radar"),
            ],
            vec![Role::new("weather-admin")],
        )
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut manager = PluginManager::new();
        manager.register(weather()).unwrap();
        let err = manager.register(Plugin::new("weather")).unwrap_err();
        assert!(matches!(err, PluginError::Plugin(Some(_))));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_unknown_plugin_not_found() {
        let mut manager = PluginManager::new();
        let err = manager.get("nope").unwrap_err();
        assert_eq!(err, PluginError::not_found("nope"));
        assert!(manager.enable("nope").is_err());
        assert!(manager.unregister("nope").is_err());
    }

    #[test]
    fn test_execute_on_disabled_plugin() {
        let mut manager = PluginManager::new();
        manager.register(weather()).unwrap();
        manager.disable("weather").unwrap();

        let err = manager.execute("weather", "forecast", &[]).unwrap_err();
        match err {
            BotError::Plugin(PluginError::Disabled(Some(msg))) => assert!(msg.contains("weather")),
            other => panic!("unexpected error: {other}"),
        }

        manager.enable("weather").unwrap();
        let out = manager.execute("weather", "forecast", &["Jakarta".to_string()]).unwrap();
        assert_eq!(out, "Sunny in Jakarta");
    }

    #[test]
    fn test_execute_deactivated_command() {
        let mut manager = PluginManager::new();
        manager.register(weather()).unwrap();
        manager.get("weather").unwrap().deactivate_command(&Command::new("radar"));

        let err = manager.execute("weather", "radar", &[]).unwrap_err();
        assert!(matches!(err, BotError::Command(CommandError::Disabled(_))));

        let err = manager.execute("weather", "tides", &[]).unwrap_err();
        assert!(matches!(err, BotError::Command(CommandError::NotFound(_))));
    }

    #[test]
    fn test_list_plugins_sorted() {
        let mut manager = PluginManager::new();
        manager.register(weather()).unwrap();
        manager.register(Plugin::new("admin")).unwrap();

        let infos = manager.list_plugins();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].name, "admin");
        assert_eq!(infos[1].commands[0].qualified_name, "Weather\\forecast");
        assert_eq!(infos[1].roles, vec!["weather-admin".to_string()]);
    }

    #[test]
    fn test_execute_shared_alias_runs_same_handler() {
        for _ in 0..64 {
            let mut manager = PluginManager::new();
            manager.register(new_plugin(
                "weather",
                vec![
                    Command::new("forecast")
                        .with_aliases(vec!["f".to_string()])
                        .with_handler(|_| Ok("forecast".to_string())),
                    Command::new("flood")
                        .with_aliases(vec!["f".to_string()])
                        .with_handler(|_| Ok("flood".to_string())),
                ],
                Vec::<Role>::new(),
            )).unwrap();

            assert_eq!(manager.execute("weather", "f", &[]).unwrap(), "flood");
        }
    }

    #[test]
    fn test_shared_manager() {
        let shared = create_plugin_manager(PluginManager::new());
        shared.write().unwrap().register(weather()).unwrap();
        assert!(shared.read().unwrap().has_plugin("weather"));
    }
}
