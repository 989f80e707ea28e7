//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::application::services::PluginManager;
use crate::domain::entities::{new_plugin, Command, Plugin, Role};

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginConfig {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
    #[serde(default)]
    pub roles: Vec<RoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandConfig {
    pub name: String,
    pub module: Option<String>,
    pub description: Option<String>,
    pub usage: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleConfig {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "carik-bot".to_string(),
            },
            plugins: vec![PluginConfig {
                name: "weather".to_string(),
                enabled: true,
                commands: vec![CommandConfig {
                    name: "forecast".to_string(),
                    module: Some("Weather".to_string()),
                    description: Some("Show the forecast".to_string()),
                    usage: Some("/forecast <city>".to_string()),
                    aliases: vec!["fc".to_string()],
                    permissions: vec!["weather:read".to_string()],
                    enabled: true,
                }],
                roles: vec![RoleConfig {
                    name: "weather-admin".to_string(),
                    description: Some("Manage weather plugin".to_string()),
                    permissions: vec!["weather:read".to_string(), "weather:write".to_string()],
                }],
            }],
        }
    }
}

impl CommandConfig {
    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.name).with_aliases(self.aliases.clone());
        if let Some(module) = &self.module {
            cmd = cmd.with_module(module);
        }
        if let Some(desc) = &self.description {
            cmd = cmd.with_description(desc);
        }
        if let Some(usage) = &self.usage {
            cmd = cmd.with_usage(usage);
        }
        for permission in &self.permissions {
            cmd = cmd.with_permission(permission);
        }
        if !self.enabled {
            cmd.deactivate();
        }
        cmd
    }
}

impl RoleConfig {
    fn to_role(&self) -> Role {
        let mut role = Role::new(&self.name);
        if let Some(desc) = &self.description {
            role = role.with_description(desc);
        }
        for permission in &self.permissions {
            role = role.with_permission(permission);
        }
        role
    }
}

impl PluginConfig {
    /// Build the plugin; duplicate command or role names keep the first entry
    pub fn to_plugin(&self) -> Plugin {
        let mut plugin = new_plugin(
            &self.name,
            self.commands.iter().map(CommandConfig::to_command),
            self.roles.iter().map(RoleConfig::to_role),
        );
        if !self.enabled {
            plugin.deactivate();
        }
        plugin
    }

    fn check_command_keys(&self) -> Result<(), ConfigError> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for command in &self.commands {
            // Repeated entries for one name collapse to the first, so only
            // keys owned by a different name count as a collision.
            let keys = std::iter::once(&command.name).chain(command.aliases.iter());
            for key in keys {
                let key = key.to_lowercase();
                match seen.get(&key) {
                    Some(owner) if *owner != command.name => {
                        return Err(ConfigError::InvalidValue(format!(
                            "plugins[{}]: '{}' is used by both {} and {}",
                            self.name, key, owner, command.name
                        )));
                    }
                    Some(_) => {}
                    None => {
                        seen.insert(key, &command.name);
                    }
                }
            }
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(name) = std::env::var("BOT_NAME") {
            config.bot.name = name;
        }

        config
    }

    /// Reject empty names and command names or aliases that collide
    /// case-insensitively across different commands of one plugin
    pub fn validate(&self) -> Result<(), ConfigError> {
        for plugin in &self.plugins {
            if plugin.name.trim().is_empty() {
                return Err(ConfigError::MissingField("plugins[].name".to_string()));
            }
            if plugin.commands.iter().any(|c| c.name.trim().is_empty()) {
                let field = format!("plugins[{}].commands[].name", plugin.name);
                return Err(ConfigError::MissingField(field));
            }
            if plugin.roles.iter().any(|r| r.name.trim().is_empty()) {
                let field = format!("plugins[{}].roles[].name", plugin.name);
                return Err(ConfigError::MissingField(field));
            }
            plugin.check_command_keys()?;
        }
        Ok(())
    }

    /// Build a manager holding every configured plugin
    pub fn build_manager(&self) -> Result<PluginManager, ConfigError> {
        let mut manager = PluginManager::new();
        for plugin in &self.plugins {
            manager.register(plugin.to_plugin())
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }
        Ok(manager)
    }
}
