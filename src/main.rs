use clap::{Parser, Subcommand};
use std::process::ExitCode;

use carik_plugins::{BotError, Config, PluginManager};

#[derive(Parser)]
#[command(name = "carik-plugins")]
#[command(about = "Inspect and exercise carik-bot plugins", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "plugins.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered plugins
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a plugin's commands and roles
    Show {
        plugin: String,
    },
    /// Invoke a command of a plugin
    Invoke {
        plugin: String,
        command: String,
        args: Vec<String>,
    },
    /// Generate default config
    InitConfig,
    /// Show version
    Version,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { json } => load_manager(&cli.config).and_then(|m| list(&m, json)),
        Commands::Show { plugin } => load_manager(&cli.config).and_then(|m| show(&m, &plugin)),
        Commands::Invoke { plugin, command, args } => load_manager(&cli.config)
            .and_then(|m| m.execute(&plugin, &command, &args))
            .map(|out| println!("{}", out)),
        Commands::InitConfig => init_config(),
        Commands::Version => {
            println!("carik-plugins v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_manager(config_path: &str) -> Result<PluginManager, BotError> {
    let config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        tracing::warn!("Config {} not found, using defaults", config_path);
        Config::load_env()
    };

    tracing::info!("Loading plugins for {}", config.bot.name);
    let manager = config.build_manager()?;
    tracing::info!("Plugin system initialized with {} plugins", manager.len());
    Ok(manager)
}

fn list(manager: &PluginManager, json: bool) -> Result<(), BotError> {
    let infos = manager.list_plugins();
    if json {
        let out = serde_json::to_string_pretty(&infos)
            .map_err(|e| BotError::Serialization(format!("Failed to serialize plugins: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    for info in infos {
        let state = if info.enabled { "enabled" } else { "disabled" };
        println!(
            "{} ({}) - {} commands, {} roles",
            info.name,
            state,
            info.commands.len(),
            info.roles.len()
        );
    }
    Ok(())
}

fn show(manager: &PluginManager, name: &str) -> Result<(), BotError> {
    let plugin = manager.get(name)?;
    let state = if plugin.is_enabled() { "enabled" } else { "disabled" };
    println!("Plugin: {} ({})", plugin.name(), state);

    let mut commands: Vec<_> = plugin.commands().collect();
    commands.sort_by(|a, b| a.name.cmp(&b.name));
    println!("Commands:");
    for cmd in commands {
        let flag = if cmd.is_enabled() { "" } else { " [disabled]" };
        let description = cmd.description.as_deref().unwrap_or("");
        println!("  {} - {}{}", cmd.qualified_name(), description, flag);
        if let Some(usage) = &cmd.usage {
            println!("      Usage: {}", usage);
        }
    }

    let mut roles: Vec<_> = plugin.roles().collect();
    roles.sort_by(|a, b| a.name.cmp(&b.name));
    println!("Roles:");
    for role in roles {
        println!("  {} [{}]", role, role.permissions.join(", "));
    }
    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| BotError::Serialization(format!("Failed to serialize config: {}", e)))?;
    println!("{}", yaml);
    println!("\nSave this to plugins.yaml and adjust as needed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_and_init_config_succeed() {
        let manager = Config::default().build_manager().unwrap();
        assert!(list(&manager, true).is_ok());
        assert!(list(&manager, false).is_ok());
        assert!(init_config().is_ok());
    }

    #[test]
    fn test_show_unknown_plugin_fails() {
        let manager = Config::default().build_manager().unwrap();
        assert!(matches!(show(&manager, "news"), Err(BotError::Plugin(_))));
    }
}
