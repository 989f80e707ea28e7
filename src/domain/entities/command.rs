use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use super::ModuleCommand;
use crate::application::errors::CommandError;

/// Command handler function type
pub type CommandHandler = Box<dyn Fn(&[String]) -> Result<String, CommandError> + Send + Sync>;

/// Represents a bot command
///
/// A command owns its own activation state. Plugins hold it behind an `Arc`,
/// so toggling it through any handle is seen by every other holder.
pub struct Command {
    pub name: String,
    pub module: Option<String>,
    pub description: Option<String>,
    pub aliases: Vec<String>,
    pub usage: Option<String>,
    pub handler: Option<CommandHandler>,
    pub permissions: Vec<String>,
    enabled: AtomicBool,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
            description: None,
            aliases: Vec::new(),
            usage: None,
            handler: None,
            permissions: Vec::new(),
            enabled: AtomicBool::new(true),
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[String]) -> Result<String, CommandError> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        let input_lower = input.to_lowercase();
        self.name.to_lowercase() == input_lower
            || self.aliases.iter().any(|a| a.to_lowercase() == input_lower)
    }

    /// Module-qualified identity, e.g. `Weather\forecast`
    pub fn qualified_name(&self) -> ModuleCommand {
        ModuleCommand::new(self.module.clone().unwrap_or_default(), self.name.clone())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn activate(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    pub fn deactivate(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Run the handler. Activation is checked by the caller.
    pub fn execute(&self, args: &[String]) -> Result<String, CommandError> {
        match &self.handler {
            Some(handler) => handler(args),
            None => Ok(format!("Command {} not implemented", self.name)),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("description", &self.description)
            .field("aliases", &self.aliases)
            .field("usage", &self.usage)
            .field("handler", &self.handler.is_some())
            .field("permissions", &self.permissions)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
