//! Plugin - a named, enable/disable-able bundle of commands and roles
//!
//! Registration is first-wins: adding a command or role under a name that is
//! already taken is ignored. Removing, activating or deactivating something
//! that is not registered is a no-op.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::{Command, Role};

/// Supplies the default name for a kind of plugin
pub trait PluginKind {
    const NAME: &'static str;
}

/// Registry of a plugin's commands and roles plus its enabled flag
#[derive(Debug)]
pub struct Plugin {
    name: String,
    enabled: bool,
    commands: HashMap<String, Arc<Command>>,
    roles: HashMap<String, Arc<Role>>,
}

impl PluginKind for Plugin {
    const NAME: &'static str = "Plugin";
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            commands: HashMap::new(),
            roles: HashMap::new(),
        }
    }

    /// Create a plugin named after its kind
    pub fn of<K: PluginKind>() -> Self {
        Self::new(K::NAME)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn activate(&mut self) {
        self.enabled = true;
    }

    pub fn deactivate(&mut self) {
        self.enabled = false;
    }

    // ─── Commands ────────────────────────────────────────────────

    /// Look up the stored command with the same name as `command`.
    /// The module qualifier is not part of the key.
    pub fn find_command(&self, command: &Command) -> Option<Arc<Command>> {
        self.command(&command.name)
    }

    pub fn command(&self, name: &str) -> Option<Arc<Command>> {
        self.commands.get(name).cloned()
    }

    /// Find a command by name or alias, ignoring case.
    ///
    /// An exact name wins. Otherwise, when several commands match, the one
    /// with the lowest name is picked.
    pub fn match_command(&self, input: &str) -> Option<Arc<Command>> {
        if let Some(cmd) = self.command(input) {
            return Some(cmd);
        }
        let mut matches: Vec<&Arc<Command>> =
            self.commands.values().filter(|c| c.matches(input)).collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        if matches.len() > 1 {
            debug!(
                "Plugin {}: {} matches {} commands, using {}",
                self.name,
                input,
                matches.len(),
                matches[0].name
            );
        }
        matches.first().map(|c| Arc::clone(c))
    }

    pub fn add_command(&mut self, command: impl Into<Arc<Command>>) {
        let command = command.into();
        if self.commands.contains_key(&command.name) {
            debug!(
                "Plugin {}: command {} already registered, ignoring",
                self.name, command.name
            );
            return;
        }
        debug!("Plugin {}: added command {}", self.name, command.qualified_name());
        self.commands.insert(command.name.clone(), command);
    }

    pub fn remove_command(&mut self, command: &Command) -> Option<Arc<Command>> {
        let removed = self.commands.remove(&command.name);
        if removed.is_some() {
            debug!("Plugin {}: removed command {}", self.name, command.name);
        }
        removed
    }

    /// Activate the stored command. Unknown commands are ignored.
    pub fn activate_command(&self, command: &Command) {
        match self.find_command(command) {
            Some(stored) => stored.activate(),
            None => debug!("Plugin {}: no command {} to activate", self.name, command.name),
        }
    }

    /// Deactivate the stored command. Unknown commands are ignored.
    pub fn deactivate_command(&self, command: &Command) {
        match self.find_command(command) {
            Some(stored) => stored.deactivate(),
            None => debug!("Plugin {}: no command {} to deactivate", self.name, command.name),
        }
    }

    pub fn commands(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.values()
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    // ─── Roles ───────────────────────────────────────────────────

    pub fn find_role(&self, role: &Role) -> Option<Arc<Role>> {
        self.role(&role.name)
    }

    pub fn role(&self, name: &str) -> Option<Arc<Role>> {
        self.roles.get(name).cloned()
    }

    pub fn add_role(&mut self, role: impl Into<Arc<Role>>) {
        let role = role.into();
        if self.roles.contains_key(&role.name) {
            debug!(
                "Plugin {}: role {} already registered, ignoring",
                self.name, role.name
            );
            return;
        }
        debug!("Plugin {}: added role {}", self.name, role.name);
        self.roles.insert(role.name.clone(), role);
    }

    pub fn add_roles<R>(&mut self, roles: impl IntoIterator<Item = R>)
    where
        R: Into<Arc<Role>>,
    {
        for role in roles {
            self.add_role(role);
        }
    }

    pub fn remove_role(&mut self, role: &Role) -> Option<Arc<Role>> {
        let removed = self.roles.remove(&role.name);
        if removed.is_some() {
            debug!("Plugin {}: removed role {}", self.name, role.name);
        }
        removed
    }

    pub fn remove_roles<'a>(&mut self, roles: impl IntoIterator<Item = &'a Role>) {
        for role in roles {
            self.remove_role(role);
        }
    }

    pub fn roles(&self) -> impl Iterator<Item = &Arc<Role>> {
        self.roles.values()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

impl Default for Plugin {
    fn default() -> Self {
        Self::of::<Plugin>()
    }
}

/// Build a plugin and register the given commands and roles in order
pub fn new_plugin<C, R>(
    name: impl Into<String>,
    commands: impl IntoIterator<Item = C>,
    roles: impl IntoIterator<Item = R>,
) -> Plugin
where
    C: Into<Arc<Command>>,
    R: Into<Arc<Role>>,
{
    let mut plugin = Plugin::new(name);
    for command in commands {
        plugin.add_command(command);
    }
    plugin.add_roles(roles);
    plugin
}

/// Add a command to a plugin, returning the plugin for chaining
pub fn add_command_to_plugin(
    plugin: &mut Plugin,
    command: impl Into<Arc<Command>>,
) -> &mut Plugin {
    plugin.add_command(command);
    plugin
}
