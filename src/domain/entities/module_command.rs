use std::fmt;

/// A module name paired with a command name, rendered as `module\command`.
///
/// Only used for display and identity; plugins key commands by the bare
/// command name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleCommand {
    pub module: String,
    pub command: String,
}

impl ModuleCommand {
    pub fn new(module: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            command: command.into(),
        }
    }
}

impl fmt::Display for ModuleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\\{}", self.module, self.command)
    }
}
