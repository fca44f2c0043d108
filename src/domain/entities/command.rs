use serde::Serialize;
use std::collections::BTreeMap;

/// A remotely invokable command as declared to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
}

impl CommandDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Represents a slash command together with its fixed reply
pub struct Command {
    pub definition: CommandDefinition,
    pub handler: CommandHandler,
}

/// Command handler function type
pub type CommandHandler = Box<dyn Fn(&crate::domain::entities::InteractionEvent) -> String + Send + Sync>;

impl Command {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&crate::domain::entities::InteractionEvent) -> String + Send + Sync + 'static,
    {
        Self {
            definition: CommandDefinition::new(name, description),
            handler: Box::new(handler),
        }
    }

    /// Command that always replies with the same text
    pub fn fixed(
        name: impl Into<String>,
        description: impl Into<String>,
        reply: impl Into<String>,
    ) -> Self {
        let reply = reply.into();
        Self::new(name, description, move |_| reply.clone())
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Command registry keyed by exact command name
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name().to_string(), command);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{InteractionEvent, User};

    #[test]
    fn fixed_command_replies_with_its_text() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::fixed("hello", "Hello command", "hi"));

        let event = InteractionEvent::new("1", "t", "c", User::new("u"), "hello");
        let cmd = registry.get("hello").unwrap();
        assert!(registry.get("Hello").is_none());
        assert_eq!((cmd.handler)(&event), "hi");
        assert_eq!(registry.all().count(), 1);
    }

    #[test]
    fn registering_same_name_replaces() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::fixed("hello", "a", "one"));
        registry.register(Command::fixed("hello", "b", "two"));
        assert_eq!(registry.all().count(), 1);
        assert_eq!(registry.get("hello").unwrap().definition.description, "b");
    }
}
