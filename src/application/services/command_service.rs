use crate::domain::entities::{Command, CommandDefinition, CommandRegistry, InteractionEvent};

/// Service for managing and answering slash commands
pub struct CommandService {
    registry: CommandRegistry,
}

impl CommandService {
    pub fn new() -> Self {
        Self {
            registry: CommandRegistry::new(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self) {
        self.register(Command::fixed("hello", "Hello command", "Hello from Bot!"));
    }

    /// Definitions to declare to the platform at startup
    pub fn definitions(&self) -> Vec<CommandDefinition> {
        self.registry.all().map(|c| c.definition.clone()).collect()
    }

    /// Reply for an interaction, or None when the command is unknown
    pub fn handle(&self, interaction: &InteractionEvent) -> Option<String> {
        self.registry
            .get(&interaction.command)
            .map(|cmd| (cmd.handler)(interaction))
    }
}

impl Default for CommandService {
    fn default() -> Self {
        let mut service = Self::new();
        service.register_defaults();
        service
    }
}
