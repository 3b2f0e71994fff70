/// Commands the session understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to the catalog molecule with this id.
    SelectMolecule(String),
    /// Click on an orbital.
    Toggle(String),
    Undo,
    AutoFill,
    Check,
    /// Ask for a hint about the current configuration.
    RequestHint,
    /// Ask for a hint comparing these catalog species.
    RequestComparisonHint(Vec<String>),
}

/// A queue of commands.
/// The UI pushes commands; the session drains them each tick.
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Drain all pending commands. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
