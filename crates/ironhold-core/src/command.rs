//! Command abstractions.

use uuid::Uuid;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;
}

/// A single free-text player action, resolved as exactly one turn.
#[derive(Debug, Clone)]
pub struct PlayerAction {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The raw text the player typed.
    pub text: String,
}

impl PlayerAction {
    /// Wraps raw player input in a command with a fresh correlation ID.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            text: text.into(),
        }
    }

    /// Case-folded copy of the input, the form every keyword rule matches against.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.text.to_lowercase()
    }
}

impl Command for PlayerAction {
    fn command_type(&self) -> &'static str {
        "turn.player_action"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
