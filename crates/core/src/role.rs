/// A named step in the agent chain.
///
/// The instruction is handed verbatim to the model collaborator as the system
/// prompt for this role's turns. The termination token is shared by every role
/// in a chain and is matched as a case-sensitive substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    pub instruction: String,
    pub termination_token: String,
}

impl Role {
    /// Creates a new role.
    pub fn new(
        name: impl Into<String>,
        instruction: impl Into<String>,
        termination_token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            termination_token: termination_token.into(),
        }
    }

    /// Checks whether a message produced by this role ends the conversation.
    pub fn is_terminal(&self, message: &Message) -> bool {
        message.content.contains(self.termination_token.as_str())
    }
}

/// One entry in a conversation log.
///
/// `sender` is the name of the role that produced the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: String,
    pub content: String,
}

impl Message {
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> Role {
        Role::new("output_formatter", "Format things.", "TERMINATE")
    }

    #[test]
    fn test_terminal_when_token_present() {
        let role = formatter();
        let msg = Message::new("output_formatter", "All done. TERMINATE");
        assert!(role.is_terminal(&msg));
    }

    #[test]
    fn test_terminal_token_anywhere_in_content() {
        let role = formatter();
        let msg = Message::new("output_formatter", "xxTERMINATEyy\nmore text");
        assert!(role.is_terminal(&msg));
    }

    #[test]
    fn test_terminal_match_is_case_sensitive() {
        let role = formatter();
        assert!(!role.is_terminal(&Message::new("output_formatter", "terminate")));
        assert!(!role.is_terminal(&Message::new("output_formatter", "Terminate now")));
    }

    #[test]
    fn test_not_terminal_without_token() {
        let role = formatter();
        assert!(!role.is_terminal(&Message::new("output_formatter", "")));
        assert!(!role.is_terminal(&Message::new("output_formatter", "TERMINAT")));
    }
}
