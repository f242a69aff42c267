//! Conversation Driver
//!
//! Runs one bounded conversation over a validated [`Chain`]. Turns are strictly
//! sequential: each model call sees the full log produced so far, and the next
//! speaker is the current role's configured successor. A conversation ends when
//! a role emits the termination token or when the turn budget is spent; the
//! latter is a normal completion, not an error.

use crate::{
    chain::{Chain, RoleId},
    llm_client::{ModelClient, UpstreamError},
    role::Message,
};
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

/// Default per-turn budget for a single model call.
pub const DEFAULT_TURN_TIMEOUT: Duration = Duration::from_secs(60);

/// Mutable state of a single in-flight conversation.
///
/// Created per request and dropped when the request finishes.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub log: Vec<Message>,
    pub current_role: RoleId,
    pub turns_taken: usize,
}

impl ConversationState {
    pub fn new(entry: RoleId, seed: Message) -> Self {
        Self {
            log: vec![seed],
            current_role: entry,
            turns_taken: 0,
        }
    }

    /// The most recent message in the log; the seed if no turn has run yet.
    pub fn last(&self) -> &Message {
        // The log always holds at least the seed.
        &self.log[self.log.len() - 1]
    }
}

/// How a conversation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A role emitted the termination token.
    Terminated,
    /// The turn budget ran out.
    TurnLimit,
}

/// Drives conversations over a shared, read-only chain.
#[derive(Clone)]
pub struct ConversationDriver {
    chain: Arc<Chain>,
    client: Arc<dyn ModelClient>,
    turn_timeout: Duration,
}

impl ConversationDriver {
    pub fn new(chain: Arc<Chain>, client: Arc<dyn ModelClient>) -> Self {
        Self {
            chain,
            client,
            turn_timeout: DEFAULT_TURN_TIMEOUT,
        }
    }

    pub fn with_turn_timeout(mut self, turn_timeout: Duration) -> Self {
        self.turn_timeout = turn_timeout;
        self
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Runs a conversation and returns its final message.
    ///
    /// `entry` must come from this driver's chain.
    pub async fn run(
        &self,
        entry: RoleId,
        seed: Message,
        max_turns: usize,
    ) -> Result<Message, UpstreamError> {
        let (state, _) = self.run_to_end(entry, seed, max_turns).await?;
        Ok(state.last().clone())
    }

    /// Runs a conversation and returns the whole state along with how it ended.
    pub async fn run_to_end(
        &self,
        entry: RoleId,
        seed: Message,
        max_turns: usize,
    ) -> Result<(ConversationState, Outcome), UpstreamError> {
        let mut state = ConversationState::new(entry, seed);

        while state.turns_taken < max_turns {
            let role = self.chain.role(state.current_role);
            debug!(role = %role.name, turn = state.turns_taken + 1, "Invoking role");

            let content = tokio::time::timeout(
                self.turn_timeout,
                self.client.complete(role, &state.log),
            )
            .await
            .map_err(|_| UpstreamError::Timeout(self.turn_timeout))??;

            let message = Message::new(role.name.clone(), content);
            let terminal = role.is_terminal(&message);
            state.log.push(message);
            state.turns_taken += 1;

            info!(
                role = %role.name,
                turn = state.turns_taken,
                chars = state.last().content.len(),
                terminal,
                "Turn complete"
            );

            if terminal {
                return Ok((state, Outcome::Terminated));
            }

            state.current_role = self.chain.table().next(state.current_role);
        }

        if max_turns > 0 {
            warn!(max_turns, "Conversation reached the turn limit without terminating");
        }
        Ok((state, Outcome::TurnLimit))
    }
}
