//! Agent Chain Definition
//!
//! A chain is a fixed set of roles plus a transition table that says which
//! role speaks after which. The chain is described by a plain [`ChainConfig`]
//! and validated once into an immutable [`Chain`]; every later lookup goes
//! through [`RoleId`] handles that only the validated chain hands out.

use crate::role::{Message, Role};
use std::collections::HashMap;
use tracing::debug;

/// Substring that ends a conversation early when a role emits it.
pub const TERMINATION_TOKEN: &str = "TERMINATE";

/// Number of model turns a single explanation request may take.
pub const DEFAULT_MAX_TURNS: usize = 6;

/// Errors raised while validating a [`ChainConfig`]. All of them are fatal.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("agent chain has no roles")]
    EmptyChain,
    #[error("role '{0}' is declared more than once")]
    DuplicateRole(String),
    #[error("transition table references unknown role '{0}'")]
    UnknownRole(String),
    #[error("role '{0}' has no allowed successor")]
    MissingSuccessor(String),
    #[error("role '{0}' has more than one allowed successor")]
    Branching(String),
    #[error("transition table does not cycle through all {expected} roles from '{entry}'")]
    NotACycle { entry: String, expected: usize },
    #[error("termination token must not be empty")]
    EmptyTerminationToken,
}

/// Declarative description of a chain, before validation.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// `(name, instruction)` pairs. Order is informational only.
    pub roles: Vec<(String, String)>,
    /// Source role name mapped to its ordered allowed successors.
    pub transitions: Vec<(String, Vec<String>)>,
    pub entry: String,
    pub termination_token: String,
    pub max_turns: usize,
}

impl ChainConfig {
    /// The six-step ML explainer: identify, explain, analogize, exemplify,
    /// visualize, format, then loop back to identify.
    pub fn ml_explainer() -> Self {
        let roles = [
            (
                "concept_identifier",
                "Identify the most relevant ML or mathematical concept based on user input. Example: If input involves categorization, select Decision Trees.",
            ),
            (
                "concept_explainer",
                "Explain the identified concept in a simple way so that a 6th-grade student can understand it. Use relatable analogies.",
            ),
            (
                "user_input_collector",
                "Explain the identified ML concept using food-based analogies to make it fun and relatable for a 6th-grade student. \
                 For example, use pizzas to explain Decision Trees, fruit grouping for Clustering, sandwich layers for Neural Networks, \
                 cookie baking for Supervised Learning, and cooking experiments for Reinforcement Learning. \
                 Ensure the explanation is simple, engaging, and interactive.",
            ),
            (
                "example_generator",
                "Generate an example based on the identified concept and the user's favorite dish. Ensure the example is easy to understand and fun.",
            ),
            (
                "visualization_agent",
                "Create a visually appealing diagram or chart to illustrate the concept. Use Matplotlib, Graphviz, or another tool for clarity.",
            ),
            (
                "output_formatter",
                "Combine the concept explanation, user input, generated example, and visual representation into a single section with a structured and engaging layout.",
            ),
        ];

        let names: Vec<&str> = roles.iter().map(|(name, _)| *name).collect();
        let transitions = names
            .iter()
            .enumerate()
            .map(|(i, from)| {
                let to = names[(i + 1) % names.len()];
                (from.to_string(), vec![to.to_string()])
            })
            .collect();

        Self {
            roles: roles
                .iter()
                .map(|(name, instruction)| (name.to_string(), instruction.to_string()))
                .collect(),
            transitions,
            entry: "concept_explainer".to_string(),
            termination_token: TERMINATION_TOKEN.to_string(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Replaces the instruction of every role named in `prompts`.
    ///
    /// Returns the keys that did not match any role.
    pub fn override_instructions(&mut self, prompts: &HashMap<String, String>) -> Vec<String> {
        let mut unmatched = Vec::new();
        for (name, prompt) in prompts {
            match self.roles.iter_mut().find(|(role, _)| role == name) {
                Some((_, instruction)) => {
                    debug!(role = %name, "Overriding role instruction");
                    *instruction = prompt.trim().to_string();
                }
                None => unmatched.push(name.clone()),
            }
        }
        unmatched.sort();
        unmatched
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::ml_explainer()
    }
}

/// Stable handle to a role inside a validated [`Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(usize);

/// Allowed-speaker graph. Every role has exactly one successor and the
/// successors form a single cycle over all roles.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    successors: Vec<Vec<RoleId>>,
}

impl TransitionTable {
    /// Ordered successors of `role`. Holds exactly one entry for a built chain.
    pub fn allowed_next(&self, role: RoleId) -> &[RoleId] {
        &self.successors[role.0]
    }

    /// The configured successor, i.e. the first allowed one.
    pub fn next(&self, role: RoleId) -> RoleId {
        self.successors[role.0][0]
    }

    /// Steps needed to walk from `from` back to itself along first successors.
    pub fn cycle_length(&self, from: RoleId) -> Option<usize> {
        let mut current = from;
        for step in 1..=self.successors.len() {
            current = self.next(current);
            if current == from {
                return Some(step);
            }
        }
        None
    }
}

/// A validated, read-only agent chain.
#[derive(Debug, Clone)]
pub struct Chain {
    roles: Vec<Role>,
    table: TransitionTable,
    entry: RoleId,
    max_turns: usize,
}

impl Chain {
    /// Validates `config` and builds the chain.
    pub fn build(config: ChainConfig) -> Result<Self, ConfigurationError> {
        if config.roles.is_empty() {
            return Err(ConfigurationError::EmptyChain);
        }
        if config.termination_token.is_empty() {
            return Err(ConfigurationError::EmptyTerminationToken);
        }

        let mut index: HashMap<String, RoleId> = HashMap::new();
        let mut roles = Vec::with_capacity(config.roles.len());
        for (i, (name, instruction)) in config.roles.into_iter().enumerate() {
            if index.insert(name.clone(), RoleId(i)).is_some() {
                return Err(ConfigurationError::DuplicateRole(name));
            }
            roles.push(Role::new(name, instruction, config.termination_token.clone()));
        }

        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| ConfigurationError::UnknownRole(name.to_string()))
        };

        let mut successors: Vec<Vec<RoleId>> = vec![Vec::new(); roles.len()];
        for (from, targets) in &config.transitions {
            let from_id = lookup(from.as_str())?;
            for to in targets {
                let to_id = lookup(to.as_str())?;
                let slot = &mut successors[from_id.0];
                if !slot.contains(&to_id) {
                    slot.push(to_id);
                }
            }
        }

        if let Some(i) = successors.iter().position(Vec::is_empty) {
            return Err(ConfigurationError::MissingSuccessor(roles[i].name.clone()));
        }
        if let Some(i) = successors.iter().position(|next| next.len() > 1) {
            return Err(ConfigurationError::Branching(roles[i].name.clone()));
        }

        let entry = lookup(config.entry.as_str())?;
        let table = TransitionTable { successors };

        if table.cycle_length(entry) != Some(roles.len()) {
            return Err(ConfigurationError::NotACycle {
                entry: config.entry,
                expected: roles.len(),
            });
        }

        Ok(Self {
            roles,
            table,
            entry,
            max_turns: config.max_turns,
        })
    }

    pub fn role(&self, id: RoleId) -> &Role {
        &self.roles[id.0]
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Resolves a role by name. Intended for setup and tests, not per-request use.
    pub fn role_id(&self, name: &str) -> Option<RoleId> {
        self.roles.iter().position(|r| r.name == name).map(RoleId)
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn allowed_next(&self, id: RoleId) -> &[RoleId] {
        self.table.allowed_next(id)
    }

    pub fn entry(&self) -> RoleId {
        self.entry
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Builds the opening message for a resolved concept, authored by the entry role.
    pub fn seed_message(&self, concept: &str) -> Message {
        Message::new(
            self.role(self.entry).name.clone(),
            format!("Explain ML concept: {}", concept),
        )
    }
}
