pub mod chain;
pub mod concept;
pub mod conversation;
pub mod llm_client;
pub mod role;

pub use chain::{Chain, ChainConfig, ConfigurationError, RoleId};
pub use concept::{ConceptError, resolve};
pub use conversation::{ConversationDriver, ConversationState, Outcome};
pub use llm_client::{ModelClient, OpenAICompatibleClient, UpstreamError};
pub use role::{Message, Role};
