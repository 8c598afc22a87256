pub mod credentials;
pub mod error;
pub mod mock;
pub mod normalize;
pub mod orchestrator;
pub mod prompts;
pub mod store;
pub mod types;
pub mod upstream;

pub use credentials::{resolve_credential, Credential, CredentialFailure, CredentialReport};
pub use error::{BriefError, Result};
pub use mock::{mock_battlecard, mock_brief, mock_research, MockReason, DEMO_MARKER};
pub use normalize::{normalize_battlecard, normalize_brief, normalize_research, strip_fences};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use store::{BriefLog, BriefStore, MemoryBriefStore, RedbBriefStore, StoreMode};
pub use types::{Battlecard, BriefDocument, BriefRecord, Item, Opportunity, ResearchReport, Section};
pub use upstream::{GeminiClient, UpstreamClient};
