pub mod analyzer;
pub mod claim;
pub mod config;
pub mod error;
pub mod prompt;
pub mod webhook;

// Re-export commonly used types
pub use analyzer::{ClaimAnalyzer, RigClaimAnalyzer};
pub use claim::{ClaimImage, ClaimSubmission, FnolReport};
pub use config::ServiceConfig;
pub use error::{FnolError, Result};
pub use prompt::build_fnol_prompt;
pub use webhook::{ClaimWorkflow, NO_RECOMMENDATIONS, WebhookClient, WorkflowOutcome};
