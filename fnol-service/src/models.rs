use fnol_core::{ClaimSubmission, FnolReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct FnolResponse {
    pub original_data: FnolReport,
    pub fnol_summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitClaimResponse {
    pub original_data: ClaimSubmission,
    pub recommendations: Value,
    pub workflow_response: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
