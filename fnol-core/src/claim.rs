use serde::{Deserialize, Deserializer, Serialize};

/// A photo or document attached to a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimImage {
    #[serde(alias = "name")]
    pub filename: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl ClaimImage {
    /// The URL when a non-empty one was uploaded, the bare file name otherwise
    pub fn reference(&self) -> &str {
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.filename)
    }
}

/// Report accepted by `POST /fnol` and summarized by the completion backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnolReport {
    pub date: String,
    pub location: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<ClaimImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party_involved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<bool>,
}

/// Claim accepted by `POST /submit_claim` and forwarded to the workflow webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub incident_type: String,
    pub date: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub third_party_involved: bool,
    #[serde(default)]
    pub injuries: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<ClaimImage>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ClaimImage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ClaimImage>>::deserialize(deserializer)?.unwrap_or_default())
}
