use thiserror::Error;

#[derive(Error, Debug)]
pub enum FnolError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} not set")]
    NotConfigured(&'static str),

    #[error("Completion request failed: {0}")]
    Completion(String),

    #[error("Webhook request failed: {0}")]
    Webhook(#[from] reqwest::Error),

    #[error("Webhook responded with status {status}: {body}")]
    WebhookStatus { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, FnolError>;
