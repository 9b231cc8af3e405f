pub mod models;
pub mod service;

pub use models::*;
pub use service::{ApiError, AppState, CORRELATION_ID_HEADER, build_router, create_app};
