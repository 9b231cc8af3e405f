use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use fnol_core::{
    ClaimAnalyzer, ClaimSubmission, ClaimWorkflow, FnolError, FnolReport, RigClaimAnalyzer,
    ServiceConfig, WebhookClient, build_fnol_prompt,
    config::{API_KEY_VAR, WEBHOOK_URL_VAR},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::models::{ErrorResponse, FnolResponse, SubmitClaimResponse};

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Error surfaced to the caller as `{"detail": ...}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn internal(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: if detail.is_empty() {
                "Internal server error".to_string()
            } else {
                detail
            },
        }
    }
}

impl From<FnolError> for ApiError {
    fn from(e: FnolError) -> Self {
        Self::internal(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Outbound backends. `None` means the backing variable was not set at startup.
#[derive(Clone, Default)]
pub struct AppState {
    pub analyzer: Option<Arc<dyn ClaimAnalyzer>>,
    pub workflow: Option<Arc<dyn ClaimWorkflow>>,
}

impl AppState {
    pub fn from_config(config: &ServiceConfig) -> fnol_core::Result<Self> {
        let analyzer: Option<Arc<dyn ClaimAnalyzer>> = match &config.api_key {
            Some(api_key) => {
                let analyzer = match &config.completion_base_url {
                    Some(base_url) => {
                        RigClaimAnalyzer::with_base_url(api_key, config.model.clone(), base_url)?
                    }
                    None => RigClaimAnalyzer::new(api_key, config.model.clone()),
                };
                info!(model = %analyzer.model(), "FNOL analysis enabled");
                Some(Arc::new(analyzer))
            }
            None => {
                warn!("{} not set, POST /fnol will fail", API_KEY_VAR);
                None
            }
        };

        let workflow: Option<Arc<dyn ClaimWorkflow>> = match &config.webhook_url {
            Some(url) => {
                let client = WebhookClient::new(url.clone(), config.webhook_timeout)?;
                info!(
                    url = %client.url(),
                    timeout_secs = config.webhook_timeout.as_secs(),
                    "Claim workflow webhook enabled"
                );
                Some(Arc::new(client))
            }
            None => {
                warn!("{} not set, POST /submit_claim will fail", WEBHOOK_URL_VAR);
                None
            }
        };

        Ok(Self { analyzer, workflow })
    }
}

pub fn create_app(config: &ServiceConfig) -> fnol_core::Result<Router> {
    Ok(build_router(AppState::from_config(config)?))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/fnol", post(analyze_fnol))
        .route("/submit_claim", post(submit_claim))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(correlation_id_middleware))
        .with_state(app_state)
}

/// Middleware to add correlation ID to all requests
async fn correlation_id_middleware(mut request: Request<axum::body::Body>, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    let header_value =
        HeaderValue::from_str(&correlation_id).expect("UUID is a valid header value");

    request
        .headers_mut()
        .insert(CORRELATION_ID_HEADER, header_value.clone());

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);

    let mut response = next.run(request).instrument(span).await;
    response
        .headers_mut()
        .insert(CORRELATION_ID_HEADER, header_value);
    response
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "FNOL Assistant Backend",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "First Notice of Loss intake: LLM claim summaries and workflow webhook submission",
        "endpoints": {
            "POST /fnol": "Summarize an FNOL report with the completion backend",
            "POST /submit_claim": "Forward a claim to the workflow webhook",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn analyze_fnol(
    State(state): State<AppState>,
    payload: Result<Json<FnolReport>, JsonRejection>,
) -> ApiResult<FnolResponse> {
    let Json(report) = payload.inspect_err(|e| warn!(error = %e, "Rejected FNOL report"))?;

    info!(
        location = %report.location,
        image_count = report.images.len(),
        "Processing FNOL report"
    );

    let analyzer = state
        .analyzer
        .as_ref()
        .ok_or(FnolError::NotConfigured(API_KEY_VAR))?;

    let prompt = build_fnol_prompt(&report);
    let fnol_summary = analyzer.summarize(&prompt).await.map_err(|e| {
        error!(error = %e, "FNOL analysis failed");
        ApiError::from(e)
    })?;

    info!(summary_length = fnol_summary.len(), "FNOL report summarized");

    Ok(Json(FnolResponse {
        original_data: report,
        fnol_summary,
    }))
}

async fn submit_claim(
    State(state): State<AppState>,
    payload: Result<Json<ClaimSubmission>, JsonRejection>,
) -> ApiResult<SubmitClaimResponse> {
    let Json(claim) = payload.inspect_err(|e| warn!(error = %e, "Rejected claim submission"))?;

    info!(
        incident_type = %claim.incident_type,
        injuries = claim.injuries,
        third_party_involved = claim.third_party_involved,
        "Processing claim submission"
    );

    let workflow = state
        .workflow
        .as_ref()
        .ok_or(FnolError::NotConfigured(WEBHOOK_URL_VAR))?;

    let outcome = workflow.submit(&claim).await.map_err(|e| {
        error!(error = %e, "Claim workflow submission failed");
        ApiError::from(e)
    })?;

    Ok(Json(SubmitClaimResponse {
        original_data: claim,
        recommendations: outcome.recommendations,
        workflow_response: outcome.raw,
    }))
}
