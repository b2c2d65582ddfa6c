//! HTTP REST API routes

mod roll;
mod simulate;

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use dc_core::{ConditionKind, ConditionValue, DiceError, DiceRoll, RollCondition};

use crate::config::AppConfig;
use crate::state::AppState;

/// Handler error: status plus a plain-text message body
pub type ApiError = (StatusCode, String);

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(health_check))
        .route("/api/roll", post(roll::roll_dice))
        .route("/api/simulate", post(simulate::simulate));

    let app = match &state.config.static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            api.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => api,
    };

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Condition as sent by the front end
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionRequest {
    /// Kind name or index, e.g. `"sumEquals"` or `"0"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Target value
    pub value: i64,
    /// Number of matching dice, for `countMatching`
    #[serde(default)]
    pub count: Option<i64>,
}

impl ConditionRequest {
    fn to_condition(&self) -> Result<RollCondition, ApiError> {
        let kind: ConditionKind = self.kind.parse().map_err(|_| {
            bad_request(format!("Invalid condition type: {}", self.kind))
        })?;
        let value = if kind.requires_count() {
            let count = self
                .count
                .ok_or_else(|| bad_request("Count is required for CountMatching condition"))?;
            let count = u32::try_from(count)
                .map_err(|_| bad_request(format!("Count must be between 0 and {}", u32::MAX)))?;
            ConditionValue::with_count(self.value, count)
        } else {
            ConditionValue::new(self.value)
        };
        RollCondition::new(kind, value).map_err(dice_error)
    }
}

/// Validate a dice request against the server's size limits.
fn dice_from_request(
    sides: i64,
    number_of_dice: i64,
    config: &AppConfig,
) -> Result<DiceRoll, ApiError> {
    if sides <= 0 {
        return Err(bad_request("Number of sides must be positive"));
    }
    if number_of_dice <= 0 {
        return Err(bad_request("Number of dice must be positive"));
    }
    if sides > i64::from(config.max_sides) {
        return Err(bad_request(format!(
            "Number of sides must not exceed {}",
            config.max_sides
        )));
    }
    if number_of_dice > i64::from(config.max_dice) {
        return Err(bad_request(format!(
            "Number of dice must not exceed {}",
            config.max_dice
        )));
    }
    DiceRoll::from_signed(sides, number_of_dice).map_err(dice_error)
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, message.into())
}

fn dice_error(e: DiceError) -> ApiError {
    if e.is_input_error() {
        bad_request(e.to_string())
    } else if e == DiceError::Cancelled {
        tracing::warn!("Simulation cancelled before any result");
        (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
    } else {
        tracing::error!("Simulation failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;

    pub fn app() -> Router {
        app_with(AppConfig::default())
    }

    pub fn app_with(config: AppConfig) -> Router {
        create_router(Arc::new(AppState::new(config)))
    }

    pub fn app_from(state: &Arc<AppState>) -> Router {
        create_router(Arc::clone(state))
    }

    pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn post_json(
        app: Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    pub async fn get_path(app: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }
}
