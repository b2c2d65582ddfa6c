//! Single roll endpoint

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use super::{ApiError, ConditionRequest, dice_from_request};
use crate::state::AppState;

/// Request body for `POST /api/roll`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollRequest {
    /// Faces per die
    pub sides: i64,
    /// Dice rolled together
    pub number_of_dice: i64,
    /// Conditions to evaluate against the roll
    #[serde(default)]
    pub conditions: Vec<ConditionRequest>,
}

/// Response body for `POST /api/roll`
#[derive(Debug, Serialize)]
pub struct RollResponse {
    values: Vec<u32>,
    sum: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    conditions: Option<Vec<ConditionOutcome>>,
}

#[derive(Debug, Serialize)]
struct ConditionOutcome {
    condition: String,
    satisfied: bool,
}

/// Roll once and evaluate any conditions
pub async fn roll_dice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RollRequest>,
) -> Result<Json<RollResponse>, ApiError> {
    let dice = dice_from_request(req.sides, req.number_of_dice, &state.config)?;
    let conditions = req
        .conditions
        .iter()
        .map(ConditionRequest::to_condition)
        .collect::<Result<Vec<_>, _>>()?;

    let result = dice.roll(&mut rand::rng());
    tracing::debug!("Rolled {}: {}", dice, result);

    let outcomes = (!conditions.is_empty()).then(|| {
        conditions
            .iter()
            .map(|c| ConditionOutcome {
                condition: c.describe(),
                satisfied: c.evaluate(&result),
            })
            .collect()
    });

    Ok(Json(RollResponse {
        sum: result.sum(),
        values: result.values().to_vec(),
        conditions: outcomes,
    }))
}
