//! Scenario comparison endpoint

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use dc_core::{Comparison, DiceResult, Scenario, SimConfig, Simulator, Verdict, theory};

use super::{ApiError, ConditionRequest, bad_request, dice_error, dice_from_request};
use crate::config::AppConfig;
use crate::state::AppState;

/// One side of a comparison
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    /// Faces per die
    pub sides: i64,
    /// Dice rolled together
    pub number_of_dice: i64,
    /// Condition a trial must meet
    pub condition: ConditionRequest,
}

impl ScenarioRequest {
    fn to_scenario(&self, config: &AppConfig) -> Result<Scenario, ApiError> {
        let dice = dice_from_request(self.sides, self.number_of_dice, config)?;
        let condition = self.condition.to_condition()?;
        Ok(Scenario::new(dice, condition))
    }
}

/// Request body for `POST /api/simulate`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRequest {
    /// First scenario
    pub scenario_a: ScenarioRequest,
    /// Second scenario
    pub scenario_b: ScenarioRequest,
    /// Trials per scenario; the server default when absent
    #[serde(default)]
    pub simulations: Option<i64>,
    /// Seed for a reproducible run
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Response body for `POST /api/simulate`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    simulations: u64,
    probability_a: f64,
    probability_b: f64,
    difference: f64,
    elapsed_ms: u64,
    description_a: String,
    description_b: String,
    verdict: Verdict,
    cancelled: bool,
    theoretical_a: Option<f64>,
    theoretical_b: Option<f64>,
}

/// Sets the cancel flag when dropped.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

type Outcome = (Comparison, Option<f64>, Option<f64>);

fn run_comparison(
    config: SimConfig,
    a: &Scenario,
    b: &Scenario,
    cancel: &AtomicBool,
) -> DiceResult<Outcome> {
    let comparison = Simulator::new(config).run_with_cancel(a, b, cancel)?;
    Ok((comparison, theory::probability(a), theory::probability(b)))
}

/// Compare two scenarios by simulation
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let a = req.scenario_a.to_scenario(&state.config)?;
    let b = req.scenario_b.to_scenario(&state.config)?;

    let simulations = match req.simulations {
        None => state.config.default_simulations,
        Some(n) => u64::try_from(n)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| bad_request("Number of simulations must be positive"))?,
    };
    let max = state.config.max_simulations;
    if simulations > max {
        return Err(bad_request(format!(
            "Number of simulations must not exceed {max}"
        )));
    }

    let mut config = SimConfig::default().with_simulations(simulations);
    if let Some(seed) = req.seed {
        config = config.with_seed(seed);
    }

    let description_a = a.to_string();
    let description_b = b.to_string();
    tracing::info!("Simulating {} vs {} ({} trials)", description_a, description_b, simulations);

    // Dropping the request future cancels the run.
    let cancel = Arc::new(AtomicBool::new(false));
    let _guard = CancelOnDrop(Arc::clone(&cancel));
    let flag = Arc::clone(&cancel);
    let mut task =
        tokio::task::spawn_blocking(move || run_comparison(config, &a, &b, &flag));

    let mut shutdown = state.shutdown_signal();
    let stopping = async move { shutdown.wait_for(|&stopping| stopping).await.is_ok() };
    let joined = tokio::select! {
        joined = &mut task => joined,
        true = stopping => {
            tracing::info!("Shutdown requested, cancelling simulation");
            cancel.store(true, Ordering::Relaxed);
            task.await
        }
    };

    let (comparison, theoretical_a, theoretical_b) = joined
        .map_err(|e| {
            tracing::error!("Simulation task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Simulation task failed".to_string(),
            )
        })?
        .map_err(dice_error)?;

    tracing::info!(
        "Simulation finished in {:?}: {:.4} vs {:.4}",
        comparison.elapsed,
        comparison.probability_a,
        comparison.probability_b
    );

    Ok(Json(SimulateResponse {
        simulations: comparison.simulations,
        probability_a: comparison.probability_a,
        probability_b: comparison.probability_b,
        difference: comparison.difference(),
        elapsed_ms: u64::try_from(comparison.elapsed.as_millis()).unwrap_or(u64::MAX),
        description_a,
        description_b,
        verdict: comparison.verdict(),
        cancelled: comparison.cancelled,
        theoretical_a,
        theoretical_b,
    }))
}
