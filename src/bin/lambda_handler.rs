//! AWS Lambda handler for staking reward estimates
//!
//! Accepts a JSON calculation request and returns the reward estimate, the
//! asset's staking constraints and, on request, an accrual schedule and a
//! comparison across the supplied platform quotes.

use std::time::Instant;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use serde::{Deserialize, Serialize};

use staking_calculator::constraints::{self, CoinStakingConstraints};
use staking_calculator::market::{compare_platforms, PlatformEstimate, PlatformQuote};
use staking_calculator::rewards::{
    calculate_staking_rewards, project_rewards, AccrualSchedule, CalculatorConfig,
    StakingParameters, StakingResult,
};

/// Input for one estimate
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    /// Asset ticker; constraints are checked when present
    #[serde(default)]
    pub symbol: Option<String>,

    pub principal: f64,

    /// Nominal annual rate in percent
    pub apr: f64,

    pub days: u32,

    /// `compound`, `compounding` and `enforce_constraints`, each defaulting
    /// independently
    #[serde(flatten)]
    pub config: CalculatorConfig,

    /// Include the period-by-period accrual schedule
    #[serde(default)]
    pub include_schedule: bool,

    /// Platforms to compare at the same principal and duration
    #[serde(default)]
    pub platforms: Vec<PlatformQuote>,

    /// Asset price for valuing rewards in the quote currency
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<StakingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<CoinStakingConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<AccrualSchedule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comparison: Vec<PlatformEstimate>,
    pub execution_time_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationResponse {
    fn failure(message: String, started: Instant) -> Self {
        Self {
            success: false,
            result: None,
            constraints: None,
            schedule: None,
            comparison: Vec::new(),
            execution_time_us: started.elapsed().as_micros() as u64,
            error: Some(message),
        }
    }
}

/// Evaluate a request. Input and constraint failures are reported in the
/// response body rather than as invocation errors.
pub fn handle_request(request: &CalculationRequest) -> CalculationResponse {
    let started = Instant::now();
    let config = &request.config;

    let params = StakingParameters::new(request.principal, request.apr, request.days)
        .with_compounding_days(config.compounding.days());
    if let Err(e) = params.validate() {
        return CalculationResponse::failure(e.to_string(), started);
    }

    let asset = request.symbol.as_deref().and_then(constraints::get_staking_constraints);
    if let (Some(symbol), true) = (request.symbol.as_deref(), config.enforce_constraints) {
        if let Err(e) = constraints::validate_stake(symbol, request.principal, request.days) {
            let mut response = CalculationResponse::failure(e.to_string(), started);
            response.constraints = asset.cloned();
            return response;
        }
    }

    let schedule = if request.include_schedule {
        match project_rewards(&params, config.compound) {
            Ok(schedule) => Some(schedule),
            Err(e) => return CalculationResponse::failure(e.to_string(), started),
        }
    } else {
        None
    };

    let result = calculate_staking_rewards(&params, config.compound);
    let comparison = compare_platforms(
        &request.platforms,
        request.principal,
        request.days,
        config,
        request.price,
    );

    CalculationResponse {
        success: true,
        result: Some(result),
        constraints: asset.cloned(),
        schedule,
        comparison,
        execution_time_us: started.elapsed().as_micros() as u64,
        error: None,
    }
}

async fn handler(event: LambdaEvent<CalculationRequest>) -> Result<CalculationResponse, Error> {
    let (request, context) = event.into_parts();
    info!(
        "Request {}: symbol={:?} principal={} apr={} days={}",
        context.request_id, request.symbol, request.principal, request.apr, request.days
    );
    Ok(handle_request(&request))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
