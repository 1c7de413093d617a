//! Shared application state for the Axum API server.

use stratum_common::config::StratumConfig;
use stratum_contracts::StratumContracts;
use stratum_engine::cr_calculator::RatioModel;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: StratumConfig,
    pub model: RatioModel,
    pub contracts: StratumContracts,
}

impl AppState {
    pub fn new(config: StratumConfig) -> Self {
        Self {
            model: RatioModel::new(config.thresholds),
            contracts: StratumContracts::new(&config.contracts),
            config,
        }
    }
}
