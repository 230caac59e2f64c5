use std::sync::Arc;

use mintpress_core::estimation::CostModel;
use mintpress_core::publication::PublicationPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Publication pipeline wired to the configured asset store.
    pub pipeline: Arc<PublicationPipeline>,
    /// Gas table built from the pricing configuration.
    pub cost_model: Arc<CostModel>,
}

impl AppState {
    pub fn new(config: ServerConfig, pipeline: PublicationPipeline) -> Self {
        let cost_model = config.pricing.cost_model();
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
            cost_model: Arc::new(cost_model),
        }
    }
}
