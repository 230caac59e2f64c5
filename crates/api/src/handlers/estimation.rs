//! Handlers for minting cost estimation endpoints.
//!
//! Thin adapters over the pure functions in `mintpress_core::estimation`.
//! Every endpoint accepts an optional `gas_price` override; otherwise the
//! configured price is used.

use std::str::FromStr;

use axum::extract::{Query, State};
use axum::Json;
use mintpress_core::estimation::{self, CollectionEstimate, CostBreakdown};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub gas_price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    pub batch_size: u64,
    pub gas_price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    pub collection_size: u64,
    pub batch_size: u64,
    pub gas_price: Option<String>,
}

/// An estimate together with the gas price it was computed at.
#[derive(Debug, Serialize)]
pub struct PricedEstimate<T: Serialize> {
    pub gas_price: Decimal,
    pub estimate: T,
}

// ---------------------------------------------------------------------------
// GET /estimates/single
// ---------------------------------------------------------------------------

pub async fn estimate_single(
    State(state): State<AppState>,
    Query(params): Query<PriceQuery>,
) -> AppResult<Json<DataResponse<PricedEstimate<CostBreakdown>>>> {
    let gas_price = resolve_gas_price(&state, params.gas_price.as_deref())?;
    let estimate = estimation::estimate_single(&state.cost_model, gas_price)?;
    Ok(priced(gas_price, estimate))
}

// ---------------------------------------------------------------------------
// GET /estimates/batch
// ---------------------------------------------------------------------------

pub async fn estimate_batch(
    State(state): State<AppState>,
    Query(params): Query<BatchQuery>,
) -> AppResult<Json<DataResponse<PricedEstimate<CostBreakdown>>>> {
    let gas_price = resolve_gas_price(&state, params.gas_price.as_deref())?;
    let estimate = estimation::estimate_batch(&state.cost_model, gas_price, params.batch_size)?;
    Ok(priced(gas_price, estimate))
}

// ---------------------------------------------------------------------------
// GET /estimates/collection
// ---------------------------------------------------------------------------

pub async fn estimate_collection(
    State(state): State<AppState>,
    Query(params): Query<CollectionQuery>,
) -> AppResult<Json<DataResponse<PricedEstimate<CollectionEstimate>>>> {
    let gas_price = resolve_gas_price(&state, params.gas_price.as_deref())?;
    let estimate = estimation::estimate_collection(
        &state.cost_model,
        gas_price,
        params.collection_size,
        params.batch_size,
    )?;
    Ok(priced(gas_price, estimate))
}

// ---------------------------------------------------------------------------
// GET /estimates/deployment
// ---------------------------------------------------------------------------

pub async fn estimate_deployment(
    State(state): State<AppState>,
    Query(params): Query<PriceQuery>,
) -> AppResult<Json<DataResponse<PricedEstimate<CostBreakdown>>>> {
    let gas_price = resolve_gas_price(&state, params.gas_price.as_deref())?;
    let estimate = estimation::estimate_deployment(&state.cost_model, gas_price)?;
    Ok(priced(gas_price, estimate))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_gas_price(state: &AppState, raw: Option<&str>) -> AppResult<Decimal> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(state.config.pricing.gas_price),
        Some(s) => Decimal::from_str(s)
            .map_err(|e| AppError::BadRequest(format!("Invalid gas_price '{s}': {e}"))),
    }
}

fn priced<T: Serialize>(gas_price: Decimal, estimate: T) -> Json<DataResponse<PricedEstimate<T>>> {
    Json(DataResponse {
        data: PricedEstimate {
            gas_price,
            estimate,
        },
    })
}
