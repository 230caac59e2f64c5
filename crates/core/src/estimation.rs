//! Minting cost estimation: types and pure logic.
//!
//! Projects the cost of single mints, fixed-size batch mints, whole
//! collections, and contract deployment from a gas table ([`CostModel`]) and
//! a unit (gas) price. All arithmetic is fixed-precision [`Decimal`]; nothing
//! here rounds or formats for display.
//!
//! The estimator holds no economic defaults. Gas figures, prices, and the
//! display exchange rate come from the caller (see [`crate::config`]).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;

/// Gas units consumed by an operation.
pub type GasUnits = u64;

// ---------------------------------------------------------------------------
// Cost model
// ---------------------------------------------------------------------------

/// An operation with a gas figure in the cost model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "batch_size", rename_all = "snake_case")]
pub enum OperationKind {
    SingleMint,
    /// Per-item gas when minting in batches of the given size. Amortization is
    /// not linear, so each batch size carries its own figure.
    BatchMintPerItem(u64),
    ContractDeployment,
}

/// Lookup table of gas per operation, plus the rate converting base units
/// (e.g. ETH) into the display currency (e.g. USD).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostModel {
    operations: BTreeMap<OperationKind, GasUnits>,
    display_rate: Decimal,
}

impl CostModel {
    pub fn new(display_rate: Decimal) -> Self {
        Self {
            operations: BTreeMap::new(),
            display_rate,
        }
    }

    /// Builder-style insert of one gas figure.
    pub fn with_operation(mut self, kind: OperationKind, gas: GasUnits) -> Self {
        self.operations.insert(kind, gas);
        self
    }

    pub fn gas_for(&self, kind: OperationKind) -> Option<GasUnits> {
        self.operations.get(&kind).copied()
    }

    pub fn display_rate(&self) -> Decimal {
        self.display_rate
    }

    /// Batch sizes with a per-item figure, ascending.
    pub fn batch_sizes(&self) -> Vec<u64> {
        self.operations
            .keys()
            .filter_map(|kind| match kind {
                OperationKind::BatchMintPerItem(size) => Some(*size),
                _ => None,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Estimate types
// ---------------------------------------------------------------------------

/// Projected cost in base units and in the display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub total_base_units: Decimal,
    pub total_display_currency: Decimal,
    pub per_item_base_units: Decimal,
    pub per_item_display_currency: Decimal,
}

/// Projected cost of minting a whole collection in fixed-size batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionEstimate {
    pub collection_size: u64,
    pub batch_size: u64,
    pub batches: u64,
    /// Item slots actually paid for: `batches * batch_size`. Exceeds
    /// `collection_size` when the final batch is partial.
    pub padded_slots: u64,
    pub gas_per_item: GasUnits,
    pub breakdown: CostBreakdown,
}

// ---------------------------------------------------------------------------
// Estimation logic
// ---------------------------------------------------------------------------

/// Cost of minting one item on its own.
pub fn estimate_single(model: &CostModel, unit_price: Decimal) -> Result<CostBreakdown, CoreError> {
    validate_unit_price(unit_price)?;
    let gas = model.gas_for(OperationKind::SingleMint).ok_or_else(|| {
        CoreError::Validation("cost model has no single mint gas figure".into())
    })?;

    let total = mul(Decimal::from(gas), unit_price)?;
    breakdown(model, total, total)
}

/// Cost of one batch of `batch_size` items.
///
/// Fails with `InvalidBatchSize` when the size is zero or the model has no
/// per-item figure for it.
pub fn estimate_batch(
    model: &CostModel,
    unit_price: Decimal,
    batch_size: u64,
) -> Result<CostBreakdown, CoreError> {
    validate_unit_price(unit_price)?;
    let per_item = batch_item_cost(model, unit_price, batch_size)?.1;
    let total = mul(per_item, Decimal::from(batch_size))?;
    breakdown(model, total, per_item)
}

/// Cost of minting `collection_size` items in batches of `batch_size`.
///
/// The final batch is charged as a full batch even when the collection size
/// is not a multiple of the batch size; `per_item_base_units` is the padded
/// total spread over the real collection size.
pub fn estimate_collection(
    model: &CostModel,
    unit_price: Decimal,
    collection_size: u64,
    batch_size: u64,
) -> Result<CollectionEstimate, CoreError> {
    if collection_size < 1 {
        return Err(CoreError::Validation(
            "collection size must be at least 1".into(),
        ));
    }
    if batch_size < 1 {
        return Err(CoreError::Validation("batch size must be at least 1".into()));
    }
    validate_unit_price(unit_price)?;

    let (gas_per_item, per_item_batch) = batch_item_cost(model, unit_price, batch_size)?;

    let batches = collection_size.div_ceil(batch_size);
    let padded_slots = batches
        .checked_mul(batch_size)
        .ok_or_else(|| CoreError::Validation("collection too large to estimate".into()))?;

    let total = mul(
        mul(Decimal::from(batches), per_item_batch)?,
        Decimal::from(batch_size),
    )?;
    let per_item = total
        .checked_div(Decimal::from(collection_size))
        .ok_or_else(|| CoreError::Validation("per-item cost is not representable".into()))?;

    Ok(CollectionEstimate {
        collection_size,
        batch_size,
        batches,
        padded_slots,
        gas_per_item,
        breakdown: breakdown(model, total, per_item)?,
    })
}

/// Cost of deploying the token contract once.
pub fn estimate_deployment(
    model: &CostModel,
    unit_price: Decimal,
) -> Result<CostBreakdown, CoreError> {
    validate_unit_price(unit_price)?;
    let gas = model
        .gas_for(OperationKind::ContractDeployment)
        .ok_or_else(|| CoreError::Validation("cost model has no deployment gas figure".into()))?;

    let total = mul(Decimal::from(gas), unit_price)?;
    breakdown(model, total, total)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Gas per item and base-unit cost per item for `batch_size`.
fn batch_item_cost(
    model: &CostModel,
    unit_price: Decimal,
    batch_size: u64,
) -> Result<(GasUnits, Decimal), CoreError> {
    if batch_size < 1 {
        return Err(CoreError::InvalidBatchSize {
            batch_size,
            reason: "must be at least 1".into(),
        });
    }
    let gas = model
        .gas_for(OperationKind::BatchMintPerItem(batch_size))
        .ok_or_else(|| CoreError::InvalidBatchSize {
            batch_size,
            reason: format!(
                "no per-item gas figure in cost model (known sizes: {:?})",
                model.batch_sizes()
            ),
        })?;
    Ok((gas, mul(Decimal::from(gas), unit_price)?))
}

fn breakdown(model: &CostModel, total: Decimal, per_item: Decimal) -> Result<CostBreakdown, CoreError> {
    Ok(CostBreakdown {
        total_base_units: total,
        total_display_currency: mul(total, model.display_rate)?,
        per_item_base_units: per_item,
        per_item_display_currency: mul(per_item, model.display_rate)?,
    })
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, CoreError> {
    a.checked_mul(b)
        .ok_or_else(|| CoreError::Validation(format!("cost overflow computing {a} x {b}")))
}

fn validate_unit_price(unit_price: Decimal) -> Result<(), CoreError> {
    if unit_price.is_sign_negative() && !unit_price.is_zero() {
        return Err(CoreError::Validation(format!(
            "unit price must not be negative, got {unit_price}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;
    use crate::error::ErrorKind;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn gwei() -> Decimal {
        d("0.000000001")
    }

    fn model() -> CostModel {
        CostModel::new(Decimal::from(2000))
            .with_operation(OperationKind::SingleMint, 21_000)
            .with_operation(OperationKind::BatchMintPerItem(5), 18_000)
            .with_operation(OperationKind::BatchMintPerItem(10), 17_500)
            .with_operation(OperationKind::ContractDeployment, 2_500_000)
    }

    // -- estimate_single --

    #[test]
    fn single_mint_cost() {
        let est = estimate_single(&model(), gwei()).unwrap();
        assert_eq!(est.total_base_units, d("0.000021"));
        assert_eq!(est.per_item_base_units, est.total_base_units);
        assert_eq!(est.total_display_currency, d("0.042"));
        assert_eq!(est.per_item_display_currency, d("0.042"));
    }

    #[test]
    fn single_mint_missing_from_model() {
        let empty = CostModel::new(Decimal::ONE);
        let err = estimate_single(&empty, gwei()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn display_rate_is_applied_not_hardcoded() {
        let model = model();
        let other = CostModel::new(Decimal::from(3000))
            .with_operation(OperationKind::SingleMint, 21_000);
        let a = estimate_single(&model, gwei()).unwrap();
        let b = estimate_single(&other, gwei()).unwrap();
        assert_eq!(a.total_base_units, b.total_base_units);
        assert_eq!(b.total_display_currency, d("0.063"));
    }

    // -- estimate_batch --

    #[test]
    fn batch_of_five() {
        let est = estimate_batch(&model(), gwei(), 5).unwrap();
        assert_eq!(est.total_base_units, d("0.00009"));
        assert_eq!(est.per_item_base_units, d("0.000018"));
        assert_eq!(est.total_display_currency, d("0.18"));
        assert_eq!(est.per_item_display_currency, d("0.036"));
    }

    #[test]
    fn batch_of_ten_uses_its_own_gas_figure() {
        let est = estimate_batch(&model(), gwei(), 10).unwrap();
        assert_eq!(est.total_base_units, d("0.000175"));
        assert_eq!(est.per_item_base_units, d("0.0000175"));
    }

    #[test]
    fn batch_size_zero_rejected() {
        let err = estimate_batch(&model(), gwei(), 0).unwrap_err();
        assert_matches!(err, CoreError::InvalidBatchSize { batch_size: 0, .. });
    }

    #[test]
    fn batch_size_not_in_model_rejected() {
        let err = estimate_batch(&model(), gwei(), 7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBatchSize);
    }

    #[test]
    fn negative_unit_price_rejected() {
        let err = estimate_batch(&model(), d("-1"), 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    // -- estimate_collection --

    #[test]
    fn collection_exact_multiple() {
        let est = estimate_collection(&model(), gwei(), 1000, 10).unwrap();
        assert_eq!(est.batches, 100);
        assert_eq!(est.padded_slots, 1000);
        assert_eq!(est.gas_per_item, 17_500);
        assert_eq!(est.breakdown.total_base_units, d("0.0175"));
        assert_eq!(est.breakdown.per_item_base_units, d("0.0000175"));
        assert_eq!(est.breakdown.total_display_currency, d("35"));
    }

    #[test]
    fn collection_pads_final_batch() {
        let est = estimate_collection(&model(), gwei(), 95, 10).unwrap();
        assert_eq!(est.batches, 10);
        assert_eq!(est.padded_slots, 100);
        // Charged for 100 slots, not 95.
        assert_eq!(est.breakdown.total_base_units, d("0.00175"));
        assert_eq!(
            est.breakdown.per_item_base_units,
            d("0.00175") / Decimal::from(95)
        );
        assert!(est.breakdown.per_item_base_units > d("0.0000175"));
    }

    #[test]
    fn collection_smaller_than_one_batch() {
        let est = estimate_collection(&model(), gwei(), 1, 10).unwrap();
        assert_eq!(est.batches, 1);
        assert_eq!(est.breakdown.total_base_units, d("0.000175"));
        assert_eq!(est.breakdown.per_item_base_units, d("0.000175"));
    }

    #[test]
    fn collection_zero_sizes_are_invalid_input() {
        let err = estimate_collection(&model(), gwei(), 0, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err = estimate_collection(&model(), gwei(), 100, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn collection_unknown_batch_size() {
        let err = estimate_collection(&model(), gwei(), 100, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBatchSize);
    }

    // -- estimate_deployment --

    #[test]
    fn deployment_cost() {
        let est = estimate_deployment(&model(), gwei()).unwrap();
        assert_eq!(est.total_base_units, d("0.0025"));
        assert_eq!(est.total_display_currency, d("5"));
    }

    // -- purity --

    #[test]
    fn repeated_calls_are_identical() {
        let model = model();
        assert_eq!(
            estimate_single(&model, gwei()).unwrap(),
            estimate_single(&model, gwei()).unwrap()
        );
        assert_eq!(
            estimate_batch(&model, gwei(), 5).unwrap(),
            estimate_batch(&model, gwei(), 5).unwrap()
        );
        let a = estimate_collection(&model, gwei(), 95, 10).unwrap();
        let b = estimate_collection(&model, gwei(), 95, 10).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn batch_sizes_are_sorted() {
        assert_eq!(model().batch_sizes(), vec![5, 10]);
    }
}
