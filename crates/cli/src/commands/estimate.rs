use anyhow::{Context, Result};
use clap::Args;
use mintpress_core::config::PricingConfig;
use mintpress_core::estimation::{
    self, CollectionEstimate, CostBreakdown, CostModel, GasUnits, OperationKind,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::report;

#[derive(Args)]
pub struct EstimateArgs {
    /// Gas price in base units (default: GAS_PRICE or 0.000000001)
    #[arg(long)]
    pub gas_price: Option<Decimal>,

    /// Batch size to report; repeatable (default: every size in the gas table)
    #[arg(long = "batch-size")]
    pub batch_sizes: Vec<u64>,

    /// Collection size for scenario projections; repeatable
    #[arg(long = "collection", default_values_t = [100u64, 1_000, 10_000])]
    pub collections: Vec<u64>,

    /// Batch size used for collection scenarios
    #[arg(long, default_value_t = 10)]
    pub scenario_batch_size: u64,

    /// Print JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

/// A single operation's gas figure and projected cost.
#[derive(Debug, Serialize)]
pub struct OperationLine {
    pub gas: GasUnits,
    pub cost: CostBreakdown,
}

#[derive(Debug, Serialize)]
pub struct BatchLine {
    pub batch_size: u64,
    pub gas_per_item: GasUnits,
    pub cost: CostBreakdown,
}

/// Everything the cost report shows.
#[derive(Debug, Serialize)]
pub struct CostAnalysis {
    pub gas_price: Decimal,
    pub display_rate: Decimal,
    pub single: OperationLine,
    pub batches: Vec<BatchLine>,
    pub deployment: OperationLine,
    pub scenarios: Vec<CollectionEstimate>,
}

pub fn run(args: EstimateArgs) -> Result<()> {
    let pricing = PricingConfig::from_env().context("Invalid pricing configuration")?;
    let model = pricing.cost_model();
    let gas_price = args.gas_price.unwrap_or(pricing.gas_price);

    let batch_sizes = if args.batch_sizes.is_empty() {
        model.batch_sizes()
    } else {
        args.batch_sizes.clone()
    };

    let analysis = analyze(
        &model,
        gas_price,
        &batch_sizes,
        &args.collections,
        args.scenario_batch_size,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", report::render(&analysis)?);
    }
    Ok(())
}

/// Run every estimate the report needs.
pub fn analyze(
    model: &CostModel,
    gas_price: Decimal,
    batch_sizes: &[u64],
    collections: &[u64],
    scenario_batch_size: u64,
) -> Result<CostAnalysis> {
    let single = OperationLine {
        gas: model.gas_for(OperationKind::SingleMint).unwrap_or_default(),
        cost: estimation::estimate_single(model, gas_price)?,
    };

    let batches = batch_sizes
        .iter()
        .map(|&batch_size| {
            Ok(BatchLine {
                batch_size,
                gas_per_item: model
                    .gas_for(OperationKind::BatchMintPerItem(batch_size))
                    .unwrap_or_default(),
                cost: estimation::estimate_batch(model, gas_price, batch_size)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let deployment = OperationLine {
        gas: model
            .gas_for(OperationKind::ContractDeployment)
            .unwrap_or_default(),
        cost: estimation::estimate_deployment(model, gas_price)?,
    };

    let scenarios = collections
        .iter()
        .map(|&size| {
            estimation::estimate_collection(model, gas_price, size, scenario_batch_size)
                .map_err(anyhow::Error::from)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CostAnalysis {
        gas_price,
        display_rate: model.display_rate(),
        single,
        batches,
        deployment,
        scenarios,
    })
}
