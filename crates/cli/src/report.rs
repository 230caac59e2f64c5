//! Plain-text rendering of a [`CostAnalysis`].

use std::fmt::{self, Write};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::commands::estimate::CostAnalysis;

const RULE: &str = "==================================================";

pub fn render(analysis: &CostAnalysis) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "MINTING COST ANALYSIS")?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Gas price: {} | Display rate: {}",
        analysis.gas_price.normalize(),
        analysis.display_rate.normalize()
    )?;

    writeln!(out, "\nSINGLE MINT")?;
    writeln!(out, "  Gas: {}", group_thousands(analysis.single.gas))?;
    writeln!(
        out,
        "  Cost: {} (${})",
        analysis.single.cost.total_base_units.normalize(),
        fixed(analysis.single.cost.total_display_currency, 4)
    )?;

    for batch in &analysis.batches {
        writeln!(out, "\nBATCH MINT ({} items)", batch.batch_size)?;
        writeln!(out, "  Gas per item: {}", group_thousands(batch.gas_per_item))?;
        writeln!(
            out,
            "  Cost per item: {} (${})",
            batch.cost.per_item_base_units.normalize(),
            fixed(batch.cost.per_item_display_currency, 4)
        )?;
        writeln!(
            out,
            "  Batch total: {} (${})",
            batch.cost.total_base_units.normalize(),
            fixed(batch.cost.total_display_currency, 4)
        )?;
    }

    writeln!(out, "\nCONTRACT DEPLOYMENT")?;
    writeln!(out, "  Gas: {}", group_thousands(analysis.deployment.gas))?;
    writeln!(
        out,
        "  Cost: {} (${})",
        analysis.deployment.cost.total_base_units.normalize(),
        fixed(analysis.deployment.cost.total_display_currency, 2)
    )?;

    if !analysis.scenarios.is_empty() {
        writeln!(out, "\nTEST SCENARIOS")?;
        for scenario in &analysis.scenarios {
            writeln!(
                out,
                "  {} NFTs in batches of {} ({} batches): {} (${}), {} per NFT",
                group_thousands(scenario.collection_size),
                scenario.batch_size,
                group_thousands(scenario.batches),
                fixed(scenario.breakdown.total_base_units, 4),
                fixed(scenario.breakdown.total_display_currency, 2),
                fixed(scenario.breakdown.per_item_base_units, 6)
            )?;
        }
    }

    Ok(out)
}

/// `value` rounded half away from zero and printed with exactly `dp` places.
fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.prec$}", prec = dp as usize)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
