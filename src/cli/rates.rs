use super::ui;
use crate::core::provider::RateProvider;
use crate::core::snapshot::RateSnapshot;
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;
use std::collections::BTreeMap;

/// Query parameters shared by the latest and historical commands.
pub struct RateArgs {
    pub base: String,
    pub targets: Vec<String>,
    /// Base-currency amount to convert into each target currency.
    pub amount: Option<f64>,
}

pub async fn run_latest(provider: &dyn RateProvider, args: &RateArgs) -> Result<()> {
    let mut snapshot = provider.latest(&args.base, &args.targets).await?;
    attach_converted(&mut snapshot, args.amount);
    render(&snapshot, None, args.amount);
    Ok(())
}

pub async fn run_historical(
    provider: &dyn RateProvider,
    date: NaiveDate,
    args: &RateArgs,
) -> Result<()> {
    let mut snapshot = provider.historical(date, &args.base, &args.targets).await?;
    attach_converted(&mut snapshot, args.amount);
    render(&snapshot, Some(date), args.amount);
    Ok(())
}

// Conversion is a caller-side step over a finished snapshot; the provider
// never computes converted amounts itself.
fn attach_converted(snapshot: &mut RateSnapshot, amount: Option<f64>) {
    if let Some(amount) = amount {
        let converted = snapshot
            .rates()
            .iter()
            .map(|(code, rate)| (code.clone(), rate * amount))
            .collect();
        snapshot.set_converted(converted);
    }
}

/// The converted column is shown only when an explicit amount was supplied;
/// without one, a snapshot's converted values just mirror its raw rates.
fn render(snapshot: &RateSnapshot, requested: Option<NaiveDate>, amount: Option<f64>) {
    println!(
        "\n{}",
        ui::style_text(
            &format!("{} reference rates for {}", snapshot.base(), snapshot.date()),
            ui::StyleType::Title
        )
    );
    if let Some(requested) = requested {
        if requested != snapshot.date() {
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "No rates published on {requested}; showing next published day."
                    ),
                    ui::StyleType::Subtle
                )
            );
        }
    }

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Currency"), ui::header_cell("Rate")];
    if let Some(amount) = amount {
        header.push(ui::header_cell(&format!(
            "{amount:.2} {}",
            snapshot.base()
        )));
    }
    table.set_header(header);

    // BTreeMap for stable, sorted output
    let sorted: BTreeMap<&String, &f64> = snapshot.rates().iter().collect();
    let converted = snapshot.converted();
    for (code, rate) in sorted {
        let mut row = vec![Cell::new(code), ui::value_cell(*rate)];
        if amount.is_some() {
            if let Some(value) = converted.get(code.as_str()) {
                row.push(ui::value_cell(*value));
            }
        }
        table.add_row(row);
    }

    println!("{table}");

    if snapshot.rates().is_empty() {
        println!(
            "{}",
            ui::style_text(
                "No rates matched the requested symbols.",
                ui::StyleType::Subtle
            )
        );
    }
}
