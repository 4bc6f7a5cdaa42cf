use analytics::MarketReport;
use clap::ValueEnum;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use rust_decimal::Decimal;

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn render(reports: &[MarketReport], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_table(reports)),
        OutputFormat::Json => {
            // A single report is printed as an object, several as an array.
            let payload = match reports {
                [report] => serde_json::to_string_pretty(report)?,
                _ => serde_json::to_string_pretty(reports)?,
            };
            println!("{payload}");
        }
    }
    Ok(())
}

pub fn render_table(reports: &[MarketReport]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Card",
            "Trend",
            "Volatility",
            "Liquidity (sales/day)",
            "Rating",
            "Last Updated",
        ]);

    for report in reports {
        let card = report
            .card
            .as_ref()
            .map(|c| c.label())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            card,
            report.analysis.trend.to_string(),
            metric(report.analysis.volatility),
            metric(report.analysis.liquidity),
            report.analysis.investment_rating.to_string(),
            report.last_updated.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ]);
    }
    table
}

fn metric(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
