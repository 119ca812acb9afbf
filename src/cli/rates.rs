use super::ui;
use crate::core::rates::parse_provider_timestamp;
use crate::core::{CurrencyCode, RateProvider, RateTable};
use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::Cell;

fn rates_table(table: &RateTable) -> String {
    let mut output = ui::new_styled_table();
    output.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {}", table.base)),
    ]);

    for code in CurrencyCode::ALL {
        output.add_row(vec![
            Cell::new(code.code()),
            Cell::new(code.display_name()),
            ui::format_optional_cell(table.get(code), ui::format_amount),
        ]);
    }
    output.to_string()
}

/// Fetches and renders the supported currencies' rates against `base`.
pub async fn display_rates<P: RateProvider>(provider: &P, base: CurrencyCode) -> Result<String> {
    let spinner = ui::new_spinner(&format!("Fetching {base} rates..."));
    let result = provider.fetch_rates(base).await;
    spinner.finish_and_clear();
    let snapshot = result.with_context(|| format!("Could not load rates for {base}"))?;

    let mut output = format!(
        "{}\n\n",
        ui::style_text(
            &format!("Exchange rates for {} ({base})", base.display_name()),
            ui::StyleType::Title
        )
    );
    output.push_str(&rates_table(&snapshot.table));
    if let Some(stamp) = snapshot.last_updated.as_deref() {
        let caption = ui::staleness_caption(stamp, parse_provider_timestamp(stamp), Utc::now());
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(&caption, ui::StyleType::Subtle)
        ));
    }
    output.push_str(&format!(
        "\n{}",
        ui::style_text(ui::PROVIDER_FOOTER, ui::StyleType::Subtle)
    ));
    Ok(output)
}

/// Lists the supported currency codes with their names.
pub fn display_currencies() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for code in CurrencyCode::ALL {
        table.add_row(vec![Cell::new(code.code()), Cell::new(code.display_name())]);
    }
    table.to_string()
}
