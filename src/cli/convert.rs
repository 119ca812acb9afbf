use super::{session, ui};
use crate::core::session::SyncController;
use crate::core::{Amount, ConversionState, CurrencyCode, RateProvider, Side};
use anyhow::Result;
use chrono::Utc;

/// Converts a single amount and renders it the way the session does.
pub async fn convert_and_display<P: RateProvider>(
    controller: &SyncController<P>,
    amount: Amount,
    from: CurrencyCode,
    to: CurrencyCode,
) -> Result<String> {
    let state = ConversionState::new(Side::new(amount, from), Side::new(Amount::ZERO, to));

    let spinner = ui::new_spinner(&format!("Fetching {from} rates..."));
    let update = controller.initialize(&state).await;
    spinner.finish_and_clear();

    Ok(session::render(
        &update.state,
        update.last_updated.as_deref(),
        &update.notices,
        Utc::now(),
    ))
}
