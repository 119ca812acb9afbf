//! Two linked amount fields kept in sync through exchange rates.
//!
//! A session is an explicit [`ConversionState`]. Every user interaction is an
//! [`Event`]; the events of one update cycle are folded into a [`Frame`], which
//! [`plan`] turns into a single [`Action`] using a fixed priority: swap first,
//! then a changed left side, then a changed right side. [`resolve`] applies the
//! action given the rates for the authoritative side. Both are pure; the
//! [`SyncController`] only adds rate retrieval around them.

use crate::core::convert::convert;
use crate::core::currency::CurrencyCode;
use crate::core::rates::{RateProvider, RateSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmountError {
    #[error("Amount must not be negative: {0}")]
    Negative(f64),
    #[error("Amount must be a finite number")]
    NotFinite,
}

/// A non-negative, finite amount of money.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    pub fn new(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value < 0.0 {
            return Err(AmountError::Negative(value));
        }
        // -0.0 + 0.0 == +0.0
        Ok(Amount(value + 0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    // Conversion output is finite and non-negative for valid inputs, and 0 otherwise.
    fn from_converted(value: f64) -> Self {
        Amount::new(value).unwrap_or(Amount::ZERO)
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> f64 {
        amount.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Side {
    pub amount: Amount,
    pub currency: CurrencyCode,
}

impl Side {
    pub fn new(amount: Amount, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionState {
    pub left: Side,
    pub right: Side,
}

impl Default for ConversionState {
    fn default() -> Self {
        Self {
            left: Side::new(Amount(10_000.0), CurrencyCode::Krw),
            right: Side::new(Amount::ZERO, CurrencyCode::Usd),
        }
    }
}

impl ConversionState {
    pub fn new(left: Side, right: Side) -> Self {
        Self { left, right }
    }

    pub fn swapped(&self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    pub fn is_same_currency(&self) -> bool {
        self.left.currency == self.right.currency
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    EditLeftAmount(Amount),
    EditLeftCurrency(CurrencyCode),
    EditRightAmount(Amount),
    EditRightCurrency(CurrencyCode),
    Swap,
}

/// Pending inputs for one update cycle, compared against the stored state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: Side,
    pub right: Side,
    pub swap: bool,
}

impl Frame {
    /// A frame with nothing pending.
    pub fn unchanged(state: &ConversionState) -> Self {
        Self {
            left: state.left,
            right: state.right,
            swap: false,
        }
    }

    pub fn from_events<I>(state: &ConversionState, events: I) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        events
            .into_iter()
            .fold(Self::unchanged(state), |frame, event| frame.with(event))
    }

    pub fn with(mut self, event: Event) -> Self {
        match event {
            Event::EditLeftAmount(amount) => self.left.amount = amount,
            Event::EditLeftCurrency(currency) => self.left.currency = currency,
            Event::EditRightAmount(amount) => self.right.amount = amount,
            Event::EditRightCurrency(currency) => self.right.currency = currency,
            Event::Swap => self.swap = true,
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Swap,
    /// Left is authoritative; right takes the converted amount.
    RecomputeRight {
        left: Side,
        right_currency: CurrencyCode,
    },
    /// Right is authoritative; left takes the converted amount.
    RecomputeLeft {
        right: Side,
        left_currency: CurrencyCode,
    },
}

impl Action {
    /// Base currency whose rates the action needs, if any.
    pub fn rate_base(&self) -> Option<CurrencyCode> {
        match self {
            Action::RecomputeRight { left, .. } => Some(left.currency),
            Action::RecomputeLeft { right, .. } => Some(right.currency),
            Action::None | Action::Swap => None,
        }
    }
}

/// Picks the single action for a cycle.
///
/// A swap discards every other pending edit. When both sides differ from the
/// stored state, the left side wins and the right-side edit is dropped.
pub fn plan(state: &ConversionState, frame: &Frame) -> Action {
    if frame.swap {
        return Action::Swap;
    }
    if frame.left != state.left {
        return Action::RecomputeRight {
            left: frame.left,
            right_currency: frame.right.currency,
        };
    }
    if frame.right != state.right {
        return Action::RecomputeLeft {
            right: frame.right,
            left_currency: frame.left.currency,
        };
    }
    Action::None
}

/// Applies `action` to `state`. `rates` must be based on the action's
/// [`Action::rate_base`]; it is ignored for swaps and no-ops.
pub fn resolve(state: &ConversionState, action: &Action, rates: &RateSnapshot) -> ConversionState {
    match *action {
        Action::None => *state,
        Action::Swap => state.swapped(),
        Action::RecomputeRight {
            left,
            right_currency,
        } => {
            let converted = convert(
                left.amount.value(),
                left.currency,
                right_currency,
                &rates.table,
            );
            ConversionState::new(
                left,
                Side::new(Amount::from_converted(converted), right_currency),
            )
        }
        Action::RecomputeLeft {
            right,
            left_currency,
        } => {
            let converted = convert(
                right.amount.value(),
                right.currency,
                left_currency,
                &rates.table,
            );
            ConversionState::new(
                Side::new(Amount::from_converted(converted), left_currency),
                right,
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Rates could not be loaded; the conversion used an empty table.
    FetchFailed(String),
    /// Both sides hold the same currency, so conversion is a no-op.
    SameCurrency,
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::FetchFailed(reason) => write!(f, "Failed to load exchange rates: {reason}"),
            Notice::SameCurrency => {
                write!(f, "Converting between the same currency gives the same amount")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub state: ConversionState,
    pub notices: Vec<Notice>,
    /// Provider stamp of the rates used in this cycle, when any were fetched.
    pub last_updated: Option<String>,
}

pub struct SyncController<P: RateProvider> {
    provider: P,
}

impl<P: RateProvider> SyncController<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs one update cycle. Fetch failures are reported as notices, never
    /// as errors.
    #[instrument(name = "SyncStep", skip(self, state))]
    pub async fn step(&self, state: &ConversionState, frame: Frame) -> Update {
        let action = plan(state, &frame);
        debug!(?action, "Planned sync action");
        self.apply(state, action).await
    }

    pub async fn dispatch(&self, state: &ConversionState, event: Event) -> Update {
        self.step(state, Frame::unchanged(state).with(event)).await
    }

    /// Fills in the right side of a freshly created state from its left side.
    pub async fn initialize(&self, state: &ConversionState) -> Update {
        let action = Action::RecomputeRight {
            left: state.left,
            right_currency: state.right.currency,
        };
        self.apply(state, action).await
    }

    async fn apply(&self, state: &ConversionState, action: Action) -> Update {
        let mut notices = Vec::new();

        let rates = match action.rate_base() {
            Some(base) => match self.provider.fetch_rates(base).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(error = %e, %base, "Rate fetch failed, converting with empty table");
                    notices.push(Notice::FetchFailed(e.to_string()));
                    RateSnapshot::empty(base)
                }
            },
            None => RateSnapshot::empty(state.left.currency),
        };

        let next = resolve(state, &action, &rates);
        if next.is_same_currency() {
            notices.push(Notice::SameCurrency);
        }

        Update {
            state: next,
            notices,
            last_updated: rates.last_updated,
        }
    }
}
