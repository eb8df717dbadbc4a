//! The state of a single unlock button.
//!
//! ```text
//!            Activate                     PaymentVerified               Settled
//!   Idle ─────────────▶ Processing ─────────────────────▶ Succeeded ───────────▶ Unlocked
//!    ▲                      │
//!    └──────────────────────┘
//!     OrderFailed | WidgetDismissed | VerificationFailed
//! ```
//!
//! Every error path lands back in `Idle`, so the button is always clickable again. `Unlocked` remembers the affiliate
//! link; activating it reopens the link rather than starting a second payment.
use std::fmt::Display;

use ds_common::Paise;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnlockState {
    #[default]
    Idle,
    Processing,
    /// The payment was verified. The affiliate link has not been opened yet.
    Succeeded { link: String },
    Unlocked { link: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockEvent {
    Activate,
    OrderFailed,
    WidgetDismissed,
    VerificationFailed,
    PaymentVerified { link: String },
    /// The post-purchase display delay has elapsed.
    Settled,
}

/// What an activation of the button should do, given its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Begin,
    AlreadyProcessing,
    Reopen(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot apply {event:?} to an unlock button that is {state}")]
pub struct InvalidTransition {
    pub state: UnlockState,
    pub event: UnlockEvent,
}

impl UnlockState {
    pub fn activation(&self) -> Activation {
        match self {
            UnlockState::Idle => Activation::Begin,
            // The redirect for a fresh purchase is already scheduled.
            UnlockState::Processing | UnlockState::Succeeded { .. } => Activation::AlreadyProcessing,
            UnlockState::Unlocked { link } => Activation::Reopen(link.clone()),
        }
    }

    pub fn apply(self, event: UnlockEvent) -> Result<UnlockState, InvalidTransition> {
        use UnlockEvent::*;
        match (self, event) {
            (UnlockState::Idle, Activate) => Ok(UnlockState::Processing),
            (UnlockState::Processing, OrderFailed | WidgetDismissed | VerificationFailed) => Ok(UnlockState::Idle),
            (UnlockState::Processing, PaymentVerified { link }) => Ok(UnlockState::Succeeded { link }),
            (UnlockState::Succeeded { link }, Settled) => Ok(UnlockState::Unlocked { link }),
            (state, event) => Err(InvalidTransition { state, event }),
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, UnlockState::Processing)
    }

    pub fn view(&self, price: Paise) -> ButtonView {
        match self {
            UnlockState::Idle => ButtonView::new(format!("Unlock Deal for {price}"), ButtonStyle::Ready),
            UnlockState::Processing => ButtonView::new("Processing...", ButtonStyle::Loading),
            UnlockState::Succeeded { .. } => ButtonView::new("Deal Unlocked!", ButtonStyle::Success),
            UnlockState::Unlocked { .. } => ButtonView::new("View Deal", ButtonStyle::Unlocked),
        }
    }
}

impl Display for UnlockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnlockState::Idle => f.write_str("idle"),
            UnlockState::Processing => f.write_str("processing"),
            UnlockState::Succeeded { .. } => f.write_str("succeeded"),
            UnlockState::Unlocked { .. } => f.write_str("unlocked"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Ready,
    /// Disabled, with a spinner.
    Loading,
    Success,
    Unlocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub style: ButtonStyle,
}

impl ButtonView {
    pub fn new<S: Into<String>>(label: S, style: ButtonStyle) -> Self {
        Self { label: label.into(), style }
    }

    pub fn is_enabled(&self) -> bool {
        self.style != ButtonStyle::Loading
    }
}
