use deal_engine::api_objects::{OrderDetails, PaymentConfirmation};
use dialoguer::{console::Style, theme::ColorfulTheme, Confirm, Input};
use log::*;

use crate::traits::{PaymentWidget, WidgetOutcome};

/// Stands in for the provider's hosted checkout on the terminal.
///
/// The order is shown to the customer, who pays for it elsewhere with the provider and then pastes the payment id and
/// signature they were given. Declining the prompt dismisses the checkout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalCheckout;

impl PaymentWidget for TerminalCheckout {
    async fn open(&self, order: &OrderDetails) -> WidgetOutcome {
        let order = order.clone();
        match tokio::task::spawn_blocking(move || prompt_for_payment(&order)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                warn!("💳️ Checkout prompt failed. Treating the checkout as dismissed. {e}");
                WidgetOutcome::Dismissed
            },
            Err(e) => {
                error!("💳️ Checkout task panicked. {e}");
                WidgetOutcome::Dismissed
            },
        }
    }
}

fn prompt_for_payment(order: &OrderDetails) -> Result<WidgetOutcome, dialoguer::Error> {
    let theme = ColorfulTheme { values_style: Style::new().yellow().dim(), ..ColorfulTheme::default() };
    println!("Order {} for {} {} (key {})", order.order_id, order.amount, order.currency, order.key);
    let paid = Confirm::with_theme(&theme).with_prompt("Have you completed the payment?").default(false).interact()?;
    if !paid {
        return Ok(WidgetOutcome::Dismissed);
    }
    let payment_id = Input::<String>::with_theme(&theme).with_prompt("Payment id").interact_text()?;
    let signature = Input::<String>::with_theme(&theme).with_prompt("Payment signature").interact_text()?;
    Ok(WidgetOutcome::Completed(PaymentConfirmation {
        payment_id: payment_id.trim().to_string(),
        order_id: order.order_id.clone(),
        signature: signature.trim().to_string(),
    }))
}
