use crate::config::Settings;
use crate::domain::money::Amount;
use crate::domain::ports::{ChargeOutcome, ChargeRequest, PaymentGatewayBox};
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Approved,
    /// `message` is the user-facing string shown to the registrant.
    Failed { message: String },
}

/// Translates a registration total plus an opaque card token into a gateway
/// charge, normalizing the result into a user-facing outcome.
pub struct PaymentProcessor {
    gateway: PaymentGatewayBox,
    settings: Settings,
}

impl PaymentProcessor {
    pub fn new(gateway: PaymentGatewayBox, settings: Settings) -> Self {
        Self { gateway, settings }
    }

    pub async fn process(
        &self,
        total: Amount,
        token: Option<&str>,
        description: &str,
    ) -> PaymentOutcome {
        if self.settings.disable_payment_processing {
            return PaymentOutcome::Approved;
        }

        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            return PaymentOutcome::Failed {
                message: self.generic_error(),
            };
        };

        let request = ChargeRequest {
            amount_cents: total.cents(),
            currency: self.settings.currency.clone(),
            card_token: token.to_string(),
            description: description.to_string(),
        };
        match self.gateway.charge(request).await {
            Ok(ChargeOutcome::Succeeded { charge_id }) => {
                info!(%charge_id, "charge succeeded");
                PaymentOutcome::Approved
            }
            Ok(ChargeOutcome::Declined { reason }) => PaymentOutcome::Failed {
                message: format!(
                    "We encountered the following error while processing your credit card: {reason}"
                ),
            },
            Err(err) => {
                error!("gateway charge failed: {err}");
                PaymentOutcome::Failed {
                    message: self.generic_error(),
                }
            }
        }
    }

    fn generic_error(&self) -> String {
        format!(
            "We encountered an error while processing your credit card. \
             Please contact {} for assistance.",
            self.settings.contact_email
        )
    }
}
