use crate::domain::ports::{ChargeOutcome, ChargeRequest, PaymentGateway};
use crate::error::{RegistrationError, Result};
use async_trait::async_trait;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe-backed implementation of the [`PaymentGateway`] port.
///
/// Charges are created with a form-encoded POST to `/v1/charges` carrying
/// the opaque card token; raw card data never passes through this process.
/// The API base is injectable so tests can point at a local stub.
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::with_api_base(secret_key, DEFAULT_API_BASE)
    }

    pub fn with_api_base(secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: secret_key.into(),
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeOutcome> {
        let params = [
            ("amount", request.amount_cents.to_string()),
            ("currency", request.currency),
            ("card", request.card_token),
            ("description", request.description),
        ];
        let response = self
            .client
            .post(format!("{}/v1/charges", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| RegistrationError::GatewayError(e.to_string()))?;

        if response.status().is_success() {
            let charge: ChargeResponse = response
                .json()
                .await
                .map_err(|e| RegistrationError::GatewayError(e.to_string()))?;
            return Ok(ChargeOutcome::Succeeded {
                charge_id: charge.id,
            });
        }

        let status = response.status();
        let body: ErrorResponse = response
            .json()
            .await
            .map_err(|e| RegistrationError::GatewayError(e.to_string()))?;
        charge_error(status.as_u16(), body.error)
    }
}

/// Card errors are declines the registrant can act on; everything else is a
/// gateway fault.
fn charge_error(status: u16, error: ErrorBody) -> Result<ChargeOutcome> {
    if error.r#type == "card_error" {
        return Ok(ChargeOutcome::Declined {
            reason: error.message,
        });
    }
    Err(RegistrationError::GatewayError(format!(
        "HTTP {status}: {} {}",
        error.r#type, error.message
    )))
}

#[derive(Deserialize)]
struct ChargeResponse {
    id: String,
}

#[derive(Deserialize, Default)]
struct ErrorResponse {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    r#type: String,
    #[serde(default)]
    message: String,
}
