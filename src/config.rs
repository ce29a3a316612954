use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Environment variable that overrides the gateway secret key from the
/// settings file, so keys can stay out of checked-in configuration.
pub const STRIPE_KEY_ENV: &str = "CONFREG_STRIPE_SECRET_KEY";

/// Runtime settings for the registration engine.
///
/// Loaded from a JSON file via [`Settings::load`]; every field has a default
/// so partial files are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Username recorded as `entered_by` on online registrations.
    pub online_reg_username: String,
    /// Contact address shown in payment error messages.
    pub contact_email: String,
    /// Maximum words allowed in session/paper abstracts. 0 disables the limit.
    pub abstract_max_words: usize,
    /// When set, the payment processor approves everything without
    /// contacting the gateway.
    pub disable_payment_processing: bool,
    pub stripe_secret_key: String,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            online_reg_username: "online-registration".to_string(),
            contact_email: "registration@example.org".to_string(),
            abstract_max_words: 250,
            disable_payment_processing: false,
            stripe_secret_key: String::new(),
            currency: "usd".to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut settings: Self = serde_json::from_reader(file)?;
        if let Ok(key) = std::env::var(STRIPE_KEY_ENV) {
            settings.stripe_secret_key = key;
        }
        Ok(settings)
    }
}
