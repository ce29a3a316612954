use super::money::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cc")]
    CreditCard,
    #[serde(rename = "check")]
    Check,
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "na")]
    NotApplicable,
}

/// The user registering for a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registrant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationGuest {
    pub first_name: String,
    pub last_name: String,
}

/// A purchased extra, with the unit price in effect at registration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationExtra {
    pub extra: String,
    pub quantity: u32,
    pub price: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationDonation {
    pub donate_type: String,
    pub total: Amount,
}

/// A completed meeting registration, assembled from a validated submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub meeting: u32,
    pub registrant: Registrant,
    /// Id of the chosen [`RegistrationOption`](super::meeting::RegistrationOption).
    pub option: u32,
    #[serde(default)]
    pub special_needs: String,
    pub date_entered: NaiveDate,
    pub payment_method: PaymentMethod,
    /// Username of the account the registration was entered under.
    pub entered_by: String,
    #[serde(default)]
    pub sessions: Vec<u32>,
    #[serde(default)]
    pub guest: Option<RegistrationGuest>,
    #[serde(default)]
    pub extras: Vec<RegistrationExtra>,
    #[serde(default)]
    pub donations: Vec<RegistrationDonation>,
}

impl Registration {
    pub fn extras_total(&self) -> Amount {
        self.extras
            .iter()
            .fold(Amount::ZERO, |acc, e| acc + e.price.times(e.quantity))
    }

    pub fn donations_total(&self) -> Amount {
        self.donations
            .iter()
            .fold(Amount::ZERO, |acc, d| acc + d.total)
    }
}
