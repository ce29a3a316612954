use super::money::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A conference meeting open for registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: u32,
    pub title: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub early_reg_deadline: NaiveDate,
    pub reg_deadline: NaiveDate,
}

impl Meeting {
    /// Early pricing applies through the deadline date itself; the switch to
    /// regular prices happens the day after.
    pub fn early_pricing(&self, as_of: NaiveDate) -> bool {
        as_of <= self.early_reg_deadline
    }

    pub fn registration_open(&self, as_of: NaiveDate) -> bool {
        as_of <= self.reg_deadline
    }
}

/// A registration type offered for a meeting (e.g. member, student).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationOption {
    pub id: u32,
    pub meeting: u32,
    pub name: String,
    pub early_price: Amount,
    pub regular_price: Amount,
    /// Options reserved for staff-entered registrations never appear in the
    /// public form.
    #[serde(default)]
    pub admin_only: bool,
}

impl RegistrationOption {
    pub fn price(&self, early: bool) -> Amount {
        if early {
            self.early_price
        } else {
            self.regular_price
        }
    }
}

/// A fixed-price add-on purchasable during registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingExtra {
    pub meeting: u32,
    /// Form field name, unique within the meeting.
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub help_text: String,
    pub price: Amount,
    pub max_quantity: u32,
    #[serde(default)]
    pub admin_only: bool,
}

/// A donation fund registrants can contribute to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingDonation {
    pub meeting: u32,
    /// Form field name, unique within the meeting.
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub help_text: String,
}
