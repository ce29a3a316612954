use super::meeting::{Meeting, MeetingDonation, MeetingExtra, RegistrationOption};
use super::registration::Registration;
use super::session::{Paper, Session};
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Read side of the meeting catalog, plus the proposal intake surface.
///
/// Implementations must return accepted sessions ordered by
/// `(start_time, stop_time)` and catalog rows in insertion order.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    async fn meeting(&self, meeting_id: u32) -> Result<Option<Meeting>>;
    async fn session(&self, session_id: u32) -> Result<Option<Session>>;
    async fn accepted_sessions(&self, meeting_id: u32) -> Result<Vec<Session>>;
    async fn registration_options(&self, meeting_id: u32) -> Result<Vec<RegistrationOption>>;
    async fn extras(&self, meeting_id: u32) -> Result<Vec<MeetingExtra>>;
    async fn donation_types(&self, meeting_id: u32) -> Result<Vec<MeetingDonation>>;
    /// Stores a session, assigning an id when the session carries id 0.
    async fn insert_session(&self, session: Session) -> Result<u32>;
    /// Stores a paper, assigning an id when the paper carries id 0.
    async fn insert_paper(&self, paper: Paper) -> Result<u32>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Persists a registration and returns its assigned id.
    async fn store(&self, registration: Registration) -> Result<u32>;
    async fn for_meeting(&self, meeting_id: u32) -> Result<Vec<Registration>>;
}

pub type MeetingStoreBox = Box<dyn MeetingStore>;
pub type RegistrationStoreBox = Box<dyn RegistrationStore>;

/// A charge request against the external payment gateway. Card data never
/// appears here; the registrant's card is represented by an opaque token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeRequest {
    pub amount_cents: i64,
    pub currency: String,
    pub card_token: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChargeOutcome {
    Succeeded { charge_id: String },
    /// The card was declined; `reason` is safe to show to the registrant.
    Declined { reason: String },
}

/// External payment gateway port. `Err` is reserved for transport or
/// configuration failures; declines are data.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: ChargeRequest) -> Result<ChargeOutcome>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
