use crate::domain::meeting::{Meeting, MeetingDonation, MeetingExtra, RegistrationOption};
use crate::domain::ports::{MeetingStore, RegistrationStore};
use crate::domain::registration::Registration;
use crate::domain::session::{Paper, Session};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory meeting catalog.
///
/// Uses `Arc<RwLock<..>>` to allow shared concurrent access. This doubles as
/// the seeding surface for the CLI and tests: `insert_meeting`,
/// `insert_option`, `insert_extra`, and `insert_donation_type` populate the
/// catalog the `MeetingStore` queries serve from.
#[derive(Default, Clone)]
pub struct InMemoryMeetingStore {
    inner: Arc<RwLock<CatalogState>>,
}

#[derive(Default)]
struct CatalogState {
    meetings: HashMap<u32, Meeting>,
    sessions: HashMap<u32, Session>,
    options: Vec<RegistrationOption>,
    extras: Vec<MeetingExtra>,
    donations: Vec<MeetingDonation>,
    papers: HashMap<u32, Paper>,
}

impl CatalogState {
    fn next_session_id(&self) -> u32 {
        self.sessions.keys().max().copied().unwrap_or(0) + 1
    }

    fn next_paper_id(&self) -> u32 {
        self.papers.keys().max().copied().unwrap_or(0) + 1
    }
}

impl InMemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_meeting(&self, meeting: Meeting) {
        let mut state = self.inner.write().await;
        state.meetings.insert(meeting.id, meeting);
    }

    pub async fn insert_option(&self, option: RegistrationOption) {
        let mut state = self.inner.write().await;
        state.options.push(option);
    }

    pub async fn insert_extra(&self, extra: MeetingExtra) {
        let mut state = self.inner.write().await;
        state.extras.push(extra);
    }

    pub async fn insert_donation_type(&self, donation: MeetingDonation) {
        let mut state = self.inner.write().await;
        state.donations.push(donation);
    }
}

#[async_trait]
impl MeetingStore for InMemoryMeetingStore {
    async fn meeting(&self, meeting_id: u32) -> Result<Option<Meeting>> {
        let state = self.inner.read().await;
        Ok(state.meetings.get(&meeting_id).cloned())
    }

    async fn session(&self, session_id: u32) -> Result<Option<Session>> {
        let state = self.inner.read().await;
        Ok(state.sessions.get(&session_id).cloned())
    }

    async fn accepted_sessions(&self, meeting_id: u32) -> Result<Vec<Session>> {
        let state = self.inner.read().await;
        let mut sessions: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| s.meeting == meeting_id && s.accepted)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| (s.start_time, s.stop_time, s.id));
        Ok(sessions)
    }

    async fn registration_options(&self, meeting_id: u32) -> Result<Vec<RegistrationOption>> {
        let state = self.inner.read().await;
        Ok(state
            .options
            .iter()
            .filter(|o| o.meeting == meeting_id)
            .cloned()
            .collect())
    }

    async fn extras(&self, meeting_id: u32) -> Result<Vec<MeetingExtra>> {
        let state = self.inner.read().await;
        Ok(state
            .extras
            .iter()
            .filter(|e| e.meeting == meeting_id)
            .cloned()
            .collect())
    }

    async fn donation_types(&self, meeting_id: u32) -> Result<Vec<MeetingDonation>> {
        let state = self.inner.read().await;
        Ok(state
            .donations
            .iter()
            .filter(|d| d.meeting == meeting_id)
            .cloned()
            .collect())
    }

    async fn insert_session(&self, mut session: Session) -> Result<u32> {
        let mut state = self.inner.write().await;
        if session.id == 0 {
            session.id = state.next_session_id();
        }
        let id = session.id;
        state.sessions.insert(id, session);
        Ok(id)
    }

    async fn insert_paper(&self, mut paper: Paper) -> Result<u32> {
        let mut state = self.inner.write().await;
        if paper.id == 0 {
            paper.id = state.next_paper_id();
        }
        let id = paper.id;
        state.papers.insert(id, paper);
        Ok(id)
    }
}

/// A thread-safe in-memory registration store assigning sequential ids.
#[derive(Default, Clone)]
pub struct InMemoryRegistrationStore {
    registrations: Arc<RwLock<Vec<Registration>>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn store(&self, registration: Registration) -> Result<u32> {
        let mut registrations = self.registrations.write().await;
        registrations.push(registration);
        Ok(registrations.len() as u32)
    }

    async fn for_meeting(&self, meeting_id: u32) -> Result<Vec<Registration>> {
        let registrations = self.registrations.read().await;
        Ok(registrations
            .iter()
            .filter(|r| r.meeting == meeting_id)
            .cloned()
            .collect())
    }
}
