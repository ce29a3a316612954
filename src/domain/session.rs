use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CadreRole {
    Chair,
    Organizer,
    Commentator,
}

/// A person serving a role (chair, organizer, commentator) on a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCadre {
    pub role: CadreRole,
    pub first_name: String,
    #[serde(default)]
    pub mi: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    pub email: String,
    pub institution: String,
}

/// A `(start_time, stop_time)` pair grouping sessions on the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: NaiveDateTime,
    pub stop_time: NaiveDateTime,
}

impl TimeSlot {
    /// Display string used as the label of the slot's form field.
    pub fn display(&self) -> String {
        format!(
            "{}, {} to {}",
            self.start_time.format("%B %-d, %Y"),
            self.start_time.format("%-I:%M %p"),
            self.stop_time.format("%-I:%M %p"),
        )
    }
}

/// A conference session. Proposals start out unaccepted and without a time
/// slot; the program committee assigns times on acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: u32,
    pub meeting: u32,
    pub title: String,
    #[serde(default)]
    pub abstract_text: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub num_papers: u32,
    pub start_time: Option<NaiveDateTime>,
    pub stop_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub cadre: Vec<SessionCadre>,
    #[serde(default)]
    pub papers: Vec<u32>,
}

impl Session {
    /// The slot this session occupies, when both times are assigned.
    pub fn time_slot(&self) -> Option<TimeSlot> {
        match (self.start_time, self.stop_time) {
            (Some(start_time), Some(stop_time)) => Some(TimeSlot {
                start_time,
                stop_time,
            }),
            _ => None,
        }
    }
}

/// The presenter attached to a submitted paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperPresenter {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub birth_year: Option<u16>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: u32,
    pub meeting: u32,
    pub title: String,
    pub abstract_text: String,
    pub presenter: PaperPresenter,
    /// Email of the submitting user.
    pub submitter: String,
    #[serde(default)]
    pub accepted: bool,
}
