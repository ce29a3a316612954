use crate::domain::session::Session;
use crate::error::{RegistrationError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use std::io::Read;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One row of a schedule CSV: `session, meeting, title, start_time,
/// stop_time, accepted`. Times use `YYYY-MM-DD HH:MM` and may be blank for
/// sessions not yet assigned a slot.
#[derive(Debug, Deserialize)]
pub struct SessionRecord {
    pub session: u32,
    pub meeting: u32,
    pub title: String,
    #[serde(deserialize_with = "optional_time")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(deserialize_with = "optional_time")]
    pub stop_time: Option<NaiveDateTime>,
    pub accepted: bool,
}

fn optional_time<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Self {
            id: record.session,
            meeting: record.meeting,
            title: record.title,
            abstract_text: String::new(),
            notes: String::new(),
            num_papers: 0,
            start_time: record.start_time,
            stop_time: record.stop_time,
            accepted: record.accepted,
            cadre: Vec::new(),
            papers: Vec::new(),
        }
    }
}

/// Reads session schedules from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<Session>`, so malformed rows can be skipped without aborting the
/// import. Whitespace is trimmed automatically.
pub struct ScheduleReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScheduleReader<R> {
    /// Creates a new `ScheduleReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes sessions.
    pub fn sessions(self) -> impl Iterator<Item = Result<Session>> {
        self.reader
            .into_deserialize::<SessionRecord>()
            .map(|result| result.map(Session::from).map_err(RegistrationError::from))
    }
}
