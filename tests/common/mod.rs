use chrono::NaiveDate;
use confreg::config::Settings;
use confreg::domain::meeting::{Meeting, MeetingDonation, MeetingExtra, RegistrationOption};
use confreg::domain::money::Amount;
use confreg::domain::ports::MeetingStore;
use confreg::domain::session::Session;
use confreg::infrastructure::in_memory::InMemoryMeetingStore;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

pub const MEETING_ID: u32 = 1;

/// 2026-09-15; early prices apply through this date.
pub fn early_deadline() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 15).unwrap()
}

pub fn meeting() -> Meeting {
    Meeting {
        id: MEETING_ID,
        title: "Annual Meeting".to_string(),
        location: "Cambridge".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 11, 5).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 11, 8).unwrap(),
        early_reg_deadline: early_deadline(),
        reg_deadline: NaiveDate::from_ymd_opt(2026, 10, 30).unwrap(),
    }
}

pub fn amount(value: &str) -> Amount {
    Amount::new(value.parse::<Decimal>().unwrap()).unwrap()
}

pub fn session(id: u32, title: &str, hour: u32) -> Session {
    let start = NaiveDate::from_ymd_opt(2026, 11, 6)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    Session {
        id,
        meeting: MEETING_ID,
        title: title.to_string(),
        abstract_text: String::new(),
        notes: String::new(),
        num_papers: 0,
        start_time: Some(start),
        stop_time: Some(start + chrono::Duration::minutes(90)),
        accepted: true,
        cadre: Vec::new(),
        papers: Vec::new(),
    }
}

/// A catalog with two public options, one admin-only option, two extras,
/// one donation fund, and three accepted sessions across two time slots.
pub async fn seeded_store() -> InMemoryMeetingStore {
    let store = InMemoryMeetingStore::new();
    store.insert_meeting(meeting()).await;

    store
        .insert_option(RegistrationOption {
            id: 1,
            meeting: MEETING_ID,
            name: "Member".to_string(),
            early_price: amount("40.00"),
            regular_price: amount("55.00"),
            admin_only: false,
        })
        .await;
    store
        .insert_option(RegistrationOption {
            id: 2,
            meeting: MEETING_ID,
            name: "Student".to_string(),
            early_price: amount("20.00"),
            regular_price: amount("30.00"),
            admin_only: false,
        })
        .await;
    store
        .insert_option(RegistrationOption {
            id: 3,
            meeting: MEETING_ID,
            name: "Complimentary".to_string(),
            early_price: amount("0"),
            regular_price: amount("0"),
            admin_only: true,
        })
        .await;

    store
        .insert_extra(MeetingExtra {
            meeting: MEETING_ID,
            name: "program".to_string(),
            label: "Printed program".to_string(),
            help_text: "Mailed in advance".to_string(),
            price: amount("10.00"),
            max_quantity: 1,
            admin_only: false,
        })
        .await;
    store
        .insert_extra(MeetingExtra {
            meeting: MEETING_ID,
            name: "banquet".to_string(),
            label: "Banquet tickets".to_string(),
            help_text: String::new(),
            price: amount("30.00"),
            max_quantity: 4,
            admin_only: false,
        })
        .await;

    store
        .insert_donation_type(MeetingDonation {
            meeting: MEETING_ID,
            name: "travel_fund".to_string(),
            label: "Student travel fund".to_string(),
            help_text: String::new(),
        })
        .await;

    store
        .insert_session(session(10, "Early computing", 9))
        .await
        .unwrap();
    store
        .insert_session(session(11, "Navigation", 9))
        .await
        .unwrap();
    store
        .insert_session(session(12, "Astronomy", 11))
        .await
        .unwrap();

    store
}

pub fn offline_settings() -> Settings {
    Settings {
        disable_payment_processing: true,
        ..Default::default()
    }
}

/// Writes the CLI fixture files (catalog JSON, schedule CSV, settings JSON,
/// submissions JSON) into `dir` and returns their paths in that order.
pub fn write_cli_fixtures(dir: &Path) -> (PathBuf, PathBuf, PathBuf, PathBuf) {
    let catalog_path = dir.join("catalog.json");
    std::fs::write(
        &catalog_path,
        serde_json::json!({
            "meeting": {
                "id": 1,
                "title": "Annual Meeting",
                "location": "Cambridge",
                "start_date": "2026-11-05",
                "end_date": "2026-11-08",
                "early_reg_deadline": "2026-09-15",
                "reg_deadline": "2026-10-30"
            },
            "options": [
                {"id": 1, "meeting": 1, "name": "Member",
                 "early_price": "40.00", "regular_price": "55.00"},
                {"id": 2, "meeting": 1, "name": "Student",
                 "early_price": "20.00", "regular_price": "30.00"}
            ],
            "extras": [
                {"meeting": 1, "name": "banquet", "label": "Banquet tickets",
                 "price": "30.00", "max_quantity": 4}
            ],
            "donations": [
                {"meeting": 1, "name": "travel_fund", "label": "Student travel fund"}
            ]
        })
        .to_string(),
    )
    .unwrap();

    let schedule_path = dir.join("schedule.csv");
    std::fs::write(
        &schedule_path,
        "session,meeting,title,start_time,stop_time,accepted\n\
         10,1,Early computing,2026-11-06 09:00,2026-11-06 10:30,true\n\
         11,1,Navigation,2026-11-06 09:00,2026-11-06 10:30,true\n",
    )
    .unwrap();

    let settings_path = dir.join("settings.json");
    std::fs::write(
        &settings_path,
        serde_json::json!({"disable_payment_processing": true}).to_string(),
    )
    .unwrap();

    let submissions_path = dir.join("submissions.json");
    std::fs::write(
        &submissions_path,
        serde_json::json!([
            {
                "registrant": {
                    "first_name": "Alice", "last_name": "Paul",
                    "email": "alice@example.org"
                },
                "fields": {
                    "type": "1",
                    "sessions_0": ["10", "11"],
                    "banquet": "2",
                    "travel_fund": "15.00",
                    "guest_first_name": "Linus",
                    "guest_last_name": "Pauling"
                }
            },
            {
                "registrant": {
                    "first_name": "Bob", "last_name": "Noyce",
                    "email": "bob@example.org"
                },
                "fields": {}
            }
        ])
        .to_string(),
    )
    .unwrap();

    (catalog_path, schedule_path, settings_path, submissions_path)
}
