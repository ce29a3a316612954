use chrono::NaiveDate;
use clap::Parser;
use confreg::application::engine::{RegistrationEngine, RegistrationOutcome, RegistrationRequest};
use confreg::config::Settings;
use confreg::domain::meeting::{Meeting, MeetingDonation, MeetingExtra, RegistrationOption};
use confreg::domain::ports::{MeetingStore, MeetingStoreBox, PaymentGatewayBox, RegistrationStoreBox};
use confreg::domain::registration::Registrant;
use confreg::infrastructure::in_memory::{InMemoryMeetingStore, InMemoryRegistrationStore};
use confreg::infrastructure::stripe::StripeGateway;
use confreg::interfaces::csv::schedule_reader::ScheduleReader;
use confreg::interfaces::forms::submission::FormData;
use miette::{IntoDiagnostic, Result};
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Registration submissions JSON file
    input: PathBuf,

    /// Meeting catalog JSON (meeting, options, extras, donation funds)
    #[arg(long)]
    meeting: PathBuf,

    /// Session schedule CSV to seed the catalog with
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Settings JSON; defaults apply when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Registration date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

/// The catalog file seeding one meeting's registration surface.
#[derive(Deserialize)]
struct MeetingCatalog {
    meeting: Meeting,
    #[serde(default)]
    options: Vec<RegistrationOption>,
    #[serde(default)]
    extras: Vec<MeetingExtra>,
    #[serde(default)]
    donations: Vec<MeetingDonation>,
}

#[derive(Deserialize)]
struct Submission {
    registrant: Registrant,
    #[serde(default)]
    fields: FormData,
    #[serde(default)]
    payment_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = match &cli.settings {
        Some(path) => Settings::load(path).into_diagnostic()?,
        None => Settings::default(),
    };
    let as_of = cli
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let store = InMemoryMeetingStore::new();
    let catalog: MeetingCatalog =
        serde_json::from_reader(File::open(&cli.meeting).into_diagnostic()?).into_diagnostic()?;
    let meeting_id = catalog.meeting.id;
    store.insert_meeting(catalog.meeting).await;
    for option in catalog.options {
        store.insert_option(option).await;
    }
    for extra in catalog.extras {
        store.insert_extra(extra).await;
    }
    for donation in catalog.donations {
        store.insert_donation_type(donation).await;
    }

    if let Some(path) = &cli.schedule {
        let reader = ScheduleReader::new(File::open(path).into_diagnostic()?);
        for record in reader.sessions() {
            match record {
                Ok(session) => {
                    store.insert_session(session).await.into_diagnostic()?;
                }
                Err(e) => warn!("skipping malformed schedule row: {e}"),
            }
        }
    }

    let meeting_store: MeetingStoreBox = Box::new(store.clone());
    let registration_store: RegistrationStoreBox = Box::new(InMemoryRegistrationStore::new());
    let gateway: PaymentGatewayBox = Box::new(StripeGateway::new(settings.stripe_secret_key.clone()));
    let engine = RegistrationEngine::new(meeting_store, registration_store, gateway, settings);

    let submissions: Vec<Submission> =
        serde_json::from_reader(File::open(&cli.input).into_diagnostic()?).into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());
    writer
        .write_record(["email", "status", "total", "detail"])
        .into_diagnostic()?;

    for submission in submissions {
        let email = submission.registrant.email.clone();
        let request = RegistrationRequest {
            meeting: meeting_id,
            registrant: submission.registrant,
            fields: submission.fields,
            payment_token: submission.payment_token,
            as_of,
        };
        let record = match engine.register(request).await {
            Ok(RegistrationOutcome::Registered { id, total, .. }) => [
                email.clone(),
                "registered".to_string(),
                total.to_string(),
                format!("registration #{id}"),
            ],
            Ok(RegistrationOutcome::Invalid(errors)) => [
                email.clone(),
                "invalid".to_string(),
                String::new(),
                errors.to_string(),
            ],
            Ok(RegistrationOutcome::PaymentFailed { message }) => [
                email.clone(),
                "payment_failed".to_string(),
                String::new(),
                message,
            ],
            Err(e) => {
                error!("error processing registration for {email}: {e}");
                continue;
            }
        };
        writer.write_record(&record).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}
