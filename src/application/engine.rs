use super::builder::FormBuilder;
use super::payment::{PaymentOutcome, PaymentProcessor};
use super::proposals::{PaperProposal, SessionProposal};
use super::validation::{CleanedForm, ValidationErrors, clean};
use crate::config::Settings;
use crate::domain::meeting::Meeting;
use crate::domain::money::Amount;
use crate::domain::ports::{MeetingStoreBox, PaymentGatewayBox, RegistrationStoreBox};
use crate::domain::registration::{
    PaymentMethod, Registrant, Registration, RegistrationDonation, RegistrationExtra,
    RegistrationGuest,
};
use crate::error::{RegistrationError, Result};
use crate::interfaces::forms::schema::FormSchema;
use crate::interfaces::forms::submission::FormData;
use chrono::NaiveDate;
use tracing::info;

/// A raw registration submission: the registrant, the posted form fields
/// across all four sections, and the card token minted client-side.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub meeting: u32,
    pub registrant: Registrant,
    pub fields: FormData,
    pub payment_token: Option<String>,
    pub as_of: NaiveDate,
}

#[derive(Debug, Clone)]
pub enum RegistrationOutcome {
    Registered {
        id: u32,
        registration: Registration,
        total: Amount,
    },
    Invalid(ValidationErrors),
    /// Validation passed but the charge did not; nothing was persisted.
    PaymentFailed { message: String },
}

#[derive(Debug, Clone)]
pub enum ProposalOutcome {
    Submitted { id: u32 },
    Invalid(ValidationErrors),
}

/// The main entry point for meeting registration and proposal intake.
///
/// Owns the storage backends and the payment processor; synthesizes the form
/// schemas for each request so validation always runs against the catalog
/// and pricing in effect at submission time.
pub struct RegistrationEngine {
    meeting_store: MeetingStoreBox,
    registration_store: RegistrationStoreBox,
    payments: PaymentProcessor,
    settings: Settings,
}

impl RegistrationEngine {
    pub fn new(
        meeting_store: MeetingStoreBox,
        registration_store: RegistrationStoreBox,
        gateway: PaymentGatewayBox,
        settings: Settings,
    ) -> Self {
        Self {
            meeting_store,
            registration_store,
            payments: PaymentProcessor::new(gateway, settings.clone()),
            settings,
        }
    }

    /// Validates and prices a submission, charges the card, and persists the
    /// registration. Validation and payment failures are outcomes, not
    /// errors; `Err` is reserved for store and catalog faults.
    pub async fn register(&self, request: RegistrationRequest) -> Result<RegistrationOutcome> {
        let meeting = self.lookup_meeting(request.meeting).await?;

        let builder = FormBuilder::new(self.meeting_store.as_ref());
        let session_schema = builder.session_form(meeting.id).await?;
        let registration_schema = builder.registration_form(&meeting, request.as_of).await?;
        let extras_schema = builder.extras_form(meeting.id).await?;
        let donations_schema = builder.donations_form(meeting.id).await?;

        let mut errors = ValidationErrors::default();
        let sessions_clean = collect(clean(&session_schema, &request.fields), &mut errors);
        let registration_clean = collect(clean(&registration_schema, &request.fields), &mut errors);
        let extras_clean = collect(clean(&extras_schema, &request.fields), &mut errors);
        let donations_clean = collect(clean(&donations_schema, &request.fields), &mut errors);
        if !errors.is_empty() {
            return Ok(RegistrationOutcome::Invalid(errors));
        }

        // The choice field vouches for the option id; a miss below is a
        // catalog fault, not user error.
        let option_id: u32 = registration_clean
            .text("type")
            .parse()
            .map_err(|_| RegistrationError::ValidationError("bad option id".to_string()))?;
        let option = self
            .meeting_store
            .registration_options(meeting.id)
            .await?
            .into_iter()
            .find(|o| o.id == option_id)
            .ok_or_else(|| {
                RegistrationError::StoreError(format!("registration option {option_id} vanished"))
            })?;

        let mut selected_sessions = Vec::new();
        for field in &session_schema.fields {
            for value in sessions_clean.multi(&field.name) {
                let session_id: u32 = value.parse().map_err(|_| {
                    RegistrationError::ValidationError("bad session id".to_string())
                })?;
                selected_sessions.push(session_id);
            }
        }

        let guest = match registration_clean.text("guest_first_name") {
            "" => None,
            first_name => Some(RegistrationGuest {
                first_name: first_name.to_string(),
                last_name: registration_clean.text("guest_last_name").to_string(),
            }),
        };

        let mut extras = Vec::new();
        for extra in self.meeting_store.extras(meeting.id).await? {
            if extra.admin_only {
                continue;
            }
            let quantity = extras_clean.quantity(&extra.name);
            if quantity == 0 {
                continue;
            }
            extras.push(RegistrationExtra {
                extra: extra.name.clone(),
                quantity,
                price: extra.price,
            });
        }

        let mut donations = Vec::new();
        for fund in self.meeting_store.donation_types(meeting.id).await? {
            let total = donations_clean.money(&fund.name);
            if total.is_zero() {
                continue;
            }
            donations.push(RegistrationDonation {
                donate_type: fund.name.clone(),
                total: Amount::new(total)?,
            });
        }

        let registration = Registration {
            meeting: meeting.id,
            registrant: request.registrant,
            option: option.id,
            special_needs: registration_clean.text("special_needs").to_string(),
            date_entered: request.as_of,
            payment_method: PaymentMethod::CreditCard,
            entered_by: self.settings.online_reg_username.clone(),
            sessions: selected_sessions,
            guest,
            extras,
            donations,
        };

        let total = option.price(meeting.early_pricing(request.as_of))
            + registration.extras_total()
            + registration.donations_total();

        let description = format!(
            "{} registration for {}",
            meeting.title, registration.registrant.email
        );
        match self
            .payments
            .process(total, request.payment_token.as_deref(), &description)
            .await
        {
            PaymentOutcome::Approved => {
                let id = self.registration_store.store(registration.clone()).await?;
                info!(
                    registration = id,
                    meeting = meeting.id,
                    total = %total,
                    "registration stored"
                );
                Ok(RegistrationOutcome::Registered {
                    id,
                    registration,
                    total,
                })
            }
            PaymentOutcome::Failed { message } => {
                Ok(RegistrationOutcome::PaymentFailed { message })
            }
        }
    }

    /// Validates a session proposal and stores it, unaccepted, in the
    /// meeting catalog.
    pub async fn propose_session(&self, proposal: SessionProposal) -> Result<ProposalOutcome> {
        self.lookup_meeting(proposal.meeting).await?;
        if let Err(errors) = proposal.validate(self.settings.abstract_max_words) {
            return Ok(ProposalOutcome::Invalid(errors));
        }
        let id = self
            .meeting_store
            .insert_session(proposal.into_session())
            .await?;
        info!(session = id, "session proposal stored");
        Ok(ProposalOutcome::Submitted { id })
    }

    /// Validates a paper proposal and stores it, unaccepted.
    pub async fn submit_paper(&self, proposal: PaperProposal) -> Result<ProposalOutcome> {
        self.lookup_meeting(proposal.meeting).await?;
        if let Err(errors) = proposal.validate(self.settings.abstract_max_words) {
            return Ok(ProposalOutcome::Invalid(errors));
        }
        let id = self
            .meeting_store
            .insert_paper(proposal.into_paper())
            .await?;
        info!(paper = id, "paper proposal stored");
        Ok(ProposalOutcome::Submitted { id })
    }

    /// Form schemas a client should render for a registration page.
    pub async fn registration_schemas(
        &self,
        meeting_id: u32,
        as_of: NaiveDate,
    ) -> Result<Vec<FormSchema>> {
        let meeting = self.lookup_meeting(meeting_id).await?;
        let builder = FormBuilder::new(self.meeting_store.as_ref());
        Ok(vec![
            builder.registration_form(&meeting, as_of).await?,
            builder.session_form(meeting.id).await?,
            builder.extras_form(meeting.id).await?,
            builder.donations_form(meeting.id).await?,
            builder.payment_form(as_of),
        ])
    }

    pub async fn registrations(&self, meeting_id: u32) -> Result<Vec<Registration>> {
        self.registration_store.for_meeting(meeting_id).await
    }

    async fn lookup_meeting(&self, meeting_id: u32) -> Result<Meeting> {
        self.meeting_store
            .meeting(meeting_id)
            .await?
            .ok_or(RegistrationError::UnknownMeeting(meeting_id))
    }
}

fn collect(
    result: std::result::Result<CleanedForm, ValidationErrors>,
    errors: &mut ValidationErrors,
) -> CleanedForm {
    match result {
        Ok(cleaned) => cleaned,
        Err(e) => {
            errors.merge(e);
            CleanedForm::default()
        }
    }
}
