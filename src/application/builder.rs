use crate::domain::meeting::Meeting;
use crate::domain::ports::MeetingStore;
use crate::domain::session::TimeSlot;
use crate::error::Result;
use crate::interfaces::forms::schema::{Choice, FieldKind, FieldSpec, FormSchema};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Number of expiration years offered on the card form, current year
/// included.
const CARD_EXP_YEARS: i32 = 15;

/// Synthesizes form schemas for a meeting by querying the catalog store.
pub struct FormBuilder<'a> {
    store: &'a dyn MeetingStore,
}

impl<'a> FormBuilder<'a> {
    pub fn new(store: &'a dyn MeetingStore) -> Self {
        Self { store }
    }

    /// One optional multi-choice field per distinct time slot of the
    /// meeting's accepted sessions, named `sessions_0..n-1`. A meeting with
    /// no timed accepted sessions yields an empty schema.
    pub async fn session_form(&self, meeting_id: u32) -> Result<FormSchema> {
        let sessions = self.store.accepted_sessions(meeting_id).await?;

        let mut slots: Vec<TimeSlot> = Vec::new();
        for session in &sessions {
            if let Some(slot) = session.time_slot()
                && !slots.contains(&slot)
            {
                slots.push(slot);
            }
        }
        slots.sort();

        let mut schema = FormSchema::new("sessions");
        for (i, slot) in slots.iter().enumerate() {
            let choices = sessions
                .iter()
                .filter(|s| s.time_slot() == Some(*slot))
                .map(|s| Choice::new(s.id.to_string(), s.title.clone()))
                .collect();
            schema.push(FieldSpec::new(
                format!("sessions_{i}"),
                slot.display(),
                FieldKind::MultiChoice { choices },
            ));
        }
        debug!(meeting_id, slots = slots.len(), "built session form");
        Ok(schema)
    }

    /// The main registration form: a required type choice priced for
    /// `as_of`, optional guest name fields, and a special-needs text area.
    pub async fn registration_form(
        &self,
        meeting: &Meeting,
        as_of: NaiveDate,
    ) -> Result<FormSchema> {
        let early = meeting.early_pricing(as_of);
        let mut choices = vec![Choice::new("", "Please select")];
        for option in self.store.registration_options(meeting.id).await? {
            if option.admin_only {
                continue;
            }
            choices.push(Choice::new(
                option.id.to_string(),
                format!("{}\t${}", option.name, option.price(early).value()),
            ));
        }

        let mut schema = FormSchema::new("registration");
        schema.push(
            FieldSpec::new("type", "Registration Type", FieldKind::Choice { choices }).required(),
        );
        schema.push(FieldSpec::new(
            "guest_first_name",
            "Guest First Name",
            FieldKind::Text {
                max_length: Some(45),
            },
        ));
        schema.push(FieldSpec::new(
            "guest_last_name",
            "Guest Last Name",
            FieldKind::Text {
                max_length: Some(45),
            },
        ));
        schema.push(FieldSpec::new(
            "special_needs",
            "Special Needs",
            FieldKind::TextArea,
        ));
        Ok(schema)
    }

    /// Fixed-price extras: a boolean field for single-quantity extras, a
    /// bounded quantity field otherwise.
    pub async fn extras_form(&self, meeting_id: u32) -> Result<FormSchema> {
        let mut schema = FormSchema::new("extras");
        for extra in self.store.extras(meeting_id).await? {
            if extra.admin_only {
                continue;
            }
            let field = if extra.max_quantity == 1 {
                FieldSpec::new(extra.name, extra.label, FieldKind::Boolean)
            } else {
                FieldSpec::new(
                    extra.name,
                    extra.label,
                    FieldKind::Quantity {
                        max: extra.max_quantity,
                    },
                )
                .initial("0")
            };
            schema.push(field.help_text(extra.help_text));
        }
        Ok(schema)
    }

    /// One optional money field per donation fund, displayed with a currency
    /// prefix.
    pub async fn donations_form(&self, meeting_id: u32) -> Result<FormSchema> {
        let mut schema = FormSchema::new("donations");
        for donation in self.store.donation_types(meeting_id).await? {
            schema.push(
                FieldSpec::new(
                    donation.name,
                    donation.label,
                    FieldKind::Money {
                        prefix: "$".to_string(),
                    },
                )
                .initial("0")
                .help_text(donation.help_text),
            );
        }
        Ok(schema)
    }

    /// Tokenized card fields. Values entered here go to the gateway's
    /// browser library; only the resulting token reaches the server.
    pub fn payment_form(&self, as_of: NaiveDate) -> FormSchema {
        let months = (1..=12)
            .map(|m| Choice::new(format!("{m:02}"), format!("{m}")))
            .collect();
        let years = (as_of.year()..as_of.year() + CARD_EXP_YEARS)
            .map(|y| Choice::new(y.to_string(), y.to_string()))
            .collect();

        let mut schema = FormSchema::new("payment");
        schema.push(
            FieldSpec::new(
                "number",
                "Card Number",
                FieldKind::GatewayText {
                    gateway_field: "number".to_string(),
                },
            )
            .required(),
        );
        schema.push(
            FieldSpec::new(
                "name",
                "Card Holder Name",
                FieldKind::GatewayText {
                    gateway_field: "name".to_string(),
                },
            )
            .required(),
        );
        schema.push(
            FieldSpec::new(
                "exp_month",
                "Expiration Month",
                FieldKind::GatewaySelect {
                    gateway_field: "exp-month".to_string(),
                    choices: months,
                },
            )
            .required(),
        );
        schema.push(
            FieldSpec::new(
                "exp_year",
                "Expiration Year",
                FieldKind::GatewaySelect {
                    gateway_field: "exp-year".to_string(),
                    choices: years,
                },
            )
            .required(),
        );
        schema.push(
            FieldSpec::new(
                "cvc",
                "CVC Number",
                FieldKind::GatewayText {
                    gateway_field: "cvc".to_string(),
                },
            )
            .required(),
        );
        schema
    }
}
