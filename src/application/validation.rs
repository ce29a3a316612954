use crate::interfaces::forms::schema::{FieldKind, FormSchema};
use crate::interfaces::forms::submission::FormData;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const REQUIRED_MESSAGE: &str = "This field is required.";

pub const PERSON_FIELDS_MESSAGE: &str = "Please fill in all the first name, \
    last name, email, and institution fields for this person.";

/// Maximum total digits accepted in a money field.
const MONEY_MAX_DIGITS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field- and form-level messages collected while validating a submission.
/// These are user-facing data, not engine errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub form: Vec<String>,
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.form.is_empty() && self.fields.is_empty()
    }

    pub fn push_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    pub fn push_field(&mut self, field: &str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn merge(&mut self, other: Self) {
        self.form.extend(other.form);
        self.fields.extend(other.fields);
    }

    pub fn messages(&self) -> Vec<String> {
        self.form
            .iter()
            .cloned()
            .chain(
                self.fields
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message)),
            )
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join(" "))
    }
}

/// A typed value produced by cleaning one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Choice(String),
    Multi(Vec<String>),
    Bool(bool),
    Quantity(u32),
    Money(Decimal),
    Text(String),
}

/// Cleaned submission values keyed by field name. Optional fields left blank
/// are simply absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedForm(BTreeMap<String, FormValue>);

impl CleanedForm {
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(FormValue::Text(v)) | Some(FormValue::Choice(v)) => v,
            _ => "",
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FormValue::Bool(true)))
    }

    pub fn quantity(&self, name: &str) -> u32 {
        match self.0.get(name) {
            Some(FormValue::Quantity(n)) => *n,
            Some(FormValue::Bool(true)) => 1,
            _ => 0,
        }
    }

    pub fn money(&self, name: &str) -> Decimal {
        match self.0.get(name) {
            Some(FormValue::Money(v)) => *v,
            _ => Decimal::ZERO,
        }
    }

    pub fn multi(&self, name: &str) -> &[String] {
        match self.0.get(name) {
            Some(FormValue::Multi(vs)) => vs,
            _ => &[],
        }
    }

    fn insert(&mut self, name: &str, value: FormValue) {
        self.0.insert(name.to_string(), value);
    }
}

/// Parses raw form data against a schema, producing typed values or the
/// collected field errors. Gateway fields are never read.
pub fn clean(schema: &FormSchema, data: &FormData) -> Result<CleanedForm, ValidationErrors> {
    let mut values = CleanedForm::default();
    let mut errors = ValidationErrors::default();

    for field in &schema.fields {
        let raw = data.value(&field.name).unwrap_or("").trim();

        match &field.kind {
            FieldKind::GatewayText { .. } | FieldKind::GatewaySelect { .. } => continue,
            FieldKind::Choice { choices } => {
                if raw.is_empty() {
                    if field.required {
                        errors.push_field(&field.name, REQUIRED_MESSAGE);
                    }
                } else if choices.iter().any(|c| !c.value.is_empty() && c.value == raw) {
                    values.insert(&field.name, FormValue::Choice(raw.to_string()));
                } else {
                    errors.push_field(
                        &field.name,
                        format!(
                            "Select a valid choice. {raw} is not one of the available choices."
                        ),
                    );
                }
            }
            FieldKind::MultiChoice { choices } => {
                let selected: Vec<String> = data
                    .values(&field.name)
                    .iter()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
                if selected.is_empty() {
                    if field.required {
                        errors.push_field(&field.name, REQUIRED_MESSAGE);
                    }
                    continue;
                }
                match selected
                    .iter()
                    .find(|v| !choices.iter().any(|c| &c.value == *v))
                {
                    Some(invalid) => errors.push_field(
                        &field.name,
                        format!(
                            "Select a valid choice. {invalid} is not one of the available choices."
                        ),
                    ),
                    None => values.insert(&field.name, FormValue::Multi(selected)),
                }
            }
            FieldKind::Boolean => {
                let set = matches!(
                    raw.to_ascii_lowercase().as_str(),
                    "on" | "true" | "yes" | "1"
                );
                if field.required && !set {
                    errors.push_field(&field.name, REQUIRED_MESSAGE);
                } else {
                    values.insert(&field.name, FormValue::Bool(set));
                }
            }
            FieldKind::Quantity { max } => {
                if raw.is_empty() {
                    if field.required {
                        errors.push_field(&field.name, REQUIRED_MESSAGE);
                    }
                    continue;
                }
                match raw.parse::<u32>() {
                    Ok(n) if n <= *max => values.insert(&field.name, FormValue::Quantity(n)),
                    Ok(_) => errors.push_field(
                        &field.name,
                        format!("Ensure this value is less than or equal to {max}."),
                    ),
                    Err(_) => errors.push_field(&field.name, "Enter a whole number."),
                }
            }
            FieldKind::Money { .. } => {
                if raw.is_empty() {
                    if field.required {
                        errors.push_field(&field.name, REQUIRED_MESSAGE);
                    }
                    continue;
                }
                match raw.parse::<Decimal>() {
                    Ok(value) if value < Decimal::ZERO => errors.push_field(
                        &field.name,
                        "Ensure this value is greater than or equal to 0.",
                    ),
                    Ok(value) if value.scale() > 2 => errors.push_field(
                        &field.name,
                        "Ensure that there are no more than 2 decimal places.",
                    ),
                    Ok(value) if decimal_digits(value) > MONEY_MAX_DIGITS => errors.push_field(
                        &field.name,
                        format!(
                            "Ensure that there are no more than {MONEY_MAX_DIGITS} digits in total."
                        ),
                    ),
                    Ok(value) => values.insert(&field.name, FormValue::Money(value)),
                    Err(_) => errors.push_field(&field.name, "Enter a number."),
                }
            }
            FieldKind::Text { .. } | FieldKind::TextArea => {
                let max_length = match &field.kind {
                    FieldKind::Text { max_length } => *max_length,
                    _ => None,
                };
                if raw.is_empty() {
                    if field.required {
                        errors.push_field(&field.name, REQUIRED_MESSAGE);
                    }
                    continue;
                }
                if let Some(max) = max_length
                    && raw.chars().count() > max
                {
                    errors.push_field(
                        &field.name,
                        format!("Ensure this value has at most {max} characters."),
                    );
                } else {
                    values.insert(&field.name, FormValue::Text(raw.to_string()));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

fn decimal_digits(value: Decimal) -> usize {
    let normalized = value.abs().normalize();
    normalized.mantissa().to_string().len()
}

/// An optional person sub-form (session cadre, guest presenter). The whole
/// block may be left blank, but once any field is entered the first name,
/// last name, email, and institution become mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonFields {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub mi: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub institution: String,
}

impl PersonFields {
    pub fn has_entered_info(&self) -> bool {
        [
            &self.first_name,
            &self.mi,
            &self.last_name,
            &self.email,
            &self.institution,
        ]
        .iter()
        .any(|f| !f.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.has_entered_info() {
            return Ok(());
        }
        let mandatory = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.institution,
        ];
        if mandatory.iter().any(|f| f.trim().is_empty()) {
            Err(PERSON_FIELDS_MESSAGE.to_string())
        } else {
            Ok(())
        }
    }
}

/// Rejects abstracts over the configured word limit; a limit of 0 means
/// unlimited.
pub fn check_abstract_words(text: &str, max_words: usize) -> Result<(), String> {
    if max_words == 0 {
        return Ok(());
    }
    let num_words = text.split_whitespace().count();
    if num_words > max_words {
        Err(format!(
            "Abstract can contain a maximum of {max_words} words. You supplied {num_words} words."
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::forms::schema::{Choice, FieldSpec};
    use rust_decimal_macros::dec;

    fn choice_schema() -> FormSchema {
        let mut schema = FormSchema::new("registration");
        schema.push(
            FieldSpec::new(
                "type",
                "Registration Type",
                FieldKind::Choice {
                    choices: vec![
                        Choice::new("", "Please select"),
                        Choice::new("1", "Member\t$40"),
                        Choice::new("2", "Student\t$20"),
                    ],
                },
            )
            .required(),
        );
        schema
    }

    #[test]
    fn test_required_choice() {
        let schema = choice_schema();

        let errors = clean(&schema, &FormData::new()).unwrap_err();
        assert_eq!(errors.fields[0].field, "type");
        assert_eq!(errors.fields[0].message, REQUIRED_MESSAGE);

        // The blank sentinel choice does not satisfy the requirement.
        let data: FormData = [("type", "")].into_iter().collect();
        assert!(clean(&schema, &data).is_err());

        let data: FormData = [("type", "2")].into_iter().collect();
        let cleaned = clean(&schema, &data).unwrap();
        assert_eq!(cleaned.text("type"), "2");
    }

    #[test]
    fn test_unknown_choice_rejected() {
        let schema = choice_schema();
        let data: FormData = [("type", "99")].into_iter().collect();

        let errors = clean(&schema, &data).unwrap_err();
        assert!(errors.fields[0].message.contains("Select a valid choice"));
    }

    #[test]
    fn test_boolean_parsing() {
        let mut schema = FormSchema::new("extras");
        schema.push(FieldSpec::new("banquet", "Banquet", FieldKind::Boolean));

        for raw in ["on", "true", "yes", "1"] {
            let data: FormData = [("banquet", raw)].into_iter().collect();
            assert!(clean(&schema, &data).unwrap().flag("banquet"), "{raw}");
        }
        let data: FormData = [("banquet", "0")].into_iter().collect();
        assert!(!clean(&schema, &data).unwrap().flag("banquet"));
        assert!(!clean(&schema, &FormData::new()).unwrap().flag("banquet"));
    }

    #[test]
    fn test_quantity_bounds() {
        let mut schema = FormSchema::new("extras");
        schema.push(FieldSpec::new("tote", "Tote bag", FieldKind::Quantity { max: 3 }));

        let data: FormData = [("tote", "3")].into_iter().collect();
        assert_eq!(clean(&schema, &data).unwrap().quantity("tote"), 3);

        let data: FormData = [("tote", "4")].into_iter().collect();
        let errors = clean(&schema, &data).unwrap_err();
        assert_eq!(
            errors.fields[0].message,
            "Ensure this value is less than or equal to 3."
        );

        let data: FormData = [("tote", "two")].into_iter().collect();
        assert!(clean(&schema, &data).is_err());
    }

    #[test]
    fn test_money_rules() {
        let mut schema = FormSchema::new("donations");
        schema.push(FieldSpec::new(
            "travel_fund",
            "Travel Fund",
            FieldKind::Money {
                prefix: "$".to_string(),
            },
        ));

        let data: FormData = [("travel_fund", "25.50")].into_iter().collect();
        assert_eq!(
            clean(&schema, &data).unwrap().money("travel_fund"),
            dec!(25.50)
        );

        let data: FormData = [("travel_fund", "-5")].into_iter().collect();
        assert!(clean(&schema, &data).is_err());

        let data: FormData = [("travel_fund", "1.234")].into_iter().collect();
        assert!(clean(&schema, &data).is_err());

        let data: FormData = [("travel_fund", "12345.67")].into_iter().collect();
        assert!(clean(&schema, &data).is_err());

        let data: FormData = [("travel_fund", "")].into_iter().collect();
        assert_eq!(
            clean(&schema, &data).unwrap().money("travel_fund"),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_text_max_length() {
        let mut schema = FormSchema::new("registration");
        schema.push(FieldSpec::new(
            "guest_first_name",
            "Guest First Name",
            FieldKind::Text {
                max_length: Some(5),
            },
        ));

        let data: FormData = [("guest_first_name", "Grace")].into_iter().collect();
        assert_eq!(
            clean(&schema, &data).unwrap().text("guest_first_name"),
            "Grace"
        );

        let data: FormData = [("guest_first_name", "Seymour")].into_iter().collect();
        assert!(clean(&schema, &data).is_err());
    }

    #[test]
    fn test_person_fields_rule() {
        let empty = PersonFields::default();
        assert!(empty.validate().is_ok());

        let partial = PersonFields {
            first_name: "Grace".to_string(),
            ..Default::default()
        };
        assert_eq!(partial.validate().unwrap_err(), PERSON_FIELDS_MESSAGE);

        let complete = PersonFields {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            institution: "Yale".to_string(),
            ..Default::default()
        };
        assert!(complete.validate().is_ok());
    }

    #[test]
    fn test_abstract_word_limit() {
        let text = "one two three four five";
        assert!(check_abstract_words(text, 5).is_ok());

        let err = check_abstract_words(text, 4).unwrap_err();
        assert_eq!(
            err,
            "Abstract can contain a maximum of 4 words. You supplied 5 words."
        );

        // A limit of 0 disables the check.
        assert!(check_abstract_words(text, 0).is_ok());
    }
}
