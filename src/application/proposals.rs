use super::validation::{PersonFields, REQUIRED_MESSAGE, ValidationErrors, check_abstract_words};
use crate::domain::session::{CadreRole, Paper, PaperPresenter, Session, SessionCadre};

/// Allowed number of paper abstracts on a session proposal.
pub const NUM_PAPERS_MIN: u32 = 3;
pub const NUM_PAPERS_MAX: u32 = 10;

/// A proposed session, submitted long before the schedule exists. Accepted
/// proposals are later assigned a time slot by the program committee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionProposal {
    pub meeting: u32,
    pub title: String,
    pub abstract_text: String,
    pub notes: String,
    pub num_papers: u32,
    /// Email of the submitting user.
    pub submitter: String,
    pub chair: PersonFields,
    pub organizers: Vec<PersonFields>,
    pub commentator: PersonFields,
}

impl SessionProposal {
    pub fn validate(&self, abstract_max_words: usize) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.push_field("title", REQUIRED_MESSAGE);
        }
        if self.abstract_text.trim().is_empty() {
            errors.push_field("abstract", REQUIRED_MESSAGE);
        } else if let Err(message) = check_abstract_words(&self.abstract_text, abstract_max_words) {
            errors.push_field("abstract", message);
        }
        if !(NUM_PAPERS_MIN..=NUM_PAPERS_MAX).contains(&self.num_papers) {
            errors.push_field(
                "num_papers",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    self.num_papers
                ),
            );
        }
        for person in self.people() {
            if let Err(message) = person.validate() {
                errors.push_form(message);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Builds the unaccepted session record; ids are assigned by the store.
    pub fn into_session(self) -> Session {
        let mut cadre = Vec::new();
        for (role, person) in [(CadreRole::Chair, &self.chair)]
            .into_iter()
            .chain(self.organizers.iter().map(|p| (CadreRole::Organizer, p)))
            .chain([(CadreRole::Commentator, &self.commentator)])
        {
            if person.has_entered_info() {
                cadre.push(SessionCadre {
                    role,
                    first_name: person.first_name.clone(),
                    mi: person.mi.clone(),
                    last_name: person.last_name.clone(),
                    gender: person.gender.clone(),
                    email: person.email.clone(),
                    institution: person.institution.clone(),
                });
            }
        }
        Session {
            id: 0,
            meeting: self.meeting,
            title: self.title,
            abstract_text: self.abstract_text,
            notes: self.notes,
            num_papers: self.num_papers,
            start_time: None,
            stop_time: None,
            accepted: false,
            cadre,
            papers: Vec::new(),
        }
    }

    fn people(&self) -> impl Iterator<Item = &PersonFields> {
        [&self.chair]
            .into_iter()
            .chain(self.organizers.iter())
            .chain([&self.commentator])
    }
}

/// A proposed paper with its presenter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperProposal {
    pub meeting: u32,
    pub title: String,
    pub abstract_text: String,
    pub submitter: String,
    pub presenter_first_name: String,
    pub presenter_last_name: String,
    pub presenter_email: String,
    pub presenter_gender: String,
    pub presenter_birth_year: Option<u16>,
    pub presenter_status: String,
}

impl PaperProposal {
    pub fn validate(&self, abstract_max_words: usize) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.push_field("title", REQUIRED_MESSAGE);
        }
        if self.abstract_text.trim().is_empty() {
            errors.push_field("abstract", REQUIRED_MESSAGE);
        } else if let Err(message) = check_abstract_words(&self.abstract_text, abstract_max_words) {
            errors.push_field("abstract", message);
        }
        for (field, value) in [
            ("presenter_first_name", &self.presenter_first_name),
            ("presenter_last_name", &self.presenter_last_name),
            ("presenter_email", &self.presenter_email),
        ] {
            if value.trim().is_empty() {
                errors.push_field(field, REQUIRED_MESSAGE);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn into_paper(self) -> Paper {
        Paper {
            id: 0,
            meeting: self.meeting,
            title: self.title,
            abstract_text: self.abstract_text,
            presenter: PaperPresenter {
                first_name: self.presenter_first_name,
                last_name: self.presenter_last_name,
                email: self.presenter_email,
                gender: self.presenter_gender,
                birth_year: self.presenter_birth_year,
                status: self.presenter_status,
            },
            submitter: self.submitter,
            accepted: false,
        }
    }
}
