mod common;

use common::{MEETING_ID, offline_settings, seeded_store};
use confreg::application::engine::{ProposalOutcome, RegistrationEngine};
use confreg::application::proposals::{PaperProposal, SessionProposal};
use confreg::application::validation::{PERSON_FIELDS_MESSAGE, PersonFields};
use confreg::config::Settings;
use confreg::domain::ports::{
    ChargeOutcome, ChargeRequest, MeetingStore, PaymentGateway,
};
use confreg::infrastructure::in_memory::{InMemoryMeetingStore, InMemoryRegistrationStore};

struct NullGateway;

#[async_trait::async_trait]
impl PaymentGateway for NullGateway {
    async fn charge(&self, _request: ChargeRequest) -> confreg::error::Result<ChargeOutcome> {
        Ok(ChargeOutcome::Succeeded {
            charge_id: "ch_test".to_string(),
        })
    }
}

fn engine_with_settings(store: InMemoryMeetingStore, settings: Settings) -> RegistrationEngine {
    RegistrationEngine::new(
        Box::new(store),
        Box::new(InMemoryRegistrationStore::new()),
        Box::new(NullGateway),
        settings,
    )
}

fn session_proposal() -> SessionProposal {
    SessionProposal {
        meeting: MEETING_ID,
        title: "Computing before computers".to_string(),
        abstract_text: "Looms, logarithms, and ledgers.".to_string(),
        notes: String::new(),
        num_papers: 3,
        submitter: "chair@example.org".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_session_proposal_is_stored_unaccepted() {
    let store = seeded_store().await;
    let engine = engine_with_settings(store.clone(), offline_settings());

    let outcome = engine.propose_session(session_proposal()).await.unwrap();
    let ProposalOutcome::Submitted { id } = outcome else {
        panic!("expected submitted outcome");
    };

    let stored = store.session(id).await.unwrap().unwrap();
    assert!(!stored.accepted);
    assert!(stored.time_slot().is_none());
    assert_eq!(stored.num_papers, 3);
}

#[tokio::test]
async fn test_partial_chair_identity_fails() {
    let engine = engine_with_settings(seeded_store().await, offline_settings());

    let mut proposal = session_proposal();
    proposal.chair.first_name = "Grace".to_string();

    let outcome = engine.propose_session(proposal).await.unwrap();
    let ProposalOutcome::Invalid(errors) = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(errors.form, vec![PERSON_FIELDS_MESSAGE.to_string()]);
}

#[tokio::test]
async fn test_complete_chair_identity_passes() {
    let store = seeded_store().await;
    let engine = engine_with_settings(store.clone(), offline_settings());

    let mut proposal = session_proposal();
    proposal.chair = PersonFields {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@navy.mil".to_string(),
        institution: "Yale".to_string(),
        ..Default::default()
    };

    let outcome = engine.propose_session(proposal).await.unwrap();
    let ProposalOutcome::Submitted { id } = outcome else {
        panic!("expected submitted outcome");
    };
    let stored = store.session(id).await.unwrap().unwrap();
    assert_eq!(stored.cadre.len(), 1);
}

#[tokio::test]
async fn test_abstract_word_limit_boundary() {
    let settings = Settings {
        abstract_max_words: 5,
        ..offline_settings()
    };
    let engine = engine_with_settings(seeded_store().await, settings);

    let mut proposal = session_proposal();
    proposal.abstract_text = "one two three four five".to_string();
    assert!(matches!(
        engine.propose_session(proposal).await.unwrap(),
        ProposalOutcome::Submitted { .. }
    ));

    let mut proposal = session_proposal();
    proposal.abstract_text = "one two three four five six".to_string();
    let outcome = engine.propose_session(proposal).await.unwrap();
    let ProposalOutcome::Invalid(errors) = outcome else {
        panic!("expected invalid outcome");
    };
    assert_eq!(
        errors.fields[0].message,
        "Abstract can contain a maximum of 5 words. You supplied 6 words."
    );
}

#[tokio::test]
async fn test_paper_proposal_round_trip() {
    let store = seeded_store().await;
    let engine = engine_with_settings(store.clone(), offline_settings());

    let proposal = PaperProposal {
        meeting: MEETING_ID,
        title: "The stored program".to_string(),
        abstract_text: "A short history.".to_string(),
        submitter: "author@example.org".to_string(),
        presenter_first_name: "John".to_string(),
        presenter_last_name: "Backus".to_string(),
        presenter_email: "backus@example.org".to_string(),
        ..Default::default()
    };

    let outcome = engine.submit_paper(proposal).await.unwrap();
    assert!(matches!(outcome, ProposalOutcome::Submitted { .. }));

    let missing_presenter = PaperProposal {
        meeting: MEETING_ID,
        title: "Anonymous paper".to_string(),
        abstract_text: "No presenter given.".to_string(),
        submitter: "author@example.org".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        engine.submit_paper(missing_presenter).await.unwrap(),
        ProposalOutcome::Invalid(_)
    ));
}
