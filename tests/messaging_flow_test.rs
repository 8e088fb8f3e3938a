use chrono::{DateTime, TimeZone, Utc};
use repair_desk::adapters::memory::{
    DevPasswordHasher, InMemoryAdmins, InMemoryAppointments, InMemoryClients, InMemoryMessages,
};
use repair_desk::core::accounts::{AdminRegistration, ClientRegistration};
use repair_desk::core::messaging::{ConversationFilter, MessageDraft, DEFAULT_SUBJECT};
use repair_desk::domain::model::{ContactChannel, MessageStatus};
use repair_desk::domain::ports::Clock;
use repair_desk::utils::error::DeskError;
use repair_desk::{DeskEngine, IntakeValidator, WeeklyCalendar};
use chrono::FixedOffset;
use std::sync::{Arc, Mutex};

/// Advances one minute per call so updated_at ordering is observable.
struct TickingClock(Mutex<DateTime<Utc>>);

impl TickingClock {
    fn new() -> Self {
        Self(Mutex::new(
            Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap(),
        ))
    }
}

impl Clock for TickingClock {
    fn now_utc(&self) -> DateTime<Utc> {
        let mut guard = self.0.lock().unwrap();
        let now = *guard;
        *guard += chrono::Duration::minutes(1);
        now
    }
}

fn engine() -> DeskEngine {
    DeskEngine::new(
        Arc::new(InMemoryAppointments::new()),
        Arc::new(InMemoryClients::new()),
        Arc::new(InMemoryAdmins::new()),
        Arc::new(InMemoryMessages::new()),
        Arc::new(TickingClock::new()),
        Arc::new(DevPasswordHasher),
        IntakeValidator::new(
            WeeklyCalendar::default(),
            FixedOffset::east_opt(8 * 3600).unwrap(),
        ),
        "2025-06",
    )
}

fn client(email: &str, name: &str) -> ClientRegistration {
    ClientRegistration {
        full_name: name.into(),
        email: email.into(),
        contact_number: "0917 123 4567".into(),
        school_program: "nursing".into(),
        password: "hunter2hunter2".into(),
        confirm_password: "hunter2hunter2".into(),
        accept_policies: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn chat_defaults_and_reply_mirroring() {
    let engine = engine();
    let ana = engine
        .register_client(&client("ana@campus.edu.ph", "Ana Reyes"))
        .await
        .unwrap();
    let admin = engine
        .register_admin(&AdminRegistration {
            full_name: "Marco Cruz".into(),
            username: "marco".into(),
            password: "longenough".into(),
            confirm_password: "longenough".into(),
        })
        .await
        .unwrap();

    let message = engine
        .submit_message(
            ana.id,
            &MessageDraft {
                subject: None,
                body: "Is my phone ready yet?".into(),
                preferred_contact: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(message.subject, DEFAULT_SUBJECT);
    assert_eq!(message.preferred_contact, ContactChannel::Sms);
    assert_eq!(message.status, MessageStatus::Open);

    let replied = engine
        .reply_to_message(message.id, admin.id, "Parts arrive Thursday.")
        .await
        .unwrap();
    assert_eq!(replied.replies.len(), 1);
    assert_eq!(replied.admin_reply, "Parts arrive Thursday.");
    assert_eq!(
        replied.replies[0].admin_name.as_deref(),
        Some("Marco Cruz")
    );
    assert!(replied.updated_at > replied.created_at);

    let replied = engine
        .reply_to_message(message.id, admin.id, "Correction: Friday.")
        .await
        .unwrap();
    assert_eq!(replied.replies.len(), 2);
    assert_eq!(replied.admin_reply, "Correction: Friday.");
}

#[tokio::test]
async fn empty_bodies_are_refused() {
    let engine = engine();
    let ana = engine
        .register_client(&client("ana@campus.edu.ph", "Ana Reyes"))
        .await
        .unwrap();

    let err = engine
        .submit_message(
            ana.id,
            &MessageDraft {
                subject: Some("Help".into()),
                body: "   ".into(),
                preferred_contact: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DeskError::ValidationError { .. }));
}

#[tokio::test]
async fn conversations_dedupe_and_filter() {
    let engine = engine();
    let ana = engine
        .register_client(&client("ana@campus.edu.ph", "Ana Reyes"))
        .await
        .unwrap();
    let ben = engine
        .register_client(&client("ben@campus.edu.ph", "Ben Santos"))
        .await
        .unwrap();

    for body in ["first", "second"] {
        engine
            .submit_message(
                ana.id,
                &MessageDraft {
                    subject: Some("Screen repair".into()),
                    body: body.into(),
                    preferred_contact: Some("email".into()),
                },
            )
            .await
            .unwrap();
    }
    let bens = engine
        .submit_message(
            ben.id,
            &MessageDraft {
                subject: Some("Keyboard keys".into()),
                body: "Two keys missing".into(),
                preferred_contact: None,
            },
        )
        .await
        .unwrap();

    // one conversation per client, newest first
    let conversations = engine
        .conversations(&ConversationFilter::default())
        .await
        .unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].client_id, ben.id);

    // search by client name
    let filtered = engine
        .conversations(&ConversationFilter {
            search: Some("santos".into()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].client_id, ben.id);

    // status filter + tallies
    engine
        .set_message_status(bens.id, MessageStatus::Resolved)
        .await
        .unwrap();
    let resolved = engine
        .conversations(&ConversationFilter {
            search: None,
            status: Some(MessageStatus::Resolved),
        })
        .await
        .unwrap();
    assert_eq!(resolved.len(), 1);

    let tallies = engine.message_tallies().await.unwrap();
    let open = tallies
        .iter()
        .find(|t| t.status == MessageStatus::Open)
        .unwrap();
    let resolved = tallies
        .iter()
        .find(|t| t.status == MessageStatus::Resolved)
        .unwrap();
    assert_eq!(open.count, 2);
    assert_eq!(resolved.count, 1);
}

#[tokio::test]
async fn client_history_is_chronological() {
    let engine = engine();
    let ana = engine
        .register_client(&client("ana@campus.edu.ph", "Ana Reyes"))
        .await
        .unwrap();
    for body in ["one", "two", "three"] {
        engine
            .submit_message(
                ana.id,
                &MessageDraft {
                    subject: None,
                    body: body.into(),
                    preferred_contact: None,
                },
            )
            .await
            .unwrap();
    }
    let history = engine.client_messages(ana.id).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].body, "one");
    assert_eq!(history[2].body, "three");
}
