use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use repair_desk::adapters::memory::{
    DevPasswordHasher, InMemoryAdmins, InMemoryAppointments, InMemoryClients, InMemoryMessages,
};
use repair_desk::core::accounts::{AdminRegistration, ClientRegistration};
use repair_desk::core::lifecycle::StatusUpdate;
use repair_desk::core::tracking::StatusQuery;
use repair_desk::domain::model::AppointmentStatus;
use repair_desk::domain::ports::Clock;
use repair_desk::utils::error::DeskError;
use repair_desk::{DeskEngine, IntakeRequest, IntakeValidator, WeeklyCalendar};
use std::sync::Arc;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn monday() -> DateTime<Utc> {
    // Monday 2025-06-02 08:00 Manila
    Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap()
}

fn engine() -> DeskEngine {
    let offset = FixedOffset::east_opt(8 * 3600).unwrap();
    DeskEngine::new(
        Arc::new(InMemoryAppointments::new()),
        Arc::new(InMemoryClients::new()),
        Arc::new(InMemoryAdmins::new()),
        Arc::new(InMemoryMessages::new()),
        Arc::new(FixedClock(monday())),
        Arc::new(DevPasswordHasher),
        IntakeValidator::new(WeeklyCalendar::default(), offset),
        "2025-06",
    )
}

fn registration() -> ClientRegistration {
    ClientRegistration {
        full_name: "Ana Reyes".into(),
        email: "Ana@Campus.edu.ph".into(),
        contact_number: "0917 123 4567".into(),
        school_program: "technology".into(),
        password: "hunter2hunter2".into(),
        confirm_password: "hunter2hunter2".into(),
        accept_policies: true,
        ..Default::default()
    }
}

fn booking() -> IntakeRequest {
    IntakeRequest {
        device_type: "android".into(),
        device_brand: "samsung".into(),
        brand_model: "Galaxy A54".into(),
        service_type: "lcd".into(),
        issue_description: "Cracked screen after a drop".into(),
        preferred_at: "2025-06-04T10:30".into(),
        location: "meetup-central".into(),
        accept_policies: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn register_book_and_track() {
    let engine = engine();

    let client = engine.register_client(&registration()).await.unwrap();
    assert_eq!(client.email, "ana@campus.edu.ph");
    assert_eq!(client.policies_version, "2025-06");
    assert!(client.policies_accepted_at.is_some());

    let appointment = engine.book_appointment(client.id, &booking()).await.unwrap();
    assert!(appointment.tracking_id.starts_with("BIP-250602-"));
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.quoted_price, 600);
    // snapshot taken from the account
    assert_eq!(appointment.full_name, "Ana Reyes");
    assert_eq!(appointment.notification_email, "ana@campus.edu.ph");

    // lookup by tracking id shows the full number
    let report = engine
        .check_status(&StatusQuery::by_tracking_id(
            appointment.tracking_id.to_lowercase(),
        ))
        .await
        .unwrap();
    assert!(!report.masked);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].tracking_id, appointment.tracking_id);

    // lookup by email masks the tracking number
    let report = engine
        .check_status(&StatusQuery {
            email: Some("ANA@campus.edu.ph".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(report.masked);
    assert!(report.results[0].tracking_id.contains("•••"));

    // empty queries are refused
    let err = engine.check_status(&StatusQuery::default()).await.unwrap_err();
    assert!(matches!(err, DeskError::ValidationError { .. }));
}

#[tokio::test]
async fn duplicate_email_is_refused() {
    let engine = engine();
    engine.register_client(&registration()).await.unwrap();

    let mut again = registration();
    again.email = "ANA@campus.edu.ph".into();
    let err = engine.register_client(&again).await.unwrap_err();
    assert!(matches!(
        err,
        DeskError::AlreadyRegistered { field, .. } if field == "email"
    ));
}

#[tokio::test]
async fn authentication_follows_the_hasher_and_active_flag() {
    let engine = engine();
    let client = engine.register_client(&registration()).await.unwrap();

    assert!(engine
        .authenticate_client("ana@campus.edu.ph", "hunter2hunter2")
        .await
        .is_ok());
    assert!(matches!(
        engine
            .authenticate_client("ana@campus.edu.ph", "wrong-password")
            .await
            .unwrap_err(),
        DeskError::InvalidCredentials
    ));

    engine.set_client_active(client.id, false).await.unwrap();
    assert!(matches!(
        engine
            .authenticate_client("ana@campus.edu.ph", "hunter2hunter2")
            .await
            .unwrap_err(),
        DeskError::AccountDisabled { .. }
    ));

    // deactivated clients cannot book either
    let err = engine.book_appointment(client.id, &booking()).await.unwrap_err();
    assert!(matches!(err, DeskError::AccountDisabled { .. }));
}

#[tokio::test]
async fn rejected_intake_reports_fields() {
    let engine = engine();
    let client = engine.register_client(&registration()).await.unwrap();

    let mut bad = booking();
    bad.preferred_at = "2025-06-08T14:00".into(); // Sunday
    bad.service_type = "keyboard".into();
    let err = engine.book_appointment(client.id, &bad).await.unwrap_err();
    match err {
        DeskError::IntakeRejected { errors } => {
            assert!(errors.iter().any(|e| e.field == "preferred_at"));
            assert!(errors.iter().any(|e| e.field == "service_type"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn triage_runs_to_the_parts_lock() {
    let engine = engine();
    let client = engine.register_client(&registration()).await.unwrap();
    let appointment = engine.book_appointment(client.id, &booking()).await.unwrap();

    // approve with a custom quote, no parts yet
    let (updated, outcome) = engine
        .staff_update(
            &appointment.tracking_id,
            StatusUpdate {
                status: AppointmentStatus::Approved,
                quoted_price: Some(750),
                parts_ordered: None,
                admin_notes: Some("OEM panel quoted".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.quoted_price, 750);
    assert!(outcome.status_changed);
    assert!(!outcome.now_locked);

    // ordering parts locks the appointment
    let (_, outcome) = engine
        .staff_update(
            &appointment.tracking_id,
            StatusUpdate {
                status: AppointmentStatus::Approved,
                quoted_price: None,
                parts_ordered: Some(true),
                admin_notes: None,
            },
        )
        .await
        .unwrap();
    assert!(outcome.now_locked);

    // further edits are refused
    let err = engine
        .staff_update(
            &appointment.tracking_id,
            StatusUpdate {
                status: AppointmentStatus::InProgress,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DeskError::AppointmentLocked { .. }));
}

#[tokio::test]
async fn report_counts_earnings_for_approved_and_completed() {
    let engine = engine();
    let client = engine.register_client(&registration()).await.unwrap();

    let first = engine.book_appointment(client.id, &booking()).await.unwrap();
    let mut amoled = booking();
    amoled.service_type = "amoled".into();
    let second = engine.book_appointment(client.id, &amoled).await.unwrap();
    let third = engine.book_appointment(client.id, &booking()).await.unwrap();

    engine
        .staff_update(
            &first.tracking_id,
            StatusUpdate {
                status: AppointmentStatus::Completed,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    engine
        .staff_update(
            &second.tracking_id,
            StatusUpdate {
                status: AppointmentStatus::Approved,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    engine
        .staff_update(
            &third.tracking_id,
            StatusUpdate {
                status: AppointmentStatus::Declined,
                admin_notes: Some("outside scope".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let report = engine.report().await.unwrap();
    assert_eq!(report.totals.total_appointments, 3);
    assert_eq!(report.totals.active_clients, 1);
    assert_eq!(report.totals.total_earnings, 600 + 1300);
    assert_eq!(report.monthly_appointments.len(), 1);
    assert_eq!(report.monthly_appointments[0].label, "Jun 2025");
    assert_eq!(report.monthly_earnings[0].value, 1900);

    // the declined one got its notes stamped
    let declined = engine
        .check_status(&StatusQuery::by_tracking_id(third.tracking_id.clone()))
        .await
        .unwrap();
    assert_eq!(
        declined.results[0].admin_notes,
        "Unsupported: outside scope"
    );
}

#[tokio::test]
async fn admin_profile_and_password_maintenance() {
    let engine = engine();
    let admin = engine
        .register_admin(&AdminRegistration {
            full_name: "Marco Cruz".into(),
            username: "marco".into(),
            password: "longenough".into(),
            confirm_password: "longenough".into(),
        })
        .await
        .unwrap();

    // username uniqueness is case-insensitive
    let err = engine
        .register_admin(&AdminRegistration {
            full_name: "Other".into(),
            username: "MARCO".into(),
            password: "longenough".into(),
            confirm_password: "longenough".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DeskError::AlreadyRegistered { .. }));

    // wrong current password blocks the change
    let err = engine
        .change_admin_password(admin.id, "wrong", "newpassword1", "newpassword1")
        .await
        .unwrap_err();
    assert!(matches!(err, DeskError::InvalidCredentials));

    engine
        .change_admin_password(admin.id, "longenough", "newpassword1", "newpassword1")
        .await
        .unwrap();
    assert!(engine.authenticate_admin("marco", "newpassword1").await.is_ok());

    let updated = engine
        .update_admin_profile(admin.id, "Marco A. Cruz", "marco")
        .await
        .unwrap();
    assert_eq!(updated.full_name, "Marco A. Cruz");
}
