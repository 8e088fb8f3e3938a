use crate::core::catalog;
use crate::domain::model::{Appointment, AppointmentStatus};
use crate::utils::error::{DeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staff triage form applied to a single appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: AppointmentStatus,
    #[serde(default)]
    pub quoted_price: Option<u32>,
    #[serde(default)]
    pub parts_ordered: Option<bool>,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub status_changed: bool,
    pub now_locked: bool,
}

/// Completed and rejected appointments are frozen; approved ones freeze once
/// replacement parts have been ordered.
pub fn is_management_locked(appointment: &Appointment) -> bool {
    matches!(
        appointment.status,
        AppointmentStatus::Completed
            | AppointmentStatus::PartsUnavailable
            | AppointmentStatus::Declined
    ) || (appointment.status == AppointmentStatus::Approved && appointment.parts_ordered)
}

/// Rate-card price proposed when no quote has been recorded yet.
pub fn default_quote(appointment: &Appointment) -> Option<u32> {
    if appointment.quoted_price > 0 {
        return None;
    }
    catalog::price_for(appointment.device_type, &appointment.service_type)
}

/// Apply a staff update, refusing locked appointments. Declines that do not
/// mention "unsupported" get the prefix stamped into the notes.
pub fn apply_update(
    appointment: &mut Appointment,
    update: StatusUpdate,
    now: DateTime<Utc>,
) -> Result<UpdateOutcome> {
    if is_management_locked(appointment) {
        return Err(DeskError::AppointmentLocked {
            tracking_id: appointment.tracking_id.clone(),
        });
    }

    let status_changed = appointment.status != update.status;
    appointment.status = update.status;

    if let Some(price) = update.quoted_price {
        appointment.quoted_price = price;
    } else if let Some(price) = default_quote(appointment) {
        appointment.quoted_price = price;
    }

    if let Some(parts_ordered) = update.parts_ordered {
        appointment.parts_ordered = parts_ordered;
    }

    if let Some(notes) = update.admin_notes {
        appointment.admin_notes = notes;
    }

    if appointment.status == AppointmentStatus::Declined
        && !appointment.admin_notes.to_lowercase().contains("unsupported")
    {
        appointment.admin_notes = format!("Unsupported: {}", appointment.admin_notes);
    }

    appointment.updated_at = now;

    Ok(UpdateOutcome {
        status_changed,
        now_locked: is_management_locked(appointment),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DeviceKind, MeetupHub, PaymentMethod};
    use chrono::TimeZone;

    fn sample() -> Appointment {
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 6, 0, 0).unwrap();
        Appointment {
            tracking_id: "BIP-250602-A1B2".into(),
            client_id: Some(1),
            full_name: "Ana Reyes".into(),
            contact_number: "0917 123 4567".into(),
            notification_email: "ana@campus.edu.ph".into(),
            device_type: DeviceKind::Android,
            device_brand: "samsung".into(),
            brand_model: "Galaxy A54".into(),
            service_type: "lcd".into(),
            issue_description: "Cracked screen".into(),
            preferred_at: at,
            location: MeetupHub::Central,
            location_notes: String::new(),
            payment_method: PaymentMethod::Personal,
            status: AppointmentStatus::Pending,
            quoted_price: 0,
            admin_notes: String::new(),
            parts_ordered: false,
            policies_accepted_at: Some(at),
            policies_version: "2025-06".into(),
            created_at: at,
            updated_at: at,
        }
    }

    fn update(status: AppointmentStatus) -> StatusUpdate {
        StatusUpdate {
            status,
            ..Default::default()
        }
    }

    #[test]
    fn pending_is_not_locked() {
        assert!(!is_management_locked(&sample()));
    }

    #[test]
    fn terminal_statuses_hard_lock() {
        for status in [
            AppointmentStatus::Completed,
            AppointmentStatus::Declined,
            AppointmentStatus::PartsUnavailable,
        ] {
            let mut appointment = sample();
            appointment.status = status;
            assert!(is_management_locked(&appointment), "{:?}", status);
        }
    }

    #[test]
    fn approved_locks_only_with_parts_ordered() {
        let mut appointment = sample();
        appointment.status = AppointmentStatus::Approved;
        assert!(!is_management_locked(&appointment));
        appointment.parts_ordered = true;
        assert!(is_management_locked(&appointment));
    }

    #[test]
    fn update_on_locked_appointment_is_refused() {
        let mut appointment = sample();
        appointment.status = AppointmentStatus::Completed;
        let created_at = appointment.created_at;
        let err = apply_update(
            &mut appointment,
            update(AppointmentStatus::Pending),
            created_at,
        )
        .unwrap_err();
        assert!(matches!(err, DeskError::AppointmentLocked { .. }));
    }

    #[test]
    fn decline_prefixes_notes_once() {
        let mut appointment = sample();
        let mut decline = update(AppointmentStatus::Declined);
        decline.admin_notes = Some("water damage beyond scope".into());
        let created_at = appointment.created_at;
        apply_update(&mut appointment, decline, created_at).unwrap();
        assert_eq!(
            appointment.admin_notes,
            "Unsupported: water damage beyond scope"
        );

        // already mentioning unsupported is left alone
        let mut appointment = sample();
        let mut decline = update(AppointmentStatus::Declined);
        decline.admin_notes = Some("Unsupported model line".into());
        let created_at = appointment.created_at;
        apply_update(&mut appointment, decline, created_at).unwrap();
        assert_eq!(appointment.admin_notes, "Unsupported model line");
    }

    #[test]
    fn missing_quote_falls_back_to_rate_card() {
        let mut appointment = sample();
        let created_at = appointment.created_at;
        let outcome = apply_update(
            &mut appointment,
            update(AppointmentStatus::Approved),
            created_at,
        )
        .unwrap();
        assert_eq!(appointment.quoted_price, 600);
        assert!(outcome.status_changed);
        assert!(!outcome.now_locked);
    }

    #[test]
    fn approving_with_parts_reports_lock() {
        let mut appointment = sample();
        let mut approve = update(AppointmentStatus::Approved);
        approve.parts_ordered = Some(true);
        let created_at = appointment.created_at;
        let outcome =
            apply_update(&mut appointment, approve, created_at).unwrap();
        assert!(outcome.now_locked);
    }
}
