use crate::domain::model::Appointment;
use chrono::{DateTime, FixedOffset, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

const ID_PREFIX: &str = "BIP";
const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `BIP-yymmdd-XXXX`, date taken in shop-local time.
pub fn new_tracking_id(now: DateTime<Utc>, offset: FixedOffset) -> String {
    let date = now.with_timezone(&offset).format("%y%m%d");
    let mut rng = rand::thread_rng();
    let segment: String = (0..4)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect();
    format!("{}-{}-{}", ID_PREFIX, date, segment)
}

/// Short mask shown in shared lists: first three and last two characters.
pub fn masked_tracking(tracking_id: &str) -> String {
    if tracking_id.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = tracking_id.chars().collect();
    let head: String = chars.iter().take(3).collect();
    let tail: String = chars.iter().rev().take(2).rev().collect();
    format!("{}•••{}", head, tail)
}

/// Longer mask used on detail views.
pub fn masked_id(tracking_id: &str) -> String {
    let chars: Vec<char> = tracking_id.chars().collect();
    if chars.len() <= 4 {
        return "•••".to_string();
    }
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars.iter().rev().take(2).rev().collect();
    format!("{}••••{}", head, tail)
}

/// Self-service status lookup. Every supplied identifier must match
/// (case-insensitive exact); at least one is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl StatusQuery {
    pub fn by_tracking_id(tracking_id: impl Into<String>) -> Self {
        Self {
            tracking_id: Some(tracking_id.into()),
            ..Default::default()
        }
    }

    fn field(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn has_identifier(&self) -> bool {
        Self::field(&self.tracking_id).is_some()
            || Self::field(&self.contact_number).is_some()
            || Self::field(&self.email).is_some()
    }

    /// Results are masked when the caller did not present the tracking id.
    pub fn should_mask(&self) -> bool {
        Self::field(&self.tracking_id).is_none()
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        if let Some(tracking_id) = Self::field(&self.tracking_id) {
            if !appointment.tracking_id.eq_ignore_ascii_case(tracking_id) {
                return false;
            }
        }
        if let Some(contact) = Self::field(&self.contact_number) {
            if !appointment.contact_number.eq_ignore_ascii_case(contact) {
                return false;
            }
        }
        if let Some(email) = Self::field(&self.email) {
            if !appointment.notification_email.eq_ignore_ascii_case(email) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn tracking_id_uses_local_date() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        // 2025-06-02 22:00 UTC is already 06-03 in Manila
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 22, 0, 0).unwrap();
        let id = new_tracking_id(now, offset);
        assert!(id.starts_with("BIP-250603-"), "{}", id);
        assert_eq!(id.len(), "BIP-250603-XXXX".len());
        let segment = &id["BIP-250603-".len()..];
        assert!(segment
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn masks_keep_edges() {
        assert_eq!(masked_tracking("BIP-250602-A1B2"), "BIP•••B2");
        assert_eq!(masked_tracking(""), "");
        assert_eq!(masked_id("BIP-250602-A1B2"), "BIP-••••B2");
        assert_eq!(masked_id("BIP"), "•••");
    }

    #[test]
    fn query_needs_an_identifier() {
        assert!(!StatusQuery::default().has_identifier());
        assert!(StatusQuery {
            email: Some("ana@campus.edu.ph".into()),
            ..Default::default()
        }
        .has_identifier());
    }

    #[test]
    fn all_supplied_fields_must_match() {
        let appointment = fixtures::appointment();
        let mut query = StatusQuery::by_tracking_id("bip-250602-a1b2");
        assert!(query.matches(&appointment));
        assert!(!query.should_mask());

        query.contact_number = Some("0000".into());
        assert!(!query.matches(&appointment));

        let query = StatusQuery {
            email: Some("ANA@campus.edu.ph".into()),
            ..Default::default()
        };
        assert!(query.matches(&appointment));
        assert!(query.should_mask());
    }

    pub(crate) mod fixtures {
        use crate::domain::model::*;
        use chrono::{TimeZone, Utc};

        pub fn appointment() -> Appointment {
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
                quoted_price: 600,
                admin_notes: String::new(),
                parts_ordered: false,
                policies_accepted_at: Some(at),
                policies_version: "2025-06".into(),
                created_at: at,
                updated_at: at,
            }
        }
    }
}
