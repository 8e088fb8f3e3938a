use crate::core::catalog;
use crate::core::schedule::WeeklyCalendar;
use crate::domain::model::{DeviceKind, MeetupHub, PaymentMethod};
use crate::utils::validation::validate_email;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repairs the desk refuses outright, matched against the issue description.
pub const UNSUPPORTED_KEYWORDS: [&str; 5] =
    ["solder", "board level", "motherboard", "logic board", "reball"];

pub const BLOCKED_NOTICE: &str =
    "iPhone battery issues are NOT accepted. No soldering / board-level repairs.";

pub const PREFERRED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Raw booking form as submitted by a client. Everything is stringly typed
/// here; the validator resolves codes against the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeRequest {
    pub device_type: String,
    pub device_brand: String,
    #[serde(default)]
    pub custom_brand: Option<String>,
    pub brand_model: String,
    pub service_type: String,
    pub issue_description: String,
    /// Naive local time, `%Y-%m-%dT%H:%M` (the datetime-local widget format).
    pub preferred_at: String,
    pub location: String,
    #[serde(default)]
    pub location_notes: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub notification_email: Option<String>,
    #[serde(default)]
    pub accept_policies: bool,
}

/// Outcome of a successful validation: resolved codes, UTC preferred
/// instant, and the rate-card quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedIntake {
    pub device_type: DeviceKind,
    pub device_brand: String,
    pub brand_model: String,
    pub service_type: String,
    pub issue_description: String,
    pub preferred_at: DateTime<Utc>,
    pub location: MeetupHub,
    pub location_notes: String,
    pub payment_method: PaymentMethod,
    pub notification_email: Option<String>,
    pub quoted_price: u32,
}

enum ResolvedBrand {
    Cataloged(String),
    FreeText(String),
}

impl ResolvedBrand {
    fn into_inner(self) -> String {
        match self {
            ResolvedBrand::Cataloged(s) | ResolvedBrand::FreeText(s) => s,
        }
    }
}

pub struct IntakeValidator {
    calendar: WeeklyCalendar,
    offset: FixedOffset,
}

impl IntakeValidator {
    pub fn new(calendar: WeeklyCalendar, offset: FixedOffset) -> Self {
        Self { calendar, offset }
    }

    pub fn calendar(&self) -> &WeeklyCalendar {
        &self.calendar
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Run every intake rule and collect the failures per field instead of
    /// stopping at the first one.
    pub fn validate(
        &self,
        request: &IntakeRequest,
        now: DateTime<Utc>,
    ) -> Result<ValidatedIntake, Vec<FieldError>> {
        let mut errors = Vec::new();

        let device = DeviceKind::from_code(request.device_type.trim());
        if device.is_none() {
            errors.push(FieldError::new("device_type", "Select a valid device type."));
        }

        let description = request.issue_description.trim();
        if description.is_empty() {
            errors.push(FieldError::new(
                "issue_description",
                "Describe the issue so the crew can prepare.",
            ));
        }

        // 禁接維修：主板級 / 焊接
        let description_lower = description.to_lowercase();
        if UNSUPPORTED_KEYWORDS
            .iter()
            .any(|kw| description_lower.contains(kw))
        {
            errors.push(FieldError::new(
                "issue_description",
                "Board-level or soldering repairs are not accepted.",
            ));
        }

        if let Some(device) = device {
            if device == DeviceKind::Iphone && description_lower.contains("battery") {
                errors.push(FieldError::new(
                    "issue_description",
                    "iPhone battery issues are not accepted.",
                ));
            }
            if device == DeviceKind::Iphone && request.service_type == "battery" {
                errors.push(FieldError::new(
                    "service_type",
                    "iPhone battery services are not available.",
                ));
            }

            if !catalog::services_for(device)
                .iter()
                .any(|s| s.code == request.service_type)
            {
                errors.push(FieldError::new(
                    "service_type",
                    "Select a service compatible with the chosen device.",
                ));
            }
        }

        let brand = device.and_then(|device| {
            match resolve_brand(device, &request.device_brand, request.custom_brand.as_deref()) {
                Ok(brand) => Some(brand),
                Err(message) => {
                    errors.push(FieldError::new("device_brand", message));
                    None
                }
            }
        });

        let model = request.brand_model.trim();
        if model.is_empty() {
            errors.push(FieldError::new("brand_model", "Enter the device model."));
        } else if let (Some(device), Some(ResolvedBrand::Cataloged(code))) = (device, &brand) {
            let suggestions = catalog::model_suggestions(device, code);
            if !suggestions.is_empty() && !catalog::is_known_model(device, code, model) {
                let examples = suggestions
                    .iter()
                    .take(4)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(FieldError::new(
                    "brand_model",
                    format!(
                        "Please specify a known model for {}. Examples: {}",
                        catalog::brand_label(code),
                        examples
                    ),
                ));
            }
        }

        let preferred_at = self.check_preferred_at(&request.preferred_at, now, &mut errors);

        let location = MeetupHub::from_code(request.location.trim());
        if location.is_none() {
            errors.push(FieldError::new("location", "Select a meetup hub."));
        }

        let payment_method = match request.payment_method.as_deref() {
            None | Some("") => Some(PaymentMethod::default()),
            Some(code) => {
                let parsed = PaymentMethod::from_code(code);
                if parsed.is_none() {
                    errors.push(FieldError::new(
                        "payment_method",
                        "Select a valid payment method.",
                    ));
                }
                parsed
            }
        };

        let notification_email = match request.notification_email.as_deref() {
            None | Some("") => None,
            Some(email) => {
                if validate_email("notification_email", email).is_err() {
                    errors.push(FieldError::new(
                        "notification_email",
                        "Enter a valid email address.",
                    ));
                    None
                } else {
                    Some(email.to_lowercase())
                }
            }
        };

        if !request.accept_policies {
            errors.push(FieldError::new(
                "accept_policies",
                "You must accept the Terms of Service and Privacy Policy.",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // 到這裡所有欄位都已驗證成功
        let device = device.expect("validated");
        let service_type = request.service_type.clone();
        let quoted_price = catalog::price_for(device, &service_type).unwrap_or(0);

        Ok(ValidatedIntake {
            device_type: device,
            device_brand: brand.expect("validated").into_inner(),
            brand_model: model.to_string(),
            service_type,
            issue_description: description.to_string(),
            preferred_at: preferred_at.expect("validated"),
            location: location.expect("validated"),
            location_notes: request
                .location_notes
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            payment_method: payment_method.expect("validated"),
            notification_email,
            quoted_price,
        })
    }

    fn check_preferred_at(
        &self,
        raw: &str,
        now: DateTime<Utc>,
        errors: &mut Vec<FieldError>,
    ) -> Option<DateTime<Utc>> {
        let naive = match NaiveDateTime::parse_from_str(raw.trim(), PREFERRED_AT_FORMAT) {
            Ok(naive) => naive,
            Err(_) => {
                errors.push(FieldError::new(
                    "preferred_at",
                    "Enter a valid date and time (YYYY-MM-DDTHH:MM).",
                ));
                return None;
            }
        };

        // datetime-local 輸入視為店面當地時間
        let preferred = naive
            .and_local_timezone(self.offset)
            .single()?
            .with_timezone(&Utc);

        if let Err(err) = self
            .calendar
            .check_requested_time(preferred, now, self.offset)
        {
            errors.push(FieldError::new("preferred_at", err.to_string()));
            return None;
        }

        Some(preferred)
    }
}

/// Manufacturer resolution: iPhone pins to `apple`; otherwise try code,
/// display label, then lowercased code. `other` demands the custom name.
/// Unresolved non-empty text is kept verbatim (walk-in brands happen).
fn resolve_brand(
    device: DeviceKind,
    entered: &str,
    custom: Option<&str>,
) -> Result<ResolvedBrand, String> {
    if device == DeviceKind::Iphone {
        return Ok(ResolvedBrand::Cataloged("apple".to_string()));
    }

    let entered = entered.trim();
    if entered.is_empty() {
        return Err("Please enter a manufacturer.".to_string());
    }

    let brands = catalog::brands_for(device);
    let normalized = entered.to_lowercase();
    let resolved = brands
        .iter()
        .find(|b| b.code == entered)
        .or_else(|| brands.iter().find(|b| b.label.to_lowercase() == normalized))
        .or_else(|| brands.iter().find(|b| b.code == normalized))
        .map(|b| b.code);

    match resolved {
        Some("other") => {
            let custom = custom.unwrap_or_default().trim();
            if custom.is_empty() {
                Err("Please type the manufacturer name if it is not listed.".to_string())
            } else {
                Ok(ResolvedBrand::FreeText(custom.to_string()))
            }
        }
        Some(code) => Ok(ResolvedBrand::Cataloged(code.to_string())),
        None => Ok(ResolvedBrand::FreeText(entered.to_string())),
    }
}
