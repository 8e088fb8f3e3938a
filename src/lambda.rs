use lambda_runtime::{service_fn, Error, LambdaEvent};
use repair_desk::core::catalog;
use repair_desk::core::intake::FieldError;
use repair_desk::utils::logger;
use repair_desk::{IntakeRequest, IntakeValidator, WeeklyCalendar};
use serde::{Deserialize, Serialize};

/// Intake validation as a stateless endpoint: the frontend posts the booking
/// form, gets back the field errors or the quote.
#[derive(Debug, Deserialize)]
struct ValidationEvent {
    request: IntakeRequest,
    /// Optional `+HH:MM` shop offset; defaults to the desk's home timezone.
    #[serde(default)]
    utc_offset: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
    errors: Vec<FieldError>,
    quoted_price: Option<u32>,
    service_label: Option<String>,
}

async fn handler(event: LambdaEvent<ValidationEvent>) -> Result<ValidationResponse, Error> {
    let payload = event.payload;
    let offset = payload
        .utc_offset
        .as_deref()
        .and_then(repair_desk::core::schedule::parse_utc_offset)
        .unwrap_or_else(|| {
            repair_desk::core::schedule::parse_utc_offset("+08:00").expect("valid offset")
        });

    let validator = IntakeValidator::new(WeeklyCalendar::default(), offset);
    let response = match validator.validate(&payload.request, chrono::Utc::now()) {
        Ok(validated) => ValidationResponse {
            valid: true,
            errors: Vec::new(),
            quoted_price: Some(validated.quoted_price),
            service_label: Some(catalog::service_label(&validated.service_type).to_string()),
        },
        Err(errors) => ValidationResponse {
            valid: false,
            errors,
            quoted_price: None,
            service_label: None,
        },
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();
    tracing::info!("🚀 Starting intake validation lambda");
    lambda_runtime::run(service_fn(handler)).await
}
