use crate::core::intake::FieldError;
use crate::domain::model::{SchoolProgram, StudentType};
use crate::utils::validation::{validate_contact_number, validate_email};
use serde::{Deserialize, Serialize};

/// Registration form for a client (student) account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientRegistration {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub student_id: Option<String>,
    pub contact_number: String,
    pub school_program: String,
    #[serde(default)]
    pub student_type: Option<String>,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub accept_policies: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminRegistration {
    pub full_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Field-level checks that need no store access. Uniqueness belongs to the
/// engine, which can ask the stores.
pub fn validate_client_registration(
    registration: &ClientRegistration,
) -> Result<(SchoolProgram, StudentType), Vec<FieldError>> {
    let mut errors = Vec::new();

    if registration.full_name.trim().is_empty() {
        errors.push(FieldError::new("full_name", "Enter your full name."));
    }

    if validate_email("email", registration.email.trim()).is_err() {
        errors.push(FieldError::new("email", "Enter a valid campus email."));
    }

    if validate_contact_number("contact_number", registration.contact_number.trim()).is_err() {
        errors.push(FieldError::new(
            "contact_number",
            "Enter a valid contact number.",
        ));
    }

    let program = SchoolProgram::from_code(registration.school_program.trim());
    if program.is_none() {
        errors.push(FieldError::new("school_program", "Select a school program."));
    }

    let student_type = match registration.student_type.as_deref() {
        None | Some("") => Some(StudentType::default()),
        Some(code) => {
            let parsed = StudentType::from_code(code);
            if parsed.is_none() {
                errors.push(FieldError::new(
                    "student_type",
                    "Select a student classification.",
                ));
            }
            parsed
        }
    };

    push_password_errors(
        &registration.password,
        &registration.confirm_password,
        &mut errors,
    );

    if !registration.accept_policies {
        errors.push(FieldError::new(
            "accept_policies",
            "You must agree to the Terms of Service, Privacy Policy, and Appointment Tracking Policy.",
        ));
    }

    if errors.is_empty() {
        Ok((program.expect("validated"), student_type.expect("validated")))
    } else {
        Err(errors)
    }
}

pub fn validate_admin_registration(
    registration: &AdminRegistration,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if registration.full_name.trim().is_empty() {
        errors.push(FieldError::new("full_name", "Enter your full name."));
    }
    if registration.username.trim().is_empty() {
        errors.push(FieldError::new("username", "Enter a username."));
    }
    push_password_errors(
        &registration.password,
        &registration.confirm_password,
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn push_password_errors(password: &str, confirm: &str, errors: &mut Vec<FieldError>) {
    if password != confirm {
        errors.push(FieldError::new("password", "Passwords must match."));
    }
    if password.len() < 8 {
        errors.push(FieldError::new(
            "password",
            "Use at least 8 characters for the password.",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn valid_registration_defaults_to_regular() {
        let (program, student_type) = validate_client_registration(&registration()).unwrap();
        assert_eq!(program, SchoolProgram::Technology);
        assert_eq!(student_type, StudentType::Regular);
    }

    #[test]
    fn short_and_mismatched_passwords_both_report() {
        let mut reg = registration();
        reg.password = "short".into();
        reg.confirm_password = "other".into();
        let errors = validate_client_registration(&reg).unwrap_err();
        let password_errors: Vec<_> =
            errors.iter().filter(|e| e.field == "password").collect();
        assert_eq!(password_errors.len(), 2);
    }

    #[test]
    fn policies_must_be_accepted() {
        let mut reg = registration();
        reg.accept_policies = false;
        let errors = validate_client_registration(&reg).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "accept_policies"));
    }

    #[test]
    fn admin_needs_username() {
        let reg = AdminRegistration {
            full_name: "Marco Cruz".into(),
            username: " ".into(),
            password: "longenough".into(),
            confirm_password: "longenough".into(),
        };
        let errors = validate_admin_registration(&reg).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "username"));
    }
}
