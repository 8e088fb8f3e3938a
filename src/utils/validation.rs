use crate::utils::error::{DeskError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DeskError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 檢查 email 格式（local@domain，domain 需含 '.'）
pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Invalid email address".to_string(),
        });
    }
    Ok(())
}

/// 聯絡電話：允許數字、空白、+、-、()，長度 7..=30
pub fn validate_contact_number(field_name: &str, value: &str) -> Result<()> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    let shape_ok = value
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_whitespace() || "+-()".contains(c));
    if digits < 7 || value.len() > 30 || !shape_ok {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Invalid contact number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_password(password: &str, confirm: &str) -> Result<()> {
    if password != confirm {
        return Err(DeskError::ValidationError {
            message: "Passwords must match.".to_string(),
        });
    }
    if password.len() < 8 {
        return Err(DeskError::ValidationError {
            message: "Use at least 8 characters for the password.".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 營業時段：start < end 且 end <= 24
pub fn validate_hour_window(field_name: &str, start: u8, end: u8) -> Result<()> {
    if start >= end || end > 24 {
        return Err(DeskError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("[{}, {}]", start, end),
            reason: "Window must satisfy start < end and end <= 24".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("webhook_endpoint", "https://example.com").is_ok());
        assert!(validate_url("webhook_endpoint", "http://example.com").is_ok());
        assert!(validate_url("webhook_endpoint", "").is_err());
        assert!(validate_url("webhook_endpoint", "invalid-url").is_err());
        assert!(validate_url("webhook_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "ana@campus.edu.ph").is_ok());
        assert!(validate_email("email", "no-at-sign").is_err());
        assert!(validate_email("email", "x@nodot").is_err());
        assert!(validate_email("email", "x@.ph").is_err());
        assert!(validate_email("email", "a b@campus.edu").is_err());
    }

    #[test]
    fn test_validate_contact_number() {
        assert!(validate_contact_number("contact_number", "0917 123 4567").is_ok());
        assert!(validate_contact_number("contact_number", "+63 917-123-4567").is_ok());
        assert!(validate_contact_number("contact_number", "12345").is_err());
        assert!(validate_contact_number("contact_number", "call me maybe").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough", "longenough").is_ok());
        assert!(validate_password("longenough", "different").is_err());
        assert!(validate_password("short", "short").is_err());
    }

    #[test]
    fn test_validate_hour_window() {
        assert!(validate_hour_window("schedule.week.monday", 14, 16).is_ok());
        assert!(validate_hour_window("schedule.week.wednesday", 0, 24).is_ok());
        assert!(validate_hour_window("schedule.week.monday", 16, 14).is_err());
        assert!(validate_hour_window("schedule.week.monday", 10, 25).is_err());
    }
}
