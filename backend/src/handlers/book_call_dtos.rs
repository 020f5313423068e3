use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::BookingError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookCallRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub service: String,
    pub message: Option<String>,
    pub preferred_date: Option<String>,
}

/// `null` counts as a missing value, same as an absent key.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Serialize)]
pub struct BookCallResponse {
    pub success: bool,
    pub message: String,
}

impl BookCallResponse {
    pub fn received() -> Self {
        BookCallResponse {
            success: true,
            message: "Call request received successfully".to_string(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Optional field with surrounding whitespace removed, `None` when blank.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl BookCallRequest {
    pub fn validate(&self) -> Result<(), BookingError> {
        if [&self.name, &self.email, &self.service]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(BookingError::MissingFields);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(BookingError::InvalidEmail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookCallRequest {
        BookCallRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            service: "Web Development".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@@example.com"));
    }

    #[test]
    fn required_fields_are_checked_before_email() {
        let mut req = request();
        req.email = "not-an-email".to_string();
        req.service = "  ".to_string();
        assert!(matches!(req.validate(), Err(BookingError::MissingFields)));

        req.service = "Web Development".to_string();
        assert!(matches!(req.validate(), Err(BookingError::InvalidEmail)));

        assert!(request().validate().is_ok());
    }

    #[test]
    fn missing_keys_deserialize_as_empty() {
        let req: BookCallRequest =
            serde_json::from_str(r#"{"name":"Ada","preferredDate":"2026-11-02"}"#).unwrap();
        assert_eq!(req.email, "");
        assert_eq!(req.phone, None);
        assert_eq!(req.preferred_date.as_deref(), Some("2026-11-02"));
    }

    #[test]
    fn null_required_fields_deserialize_as_empty() {
        let req: BookCallRequest =
            serde_json::from_str(r#"{"name":null,"email":"ada@example.com","service":null}"#).unwrap();
        assert_eq!(req.name, "");
        assert_eq!(req.service, "");
        assert!(matches!(req.validate(), Err(BookingError::MissingFields)));
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        assert_eq!(present(&Some("  ".to_string())), None);
        assert_eq!(present(&Some(" Acme ".to_string())), Some("Acme"));
        assert_eq!(present(&None), None);
    }
}
