//! Field-level validation shared by the request DTOs.
//!
//! Services collect every problem with a payload into a [`FieldValidator`]
//! and turn it into a single `400` response, so clients see all field
//! messages at once.

use std::collections::BTreeMap;

use sea_orm::ActiveEnum;
use url::Url;

use crate::error::AppError;

pub type FieldErrors = BTreeMap<String, Vec<String>>;

// Widths of the VARCHAR columns in `migrations/`.
pub const USERNAME_MAX_LEN: usize = 150;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PERSON_NAME_MAX_LEN: usize = 150;
pub const PHONE_MAX_LEN: usize = 20;
pub const SHELTER_NAME_MAX_LEN: usize = 100;
pub const PET_NAME_MAX_LEN: usize = 100;

#[derive(Debug, Default)]
pub struct FieldValidator {
    errors: FieldErrors,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, "This field may not be blank.");
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.trim().chars().count() > max {
            self.add(
                field,
                format!("Ensure this field has no more than {max} characters."),
            );
        }
        self
    }

    /// Parse a string into one of the string-backed enums stored in the database.
    /// Records a field error and returns `None` when the value is not a valid choice.
    pub fn choice<E>(&mut self, field: &str, raw: &str) -> Option<E>
    where
        E: ActiveEnum<Value = String>,
    {
        match E::try_from_value(&raw.to_string()) {
            Ok(value) => Some(value),
            Err(_) => {
                self.add(field, invalid_choice::<E>(raw));
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Parse a single enum field, failing with a field-level validation error.
pub fn parse_choice<E>(field: &str, raw: &str) -> Result<E, AppError>
where
    E: ActiveEnum<Value = String>,
{
    E::try_from_value(&raw.to_string()).map_err(|_| field_error(field, invalid_choice::<E>(raw)))
}

fn invalid_choice<E>(raw: &str) -> String
where
    E: ActiveEnum<Value = String>,
{
    format!(
        "\"{raw}\" is not a valid choice. Expected one of: {}.",
        E::values().join(", ")
    )
}

/// A single-field validation failure.
pub fn field_error(field: &str, message: impl Into<String>) -> AppError {
    let mut validator = FieldValidator::new();
    validator.add(field, message);
    AppError::Validation(validator.errors)
}

pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// An absolute `http`/`https` URL with a host.
pub fn is_web_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

pub fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}
