//! Contact form.
//!
//! Submissions are not sent anywhere: a valid form is acknowledged and reset.

use aqua_aura_core::{Email, EmailError};
use thiserror::Error;
use tracing::instrument;

use crate::notice::Notice;

/// Contact form validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please enter a valid email address.")]
    InvalidEmail(#[from] EmailError),

    #[error("Name and message are required.")]
    MissingField,
}

/// Contact form fields as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub message: String,
}

impl ContactForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns `ContactError` if the email is invalid or the name or message
    /// is blank.
    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        let email = Email::parse(&self.email)?;

        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || message.is_empty() {
            return Err(ContactError::MissingField);
        }

        Ok(ContactSubmission {
            name: name.to_string(),
            email,
            message: message.to_string(),
        })
    }

    /// Submit the form: validate, acknowledge, and reset the fields.
    ///
    /// # Errors
    ///
    /// Returns `ContactError` (leaving the form as entered) if validation
    /// fails.
    #[instrument(skip(self), fields(email = %self.email.trim()))]
    pub fn submit(&mut self) -> Result<Notice, ContactError> {
        let submission = self.validate()?;
        tracing::info!(
            email = %submission.email,
            chars = submission.message.chars().count(),
            "Contact message received"
        );
        *self = Self::default();
        Ok(Notice::MessageSent)
    }
}
