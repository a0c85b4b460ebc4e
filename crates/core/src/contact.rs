//! Contact form validation and the `mailto:` handoff.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

/// Characters JavaScript's `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// The form control's `name` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in all fields")]
    MissingFields(Vec<Field>),
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// The four values of the contact form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Presence first, then email format.
    pub fn validate(&self) -> Result<(), ContactError> {
        let missing: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|&f| self.get(f).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

/// `local@domain.tld`: exactly one `@`, no whitespace, a non-empty local
/// part, and a dot in the domain with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// A composed message handed to the platform mail client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailHandoff {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailHandoff {
    /// Validate `form` and compose the message.
    pub fn compose(recipient: &str, form: &ContactForm) -> Result<Self, ContactError> {
        form.validate()?;
        Ok(Self {
            recipient: recipient.to_string(),
            subject: form.subject.clone(),
            body: format!(
                "Name: {}\nEmail: {}\n\nMessage:\n{}",
                form.name,
                form.email.trim(),
                form.message
            ),
        })
    }

    /// `mailto:` URI with percent-encoded `subject` and `body`.
    pub fn to_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            utf8_percent_encode(&self.subject, URI_COMPONENT),
            utf8_percent_encode(&self.body, URI_COMPONENT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.io"));
        assert!(!is_valid_email("user@@example"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn missing_fields_are_listed() {
        let form = ContactForm::new("Ada", "", "Hi", "   ");
        assert_eq!(
            form.validate(),
            Err(ContactError::MissingFields(vec![Field::Email, Field::Message]))
        );
        assert_eq!(
            ContactError::MissingFields(vec![]).to_string(),
            "Please fill in all fields"
        );
    }

    #[test]
    fn email_is_checked_without_surrounding_space() {
        let form = ContactForm::new("Ada", " ada@x.io ", "Hi", "Hello");
        assert_eq!(form.validate(), Ok(()));
        let handoff = MailHandoff::compose("me@example.com", &form).unwrap();
        assert!(handoff.body.contains("Email: ada@x.io\n"));
    }

    #[test]
    fn bad_email_after_presence() {
        let form = ContactForm::new("Ada", "ada-at-x.io", "Hi", "Hello");
        assert_eq!(form.validate(), Err(ContactError::InvalidEmail));
    }

    #[test]
    fn composes_mailto_like_encode_uri_component() {
        let form = ContactForm::new("Ada", "ada@x.io", "Hi there & more", "Hello (world)!");
        let handoff = MailHandoff::compose("me@example.com", &form).unwrap();
        assert_eq!(handoff.subject, "Hi there & more");
        assert!(handoff.body.contains("Name: Ada"));
        assert!(handoff.body.contains("Email: ada@x.io"));
        assert!(handoff.body.ends_with("Message:\nHello (world)!"));

        let uri = handoff.to_uri();
        assert!(uri.starts_with("mailto:me@example.com?subject=Hi%20there%20%26%20more&body="));
        assert!(uri.contains("Name%3A%20Ada%0AEmail%3A%20ada%40x.io%0A%0AMessage%3A%0AHello%20(world)!"));
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        let form = ContactForm::new("Zoë", "z@x.io", "é", "ok");
        let uri = MailHandoff::compose("me@example.com", &form).unwrap().to_uri();
        assert!(uri.contains("subject=%C3%A9&"));
    }
}
