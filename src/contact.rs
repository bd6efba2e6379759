//! Contact form validation and the `mailto:` link it produces.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Element id of the input on the page.
    pub fn id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

pub fn field_is_valid(field: Field, value: &str) -> bool {
    let value = value.trim();
    match field {
        Field::Email => !value.is_empty() && validate_email(value),
        Field::Name | Field::Message => !value.is_empty(),
    }
}

/// Live check while editing. The email is tested as typed, so stray
/// spaces keep the mark until removed; submit trims instead.
fn live_is_valid(field: Field, value: &str) -> bool {
    match field {
        Field::Email => !value.trim().is_empty() && validate_email(value),
        Field::Name | Field::Message => field_is_valid(field, value),
    }
}

/// Whether the field carries `error` after losing focus.
pub fn on_blur(field: Field, value: &str) -> bool {
    !live_is_valid(field, value)
}

/// Whether the field carries `error` after an edit. Typing never adds the
/// mark, it only clears it once the value is valid.
pub fn on_input(field: Field, value: &str, had_error: bool) -> bool {
    had_error && !live_is_valid(field, value)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("invalid fields: {0:?}")]
    Invalid(Vec<Field>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Every field that fails, in form order.
    pub fn invalid_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !field_is_valid(*field, self.value(*field)))
            .collect()
    }

    /// Build the `mailto:` link, or report every invalid field.
    pub fn mailto(&self, address: &str, subject_prefix: &str) -> Result<String, ContactError> {
        let invalid = self.invalid_fields();
        if !invalid.is_empty() {
            return Err(ContactError::Invalid(invalid));
        }

        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        let subject = format!("{subject_prefix} - {name}");
        let body = format!("Nombre: {name}\nEmail: {email}\n\nMensaje:\n{message}");

        Ok(format!(
            "mailto:{}?subject={}&body={}",
            address,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com"));
        assert!(validate_email("a.b+c@sub.example.org"));
        assert!(!validate_email("ana@example"));
        assert!(!validate_email("ana example@x.com"));
        assert!(!validate_email("@x.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_blur_and_input_marks() {
        assert!(on_blur(Field::Name, "   "));
        assert!(!on_blur(Field::Name, "Ana"));
        assert!(on_blur(Field::Email, "ana@"));

        // typing into a clean field never marks it
        assert!(!on_input(Field::Email, "a", false));
        // an email error stays until the address is valid
        assert!(on_input(Field::Email, "ana@ex", true));
        assert!(!on_input(Field::Email, "ana@ex.com", true));
        assert!(!on_input(Field::Message, "hola", true));
    }

    #[test]
    fn test_live_marks_keep_padded_email_invalid() {
        assert!(on_blur(Field::Email, " ana@x.com "));
        assert!(on_input(Field::Email, "ana@x.com ", true));
        assert!(!on_input(Field::Email, "ana@x.com", true));
        assert!(!on_blur(Field::Name, " Ana "));
        assert!(ContactForm::new("Ana", " ana@x.com ", "hola").invalid_fields().is_empty());
    }

    #[test]
    fn test_invalid_form_reports_every_field() {
        let form = ContactForm::new("", "nope", "  ");
        assert_eq!(
            form.mailto("me@example.com", "Contacto"),
            Err(ContactError::Invalid(vec![Field::Name, Field::Email, Field::Message]))
        );
    }

    #[test]
    fn test_mailto_link_is_encoded() {
        let form = ContactForm::new(" Ana María ", "ana@example.com", "Hola & adiós");
        let link = form
            .mailto("me@example.com", "Contacto desde portafolio")
            .unwrap();

        assert_eq!(
            link,
            "mailto:me@example.com?subject=Contacto%20desde%20portafolio%20-%20Ana%20Mar%C3%ADa\
             &body=Nombre%3A%20Ana%20Mar%C3%ADa%0AEmail%3A%20ana%40example.com%0A%0AMensaje%3A%0AHola%20%26%20adi%C3%B3s"
        );
    }
}
