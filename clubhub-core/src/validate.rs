//! Form field validation.
//!
//! Validation is stateless: every call starts from a cleared error state,
//! checks the rules in a fixed order and reports the first failure.
//! Failures are values shown inline next to the field, never faults.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ClubHubError;

pub const LONG_TEXT_MIN_LEN: usize = 20;
const PHONE_DIGITS: usize = 10;
const INTERNATIONAL_MAX_DIGITS: usize = 15;

/// How phone numbers are checked. The site's forms disagree, so each form
/// context picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhoneRule {
    /// Strip every non-digit, then require exactly 10 digits.
    TenDigit,
    /// Strip whitespace, dashes and parentheses, then require an optional
    /// leading `+` followed by 1 to 15 digits.
    International,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    /// Free text with a minimum length, e.g. a description.
    LongText,
    /// `YYYY-MM-DD` that must not be before today.
    FutureDate,
    /// A select box; the value must be one of the options.
    Choice(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        FieldSpec {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("{}", phone_message(.0))]
    InvalidPhone(PhoneRule),

    #[error("Please provide a more detailed description (at least {min} characters).")]
    TooShort { min: usize },

    #[error("Please enter a date as YYYY-MM-DD.")]
    InvalidDate,

    #[error("Event date must be in the future.")]
    DateInPast,

    #[error("Please choose one of the listed options.")]
    InvalidChoice,
}

fn phone_message(rule: &PhoneRule) -> &'static str {
    match rule {
        PhoneRule::TenDigit => "Please enter a valid 10-digit phone number.",
        PhoneRule::International => "Please enter a valid phone number.",
    }
}

/// Validate one value against its field spec.
///
/// `today` is only consulted by [`FieldKind::FutureDate`].
pub fn validate_field(
    spec: &FieldSpec,
    value: &str,
    phone_rule: PhoneRule,
    today: NaiveDate,
) -> Result<(), FieldError> {
    let value = value.trim();

    if value.is_empty() {
        return if spec.required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }

    match &spec.kind {
        FieldKind::Text => Ok(()),
        FieldKind::Email if is_email_shaped(value) => Ok(()),
        FieldKind::Email => Err(FieldError::InvalidEmail),
        FieldKind::Phone if is_valid_phone(value, phone_rule) => Ok(()),
        FieldKind::Phone => Err(FieldError::InvalidPhone(phone_rule)),
        FieldKind::LongText if value.encode_utf16().count() >= LONG_TEXT_MIN_LEN => Ok(()),
        FieldKind::LongText => Err(FieldError::TooShort {
            min: LONG_TEXT_MIN_LEN,
        }),
        FieldKind::FutureDate => {
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| FieldError::InvalidDate)?;
            if date < today {
                Err(FieldError::DateInPast)
            } else {
                Ok(())
            }
        }
        FieldKind::Choice(options) if options.iter().any(|o| o == value) => Ok(()),
        FieldKind::Choice(_) => Err(FieldError::InvalidChoice),
    }
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, something
/// before it, and a `.` in the domain with characters on both sides.
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn is_valid_phone(value: &str, rule: PhoneRule) -> bool {
    match rule {
        PhoneRule::TenDigit => value.chars().filter(char::is_ascii_digit).count() == PHONE_DIGITS,
        PhoneRule::International => {
            let compact: String = value
                .chars()
                .filter(|c| !(c.is_whitespace() || matches!(*c, '-' | '(' | ')')))
                .collect();
            let digits = compact.strip_prefix('+').unwrap_or(&compact);
            (1..=INTERNATIONAL_MAX_DIGITS).contains(&digits.len())
                && digits.chars().all(|c| c.is_ascii_digit())
        }
    }
}

/// The site's forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormContext {
    Contact,
    Join,
    EventSubmission,
    QuickRegistration,
    ClubRegistration,
}

pub const CLUBS: [(&str, &str); 4] = [
    ("drama", "Drama Club"),
    ("tech", "Tech Club"),
    ("debate", "Debate Club"),
    ("sports", "Sports Club"),
];

pub const ACADEMIC_YEARS: [&str; 5] = ["Freshman", "Sophomore", "Junior", "Senior", "Graduate"];

impl FormContext {
    pub const ALL: [FormContext; 5] = [
        FormContext::Contact,
        FormContext::Join,
        FormContext::EventSubmission,
        FormContext::QuickRegistration,
        FormContext::ClubRegistration,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FormContext::Contact => "contact",
            FormContext::Join => "join",
            FormContext::EventSubmission => "event",
            FormContext::QuickRegistration => "quick-registration",
            FormContext::ClubRegistration => "club-registration",
        }
    }

    /// Phone rule used when the configuration does not name one.
    pub fn default_phone_rule(&self) -> PhoneRule {
        match self {
            FormContext::Contact | FormContext::Join => PhoneRule::TenDigit,
            _ => PhoneRule::International,
        }
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        use FieldKind::*;

        match self {
            FormContext::Contact => vec![
                FieldSpec::new("name", "Name", Text).required(),
                FieldSpec::new("email", "Email", Email).required(),
                FieldSpec::new("phone", "Phone", Phone),
                FieldSpec::new("message", "Message", LongText).required(),
            ],
            FormContext::Join => vec![
                FieldSpec::new("name", "Name", Text).required(),
                FieldSpec::new("email", "Email", Email).required(),
                FieldSpec::new("phone", "Phone", Phone).required(),
                FieldSpec::new("club", "Club", Text).required(),
                FieldSpec::new("message", "Why do you want to join?", LongText),
            ],
            FormContext::EventSubmission => vec![
                FieldSpec::new("event-name", "Event Name", Text).required(),
                FieldSpec::new("organizer-email", "Organizer Email", Email).required(),
                FieldSpec::new("organizer-phone", "Organizer Phone", Phone),
                FieldSpec::new("event-date", "Event Date", FutureDate).required(),
                FieldSpec::new("event-description", "Description", LongText).required(),
            ],
            FormContext::QuickRegistration => vec![
                FieldSpec::new("name", "Full Name", Text).required(),
                FieldSpec::new("email", "Email", Email).required(),
                FieldSpec::new("student-id", "Student ID", Text),
            ],
            FormContext::ClubRegistration => vec![
                FieldSpec::new("full-name", "Full Name", Text).required(),
                FieldSpec::new("email", "Email", Email).required(),
                FieldSpec::new("student-id", "Student ID", Text).required(),
                FieldSpec::new(
                    "club",
                    "Select Club",
                    Choice(CLUBS.iter().map(|(id, _)| id.to_string()).collect()),
                )
                .required(),
                FieldSpec::new(
                    "year",
                    "Academic Year",
                    Choice(ACADEMIC_YEARS.iter().map(|y| y.to_string()).collect()),
                )
                .required(),
                FieldSpec::new("interests", "Interests", Text),
                FieldSpec::new("message", "Message", Text),
            ],
        }
    }
}

impl FromStr for FormContext {
    type Err = ClubHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormContext::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ClubHubError::UnknownForm(s.to_string()))
    }
}

impl fmt::Display for FormContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Submitted field values by field name. Missing names count as empty.
pub type FormValues = BTreeMap<String, String>;

/// Validates every field of one form.
#[derive(Debug, Clone)]
pub struct FormValidator {
    fields: Vec<FieldSpec>,
    phone_rule: PhoneRule,
}

impl FormValidator {
    pub fn new(fields: Vec<FieldSpec>, phone_rule: PhoneRule) -> Self {
        FormValidator { fields, phone_rule }
    }

    pub fn for_context(context: FormContext, phone_rule: PhoneRule) -> Self {
        FormValidator::new(context.fields(), phone_rule)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn phone_rule(&self) -> PhoneRule {
        self.phone_rule
    }

    /// Check one field by name, as on blur. Unknown names pass.
    pub fn validate_one(&self, name: &str, value: &str, today: NaiveDate) -> Result<(), FieldError> {
        match self.fields.iter().find(|f| f.name == name) {
            Some(spec) => validate_field(spec, value, self.phone_rule, today),
            None => Ok(()),
        }
    }

    /// Check every field. One failing field does not stop the others.
    pub fn validate(&self, values: &FormValues, today: NaiveDate) -> FormReport {
        let errors = self
            .fields
            .iter()
            .filter_map(|spec| {
                let value = values.get(&spec.name).map(String::as_str).unwrap_or("");
                validate_field(spec, value, self.phone_rule, today)
                    .err()
                    .map(|e| (spec.name.clone(), e))
            })
            .collect();

        FormReport { errors }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    /// Field name and its error, in field order.
    pub errors: Vec<(String, FieldError)>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|(name, _)| name == field).map(|(_, e)| e)
    }

    pub fn summary(&self) -> Option<&'static str> {
        (!self.is_valid()).then_some("Please fix the errors above.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn check(kind: FieldKind, value: &str) -> Result<(), FieldError> {
        let spec = FieldSpec::new("field", "Field", kind);
        validate_field(&spec, value, PhoneRule::TenDigit, today())
    }

    #[test]
    fn test_required_checked_on_trimmed_value() {
        let spec = FieldSpec::new("name", "Name", FieldKind::Text).required();
        assert_eq!(
            validate_field(&spec, "   ", PhoneRule::TenDigit, today()),
            Err(FieldError::Required)
        );
        assert_eq!(validate_field(&spec, " Ada ", PhoneRule::TenDigit, today()), Ok(()));
    }

    #[test]
    fn test_required_wins_over_kind() {
        let spec = FieldSpec::new("email", "Email", FieldKind::Email).required();
        assert_eq!(
            validate_field(&spec, "", PhoneRule::TenDigit, today()),
            Err(FieldError::Required)
        );
    }

    #[test]
    fn test_empty_optional_field_passes_kind_checks() {
        assert_eq!(check(FieldKind::Email, ""), Ok(()));
        assert_eq!(check(FieldKind::Phone, ""), Ok(()));
        assert_eq!(check(FieldKind::LongText, ""), Ok(()));
    }

    #[test]
    fn test_email_shape() {
        assert_eq!(check(FieldKind::Email, "abc@def"), Err(FieldError::InvalidEmail));
        assert_eq!(check(FieldKind::Email, "abc@def.com"), Ok(()));
        assert!(!is_email_shaped("@def.com"));
        assert!(!is_email_shaped("a b@def.com"));
        assert!(!is_email_shaped("a@b@c.com"));
        assert!(!is_email_shaped("abc@.com"));
        assert!(!is_email_shaped("abc@def."));
        assert!(is_email_shaped("first.last@mail.uni.edu"));
    }

    #[test]
    fn test_ten_digit_phone() {
        assert!(is_valid_phone("(555) 123-4567", PhoneRule::TenDigit));
        assert!(!is_valid_phone("555-1234", PhoneRule::TenDigit));
        assert!(!is_valid_phone("+1 555 123 4567", PhoneRule::TenDigit));
    }

    #[test]
    fn test_international_phone() {
        assert!(is_valid_phone("+44 (20) 7946-0958", PhoneRule::International));
        assert!(is_valid_phone("7", PhoneRule::International));
        assert!(!is_valid_phone("+", PhoneRule::International));
        assert!(!is_valid_phone("+1234567890123456", PhoneRule::International));
        assert!(!is_valid_phone("555.123.4567", PhoneRule::International));
    }

    #[test]
    fn test_phone_error_names_rule() {
        let spec = FieldSpec::new("phone", "Phone", FieldKind::Phone);
        let err = validate_field(&spec, "12", PhoneRule::TenDigit, today()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid 10-digit phone number.");
    }

    #[test]
    fn test_long_text_minimum() {
        assert_eq!(
            check(FieldKind::LongText, &"x".repeat(19)),
            Err(FieldError::TooShort { min: 20 })
        );
        assert_eq!(check(FieldKind::LongText, &"x".repeat(20)), Ok(()));
    }

    #[test]
    fn test_long_text_counts_utf16_units() {
        // Each emoji is two UTF-16 units.
        assert_eq!(check(FieldKind::LongText, &"🎭".repeat(10)), Ok(()));
        assert_eq!(
            check(FieldKind::LongText, &format!("{}x", "🎭".repeat(9))),
            Err(FieldError::TooShort { min: 20 })
        );
    }

    #[test]
    fn test_future_date() {
        assert_eq!(check(FieldKind::FutureDate, "2024-06-01"), Ok(()));
        assert_eq!(check(FieldKind::FutureDate, "2024-05-31"), Err(FieldError::DateInPast));
        assert_eq!(check(FieldKind::FutureDate, "June 1"), Err(FieldError::InvalidDate));
    }

    #[test]
    fn test_form_reports_every_failing_field() {
        let validator =
            FormValidator::for_context(FormContext::QuickRegistration, PhoneRule::International);
        let mut values = FormValues::new();
        values.insert("email".to_string(), "nope".to_string());

        let report = validator.validate(&values, today());
        assert!(!report.is_valid());
        assert_eq!(report.error_for("name"), Some(&FieldError::Required));
        assert_eq!(report.error_for("email"), Some(&FieldError::InvalidEmail));
        assert_eq!(report.error_for("student-id"), None);
        assert_eq!(report.summary(), Some("Please fix the errors above."));
    }

    #[test]
    fn test_club_registration_choices() {
        let validator =
            FormValidator::for_context(FormContext::ClubRegistration, PhoneRule::International);
        assert_eq!(validator.validate_one("club", "chess", today()), Err(FieldError::InvalidChoice));
        assert_eq!(validator.validate_one("club", "debate", today()), Ok(()));
        assert_eq!(validator.validate_one("year", "Junior", today()), Ok(()));
    }

    #[test]
    fn test_parse_form_context() {
        assert_eq!("event".parse::<FormContext>().unwrap(), FormContext::EventSubmission);
        assert!("newsletter".parse::<FormContext>().is_err());
    }
}
