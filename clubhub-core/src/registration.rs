//! Event quick registration and club sign-up.

use chrono::NaiveDate;

use crate::session::{FormSession, SessionConfig};
use crate::validate::{CLUBS, FormContext, FormReport, FormValidator, FormValues, PhoneRule};

/// The "Register for <event>" modal.
pub struct QuickRegistration {
    event_title: String,
    session: FormSession,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub heading: String,
    pub lines: Vec<String>,
}

impl QuickRegistration {
    pub fn new(event_title: &str, phone_rule: PhoneRule, config: SessionConfig) -> Self {
        let validator = FormValidator::for_context(FormContext::QuickRegistration, phone_rule);
        QuickRegistration {
            event_title: event_title.to_string(),
            session: FormSession::new(validator, config),
        }
    }

    pub fn event_title(&self) -> &str {
        &self.event_title
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub async fn submit(&mut self, values: &FormValues, today: NaiveDate) -> Result<Confirmation, FormReport> {
        self.session.submit(values, today).await?;

        let name = field(values, "name");
        let email = field(values, "email");
        tracing::info!(event = %self.event_title, %name, %email, "registration completed");

        Ok(Confirmation {
            heading: "Registration Successful!".to_string(),
            lines: vec![
                format!(
                    "Thank you, {}! You've successfully registered for \"{}\".",
                    name, self.event_title
                ),
                format!("We've sent a confirmation email to {}.", email),
            ],
        })
    }

    /// "Done" in the success view.
    pub fn close(&mut self) {
        self.session.dismiss();
    }
}

/// Success text for the club sign-up form.
pub fn club_confirmation(values: &FormValues) -> Confirmation {
    let club_id = field(values, "club");
    let club = CLUBS
        .iter()
        .find(|(id, _)| *id == club_id)
        .map(|(_, name)| *name)
        .unwrap_or(club_id);

    Confirmation {
        heading: "Registration Successful!".to_string(),
        lines: vec![format!(
            "Thank you for registering for the {}. We'll contact you at {} with more details.",
            club,
            field(values, "email")
        )],
    }
}

fn field<'a>(values: &'a FormValues, name: &str) -> &'a str {
    values.get(name).map(|v| v.trim()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SubmissionStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_registration_confirmation() {
        let mut modal =
            QuickRegistration::new("Spring Hackathon", PhoneRule::International, SessionConfig::default());
        let mut values = FormValues::new();
        values.insert("name".to_string(), " Grace ".to_string());
        values.insert("email".to_string(), "grace@uni.edu".to_string());

        let confirmation = modal.submit(&values, today()).await.unwrap();
        assert_eq!(
            confirmation.lines[0],
            "Thank you, Grace! You've successfully registered for \"Spring Hackathon\"."
        );
        assert_eq!(confirmation.lines[1], "We've sent a confirmation email to grace@uni.edu.");

        modal.close();
        assert_eq!(modal.session().state().status, SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_registration_requires_name_and_email() {
        let mut modal =
            QuickRegistration::new("Spring Hackathon", PhoneRule::International, SessionConfig::default());
        let mut values = FormValues::new();
        values.insert("student-id".to_string(), "S123".to_string());

        let report = modal.submit(&values, today()).await.unwrap_err();
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_club_confirmation_uses_club_name() {
        let mut values = FormValues::new();
        values.insert("club".to_string(), "debate".to_string());
        values.insert("email".to_string(), "sam@uni.edu".to_string());

        let confirmation = club_confirmation(&values);
        assert_eq!(
            confirmation.lines[0],
            "Thank you for registering for the Debate Club. We'll contact you at sam@uni.edu with more details."
        );
    }
}
