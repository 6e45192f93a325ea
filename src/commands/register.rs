use anyhow::Result;
use chrono::Local;
use clubhub_core::EventCatalog;
use clubhub_core::registration::QuickRegistration;
use clubhub_core::site_config::SiteConfig;
use clubhub_core::validate::{FormContext, FormValues};
use dialoguer::Input;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::create_spinner;

pub async fn run(
    catalog: &EventCatalog,
    config: &SiteConfig,
    event: &str,
    name: Option<String>,
    email: Option<String>,
    student_id: Option<String>,
) -> Result<()> {
    let Some(event) = catalog.find_event(event) else {
        let available: Vec<_> = catalog.events.iter().map(|e| e.title.as_str()).collect();
        anyhow::bail!(
            "Event '{}' not found. Available: {}",
            event,
            available.join(", ")
        );
    };

    let context = FormContext::QuickRegistration;
    let mut modal = QuickRegistration::new(
        &event.title,
        config.phone_rule(context),
        config.session_config(context),
    );

    println!("Register for {}", event.title.bold());

    let name = match name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("  Full Name")
            .interact_text()?,
    };
    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("  Email").interact_text()?,
    };
    let student_id = match student_id {
        Some(id) => id,
        None => Input::<String>::new()
            .with_prompt("  Student ID (optional)")
            .allow_empty(true)
            .interact_text()?,
    };

    let mut values = FormValues::new();
    values.insert("name".to_string(), name);
    values.insert("email".to_string(), email);
    values.insert("student-id".to_string(), student_id);

    let spinner = create_spinner("Submitting".to_string())?;
    let result = modal.submit(&values, Local::now().date_naive()).await;
    spinner.finish_and_clear();

    match result {
        Ok(confirmation) => {
            println!("{}", confirmation.render());
            modal.close();
            Ok(())
        }
        Err(report) => {
            println!("{}", report.render());
            anyhow::bail!("Registration for '{}' was not submitted", event.title);
        }
    }
}
