use anyhow::Result;
use chrono::NaiveDate;
use clubhub_core::registration::club_confirmation;
use clubhub_core::site_config::SiteConfig;
use clubhub_core::validate::{FieldKind, FormContext, FormValidator, FormValues};
use dialoguer::{Input, Select};

use crate::render::Render;
use crate::utils::parse_today;

pub fn run(
    config: &SiteConfig,
    form: &str,
    pairs: &[String],
    interactive: bool,
    today: Option<&str>,
) -> Result<()> {
    let context: FormContext = form.parse()?;
    let today = parse_today(today)?;
    let validator = FormValidator::for_context(context, config.phone_rule(context));

    let values = if interactive {
        prompt_values(&validator, today)?
    } else {
        parse_pairs(&validator, pairs)?
    };

    let report = validator.validate(&values, today);
    println!("{}", report.render());

    if !report.is_valid() {
        anyhow::bail!(
            "Form '{}' has {} invalid field(s)",
            context,
            report.errors.len()
        );
    }

    if context == FormContext::ClubRegistration {
        println!();
        println!("{}", club_confirmation(&values).render());
    }

    Ok(())
}

/// Parse `field=value` arguments, rejecting names the form does not have.
fn parse_pairs(validator: &FormValidator, pairs: &[String]) -> Result<FormValues> {
    let mut values = FormValues::new();

    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            anyhow::bail!("Expected field=value, got '{}'", pair);
        };

        if !validator.fields().iter().any(|f| f.name == name) {
            let available: Vec<_> = validator.fields().iter().map(|f| f.name.as_str()).collect();
            anyhow::bail!(
                "Unknown field '{}'. Available: {}",
                name,
                available.join(", ")
            );
        }

        values.insert(name.to_string(), value.to_string());
    }

    Ok(values)
}

/// Ask for each field in turn, checking it as soon as it is entered.
fn prompt_values(validator: &FormValidator, today: NaiveDate) -> Result<FormValues> {
    let mut values = FormValues::new();

    for spec in validator.fields() {
        let value = match &spec.kind {
            FieldKind::Choice(options) => {
                let selection = Select::new()
                    .with_prompt(format!("  {}", spec.label))
                    .items(options)
                    .default(0)
                    .interact()?;
                options[selection].clone()
            }
            _ => Input::<String>::new()
                .with_prompt(format!("  {}", spec.label))
                .allow_empty(!spec.required)
                .validate_with(|input: &String| validator.validate_one(&spec.name, input, today))
                .interact_text()?,
        };
        values.insert(spec.name.clone(), value);
    }

    Ok(values)
}
