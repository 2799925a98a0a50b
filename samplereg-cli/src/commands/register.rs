//! Fill out and submit the registration form
//!
//! ```bash
//! # One shot, for scripts
//! samplereg register --user "John Doe" --label Cu-foil-07 --proposal 2023-0412 \
//!     --inner 5 --outer 10
//!
//! # Prompt for each field, resubmit after a rejection
//! samplereg register --interactive
//! ```

use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::Parser;
use inquire::{Confirm, Select, Text};
use samplereg_core::{Field, LoadOutcome, RegistrationForm, SubmitOutcome};

use super::{print_feedback, print_notification, EndpointArgs, FormArgs};

#[derive(Parser, Debug)]
pub struct RegisterArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Prompt for every field (flag values become the initial answers)
    #[arg(long, short)]
    pub interactive: bool,
}

pub async fn run_register(args: RegisterArgs, endpoint: &EndpointArgs) -> Result<()> {
    let (config, api) = endpoint.resolve()?;
    let mut form = RegistrationForm::with_auto_hide(config.notification_timeout());

    let loaded = form.load_users(&api).await;
    if !args.interactive && loaded == LoadOutcome::Failed {
        print_notification(form.notification());
    }

    args.form.apply(form.form_mut());

    if !args.interactive {
        let outcome = form.submit(&api).await;
        return finish(&form, outcome);
    }

    loop {
        // Anything still inside its auto-hide window is repeated above the prompts
        form.expire_notification(Instant::now());
        print_notification(form.notification());

        prompt_fields(&mut form)?;
        let outcome = form.submit(&api).await;
        print_notification(form.notification());

        match outcome {
            SubmitOutcome::Created { .. } => return Ok(()),
            SubmitOutcome::Invalid(_) => print_feedback(&form.feedback()),
            SubmitOutcome::UnknownUser(_) | SubmitOutcome::Failed { .. } => {}
        }

        let retry = Confirm::new("Edit and resubmit?")
            .with_default(true)
            .prompt()?;
        if !retry {
            return Err(anyhow!("{}", form.notification().message));
        }
    }
}

/// Map a one-shot outcome to the process result
fn finish(form: &RegistrationForm, outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Created { user_id } => {
            print_notification(form.notification());
            tracing::debug!(user_id, "registration complete");
            Ok(())
        }
        SubmitOutcome::Invalid(_) => {
            print_feedback(&form.feedback());
            Err(anyhow!("{}", form.notification().message))
        }
        SubmitOutcome::UnknownUser(name) => Err(anyhow!(
            "{}: '{}'",
            form.notification().message,
            name
        )),
        SubmitOutcome::Failed { detail } => Err(anyhow!("{}", detail)),
    }
}

fn prompt_fields(form: &mut RegistrationForm) -> Result<()> {
    let names: Vec<String> = form.users().iter().map(|u| u.name.clone()).collect();
    let current_user = form.values().user.clone();

    let user = if names.is_empty() {
        Text::new("User:")
            .with_initial_value(&current_user)
            .prompt()?
    } else {
        let start = names
            .iter()
            .position(|name| *name == current_user)
            .unwrap_or(0);
        Select::new("Select user:", names)
            .with_starting_cursor(start)
            .prompt()?
    };
    enter(form, Field::User, &user);

    for (field, label) in [
        (Field::SampleLabel, "Sample label:"),
        (Field::ProposalNumber, "Proposal number:"),
    ] {
        let initial = form.values().text(field).unwrap_or_default().to_owned();
        let value = Text::new(label).with_initial_value(&initial).prompt()?;
        enter(form, field, &value);
    }

    for (field, label) in [
        (Field::InnerDiameter, "Inner diameter (mm):"),
        (Field::OuterDiameter, "Outer diameter (mm):"),
    ] {
        let initial = form
            .values()
            .number(field)
            .filter(|v| *v != 0.0 && !v.is_nan())
            .map(|v| v.to_string())
            .unwrap_or_default();
        let value = Text::new(label).with_initial_value(&initial).prompt()?;
        enter(form, field, &value);
    }

    Ok(())
}

/// Type a value, leave the field, show whatever feedback is now visible for it
fn enter(form: &mut RegistrationForm, field: Field, raw: &str) {
    form.set(field, raw);
    form.blur(field);

    let shown = form.feedback();
    let related: &[Field] = if field.is_diameter() {
        &[Field::InnerDiameter, Field::OuterDiameter]
    } else {
        std::slice::from_ref(&field)
    };

    for f in related {
        let status = shown.get(*f);
        if status.is_invalid {
            eprintln!("  {}", status.message);
        }
    }
}
