//! Offline form validation

use anyhow::{bail, Result};
use clap::Parser;
use samplereg_core::{feedback, is_complete, FormState};

use super::{print_feedback, validation_json, FormArgs, OutputFormat};

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

/// Fill the form from flags, touch every field, report what a submit would show
pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let mut form = FormState::new();
    args.form.apply(&mut form);
    form.touch_all();

    let validation = feedback(form.values(), form.touched());
    let ok = validation.is_valid() && is_complete(form.values());

    if args.json || args.output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&validation_json(&validation))?);
    } else if ok {
        println!("✓ Form is valid");
    } else {
        print_feedback(&validation);
    }

    if !ok {
        bail!("Please fill out the form");
    }
    Ok(())
}
