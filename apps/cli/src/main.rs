use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, FormStateStore, HttpPredictionTransport, NumericViolation, SubmissionOutcome,
    SubmissionWorkflow, SubmitRejected,
};
use serde_json::Value;
use shared::domain::{FieldKind, FormSchema};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Submit habit attributes to the prediction service from the command line")]
struct Args {
    /// Prediction endpoint, overriding predictor.toml and the environment.
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Field assignment `key=value`; may be repeated.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(String, String)>,
    /// JSON object of field values, applied before any `--set`.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Print the form fields and their constraints, then exit.
    #[arg(long)]
    list_fields: bool,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn describe_fields(schema: &FormSchema) -> String {
    let mut out = String::new();
    for field in schema.iter() {
        let constraint = match &field.kind {
            FieldKind::Numeric(bounds) => {
                format!("number {}..={} step {}", bounds.min, bounds.max, bounds.step)
            }
            FieldKind::Categorical(allowed) => format!("one of: {}", allowed.join(", ")),
        };
        out.push_str(&format!(
            "{:<31} {:<30} {}\n",
            field.key.as_str(),
            field.label,
            constraint
        ));
    }
    out
}

fn json_inputs(raw: &str) -> Result<Vec<(String, String)>> {
    let value: Value = serde_json::from_str(raw).context("input is not valid JSON")?;
    let Value::Object(map) = value else {
        bail!("input must be a JSON object of field values");
    };
    map.into_iter()
        .map(|(key, value)| {
            let raw = match value {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                other => bail!("field '{key}' must be a string or number, got {other}"),
            };
            Ok((key, raw))
        })
        .collect()
}

fn fill_store(store: &mut FormStateStore, values: &[(String, String)]) -> Result<()> {
    for (key, value) in values {
        if store.schema().get(key).is_none() {
            return Err(anyhow!("unknown field '{key}' (see --list-fields)"));
        }
        store.set_value(key, value.clone());
    }
    Ok(())
}

/// Holds the form back while a numeric field is unset or out of bounds,
/// the same gate the desktop form applies before submitting.
fn numeric_gate(store: &FormStateStore) -> Result<(), NumericViolation> {
    match store.snapshot().first_numeric_violation() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let schema = FormSchema::student_habits();
    if args.list_fields {
        print!("{}", describe_fields(schema));
        return Ok(ExitCode::SUCCESS);
    }

    let mut values = Vec::new();
    if let Some(path) = &args.input {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?;
        values.extend(json_inputs(&raw)?);
    }
    values.extend(args.assignments);

    let mut store = FormStateStore::student_habits();
    fill_store(&mut store, &values)?;
    if let Err(violation) = numeric_gate(&store) {
        eprintln!("{violation}");
        return Ok(ExitCode::from(2));
    }

    let mut settings = load_settings().context("failed to load predictor settings")?;
    settings.apply_overrides(args.endpoint, args.timeout_secs);
    let transport = HttpPredictionTransport::from_settings(&settings)
        .context("failed to prepare prediction transport")?;

    let mut workflow = SubmissionWorkflow::new();
    match workflow.run(&mut store, &transport).await {
        SubmissionOutcome::Succeeded(score) => {
            println!("Predicted exam score: {score:.2}");
            Ok(ExitCode::SUCCESS)
        }
        SubmissionOutcome::Rejected(SubmitRejected::Invalid(err)) => {
            eprintln!("{err}");
            Ok(ExitCode::from(2))
        }
        SubmissionOutcome::Rejected(SubmitRejected::InFlight) => {
            eprintln!("a prediction is already in flight");
            Ok(ExitCode::from(2))
        }
        SubmissionOutcome::Failed(err) => {
            tracing::debug!(error = %err, "prediction failed");
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignments_with_spaces_in_values() {
        assert_eq!(
            parse_assignment("parental_education_level=High School"),
            Ok((
                "parental_education_level".to_string(),
                "High School".to_string()
            ))
        );
        assert!(parse_assignment("age").is_err());
        assert!(parse_assignment("=20").is_err());
    }

    #[test]
    fn json_inputs_accept_strings_and_numbers() {
        let values = json_inputs(r#"{"age": 20, "sleep_hours": 7.5, "gender": "Male"}"#)
            .expect("parse");
        assert!(values.contains(&("age".to_string(), "20".to_string())));
        assert!(values.contains(&("sleep_hours".to_string(), "7.5".to_string())));
        assert!(values.contains(&("gender".to_string(), "Male".to_string())));

        assert!(json_inputs(r#"{"part_time_job": true}"#).is_err());
        assert!(json_inputs("[1, 2]").is_err());
    }

    #[test]
    fn out_of_bounds_number_is_held_back_but_categories_are_not() {
        let mut store = FormStateStore::student_habits();
        fill_store(&mut store, &[("age".to_string(), "7".to_string())]).expect("known field");
        let violation = numeric_gate(&store).expect_err("age below min");
        assert_eq!(violation.key().as_str(), "age");
        assert_eq!(
            violation.to_string(),
            "Age must be between 10 and 100 in steps of 1."
        );

        fill_store(
            &mut store,
            &[
                ("age".to_string(), "20".to_string()),
                ("gender".to_string(), "Alien".to_string()),
            ],
        )
        .expect("categories are left to the validator");
        assert_eq!(store.value("gender"), Some("Alien"));
    }

    #[test]
    fn categories_alone_leave_the_first_number_unset() {
        let mut store = FormStateStore::student_habits();
        let categories: Vec<(String, String)> = [
            ("gender", "Male"),
            ("part_time_job", "No"),
            ("diet_quality", "Good"),
            ("parental_education_level", "Master"),
            ("internet_quality", "Good"),
            ("extracurricular_participation", "Yes"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        fill_store(&mut store, &categories).expect("known fields");

        let violation = numeric_gate(&store).expect_err("numbers unset");
        assert_eq!(violation.key().as_str(), "age");
        assert_eq!(violation.to_string(), "Please fill in Age.");

        let numbers: Vec<(String, String)> = store
            .schema()
            .iter()
            .filter_map(|field| {
                let bounds = field.kind.bounds()?;
                Some((field.key.to_string(), bounds.min.to_string()))
            })
            .collect();
        fill_store(&mut store, &numbers).expect("known fields");
        assert!(numeric_gate(&store).is_ok());
    }

    #[test]
    fn fill_store_rejects_unknown_fields() {
        let mut store = FormStateStore::student_habits();
        let err = fill_store(&mut store, &[("shoe_size".to_string(), "42".to_string())])
            .expect_err("unknown");
        assert!(err.to_string().contains("unknown field 'shoe_size'"));
    }

    #[test]
    fn field_listing_covers_every_field() {
        let listing = describe_fields(FormSchema::student_habits());
        assert_eq!(listing.lines().count(), 14);
        assert!(listing.contains("one of: High School, Bachelor, Master, no_education"));
        assert!(listing.contains("number 0..=24 step 0.1"));
    }
}
