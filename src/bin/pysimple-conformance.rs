//! Purpose: Execute conformance manifests against the pysimple method table.
//! Exports: None (binary entry point).
//! Role: Reference runner shared by every host binding's test suite.
//! Invariants: Manifests are JSON-only; steps execute in order; fail-fast on errors.
//! Invariants: Float results compare in single precision; "inf", "-inf" and "nan" spell non-finite values.

use clap::Parser;
use pysimple::api::{Error, ErrorKind, ModuleDef, module};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pysimple-conformance",
    version,
    about = "Run a pysimple conformance manifest",
    long_about = None
)]
struct Cli {
    #[arg(help = "Path to a conformance manifest (JSON)")]
    manifest: PathBuf,
}

#[derive(Deserialize)]
struct Manifest {
    conformance_version: u64,
    steps: Vec<Value>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let content = fs::read_to_string(&cli.manifest)
        .map_err(|err| format!("failed to read manifest: {err}"))?;
    let manifest: Manifest = serde_json::from_str(&content)
        .map_err(|err| format!("failed to parse manifest json: {err}"))?;
    if manifest.conformance_version != 0 {
        return Err(format!(
            "unsupported conformance_version: {}",
            manifest.conformance_version
        ));
    }

    let module = module();
    for (index, step) in manifest.steps.iter().enumerate() {
        let step_id = step.get("id").and_then(Value::as_str).map(str::to_string);
        let op = step
            .get("op")
            .and_then(Value::as_str)
            .ok_or_else(|| step_err(index, &step_id, "missing op"))?;
        tracing::debug!(index, op, "step");
        match op {
            "call" => run_call(module, step, index, &step_id)?,
            "module_info" => run_module_info(module, step, index, &step_id)?,
            _ => return Err(step_err(index, &step_id, &format!("unknown op: {op}"))),
        }
    }

    tracing::info!(
        manifest = %cli.manifest.display(),
        steps = manifest.steps.len(),
        "conformance passed"
    );
    Ok(())
}

fn run_call(
    module: &ModuleDef,
    step: &Value,
    index: usize,
    step_id: &Option<String>,
) -> Result<(), String> {
    let method = step
        .get("method")
        .and_then(Value::as_str)
        .ok_or_else(|| step_err(index, step_id, "missing method"))?;
    let args = step
        .get("args")
        .and_then(Value::as_array)
        .ok_or_else(|| step_err(index, step_id, "args must be an array"))?;

    let result = module.call(method, args);
    match &result {
        Ok(value) => {
            if let Some(expected) = step.get("expect").and_then(|expect| expect.get("value")) {
                expect_float(expected, *value, index, step_id)?;
            }
            validate_expect_error(step.get("expect"), &Ok(()), index, step_id)
        }
        Err(err) => validate_expect_error(step.get("expect"), &Err(err), index, step_id),
    }
}

fn run_module_info(
    module: &ModuleDef,
    step: &Value,
    index: usize,
    step_id: &Option<String>,
) -> Result<(), String> {
    let Some(expect) = step.get("expect") else {
        return Ok(());
    };
    if let Some(name) = expect.get("name").and_then(Value::as_str) {
        if name != module.name {
            return Err(step_err(
                index,
                step_id,
                &format!("expected module name {name}, got {}", module.name),
            ));
        }
    }
    if let Some(methods) = expect.get("methods").and_then(Value::as_array) {
        let expected = methods
            .iter()
            .map(|item| item.as_str())
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| step_err(index, step_id, "expect.methods must be string array"))?;
        let actual = module.method_names().collect::<Vec<_>>();
        if expected != actual {
            return Err(step_err(
                index,
                step_id,
                &format!("expected methods {expected:?}, got {actual:?}"),
            ));
        }
    }
    Ok(())
}

fn expect_float(
    expected: &Value,
    actual: f64,
    index: usize,
    step_id: &Option<String>,
) -> Result<(), String> {
    let expected = parse_expected_float(expected)
        .ok_or_else(|| step_err(index, step_id, "expect.value must be a number or inf/-inf/nan"))?;
    let (want, got) = (expected as f32, actual as f32);
    let matches = if want.is_nan() { got.is_nan() } else { want == got };
    if !matches {
        return Err(step_err(
            index,
            step_id,
            &format!("expected value {want}, got {got}"),
        ));
    }
    Ok(())
}

fn parse_expected_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => match text.as_str() {
            "inf" => Some(f64::INFINITY),
            "-inf" => Some(f64::NEG_INFINITY),
            "nan" => Some(f64::NAN),
            _ => None,
        },
        _ => None,
    }
}

fn validate_expect_error(
    expect: Option<&Value>,
    result: &Result<(), &Error>,
    index: usize,
    step_id: &Option<String>,
) -> Result<(), String> {
    let Some(expect_error) = expect.and_then(|expect| expect.get("error")) else {
        return match result {
            Ok(_) => Ok(()),
            Err(err) => Err(step_err(
                index,
                step_id,
                &format!("unexpected error: {err}"),
            )),
        };
    };

    let err = result
        .as_ref()
        .err()
        .ok_or_else(|| step_err(index, step_id, "expected error but call succeeded"))?;

    let kind = expect_error
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| step_err(index, step_id, "expect.error.kind is required"))?;
    if kind != error_kind_label(err.kind()) {
        return Err(step_err(
            index,
            step_id,
            &format!(
                "expected error kind {kind}, got {}",
                error_kind_label(err.kind())
            ),
        ));
    }

    if let Some(substr) = expect_error.get("message_contains").and_then(Value::as_str) {
        let message = err.message().unwrap_or("");
        if !message.contains(substr) {
            return Err(step_err(
                index,
                step_id,
                &format!("expected message to contain '{substr}', got '{message}'"),
            ));
        }
    }

    if let Some(has_index) = expect_error.get("has_index").and_then(Value::as_bool) {
        if has_index != err.index().is_some() {
            return Err(step_err(index, step_id, "argument index presence mismatch"));
        }
    }

    Ok(())
}

fn error_kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Internal => "Internal",
        ErrorKind::InvalidArgument => "InvalidArgument",
        ErrorKind::NotFound => "NotFound",
    }
}

fn step_err(index: usize, step_id: &Option<String>, message: &str) -> String {
    let mut out = format!("step {index}");
    if let Some(id) = step_id {
        out.push_str(&format!(" ({id})"));
    }
    out.push_str(": ");
    out.push_str(message);
    out
}
