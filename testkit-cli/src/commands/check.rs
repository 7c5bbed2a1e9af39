//! `testkit check` command - Validate the driver adapter test environment.

use miette::Diagnostic;
use serde_json::{Value, json};

use testkit_env::{Env, EnvError, RawEnv, keys};

use crate::cli::{CheckArgs, OutputFormat};
use crate::config::{describe_source, load_raw_env};
use crate::error::{CliError, CliResult};
use crate::output::{self, kv, success};

/// Run the check command
pub async fn run(args: CheckArgs) -> CliResult<()> {
    let raw = load_raw_env(&args.source).await?;
    let result = Env::from_raw(&raw);

    match args.format {
        OutputFormat::Text => report_text(&describe_source(&args.source), &raw, &result),
        OutputFormat::Json => report_json(&result),
    }

    match result {
        Ok(_) => Ok(()),
        Err(err) => Err(CliError::Validation(violation_summary(err.violations().len()))),
    }
}

fn report_text(source: &str, raw: &RawEnv, result: &Result<Env, EnvError>) {
    output::header("Check Environment");
    kv("Source", source);
    let ignored = ignored_keys(raw);
    if !ignored.is_empty() {
        kv("Ignored", &ignored.join(", "));
    }
    output::newline();

    match result {
        Ok(env) => {
            success("Environment is valid!");
            output::newline();
            output::section("Environment");
            print_env(env, raw.get(keys::EXTERNAL_TEST_EXECUTOR).is_none());
        }
        Err(err) => {
            output::error("Environment validation failed!");
            print_violations(err);
        }
    }
}

/// Keys present in the input that validation does not look at.
fn ignored_keys(raw: &RawEnv) -> Vec<&str> {
    raw.iter()
        .map(|(key, _)| key.as_str())
        .filter(|key| !keys::ALL.contains(key))
        .collect()
}

fn violation_summary(count: usize) -> String {
    if count == 1 {
        "Found 1 validation error".to_string()
    } else {
        format!("Found {} validation errors", count)
    }
}

fn print_env(env: &Env, executor_defaulted: bool) {
    kv("Driver adapter", env.driver_adapter().as_str());
    if let Some(config) = env.adapter_config() {
        kv("Proxy URL", config.proxy_url());
    }

    let executor = if executor_defaulted {
        format!("{} (default)", env.executor())
    } else {
        env.executor().to_string()
    };
    kv("Executor", &executor);
    if let Some(url) = env.mobile_emulator_url() {
        kv("Emulator URL", url);
    }

    kv("Connector", env.connector().as_str());
}

/// List every violation with its help text on stderr.
pub fn print_violations(err: &EnvError) {
    for violation in err.violations() {
        output::error_item(&violation.to_string());
        if let Some(help) = violation.help() {
            output::error_hint(&help.to_string());
        }
    }
}

fn report_json(result: &Result<Env, EnvError>) {
    let report = match result {
        Ok(env) => json!({
            "valid": true,
            "env": env,
        }),
        Err(err) => {
            let errors: Vec<Value> = err.violations().iter().map(violation_json).collect();
            json!({
                "valid": false,
                "errors": errors,
            })
        }
    };
    println!("{:#}", report);
}

fn violation_json(violation: &EnvError) -> Value {
    json!({
        "key": violation.key(),
        "code": violation.code().map(|code| code.to_string()),
        "message": violation.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_summary_pluralization() {
        assert_eq!(violation_summary(1), "Found 1 validation error");
        assert_eq!(violation_summary(3), "Found 3 validation errors");
    }

    #[test]
    fn test_ignored_keys() {
        let raw = RawEnv::new()
            .set("DRIVER_ADAPTER", "pg")
            .set("CONNECTOR", "postgres")
            .set("DATABASE_URL", json!("postgres://localhost"));

        assert_eq!(ignored_keys(&raw), vec!["DATABASE_URL"]);
    }

    #[test]
    fn test_no_ignored_keys() {
        let raw = RawEnv::new().set("DRIVER_ADAPTER", "pg");
        assert!(ignored_keys(&raw).is_empty());
    }
}
