//! `testkit export` command - Print the validated environment.

use testkit_env::Env;

use crate::cli::ExportArgs;
use crate::config::load_raw_env;
use crate::error::CliResult;

/// Run the export command
pub async fn run(args: ExportArgs) -> CliResult<()> {
    let raw = load_raw_env(&args.source).await?;
    let env = Env::from_raw(&raw)?;

    let prefix = if args.shell { "export " } else { "" };
    for (key, value) in env.to_vars() {
        println!("{}{}={}", prefix, key, quote(&value));
    }

    Ok(())
}

/// Single-quote values that a shell or dotenv parser would not take verbatim.
fn quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':'));

    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain_values() {
        assert_eq!(quote("neon:ws"), "neon:ws");
        assert_eq!(quote("better-sqlite3"), "better-sqlite3");
        assert_eq!(quote("http://10.0.2.2:3000"), "http://10.0.2.2:3000");
    }

    #[test]
    fn test_quote_json() {
        assert_eq!(
            quote(r#"{"proxy_url":"http://x"}"#),
            r#"'{"proxy_url":"http://x"}'"#
        );
    }

    #[test]
    fn test_quote_single_quote() {
        assert_eq!(quote("it's"), r"'it'\''s'");
    }
}
