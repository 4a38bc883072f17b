//! The `check` subcommand: full validation of a pattern.

use tracing::debug;

use slug_pattern::{parse, PatternElement};

use crate::error::{Result, SlugtError};

/// Arguments for the check subcommand.
#[derive(Debug)]
pub struct CheckArgs {
    /// The pattern to validate.
    pub pattern: String,
    /// Emit the parsed structure as JSON.
    pub json: bool,
}

/// Runs a full parse and reports the result.
///
/// On success prints a summary (or the JSON structure); on failure
/// prints the error with a caret marking the offending position and
/// exits unsuccessfully.
pub fn run_check(args: CheckArgs) -> Result<()> {
    debug!(pattern = %args.pattern, "checking pattern");

    match parse(&args.pattern) {
        Ok(parsed) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                println!("pattern is valid");
                for element in &parsed.elements {
                    let label = match element {
                        PatternElement::Selector(selector) => {
                            format!("selector {selector}")
                        }
                        PatternElement::Number(gen) => format!("generator {gen}"),
                        PatternElement::Special(gen) => format!("generator {gen}"),
                    };
                    println!("  {label}");
                }
                if let Some(settings) = &parsed.global_settings {
                    println!("  global settings [{settings}]");
                }
            }
            Ok(())
        }
        Err(error) => {
            eprintln!("{}", args.pattern);
            eprintln!("{}^", " ".repeat(error.position().min(args.pattern.len())));
            eprintln!("{error}");
            Err(SlugtError::Validation("pattern is invalid".to_string()))
        }
    }
}
