//! The `inspect` subcommand: partial-parse context of a pattern prefix.

use tracing::debug;

use slug_pattern::parse_partial;

use crate::error::Result;

/// Arguments for the inspect subcommand.
#[derive(Debug)]
pub struct InspectArgs {
    /// The pattern prefix to inspect.
    pub pattern: String,
    /// Emit the full context descriptor as JSON.
    pub json: bool,
}

/// Runs a partial parse and prints the resulting context descriptor.
///
/// Unlike `check` this never fails: an invalid prefix is itself a
/// reportable result.
pub fn run_inspect(args: InspectArgs) -> Result<()> {
    debug!(pattern = %args.pattern, "inspecting pattern prefix");

    let context = parse_partial(&args.pattern);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&context)?);
        return Ok(());
    }

    println!("state:     {:?}", context.state);
    println!("position:  {}", context.position);
    println!("valid:     {}", context.is_valid);
    if let Some(message) = &context.error_message {
        println!("error:     {message}");
    }
    if let Some(token) = &context.last_parsed_token {
        println!("last:      {token}");
    }
    let expected: Vec<String> = context
        .expected_next
        .iter()
        .map(|token| format!("{token:?}"))
        .collect();
    println!("expected:  {}", expected.join(", "));
    if let Some(partial) = &context.partial_element {
        println!("partial:   {partial:?}");
    }
    Ok(())
}
