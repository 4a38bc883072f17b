//! The `suggest` subcommand: completions for a pattern and cursor.

use std::path::PathBuf;

use tracing::debug;

use slug_suggest::suggest;

use crate::config::Config;
use crate::error::Result;
use crate::provider::{demo_provider, load_provider};

/// Arguments for the suggest subcommand.
#[derive(Debug)]
pub struct SuggestArgs {
    /// The pattern being edited.
    pub pattern: String,
    /// Cursor offset; defaults to the end of the pattern.
    pub cursor: Option<usize>,
    /// Dictionary metadata file; falls back to the configured file, then
    /// to the built-in demo set.
    pub dictionaries: Option<PathBuf>,
    /// Emit suggestions as JSON.
    pub json: bool,
}

/// Computes and prints completions for the pattern at the cursor.
pub fn run_suggest(args: SuggestArgs, config: &Config) -> Result<()> {
    let cursor = args.cursor.unwrap_or(args.pattern.len());
    debug!(pattern = %args.pattern, cursor, "computing suggestions");

    let path = args.dictionaries.or_else(|| config.dictionaries.clone());
    let provider = match path {
        Some(path) => load_provider(&path)?,
        None => demo_provider(),
    };

    let suggestions = suggest(&args.pattern, cursor, &provider)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    if suggestions.is_empty() {
        println!("no suggestions");
        return Ok(());
    }
    for suggestion in &suggestions {
        let range = format!(
            "{}..{}",
            suggestion.replace_range.start, suggestion.replace_range.end
        );
        match &suggestion.description {
            Some(description) => {
                println!(
                    "{:<12} {:<9} {:<7} {description}",
                    suggestion.text,
                    format!("{:?}", suggestion.kind).to_lowercase(),
                    range
                );
            }
            None => {
                println!(
                    "{:<12} {:<9} {range}",
                    suggestion.text,
                    format!("{:?}", suggestion.kind).to_lowercase()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_with_demo_set() {
        let args = SuggestArgs {
            pattern: "{a".to_string(),
            cursor: None,
            dictionaries: None,
            json: false,
        };
        assert!(run_suggest(args, &Config::default()).is_ok());
    }

    #[test]
    fn test_suggest_json_with_cursor() {
        let args = SuggestArgs {
            pattern: "{noun:+".to_string(),
            cursor: Some(7),
            dictionaries: None,
            json: true,
        };
        assert!(run_suggest(args, &Config::default()).is_ok());
    }

    #[test]
    fn test_suggest_missing_dictionary_file() {
        let args = SuggestArgs {
            pattern: "{a".to_string(),
            cursor: None,
            dictionaries: Some(PathBuf::from("/nonexistent/dict.json")),
            json: false,
        };
        assert!(run_suggest(args, &Config::default()).is_err());
    }
}
