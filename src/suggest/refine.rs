//! Operator-driven refinement of a heuristic suggestion.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{debug, instrument};

use super::heuristics::Suggestion;
use crate::mapping::{DEFAULT_JOIN_DELIMITER, FieldRule};

/// Errors from the interactive refinement session.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// Input ended before every tag was answered; nothing was produced.
    #[error("input closed while mapping tag '{tag}'; no mapping was saved")]
    InputClosed {
        /// Tag being asked about when input ended
        tag: String,
    },

    /// Reading the answer or writing the prompt failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Asks the operator about every suggested tag, one at a time in discovery order.
///
/// For each tag the operator may override the proposed target (empty input
/// accepts it) and declare the tag multi-valued, in which case a join
/// delimiter is read (empty input uses `", "`). The session blocks on every
/// prompt and has no timeout.
///
/// # Errors
///
/// Returns [`SuggestError::InputClosed`] if input ends early and
/// [`SuggestError::Io`] on console failure.
#[instrument(skip_all, fields(tags = suggestion.tags().len()))]
pub fn refine<R: BufRead, W: Write>(
    suggestion: &Suggestion,
    input: &mut R,
    output: &mut W,
) -> Result<Vec<FieldRule>, SuggestError> {
    writeln!(output, "\n--- Interactive Mapping ---")?;
    writeln!(
        output,
        "For each detected tag, enter the canonical field to map to (or press Enter to accept the suggestion)."
    )?;
    writeln!(
        output,
        "Canonical fields: title, authors, abstract, published_date, doi_url, link, or leave as-is."
    )?;

    let mut rules = Vec::with_capacity(suggestion.tags().len());
    for suggested in suggestion.tags() {
        let tag = suggested.tag.as_str();

        let answer = prompt(input, output, tag, &format!("Map \"{tag}\" [{}]: ", suggested.target))?;
        let target = match answer.trim() {
            "" => suggested.target.clone(),
            other => other.to_string(),
        };

        let multi = prompt(
            input,
            output,
            tag,
            &format!("Is \"{tag}\" multi-valued (appears multiple times per item)? [y/N]: "),
        )?;

        let rule = if matches!(multi.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            let delimiter = prompt(
                input,
                output,
                tag,
                "Delimiter to join values, spaces kept as typed (default: \", \"): ",
            )?;
            let delimiter = if delimiter.trim().is_empty() {
                DEFAULT_JOIN_DELIMITER.to_string()
            } else {
                delimiter
            };
            FieldRule::multi(tag, target, delimiter)
        } else {
            FieldRule::single(tag, target)
        };

        debug!(tag, target = %rule.target_field, multi = rule.is_multi_valued(), "Tag mapped");
        rules.push(rule);
    }

    Ok(rules)
}

/// Writes `question`, then reads one line with its line ending removed.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    tag: &str,
    question: &str,
) -> Result<String, SuggestError> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(SuggestError::InputClosed {
            tag: tag.to_string(),
        });
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::suggest::suggest_mapping;

    fn run(tags: &[&str], answers: &str) -> (Result<Vec<FieldRule>, SuggestError>, String) {
        let suggestion = suggest_mapping(tags);
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = refine(&suggestion, &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_refine_accepts_defaults() {
        let (result, transcript) = run(&["title", "creator"], "\n\n\n\n");
        assert_eq!(
            result.unwrap(),
            vec![
                FieldRule::single("title", "title"),
                FieldRule::single("creator", "authors"),
            ]
        );
        assert!(transcript.contains("Map \"creator\" [authors]: "));
    }

    #[test]
    fn test_refine_override_and_multi_with_custom_delimiter() {
        let (result, _) = run(&["creator", "link"], "\ny\n; \nlink\nn\n");
        assert_eq!(
            result.unwrap(),
            vec![
                FieldRule::multi("creator", "authors", "; "),
                FieldRule::single("link", "link"),
            ]
        );
    }

    #[test]
    fn test_refine_multi_with_default_delimiter() {
        let (result, transcript) = run(&["creator"], "\nYES\n\n");
        assert_eq!(
            result.unwrap(),
            vec![FieldRule::multi("creator", "authors", ", ")]
        );
        assert!(transcript.contains(
            "Delimiter to join values, spaces kept as typed (default: \", \"): "
        ));
    }

    #[test]
    fn test_refine_trims_override_input() {
        let (result, _) = run(&["guid"], "  doi_url  \n\n");
        assert_eq!(result.unwrap(), vec![FieldRule::single("guid", "doi_url")]);
    }

    #[test]
    fn test_refine_input_closed_is_error() {
        let (result, _) = run(&["title", "creator"], "\n\n");
        match result.unwrap_err() {
            SuggestError::InputClosed { tag } => assert_eq!(tag, "creator"),
            other => panic!("expected InputClosed, got {other:?}"),
        }
    }

    #[test]
    fn test_refine_handles_crlf_line_endings() {
        let (result, _) = run(&["creator"], "\r\ny\r\n | \r\n");
        assert_eq!(
            result.unwrap(),
            vec![FieldRule::multi("creator", "authors", " | ")]
        );
    }
}
