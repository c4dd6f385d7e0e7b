//! `review respond`
//!
//! With feedback on the command line the decision is submitted directly.
//! Without it, the current draft is shown and the reviewer is prompted; a
//! quit token (or end of input) leaves the run suspended and untouched.

use super::render;
use crate::context::AppContext;
use anyhow::{Context, Result};
use review_core::{is_quit, Outcome, ReviewError, RunId, Stage};
use std::io::{self, BufRead, Write};
use tracing::info;

const PROMPT: &str = "Feedback (\"approve\" to publish, \"quit\" to leave for later): ";

/// Read one non-empty decision; `None` means the reviewer quit
pub fn prompt_feedback<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<String>> {
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        let feedback = line.trim();
        if feedback.is_empty() {
            writeln!(out, "Feedback cannot be empty.")?;
            continue;
        }
        if is_quit(feedback) {
            return Ok(None);
        }
        return Ok(Some(feedback.to_string()));
    }
}

/// Handle `review respond`
pub async fn handle_respond<R: BufRead, W: Write>(
    context: &AppContext,
    run_id: &str,
    feedback: Option<String>,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let run_id = RunId::parse(run_id).context("Invalid run id")?;
    let max_iterations = context.config.workflow.max_iterations;
    let max_length = context.config.publisher.max_length;

    let feedback = match feedback {
        Some(feedback) if is_quit(&feedback) => None,
        Some(feedback) => Some(feedback),
        None => {
            let checkpoint = context.coordinator.status(&run_id).await?;
            if let Stage::Completed { outcome } = &checkpoint.stage {
                return Err(ReviewError::RunCompleted {
                    run_id,
                    outcome: outcome.label().to_string(),
                }
                .into());
            }

            render::draft_panel(
                out,
                &checkpoint.state.generated_post,
                checkpoint.state.iteration_count,
                max_iterations,
                max_length,
            )?;
            prompt_feedback(input, out)?
        }
    };

    let Some(feedback) = feedback else {
        info!(run_id = %run_id, "Reviewer quit");
        writeln!(out, "Run {} left awaiting review.", run_id)?;
        return Ok(());
    };

    let outcome: Outcome = context.coordinator.respond(&run_id, &feedback).await?;
    info!(run_id = %run_id, outcome = outcome.label(), "Decision applied");

    render::outcome(out, &run_id, &outcome, max_iterations, max_length)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(script: &str) -> (Option<String>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let feedback = prompt_feedback(&mut input, &mut out).unwrap();
        (feedback, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_prompt_returns_trimmed_feedback() {
        let (feedback, _) = prompt("  make it punchier \n");
        assert_eq!(feedback.as_deref(), Some("make it punchier"));
    }

    #[test]
    fn test_prompt_reasks_on_blank_lines() {
        let (feedback, output) = prompt("\n   \napprove\n");
        assert_eq!(feedback.as_deref(), Some("approve"));
        assert_eq!(output.matches("Feedback cannot be empty.").count(), 2);
    }

    #[test]
    fn test_prompt_quit_tokens() {
        for token in ["quit", "EXIT", " q "] {
            let (feedback, _) = prompt(&format!("{}\n", token));
            assert_eq!(feedback, None, "token {:?}", token);
        }
    }

    #[test]
    fn test_prompt_end_of_input_quits() {
        let (feedback, _) = prompt("");
        assert_eq!(feedback, None);
    }
}
