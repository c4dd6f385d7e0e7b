//! Text rendering shared by the command handlers

use colored::Colorize;
use review_core::{Outcome, RunId};
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;

/// Print a draft with its attempt and length counters
pub fn draft_panel<W: Write>(
    out: &mut W,
    draft: &str,
    iteration_count: u32,
    max_iterations: u32,
    max_length: usize,
) -> io::Result<()> {
    let length = draft.chars().count();
    let counter = format!("{}/{} characters", length, max_length);
    let counter = if length > max_length {
        counter.yellow().to_string()
    } else {
        counter
    };

    writeln!(
        out,
        "Draft (attempt {} of {}, {}):",
        iteration_count, max_iterations, counter
    )?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", draft)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    if length > max_length {
        writeln!(
            out,
            "{}",
            format!(
                "⚠ {} characters over the limit; approving will not publish it",
                length - max_length
            )
            .yellow()
        )?;
    }
    Ok(())
}

/// Print what `respond` produced
pub fn outcome<W: Write>(
    out: &mut W,
    run_id: &RunId,
    outcome: &Outcome,
    max_iterations: u32,
    max_length: usize,
) -> io::Result<()> {
    match outcome {
        Outcome::AwaitingReview {
            draft,
            iteration_count,
        } => {
            writeln!(out, "{}", "Revised draft ready for review".cyan().bold())?;
            draft_panel(out, draft, *iteration_count, max_iterations, max_length)?;
            respond_hint(out, run_id)?;
        }
        Outcome::Published { post } => {
            writeln!(out, "{}", "✓ Published".green().bold())?;
            writeln!(out, "  ID:  {}", post.id)?;
            writeln!(out, "  URL: {}", post.url)?;
        }
        Outcome::ApprovedUnpublished { reason } => {
            writeln!(out, "{}", "✗ Approved but not published".red().bold())?;
            writeln!(out, "  Reason: {}", reason)?;
            writeln!(out, "  The approved draft is kept in run {}", run_id)?;
        }
        Outcome::RetryExhausted { iterations } => {
            writeln!(
                out,
                "{}",
                format!("Stopped after {} attempts without approval", iterations).yellow()
            )?;
        }
    }
    Ok(())
}

pub fn respond_hint<W: Write>(out: &mut W, run_id: &RunId) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Respond with: review respond {} [FEEDBACK]", run_id)
}
