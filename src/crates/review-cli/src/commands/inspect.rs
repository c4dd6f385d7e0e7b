//! `review status` and `review list`

use super::render;
use crate::context::AppContext;
use anyhow::{Context, Result};
use colored::Colorize;
use review_core::{CheckpointSummary, Outcome, RunId, Stage};
use std::io::Write;

/// Handle `review status`
pub async fn handle_status<W: Write>(
    context: &AppContext,
    run_id: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let run_id = RunId::parse(run_id).context("Invalid run id")?;
    let checkpoint = context.coordinator.status(&run_id).await?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&checkpoint)?)?;
        return Ok(());
    }

    let state = &checkpoint.state;
    writeln!(out, "Run:        {}", checkpoint.run_id)?;
    writeln!(out, "Stage:      {}", checkpoint.stage.label())?;
    writeln!(out, "Attempts:   {}", state.iteration_count)?;
    writeln!(out, "Approved:   {}", yes_no(state.is_approved))?;
    writeln!(out, "Published:  {}", yes_no(state.is_published))?;
    writeln!(out, "Created:    {}", checkpoint.created_at.to_rfc3339())?;
    writeln!(out, "Updated:    {}", checkpoint.updated_at.to_rfc3339())?;
    if !state.human_feedback.is_empty() {
        writeln!(out, "Feedback:   {}", state.human_feedback)?;
    }
    writeln!(out)?;

    match &checkpoint.stage {
        Stage::AwaitingReview => {
            render::draft_panel(
                out,
                &state.generated_post,
                state.iteration_count,
                context.config.workflow.max_iterations,
                context.config.publisher.max_length,
            )?;
            render::respond_hint(out, &checkpoint.run_id)?;
        }
        Stage::Completed { .. } => {
            if !state.generated_post.is_empty() {
                writeln!(out, "Last draft:")?;
                writeln!(out, "{}", state.generated_post)?;
                writeln!(out)?;
            }
            render::outcome(
                out,
                &checkpoint.run_id,
                &Outcome::from_checkpoint(&checkpoint),
                context.config.workflow.max_iterations,
                context.config.publisher.max_length,
            )?;
        }
    }
    Ok(())
}

/// Handle `review list`
pub async fn handle_list<W: Write>(
    context: &AppContext,
    limit: Option<usize>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let runs = context.coordinator.list(limit).await?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&runs)?)?;
        return Ok(());
    }

    if runs.is_empty() {
        writeln!(out, "{}", "No runs found".yellow())?;
        return Ok(());
    }

    write_table(out, &runs)?;
    Ok(())
}

fn write_table<W: Write>(out: &mut W, runs: &[CheckpointSummary]) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<36} {:<22} {:<9} {}",
        "RUN ID", "STAGE", "ATTEMPTS", "UPDATED"
    )?;
    writeln!(out, "{}", "-".repeat(92))?;
    for run in runs {
        writeln!(
            out,
            "{:<36} {:<22} {:<9} {}",
            run.run_id.as_str(),
            run.stage,
            run.iteration_count,
            run.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_core::{Checkpoint, RunState};

    #[test]
    fn test_table_lists_every_run() {
        let mut state = RunState::new("article");
        state.generated_post = "draft".to_string();
        state.iteration_count = 2;
        let first = Checkpoint::new(RunId::parse("run-a").unwrap(), state.clone(), Stage::AwaitingReview);
        let second = Checkpoint::new(RunId::parse("run-b").unwrap(), state, Stage::AwaitingReview);

        let mut buffer = Vec::new();
        write_table(&mut buffer, &[first.summary(), second.summary()]).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("RUN ID"));
        assert!(text.contains("run-a"));
        assert!(text.contains("run-b"));
        assert_eq!(text.lines().count(), 4);
    }
}
