//! `review start`

use super::render;
use crate::context::AppContext;
use crate::error::CliError;
use anyhow::{Context, Result};
use colored::Colorize;
use review_core::RunId;
use std::io::Write;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::info;

/// Read the article from a file, or from stdin when no path is given
pub async fn read_article(path: Option<&Path>) -> Result<String> {
    let article = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read article from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read article from stdin")?;
            buffer
        }
    };

    if article.trim().is_empty() {
        return Err(CliError::EmptyArticle.into());
    }
    Ok(article)
}

/// Handle `review start`
pub async fn handle_start<W: Write>(
    context: &AppContext,
    article: &str,
    run_id: Option<&str>,
    out: &mut W,
) -> Result<()> {
    if article.trim().is_empty() {
        return Err(CliError::EmptyArticle.into());
    }

    let started = match run_id {
        Some(run_id) => {
            let run_id = RunId::parse(run_id).context("Invalid run id")?;
            context.coordinator.start_with_id(run_id, article).await?
        }
        None => context.coordinator.start(article).await?,
    };
    info!(run_id = %started.run_id, "Run started");

    writeln!(out, "{}", "✓ Run started".green().bold())?;
    writeln!(out, "  Run ID: {}", started.run_id)?;
    writeln!(out)?;
    render::draft_panel(
        out,
        &started.draft,
        started.iteration_count,
        context.config.workflow.max_iterations,
        context.config.publisher.max_length,
    )?;
    render::respond_hint(out, &started.run_id)?;
    Ok(())
}
