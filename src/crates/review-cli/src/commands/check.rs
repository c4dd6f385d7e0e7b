//! `review check`: connectivity of the model server and the publisher

use crate::context::{AppContext, PublisherTarget};
use anyhow::{bail, Result};
use colored::Colorize;
use std::io::Write;
use tracing::warn;

/// Handle `review check`; fails when either side is unusable
pub async fn handle_check<W: Write>(context: &AppContext, out: &mut W) -> Result<()> {
    let mut healthy = true;

    let llm = &context.config.llm;
    writeln!(out, "Model server ({}):", llm.base_url)?;
    if context.producer.check_health().await? {
        writeln!(out, "  {}", "✓ reachable".green())?;
        match context.producer.fetch_models().await {
            Ok(models) => {
                let pulled = models
                    .iter()
                    .any(|model| model.name == llm.model || model.name.starts_with(&format!("{}:", llm.model)));
                for model in &models {
                    writeln!(out, "    - {}", model.name)?;
                }
                if pulled {
                    writeln!(out, "  {}", format!("✓ model {} is available", llm.model).green())?;
                } else {
                    healthy = false;
                    writeln!(
                        out,
                        "  {}",
                        format!("✗ model {} is not pulled; run `ollama pull {}`", llm.model, llm.model).red()
                    )?;
                }
            }
            Err(e) => {
                healthy = false;
                warn!(error = %e, "Listing models failed");
                writeln!(out, "  {}", format!("✗ could not list models: {}", e).red())?;
            }
        }
    } else {
        healthy = false;
        writeln!(out, "  {}", "✗ not reachable; start it with `ollama serve`".red())?;
    }

    writeln!(out)?;
    writeln!(out, "Publisher ({}):", context.publisher.label())?;
    match &context.publisher {
        PublisherTarget::X(publisher) => match publisher.verify_credentials().await {
            Ok(handle) => writeln!(out, "  {}", format!("✓ authenticated as @{}", handle).green())?,
            Err(e) => {
                healthy = false;
                writeln!(out, "  {}", format!("✗ {}", e).red())?;
            }
        },
        PublisherTarget::DryRun(_) => {
            writeln!(out, "  ✓ dry run; approved posts are recorded locally")?;
        }
    }

    if !healthy {
        bail!("One or more checks failed");
    }
    Ok(())
}
