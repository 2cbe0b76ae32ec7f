//! The sequential export run: list styles once, then resolve, transform,
//! and write each style to completion before the next.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::figma::{ApiError, FigmaClient};
use crate::theme::{StyleName, ThemeWriter, WriteError, WriteOutcome};
use crate::transform::transform;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to list styles: {0}")]
    ListStyles(ApiError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Counts of per-style outcomes for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Runs the whole pipeline. A listing failure is fatal; a single style
/// failing to resolve is logged and counted, and the run continues.
/// Filesystem errors abort the run.
pub async fn run(config: &Config) -> Result<RunSummary, ExportError> {
    let client = FigmaClient::new(&config.api_base, &config.file_key, &config.access_token);
    let writer = ThemeWriter::new(&config.output_dir);

    let styles = client.list_styles().await.map_err(ExportError::ListStyles)?;
    info!(count = styles.len(), "fetched style list");

    let mut summary = RunSummary::default();
    for style in &styles {
        let document = match client.get_style_document(&style.node_id).await {
            Ok(document) => document,
            Err(error) => {
                warn!(style = %style.name, %error, "failed to resolve style, skipping");
                summary.failed += 1;
                continue;
            }
        };

        let name = StyleName::parse(&style.name);
        let Some(token) = transform(style.kind, &name.category, &document) else {
            debug!(style = %style.name, "style produced no token, skipping");
            summary.skipped += 1;
            continue;
        };

        let (outcome, path) = writer.write_token(token.area, &name, token.value)?;
        match outcome {
            WriteOutcome::Created => {
                summary.created += 1;
                info!(style = %style.name, path = %path.display(), "created theme file");
            }
            WriteOutcome::Updated => {
                summary.updated += 1;
                info!(style = %style.name, path = %path.display(), "updated theme file");
            }
        }
    }
    Ok(summary)
}
