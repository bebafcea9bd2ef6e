use thiserror::Error;

/// External text generator. Its output is narrative only and is never parsed back into
/// numbers.
pub trait NarrativeGenerator: Send + Sync {
    fn explain(&self, context: &str) -> Result<String, NarrativeError>;
}

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative generator unavailable: {0}")]
    Unavailable(String),
    #[error("narrative generator rejected the request: {0}")]
    Rejected(String),
}

/// Offline generator used when no language model is configured.
#[derive(Debug, Default, Clone)]
pub struct TemplateNarrator;

impl NarrativeGenerator for TemplateNarrator {
    fn explain(&self, context: &str) -> Result<String, NarrativeError> {
        if context.trim().is_empty() {
            return Err(NarrativeError::Rejected("empty context".to_string()));
        }

        let mut lines = vec![
            "DEMO explanation (template, no language model attached).".to_string(),
        ];
        let highlights = context
            .lines()
            .filter(|line| line.starts_with("Measures:") || line.contains("Overall:"))
            .map(|line| line.trim_start_matches("- ").to_string());
        lines.extend(highlights);
        lines.push(
            "Numbers come from the transparent scenario model; this text only restates them."
                .to_string(),
        );

        Ok(lines.join("\n"))
    }
}
