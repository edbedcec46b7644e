//! Context enrichment: append retrieved context to a prompt before search.

use crate::types::{ContextStatus, EnrichedPrompt};
use enrich_core::{AppError, AppResult};
use enrich_vector::{VectorIndex, VectorMatch};
use handlebars::Handlebars;
use std::collections::HashMap;
use std::sync::Arc;

/// Neighbors consulted for context snippets.
const ENRICH_SEARCH_LIMIT: usize = 3;

/// Snippets appended at most.
const MAX_SNIPPETS: usize = 2;

/// Combined snippet text is clipped to this many characters.
const MAX_CONTEXT_CHARS: usize = 200;

const APPLIED_TEMPLATE: &str = "{{prompt}} [Context: {{context}}...]";
const DEFAULT_TEMPLATE: &str = "{{prompt}} [Context: General search query]";

/// Appends a bracketed context clause to prompts.
///
/// Enrichment never fails: when the vector lookup or the template render
/// goes wrong, the original prompt passes through unchanged and the status
/// records why.
pub struct ContextEnricher {
    index: Arc<dyn VectorIndex>,
    registry: Handlebars<'static>,
}

impl ContextEnricher {
    pub fn new(index: Arc<dyn VectorIndex>) -> AppResult<Self> {
        let mut registry = Handlebars::new();

        // Disable HTML escaping for plain text
        registry.register_escape_fn(handlebars::no_escape);

        registry
            .register_template_string("applied", APPLIED_TEMPLATE)
            .map_err(|e| AppError::Config(format!("Failed to register context template: {}", e)))?;
        registry
            .register_template_string("default", DEFAULT_TEMPLATE)
            .map_err(|e| AppError::Config(format!("Failed to register context template: {}", e)))?;

        Ok(Self { index, registry })
    }

    /// Enrich a prompt with context from the vector index.
    pub async fn enrich(&self, prompt: &str) -> EnrichedPrompt {
        let hits = match self.index.search(prompt, ENRICH_SEARCH_LIMIT).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!("Context lookup failed, passing prompt through: {}", e);
                return pass_through(prompt, e.to_string());
            }
        };

        let snippets: Vec<String> = hits
            .iter()
            .filter_map(snippet_of)
            .take(MAX_SNIPPETS)
            .map(str::to_string)
            .collect();

        let (template, context) = if snippets.is_empty() {
            ("default", String::new())
        } else {
            ("applied", clip_chars(&snippets.join(" "), MAX_CONTEXT_CHARS))
        };

        let mut variables = HashMap::new();
        variables.insert("prompt".to_string(), prompt.to_string());
        variables.insert("context".to_string(), context);

        match self.registry.render(template, &variables) {
            Ok(text) => {
                let status = if snippets.is_empty() {
                    ContextStatus::DefaultClause
                } else {
                    tracing::debug!("Applied {} context snippets", snippets.len());
                    ContextStatus::Applied { snippets }
                };
                EnrichedPrompt { text, status }
            }
            Err(e) => {
                let reason = format!("Failed to render context template: {}", e);
                tracing::warn!("{}", reason);
                pass_through(prompt, reason)
            }
        }
    }
}

fn pass_through(prompt: &str, reason: String) -> EnrichedPrompt {
    EnrichedPrompt {
        text: prompt.to_string(),
        status: ContextStatus::Unavailable { reason },
    }
}

/// Snippet text of a hit: the payload body when it has one, otherwise the
/// description. Empty strings count as missing.
fn snippet_of(hit: &VectorMatch) -> Option<&str> {
    non_empty(hit.payload.text.as_deref()).or_else(|| non_empty(hit.payload.description.as_deref()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Clip to a character budget without splitting a code point.
fn clip_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
