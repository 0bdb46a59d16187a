use anyhow::anyhow;
use domain::models::{RetrievalMatch, TEXT_FIELD};
use shared::types::Result;

/// Number of neighbours requested from the index when the caller does not say.
pub const DEFAULT_TOP_K: usize = 5;

const CONTEXT_SEPARATOR: &str = "\n\n";

/// Join the `text` metadata of each match, in the order the index returned them.
///
/// No matches yields an empty string; the caller still goes on to generation.
pub fn assemble_context(matches: &[RetrievalMatch]) -> Result<String> {
    let texts = matches
        .iter()
        .map(|hit| {
            hit.text().ok_or_else(|| {
                anyhow!(
                    "Retrieval match '{}' has no '{}' metadata field",
                    hit.id,
                    TEXT_FIELD
                )
            })
        })
        .collect::<Result<Vec<&str>>>()?;
    Ok(texts.join(CONTEXT_SEPARATOR))
}

/// Fill the fixed medical-assistant template with the retrieved context and the question.
pub fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "\nYou are a medical assistant. Use the following context to answer the user's question.\n\nContext:\n{}\n\nQuestion: {}\n\nAnswer:",
        context, query
    )
}
