use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata key holding the chunk text stored alongside each vector.
pub const TEXT_FIELD: &str = "text";

/// One item returned by the vector index, in the index's own ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMatch {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl RetrievalMatch {
    pub fn with_text(id: impl Into<String>, score: f32, text: impl Into<String>) -> Self {
        let mut metadata = Map::new();
        metadata.insert(TEXT_FIELD.to_string(), Value::String(text.into()));
        Self {
            id: id.into(),
            score,
            metadata,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.metadata.get(TEXT_FIELD).and_then(Value::as_str)
    }
}

/// A question together with the answer produced for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub query: String,
    pub answer: String,
}
