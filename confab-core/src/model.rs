//! Selectable model catalog entries.

use serde::{Deserialize, Serialize};

/// One model as advertised by the models endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Identifier sent back with chat requests.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
}

impl ModelInfo {
    /// Fallback catalog used when the models endpoint is unreachable.
    ///
    /// Mirrors the single default the original front-end falls back to.
    #[must_use]
    pub fn default_catalog() -> Vec<Self> {
        vec![Self {
            id: "gpt-4o".to_string(),
            name: "GPT-4o".to_string(),
            description: String::new(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_from_backend_json() {
        let json = r#"{"id": "gpt-4o-mini", "name": "GPT-4o Mini", "description": "smaller"}"#;
        let model: ModelInfo = serde_json::from_str(json).unwrap();
        assert_eq!(model.id, "gpt-4o-mini");
    }

    #[test]
    fn test_default_catalog_nonempty() {
        let catalog = ModelInfo::default_catalog();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id, "gpt-4o");
    }
}
