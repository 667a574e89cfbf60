use serde::Deserialize;

/// How the tree reacts when its native and logical child lists disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyMode {
    /// Refuse the edit with [`crate::ViewError::Inconsistent`] before touching either side.
    #[default]
    Strict,
    /// Check native and logical bounds independently and keep going.
    Lenient,
}

impl ConsistencyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsistencyMode::Strict => "strict",
            ConsistencyMode::Lenient => "lenient",
        }
    }
}

/// Tree-wide settings. Deserializable so it can ride along with layout payloads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub consistency: ConsistencyMode,
    /// Check that children handed to `create_node` already mirror the native tree.
    pub verify_children_on_create: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            consistency: ConsistencyMode::Strict,
            verify_children_on_create: true,
        }
    }
}

impl TreeConfig {
    pub fn lenient() -> Self {
        Self {
            consistency: ConsistencyMode::Lenient,
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.consistency == ConsistencyMode::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let config = TreeConfig::default();
        assert!(config.is_strict());
        assert!(config.verify_children_on_create);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TreeConfig = serde_json::from_str(r#"{ "consistency": "lenient" }"#).unwrap();
        assert_eq!(config.consistency, ConsistencyMode::Lenient);
        assert!(config.verify_children_on_create);
        assert_eq!(config.consistency.as_str(), "lenient");
    }

    #[test]
    fn test_deserialize_empty() {
        let config: TreeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TreeConfig::default());
    }
}
