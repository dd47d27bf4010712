//! Feature naming convention.

/// Default prefix for positional feature names.
pub const DEFAULT_FEATURE_PREFIX: &str = "feature_";

/// Fixed, positional feature schema: `{prefix}0 … {prefix}{count-1}`.
///
/// Position `i` in the schema is row `i` of the weight matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    prefix: String,
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(count: usize, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let names = (0..count).map(|i| format!("{prefix}{i}")).collect();
        Self { prefix, names }
    }

    /// Schema using the default `feature_` prefix.
    pub fn with_count(count: usize) -> Self {
        Self::new(count, DEFAULT_FEATURE_PREFIX)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Feature names in weight-row order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
