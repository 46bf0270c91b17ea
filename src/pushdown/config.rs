//! Converter configuration.

/// What to do with a column whose constraint cannot be translated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UnsupportedPolicy {
    /// Fail the whole conversion.
    #[default]
    Reject,
    /// Drop the column's constraint. The resulting filter keeps more rows,
    /// never fewer.
    Skip,
}

/// Configuration for [`FilterConverter`](super::FilterConverter).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConverterConfig {
    /// Handling of unsupported types and unknown columns.
    pub unsupported: UnsupportedPolicy,
    /// Check every predicate leaf against the schema before returning.
    pub validate_indices: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            unsupported: UnsupportedPolicy::Reject,
            validate_indices: cfg!(debug_assertions),
        }
    }
}

impl ConverterConfig {
    /// Sets [`ConverterConfig::unsupported`].
    #[must_use]
    pub fn with_unsupported(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }

    /// Sets [`ConverterConfig::validate_indices`].
    #[must_use]
    pub fn with_index_validation(mut self, enabled: bool) -> Self {
        self.validate_indices = enabled;
        self
    }

    pub(crate) fn skips_unsupported(&self) -> bool {
        self.unsupported == UnsupportedPolicy::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rejects_unsupported() {
        let config = ConverterConfig::default();
        assert_eq!(config.unsupported, UnsupportedPolicy::Reject);
        assert!(!config.skips_unsupported());
        assert_eq!(config.validate_indices, cfg!(debug_assertions));
    }

    #[test]
    fn builders_override_fields() {
        let config = ConverterConfig::default()
            .with_unsupported(UnsupportedPolicy::Skip)
            .with_index_validation(false);
        assert!(config.skips_unsupported());
        assert!(!config.validate_indices);
    }
}
