//! Layered configuration loading
//!
//! A configuration is read from the environment first; whatever the
//! environment leaves unset is taken from `Default`, and the result is
//! validated once at the end.

use crate::Result;

/// A configuration that can be layered from the environment and defaults.
pub trait ConfigBuilder: Default + Clone {
    /// Reject inconsistent values. Accepts everything unless overridden.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Read `{prefix}{FIELD}` variables; a missing variable leaves its
    /// field unset.
    fn from_env(prefix: &str) -> Result<Self>;

    /// Fill the fields still unset in `self` from `other`.
    fn merge(&mut self, other: Self) -> &mut Self;

    /// Environment values layered over defaults, validated.
    fn from_env_with_defaults(prefix: &str) -> Result<Self> {
        let mut config = Self::from_env(prefix)?;
        config.merge(Self::default());
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrPropsError;

    #[derive(Debug, Clone, PartialEq)]
    struct TestConfig {
        value: Option<i32>,
        label: Option<String>,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                value: Some(1),
                label: Some("default".to_string()),
            }
        }
    }

    impl ConfigBuilder for TestConfig {
        fn validate(&self) -> Result<()> {
            if let Some(v) = self.value {
                if v < 0 {
                    return Err(ErrPropsError::Config("value must be non-negative".into()));
                }
            }
            Ok(())
        }

        fn from_env(_prefix: &str) -> Result<Self> {
            Ok(Self {
                value: Some(42),
                label: None,
            })
        }

        fn merge(&mut self, other: Self) -> &mut Self {
            if self.value.is_none() {
                self.value = other.value;
            }
            if self.label.is_none() {
                self.label = other.label;
            }
            self
        }
    }

    #[test]
    fn test_validate_failure() {
        let config = TestConfig {
            value: Some(-5),
            label: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_with_defaults() {
        let config = TestConfig::from_env_with_defaults("TEST_").unwrap();
        // Environment wins, defaults fill the gaps.
        assert_eq!(config.value, Some(42));
        assert_eq!(config.label.as_deref(), Some("default"));
    }
}
