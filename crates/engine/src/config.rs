use std::num::NonZeroUsize;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
    /// Number of list elements completed between two checks of the cancellation signal.
    pub cancellation_check_interval: NonZeroUsize,
    /// Execution stops after this many stages, unlimited by default. Each root field of a
    /// mutation gets its own budget.
    pub max_stages: Option<NonZeroUsize>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        CompletionConfig {
            cancellation_check_interval: NonZeroUsize::new(1024).unwrap_or(NonZeroUsize::MIN),
            max_stages: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config: CompletionConfig = toml::from_str("").unwrap();
        assert_eq!(config, CompletionConfig::default());
        assert_eq!(config.cancellation_check_interval.get(), 1024);
        assert_eq!(config.max_stages, None);
    }

    #[test]
    fn full() {
        let config: CompletionConfig = toml::from_str(
            r#"
            cancellation_check_interval = 16
            max_stages = 32
            "#,
        )
        .unwrap();

        assert_eq!(config.cancellation_check_interval.get(), 16);
        assert_eq!(config.max_stages.map(NonZeroUsize::get), Some(32));
    }

    #[test]
    fn invalid() {
        assert!(toml::from_str::<CompletionConfig>("cancellation_check_interval = 0").is_err());

        let err = toml::from_str::<CompletionConfig>("mask_errors = false").unwrap_err();
        assert!(err.to_string().contains("unknown field `mask_errors`"), "{err}");
    }
}
