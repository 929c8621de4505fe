use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub quiz: QuizSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Absent or empty key leaves quiz generation disabled.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    /// No timeout unless set.
    pub timeout_secs: Option<u64>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct QuizSettings {
    /// Reject model output that does not match the quiz schema.
    pub validate_output: bool,
}

impl QuizConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the service settings from an arbitrary key lookup.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(Secret::new);

        Ok(QuizConfig {
            common,
            gemini: GeminiSettings {
                api_key,
                model: get_or(&lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                api_base: get_or(&lookup, "GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                timeout_secs: parse_optional(&lookup, "GEMINI_TIMEOUT_SECS")?,
                temperature: parse_optional(&lookup, "GEMINI_TEMPERATURE")?,
            },
            quiz: QuizSettings {
                validate_output: parse_optional(&lookup, "QUIZ_VALIDATE_OUTPUT")?
                    .unwrap_or(false),
            },
        })
    }
}

fn get_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_optional<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        Some(raw) => raw.trim().parse().map(Some).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<QuizConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        QuizConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();

        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.gemini.api_base, DEFAULT_GEMINI_API_BASE);
        assert_eq!(config.gemini.timeout_secs, None);
        assert_eq!(config.gemini.temperature, None);
        assert!(!config.quiz.validate_output);
        assert_eq!(config.common.port, 5001);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = load(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn reads_all_settings() {
        let config = load(&[
            ("GEMINI_API_KEY", "secret-key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_API_BASE", "http://127.0.0.1:9999/v1beta"),
            ("GEMINI_TIMEOUT_SECS", "30"),
            ("GEMINI_TEMPERATURE", "0.4"),
            ("QUIZ_VALIDATE_OUTPUT", "true"),
        ])
        .unwrap();

        assert_eq!(
            config.gemini.api_key.as_ref().unwrap().expose_secret(),
            "secret-key"
        );
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.api_base, "http://127.0.0.1:9999/v1beta");
        assert_eq!(config.gemini.timeout_secs, Some(30));
        assert_eq!(config.gemini.temperature, Some(0.4));
        assert!(config.quiz.validate_output);
    }

    #[test]
    fn malformed_numbers_are_config_errors() {
        let err = load(&[("GEMINI_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GEMINI_TIMEOUT_SECS"));
    }

    #[test]
    fn malformed_boolean_is_config_error() {
        let err = load(&[("QUIZ_VALIDATE_OUTPUT", "yes")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("QUIZ_VALIDATE_OUTPUT"));
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let config = load(&[("GEMINI_API_KEY", "secret-key")]).unwrap();
        assert!(!format!("{:?}", config).contains("secret-key"));
    }
}
