use anyhow::{anyhow, Context, Result};

/// Application configuration loaded from environment variables.
/// Every field has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Job description length cap applied before scoring.
    pub max_job_description_chars: usize,
    /// Per-section resume length cap applied before scoring.
    pub max_resume_section_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_job_description_chars: 15_000,
            max_resume_section_chars: 20_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_job_description_chars: parse_limit(
                "MAX_JOB_DESCRIPTION_CHARS",
                defaults.max_job_description_chars,
            )?,
            max_resume_section_chars: parse_limit(
                "MAX_RESUME_SECTION_CHARS",
                defaults.max_resume_section_chars,
            )?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Character limits must be positive; a zero limit would empty every input.
fn parse_limit(key: &str, default: usize) -> Result<usize> {
    let value = parse_env(key, default)?;
    if value == 0 {
        return Err(anyhow!("{key} must be greater than zero"))
            .context("Invalid input length limit");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_input_limits() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_job_description_chars, 15_000);
        assert_eq!(config.max_resume_section_chars, 20_000);
    }

    #[test]
    fn test_parse_env_falls_back_when_unset() {
        let value: usize = parse_env("ATS_API_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("ATS_API_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("ATS_API_TEST_BAD_PORT", 8080);
        std::env::remove_var("ATS_API_TEST_BAD_PORT");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("ATS_API_TEST_BAD_PORT"));
    }

    #[test]
    fn test_parse_limit_rejects_zero() {
        std::env::set_var("ATS_API_TEST_ZERO_LIMIT", "0");
        let result = parse_limit("ATS_API_TEST_ZERO_LIMIT", 15_000);
        std::env::remove_var("ATS_API_TEST_ZERO_LIMIT");
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("ATS_API_TEST_ZERO_LIMIT"));
    }

    #[test]
    fn test_parse_limit_accepts_positive_and_default() {
        std::env::set_var("ATS_API_TEST_POSITIVE_LIMIT", "500");
        let value = parse_limit("ATS_API_TEST_POSITIVE_LIMIT", 15_000).unwrap();
        std::env::remove_var("ATS_API_TEST_POSITIVE_LIMIT");
        assert_eq!(value, 500);
        assert_eq!(parse_limit("ATS_API_TEST_UNSET_LIMIT", 20_000).unwrap(), 20_000);
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("ATS_API_TEST_LIMIT", " 1200 ");
        let value: usize = parse_env("ATS_API_TEST_LIMIT", 10).unwrap();
        std::env::remove_var("ATS_API_TEST_LIMIT");
        assert_eq!(value, 1200);
    }
}
