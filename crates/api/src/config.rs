use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://atheno.onrender.com";
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported url scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),

    #[error("identity api key is empty")]
    EmptyApiKey,
}

fn normalize_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if the url does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base(base_url)?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute url for an api path such as `/quizzes/3`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Identity provider endpoints plus the project's public api key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    api_key: String,
    identity_url: String,
    token_url: String,
}

impl FirebaseConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyApiKey` for a blank key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self {
            api_key: api_key.trim().to_string(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        })
    }

    /// Point the client at other hosts, e.g. the local auth emulator.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either url is invalid.
    pub fn with_endpoints(mut self, identity_url: &str, token_url: &str) -> Result<Self, ConfigError> {
        self.identity_url = normalize_base(identity_url)?;
        self.token_url = normalize_base(token_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn account_url(&self, method: &str) -> String {
        format!("{}/accounts:{method}?key={}", self.identity_url, self.api_key)
    }

    #[must_use]
    pub fn refresh_url(&self) -> String {
        format!("{}?key={}", self.token_url, self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig::new("https://atheno-1.onrender.com/").unwrap();
        assert_eq!(config.base_url(), "https://atheno-1.onrender.com");
        assert_eq!(
            config.endpoint("/quizzes/4/submit"),
            "https://atheno-1.onrender.com/quizzes/4/submit"
        );
        assert_eq!(config.endpoint("essays/"), "https://atheno-1.onrender.com/essays/");
    }

    #[test]
    fn rejects_non_http_schemes_and_garbage() {
        assert!(matches!(
            ApiConfig::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn firebase_urls_carry_the_key() {
        let config = FirebaseConfig::new(" abc ").unwrap();
        assert_eq!(
            config.account_url("signInWithPassword"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key=abc"
        );
        assert_eq!(
            config.refresh_url(),
            "https://securetoken.googleapis.com/v1/token?key=abc"
        );
        assert!(matches!(FirebaseConfig::new("  "), Err(ConfigError::EmptyApiKey)));
    }
}
