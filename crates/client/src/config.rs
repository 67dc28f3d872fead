use crate::api::ClientError;

/// Where the testimonial service lives and which key to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://api.example.org`. No trailing slash.
    pub base_url: String,
    /// Public API key sent as the bearer token.
    pub anon_key: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Load configuration from the environment.
    ///
    /// | Env Var              | Default    |
    /// |----------------------|------------|
    /// | `INSTITUTE_API_URL`  | (required) |
    /// | `INSTITUTE_ANON_KEY` | (required) |
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ClientError::Config(name))
        };
        let base_url = required("INSTITUTE_API_URL")?;
        let anon_key = required("INSTITUTE_ANON_KEY")?;
        Ok(Self::new(base_url, anon_key))
    }
}
