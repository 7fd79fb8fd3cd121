use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "The provider cannot create the bpkio API client as there is an unknown configuration \
         value for the bpkio API {label}. Either target apply the source of the value first, \
         set the value statically in the configuration, or use the {env} environment variable."
    )]
    UnknownValue {
        attribute: &'static str,
        label: &'static str,
        env: &'static str,
    },

    #[error(
        "The provider cannot create the bpkio API client as there is a missing or empty value \
         for the bpkio API key. Set the api_key value in the configuration or use the \
         BPKIO_API_KEY environment variable. If either is already set, ensure the value is not empty."
    )]
    MissingApiKey,

    #[error("The bpkio API endpoint {endpoint:?} is not a valid http(s) URL: {message}")]
    InvalidEndpoint { endpoint: String, message: String },
}

impl ConfigError {
    /// Diagnostic headline
    pub fn summary(&self) -> String {
        match self {
            ConfigError::UnknownValue { label, .. } => format!("Unknown bpkio API {label}"),
            ConfigError::MissingApiKey => "Missing bpkio API Key".to_string(),
            ConfigError::InvalidEndpoint { .. } => "Invalid bpkio API Endpoint".to_string(),
        }
    }

    /// Provider attribute the error points at
    pub fn attribute(&self) -> &'static str {
        match self {
            ConfigError::UnknownValue { attribute, .. } => attribute,
            ConfigError::MissingApiKey => "api_key",
            ConfigError::InvalidEndpoint { .. } => "endpoint",
        }
    }
}

pub type Result<T> = std::result::Result<T, Vec<ConfigError>>;
