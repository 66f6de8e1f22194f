use thiserror::Error;

/// Failure to produce a target from the catalog.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{generation} has no Pokémon to pick from")]
    EmptyRange { generation: String },

    #[error("{0}")]
    Other(String),
}

/// Errors that end the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("unknown generation {0}, expected 1 to 9")]
    UnknownGeneration(u8),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
