/// All errors that can occur while talking to the CodeTrack API.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response arrived (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server answered with a failure status and an explanatory `message`.
    #[error("{message}")]
    Server {
        url: String,
        status: reqwest::StatusCode,
        message: String,
    },

    /// Server returned a non-success HTTP status code without a usable message.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// A request payload could not be encoded.
    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// A required input was empty, caught before any request was sent.
    #[error("{field} is required")]
    MissingInput { field: &'static str },

    /// The current user's role does not allow this action.
    #[error("you need the {required} role to {action}")]
    Forbidden {
        required: crate::model::Role,
        action: &'static str,
    },

    /// The same mutation is already being submitted.
    #[error("{0} is already in progress")]
    MutationInFlight(String),

    /// Client configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The text shown to a user when this error surfaces.
    ///
    /// Server-provided messages are passed through verbatim; everything
    /// else falls back to the error's own description.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Server { status, .. } | Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Http { source, .. } | Error::ResponseBody { source, .. } => source.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
