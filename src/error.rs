//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A query parameter that the endpoint requires was not in the request.
    ///
    /// Holds the name of the missing parameter.
    #[error("missing required query parameter \"{0}\"")]
    MissingParameter(&'static str),

    /// The month query parameter was not a month number between 1 and 12, or
    /// the "00" all-months selector.
    #[error("\"{0}\" is not a valid month, expected a number from 1 to 12 or \"00\"")]
    InvalidMonth(String),

    /// The query string could not be decoded, e.g. a parameter was given
    /// more than once.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// The upstream data source could not be reached, returned an error
    /// status, or returned a body that is not a JSON array.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not fetch transactions from the upstream data source: {0}")]
    UpstreamFetch(String),

    /// A record in the upstream snapshot did not have the shape of a
    /// transaction.
    ///
    /// The whole snapshot is rejected when a single record is malformed.
    #[error("upstream record #{index} is not a valid transaction: {reason}")]
    InvalidRecord {
        /// The position of the record in the upstream array.
        index: usize,
        /// Why the record was rejected.
        reason: String,
    },

    /// An unexpected failure while deriving a view, e.g. a worker task panicked.
    #[error("an unexpected error occurred: {0}")]
    Internal(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingParameter(_) | Error::InvalidMonth(_) | Error::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::UpstreamFetch(_) | Error::InvalidRecord { .. } | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message that is safe to show to the client.
    fn client_message(&self) -> String {
        match self {
            Error::MissingParameter("month") => "Month is required".to_owned(),
            Error::MissingParameter(name) => format!("The query parameter \"{name}\" is required"),
            Error::InvalidMonth(_) | Error::InvalidQuery(_) => self.to_string(),
            Error::UpstreamFetch(_) | Error::InvalidRecord { .. } => {
                "Failed to fetch data from the upstream data source".to_owned()
            }
            Error::Internal(_) => "Internal Server Error".to_owned(),
            Error::NotFound => "Not found".to_owned(),
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            // Details of server side errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = ErrorBody {
            error: self.client_message(),
        };

        (status_code, Json(body)).into_response()
    }
}
