use serde::{Deserialize, Serialize};

#[cfg(feature = "rpc-server")]
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::error::{ErrorKind, FioError};

pub const INVALID_INPUT_MESSAGE: &str =
    "An invalid request was sent in, please check the nested errors for details.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorField {
    pub name: String,
    pub value: String,
    pub error: String,
}

/// Error envelope returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type", default)]
    pub error_type: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ErrorField>,
}

impl ErrorResponse {
    /// Message of the underlying error: the first field error for
    /// validation failures, the envelope message otherwise
    pub fn error_message(&self) -> &str {
        self.fields
            .first()
            .map(|field| field.error.as_str())
            .unwrap_or(&self.message)
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_message(self.error_message())
    }
}

impl From<&FioError> for ErrorResponse {
    fn from(err: &FioError) -> Self {
        let kind = err.kind();
        match kind.status_code() {
            400 => Self {
                error_type: "invalid_input".to_string(),
                message: INVALID_INPUT_MESSAGE.to_string(),
                fields: vec![ErrorField {
                    name: kind.field().unwrap_or_default().to_string(),
                    value: err.value().unwrap_or_default().to_string(),
                    error: kind.to_string(),
                }],
            },
            403 => Self {
                error_type: "invalid_signature".to_string(),
                message: kind.to_string(),
                fields: Vec::new(),
            },
            404 => Self {
                error_type: "not_found".to_string(),
                message: kind.to_string(),
                fields: Vec::new(),
            },
            _ => Self {
                error_type: "internal_error".to_string(),
                message: kind.to_string(),
                fields: Vec::new(),
            },
        }
    }
}

#[cfg(feature = "rpc-server")]
impl ResponseError for FioError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(ResponseError::status_code(self)).json(ErrorResponse::from(self))
    }
}
