use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// A field value failed its format rule.
    Validation(String),
    /// Caller contract violation, e.g. a coordinate outside ±90/±180.
    InvalidArgument(String),
    /// The record is missing mandatory fields.
    Incomplete(Vec<&'static str>),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Incomplete(fields) => {
                write!(f, "incomplete record, missing: {}", fields.join(", "))
            }
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Validation(msg) | Self::InvalidArgument(msg) => {
                HttpResponse::BadRequest().json(ErrorBody {
                    code: 400,
                    message: msg,
                })
            }
            Self::Incomplete(_) => HttpResponse::BadRequest().json(ErrorBody {
                code: 400,
                message: &self.to_string(),
            }),
            Self::Io(err) => {
                log::error!("I/O error: {err}");
                HttpResponse::InternalServerError().json(ErrorBody {
                    code: 500,
                    message: "internal error",
                })
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(err.into())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errs: validator::ValidationErrors) -> Self {
        let field_errors = errs.field_errors();
        let mut fields: Vec<String> = field_errors.keys().map(|k| k.to_string()).collect();
        fields.sort_unstable();
        Self::Validation(format!("Validation failed for: {}", fields.join(", ")))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: u16,
    message: &'a str,
}
