use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("Invalid template JSON: {0}")]
    Json(String),

    #[error("Template section missing: {0}")]
    MissingSection(&'static str),

    #[error("Unexpected template shape at {path}: expected {expected}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
    },
}

impl From<serde_json::Error> for TemplateError {
    fn from(e: serde_json::Error) -> Self {
        TemplateError::Json(e.to_string())
    }
}

pub type TemplateResult<T> = Result<T, TemplateError>;
