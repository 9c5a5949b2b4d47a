//! # Monitor Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid parameter '{parameter}': got '{value}', expected {expected}")]
    InvalidParameter {
        parameter: String,
        value: String,
        expected: String,
    },
}

pub type MonitorResult<T> = Result<T, MonitorError>;

impl MonitorError {
    pub fn config(reason: &str) -> Self {
        Self::Config(reason.to_string())
    }

    pub fn invalid_parameter(parameter: &str, value: &str, expected: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}
