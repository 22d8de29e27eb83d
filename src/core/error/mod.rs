use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    RewriteInvalidPattern,
    RewriteInvalidEncoding,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::RewriteInvalidPattern => "rewrite.invalid_pattern",
            ErrorCode::RewriteInvalidEncoding => "rewrite.invalid_encoding",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidPatternDetails {
    pub index: usize,
    pub pattern: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidEncodingDetails {
    pub path: String,
    pub encoding: String,
    pub valid_up_to: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            value,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in rules file",
            details,
        )
        .with_hint("Rules files are a JSON array of {\"pattern\", \"replacement\"} objects")
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn rewrite_invalid_pattern(
        index: usize,
        pattern: impl Into<String>,
        err: &regex::Error,
    ) -> Self {
        let pattern = pattern.into();
        let details = to_details(InvalidPatternDetails {
            index,
            pattern: pattern.clone(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::RewriteInvalidPattern,
            format!("Rule {} has an invalid pattern: {}", index, pattern),
            details,
        )
    }

    pub fn rewrite_invalid_encoding(path: impl Into<String>, valid_up_to: usize) -> Self {
        let path = path.into();
        let details = to_details(InvalidEncodingDetails {
            path: path.clone(),
            encoding: "utf-8".to_string(),
            valid_up_to,
        });

        Self::new(
            ErrorCode::RewriteInvalidEncoding,
            format!("File is not valid UTF-8: {}", path),
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_names_rule_index() {
        let err = regex::Regex::new("(unclosed").unwrap_err();
        let e = Error::rewrite_invalid_pattern(7, "(unclosed", &err);

        assert_eq!(e.code, ErrorCode::RewriteInvalidPattern);
        assert!(e.message.contains("Rule 7"));
        assert_eq!(e.details["index"], 7);
        assert_eq!(e.details["pattern"], "(unclosed");
    }

    #[test]
    fn invalid_encoding_details_use_camel_case() {
        let e = Error::rewrite_invalid_encoding("src/A.java", 12);
        assert_eq!(e.details["validUpTo"], 12);
        assert_eq!(e.details["encoding"], "utf-8");
        assert_eq!(e.to_string(), "File is not valid UTF-8: src/A.java");
    }

    #[test]
    fn config_invalid_json_carries_hint() {
        let err = serde_json::from_str::<Value>("{").unwrap_err();
        let e = Error::config_invalid_json("rules.json", err);
        assert_eq!(e.hints.len(), 1);
        assert_eq!(e.details["path"], "rules.json");
    }
}
