// ABOUTME: Error types for fragment decoration including ErrorCode enum and DecorateError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing different categories of decoration failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Parse,
    InvalidBase,
    Render,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Parse => "parse error",
            ErrorCode::InvalidBase => "invalid base URL",
            ErrorCode::Render => "render error",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for decoration operations.
#[derive(Debug, thiserror::Error)]
pub struct DecorateError {
    pub code: ErrorCode,
    pub block: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for DecorateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "veneer: {} {}: {}", self.op, self.block, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl DecorateError {
    /// Create a Parse error.
    pub fn parse(
        block: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Parse,
            block: block.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidBase error.
    pub fn invalid_base(
        block: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidBase,
            block: block.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Render error.
    pub fn render(
        block: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Render,
            block: block.into(),
            op: op.into(),
            source,
        }
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if this is an InvalidBase error.
    pub fn is_invalid_base(&self) -> bool {
        self.code == ErrorCode::InvalidBase
    }

    /// Returns true if this is a Render error.
    pub fn is_render(&self) -> bool {
        self.code == ErrorCode::Render
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_op_block_and_code() {
        let err = DecorateError::invalid_base("hero", "decorate", None);
        let msg = err.to_string();
        assert!(msg.contains("decorate"));
        assert!(msg.contains("hero"));
        assert!(msg.contains("invalid base URL"));
    }

    #[test]
    fn test_display_includes_source() {
        let err = DecorateError::parse(
            "",
            "decorate-block",
            Some(anyhow::anyhow!("no block element found")),
        );
        assert!(err.to_string().contains("no block element found"));
    }

    #[test]
    fn test_code_helpers() {
        assert!(DecorateError::parse("", "op", None).is_parse());
        assert!(DecorateError::invalid_base("", "op", None).is_invalid_base());
        assert!(DecorateError::render("", "op", None).is_render());
        assert!(!DecorateError::render("", "op", None).is_parse());
    }
}
