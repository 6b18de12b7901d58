use serde::Serialize;
use std::fmt;

/// Category of a warning or suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Attribute with no direct Compose equivalent
    Unsupported,
    Deprecated,
    BestPractice,
    /// A Compose-native replacement exists for this view
    Migration,
    Performance,
    /// The input could not be parsed
    Syntax,
    /// The input exceeded a depth or size limit
    Limit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            remediation: None,
        }
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(remediation) = &self.remediation {
            write!(f, " ({})", remediation)?;
        }
        Ok(())
    }
}
