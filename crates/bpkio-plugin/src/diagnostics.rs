//! Diagnostics returned to the host

use crate::error::{DataSourceError, LifecycleError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn at(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<LifecycleError> for Diagnostic {
    fn from(error: LifecycleError) -> Self {
        Diagnostic::error(error.summary(), error.to_string())
    }
}

impl From<DataSourceError> for Diagnostic {
    fn from(error: DataSourceError) -> Self {
        Diagnostic::error(error.summary(), error.to_string())
    }
}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: impl Into<Diagnostic>) {
        self.0.push(diagnostic.into());
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.is_error())
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self(diagnostics)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Operation;

    #[test]
    fn test_warnings_are_not_errors() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::warning("Deprecated", "use something else"));
        assert!(!diags.has_error());
        diags.push(Diagnostic::error("Broken", ""));
        assert!(diags.has_error());
        assert_eq!(diags.errors().count(), 1);
    }

    #[test]
    fn test_lifecycle_error_summary() {
        let error = LifecycleError::Api {
            entity: "Slate Source",
            operation: Operation::Create,
            message: "duplicate name".into(),
        };
        let diag = Diagnostic::from(error);
        assert_eq!(diag.summary, "Error Creating Slate Source");
        assert!(diag.detail.contains("duplicate name"));
    }

    #[test]
    fn test_serialized_shape() {
        let diag = Diagnostic::error("Missing", "detail").at("name");
        let json = serde_json::to_value(Diagnostics::from(diag)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "severity": "error",
                "summary": "Missing",
                "detail": "detail",
                "attribute": "name"
            }])
        );
    }
}
