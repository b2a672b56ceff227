/* src/engine/rust/src/diagnostics.rs */

use serde::Serialize;

use crate::error::RepeaterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Warning,
  Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
  /// `min` was not a clean positive integer; the default was used
  InvalidMin,
  /// `max` was not an integer above the effective `min`; left unset
  InvalidMax,
  /// Nothing in the content could serve as a template
  TemplateMissing,
  /// An explicit template had no element to clone
  TemplateEmpty,
}

/// A recoverable problem reported next to the component's state rather than
/// returned as an error. Queued on the component until drained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub level: Level,
  pub kind: DiagnosticKind,
  pub message: String,
}

impl Diagnostic {
  pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
    Self { level: Level::Warning, kind, message: message.into() }
  }

  pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
    Self { level: Level::Error, kind, message: message.into() }
  }

  /// Template failures become error diagnostics; other errors are not
  /// diagnostics and yield `None`.
  pub fn from_template_error(err: &RepeaterError) -> Option<Self> {
    let kind = match err {
      RepeaterError::TemplateMissing => DiagnosticKind::TemplateMissing,
      RepeaterError::TemplateEmpty => DiagnosticKind::TemplateEmpty,
      _ => return None,
    };
    Some(Self::error(kind, err.to_string()))
  }

  /// Forward to `tracing` at the matching level.
  pub(crate) fn log(&self) {
    match self.level {
      Level::Warning => tracing::warn!(kind = ?self.kind, "{}", self.message),
      Level::Error => tracing::error!(kind = ?self.kind, "{}", self.message),
    }
  }
}
