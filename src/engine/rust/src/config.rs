/* src/engine/rust/src/config.rs */

use serde::{Deserialize, Deserializer, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::RepeaterError;

pub const DEFAULT_ADD_LABEL: &str = "Add Another";
pub const DEFAULT_REMOVE_LABEL: &str = "Remove";
pub const DEFAULT_MIN: usize = 1;
/// Largest accepted `min`. Every group below `min` is cloned up front.
pub const MIN_CEILING: usize = 1000;

/// Attribute names the component reads.
pub const ATTRIBUTE_NAMES: &[&str] = &["add-label", "remove-label", "min", "max"];

/// Raw, unvalidated attributes as a host would hand them over.
///
/// `min`/`max` stay strings here so validation can report exactly what was
/// written; TOML integers are accepted and stringified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepeaterAttributes {
  #[serde(default, alias = "add_label")]
  pub add_label: Option<String>,
  #[serde(default, alias = "remove_label")]
  pub remove_label: Option<String>,
  #[serde(default, deserialize_with = "attr_string")]
  pub min: Option<String>,
  #[serde(default, deserialize_with = "attr_string")]
  pub max: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
  Int(i64),
  Text(String),
}

fn attr_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
  Ok(Option::<RawValue>::deserialize(deserializer)?.map(|raw| match raw {
    RawValue::Int(i) => i.to_string(),
    RawValue::Text(s) => s,
  }))
}

fn canonical_name(name: &str) -> String {
  name.trim().to_ascii_lowercase().replace('_', "-")
}

impl RepeaterAttributes {
  /// Collect attributes from `name=value` pairs; unknown names are skipped.
  pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
    let mut attrs = Self::default();
    for (name, value) in pairs {
      attrs.set(name, value);
    }
    attrs
  }

  /// Set an attribute by its markup name. Returns false for unknown names.
  pub fn set(&mut self, name: &str, value: &str) -> bool {
    match self.slot_mut(name) {
      Some(slot) => {
        *slot = Some(value.to_string());
        true
      }
      None => false,
    }
  }

  pub fn unset(&mut self, name: &str) -> bool {
    match self.slot_mut(name) {
      Some(slot) => {
        *slot = None;
        true
      }
      None => false,
    }
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    match canonical_name(name).as_str() {
      "add-label" => self.add_label.as_deref(),
      "remove-label" => self.remove_label.as_deref(),
      "min" => self.min.as_deref(),
      "max" => self.max.as_deref(),
      _ => None,
    }
  }

  /// Values present in `other` win.
  pub fn merged_with(&self, other: &Self) -> Self {
    Self {
      add_label: other.add_label.clone().or_else(|| self.add_label.clone()),
      remove_label: other.remove_label.clone().or_else(|| self.remove_label.clone()),
      min: other.min.clone().or_else(|| self.min.clone()),
      max: other.max.clone().or_else(|| self.max.clone()),
    }
  }

  fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
    match canonical_name(name).as_str() {
      "add-label" => Some(&mut self.add_label),
      "remove-label" => Some(&mut self.remove_label),
      "min" => Some(&mut self.min),
      "max" => Some(&mut self.max),
      _ => None,
    }
  }
}

/// Cardinality bounds on the group collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Limits {
  pub min: usize,
  /// `None` means unlimited. Always greater than `min` when set.
  pub max: Option<usize>,
}

impl Default for Limits {
  fn default() -> Self {
    Self { min: DEFAULT_MIN, max: None }
  }
}

impl Limits {
  pub fn can_add(&self, len: usize) -> bool {
    self.max.is_none_or(|max| len < max)
  }

  pub fn can_remove(&self, len: usize) -> bool {
    len > self.min
  }
}

/// Effective configuration after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
  pub add_label: String,
  pub remove_label: String,
  pub limits: Limits,
}

impl Default for ResolvedConfig {
  fn default() -> Self {
    Self {
      add_label: DEFAULT_ADD_LABEL.to_string(),
      remove_label: DEFAULT_REMOVE_LABEL.to_string(),
      limits: Limits::default(),
    }
  }
}

impl ResolvedConfig {
  /// Validate each attribute on its own. Invalid values fall back to their
  /// default and produce a warning; nothing here is fatal.
  pub fn resolve(attrs: &RepeaterAttributes) -> (Self, Vec<Diagnostic>) {
    let mut warnings = Vec::new();

    let min = match attrs.min.as_deref().map(|raw| (raw, parse_positive(raw).and_then(cap_min))) {
      None => DEFAULT_MIN,
      Some((_, Ok(min))) => min,
      Some((raw, Err(reason))) => {
        let err = invalid("min", raw, reason);
        warnings.push(Diagnostic::warning(
          DiagnosticKind::InvalidMin,
          format!("{err}; using default {DEFAULT_MIN}"),
        ));
        DEFAULT_MIN
      }
    };

    let max = match attrs.max.as_deref() {
      None => None,
      Some(raw) => {
        let checked = parse_positive(raw).and_then(|max| {
          if max > min { Ok(max) } else { Err(format!("must be greater than min ({min})")) }
        });
        match checked {
          Ok(max) => Some(max),
          Err(reason) => {
            let err = invalid("max", raw, reason);
            warnings.push(Diagnostic::warning(
              DiagnosticKind::InvalidMax,
              format!("{err}; leaving max unset"),
            ));
            None
          }
        }
      }
    };

    let config = Self {
      add_label: attrs.add_label.clone().unwrap_or_else(|| DEFAULT_ADD_LABEL.to_string()),
      remove_label: attrs.remove_label.clone().unwrap_or_else(|| DEFAULT_REMOVE_LABEL.to_string()),
      limits: Limits { min, max },
    };
    (config, warnings)
  }
}

fn invalid(name: &str, value: &str, reason: String) -> RepeaterError {
  RepeaterError::InvalidAttribute { name: name.to_string(), value: value.to_string(), reason }
}

/// Accept only plain decimal digits (no sign, no whitespace) above zero.
fn parse_positive(raw: &str) -> Result<usize, String> {
  if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
    return Err("not a positive integer".to_string());
  }
  let value: usize = raw.parse().map_err(|_| "out of range".to_string())?;
  if value == 0 {
    return Err("must be greater than zero".to_string());
  }
  Ok(value)
}

fn cap_min(min: usize) -> Result<usize, String> {
  if min > MIN_CEILING { Err(format!("must be at most {MIN_CEILING}")) } else { Ok(min) }
}
