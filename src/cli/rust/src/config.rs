/* src/cli/rust/src/config.rs */

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use repeater_engine::RepeaterAttributes;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "repeater.toml";

/// Contents of `repeater.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepeaterConfig {
  #[serde(default)]
  pub repeater: RepeaterAttributes,
  #[serde(default)]
  pub render: RenderSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderSection {
  /// Stylesheet files adopted into every rendered shell, relative to the
  /// config file
  #[serde(default)]
  pub stylesheets: Vec<String>,
}

pub fn find_repeater_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_repeater_config(path: &Path) -> Result<RepeaterConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Explicit `--config`, else the nearest `repeater.toml` above `cwd`, else
/// defaults. An explicit path that cannot be loaded is an error.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<(Option<PathBuf>, RepeaterConfig)> {
  let path = match explicit {
    Some(p) => p.to_path_buf(),
    None => match find_repeater_config(cwd) {
      Ok(p) => p,
      Err(_) => return Ok((None, RepeaterConfig::default())),
    },
  };
  let config = load_repeater_config(&path)?;
  Ok((Some(path), config))
}

/// Parse `--attr name=value` flags.
pub fn parse_attr_flags(flags: &[String]) -> Result<Vec<(String, String)>> {
  flags
    .iter()
    .map(|flag| {
      let (name, value) =
        flag.split_once('=').with_context(|| format!("--attr expects name=value, got `{flag}`"))?;
      Ok((name.trim().to_string(), value.to_string()))
    })
    .collect()
}

/// File attributes overridden by flags. Unknown flag names are rejected so
/// typos do not silently fall back to defaults.
pub fn merge_attributes(base: &RepeaterAttributes, flags: &[(String, String)]) -> Result<RepeaterAttributes> {
  let mut overrides = RepeaterAttributes::default();
  for (name, value) in flags {
    if !overrides.set(name, value) {
      bail!("unknown attribute `{name}` (expected one of add-label, remove-label, min, max)");
    }
  }
  Ok(base.merged_with(&overrides))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_minimal_config() {
    let config: RepeaterConfig = toml::from_str("").unwrap();
    assert_eq!(config.repeater, RepeaterAttributes::default());
    assert!(config.render.stylesheets.is_empty());
  }

  #[test]
  fn parse_full_config() {
    let toml_str = r#"
[repeater]
add-label = "Add stop"
remove_label = "Drop"
min = 2
max = "5"

[render]
stylesheets = ["theme.css"]
"#;
    let config: RepeaterConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.repeater.get("add-label"), Some("Add stop"));
    assert_eq!(config.repeater.get("remove-label"), Some("Drop"));
    assert_eq!(config.repeater.get("min"), Some("2"));
    assert_eq!(config.repeater.get("max"), Some("5"));
    assert_eq!(config.render.stylesheets, vec!["theme.css"]);
  }

  #[test]
  fn finds_config_in_ancestor() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(CONFIG_FILE), "[repeater]\nmin = 3\n").unwrap();
    let nested = tmp.path().join("forms/trip");
    std::fs::create_dir_all(&nested).unwrap();

    let found = find_repeater_config(&nested).unwrap();
    assert_eq!(found, tmp.path().canonicalize().unwrap().join(CONFIG_FILE));
    let (path, config) = resolve_config(None, &nested).unwrap();
    assert_eq!(path, Some(found));
    assert_eq!(config.repeater.get("min"), Some("3"));
  }

  #[test]
  fn missing_config_falls_back_to_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let (path, config) = resolve_config(None, tmp.path()).unwrap();
    // Only meaningful when no ancestor of the temp dir has a config
    if path.is_none() {
      assert_eq!(config.repeater, RepeaterAttributes::default());
    }
  }

  #[test]
  fn explicit_config_must_exist() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope.toml");
    let err = resolve_config(Some(&missing), tmp.path()).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
  }

  #[test]
  fn malformed_config_reports_path() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join(CONFIG_FILE);
    std::fs::write(&path, "[repeater\n").unwrap();
    let err = load_repeater_config(&path).unwrap_err();
    assert!(err.to_string().contains("failed to parse"));
  }

  #[test]
  fn flags_override_file_values() {
    let base = RepeaterAttributes::from_pairs([("min", "2"), ("add-label", "More")]);
    let flags = parse_attr_flags(&["min=4".to_string(), "max = 9".to_string()]).unwrap();
    let merged = merge_attributes(&base, &flags).unwrap();
    assert_eq!(merged.get("min"), Some("4"));
    assert_eq!(merged.get("max"), Some(" 9"));
    assert_eq!(merged.get("add-label"), Some("More"));
  }

  #[test]
  fn bad_flags_are_rejected() {
    assert!(parse_attr_flags(&["min".to_string()]).is_err());
    let flags = vec![("colour".to_string(), "red".to_string())];
    assert!(merge_attributes(&RepeaterAttributes::default(), &flags).is_err());
  }
}
