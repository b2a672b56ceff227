/* src/render/rust/src/action.rs */

use std::fmt;
use std::str::FromStr;

use repeater_engine::{FormControl, GroupId, Repeater};

/// What an affordance asks for when activated. Written into the shell as
/// `data-action` so the host can hand it straight back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Add,
  Remove(GroupId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
  #[error("unknown action `{0}`")]
  Unknown(String),
  #[error("invalid group id `{0}` in remove action")]
  InvalidGroupId(String),
}

impl Action {
  /// Parse `add` or `remove:<id>`.
  pub fn parse(raw: &str) -> Result<Self, ActionError> {
    let raw = raw.trim();
    if raw == "add" {
      return Ok(Self::Add);
    }
    let Some(id) = raw.strip_prefix("remove:") else {
      return Err(ActionError::Unknown(raw.to_string()));
    };
    id.parse::<u64>()
      .map(|id| Self::Remove(GroupId(id)))
      .map_err(|_| ActionError::InvalidGroupId(id.to_string()))
  }
}

impl FromStr for Action {
  type Err = ActionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Add => f.write_str("add"),
      Self::Remove(id) => write!(f, "remove:{id}"),
    }
  }
}

/// Route an activated affordance into the component. Ignored while the
/// component is disabled. Returns whether anything changed.
pub fn dispatch<N: FormControl>(repeater: &mut Repeater<N>, action: Action) -> bool {
  if repeater.is_disabled() {
    tracing::debug!(%action, "ignoring action on disabled component");
    return false;
  }
  match action {
    Action::Add => repeater.add().is_some(),
    Action::Remove(id) => repeater.remove(id),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use repeater_engine::{Markup, RepeaterAttributes};

  fn repeater(html: &str) -> Repeater<Markup> {
    Repeater::prepare(Markup::parse_root(html)).connect(RepeaterAttributes::default())
  }

  #[test]
  fn parses_known_actions() {
    assert_eq!(Action::parse("add"), Ok(Action::Add));
    assert_eq!(Action::parse(" remove:7 "), Ok(Action::Remove(GroupId(7))));
    assert_eq!("remove:3".parse::<Action>(), Ok(Action::Remove(GroupId(3))));
  }

  #[test]
  fn rejects_malformed_actions() {
    assert_eq!(Action::parse("clear"), Err(ActionError::Unknown("clear".to_string())));
    assert_eq!(Action::parse("remove:x"), Err(ActionError::InvalidGroupId("x".to_string())));
    assert_eq!(Action::parse("remove:-1"), Err(ActionError::InvalidGroupId("-1".to_string())));
  }

  #[test]
  fn display_matches_parse() {
    for action in [Action::Add, Action::Remove(GroupId(12))] {
      assert_eq!(Action::parse(&action.to_string()), Ok(action));
    }
  }

  #[test]
  fn dispatch_routes_to_add_and_remove() {
    let mut r = repeater(r#"<template><input name="n-{n}"></template>"#);
    assert!(dispatch(&mut r, Action::Add));
    assert_eq!(r.len(), 2);
    assert!(dispatch(&mut r, Action::Remove(GroupId(1))));
    assert_eq!(r.groups().ids(), vec![GroupId(2)]);
    assert!(!dispatch(&mut r, Action::Remove(GroupId(2))));
  }

  #[test]
  fn dispatch_is_ignored_while_disabled() {
    let mut r = repeater(r#"<template><input name="n-{n}"></template>"#);
    r.set_disabled(true);
    assert!(!dispatch(&mut r, Action::Add));
    assert_eq!(r.len(), 1);
    assert!(r.drain_events().is_empty());
  }
}
