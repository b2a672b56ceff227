/* src/engine/rust/src/event.rs */

use serde::Serialize;

use crate::group::{Group, GroupId};

/// A group as it was when an event fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSnapshot<N> {
  pub id: GroupId,
  pub number: usize,
  #[serde(skip)]
  pub element: N,
}

impl<N: Clone> GroupSnapshot<N> {
  pub(crate) fn of(group: &Group<N>) -> Self {
    Self { id: group.id(), number: group.number(), element: group.element().clone() }
  }
}

impl<N> GroupSnapshot<N> {
  pub(crate) fn detached(group: Group<N>) -> Self {
    let (id, number) = (group.id(), group.number());
    Self { id, number, element: group.into_element() }
  }
}

/// Published to the host after a successful structural change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", bound(serialize = ""))]
pub enum RepeaterEvent<N> {
  Added { group: GroupSnapshot<N>, count: usize },
  Removed { group: GroupSnapshot<N>, count: usize },
}

impl<N> RepeaterEvent<N> {
  pub fn group(&self) -> &GroupSnapshot<N> {
    match self {
      Self::Added { group, .. } | Self::Removed { group, .. } => group,
    }
  }

  /// Number of groups right after the change.
  pub fn count(&self) -> usize {
    match self {
      Self::Added { count, .. } | Self::Removed { count, .. } => *count,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Added { .. } => "added",
      Self::Removed { .. } => "removed",
    }
  }
}
