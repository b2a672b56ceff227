/* src/engine/rust/src/group.rs */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Limits;
use crate::node::ContentNode;
use crate::template::{renumber, Template};

/// Identity of a group for the lifetime of its component. Never reused,
/// even after the group is removed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// One numbered repetition; owns its whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<N> {
  id: GroupId,
  element: N,
  position: usize,
}

impl<N> Group<N> {
  pub fn id(&self) -> GroupId {
    self.id
  }

  pub fn element(&self) -> &N {
    &self.element
  }

  pub(crate) fn element_mut(&mut self) -> &mut N {
    &mut self.element
  }

  /// 0-based index in the collection.
  pub fn position(&self) -> usize {
    self.position
  }

  /// The sequence number the group displays.
  pub fn number(&self) -> usize {
    self.position + 1
  }

  pub(crate) fn into_element(self) -> N {
    self.element
  }
}

/// Ordered groups plus the bounds on how many there may be.
///
/// Every operation that would leave `len()` outside the bounds is refused
/// whole; after any successful add or remove each group at position `i`
/// displays `i + 1`.
#[derive(Debug, Clone)]
pub struct GroupCollection<N> {
  groups: Vec<Group<N>>,
  limits: Limits,
  next_id: u64,
}

impl<N: ContentNode> GroupCollection<N> {
  pub fn new(limits: Limits) -> Self {
    Self { groups: Vec::new(), limits, next_id: 1 }
  }

  /// Seed from pre-existing content, adopted verbatim, or with one filled
  /// group when there is none. Replaces any current groups; ids keep counting.
  pub fn initialize(&mut self, children: Vec<N>, template: Option<&Template<N>>) {
    self.groups.clear();
    if children.is_empty() {
      if let Some(template) = template {
        let element = template.fill(1);
        self.push(element);
      }
      return;
    }
    for element in children {
      self.push(element);
    }
  }

  /// Append a group filled for the next number. `None` when at `max`.
  pub fn add(&mut self, template: &Template<N>) -> Option<&Group<N>> {
    if !self.can_add() {
      return None;
    }
    let element = template.fill(self.groups.len() + 1);
    let id = self.push(element);
    tracing::debug!(group = %id, count = self.groups.len(), "group added");
    self.groups.last()
  }

  /// Remove a group and renumber the rest. `None` when the id is unknown or
  /// the collection is already at `min`.
  pub fn remove(&mut self, id: GroupId) -> Option<Group<N>> {
    if !self.can_remove() {
      return None;
    }
    let index = self.index_of(id)?;
    let removed = self.groups.remove(index);
    self.renumber_all();
    tracing::debug!(group = %id, count = self.groups.len(), "group removed");
    Some(removed)
  }

  /// Drop trailing groups until `len() <= len`. Bypasses `min`; callers
  /// only shrink towards a valid `max`.
  pub(crate) fn truncate(&mut self, len: usize) -> Vec<Group<N>> {
    if len >= self.groups.len() {
      return Vec::new();
    }
    self.groups.split_off(len)
  }

  /// Rewrite every group to display `position + 1`.
  pub fn renumber_all(&mut self) {
    for (position, group) in self.groups.iter_mut().enumerate() {
      group.position = position;
      renumber(&mut group.element, position + 1);
    }
  }

  pub fn limits(&self) -> Limits {
    self.limits
  }

  pub fn set_limits(&mut self, limits: Limits) {
    self.limits = limits;
  }

  pub fn can_add(&self) -> bool {
    self.limits.can_add(self.groups.len())
  }

  pub fn can_remove(&self) -> bool {
    self.limits.can_remove(self.groups.len())
  }

  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Group<N>> {
    self.groups.iter()
  }

  pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Group<N>> {
    self.groups.iter_mut()
  }

  pub fn get(&self, id: GroupId) -> Option<&Group<N>> {
    self.groups.iter().find(|g| g.id == id)
  }

  pub(crate) fn get_mut(&mut self, id: GroupId) -> Option<&mut Group<N>> {
    self.groups.iter_mut().find(|g| g.id == id)
  }

  pub fn ids(&self) -> Vec<GroupId> {
    self.groups.iter().map(Group::id).collect()
  }

  fn index_of(&self, id: GroupId) -> Option<usize> {
    self.groups.iter().position(|g| g.id == id)
  }

  fn push(&mut self, element: N) -> GroupId {
    let id = GroupId(self.next_id);
    self.next_id += 1;
    let position = self.groups.len();
    self.groups.push(Group { id, element, position });
    id
  }
}

impl<'a, N> IntoIterator for &'a GroupCollection<N> {
  type Item = &'a Group<N>;
  type IntoIter = std::slice::Iter<'a, Group<N>>;

  fn into_iter(self) -> Self::IntoIter {
    self.groups.iter()
  }
}
