/* src/engine/rust/src/repeater.rs */

use serde::Serialize;

use crate::config::{RepeaterAttributes, ResolvedConfig};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{RepeaterError, Result};
use crate::event::{GroupSnapshot, RepeaterEvent};
use crate::form::{
  aggregate, check_control, find_control_mut, reset_tree, select_radio, FormControl, FormValue,
};
use crate::group::{Group, GroupCollection, GroupId};
use crate::node::{element_children, first_label_text};
use crate::template::Template;

/// Content whose template has been extracted but which is not configured
/// yet. [`Prepared::connect`] consumes it, so configuration is applied
/// exactly once and always after construction.
#[derive(Debug, Clone)]
pub struct Prepared<N> {
  template: Result<Template<N>>,
  children: Vec<N>,
}

impl<N: FormControl> Prepared<N> {
  pub fn template(&self) -> Option<&Template<N>> {
    self.template.as_ref().ok()
  }

  /// Apply configuration, seed the groups and publish the first value.
  pub fn connect(self, attributes: RepeaterAttributes) -> Repeater<N> {
    let (config, warnings) = ResolvedConfig::resolve(&attributes);
    let mut repeater = Repeater {
      template: None,
      groups: GroupCollection::new(config.limits),
      attributes,
      config,
      disabled: false,
      value: FormValue::default(),
      events: Vec::new(),
      diagnostics: Vec::new(),
    };
    for warning in warnings {
      repeater.report(warning);
    }
    repeater.seed(self);
    repeater
  }
}

/// What the rendering collaborator needs to draw one group region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRegion {
  pub id: GroupId,
  pub number: usize,
  /// Accessible label for this group's remove affordance
  pub remove_label: String,
  pub can_remove: bool,
}

/// Everything the rendering collaborator needs after a structural change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionPlan {
  pub groups: Vec<GroupRegion>,
  pub add_label: String,
  pub remove_label: String,
  pub can_add: bool,
  pub disabled: bool,
}

/// A repeatable field group component.
///
/// All structural changes go through [`add`](Self::add),
/// [`remove`](Self::remove) and [`set_attribute`](Self::set_attribute);
/// each one republishes the aggregated [`value`](Self::value) and queues
/// events and diagnostics for the host to drain.
#[derive(Debug, Clone)]
pub struct Repeater<N> {
  template: Option<Template<N>>,
  groups: GroupCollection<N>,
  attributes: RepeaterAttributes,
  config: ResolvedConfig,
  disabled: bool,
  value: FormValue,
  events: Vec<RepeaterEvent<N>>,
  diagnostics: Vec<Diagnostic>,
}

impl<N: FormControl> Repeater<N> {
  /// First phase: extract the template from `root` and take its remaining
  /// element children as pre-filled groups.
  pub fn prepare(mut root: N) -> Prepared<N> {
    let template = Template::extract(&mut root);
    let children = element_children(&root).cloned().collect();
    Prepared { template, children }
  }

  /// Throw away every group and start over from new content. Group ids keep
  /// counting from where they were.
  pub fn reinitialize(&mut self, root: N) {
    let prepared = Self::prepare(root);
    self.seed(prepared);
  }

  fn seed(&mut self, prepared: Prepared<N>) {
    self.template = match prepared.template {
      Ok(template) => Some(template),
      Err(err) => {
        if let Some(diagnostic) = Diagnostic::from_template_error(&err) {
          self.report(diagnostic);
        }
        None
      }
    };
    self.groups.initialize(prepared.children, self.template.as_ref());
    self.enforce_limits(false);
    self.publish();
  }

  /// Append a group. `None` when at `max` or when there is no template; the
  /// latter is also reported as an error diagnostic.
  pub fn add(&mut self) -> Option<GroupId> {
    let Some(template) = self.template.as_ref() else {
      self.report(Diagnostic::error(
        DiagnosticKind::TemplateMissing,
        format!("cannot add a group: {}", RepeaterError::TemplateMissing),
      ));
      return None;
    };
    let snapshot = GroupSnapshot::of(self.groups.add(template)?);
    let id = snapshot.id;
    self.events.push(RepeaterEvent::Added { group: snapshot, count: self.groups.len() });
    self.publish();
    Some(id)
  }

  /// Remove a group and renumber the rest. False when the id is unknown or
  /// the collection is at `min`.
  pub fn remove(&mut self, id: GroupId) -> bool {
    let Some(removed) = self.groups.remove(id) else {
      return false;
    };
    self.events.push(RepeaterEvent::Removed {
      group: GroupSnapshot::detached(removed),
      count: self.groups.len(),
    });
    self.publish();
    true
  }

  /// Change one configuration attribute and re-validate the whole set.
  /// Returns false for names the component does not know.
  pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
    if !self.attributes.set(name, value) {
      return false;
    }
    self.reconfigure();
    true
  }

  /// Revert an attribute to its default.
  pub fn remove_attribute(&mut self, name: &str) -> bool {
    if !self.attributes.unset(name) {
      return false;
    }
    self.reconfigure();
    true
  }

  fn reconfigure(&mut self) {
    let (config, warnings) = ResolvedConfig::resolve(&self.attributes);
    for warning in warnings {
      self.report(warning);
    }
    if config.limits != self.groups.limits() {
      tracing::debug!(min = config.limits.min, max = ?config.limits.max, "limits changed");
    }
    self.groups.set_limits(config.limits);
    self.config = config;
    self.enforce_limits(true);
    self.publish();
  }

  /// Bring the group count back inside the bounds: trailing groups go when
  /// above `max`, filled groups are appended while below `min`.
  fn enforce_limits(&mut self, notify: bool) {
    let limits = self.groups.limits();
    if let Some(max) = limits.max {
      let dropped = self.groups.truncate(max);
      let mut count = max + dropped.len();
      for group in dropped.into_iter().rev() {
        count -= 1;
        if notify {
          self
            .events
            .push(RepeaterEvent::Removed { group: GroupSnapshot::detached(group), count });
        }
      }
    }

    let Some(template) = self.template.as_ref() else {
      // Connect already reported the missing template
      if notify && self.groups.len() < limits.min {
        let message = format!(
          "cannot reach min {} with {} groups: {}",
          limits.min,
          self.groups.len(),
          RepeaterError::TemplateMissing
        );
        self.report(Diagnostic::error(DiagnosticKind::TemplateMissing, message));
      }
      return;
    };
    while self.groups.len() < limits.min {
      let Some(group) = self.groups.add(template) else {
        break;
      };
      let snapshot = GroupSnapshot::of(group);
      if notify {
        self.events.push(RepeaterEvent::Added { group: snapshot, count: self.groups.len() });
      }
    }
  }

  /// Propagate the disabled flag. A disabled component submits nothing.
  pub fn set_disabled(&mut self, disabled: bool) {
    self.disabled = disabled;
    self.publish();
  }

  /// Restore every control in every group to its default (form reset).
  pub fn reset(&mut self) {
    for group in self.groups.iter_mut() {
      reset_tree(group.element_mut());
    }
    self.publish();
  }

  /// Record a user edit to the first control named `name` in a group.
  pub fn set_field_value(&mut self, id: GroupId, name: &str, value: &str) -> Result<()> {
    self.control_mut(id, name)?.set_current_value(value);
    self.publish();
    Ok(())
  }

  /// Checking a radio unchecks the other radios of its name in the group.
  pub fn set_field_checked(&mut self, id: GroupId, name: &str, checked: bool) -> Result<()> {
    let group = self.groups.get_mut(id).ok_or(RepeaterError::UnknownGroup(id))?;
    if !check_control(group.element_mut(), name, checked) {
      return Err(RepeaterError::UnknownField { group: id, name: name.to_string() });
    }
    self.publish();
    Ok(())
  }

  pub fn set_field_files(&mut self, id: GroupId, name: &str, files: Vec<String>) -> Result<()> {
    self.control_mut(id, name)?.set_selected_files(files);
    self.publish();
    Ok(())
  }

  /// Check the radio with `value` among the group's radios named `name`.
  pub fn select_radio(&mut self, id: GroupId, name: &str, value: &str) -> Result<()> {
    let group = self.groups.get_mut(id).ok_or(RepeaterError::UnknownGroup(id))?;
    if !select_radio(group.element_mut(), name, value) {
      return Err(RepeaterError::UnknownField { group: id, name: name.to_string() });
    }
    self.publish();
    Ok(())
  }

  fn control_mut(&mut self, id: GroupId, name: &str) -> Result<&mut N> {
    let group = self.groups.get_mut(id).ok_or(RepeaterError::UnknownGroup(id))?;
    find_control_mut(group.element_mut(), name)
      .ok_or_else(|| RepeaterError::UnknownField { group: id, name: name.to_string() })
  }

  fn publish(&mut self) {
    self.value = if self.disabled {
      FormValue::default()
    } else {
      aggregate(self.groups.iter().map(Group::element))
    };
  }

  fn report(&mut self, diagnostic: Diagnostic) {
    diagnostic.log();
    self.diagnostics.push(diagnostic);
  }

  /// The aggregated value last published.
  pub fn value(&self) -> &FormValue {
    &self.value
  }

  pub fn groups(&self) -> &GroupCollection<N> {
    &self.groups
  }

  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }

  pub fn template(&self) -> Option<&Template<N>> {
    self.template.as_ref()
  }

  pub fn config(&self) -> &ResolvedConfig {
    &self.config
  }

  pub fn attributes(&self) -> &RepeaterAttributes {
    &self.attributes
  }

  pub fn is_disabled(&self) -> bool {
    self.disabled
  }

  pub fn can_add(&self) -> bool {
    self.template.is_some() && self.groups.can_add()
  }

  pub fn can_remove(&self) -> bool {
    self.groups.can_remove()
  }

  /// `remove-label` followed by the group's first label or legend text.
  pub fn remove_label_for(&self, group: &Group<N>) -> String {
    match first_label_text(group.element()) {
      Some(text) => format!("{} {text}", self.config.remove_label),
      None => self.config.remove_label.clone(),
    }
  }

  pub fn regions(&self) -> RegionPlan {
    let can_remove = self.can_remove();
    RegionPlan {
      groups: self
        .groups
        .iter()
        .map(|group| GroupRegion {
          id: group.id(),
          number: group.number(),
          remove_label: self.remove_label_for(group),
          can_remove,
        })
        .collect(),
      add_label: self.config.add_label.clone(),
      remove_label: self.config.remove_label.clone(),
      can_add: self.can_add(),
      disabled: self.disabled,
    }
  }

  pub fn drain_events(&mut self) -> Vec<RepeaterEvent<N>> {
    std::mem::take(&mut self.events)
  }

  pub fn drain_diagnostics(&mut self) -> Vec<Diagnostic> {
    std::mem::take(&mut self.diagnostics)
  }
}
