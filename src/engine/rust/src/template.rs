/* src/engine/rust/src/template.rs */

use serde::Serialize;

use crate::error::{RepeaterError, Result};
use crate::node::{element_children, rewrite_strings, ContentNode};
use crate::pattern::match_number;

/// Marker standing in for the sequence number inside a template.
pub const PLACEHOLDER: &str = "{n}";

/// Tag of the element that designates an explicit, author-written template.
pub const TEMPLATE_TAG: &str = "template";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSource {
  /// Taken from a `<template>` element, markers placed by the author
  Explicit,
  /// Cloned from the first content element with its numbers turned into markers
  Derived,
}

/// Normalized group markup with [`PLACEHOLDER`] where the number goes.
/// Immutable once extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<N> {
  root: N,
  source: TemplateSource,
}

impl<N: ContentNode> Template<N> {
  /// Build the template from the content root.
  ///
  /// A `<template>` child wins and is removed from `content`; its first
  /// element is used verbatim. Otherwise the first element child is cloned
  /// and every trailing number in its attributes and label text becomes a
  /// marker. `content` keeps that element as the first pre-filled group.
  pub fn extract(content: &mut N) -> Result<Self> {
    if let Some(index) = content.children().iter().position(|c| c.has_tag(TEMPLATE_TAG)) {
      let designator = content.remove_child(index).ok_or(RepeaterError::TemplateMissing)?;
      let root = element_children(&designator).next().cloned().ok_or(RepeaterError::TemplateEmpty)?;
      return Ok(Self { root, source: TemplateSource::Explicit });
    }

    let mut root = element_children(content).next().cloned().ok_or(RepeaterError::TemplateMissing)?;
    rewrite_strings(&mut root, &mut |text| match_number(text).map(|m| m.replace(PLACEHOLDER)));
    Ok(Self { root, source: TemplateSource::Derived })
  }

  /// Wrap markup that already carries markers.
  pub fn explicit(root: N) -> Self {
    Self { root, source: TemplateSource::Explicit }
  }

  pub fn root(&self) -> &N {
    &self.root
  }

  pub fn source(&self) -> TemplateSource {
    self.source
  }

  /// A fresh group for `number`: every marker in attributes and label text
  /// becomes its decimal form. Other text is left alone.
  pub fn fill(&self, number: usize) -> N {
    let mut node = self.root.clone();
    let digits = number.to_string();
    rewrite_strings(&mut node, &mut |text| {
      text.contains(PLACEHOLDER).then(|| text.replace(PLACEHOLDER, &digits))
    });
    node
  }
}

/// Rewrite an already-filled group to show `number`, replacing the trailing
/// digit run of each attribute and label text. Strings without digits are
/// left alone, so renumbering twice with the same number is a no-op.
pub fn renumber<N: ContentNode>(node: &mut N, number: usize) {
  let digits = number.to_string();
  rewrite_strings(node, &mut |text| {
    let m = match_number(text)?;
    (m.number != digits).then(|| m.replace(&digits))
  });
}

/// The number a group currently displays: the trailing digit run of the
/// first attribute or label text that has one.
pub fn displayed_number<N: ContentNode>(node: &N) -> Option<u64> {
  let mut scratch = node.clone();
  let mut found = None;
  rewrite_strings(&mut scratch, &mut |text| {
    if found.is_none() {
      found = match_number(text).and_then(|m| m.value());
    }
    None
  });
  found
}
