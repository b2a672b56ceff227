/* src/engine/rust/src/markup/mod.rs */

//! A small owned HTML tree that implements [`ContentNode`] and
//! [`FormControl`], used by the CLI, the renderer and the WASM bindings.

mod parser;
mod serialize;

pub use parser::parse_fragment;
pub use serialize::{escape_attr, escape_text, serialize};

use crate::form::FormControl;
use crate::node::{text_content, ContentNode};

/// Tag given to the synthetic root built by [`Markup::root`].
pub const ROOT_TAG: &str = "repeater-content";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
  Element(Element),
  Text(String),
  Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub tag: String,
  pub attrs: Vec<Attribute>,
  pub children: Vec<Markup>,
  pub self_closing: bool,
  /// Live control state; attributes hold the defaults it resets to.
  pub state: ControlState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
  pub name: String,
  /// `None` for a bare attribute such as `disabled`.
  pub value: Option<String>,
}

/// What a user changed on a control since it was created or last reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
  pub value: Option<String>,
  pub checked: Option<bool>,
  pub files: Vec<String>,
}

impl Markup {
  pub fn element(tag: &str) -> Self {
    Self::Element(Element {
      tag: tag.to_ascii_lowercase(),
      attrs: Vec::new(),
      children: Vec::new(),
      self_closing: false,
      state: ControlState::default(),
    })
  }

  pub fn text_node(text: impl Into<String>) -> Self {
    Self::Text(text.into())
  }

  /// Builder-style attribute setter.
  pub fn with_attr(mut self, name: &str, value: &str) -> Self {
    self.set_attribute(name, value);
    self
  }

  /// Builder-style child append. Ignored on non-elements.
  pub fn with_child(mut self, child: Markup) -> Self {
    if let Self::Element(el) = &mut self {
      el.children.push(child);
    }
    self
  }

  /// Wrap parsed nodes in a synthetic content root.
  pub fn root(children: Vec<Markup>) -> Self {
    let mut root = Self::element(ROOT_TAG);
    if let Self::Element(el) = &mut root {
      el.children = children;
    }
    root
  }

  /// Parse an HTML fragment straight into a content root.
  pub fn parse_root(html: &str) -> Self {
    Self::root(parse_fragment(html))
  }

  pub fn as_element(&self) -> Option<&Element> {
    match self {
      Self::Element(el) => Some(el),
      _ => None,
    }
  }

  /// Serialize this node and its subtree.
  pub fn to_html(&self) -> String {
    serialize(std::slice::from_ref(self))
  }

  /// Serialize only the children; the usual view of a content root.
  pub fn inner_html(&self) -> String {
    serialize(self.children())
  }
}

impl Element {
  fn find_attr(&self, name: &str) -> Option<&Attribute> {
    self.attrs.iter().find(|a| a.name.eq_ignore_ascii_case(name))
  }
}

impl ContentNode for Markup {
  fn tag(&self) -> Option<&str> {
    self.as_element().map(|el| el.tag.as_str())
  }

  fn children(&self) -> &[Self] {
    match self {
      Self::Element(el) => el.children.as_slice(),
      _ => &[],
    }
  }

  fn children_mut(&mut self) -> &mut [Self] {
    match self {
      Self::Element(el) => el.children.as_mut_slice(),
      _ => &mut [],
    }
  }

  fn remove_child(&mut self, index: usize) -> Option<Self> {
    match self {
      Self::Element(el) if index < el.children.len() => Some(el.children.remove(index)),
      _ => None,
    }
  }

  fn attribute_names(&self) -> Vec<String> {
    match self {
      Self::Element(el) => el.attrs.iter().map(|a| a.name.clone()).collect(),
      _ => Vec::new(),
    }
  }

  fn attribute(&self, name: &str) -> Option<&str> {
    let attr = self.as_element()?.find_attr(name)?;
    Some(attr.value.as_deref().unwrap_or(""))
  }

  fn set_attribute(&mut self, name: &str, value: &str) {
    let Self::Element(el) = self else {
      return;
    };
    match el.attrs.iter_mut().find(|a| a.name.eq_ignore_ascii_case(name)) {
      Some(attr) => attr.value = Some(value.to_string()),
      None => el.attrs.push(Attribute { name: name.to_string(), value: Some(value.to_string()) }),
    }
  }

  fn remove_attribute(&mut self, name: &str) {
    if let Self::Element(el) = self {
      el.attrs.retain(|a| !a.name.eq_ignore_ascii_case(name));
    }
  }

  fn text(&self) -> Option<&str> {
    match self {
      Self::Text(text) => Some(text),
      _ => None,
    }
  }

  fn set_text(&mut self, text: &str) {
    if let Self::Text(current) = self {
      *current = text.to_string();
    }
  }
}

impl FormControl for Markup {
  fn current_value(&self) -> String {
    let Some(el) = self.as_element() else {
      return String::new();
    };
    if let Some(value) = &el.state.value {
      return value.clone();
    }
    match el.tag.as_str() {
      "textarea" => text_content(self),
      "select" => default_select_value(self),
      _ => self.attribute("value").unwrap_or_default().to_string(),
    }
  }

  fn is_checked(&self) -> bool {
    match self.as_element() {
      Some(el) => el.state.checked.unwrap_or_else(|| self.has_attribute("checked")),
      None => false,
    }
  }

  fn selected_files(&self) -> Vec<String> {
    self.as_element().map(|el| el.state.files.clone()).unwrap_or_default()
  }

  fn set_current_value(&mut self, value: &str) {
    if let Self::Element(el) = self {
      el.state.value = Some(value.to_string());
    }
  }

  fn set_checked(&mut self, checked: bool) {
    if let Self::Element(el) = self {
      el.state.checked = Some(checked);
    }
  }

  fn set_selected_files(&mut self, files: Vec<String>) {
    if let Self::Element(el) = self {
      el.state.files = files;
    }
  }

  fn reset_control(&mut self) {
    if let Self::Element(el) = self {
      el.state = ControlState::default();
    }
  }
}

fn option_value(option: &Markup) -> String {
  match option.attribute("value") {
    Some(value) => value.to_string(),
    None => text_content(option).trim().to_string(),
  }
}

/// Options directly inside the select or inside its optgroups.
fn options(select: &Markup) -> Vec<&Markup> {
  let mut out = Vec::new();
  for child in select.children() {
    if child.has_tag("option") {
      out.push(child);
    } else if child.has_tag("optgroup") {
      out.extend(child.children().iter().filter(|c| c.has_tag("option")));
    }
  }
  out
}

fn default_select_value(select: &Markup) -> String {
  let options = options(select);
  options
    .iter()
    .find(|o| o.has_attribute("selected"))
    .or_else(|| options.first())
    .map(|o| option_value(o))
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn attribute_lookup_is_case_insensitive() {
    let node = Markup::element("input").with_attr("Name", "a");
    assert_eq!(node.attribute("name"), Some("a"));
  }

  #[test]
  fn bare_attribute_reads_as_empty() {
    let nodes = parse_fragment("<input disabled>");
    assert_eq!(nodes[0].attribute("disabled"), Some(""));
  }

  #[test]
  fn set_attribute_replaces_in_place() {
    let mut node = Markup::element("input").with_attr("id", "a").with_attr("name", "b");
    node.set_attribute("id", "c");
    assert_eq!(node.attribute_names(), vec!["id", "name"]);
    assert_eq!(node.attribute("id"), Some("c"));
  }

  #[test]
  fn text_node_has_no_children() {
    let mut node = Markup::text_node("x");
    assert!(node.children().is_empty());
    assert!(node.children_mut().is_empty());
    assert!(node.remove_child(0).is_none());
  }

  #[test]
  fn live_value_shadows_default() {
    let mut input = Markup::element("input").with_attr("value", "default");
    assert_eq!(input.current_value(), "default");
    input.set_current_value("typed");
    assert_eq!(input.current_value(), "typed");
    assert_eq!(input.attribute("value"), Some("default"));
    input.reset_control();
    assert_eq!(input.current_value(), "default");
  }

  #[test]
  fn checkbox_checkedness_follows_attribute_until_touched() {
    let mut input = parse_fragment(r#"<input type="checkbox" checked>"#).remove(0);
    assert!(input.is_checked());
    input.set_checked(false);
    assert!(!input.is_checked());
    input.reset_control();
    assert!(input.is_checked());
  }

  #[test]
  fn select_value_prefers_selected_option() {
    let nodes = parse_fragment(
      r#"<select><option value="a">A</option><option value="b" selected>B</option></select>"#,
    );
    assert_eq!(nodes[0].current_value(), "b");
  }

  #[test]
  fn select_value_falls_back_to_first_option_text() {
    let nodes = parse_fragment("<select><optgroup><option> First </option></optgroup></select>");
    assert_eq!(nodes[0].current_value(), "First");
  }

  #[test]
  fn textarea_value_is_its_text() {
    let nodes = parse_fragment("<textarea>line &amp; more</textarea>");
    assert_eq!(nodes[0].current_value(), "line & more");
  }
}
