/* src/engine/rust/src/form.rs */

use serde::{Deserialize, Serialize};

use crate::node::ContentNode;

/// Live control state on top of a [`ContentNode`], the way a browser keeps
/// `.value`/`.checked` apart from the `value`/`checked` attributes.
pub trait FormControl: ContentNode {
  fn current_value(&self) -> String;

  fn is_checked(&self) -> bool;

  fn selected_files(&self) -> Vec<String>;

  fn set_current_value(&mut self, value: &str);

  fn set_checked(&mut self, checked: bool);

  fn set_selected_files(&mut self, files: Vec<String>);

  /// Forget user changes so the defaults show again. Not recursive.
  fn reset_control(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlKind {
  /// Checkbox or radio: contributes only while checked
  Checkable,
  /// One entry per selected file
  File,
  /// Everything else: contributes its current value, even when empty
  Value,
}

fn classify<N: ContentNode>(node: &N) -> Option<ControlKind> {
  let tag = node.tag()?;
  match tag {
    "select" | "textarea" => Some(ControlKind::Value),
    "input" => {
      let ty = node.attribute("type").unwrap_or("text").trim().to_ascii_lowercase();
      match ty.as_str() {
        "checkbox" | "radio" => Some(ControlKind::Checkable),
        "file" => Some(ControlKind::File),
        // Buttons only submit when they are the submitter
        "submit" | "reset" | "button" | "image" => None,
        _ => Some(ControlKind::Value),
      }
    }
    _ => None,
  }
}

/// True for nodes that carry a value into form submission.
pub fn is_control<N: ContentNode>(node: &N) -> bool {
  classify(node).is_some()
}

fn is_radio<N: ContentNode>(node: &N) -> bool {
  node.has_tag("input") && node.attribute("type").is_some_and(|t| t.eq_ignore_ascii_case("radio"))
}

/// The component's contribution to an enclosing form, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValue(Vec<(String, String)>);

impl FormValue {
  pub fn entries(&self) -> &[(String, String)] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// First value submitted under `name`.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
  }

  pub fn get_all(&self, name: &str) -> Vec<&str> {
    self.0.iter().filter(|(n, _)| n == name).map(|(_, v)| v.as_str()).collect()
  }

  /// `application/x-www-form-urlencoded` body, entries in order.
  pub fn to_urlencoded(&self) -> String {
    self
      .0
      .iter()
      .map(|(name, value)| format!("{}={}", urlencode(name), urlencode(value)))
      .collect::<Vec<_>>()
      .join("&")
  }
}

impl<'a> IntoIterator for &'a FormValue {
  type Item = &'a (String, String);
  type IntoIter = std::slice::Iter<'a, (String, String)>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

fn urlencode(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for b in text.bytes() {
    match b {
      b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => out.push(b as char),
      b' ' => out.push('+'),
      _ => out.push_str(&format!("%{b:02X}")),
    }
  }
  out
}

/// Reduce the groups, in order, to a single multiset of name/value pairs.
///
/// Controls without a name, disabled controls, and controls inside a
/// disabled `fieldset` contribute nothing.
pub fn aggregate<'a, N, I>(groups: I) -> FormValue
where
  N: FormControl + 'a,
  I: IntoIterator<Item = &'a N>,
{
  let mut entries = Vec::new();
  for element in groups {
    collect(element, false, &mut entries);
  }
  FormValue(entries)
}

fn collect<N: FormControl>(node: &N, inherited_disabled: bool, out: &mut Vec<(String, String)>) {
  if !node.is_element() {
    return;
  }
  let disabled = inherited_disabled || node.has_attribute("disabled");
  if let Some(kind) = classify(node) {
    let name = node.attribute("name").unwrap_or_default();
    if !name.is_empty() && !disabled {
      match kind {
        ControlKind::Checkable => {
          if node.is_checked() {
            let value = node.attribute("value").unwrap_or("on");
            out.push((name.to_string(), value.to_string()));
          }
        }
        ControlKind::File => {
          for file in node.selected_files() {
            out.push((name.to_string(), file));
          }
        }
        ControlKind::Value => out.push((name.to_string(), node.current_value())),
      }
    }
  }
  let fieldset_disabled = node.has_tag("fieldset") && node.has_attribute("disabled");
  for child in node.children() {
    collect(child, inherited_disabled || fieldset_disabled, out);
  }
}

/// Restore every control below `node` to its default state.
pub fn reset_tree<N: FormControl>(node: &mut N) {
  node.reset_control();
  for child in node.children_mut() {
    reset_tree(child);
  }
}

/// First control named `name`, in document order.
pub fn find_control_mut<'a, N: FormControl>(node: &'a mut N, name: &str) -> Option<&'a mut N> {
  if is_control(node) && node.attribute("name") == Some(name) {
    return Some(node);
  }
  node.children_mut().iter_mut().find_map(|child| find_control_mut(child, name))
}

/// Set the checked state of the first control named `name`. Checking a radio
/// unchecks the other radios sharing its name. Returns false when no control
/// has that name.
pub fn check_control<N: FormControl>(node: &mut N, name: &str, checked: bool) -> bool {
  let Some(control) = find_control_mut(node, name) else {
    return false;
  };
  if !(checked && is_radio(&*control)) {
    control.set_checked(checked);
    return true;
  }
  // The first control in document order is also the first radio visited
  let mut first = true;
  visit_radios(node, name, &mut |radio| {
    radio.set_checked(first);
    first = false;
  });
  true
}

/// Check the radio named `name` whose value is `value` and uncheck the
/// other radios sharing its name. Returns false when no such radio exists.
pub fn select_radio<N: FormControl>(node: &mut N, name: &str, value: &str) -> bool {
  if !has_radio(node, name, value) {
    return false;
  }
  let mut found = false;
  visit_radios(node, name, &mut |radio| {
    let hit = !found && radio_value(radio) == value;
    found |= hit;
    radio.set_checked(hit);
  });
  true
}

fn radio_value<N: ContentNode>(radio: &N) -> &str {
  radio.attribute("value").unwrap_or("on")
}

fn has_radio<N: ContentNode>(node: &N, name: &str, value: &str) -> bool {
  (is_radio(node) && node.attribute("name") == Some(name) && radio_value(node) == value)
    || node.children().iter().any(|child| has_radio(child, name, value))
}

fn visit_radios<N: FormControl>(node: &mut N, name: &str, f: &mut dyn FnMut(&mut N)) {
  if is_radio(node) && node.attribute("name") == Some(name) {
    f(node);
  }
  for child in node.children_mut() {
    visit_radios(child, name, f);
  }
}

/// A copy of `node` with every control carrying `disabled`, for drawing a
/// disabled component without touching its real state.
pub fn disabled_view<N: FormControl>(node: &N) -> N {
  let mut view = node.clone();
  mark_disabled(&mut view);
  view
}

fn mark_disabled<N: FormControl>(node: &mut N) {
  if is_control(node) || node.has_tag("button") || node.has_tag("fieldset") {
    node.set_attribute("disabled", "");
  }
  for child in node.children_mut() {
    mark_disabled(child);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::markup::{parse_fragment, Markup};

  fn groups(html: &[&str]) -> Vec<Markup> {
    html.iter().map(|h| Markup::root(parse_fragment(h))).collect()
  }

  fn pairs(value: &FormValue) -> Vec<(&str, &str)> {
    value.entries().iter().map(|(n, v)| (n.as_str(), v.as_str())).collect()
  }

  #[test]
  fn unchecked_checkbox_contributes_nothing() {
    let g = groups(&[r#"<input name="a" value="x">"#, r#"<input type="checkbox" name="b">"#]);
    assert_eq!(pairs(&aggregate(&g)), vec![("a", "x")]);
  }

  #[test]
  fn checked_checkbox_defaults_to_on() {
    let g = groups(&[r#"<input type="checkbox" name="b" checked><input type="radio" name="r" value="y" checked>"#]);
    assert_eq!(pairs(&aggregate(&g)), vec![("b", "on"), ("r", "y")]);
  }

  #[test]
  fn empty_values_still_count() {
    let g = groups(&[r#"<input name="a"><textarea name="t"></textarea><select name="s"></select>"#]);
    assert_eq!(pairs(&aggregate(&g)), vec![("a", ""), ("t", ""), ("s", "")]);
  }

  #[test]
  fn nameless_and_disabled_controls_are_skipped() {
    let g = groups(&[
      r#"<input value="x"><input name="" value="y"><input name="d" disabled value="z">"#,
      r#"<fieldset disabled><input name="f" value="1"></fieldset><input name="ok" value="2">"#,
    ]);
    assert_eq!(pairs(&aggregate(&g)), vec![("ok", "2")]);
  }

  #[test]
  fn button_inputs_do_not_submit() {
    let g = groups(&[r#"<input type="submit" name="go" value="Go"><button name="b">B</button>"#]);
    assert!(aggregate(&g).is_empty());
  }

  #[test]
  fn file_inputs_contribute_each_file() {
    let mut g = groups(&[r#"<input type="file" name="doc">"#]);
    let input = find_control_mut(&mut g[0], "doc").unwrap();
    input.set_selected_files(vec!["a.pdf".to_string(), "b.pdf".to_string()]);
    assert_eq!(pairs(&aggregate(&g)), vec![("doc", "a.pdf"), ("doc", "b.pdf")]);
  }

  #[test]
  fn order_is_group_then_document() {
    let g = groups(&[
      r#"<div><input name="a1" value="1"><label><input name="b1" value="2"></label></div>"#,
      r#"<input name="a2" value="3">"#,
    ]);
    assert_eq!(pairs(&aggregate(&g)), vec![("a1", "1"), ("b1", "2"), ("a2", "3")]);
  }

  #[test]
  fn group_element_itself_can_be_a_control() {
    let g: Vec<Markup> = parse_fragment(r#"<input name="solo" value="v">"#);
    assert_eq!(pairs(&aggregate(&g)), vec![("solo", "v")]);
  }

  #[test]
  fn reset_restores_defaults() {
    let mut g = groups(&[r#"<input name="a" value="x"><input type="checkbox" name="c" checked>"#]);
    find_control_mut(&mut g[0], "a").unwrap().set_current_value("typed");
    find_control_mut(&mut g[0], "c").unwrap().set_checked(false);
    assert_eq!(pairs(&aggregate(&g)), vec![("a", "typed")]);
    reset_tree(&mut g[0]);
    assert_eq!(pairs(&aggregate(&g)), vec![("a", "x"), ("c", "on")]);
  }

  #[test]
  fn select_radio_is_exclusive() {
    let mut g = groups(&[
      r#"<input type="radio" name="r" value="a" checked><input type="radio" name="r" value="b">"#,
    ]);
    assert!(select_radio(&mut g[0], "r", "b"));
    assert_eq!(pairs(&aggregate(&g)), vec![("r", "b")]);
    assert!(!select_radio(&mut g[0], "r", "zzz"));
    assert_eq!(pairs(&aggregate(&g)), vec![("r", "b")]);
  }

  #[test]
  fn checking_a_radio_clears_its_set() {
    let mut g = groups(&[concat!(
      r#"<input type="radio" name="r" value="a"><input type="radio" name="r" value="b" checked>"#,
      r#"<input type="radio" name="other" value="c" checked>"#,
    )]);
    assert!(check_control(&mut g[0], "r", true));
    assert_eq!(pairs(&aggregate(&g)), vec![("r", "a"), ("other", "c")]);
    assert!(check_control(&mut g[0], "r", false));
    assert_eq!(pairs(&aggregate(&g)), vec![("other", "c")]);
    assert!(!check_control(&mut g[0], "missing", true));
  }

  #[test]
  fn checking_a_checkbox_leaves_siblings_alone() {
    let mut g = groups(&[
      r#"<input type="checkbox" name="c" value="a"><input type="checkbox" name="c" value="b" checked>"#,
    ]);
    assert!(check_control(&mut g[0], "c", true));
    assert_eq!(pairs(&aggregate(&g)), vec![("c", "a"), ("c", "b")]);
  }

  #[test]
  fn disabled_view_leaves_original_alone() {
    let g = groups(&[r#"<input name="a" value="x">"#]);
    let view = disabled_view(&g[0]);
    assert!(aggregate(std::slice::from_ref(&view)).is_empty());
    assert_eq!(aggregate(&g).len(), 1);
  }

  #[test]
  fn urlencoded_keeps_order_and_escapes() {
    let g = groups(&[r#"<input name="a b" value="x&y"><input name="a b" value="é">"#]);
    let value = aggregate(&g);
    assert_eq!(value.to_urlencoded(), "a+b=x%26y&a+b=%C3%A9");
    assert_eq!(value.get_all("a b"), vec!["x&y", "é"]);
    assert_eq!(value.get("a b"), Some("x&y"));
  }

  #[test]
  fn serializes_as_pairs() {
    let g = groups(&[r#"<input name="a" value="x">"#]);
    let json = serde_json::to_string(&aggregate(&g)).unwrap();
    assert_eq!(json, r#"[["a","x"]]"#);
  }
}
