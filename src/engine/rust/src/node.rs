/* src/engine/rust/src/node.rs */

/// Tree capabilities the engine needs from a content representation.
///
/// The engine never looks at a concrete markup type. Templates, groups and
/// form aggregation are all expressed through these accessors, so any tree
/// that can hand out children, attributes and text can be repeated.
pub trait ContentNode: Clone {
  /// Lowercase tag name for elements, `None` for text and other leaves.
  fn tag(&self) -> Option<&str>;

  fn children(&self) -> &[Self];

  fn children_mut(&mut self) -> &mut [Self];

  /// Detach and return the child at `index`.
  fn remove_child(&mut self, index: usize) -> Option<Self>;

  /// Attribute names in source order. Empty for non-elements.
  fn attribute_names(&self) -> Vec<String>;

  fn attribute(&self, name: &str) -> Option<&str>;

  fn set_attribute(&mut self, name: &str, value: &str);

  fn remove_attribute(&mut self, name: &str);

  /// Text of a text node, `None` for everything else.
  fn text(&self) -> Option<&str>;

  fn set_text(&mut self, text: &str);

  fn is_element(&self) -> bool {
    self.tag().is_some()
  }

  fn has_tag(&self, tag: &str) -> bool {
    self.tag().is_some_and(|t| t.eq_ignore_ascii_case(tag))
  }

  fn has_attribute(&self, name: &str) -> bool {
    self.attribute(name).is_some()
  }
}

pub(crate) fn is_label_like<N: ContentNode>(node: &N) -> bool {
  node.has_tag("label") || node.has_tag("legend")
}

/// Visit every rewritable string below and including `node`: each attribute
/// value of every element, and each text node sitting directly inside a
/// `label` or `legend`. `rewrite` returns the replacement, or `None` to leave
/// the string alone.
pub fn rewrite_strings<N, F>(node: &mut N, rewrite: &mut F)
where
  N: ContentNode,
  F: FnMut(&str) -> Option<String>,
{
  rewrite_node(node, false, rewrite);
}

fn rewrite_node<N, F>(node: &mut N, in_label: bool, rewrite: &mut F)
where
  N: ContentNode,
  F: FnMut(&str) -> Option<String>,
{
  if node.is_element() {
    for name in node.attribute_names() {
      if let Some(value) = node.attribute(&name) {
        if let Some(replacement) = rewrite(value) {
          node.set_attribute(&name, &replacement);
        }
      }
    }
    let label = is_label_like(node);
    for child in node.children_mut() {
      rewrite_node(child, label, rewrite);
    }
  } else if in_label {
    if let Some(text) = node.text() {
      if let Some(replacement) = rewrite(text) {
        node.set_text(&replacement);
      }
    }
  }
}

/// Concatenated text of every text node below `node`, in document order.
pub fn text_content<N: ContentNode>(node: &N) -> String {
  let mut out = String::new();
  collect_text(node, &mut out);
  out
}

fn collect_text<N: ContentNode>(node: &N, out: &mut String) {
  if let Some(text) = node.text() {
    out.push_str(text);
  }
  for child in node.children() {
    collect_text(child, out);
  }
}

/// Trimmed text of the first `label` or `legend` in document order,
/// skipping ones that hold only whitespace.
pub fn first_label_text<N: ContentNode>(node: &N) -> Option<String> {
  if is_label_like(node) {
    let text = text_content(node);
    let trimmed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if !trimmed.is_empty() {
      return Some(trimmed);
    }
  }
  node.children().iter().find_map(first_label_text)
}

/// Element children only; whitespace text and comments are not content.
pub fn element_children<N: ContentNode>(node: &N) -> impl Iterator<Item = &N> {
  node.children().iter().filter(|child| child.is_element())
}
