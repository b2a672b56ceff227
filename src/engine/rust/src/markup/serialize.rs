/* src/engine/rust/src/markup/serialize.rs */

use super::parser::VOID_TAGS;
use super::Markup;

const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Serialize nodes back to HTML. Well-formed fragments round-trip through
/// [`super::parse_fragment`] unchanged, modulo entity spelling.
pub fn serialize(nodes: &[Markup]) -> String {
  let mut out = String::new();
  for node in nodes {
    serialize_node(node, false, &mut out);
  }
  out
}

fn serialize_node(node: &Markup, raw: bool, out: &mut String) {
  match node {
    Markup::Element(el) => {
      out.push('<');
      out.push_str(&el.tag);
      for attr in &el.attrs {
        out.push(' ');
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
          out.push_str("=\"");
          out.push_str(&escape_attr(value));
          out.push('"');
        }
      }
      if el.self_closing {
        out.push_str("/>");
        return;
      }
      out.push('>');
      if VOID_TAGS.contains(&el.tag.as_str()) {
        return;
      }
      let raw = RAW_TEXT_TAGS.contains(&el.tag.as_str());
      for child in &el.children {
        serialize_node(child, raw, out);
      }
      out.push_str("</");
      out.push_str(&el.tag);
      out.push('>');
    }
    Markup::Text(text) if raw => out.push_str(text),
    Markup::Text(text) => out.push_str(&escape_text(text)),
    Markup::Comment(content) => {
      out.push_str("<!--");
      out.push_str(content);
      out.push_str("-->");
    }
  }
}

pub fn escape_text(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      _ => out.push(c),
    }
  }
  out
}

pub fn escape_attr(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '"' => out.push_str("&quot;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      _ => out.push(c),
    }
  }
  out
}
