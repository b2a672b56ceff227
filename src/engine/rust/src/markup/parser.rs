/* src/engine/rust/src/markup/parser.rs */

use super::{Attribute, ControlState, Element, Markup};

/// Elements that never have children or a closing tag.
pub(super) const VOID_TAGS: &[&str] = &[
  "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
  "wbr",
];

/// Elements whose body is taken verbatim up to the matching close tag.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Like raw text, but entities are still decoded.
const RCDATA_TAGS: &[&str] = &["textarea", "title"];

/// Parse an HTML fragment into a list of nodes.
///
/// Never fails: unterminated tags and comments consume the rest of the
/// input, stray closing tags are dropped, and a closing tag for an outer
/// element implicitly closes everything opened inside it.
pub fn parse_fragment(html: &str) -> Vec<Markup> {
  let mut pos = 0;
  let mut open = Vec::new();
  parse_nodes(html, &mut pos, &mut open)
}

fn parse_nodes(html: &str, pos: &mut usize, open: &mut Vec<String>) -> Vec<Markup> {
  let bytes = html.as_bytes();
  let mut nodes = Vec::new();
  while *pos < bytes.len() {
    if bytes[*pos] == b'<' {
      if bytes[*pos..].starts_with(b"</") {
        let (name, end) = read_closing_tag(html, *pos);
        if open.last() == Some(&name) {
          *pos = end;
          return nodes;
        }
        if open.contains(&name) {
          // Leave it for the ancestor it belongs to
          return nodes;
        }
        *pos = end;
        continue;
      }

      if bytes[*pos..].starts_with(b"<!--") {
        nodes.push(parse_comment(html, pos));
        continue;
      }

      if bytes.get(*pos + 1).is_some_and(u8::is_ascii_alphabetic) {
        nodes.push(parse_element(html, pos, open));
        continue;
      }
    }

    // Text node; a '<' that does not open a tag is plain text
    let start = *pos;
    *pos += 1;
    while *pos < bytes.len() && bytes[*pos] != b'<' {
      *pos += 1;
    }
    nodes.push(Markup::Text(decode_entities(&html[start..*pos])));
  }
  nodes
}

/// Returns the lowercase tag name and the offset just past the closing `>`.
fn read_closing_tag(html: &str, start: usize) -> (String, usize) {
  let bytes = html.as_bytes();
  let name_start = start + 2;
  let mut pos = name_start;
  while pos < bytes.len() && bytes[pos] != b'>' && !bytes[pos].is_ascii_whitespace() {
    pos += 1;
  }
  let name = html[name_start..pos].to_ascii_lowercase();
  while pos < bytes.len() && bytes[pos] != b'>' {
    pos += 1;
  }
  (name, (pos + 1).min(bytes.len()))
}

fn parse_comment(html: &str, pos: &mut usize) -> Markup {
  // Skip "<!--"
  *pos += 4;
  let start = *pos;
  match html[start..].find("-->") {
    Some(offset) => {
      *pos = start + offset + 3;
      Markup::Comment(html[start..start + offset].to_string())
    }
    None => {
      // Unterminated comment: consume the rest
      *pos = html.len();
      Markup::Comment(html[start..].to_string())
    }
  }
}

fn parse_element(html: &str, pos: &mut usize, open: &mut Vec<String>) -> Markup {
  let bytes = html.as_bytes();
  // Skip '<'
  *pos += 1;
  let tag_start = *pos;
  while *pos < bytes.len()
    && !bytes[*pos].is_ascii_whitespace()
    && bytes[*pos] != b'>'
    && bytes[*pos] != b'/'
  {
    *pos += 1;
  }
  let tag = html[tag_start..*pos].to_ascii_lowercase();

  let mut attrs = Vec::new();
  let mut self_closing = false;
  let mut terminated = false;
  while *pos < bytes.len() {
    match bytes[*pos] {
      b if b.is_ascii_whitespace() => *pos += 1,
      b'>' => {
        *pos += 1;
        terminated = true;
        break;
      }
      b'/' if bytes.get(*pos + 1) == Some(&b'>') => {
        *pos += 2;
        self_closing = true;
        terminated = true;
        break;
      }
      b'/' => *pos += 1,
      _ => match parse_attribute(html, pos) {
        // A repeated attribute keeps its first value
        Some(attr) if attrs.iter().any(|a: &Attribute| a.name == attr.name) => {}
        Some(attr) => attrs.push(attr),
        None => *pos += 1,
      },
    }
  }

  let mut el = Element { tag, attrs, children: Vec::new(), self_closing, state: ControlState::default() };
  if !terminated || self_closing || VOID_TAGS.contains(&el.tag.as_str()) {
    return Markup::Element(el);
  }

  if RAW_TEXT_TAGS.contains(&el.tag.as_str()) || RCDATA_TAGS.contains(&el.tag.as_str()) {
    let body = read_raw_body(html, pos, &el.tag);
    if !body.is_empty() {
      let text =
        if RCDATA_TAGS.contains(&el.tag.as_str()) { decode_entities(body) } else { body.to_string() };
      el.children.push(Markup::Text(text));
    }
    return Markup::Element(el);
  }

  open.push(el.tag.clone());
  el.children = parse_nodes(html, pos, open);
  open.pop();
  Markup::Element(el)
}

fn parse_attribute(html: &str, pos: &mut usize) -> Option<Attribute> {
  let bytes = html.as_bytes();
  let name_start = *pos;
  while *pos < bytes.len()
    && !bytes[*pos].is_ascii_whitespace()
    && !matches!(bytes[*pos], b'=' | b'>' | b'/')
  {
    *pos += 1;
  }
  if *pos == name_start {
    return None;
  }
  let name = html[name_start..*pos].to_ascii_lowercase();

  let mut look = *pos;
  while look < bytes.len() && bytes[look].is_ascii_whitespace() {
    look += 1;
  }
  if bytes.get(look) != Some(&b'=') {
    return Some(Attribute { name, value: None });
  }
  *pos = look + 1;
  while *pos < bytes.len() && bytes[*pos].is_ascii_whitespace() {
    *pos += 1;
  }

  let value = match bytes.get(*pos) {
    Some(&quote) if quote == b'"' || quote == b'\'' => {
      let start = *pos + 1;
      let end = html[start..].find(quote as char).map_or(html.len(), |i| start + i);
      *pos = (end + 1).min(html.len());
      &html[start..end]
    }
    _ => {
      let start = *pos;
      while *pos < bytes.len() && !bytes[*pos].is_ascii_whitespace() && bytes[*pos] != b'>' {
        *pos += 1;
      }
      &html[start..*pos]
    }
  };
  Some(Attribute { name, value: Some(decode_entities(value)) })
}

/// Body of a raw-text element up to its close tag, which is consumed.
fn read_raw_body<'a>(html: &'a str, pos: &mut usize, tag: &str) -> &'a str {
  let start = *pos;
  let close = format!("</{tag}");
  let end = html[start..].to_ascii_lowercase().find(&close).map_or(html.len(), |i| start + i);
  *pos = end;
  if end < html.len() {
    let (_, after) = read_closing_tag(html, end);
    *pos = after;
  }
  &html[start..end]
}

/// Decode the handful of character references a fragment author is likely
/// to write. Unknown references are kept literally.
pub(super) fn decode_entities(text: &str) -> String {
  if !text.contains('&') {
    return text.to_string();
  }
  let mut out = String::with_capacity(text.len());
  let mut rest = text;
  while let Some(amp) = rest.find('&') {
    out.push_str(&rest[..amp]);
    rest = &rest[amp..];
    let decoded = rest
      .find(';')
      .filter(|&semi| semi <= 10)
      .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi)));
    match decoded {
      Some((c, semi)) => {
        out.push(c);
        rest = &rest[semi + 1..];
      }
      None => {
        out.push('&');
        rest = &rest[1..];
      }
    }
  }
  out.push_str(rest);
  out
}

fn decode_reference(name: &str) -> Option<char> {
  match name {
    "amp" => Some('&'),
    "lt" => Some('<'),
    "gt" => Some('>'),
    "quot" => Some('"'),
    "apos" => Some('\''),
    "nbsp" => Some('\u{a0}'),
    _ => {
      let numeric = name.strip_prefix('#')?;
      let code = match numeric.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => numeric.parse().ok()?,
      };
      char::from_u32(code)
    }
  }
}
