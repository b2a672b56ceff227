/* src/engine/rust/src/pattern.rs */

// Only the last run of digits in a string is ever treated as the sequence
// number. `section-2-field-1` numbers by its trailing `1`; the `2` is
// never touched by templating or renumbering.

use std::sync::OnceLock;

use regex::Regex;

fn trailing_number_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    // A digit run followed only by non-digits up to the end of input
    Regex::new(r"([0-9]+)[^0-9]*$").unwrap()
  })
}

/// A string split around its rightmost run of ASCII digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberMatch<'a> {
  pub prefix: &'a str,
  pub number: &'a str,
  pub suffix: &'a str,
}

impl NumberMatch<'_> {
  /// Rebuild the string with the digit run replaced by `replacement`.
  pub fn replace(&self, replacement: &str) -> String {
    let mut out = String::with_capacity(self.prefix.len() + replacement.len() + self.suffix.len());
    out.push_str(self.prefix);
    out.push_str(replacement);
    out.push_str(self.suffix);
    out
  }

  /// Numeric value of the run, `None` when it overflows `u64`.
  pub fn value(&self) -> Option<u64> {
    self.number.parse().ok()
  }
}

/// Find the rightmost maximal run of ASCII digits in `text`.
pub fn match_number(text: &str) -> Option<NumberMatch<'_>> {
  let caps = trailing_number_re().captures(text)?;
  let run = caps.get(1)?;
  Some(NumberMatch {
    prefix: &text[..run.start()],
    number: run.as_str(),
    suffix: &text[run.end()..],
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn splits_single_number() {
    let m = match_number("stop-12").unwrap();
    assert_eq!((m.prefix, m.number, m.suffix), ("stop-", "12", ""));
    assert_eq!(m.value(), Some(12));
  }

  #[test]
  fn takes_rightmost_run_only() {
    let m = match_number("section-2-field-1").unwrap();
    assert_eq!((m.prefix, m.number, m.suffix), ("section-2-field-", "1", ""));
  }

  #[test]
  fn keeps_suffix_after_number() {
    let m = match_number("items[3][name]").unwrap();
    assert_eq!((m.prefix, m.number, m.suffix), ("items[", "3", "][name]"));
  }

  #[test]
  fn run_is_maximal() {
    let m = match_number("a10b").unwrap();
    assert_eq!(m.number, "10");
    assert_eq!(m.prefix, "a");
  }

  #[test]
  fn no_digits_no_match() {
    assert_eq!(match_number("name"), None);
    assert_eq!(match_number(""), None);
  }

  #[test]
  fn non_ascii_digits_are_ignored() {
    assert_eq!(match_number("stop-\u{0663}"), None);
  }

  #[test]
  fn replace_preserves_surroundings() {
    let m = match_number("Stop 3 of many").unwrap();
    assert_eq!(m.replace("{n}"), "Stop {n} of many");
  }
}
