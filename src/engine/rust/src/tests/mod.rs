/* src/engine/rust/src/tests/mod.rs */

use crate::{Markup, Repeater, RepeaterAttributes};

mod invariants;

/// Parse `html` as component content and connect it with `attrs`.
fn connect(html: &str, attrs: &[(&str, &str)]) -> Repeater<Markup> {
  Repeater::prepare(Markup::parse_root(html))
    .connect(RepeaterAttributes::from_pairs(attrs.iter().copied()))
}

/// Serialized markup of each group, in order.
fn group_html(repeater: &Repeater<Markup>) -> Vec<String> {
  repeater.groups().iter().map(|g| g.element().to_html()).collect()
}
