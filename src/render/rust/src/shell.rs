/* src/render/rust/src/shell.rs */

use repeater_engine::form::disabled_view;
use repeater_engine::markup::{escape_attr, escape_text};
use repeater_engine::{GroupRegion, Markup, RegionPlan, Repeater};

use crate::action::Action;
use crate::styles::AdoptedStyles;

pub const PART_GROUPS: &str = "groups";
pub const PART_GROUP: &str = "group";
pub const PART_REMOVE_BUTTON: &str = "remove-button";
pub const PART_ADD_BUTTON: &str = "add-button";

/// Draw the whole component: styles, one region per group with its remove
/// affordance, then the add affordance. Affordances the current count does
/// not allow are left out entirely.
pub fn render_shell(repeater: &Repeater<Markup>, styles: &AdoptedStyles) -> String {
  let plan = repeater.regions();
  let mut out = String::new();
  out.push_str("<style>");
  out.push_str(&styles.css());
  out.push_str("</style>");

  out.push_str(&format!("<div part=\"{PART_GROUPS}\">"));
  for (region, group) in plan.groups.iter().zip(repeater.groups()) {
    let html =
      if plan.disabled { disabled_view(group.element()).to_html() } else { group.element().to_html() };
    push_region(&mut out, &plan, region, &html);
  }
  out.push_str("</div>");

  if plan.can_add {
    push_button(&mut out, PART_ADD_BUTTON, Action::Add, &plan.add_label, None, plan.disabled);
  }
  out
}

fn push_region(out: &mut String, plan: &RegionPlan, region: &GroupRegion, html: &str) {
  out.push_str(&format!("<div part=\"{PART_GROUP}\" data-group-id=\"{}\">", region.id));
  out.push_str(html);
  if region.can_remove {
    push_button(
      out,
      PART_REMOVE_BUTTON,
      Action::Remove(region.id),
      &plan.remove_label,
      Some(region.remove_label.as_str()),
      plan.disabled,
    );
  }
  out.push_str("</div>");
}

fn push_button(
  out: &mut String,
  part: &str,
  action: Action,
  label: &str,
  aria_label: Option<&str>,
  disabled: bool,
) {
  out.push_str(&format!("<button type=\"button\" part=\"{part}\" data-action=\"{action}\""));
  if let Some(aria) = aria_label {
    out.push_str(&format!(" aria-label=\"{}\"", escape_attr(aria)));
  }
  if disabled {
    out.push_str(" disabled");
  }
  out.push('>');
  out.push_str(&escape_text(label));
  out.push_str("</button>");
}

#[cfg(test)]
mod tests {
  use super::*;
  use repeater_engine::RepeaterAttributes;

  const ROW: &str = r#"<template><div class="row"><label for="f-{n}">Field {n}</label><input id="f-{n}" name="f-{n}"></div></template>"#;

  fn repeater(attrs: &[(&str, &str)]) -> Repeater<Markup> {
    Repeater::prepare(Markup::parse_root(ROW))
      .connect(RepeaterAttributes::from_pairs(attrs.iter().copied()))
  }

  fn groups_part(html: &str) -> &str {
    let start = html.find("<div part=\"groups\">").unwrap();
    &html[start..]
  }

  #[test]
  fn single_group_at_min_has_no_remove_button() {
    let html = render_shell(&repeater(&[]), &AdoptedStyles::default());
    assert_eq!(
      groups_part(&html),
      concat!(
        r#"<div part="groups"><div part="group" data-group-id="1">"#,
        r#"<div class="row"><label for="f-1">Field 1</label><input id="f-1" name="f-1"></div>"#,
        r#"</div></div>"#,
        r#"<button type="button" part="add-button" data-action="add">Add Another</button>"#,
      )
    );
  }

  #[test]
  fn removable_groups_get_labelled_buttons() {
    let mut r = repeater(&[("remove-label", "Drop")]);
    r.add();
    let html = render_shell(&r, &AdoptedStyles::default());
    assert!(html.contains(
      r#"<button type="button" part="remove-button" data-action="remove:2" aria-label="Drop Field 2">Drop</button>"#
    ));
    assert_eq!(html.matches("part=\"remove-button\"").count(), 2);
  }

  #[test]
  fn add_button_is_omitted_at_max() {
    let mut r = repeater(&[("max", "2"), ("add-label", "More <rows>")]);
    let before = render_shell(&r, &AdoptedStyles::default());
    assert!(before.contains(">More &lt;rows&gt;</button>"));
    r.add();
    let after = render_shell(&r, &AdoptedStyles::default());
    assert!(!after.contains(r#"data-action="add""#));
  }

  #[test]
  fn disabled_component_marks_controls_and_affordances() {
    let mut r = repeater(&[]);
    r.add();
    r.set_disabled(true);
    let html = render_shell(&r, &AdoptedStyles::default());
    assert!(html.contains(r#"<input id="f-1" name="f-1" disabled="">"#));
    assert!(html.contains(r#"data-action="add" disabled>"#));
    assert!(html.contains(r#"data-action="remove:1" aria-label="Remove Field 1" disabled>"#));
    // The engine's own tree is untouched
    assert!(!r.groups().iter().any(|g| g.element().to_html().contains("disabled")));
  }

  #[test]
  fn adopted_sheets_follow_base_styles() {
    let styles = AdoptedStyles::new(vec!["input{width:100%}".to_string()]);
    let html = render_shell(&repeater(&[]), &styles);
    assert!(html.starts_with("<style>"));
    assert!(html.contains("input{width:100%}</style>"));
  }
}
