/* src/engine/rust/src/tests/invariants.rs */

use proptest::prelude::*;

use super::*;
use crate::template::displayed_number;
use crate::{match_number, renumber, ContentNode, GroupId};

const ROW: &str = r#"<template><fieldset><legend>Row {n}</legend><input name="row[{n}][x]" id="x-{n}"></fieldset></template>"#;

#[derive(Debug, Clone)]
enum Op {
  Add,
  /// Index into the current ids, wrapped
  Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
  prop_oneof![Just(Op::Add), (0usize..8).prop_map(Op::Remove)]
}

fn apply(repeater: &mut Repeater<Markup>, op: &Op) {
  match op {
    Op::Add => {
      repeater.add();
    }
    Op::Remove(index) => {
      let ids = repeater.groups().ids();
      if !ids.is_empty() {
        repeater.remove(ids[index % ids.len()]);
      }
    }
  }
}

proptest! {
  #[test]
  fn groups_stay_numbered_in_order(ops in prop::collection::vec(op(), 0..40)) {
    let mut repeater = connect(ROW, &[]);
    for op in &ops {
      apply(&mut repeater, op);
      for (index, group) in repeater.groups().iter().enumerate() {
        prop_assert_eq!(group.number(), index + 1);
        prop_assert_eq!(displayed_number(group.element()), Some(index as u64 + 1));
      }
    }
  }

  #[test]
  fn count_stays_within_limits(
    min in 1usize..4,
    extra in 1usize..5,
    ops in prop::collection::vec(op(), 0..40),
  ) {
    let max = min + extra;
    let (min_attr, max_attr) = (min.to_string(), max.to_string());
    let mut repeater = connect(ROW, &[("min", min_attr.as_str()), ("max", max_attr.as_str())]);
    prop_assert_eq!(repeater.len(), min);
    for op in &ops {
      apply(&mut repeater, op);
      prop_assert!(repeater.len() >= min && repeater.len() <= max);
    }
  }

  #[test]
  fn ids_are_never_reused(ops in prop::collection::vec(op(), 0..40)) {
    let mut repeater = connect(ROW, &[]);
    let mut seen: Vec<GroupId> = repeater.groups().ids();
    for op in &ops {
      apply(&mut repeater, op);
      if let Some(id) = repeater.add() {
        prop_assert!(!seen.contains(&id));
        seen.push(id);
      }
    }
  }

  #[test]
  fn events_track_the_count(ops in prop::collection::vec(op(), 0..40)) {
    let mut repeater = connect(ROW, &[]);
    for op in &ops {
      let before = repeater.len();
      apply(&mut repeater, op);
      let events = repeater.drain_events();
      prop_assert!(events.len() <= 1);
      if let Some(event) = events.first() {
        prop_assert_eq!(event.count(), repeater.len());
        prop_assert_ne!(before, repeater.len());
      } else {
        prop_assert_eq!(before, repeater.len());
      }
    }
  }

  #[test]
  fn renumber_is_idempotent(first in 1usize..500, second in 1usize..500) {
    let mut node = Markup::parse_root(ROW);
    let template = crate::Template::extract(&mut node).unwrap();
    let mut once = template.fill(first);
    renumber(&mut once, second);
    let mut twice = once.clone();
    renumber(&mut twice, second);
    prop_assert_eq!(once.to_html(), twice.to_html());
    prop_assert_eq!(displayed_number(&once), Some(second as u64));
  }

  #[test]
  fn filled_marker_reads_back(n in 1usize..100_000) {
    let mut node = Markup::parse_root(ROW);
    let template = crate::Template::extract(&mut node).unwrap();
    let filled = template.fill(n);
    prop_assert_eq!(displayed_number(&filled), Some(n as u64));

    let name = filled.children()[1].attribute("name").unwrap();
    let found = match_number(name).unwrap();
    prop_assert_eq!(found.prefix, "row[");
    prop_assert_eq!(found.value(), Some(n as u64));
    prop_assert_eq!(found.suffix, "][x]");
  }
}
