/* src/cli/rust/src/report.rs */

use repeater_engine::{Diagnostic, FormValue, Markup, Repeater, RepeaterEvent};
use serde::Serialize;

/// Everything `repeater run` prints.
#[derive(Debug, Serialize)]
pub struct Report {
  /// Group markup only, without the shell
  pub html: String,
  pub value: FormValue,
  pub urlencoded: String,
  pub events: Vec<RepeaterEvent<Markup>>,
  pub diagnostics: Vec<Diagnostic>,
  pub can_add: bool,
  pub can_remove: bool,
}

impl Report {
  /// Snapshot the component, draining its queued events and diagnostics.
  pub fn collect(repeater: &mut Repeater<Markup>) -> Self {
    let html = repeater.groups().iter().map(|g| g.element().to_html()).collect::<String>();
    let value = repeater.value().clone();
    Self {
      html,
      urlencoded: value.to_urlencoded(),
      value,
      events: repeater.drain_events(),
      diagnostics: repeater.drain_diagnostics(),
      can_add: repeater.can_add(),
      can_remove: repeater.can_remove(),
    }
  }
}
