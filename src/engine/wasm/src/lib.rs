/* src/engine/wasm/src/lib.rs */

use repeater_engine::{GroupId, Markup, Repeater, RepeaterAttributes};
use repeater_render::{adopted_styles, dispatch, render_shell, reset_adopted_styles, Action, AdoptedStyles};
use wasm_bindgen::prelude::*;

// Group ids cross the boundary as JS numbers.
fn group_id(id: f64) -> GroupId {
  GroupId(id as u64)
}

/// One component instance owned by the JS host.
#[wasm_bindgen]
pub struct RepeaterHandle {
  inner: Repeater<Markup>,
}

#[wasm_bindgen]
impl RepeaterHandle {
  /// `attributes_json` is an object such as `{"min": 2, "add-label": "More"}`;
  /// empty or malformed input means no attributes.
  #[wasm_bindgen(constructor)]
  pub fn new(content_html: &str, attributes_json: &str) -> RepeaterHandle {
    let attributes: RepeaterAttributes = serde_json::from_str(attributes_json).unwrap_or_default();
    let inner = Repeater::prepare(Markup::parse_root(content_html)).connect(attributes);
    RepeaterHandle { inner }
  }

  pub fn add(&mut self) -> Option<f64> {
    self.inner.add().map(|id| id.0 as f64)
  }

  pub fn remove(&mut self, id: f64) -> bool {
    self.inner.remove(group_id(id))
  }

  /// Route an affordance's `data-action` back in. Unknown actions and
  /// actions on a disabled component do nothing.
  pub fn activate(&mut self, action: &str) -> bool {
    match Action::parse(action) {
      Ok(action) => dispatch(&mut self.inner, action),
      Err(_) => false,
    }
  }

  pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
    self.inner.set_attribute(name, value)
  }

  pub fn remove_attribute(&mut self, name: &str) -> bool {
    self.inner.remove_attribute(name)
  }

  pub fn set_field_value(&mut self, group: f64, name: &str, value: &str) -> bool {
    self.inner.set_field_value(group_id(group), name, value).is_ok()
  }

  pub fn set_field_checked(&mut self, group: f64, name: &str, checked: bool) -> bool {
    self.inner.set_field_checked(group_id(group), name, checked).is_ok()
  }

  pub fn select_radio(&mut self, group: f64, name: &str, value: &str) -> bool {
    self.inner.select_radio(group_id(group), name, value).is_ok()
  }

  /// `files_json` is an array of file names.
  pub fn set_field_files(&mut self, group: f64, name: &str, files_json: &str) -> bool {
    let files: Vec<String> = serde_json::from_str(files_json).unwrap_or_default();
    self.inner.set_field_files(group_id(group), name, files).is_ok()
  }

  pub fn reset(&mut self) {
    self.inner.reset();
  }

  pub fn set_disabled(&mut self, disabled: bool) {
    self.inner.set_disabled(disabled);
  }

  pub fn len(&self) -> usize {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  pub fn can_add(&self) -> bool {
    self.inner.can_add()
  }

  pub fn can_remove(&self) -> bool {
    self.inner.can_remove()
  }

  /// The aggregated value as `[[name, value], ...]`.
  pub fn value_json(&self) -> String {
    serde_json::to_string(self.inner.value()).unwrap_or_else(|_| "[]".to_string())
  }

  pub fn urlencoded(&self) -> String {
    self.inner.value().to_urlencoded()
  }

  pub fn regions_json(&self) -> String {
    serde_json::to_string(&self.inner.regions()).unwrap_or_else(|_| "null".to_string())
  }

  /// Shell HTML using the process-wide adopted styles.
  pub fn render(&self) -> String {
    let styles = adopted_styles(AdoptedStyles::default);
    render_shell(&self.inner, &styles)
  }

  pub fn drain_events_json(&mut self) -> String {
    serde_json::to_string(&self.inner.drain_events()).unwrap_or_else(|_| "[]".to_string())
  }

  pub fn drain_diagnostics_json(&mut self) -> String {
    serde_json::to_string(&self.inner.drain_diagnostics()).unwrap_or_else(|_| "[]".to_string())
  }
}

/// Replace the stylesheets adopted by every component. `sheets_json` is an
/// array of CSS strings.
#[wasm_bindgen]
pub fn adopt_stylesheets(sheets_json: &str) {
  let sheets: Vec<String> = serde_json::from_str(sheets_json).unwrap_or_default();
  reset_adopted_styles();
  adopted_styles(|| AdoptedStyles::new(sheets));
}
