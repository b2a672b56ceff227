/* src/render/rust/src/styles.rs */

// Adopted stylesheets are shared by every component in the process, so they
// live in a single slot that is filled on first use and cleared on demand.

use std::sync::{Arc, Mutex, MutexGuard};

/// Layout rules every shell gets before any adopted sheet.
pub const BASE_STYLES: &str = "\
:host{display:block}\
[part=\"groups\"]{display:flex;flex-direction:column;gap:.5rem}\
[part=\"group\"]{display:flex;align-items:start;gap:.5rem}\
[part=\"add-button\"],[part=\"remove-button\"]{cursor:pointer}\
[disabled]{cursor:not-allowed}";

/// Stylesheets adopted into every rendered shell, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdoptedStyles {
  sheets: Vec<String>,
}

impl AdoptedStyles {
  pub fn new(sheets: Vec<String>) -> Self {
    Self { sheets }
  }

  pub fn sheets(&self) -> &[String] {
    &self.sheets
  }

  pub fn is_empty(&self) -> bool {
    self.sheets.is_empty()
  }

  /// Base rules followed by every sheet, ready for a `<style>` element.
  pub fn css(&self) -> String {
    let mut css = String::from(BASE_STYLES);
    for sheet in &self.sheets {
      css.push('\n');
      // `</` would close the style element early
      css.push_str(&sheet.replace("</", "<\\/"));
    }
    css
  }
}

static ADOPTED: Mutex<Option<Arc<AdoptedStyles>>> = Mutex::new(None);

fn slot() -> MutexGuard<'static, Option<Arc<AdoptedStyles>>> {
  // A panic inside a loader leaves the slot empty, never half-written
  ADOPTED.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// The process-wide adopted styles. `loader` runs only when the slot is
/// empty; later calls share the same instance until
/// [`reset_adopted_styles`].
pub fn adopted_styles<F>(loader: F) -> Arc<AdoptedStyles>
where
  F: FnOnce() -> AdoptedStyles,
{
  let mut slot = slot();
  if let Some(styles) = slot.as_ref() {
    return Arc::clone(styles);
  }
  let styles = Arc::new(loader());
  tracing::debug!(sheets = styles.sheets.len(), "adopted styles loaded");
  *slot = Some(Arc::clone(&styles));
  styles
}

/// Forget the process-wide styles so the next [`adopted_styles`] reloads.
pub fn reset_adopted_styles() {
  slot().take();
}
