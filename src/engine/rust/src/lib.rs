/* src/engine/rust/src/lib.rs */

//! Repeatable field groups: turn one authored group into a numbered
//! template, keep a bounded, sequentially numbered collection of groups,
//! and reduce them to a single form value.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod form;
pub mod group;
pub mod markup;
pub mod node;
pub mod pattern;
pub mod repeater;
pub mod template;

pub use config::{Limits, RepeaterAttributes, ResolvedConfig};
pub use diagnostics::{Diagnostic, DiagnosticKind, Level};
pub use error::{RepeaterError, Result};
pub use event::{GroupSnapshot, RepeaterEvent};
pub use form::{aggregate, FormControl, FormValue};
pub use group::{Group, GroupCollection, GroupId};
pub use markup::Markup;
pub use node::ContentNode;
pub use pattern::{match_number, NumberMatch};
pub use repeater::{GroupRegion, Prepared, RegionPlan, Repeater};
pub use template::{renumber, Template, TemplateSource, PLACEHOLDER};

#[cfg(test)]
mod tests;
