/* src/engine/rust/src/error.rs */

use thiserror::Error;

use crate::group::GroupId;

pub type Result<T> = std::result::Result<T, RepeaterError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepeaterError {
  #[error("no template: content has neither a <template> nor an element to repeat")]
  TemplateMissing,

  #[error("template is empty: <template> has no element child")]
  TemplateEmpty,

  #[error("invalid {name} attribute {value:?}: {reason}")]
  InvalidAttribute { name: String, value: String, reason: String },

  #[error("no group with id {0}")]
  UnknownGroup(GroupId),

  #[error("group {group} has no control named {name:?}")]
  UnknownField { group: GroupId, name: String },
}
