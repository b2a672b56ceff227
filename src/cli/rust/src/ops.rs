/* src/cli/rust/src/ops.rs */

// Scripted interactions applied in order before output, one per `--op`.

use anyhow::{bail, Context, Result};
use repeater_engine::{GroupId, Markup, Repeater};
use repeater_render::{dispatch, Action};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
  /// Activate an affordance, the way a click would
  Action(Action),
  Input { group: GroupId, name: String, value: String },
  Check { group: GroupId, name: String, checked: bool },
  /// Select one radio of a same-named set
  Radio { group: GroupId, name: String, value: String },
  Files { group: GroupId, name: String, files: Vec<String> },
  Reset,
  Disable,
  Enable,
  Attr { name: String, value: String },
}

fn parse_group(raw: &str, op: &str) -> Result<GroupId> {
  let id = raw.parse::<u64>().with_context(|| format!("invalid group id `{raw}` in `{op}`"))?;
  Ok(GroupId(id))
}

/// Split `<id>:<name>` off the front of an op body.
fn group_and_name<'a>(body: &'a str, op: &str) -> Result<(GroupId, &'a str)> {
  let (id, name) = body.split_once(':').with_context(|| format!("expected <id>:<name> in `{op}`"))?;
  Ok((parse_group(id, op)?, name))
}

fn assignment<'a>(body: &'a str, op: &str) -> Result<(GroupId, &'a str, &'a str)> {
  let (id, rest) = body.split_once(':').with_context(|| format!("expected <id>:<name>=<value> in `{op}`"))?;
  let (name, value) =
    rest.split_once('=').with_context(|| format!("expected <id>:<name>=<value> in `{op}`"))?;
  Ok((parse_group(id, op)?, name, value))
}

impl Op {
  pub fn parse(raw: &str) -> Result<Self> {
    let (verb, body) = raw.split_once(':').unwrap_or((raw, ""));
    let op = match verb {
      "add" | "remove" => Self::Action(Action::parse(raw)?),
      "input" => {
        let (group, name, value) = assignment(body, raw)?;
        Self::Input { group, name: name.to_string(), value: value.to_string() }
      }
      "check" | "uncheck" => {
        let (group, name) = group_and_name(body, raw)?;
        Self::Check { group, name: name.to_string(), checked: verb == "check" }
      }
      "radio" => {
        let (group, name, value) = assignment(body, raw)?;
        Self::Radio { group, name: name.to_string(), value: value.to_string() }
      }
      "file" => {
        let (group, name, list) = assignment(body, raw)?;
        let files = list.split(',').filter(|f| !f.is_empty()).map(str::to_string).collect();
        Self::Files { group, name: name.to_string(), files }
      }
      "reset" => Self::Reset,
      "disable" => Self::Disable,
      "enable" => Self::Enable,
      "attr" => {
        let (name, value) =
          body.split_once('=').with_context(|| format!("expected attr:<name>=<value>, got `{raw}`"))?;
        Self::Attr { name: name.to_string(), value: value.to_string() }
      }
      _ => bail!("unknown op `{raw}`"),
    };
    Ok(op)
  }

  pub fn apply(&self, repeater: &mut Repeater<Markup>) -> Result<()> {
    match self {
      Self::Action(action) => {
        if !dispatch(repeater, *action) {
          tracing::info!(%action, "action had no effect");
        }
      }
      Self::Input { group, name, value } => repeater.set_field_value(*group, name, value)?,
      Self::Check { group, name, checked } => repeater.set_field_checked(*group, name, *checked)?,
      Self::Radio { group, name, value } => repeater.select_radio(*group, name, value)?,
      Self::Files { group, name, files } => repeater.set_field_files(*group, name, files.clone())?,
      Self::Reset => repeater.reset(),
      Self::Disable => repeater.set_disabled(true),
      Self::Enable => repeater.set_disabled(false),
      Self::Attr { name, value } => {
        if !repeater.set_attribute(name, value) {
          bail!("unknown attribute `{name}`");
        }
      }
    }
    Ok(())
  }
}
