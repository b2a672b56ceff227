/* src/cli/rust/src/main.rs */

mod config;
mod ops;
mod report;
mod ui;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use repeater_engine::{Markup, Repeater, RepeaterAttributes};
use repeater_render::{adopted_styles, render_shell, AdoptedStyles};
use tracing_subscriber::EnvFilter;

use config::{merge_attributes, parse_attr_flags, resolve_config, RepeaterConfig};
use ops::Op;

#[derive(Parser)]
#[command(name = "repeater", about = "Repeatable field group CLI", version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Render the component shell as HTML
  Render {
    #[command(flatten)]
    input: InputArgs,
    /// Extra stylesheet file to adopt (repeatable, after config stylesheets)
    #[arg(long = "stylesheet", value_name = "CSS")]
    stylesheets: Vec<PathBuf>,
  },
  /// Run ops and print a JSON report of groups, value, events and diagnostics
  Run {
    #[command(flatten)]
    input: InputArgs,
  },
}

#[derive(Args)]
struct InputArgs {
  /// HTML fragment holding the component content (`-` for stdin)
  fragment: PathBuf,
  /// Path to repeater.toml (auto-detected if omitted)
  #[arg(short, long)]
  config: Option<PathBuf>,
  /// Attribute override, e.g. `--attr max=4` (repeatable)
  #[arg(short, long = "attr", value_name = "NAME=VALUE")]
  attrs: Vec<String>,
  /// Interaction to apply before output, e.g. `add`, `remove:2`,
  /// `input:1:name=value` (repeatable, applied in order)
  #[arg(long = "op", value_name = "OP")]
  ops: Vec<String>,
}

fn read_fragment(path: &Path) -> Result<String> {
  if path.as_os_str() == "-" {
    let mut html = String::new();
    std::io::stdin().read_to_string(&mut html).context("failed to read fragment from stdin")?;
    return Ok(html);
  }
  std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Load content and configuration, connect, and apply every op.
fn prepare(input: &InputArgs) -> Result<(Repeater<Markup>, RepeaterConfig, Option<PathBuf>)> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let (config_path, config) = resolve_config(input.config.as_deref(), &cwd)?;
  if let Some(path) = &config_path {
    ui::arrow(&format!("config {}", path.display()));
  }
  let flags = parse_attr_flags(&input.attrs)?;
  let attributes: RepeaterAttributes = merge_attributes(&config.repeater, &flags)?;
  let ops = input.ops.iter().map(|raw| Op::parse(raw)).collect::<Result<Vec<_>>>()?;

  let html = read_fragment(&input.fragment)?;
  let mut repeater = Repeater::prepare(Markup::parse_root(&html)).connect(attributes);
  for op in &ops {
    op.apply(&mut repeater)?;
  }
  Ok((repeater, config, config_path))
}

fn load_styles(config: &RepeaterConfig, config_path: Option<&Path>, extra: &[PathBuf]) -> Result<AdoptedStyles> {
  let base = config_path.and_then(Path::parent).unwrap_or_else(|| Path::new("."));
  let files = config.render.stylesheets.iter().map(|s| base.join(s)).chain(extra.iter().cloned());
  let sheets = files
    .map(|path| {
      std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
    })
    .collect::<Result<Vec<_>>>()?;
  Ok(AdoptedStyles::new(sheets))
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  match cli.command {
    Command::Render { input, stylesheets } => {
      ui::banner("render");
      let (repeater, config, config_path) = prepare(&input)?;
      let sheets = load_styles(&config, config_path.as_deref(), &stylesheets)?;
      let styles = adopted_styles(|| sheets);
      println!("{}", render_shell(&repeater, &styles));
      ui::ok(&format!("{} groups", repeater.len()));
    }
    Command::Run { input } => {
      ui::banner("run");
      let (mut repeater, _, _) = prepare(&input)?;
      let report = report::Report::collect(&mut repeater);
      let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
      println!("{json}");
      if report.diagnostics.is_empty() {
        ui::ok(&format!("{} groups, {} events", repeater.len(), report.events.len()));
      } else {
        ui::fail(&format!("{} diagnostics", report.diagnostics.len()));
      }
    }
  }
  Ok(())
}
