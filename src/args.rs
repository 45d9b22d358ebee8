//! Parse command line arguments and the allocator configuration file.
//! A hand-rolled parser is plenty for this handful of flags.

use std::env;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::{
  regalloc::TieBreak,
  registers::{consts::DEFAULT_REGISTERS, Palette},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum EmitTarget {
  Text,
  Json,
  Dot,
}

impl EmitTarget {
  fn parse(name: &str) -> Result<Self> {
    match name {
      "text" => Ok(EmitTarget::Text),
      "json" => Ok(EmitTarget::Json),
      "dot" => Ok(EmitTarget::Dot),
      other => Err(anyhow!("Unknown emit type: {}", other)),
    }
  }
}

fn parse_tie_break(name: &str) -> Result<TieBreak> {
  match name {
    "lowest-degree" => Ok(TieBreak::LowestDegree),
    "lowest-value" => Ok(TieBreak::LowestValue),
    other => Err(anyhow!("Unknown tie-break policy: {}", other)),
  }
}

/// Configuration options for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub verbose: bool,
  pub dump_graph: bool,
  pub emit: EmitTarget,

  pub config_file: Option<String>,
  pub num_registers: Option<usize>,
  pub palette: Option<Vec<String>>,
  pub tie_break: Option<TieBreak>,
  pub file: Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      verbose: false,    // Debug logging
      dump_graph: false, // Print the interference graph before coloring
      emit: EmitTarget::Text,

      config_file: None,   // TOML allocator configuration
      num_registers: None, // Palette R1..Rn
      palette: None,       // Explicit register names
      tie_break: None,     // Simplify order
      file: None,          // Liveness input (JSON)
    }
  }
}

/// Allocator settings read from a TOML file.
///
/// ```toml
/// registers = ["R1", "R2", "R3", "R4"]
/// tie_break = "lowest-degree"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocatorConfig {
  pub registers: Vec<String>,
  pub tie_break: TieBreak,
}

impl Default for AllocatorConfig {
  fn default() -> Self {
    AllocatorConfig {
      registers: DEFAULT_REGISTERS.iter().map(|r| r.to_string()).collect(),
      tie_break: TieBreak::default(),
    }
  }
}

impl AllocatorConfig {
  pub fn from_toml(src: &str) -> Result<Self> {
    toml::from_str(src).context("invalid allocator configuration")
  }

  pub fn from_file(path: &str) -> Result<Self> {
    let src = std::fs::read_to_string(path)
      .with_context(|| format!("cannot read config file {}", path))?;
    Self::from_toml(&src).with_context(|| format!("while loading {}", path))
  }

  /// Config file (if any), then command line overrides.
  pub fn resolve(cfg: &Config) -> Result<Self> {
    let mut config = match &cfg.config_file {
      Some(path) => Self::from_file(path)?,
      None => Self::default(),
    };

    if let Some(names) = &cfg.palette {
      config.registers = names.clone();
    } else if let Some(k) = cfg.num_registers {
      config.registers = Palette::with_size(k)?.iter().map(|r| r.to_string()).collect();
    }

    if let Some(tie_break) = cfg.tie_break {
      config.tie_break = tie_break;
    }

    Ok(config)
  }

  pub fn palette(&self) -> Result<Palette> {
    Ok(Palette::from_names(self.registers.iter().cloned())?)
  }
}

/// Value of a flag that takes the next space-delimited token.
fn operand<'a>(args: &'a [String], index: usize, flag: &str) -> Result<&'a String> {
  args
    .get(index + 1)
    .ok_or_else(|| anyhow!("Expected a value after {}", flag))
}

/// Parses command line input into a configuration.
pub fn parse_args() -> Result<Config> {
  parse_args_from(env::args().skip(1))
}

pub fn parse_args_from<I, S>(args: I) -> Result<Config>
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  let args = args.into_iter().map(Into::into).collect::<Vec<String>>();
  let mut config = Config::default();
  let mut index = 0;

  while index < args.len() {
    match args[index].as_str() {
      "-v" | "--verbose" => config.verbose = true,
      "--dump-graph" => config.dump_graph = true,
      "-e" | "--emit" => {
        config.emit = EmitTarget::parse(operand(&args, index, "--emit")?)?;
        index += 1;
      }
      // Allow the emit type glued to the flag.
      "-etext" => config.emit = EmitTarget::Text,
      "-ejson" => config.emit = EmitTarget::Json,
      "-edot" => config.emit = EmitTarget::Dot,
      "-c" | "--config" => {
        config.config_file = Some(operand(&args, index, "--config")?.clone());
        index += 1;
      }
      "-k" | "--registers" => {
        let k = operand(&args, index, "--registers")?;
        config.num_registers = Some(
          k.parse::<usize>()
            .with_context(|| format!("Invalid register count: {}", k))?,
        );
        index += 1;
      }
      "--palette" => {
        let names = operand(&args, index, "--palette")?
          .split(',')
          .map(str::trim)
          .filter(|name| !name.is_empty())
          .map(String::from)
          .collect();
        config.palette = Some(names);
        index += 1;
      }
      "--tie-break" => {
        config.tie_break = Some(parse_tie_break(operand(&args, index, "--tie-break")?)?);
        index += 1;
      }
      flag if flag.starts_with('-') => return Err(anyhow!("Unknown option: {}", flag)),
      file => {
        if let Some(previous) = &config.file {
          return Err(anyhow!("Unexpected input {} after {}", file, previous));
        }
        config.file = Some(file.to_string());
      }
    };
    index += 1;
  }

  if config.file.is_none() {
    return Err(anyhow!("Expected file input"));
  }

  Ok(config)
}
