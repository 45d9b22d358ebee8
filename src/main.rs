//! Top Level Environment

use anyhow::{anyhow, Result};

use regcolor::{
  args::{self, AllocatorConfig, Config},
  emit,
  regalloc::{allocate_blocks, AllocationResult, LivenessInput},
};

fn main() {
  let cfg = match args::parse_args() {
    Ok(cfg) => cfg,
    Err(e) => {
      eprintln!("{}", e);
      std::process::exit(1);
    }
  };

  let default_filter = if cfg.verbose { "debug" } else { "warn" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
    .target(env_logger::Target::Stderr)
    .format_timestamp(None)
    .init();

  if let Err(e) = run(&cfg) {
    eprintln!("{:#}", e);
    std::process::exit(1);
  }
}

fn run(cfg: &Config) -> Result<()> {
  let config = AllocatorConfig::resolve(cfg)?;
  let palette = config.palette()?;
  log::info!(
    "palette {}, tie-break {}",
    palette,
    config.tie_break.as_ref()
  );

  let file = cfg
    .file
    .as_deref()
    .ok_or_else(|| anyhow!("Expected file input"))?;
  let input = LivenessInput::from_file(file)?;

  let (igraph, result) = allocate_blocks(&input.blocks, &palette, config.tie_break)?;

  if cfg.dump_graph {
    print!("{}", emit::dump_graph(&igraph));
  }

  if let AllocationResult::Allocated(allocation) = &result {
    let conflicts = allocation.conflicts(&igraph);
    if !conflicts.is_empty() {
      return Err(anyhow!(
        "internal error: interfering values share a register: {:?}",
        conflicts
      ));
    }
  }

  print!("{}", emit::render(cfg.emit, &igraph, &result));
  if cfg.emit == args::EmitTarget::Json {
    println!();
  }

  Ok(())
}
