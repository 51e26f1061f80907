use std::{fs, path::Path, thread, time::Duration};

use anyhow::{Context, Result};
use clap_serde_derive::{clap::Parser, ClapSerde};
use life_lib::{agent::Agent, observer::Observer, render::FrameRenderer, simulation::Simulation};
use tracing::{info, warn};

mod ascii;
mod cliargs;
use ascii::AsciiRenderer;
use cliargs::{Args, Config};

fn main() -> Result<()> {
    init_tracing();

    // Parse whole args with clap
    let mut args = Args::parse();
    let config = load_config(&mut args)?;

    let run_options = config.to_run_options(args.seed);
    let mut simulation =
        Simulation::new(&run_options).context("invalid simulation configuration")?;
    let mut observer = Observer::new(run_options.sample_rate);
    let mut ascii = AsciiRenderer::new(config.columns, config.rows, &run_options.world);

    let frame_duration = Duration::from_millis(config.frame_duration_ms);
    let show = config.show;

    let mut renderer = |agents: &[Agent], tick: u64, total_ticks: u64| {
        observer.watch(agents);

        if show {
            // clear screen, cursor home
            print!("\x1B[2J\x1B[H{}", ascii.render(agents, tick, total_ticks));
            thread::sleep(frame_duration);
        }

        agents.len()
    };
    let sizes = simulation.run(config.ticks, &mut renderer);

    info!(
        ticks = simulation.tick(),
        population = simulation.agents().len(),
        smallest = sizes.iter().min().copied().unwrap_or_default(),
        largest = sizes.iter().max().copied().unwrap_or_default(),
        "run finished"
    );

    let data = observer
        .pop_data_save(&run_options.save_options)
        .context("unable to save agent data")?;
    info!(samples = data.len(), "observer drained");

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

/// Merges the config file, when there is one, with whatever clap parsed
fn load_config(args: &mut Args) -> Result<Config> {
    let path = args.config_path.clone();

    if !path.exists() {
        // If there is not config file return only config parsed from clap
        warn!(path = %path.display(), "config file not found, using command line arguments");
        return Ok(Config::from(&mut args.config));
    }

    let text = fs::read_to_string(&path)
        .with_context(|| format!("unable to read config file {}", path.display()))?;
    let from_file = parse_config(&path, &text)
        .with_context(|| format!("error in configuration file {}", path.display()))?;

    info!(path = %path.display(), "loaded config file");
    Ok(Config::from(from_file).merge(&mut args.config))
}

fn parse_config(path: &Path, text: &str) -> Result<<Config as ClapSerde>::Opt> {
    let is_toml = path.extension().map_or(false, |ext| ext == "toml");

    Ok(if is_toml {
        toml::from_str(text)?
    } else {
        serde_yaml::from_str(text)?
    })
}
