//! Main CLI application for the logo life animation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use logo_life::{
    animation::Animation,
    automaton::UpdateMode,
    config::{CliOverrides, Settings},
    logo::{create_example_logo, load_logo_grid},
    utils::{ColorOutput, FrameProgress, GridFormatter},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "logo_life")]
#[command(about = "Dissolve a logo with the Game of Life and grow it back")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the animation and export frames
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Logo image (overrides config)
        #[arg(short, long)]
        logo: Option<PathBuf>,

        /// Number of frames to run (overrides config)
        #[arg(short, long)]
        frames: Option<u64>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Count neighbors against a per-frame copy of the grid
        #[arg(long)]
        generational: bool,

        /// Wait the configured frame interval between steps
        #[arg(long)]
        realtime: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and logo files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Sample a logo and print the resulting grid
    Sample {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Logo image (overrides config)
        #[arg(short, long)]
        logo: Option<PathBuf>,
    },

    /// Print the phase table
    Phases {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config, logo, frames, output, seed,
            generational, realtime, verbose
        } => {
            init_tracing(verbose);
            let overrides = CliOverrides {
                frames,
                seed,
                update_mode: generational.then_some(UpdateMode::Generational),
                logo_file: logo,
                output_dir: output,
            };
            run_command(config, overrides, realtime, verbose)
        }
        Commands::Setup { directory, force } => {
            init_tracing(false);
            setup_command(directory, force)
        }
        Commands::Sample { config, logo } => {
            init_tracing(false);
            sample_command(config, logo)
        }
        Commands::Phases { config, json } => {
            init_tracing(false);
            phases_command(config, json)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the config file, falling back to defaults when it does not exist
fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    realtime: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🎞️  Starting logo animation"));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);

    if verbose {
        println!("Configuration:");
        println!("  Grid: {}x{}", settings.grid.width, settings.grid.height);
        println!("  Frames: {}", settings.animation.total_frames);
        println!("  Update mode: {:?}", settings.animation.update_mode);
        println!("  Logo file: {}", settings.input.logo_file.display());
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    settings.validate()
        .context("Configuration validation failed")?;

    let output_dir = settings.output.output_directory.clone();
    let total_frames = settings.animation.total_frames;

    let mut animation = Animation::new(settings)
        .context("Failed to create animation")?;
    animation.set_realtime(realtime);

    if !animation.engine().is_logo_loaded() {
        println!("{}", ColorOutput::warning("Logo could not be loaded, animating the random fill"));
    }

    let mut progress = FrameProgress::new(total_frames);
    let summary = animation
        .run_with(|report| progress.record(report))
        .context("Animation failed")?;
    progress.finish();

    println!("\n{}", summary);

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create directory {}", output_dir.display()))?;
    let summary_path = output_dir.join("summary.json");
    summary.save_to_file(&summary_path)
        .context("Failed to save summary")?;

    if summary.converged {
        println!("{}", ColorOutput::success("✅ Logo fully regrown"));
    } else if summary.logo_loaded {
        println!("{}", ColorOutput::warning(&format!(
            "Logo not fully regrown, {} cells still differ",
            summary.final_mismatch.unwrap_or(0)
        )));
    }
    println!("Frames and summary saved to {}", output_dir.display());

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let examples_dir = config_dir.join("examples");
    let assets_dir = directory.join("assets");
    let output_dir = directory.join("output/frames");

    for dir in [&examples_dir, &assets_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let defaults = Settings::default();

    write_if_missing(&config_dir.join("default.yaml"), force, |path| {
        defaults.to_file(&path.to_path_buf())
    })
    .context("Failed to create default configuration")?;

    // Same choreography, neighbor counts frozen per frame
    let mut generational = Settings::default();
    generational.animation.update_mode = UpdateMode::Generational;
    generational.animation.seed = Some(7);
    write_if_missing(&examples_dir.join("generational.yaml"), force, |path| {
        generational.to_file(&path.to_path_buf())
    })?;

    // Restart the phase table every 200 frames
    let mut looping = Settings::default();
    looping.animation.loop_period = Some(200);
    looping.animation.total_frames = 600;
    looping.output.export_frames = 600;
    write_if_missing(&examples_dir.join("looping.yaml"), force, |path| {
        looping.to_file(&path.to_path_buf())
    })?;

    write_if_missing(&directory.join(&defaults.input.logo_file), force, |path| {
        create_example_logo(
            path,
            defaults.render.canvas_width,
            defaults.render.canvas_height,
            &defaults.render.palette,
        )
    })
    .context("Failed to create example logo")?;

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Replace {} with your own logo", assets_dir.join("logo.png").display());
    println!("2. Edit configuration files in {}", config_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn write_if_missing<F>(path: &Path, force: bool, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    if path.exists() && !force {
        println!("Skipped: {} (already exists)", path.display());
        return Ok(());
    }
    write(path)?;
    println!("Created: {}", path.display());
    Ok(())
}

fn sample_command(config_path: PathBuf, logo: Option<PathBuf>) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Sampling logo..."));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        logo_file: logo,
        ..CliOverrides::default()
    });

    let grid = load_logo_grid(
        &settings.input.logo_file,
        settings.render.canvas_width,
        settings.render.canvas_height,
        settings.grid.width,
        settings.grid.height,
        &settings.render.palette,
    )?;

    println!("Logo Grid ({}x{}):", grid.width(), grid.height());
    println!("{}", GridFormatter::format_grid_with_coords(&grid));
    println!("{}", GridFormatter::format_cell_statistics(&grid));

    Ok(())
}

fn phases_command(config_path: PathBuf, json: bool) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let schedule = &settings.animation.phases;

    if json {
        let text = serde_json::to_string_pretty(schedule)
            .context("Failed to serialize phase table")?;
        println!("{}", text);
        return Ok(());
    }

    println!("{}", GridFormatter::format_phase_table(schedule));
    println!("Phase table settles at frame {}", schedule.settles_at());
    if let Some(period) = settings.animation.loop_period {
        println!("Clock loops every {} frames", period);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logo_life::render::frame_path;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "logo_life",
            "run",
            "--config", "test.yaml",
            "--frames", "5",
            "--seed", "3",
            "--generational",
        ]);
        assert!(cli.is_ok());

        match cli.unwrap().command {
            Commands::Run { frames, seed, generational, realtime, .. } => {
                assert_eq!(frames, Some(5));
                assert_eq!(seed, Some(3));
                assert!(generational);
                assert!(!realtime);
            }
            _ => panic!("expected run command"),
        }

        assert!(Cli::try_parse_from(["logo_life", "phases", "--json"]).is_ok());
        assert!(Cli::try_parse_from(["logo_life", "run", "--frames", "many"]).is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/generational.yaml").exists());
        assert!(temp_dir.path().join("assets/logo.png").exists());

        let looping = Settings::from_file(&temp_dir.path().join("config/examples/looping.yaml")).unwrap();
        assert_eq!(looping.animation.loop_period, Some(200));

        let logo = load_logo_grid(temp_dir.path().join("assets/logo.png"), 512, 512, 30, 30, &looping.render.palette)
            .unwrap();
        assert!(logo.living_count() > 0);
    }

    #[test]
    fn test_setup_keeps_existing_files() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config/default.yaml");
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        std::fs::write(&config_path, "custom").unwrap();

        setup_command(temp_dir.path().to_path_buf(), false).unwrap();
        assert_eq!(std::fs::read_to_string(&config_path).unwrap(), "custom");

        setup_command(temp_dir.path().to_path_buf(), true).unwrap();
        assert!(Settings::from_file(&config_path).is_ok());
    }

    #[test]
    fn test_run_command_writes_summary() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.grid.width = 10;
        settings.grid.height = 10;
        settings.render.canvas_width = 40;
        settings.render.canvas_height = 40;
        settings.animation.total_frames = 8;
        settings.animation.frame_interval_ms = 0;
        settings.output.export_frames = 4;
        settings.input.logo_file = temp_dir.path().join("logo.png");
        let config_path = temp_dir.path().join("config.yaml");
        settings.to_file(&config_path).unwrap();
        create_example_logo(&settings.input.logo_file, 40, 40, &settings.render.palette).unwrap();

        let output = temp_dir.path().join("out");
        let overrides = CliOverrides {
            seed: Some(5),
            output_dir: Some(output.clone()),
            ..CliOverrides::default()
        };
        run_command(config_path, overrides, false, false).unwrap();

        assert!(frame_path(&output, 3, "png").exists());
        assert!(!frame_path(&output, 4, "png").exists());
        let summary: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output.join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["frames"], 8);
        assert_eq!(summary["exported_frames"], 4);
        assert_eq!(summary["logo_loaded"], true);
    }

    #[test]
    fn test_phases_command_defaults() {
        let temp_dir = tempdir().unwrap();
        assert!(phases_command(temp_dir.path().join("missing.yaml"), false).is_ok());
        assert!(phases_command(temp_dir.path().join("missing.yaml"), true).is_ok());
    }
}
