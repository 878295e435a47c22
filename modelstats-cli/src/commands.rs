//! CLI subcommand handlers and the default plotting run.

use crate::Cli;
use crate::Commands;
use crate::ConfigAction;
use modelstats_core::config::{workspace_config_path, ModelStatsConfig, PlotFormat};
use modelstats_core::{renderer_for, FsModelInfoSource};
use std::path::Path;

/// Handle a CLI subcommand.
pub fn handle_command(
    command: &Commands,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    match command {
        Commands::Config { action } => handle_config(action, workspace, config_file),
        Commands::Platforms => handle_platforms(workspace, config_file),
    }
}

fn handle_config(
    action: &ConfigAction,
    workspace: &Path,
    config_file: Option<&Path>,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path = workspace_config_path(workspace);
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml_str = toml::to_string_pretty(&ModelStatsConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            let config = modelstats_core::load_config(Some(workspace), config_file)
                .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
            let toml_str = toml::to_string_pretty(&config)?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}

fn handle_platforms(workspace: &Path, config_file: Option<&Path>) -> anyhow::Result<()> {
    let config = modelstats_core::load_config(Some(workspace), config_file)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    println!("Known platforms ({}):", config.platforms.len());
    for platform in &config.platforms {
        let shown = if config.plot.targets.contains(&platform.name) {
            " [plotted]"
        } else {
            ""
        };
        println!(
            "  {:<10} {} ({} {}){}",
            platform.name, platform.legend, platform.color, platform.marker, shown
        );
    }
    Ok(())
}

/// Apply command-line flags on top of the loaded configuration.
pub fn apply_overrides(config: &mut ModelStatsConfig, cli: &Cli) -> anyhow::Result<()> {
    if let Some(figure) = &cli.output_figure {
        config.output.figure = figure.clone();
    }
    if let Some(format) = &cli.output_format {
        config.output.format = format.parse::<PlotFormat>()?;
    }
    if let Some(stats) = &cli.output_stats {
        config.output.stats = stats.clone();
    }
    if let Some(max_secs) = cli.plot_max_secs_per_frame {
        config.plot.max_secs_per_frame = max_secs;
    }
    if let Some(min_top1) = cli.plot_min_top1_accuracy {
        config.plot.min_top1_accuracy = min_top1;
    }
    if let Some(targets) = &cli.plot_targets {
        config.plot.targets = targets.clone();
    }
    Ok(())
}

/// Analyze `models_root`, write the report and the plot, and tell the user.
pub fn run_plot(models_root: &Path, config: &ModelStatsConfig, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        root = %models_root.display(),
        targets = ?config.plot.targets,
        max_secs_per_frame = config.plot.max_secs_per_frame,
        "Plotting model stats"
    );
    let renderer = renderer_for(config.output.format);
    let analysis = modelstats_core::run(models_root, config, &FsModelInfoSource, renderer.as_ref())?;

    for failure in &analysis.collected.failures {
        println!(
            "Could not collect stats for model '{}', skipping",
            failure.model
        );
    }
    if !quiet {
        println!(
            "Saved frontier models to {}",
            config.output.stats.display()
        );
        println!(
            "Saved plot as {} to {}",
            config.output.format,
            config.output.figure.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "modelstats",
            "models",
            "-o",
            "out/plot.svg",
            "--output-stats",
            "out/frontier.json",
            "--plot-max-secs-per-frame",
            "0.8",
            "--plot-min-top1-accuracy",
            "35",
            "--plot-targets",
            "pi3",
            "aarch64",
        ])
        .unwrap();

        let mut config = ModelStatsConfig::default();
        apply_overrides(&mut config, &cli).unwrap();

        assert_eq!(cli.models_root, Some(PathBuf::from("models")));
        assert_eq!(config.output.figure, PathBuf::from("out/plot.svg"));
        assert_eq!(config.output.stats, PathBuf::from("out/frontier.json"));
        assert_eq!(config.plot.max_secs_per_frame, 0.8);
        assert_eq!(config.plot.min_top1_accuracy, 35.0);
        assert_eq!(config.plot.targets, vec!["pi3", "aarch64"]);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["modelstats", "models"]).unwrap();
        let mut config = ModelStatsConfig::default();
        apply_overrides(&mut config, &cli).unwrap();
        assert_eq!(config.plot.targets, vec!["pi3"]);
        assert_eq!(config.plot.max_secs_per_frame, 1.5);
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let cli =
            Cli::try_parse_from(["modelstats", "models", "--output-format", "png"]).unwrap();
        let mut config = ModelStatsConfig::default();
        let err = apply_overrides(&mut config, &cli).unwrap_err();
        assert!(err.to_string().contains("Unsupported plot format 'png'"));
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["modelstats", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_config_init_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        handle_config(&ConfigAction::Init, dir.path(), None).unwrap();
        let path = workspace_config_path(dir.path());
        let written: ModelStatsConfig =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.platforms.len(), 3);
    }

    #[test]
    fn test_run_plot_end_to_end() {
        let models = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let model_dir = models.path().join("tiny");
        std::fs::create_dir_all(model_dir.join("timing")).unwrap();
        std::fs::write(model_dir.join("accuracy.json"), r#"{"top1": 55.0, "top5": 78.0}"#)
            .unwrap();
        std::fs::write(
            model_dir.join("timing").join("pi3.json"),
            r#"{"secs_per_frame": 0.12}"#,
        )
        .unwrap();

        let mut config = ModelStatsConfig::default();
        config.output.stats = out.path().join("frontier_models.json");
        config.output.figure = out.path().join("model_speed_accuracy.svg");

        run_plot(models.path(), &config, true).unwrap();
        assert!(config.output.stats.exists());
        assert!(config.output.figure.exists());
    }
}
