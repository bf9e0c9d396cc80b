//! The `thumbnailer run` command: generate thumbnails for a directory.

use clap::Args;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thumbnailer_core::{Config, Orchestrator, RunSummary};

/// Arguments for the `run` command. Every flag overrides the config file.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Directory containing source images
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory thumbnails are written to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Square bounding box in pixels (sets both width and height)
    #[arg(short, long, conflicts_with_all = ["width", "height"])]
    pub size: Option<u32>,

    /// Maximum thumbnail width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Maximum thumbnail height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// JPEG quality (1-100)
    #[arg(short, long)]
    pub quality: Option<u8>,

    /// Thumbnails buffered between producer and consumer
    #[arg(short, long)]
    pub buffer_size: Option<usize>,
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(input) = &args.input {
        config.directories.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.directories.output = output.clone();
    }
    if let Some(size) = args.size {
        config.thumbnail.width = size;
        config.thumbnail.height = size;
    }
    if let Some(width) = args.width {
        config.thumbnail.width = width;
    }
    if let Some(height) = args.height {
        config.thumbnail.height = height;
    }
    if let Some(quality) = args.quality {
        config.thumbnail.quality = quality;
    }
    if let Some(buffer_size) = args.buffer_size {
        config.pipeline.buffer_size = buffer_size;
    }
}

/// Execute the run command.
pub async fn execute(args: RunArgs, mut config: Config) -> anyhow::Result<()> {
    apply_overrides(&mut config, &args);
    config.validate()?;

    let orchestrator = Orchestrator::new(&config);
    tracing::info!(
        "Thumbnailing {:?} -> {:?} ({}x{})",
        orchestrator.input_dir(),
        orchestrator.output_dir(),
        config.thumbnail.width,
        config.thumbnail.height
    );

    let start = Instant::now();
    let summary = orchestrator.run().await?;
    print_summary(&summary, start.elapsed(), orchestrator.output_dir());

    Ok(())
}

/// Print a formatted summary table after the run.
fn print_summary(summary: &RunSummary, elapsed: Duration, output_dir: &Path) {
    let rate = if elapsed.as_secs_f64() > 0.0 {
        summary.saved as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Processed:    {:>8}", summary.processed);
    eprintln!("    Saved:        {:>8}", summary.saved);
    eprintln!("  ------------------------------------");
    eprintln!("    In output:    {:>8}", summary.found);
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
    eprintln!("  Thumbnails saved in: {}", output_dir.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_overrides_keeps_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &RunArgs::default());
        assert_eq!(config.directories.input, PathBuf::from("producer"));
        assert_eq!(config.directories.output, PathBuf::from("consumer"));
        assert_eq!(config.thumbnail.bounds(), (200, 200));
        assert_eq!(config.pipeline.buffer_size, 16);
    }

    #[test]
    fn size_sets_both_dimensions() {
        let mut config = Config::default();
        let args = RunArgs {
            size: Some(64),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.thumbnail.bounds(), (64, 64));
    }

    #[test]
    fn individual_overrides_apply() {
        let mut config = Config::default();
        let args = RunArgs {
            input: Some(PathBuf::from("photos")),
            output: Some(PathBuf::from("thumbs")),
            width: Some(320),
            quality: Some(90),
            buffer_size: Some(1),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.directories.input, PathBuf::from("photos"));
        assert_eq!(config.directories.output, PathBuf::from("thumbs"));
        assert_eq!(config.thumbnail.bounds(), (320, 200));
        assert_eq!(config.thumbnail.quality, 90);
        assert_eq!(config.pipeline.buffer_size, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn execute_rejects_invalid_override() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            input: Some(dir.path().join("in")),
            output: Some(dir.path().join("out")),
            buffer_size: Some(0),
            ..Default::default()
        };
        assert!(execute(args, Config::default()).await.is_err());
        assert!(!dir.path().join("in").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn execute_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            input: Some(dir.path().join("in")),
            output: Some(dir.path().join("out")),
            ..Default::default()
        };
        execute(args, Config::default()).await.unwrap();
        assert!(dir.path().join("in").is_dir());
        assert!(dir.path().join("out").is_dir());
    }
}
