use std::path::PathBuf;

use clap::Parser;
use gstreamer as gst;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ringscrub::error::ScrubError;
use ringscrub::types::settings::Settings;
use ringscrub::ui::app::ScrubApp;

#[derive(Debug, Parser)]
#[command(name = "ringscrub", about = "Scrub a video by turning a dual-ring dial")]
struct Cli {
    /// Video file to scrub; overrides the settings file.
    video: Option<PathBuf>,

    /// Settings file (JSON). Missing file means defaults.
    #[arg(long, default_value = "ringscrub.json")]
    config: PathBuf,

    /// Do not open the camera preview.
    #[arg(long)]
    no_camera: bool,

    /// Start without the loading overlay.
    #[arg(long)]
    no_overlay: bool,

    /// Log at debug level unless RINGSCRUB_LOG or RUST_LOG is set.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(video) = &self.video {
            settings.video_path = Some(video.clone());
        }
        if self.no_camera {
            settings.camera_enabled = false;
        }
        if self.no_overlay {
            settings.show_loading_overlay = false;
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "ringscrub=debug,wgpu=warn"
    } else {
        "ringscrub=info,wgpu=warn"
    };
    let filter = std::env::var("RINGSCRUB_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(default)),
        );

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
    {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn run(cli: Cli) -> Result<(), ScrubError> {
    gst::init().map_err(ScrubError::GstInit)?;

    let mut settings = Settings::load_or_default(&cli.config)?;
    cli.apply(&mut settings);
    tracing::info!(
        video = ?settings.video_path,
        camera = settings.camera_enabled,
        "Starting ring scrubber"
    );

    eframe::run_native(
        "Ring Scrub",
        eframe::NativeOptions::default(),
        Box::new(move |cc| Ok(Box::new(ScrubApp::new(cc, settings)))),
    )
    .map_err(|err| ScrubError::Ui(err.to_string()))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_keep_settings() {
        let cli = Cli::parse_from(["ringscrub"]);
        assert_eq!(cli.config, PathBuf::from("ringscrub.json"));

        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_cli_overrides_settings() {
        let cli = Cli::parse_from([
            "ringscrub",
            "clip.mp4",
            "--config",
            "alt.json",
            "--no-camera",
            "--no-overlay",
        ]);
        assert_eq!(cli.config, PathBuf::from("alt.json"));

        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.video_path, Some(PathBuf::from("clip.mp4")));
        assert!(!settings.camera_enabled);
        assert!(!settings.show_loading_overlay);
    }
}
