use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::warn;
use crate::constants::*;
use crate::policy::AutoPlayPolicy;
use crate::slide::{shuffle_slides, Slide};
use crate::texture_loader::load_sorted_image_paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// 2s auto-play, paused for a cooldown after manual navigation
    Rich,
    /// 4s auto-play, never paused
    Simple,
}

#[derive(Debug, Parser)]
#[command(name = "carousel", about = "Auto-advancing image carousel")]
pub struct Args {
    /// Image files, or a single directory of images. Defaults to the built-in list.
    pub images: Vec<PathBuf>,

    /// Directory holding the built-in slides and the placeholder image
    #[arg(long, default_value = DEFAULT_ASSET_DIR)]
    pub assets: PathBuf,

    #[arg(long, value_enum, default_value = "rich")]
    pub variant: Variant,

    /// Override the auto-play interval
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: Option<u64>,

    /// Override the manual-navigation cooldown (rich only)
    #[arg(long)]
    pub cooldown_ms: Option<u64>,

    /// Shuffle the slide order once at startup
    #[arg(long)]
    pub shuffle: bool,

    /// Capture the rendered frames to a video file through ffmpeg
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Capture length in seconds. Defaults to one full cycle of the slides.
    #[arg(long, requires = "record")]
    pub record_duration: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct RecordConfig {
    pub output: PathBuf,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct CarouselConfig {
    pub slides: Vec<Slide>,
    pub policy: AutoPlayPolicy,
    pub placeholder: PathBuf,
    pub record: Option<RecordConfig>,
}

impl Args {
    pub fn into_config(self) -> Result<CarouselConfig> {
        let mut policy = match self.variant {
            Variant::Rich => AutoPlayPolicy::rich(),
            Variant::Simple => AutoPlayPolicy::simple(),
        };
        if let Some(ms) = self.interval_ms {
            policy = policy.with_tick_interval(Duration::from_millis(ms));
        }
        if let Some(ms) = self.cooldown_ms {
            if !policy.suppress_on_manual_nav {
                warn!("--cooldown-ms has no effect with the simple variant");
            }
            policy = policy.with_cooldown(Duration::from_millis(ms));
        }

        let mut slides = match self.images.as_slice() {
            [] => Slide::defaults(&self.assets),
            [dir] if dir.is_dir() => {
                let paths = load_sorted_image_paths(dir)
                    .with_context(|| format!("cannot use {:?} as a slide directory", dir))?;
                Slide::from_paths(paths)
            }
            _ => Slide::from_paths(self.images.clone()),
        };
        if self.shuffle {
            shuffle_slides(&mut slides);
        }

        let record = match self.record {
            Some(output) => {
                let duration = match self.record_duration {
                    Some(secs) if secs > 0.0 => Duration::try_from_secs_f32(secs)
                        .with_context(|| format!("invalid --record-duration {}", secs))?,
                    _ => policy.tick_interval * slides.len() as u32,
                };
                Some(RecordConfig { output, duration })
            }
            None => None,
        };

        Ok(CarouselConfig {
            slides,
            policy,
            placeholder: self.assets.join(PLACEHOLDER_FILE),
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CarouselConfig {
        let mut argv = vec!["carousel"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap().into_config().unwrap()
    }

    #[test]
    fn defaults_to_rich_with_built_in_slides() {
        let config = parse(&[]);
        assert_eq!(config.policy, AutoPlayPolicy::rich());
        assert_eq!(config.slides, Slide::defaults(&PathBuf::from("assets")));
        assert_eq!(config.placeholder, PathBuf::from("assets/placeholder.png"));
        assert!(config.record.is_none());
    }

    #[test]
    fn simple_variant_and_overrides() {
        let config = parse(&["--variant", "simple", "--interval-ms", "1500"]);
        assert!(!config.policy.suppress_on_manual_nav);
        assert_eq!(config.policy.tick_interval, Duration::from_millis(1500));
    }

    #[test]
    fn explicit_files_keep_their_order() {
        let config = parse(&["z.png", "a.png"]);
        assert_eq!(config.slides, vec![Slide::new(1, "z.png"), Slide::new(2, "a.png")]);
    }

    #[test]
    fn directory_argument_is_scanned() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("1.png"), b"x").unwrap();
        let config = parse(&[dir.path().to_str().unwrap()]);
        assert_eq!(config.slides.len(), 2);
        assert_eq!(config.slides[0].image, dir.path().join("1.png"));
    }

    #[test]
    fn record_defaults_to_one_cycle() {
        let config = parse(&["--record", "out.mp4"]);
        let record = config.record.unwrap();
        assert_eq!(record.output, PathBuf::from("out.mp4"));
        assert_eq!(record.duration, Duration::from_secs(12));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Args::try_parse_from(["carousel", "--interval-ms", "0"]).is_err());
    }

    #[test]
    fn infinite_record_duration_is_an_error() {
        let args = Args::try_parse_from(["carousel", "--record", "out.mp4", "--record-duration", "inf"]).unwrap();
        assert!(args.into_config().is_err());
    }

    #[test]
    fn explicit_record_duration_is_used() {
        let config = parse(&["--record", "out.mp4", "--record-duration", "1.5"]);
        assert_eq!(config.record.unwrap().duration, Duration::from_millis(1500));
    }

    #[test]
    fn record_duration_requires_record() {
        assert!(Args::try_parse_from(["carousel", "--record-duration", "3"]).is_err());
    }
}
