use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod carousel;
mod config;
mod constants;
mod controls;
mod engine;
mod error;
mod ffmpeg;
mod layer;
mod policy;
mod slide;
mod state;
mod texture_loader;
mod timer;

use crate::carousel::Carousel;
use crate::config::Args;
use crate::constants::*;
use crate::engine::CarouselEngine;
use crate::ffmpeg::Ffmpeg;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Args::parse().into_config()?;
    info!(
        slides = config.slides.len(),
        variant = config.policy.name(),
        interval_ms = config.policy.tick_interval.as_millis() as u64,
        "starting carousel"
    );

    let carousel = Carousel::mount(config.slides, config.policy).context("cannot mount carousel")?;
    let mut engine = CarouselEngine::new(carousel);

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Slides ---
    if !engine.initialize(&mut rl, &thread, &config.placeholder) {
        bail!("no slide could be prepared for display");
    }

    let mut framebuffer = rl.load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("failed to create render texture: {}", e))?;

    // Recording uses a fixed frame step so the video does not depend on
    // how fast frames are produced
    let mut recorder = match &config.record {
        Some(record) => {
            let ffmpeg = Ffmpeg::spawn(RENDER_WIDTH, RENDER_HEIGHT, FPS, &record.output)?;
            let frames = (record.duration.as_secs_f32() * FPS as f32).ceil() as u64;
            Some((ffmpeg, frames))
        }
        None => None,
    };

    let mut shown_slide = None;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = if recorder.is_some() { FRAME_TIME } else { rl.get_frame_time() };

        engine.handle_input(&rl);
        if !engine.render_frame(dt, &mut rl, &thread, &mut framebuffer) {
            break;
        }

        let slide = engine.carousel().current_slide();
        if shown_slide != Some(slide.id) {
            shown_slide = Some(slide.id);
            rl.set_window_title(&thread, &format!("Carousel: {}", slide.alt_text()));
            debug!(id = slide.id, image = ?slide.image, "showing slide");
        }

        // Draw the framebuffer flipped (render textures are bottom-up) and
        // stretched over the window
        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        drop(d);

        if let Some((ffmpeg, remaining)) = recorder.as_mut() {
            let image = framebuffer.load_image()
                .map_err(|e| anyhow!("failed to read back framebuffer: {}", e))?;
            ffmpeg.write(&image)?;
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                break;
            }
        }
    }

    // Stop the timers before the window and textures go away
    engine.unmount();
    drop(recorder);

    Ok(())
}
