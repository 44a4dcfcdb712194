use std::path::Path;
use std::time::Duration;
use raylib::prelude::*;
use tracing::error;
use crate::carousel::{Carousel, Command};
use crate::constants::*;
use crate::controls::{to_framebuffer, Control, Controls};
use crate::layer::Layer;
use crate::texture_loader::{load_layers, TextureLoader};

pub struct CarouselEngine {
    carousel: Carousel,
    layers: Vec<Layer<Texture2D>>,
    controls: Controls,

    hovered: Option<Control>,
    pending: Vec<Command>, // User commands polled this frame, applied in order
}

impl CarouselEngine {
    pub fn new(carousel: Carousel) -> Self {
        let controls = Controls::layout(carousel.slides().len(), 0);
        Self {
            carousel,
            layers: Vec::new(),
            controls,
            hovered: None,
            pending: Vec::new(),
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn unmount(&mut self) {
        self.pending.clear();
        self.carousel.unmount();
    }

    pub fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, placeholder: &Path) -> bool {
        let mut loader = TextureLoader::new(rl, thread, placeholder.to_path_buf());
        let state = self.carousel.state();
        let scale_transition = self.carousel.policy().scale_transition;

        match load_layers(&mut loader, self.carousel.slides(), state.current_index, scale_transition) {
            Ok(layers) => {
                self.layers = layers;
                true
            }
            Err(e) => {
                error!(error = %e, "failed to prepare slide textures");
                false
            }
        }
    }

    pub fn handle_input(&mut self, rl: &RaylibHandle) {
        let mouse = to_framebuffer(
            rl.get_mouse_position(),
            rl.get_screen_width() as f32,
            rl.get_screen_height() as f32,
        );
        self.hovered = self.controls.hit_test(mouse);

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(control) = self.hovered {
                self.pending.push(control.command());
            }
        }

        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            self.pending.push(Command::Prev);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            self.pending.push(Command::Next);
        }

        let digits = [
            KeyboardKey::KEY_ONE, KeyboardKey::KEY_TWO, KeyboardKey::KEY_THREE,
            KeyboardKey::KEY_FOUR, KeyboardKey::KEY_FIVE, KeyboardKey::KEY_SIX,
            KeyboardKey::KEY_SEVEN, KeyboardKey::KEY_EIGHT, KeyboardKey::KEY_NINE,
        ];
        for (index, key) in digits.into_iter().enumerate() {
            if rl.is_key_pressed(key) {
                self.pending.push(Command::GoTo(index));
            }
        }
    }

    pub fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> bool {
        if !self.carousel.is_mounted() {
            return false;
        }

        // 1. Timer ticks for the elapsed frame, then this frame's user commands
        self.carousel.step(Duration::from_secs_f32(dt.max(0.0)), self.pending.drain(..));

        // 2. Retarget and advance the cross-fade
        let state = self.carousel.state();
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.set_active(i == state.current_index);
            layer.update(dt);
        }
        if state.transitioning && self.layers.iter().all(|layer| !layer.is_animating) {
            self.carousel.finish_transition();
        }

        if self.controls.current_index() != state.current_index {
            self.controls = Controls::layout(self.layers.len(), state.current_index);
        }

        // 3. Draw
        rl.draw_texture_mode(thread, framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            d.clear_background(Color::BLACK);
            d.draw_rectangle_gradient_v(
                0, 0, RENDER_WIDTH, RENDER_HEIGHT,
                Color::new(0, 0, 0, 255),
                Color::new(17, 24, 39, 255),
            );

            // All layers every frame; inactive ones are transparent
            for layer in self.layers.iter() {
                layer.draw(&mut d);
            }

            self.controls.draw(&mut d, self.hovered);
        });

        true
    }
}
