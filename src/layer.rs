use raylib::prelude::*;
use crate::constants::*;
use crate::slide::Slide;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Original,    // The slide's own image
    Placeholder, // Substituted after a load failure
}

/// Render-side counterpart of a slide. Every slide keeps its layer for the
/// whole run; visibility is only ever a matter of opacity.
pub struct Layer<I> {
    pub slide_id: u32,
    pub alt: String,
    pub image: I,
    pub source: ImageSource,

    active: bool,
    scale_transition: bool,

    opacity: f32,
    scale: f32,

    animation_timer: f32,
    pub is_animating: bool,

    tween_opacity: Option<ease::Tween>,
    tween_scale: Option<ease::Tween>,
}

impl<I> Layer<I> {
    pub fn new(slide: &Slide, image: I, source: ImageSource, active: bool, scale_transition: bool) -> Self {
        let (opacity, scale) = Self::target(active, scale_transition);
        Self {
            slide_id: slide.id,
            alt: slide.alt_text(),
            image,
            source,

            active,
            scale_transition,

            opacity,
            scale,

            animation_timer: 0.0,
            is_animating: false,

            tween_opacity: None,
            tween_scale: None,
        }
    }

    fn target(active: bool, scale_transition: bool) -> (f32, f32) {
        match (active, scale_transition) {
            (true, _) => (1.0, 1.0),
            (false, true) => (0.0, INACTIVE_SCALE),
            (false, false) => (0.0, 1.0),
        }
    }

    /// Retargets the fade. Starts from wherever the layer currently is so an
    /// interrupted fade reverses smoothly.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;

        let (end_opacity, end_scale) = Self::target(active, self.scale_transition);
        self.tween_opacity = Some(ease::Tween::new(ease::quad_in_out, self.opacity, end_opacity, TRANSITION_DURATION));
        self.tween_scale   = Some(ease::Tween::new(ease::quad_in_out, self.scale, end_scale, TRANSITION_DURATION));
        self.animation_timer = 0.0;
        self.is_animating = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }

        if let Some(tween) = self.tween_opacity.as_mut() {
            self.opacity = tween.apply(dt);
        }
        if let Some(tween) = self.tween_scale.as_mut() {
            self.scale = tween.apply(dt);
        }

        self.animation_timer += dt;
        if self.animation_timer >= TRANSITION_DURATION {
            let (opacity, scale) = Self::target(self.active, self.scale_transition);
            self.is_animating = false;
            self.opacity = opacity;
            self.scale = scale;
            self.tween_opacity = None;
            self.tween_scale = None;
        }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[cfg(test)]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[cfg(test)]
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Layer<Texture2D> {
    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        if self.opacity <= 0.0 {
            return;
        }

        let screen_width = RENDER_WIDTH as f32;
        let screen_height = RENDER_HEIGHT as f32;

        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;

        // Letterbox inside the padded frame, never crop
        let fit = ((screen_width - 2.0 * FRAME_PADDING) / tex_width)
            .min((screen_height - 2.0 * FRAME_PADDING) / tex_height);
        let scaled_width = tex_width * fit * self.scale;
        let scaled_height = tex_height * fit * self.scale;

        let origin = Vector2::new(scaled_width * 0.5, scaled_height * 0.5);
        let alpha = (self.opacity.clamp(0.0, 1.0) * 255.0) as u8;

        d.draw_texture_pro(
            &self.image,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            Rectangle::new(screen_width * 0.5, screen_height * 0.5, scaled_width, scaled_height),
            origin,
            0.0,
            Color::new(255, 255, 255, alpha),
        );
    }
}
