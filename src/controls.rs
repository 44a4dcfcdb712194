use raylib::prelude::*;
use crate::carousel::Command;
use crate::constants::*;

const BUTTON_RADIUS: f32 = 32.0;
const BUTTON_MARGIN: f32 = 24.0;
const INDICATOR_BOTTOM: f32 = 40.0;
const INDICATOR_GAP: f32 = 10.0;
const DOT_SIZE: f32 = 14.0;
const PILL_WIDTH: f32 = 40.0;
const PILL_HEIGHT: f32 = 16.0;
const LABEL_FONT_SIZE: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    Indicator(usize),
}

impl Control {
    pub fn label(&self) -> String {
        match self {
            Control::Previous => "Previous slide".to_string(),
            Control::Next => "Next slide".to_string(),
            Control::Indicator(index) => format!("Go to slide {}", index + 1),
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Control::Previous => Command::Prev,
            Control::Next => Command::Next,
            Control::Indicator(index) => Command::GoTo(*index),
        }
    }
}

/// Overlay geometry in framebuffer coordinates. The indicator row depends on
/// which slide is active (the active one is a wider pill), so the layout is
/// rebuilt whenever the index changes.
#[derive(Debug, Clone)]
pub struct Controls {
    previous: Rectangle,
    next: Rectangle,
    indicators: Vec<Rectangle>,
    current_index: usize,
}

impl Controls {
    pub fn layout(count: usize, current_index: usize) -> Self {
        let width = RENDER_WIDTH as f32;
        let height = RENDER_HEIGHT as f32;
        let diameter = BUTTON_RADIUS * 2.0;

        let previous = Rectangle::new(BUTTON_MARGIN, height * 0.5 - BUTTON_RADIUS, diameter, diameter);
        let next = Rectangle::new(width - BUTTON_MARGIN - diameter, height * 0.5 - BUTTON_RADIUS, diameter, diameter);

        let row_width: f32 = (0..count)
            .map(|i| if i == current_index { PILL_WIDTH } else { DOT_SIZE })
            .sum::<f32>()
            + INDICATOR_GAP * count.saturating_sub(1) as f32;
        let center_y = height - INDICATOR_BOTTOM;

        let mut x = (width - row_width) * 0.5;
        let mut indicators = Vec::with_capacity(count);
        for i in 0..count {
            let (w, h) = if i == current_index { (PILL_WIDTH, PILL_HEIGHT) } else { (DOT_SIZE, DOT_SIZE) };
            indicators.push(Rectangle::new(x, center_y - h * 0.5, w, h));
            x += w + INDICATOR_GAP;
        }

        Self { previous, next, indicators, current_index }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn hit_test(&self, point: Vector2) -> Option<Control> {
        if contains(&self.previous, point) {
            return Some(Control::Previous);
        }
        if contains(&self.next, point) {
            return Some(Control::Next);
        }
        self.indicators
            .iter()
            .position(|rect| contains(rect, point))
            .map(Control::Indicator)
    }

    pub fn rect(&self, control: Control) -> Option<Rectangle> {
        match control {
            Control::Previous => Some(self.previous),
            Control::Next => Some(self.next),
            Control::Indicator(index) => self.indicators.get(index).copied(),
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, hovered: Option<Control>) {
        self.draw_button(d, self.previous, true, hovered == Some(Control::Previous));
        self.draw_button(d, self.next, false, hovered == Some(Control::Next));

        for (i, rect) in self.indicators.iter().enumerate() {
            let color = if i == self.current_index {
                Color::WHITE
            } else if hovered == Some(Control::Indicator(i)) {
                Color::new(255, 255, 255, 180)
            } else {
                Color::new(255, 255, 255, 102)
            };
            d.draw_rectangle_rounded(*rect, 1.0, 12, color);
        }

        // Accessible label as a tooltip
        if let Some(control) = hovered {
            if let Some(rect) = self.rect(control) {
                let label = control.label();
                let text_width = label.len() as i32 * LABEL_FONT_SIZE / 2;
                let x = (rect.x + rect.width * 0.5) as i32 - text_width / 2;
                let y = (rect.y - LABEL_FONT_SIZE as f32 - 12.0) as i32;
                d.draw_rectangle(x - 8, y - 4, text_width + 16, LABEL_FONT_SIZE + 8, Color::new(0, 0, 0, 160));
                d.draw_text(&label, x, y, LABEL_FONT_SIZE, Color::WHITE);
            }
        }
    }

    fn draw_button(&self, d: &mut RaylibDrawHandle, rect: Rectangle, left: bool, hovered: bool) {
        let center = Vector2::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5);
        let (radius, fill) = if hovered {
            (BUTTON_RADIUS * 1.25, Color::new(255, 255, 255, 128))
        } else {
            (BUTTON_RADIUS, Color::new(255, 255, 255, 77))
        };
        d.draw_circle_v(center, radius, fill);
        d.draw_circle_lines(center.x as i32, center.y as i32, radius, Color::new(255, 255, 255, 102));

        // Chevron
        let arm = radius * 0.35;
        let dir = if left { -1.0 } else { 1.0 };
        let tip = Vector2::new(center.x + dir * arm * 0.5, center.y);
        let top = Vector2::new(center.x - dir * arm * 0.5, center.y - arm);
        let bottom = Vector2::new(center.x - dir * arm * 0.5, center.y + arm);
        d.draw_line_ex(top, tip, 4.0, Color::WHITE);
        d.draw_line_ex(tip, bottom, 4.0, Color::WHITE);
    }
}

fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

/// Maps a window position onto the framebuffer, which is stretched over the
/// whole window.
pub fn to_framebuffer(point: Vector2, screen_width: f32, screen_height: f32) -> Vector2 {
    Vector2::new(
        point.x * RENDER_WIDTH as f32 / screen_width.max(1.0),
        point.y * RENDER_HEIGHT as f32 / screen_height.max(1.0),
    )
}
