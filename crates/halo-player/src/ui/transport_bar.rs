//! On-screen transport controls.
//!
//! Play/pause, back and forward buttons, a seek slider with the time label,
//! a volume slider and the current track name. Hit-testing and slider values
//! are plain geometry so they can be checked without a window.

use nannou::prelude::*;

use crate::transport::{PlayIcon, TransportView, EMPTY_TIME_LABEL};
use crate::utils::color::{hsb, hsba};

const BUTTON_W: f32 = 40.0;
const BUTTON_H: f32 = 26.0;
const SLIDER_HIT_H: f32 = 16.0;
const SLIDER_TRACK_H: f32 = 4.0;

/// Clickable parts of the bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Play,
    Back,
    Forward,
    Seek,
    Volume,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slider {
    Seek,
    Volume,
}

/// Positions of every element for a given bar rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    back: Rect,
    play: Rect,
    forward: Rect,
    name: Rect,
    seek: Rect,
    label: Rect,
    volume_caption: Rect,
    volume: Rect,
}

impl Layout {
    fn new(bar: Rect) -> Self {
        let left = bar.left();
        let right = bar.right();
        let row1 = bar.top() - 25.0;
        let row2 = bar.top() - 55.0;
        let row3 = bar.top() - 82.0;

        let button = |x: f32| Rect::from_x_y_w_h(left + x, row1, BUTTON_W, BUTTON_H);
        let seek_left = left + 20.0;
        let seek_right = right - 120.0;
        let volume_left = left + 60.0;
        let volume_right = left + 200.0;

        Self {
            back: button(35.0),
            play: button(80.0),
            forward: button(125.0),
            name: Rect::from_corners(pt2(left + 160.0, row1 - 10.0), pt2(right - 15.0, row1 + 10.0)),
            seek: Rect::from_corners(
                pt2(seek_left, row2 - SLIDER_HIT_H / 2.0),
                pt2(seek_right, row2 + SLIDER_HIT_H / 2.0),
            ),
            label: Rect::from_corners(pt2(seek_right + 10.0, row2 - 10.0), pt2(right - 10.0, row2 + 10.0)),
            volume_caption: Rect::from_corners(pt2(left + 15.0, row3 - 10.0), pt2(volume_left - 8.0, row3 + 10.0)),
            volume: Rect::from_corners(
                pt2(volume_left, row3 - SLIDER_HIT_H / 2.0),
                pt2(volume_right, row3 + SLIDER_HIT_H / 2.0),
            ),
        }
    }
}

fn contains(rect: Rect, p: Point2) -> bool {
    p.x >= rect.left() && p.x <= rect.right() && p.y >= rect.bottom() && p.y <= rect.top()
}

/// Fraction of `slider`'s width at `x`, clamped to 0-1
fn slider_fraction(slider: Rect, x: f32) -> f32 {
    if slider.w() <= 0.0 {
        return 0.0;
    }
    ((x - slider.left()) / slider.w()).clamp(0.0, 1.0)
}

pub struct TransportBar {
    layout: Layout,
    bounds: Rect,
    icon: PlayIcon,
    label: String,
    seek: f32,
    volume: f32,
    track_name: String,
    dragging: Option<Slider>,
}

impl TransportBar {
    pub fn new(bounds: Rect, volume: f32) -> Self {
        Self {
            layout: Layout::new(bounds),
            bounds,
            icon: PlayIcon::Play,
            label: EMPTY_TIME_LABEL.to_string(),
            seek: 0.0,
            volume: volume.clamp(0.0, 1.0),
            track_name: String::new(),
            dragging: None,
        }
    }

    /// Re-anchor the controls, e.g. after a window resize
    pub fn set_bounds(&mut self, bounds: Rect) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.layout = Layout::new(bounds);
        }
    }

    #[cfg(test)]
    pub fn icon(&self) -> PlayIcon {
        self.icon
    }

    #[cfg(test)]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[cfg(test)]
    pub fn seek(&self) -> f32 {
        self.seek
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_track_name(&mut self, name: impl Into<String>) {
        self.track_name = name.into();
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn hit(&self, point: Point2) -> Option<Control> {
        let l = &self.layout;
        [
            (l.play, Control::Play),
            (l.back, Control::Back),
            (l.forward, Control::Forward),
            (l.seek, Control::Seek),
            (l.volume, Control::Volume),
        ]
        .into_iter()
        .find(|(rect, _)| contains(*rect, point))
        .map(|(_, control)| control)
    }

    /// Start dragging `slider` from `x`; returns the new value
    pub fn begin_drag(&mut self, slider: Slider, x: f32) -> f32 {
        self.dragging = Some(slider);
        self.apply_drag(slider, x)
    }

    /// Move the slider being dragged, if any
    pub fn drag_to(&mut self, x: f32) -> Option<(Slider, f32)> {
        let slider = self.dragging?;
        Some((slider, self.apply_drag(slider, x)))
    }

    /// Release the dragged slider, returning its final value
    pub fn end_drag(&mut self) -> Option<(Slider, f32)> {
        let slider = self.dragging.take()?;
        let value = match slider {
            Slider::Seek => self.seek,
            Slider::Volume => self.volume,
        };
        Some((slider, value))
    }

    fn apply_drag(&mut self, slider: Slider, x: f32) -> f32 {
        match slider {
            Slider::Seek => {
                self.seek = slider_fraction(self.layout.seek, x);
                self.seek
            }
            Slider::Volume => {
                self.volume = slider_fraction(self.layout.volume, x);
                self.volume
            }
        }
    }

    pub fn draw(&self, draw: &Draw) {
        let l = &self.layout;
        let accent = hsb(265.0, 60.0, 95.0);
        let dim = hsba(0.0, 0.0, 100.0, 25.0);
        let text = hsb(0.0, 0.0, 90.0);

        draw.rect()
            .xy(self.bounds.xy())
            .wh(self.bounds.wh())
            .color(hsb(0.0, 0.0, 8.0));

        for (rect, caption) in [(l.back, Some("-30s")), (l.play, None), (l.forward, Some("+30s"))] {
            draw.rect()
                .xy(rect.xy())
                .wh(rect.wh())
                .color(hsb(0.0, 0.0, 16.0))
                .stroke(dim)
                .stroke_weight(1.0);
            if let Some(caption) = caption {
                draw.text(caption)
                    .xy(rect.xy())
                    .wh(rect.wh())
                    .color(text)
                    .font_size(12);
            }
        }
        self.draw_play_icon(draw, l.play);

        draw.text(&self.track_name)
            .xy(l.name.xy())
            .wh(l.name.wh())
            .left_justify()
            .no_line_wrap()
            .color(text)
            .font_size(13);

        draw_slider(draw, l.seek, self.seek, accent, dim);
        draw.text(&self.label)
            .xy(l.label.xy())
            .wh(l.label.wh())
            .color(text)
            .font_size(12);

        draw.text("vol")
            .xy(l.volume_caption.xy())
            .wh(l.volume_caption.wh())
            .right_justify()
            .color(text)
            .font_size(12);
        draw_slider(draw, l.volume, self.volume, accent, dim);
    }

    fn draw_play_icon(&self, draw: &Draw, rect: Rect) {
        let c = rect.xy();
        let color = hsb(0.0, 0.0, 95.0);
        match self.icon {
            PlayIcon::Play => {
                draw.tri()
                    .points(c + vec2(-5.0, 7.0), c + vec2(-5.0, -7.0), c + vec2(7.0, 0.0))
                    .color(color);
            }
            PlayIcon::Pause => {
                for dx in [-4.0, 4.0] {
                    draw.rect().xy(c + vec2(dx, 0.0)).w_h(4.0, 14.0).color(color);
                }
            }
        }
    }
}

fn draw_slider(draw: &Draw, rect: Rect, value: f32, fill: Srgba<u8>, track: Srgba<u8>) {
    let y = rect.y();
    draw.rect()
        .x_y(rect.x(), y)
        .w_h(rect.w(), SLIDER_TRACK_H)
        .color(track);

    let filled = rect.w() * value.clamp(0.0, 1.0);
    draw.rect()
        .x_y(rect.left() + filled / 2.0, y)
        .w_h(filled, SLIDER_TRACK_H)
        .color(fill);

    draw.ellipse()
        .x_y(rect.left() + filled, y)
        .w_h(12.0, 12.0)
        .color(fill);
}

impl TransportView for TransportBar {
    fn set_play_icon(&mut self, icon: PlayIcon) {
        self.icon = icon;
    }

    fn set_time_label(&mut self, text: &str) {
        if self.label != text {
            self.label = text.to_string();
        }
    }

    fn set_seek_position(&mut self, fraction: f32) {
        self.seek = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    fn cancel_seek_drag(&mut self) {
        if self.dragging == Some(Slider::Seek) {
            self.dragging = None;
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}
