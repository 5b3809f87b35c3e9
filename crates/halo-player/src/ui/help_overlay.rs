//! Help overlay showing keyboard shortcuts.

use nannou::prelude::*;

const SHORTCUTS: &[(&str, &str)] = &[
    ("h", "Toggle this help"),
    ("q", "Quit"),
    ("", ""),
    ("--- Playback ---", ""),
    ("Space", "Play / pause"),
    ("Left/Right", "Skip -30s / +30s"),
    ("Up/Down", "Volume"),
    ("Drag", "Seek and volume sliders"),
    ("", ""),
    ("--- Tracks ---", ""),
    ("n / p", "Next / previous track"),
    ("1-9", "Select track"),
];

/// Numbered entries for the first nine tracks, the current one marked
fn track_lines(tracks: &[String], current: usize) -> Vec<(String, String)> {
    tracks
        .iter()
        .take(9)
        .enumerate()
        .map(|(i, name)| {
            let marker = if i == current { "> " } else { "" };
            ((i + 1).to_string(), format!("{}{}", marker, name))
        })
        .collect()
}

/// Manages help overlay visibility
pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn draw(&self, draw: &Draw, bounds: Rect, tracks: &[String], current: usize) {
        if !self.visible {
            return;
        }

        let padding = 20.0;
        let line_height = 20.0;
        let font_size = 14;
        let key_col_width = 110.0;

        // Up to nine selectable tracks follow the shortcuts
        let numbered = track_lines(tracks, current);
        let visible_lines = SHORTCUTS.len() + numbered.len();
        let overlay_height =
            (line_height * (visible_lines as f32) + padding * 2.0).min(bounds.h() - 20.0);
        let overlay_width = (bounds.w() - 40.0).min(440.0);
        let center = bounds.xy();

        // Semi-transparent background
        draw.rect()
            .xy(center)
            .w_h(overlay_width, overlay_height)
            .color(rgba(0.0, 0.0, 0.0, 0.9));

        // Border
        draw.rect()
            .xy(center)
            .w_h(overlay_width, overlay_height)
            .stroke(rgba(1.0, 1.0, 1.0, 0.3))
            .stroke_weight(1.0)
            .no_fill();

        let start_y = center.y + overlay_height / 2.0 - padding - line_height / 2.0;
        let left_edge = center.x - overlay_width / 2.0 + padding;
        let desc_width = overlay_width - key_col_width - padding * 2.0 - 15.0;
        let key_x = left_edge + key_col_width / 2.0;
        let desc_x = left_edge + key_col_width + 15.0 + desc_width / 2.0;

        let lines = SHORTCUTS
            .iter()
            .map(|&(k, d)| (k, d))
            .chain(numbered.iter().map(|(k, d)| (k.as_str(), d.as_str())));

        for (i, (key, desc)) in lines.enumerate() {
            let y = start_y - (i as f32) * line_height;

            if key.is_empty() && desc.is_empty() {
                continue;
            }

            if key.starts_with("---") {
                draw.text(key)
                    .xy(pt2(center.x, y))
                    .wh(pt2(overlay_width - padding * 2.0, line_height))
                    .center_justify()
                    .color(rgba(0.5, 0.8, 1.0, 0.8))
                    .font_size(font_size);
            } else {
                draw.text(key)
                    .xy(pt2(key_x, y))
                    .wh(pt2(key_col_width, line_height))
                    .right_justify()
                    .color(rgb(0.3, 0.8, 1.0))
                    .font_size(font_size);

                draw.text(desc)
                    .xy(pt2(desc_x, y))
                    .wh(pt2(desc_width, line_height))
                    .left_justify()
                    .color(rgb(1.0, 1.0, 1.0))
                    .font_size(font_size);
            }
        }
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
