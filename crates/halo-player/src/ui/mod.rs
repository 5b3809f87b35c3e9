pub mod bindings;
pub mod help_overlay;
pub mod transport_bar;

pub use help_overlay::HelpOverlay;
pub use transport_bar::{Control, Slider, TransportBar};

use nannou::prelude::*;

use crate::renderer::CANVAS_SIZE;

/// Height of the control strip under the canvas
pub const BAR_HEIGHT: f32 = 100.0;

/// Square drawing area pinned to the top of the window
pub fn canvas_rect(window: Rect) -> Rect {
    Rect::from_x_y_w_h(
        window.x(),
        window.top() - CANVAS_SIZE / 2.0,
        CANVAS_SIZE,
        CANVAS_SIZE,
    )
}

/// Control strip directly under the canvas
pub fn bar_rect(window: Rect) -> Rect {
    Rect::from_x_y_w_h(
        window.x(),
        window.top() - CANVAS_SIZE - BAR_HEIGHT / 2.0,
        CANVAS_SIZE,
        BAR_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stacks_canvas_over_bar() {
        let window = Rect::from_w_h(500.0, 600.0);
        let canvas = canvas_rect(window);
        let bar = bar_rect(window);

        assert_eq!(canvas.top(), 300.0);
        assert_eq!(canvas.bottom(), -200.0);
        assert_eq!(bar.top(), canvas.bottom());
        assert_eq!(bar.bottom(), -300.0);
        assert_eq!(bar.w(), 500.0);
    }
}
