// src/scene/mod.rs
//! Per-frame draw routines.
//!
//! A [`Scene`] paints one frame into a locked [`FrameBuffer`] given the
//! current animation clock value. Scenes are stateless between frames: all
//! animation derives from the clock, and dimensions are re-read from the
//! buffer on every call, so a surface resize needs no resynchronization.

use crate::config::SceneConfig;
use crate::surface::FrameBuffer;
use anyhow::Result;

/// One frame's worth of drawing.
///
/// Implementations must tolerate any buffer dimensions, including zero
/// width or height (draw nothing), and must not retain the frame.
pub trait Scene: Send + Sync {
    /// Paints a single frame. `time` is the animation clock value.
    ///
    /// An error skips nothing downstream: the render loop logs it and
    /// still presents whatever was written.
    fn draw(&self, frame: &mut FrameBuffer, time: f32) -> Result<()>;
}

/// Triangular (bounce) waveform over `[left, right]` with the given period.
///
/// Rises from `left` to `right` over the first half of the period, falls
/// back over the second half. Periodic: `bounce_position(t + period, ..)`
/// equals `bounce_position(t, ..)` for all `t`.
#[must_use]
pub fn bounce_position(time: f32, period: f32, left: f32, right: f32) -> f32 {
    let half = period / 2.0;
    let cycle = time.rem_euclid(period);
    let progress = if cycle < half {
        cycle / half
    } else {
        1.0 - (cycle - half) / half
    };
    left + progress * (right - left)
}

/// The reference scene: a filled circle bouncing horizontally across a
/// solid background.
pub struct BouncingCircle {
    config: SceneConfig,
}

impl BouncingCircle {
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    /// Horizontal circle center for the given clock value and frame width.
    ///
    /// The center travels between `margin` and `width - margin`. Frames
    /// narrower than twice the margin pin it to the left edge of travel.
    #[must_use]
    pub fn center_x(&self, time: f32, width: u32) -> f32 {
        let left = self.config.margin;
        let right = (width as f32 - self.config.margin).max(left);
        bounce_position(time, self.config.period, left, right)
    }
}

impl Scene for BouncingCircle {
    fn draw(&self, frame: &mut FrameBuffer, time: f32) -> Result<()> {
        let width = frame.width();
        let height = frame.height();
        if width == 0 || height == 0 {
            return Ok(());
        }

        let format = frame.format();
        let [r, g, b] = self.config.background;
        let background = format.pack(r, g, b);
        let [r, g, b] = self.config.foreground;
        let foreground = format.pack(r, g, b);

        for y in 0..height {
            if let Some(row) = frame.row_mut(y) {
                row.fill(background);
            }
        }

        let cx = self.center_x(time, width);
        let cy = height as f32 / 2.0;
        let radius = self.config.radius;
        let radius_sq = radius * radius;

        // Clamped bounding box; ranges go empty when the circle misses the
        // frame entirely.
        let min_y = (cy - radius).max(0.0) as u32;
        let max_y = ((cy + radius).min((height - 1) as f32)).max(0.0) as u32;
        let min_x = (cx - radius).max(0.0) as u32;
        let max_x = ((cx + radius).min((width - 1) as f32)).max(0.0) as u32;

        for y in min_y..=max_y {
            let dy = y as f32 - cy;
            let Some(row) = frame.row_mut(y) else {
                continue;
            };
            for x in min_x..=max_x {
                let dx = x as f32 - cx;
                if dx * dx + dy * dy <= radius_sq {
                    row[x as usize] = foreground;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
