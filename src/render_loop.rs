// src/render_loop.rs

//! The background render loop: lock, draw, present, pace.
//!
//! Runs on the thread spawned by the lifecycle controller. Cancellation is
//! cooperative: the `running` flag is checked at the top of every
//! iteration and nothing interrupts a frame mid-draw, so a frame that has
//! begun always reaches its present step before the loop can exit.

use crate::config::RenderConfig;
use crate::pacing::FramePacer;
use crate::scene::Scene;
use crate::surface::Surface;
use log::{debug, error, info, warn};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Monotonic animation time, owned exclusively by the render loop.
///
/// Advances by a fixed step each frame and wraps past a bound to keep the
/// value well inside `f32` precision. Never touched by the control thread.
#[derive(Debug)]
pub struct AnimationClock {
    time: f32,
    step: f32,
    wrap: f32,
}

impl AnimationClock {
    #[must_use]
    pub fn new(step: f32, wrap: f32) -> Self {
        Self {
            time: 0.0,
            step,
            wrap,
        }
    }

    /// Current clock value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.time
    }

    /// Advances by one frame step, wrapping past the bound.
    pub fn advance(&mut self) {
        self.time += self.step;
        if self.time > self.wrap {
            self.time = 0.0;
        }
    }
}

/// Body of the render thread. Returns when `running` is observed false,
/// which is the join target for the shutdown protocol.
///
/// Cycle per iteration:
/// 1. lock the surface buffer; a failed lock skips drawing but still paces,
///    so a dying surface cannot spin the loop hot;
/// 2. draw the scene; a draw error or panic is logged, never fatal;
/// 3. present unconditionally whenever the lock succeeded - the compositor
///    must get its buffer back on every exit path, a panicking draw
///    included, or later locks would starve on the missing buffer;
/// 4. advance the clock;
/// 5. pace to the target interval.
pub fn run_render_loop(
    surface: Arc<dyn Surface>,
    scene: Arc<dyn Scene>,
    running: Arc<AtomicBool>,
    config: &RenderConfig,
) {
    let mut clock = AnimationClock::new(config.clock_step, config.clock_wrap);
    let mut pacer = FramePacer::new(config.target_fps, config.pacing);
    info!(
        "Render loop started: {} fps target, {:?} pacing",
        config.target_fps, config.pacing
    );

    while running.load(Ordering::Acquire) {
        pacer.begin_frame();

        match surface.lock() {
            Ok(mut frame) => {
                // The unwind barrier keeps a panicking scene from carrying
                // the locked buffer out of the loop.
                let drawn = panic::catch_unwind(AssertUnwindSafe(|| {
                    scene.draw(&mut frame, clock.value())
                }));
                match drawn {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        warn!("Render loop: draw failed, presenting anyway: {e:#}");
                    }
                    Err(payload) => {
                        error!(
                            "Render loop: draw panicked, presenting anyway: {}",
                            panic_message(payload.as_ref())
                        );
                    }
                }
                surface.unlock_and_present(frame);
            }
            Err(e) => {
                debug!("Render loop: skipping frame, {e}");
            }
        }

        clock.advance();
        pacer.pace();
    }

    info!("Render loop exited");
}

/// Best-effort text from a caught panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic payload>"
    }
}
