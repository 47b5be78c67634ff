// src/lifecycle/mod.rs
//! Surface lifecycle controller.
//!
//! Reacts to surface-available / resized / destroyed notifications from the
//! host windowing system and owns the render session: the background thread
//! and its running flag. The one guarantee this module exists to provide is
//! the shutdown protocol - [`SurfaceController::on_surface_destroyed`] does
//! not return until the render thread has observed the stop request and
//! fully terminated, so the host may tear the surface down the moment it
//! regains control.
//!
//! ## Threading Model
//! - All controller methods run on the control thread.
//! - Exactly one render thread exists per active session; it only ever
//!   touches the surface through lock/present brackets.
//! - The running flag is the sole unlocked shared state (Release store on
//!   stop, Acquire load in the loop).
//!
//! Calling a transition from the wrong state is a contract violation by the
//! host; it is logged and ignored rather than propagated, since an error
//! return would leave the state machine inconsistent.

use crate::config::RenderConfig;
use crate::render_loop::run_render_loop;
use crate::scene::Scene;
use crate::surface::Surface;
use log::{error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Controller states. `Stopping` is only observable from the render thread's
/// perspective; the control thread passes through it inside
/// `on_surface_destroyed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No surface, no session.
    Idle,
    /// Session live, render thread drawing.
    Active,
    /// Stop requested, join in progress.
    Stopping,
}

/// One live render session: the background thread plus its stop flag.
///
/// Exists if and only if a start has occurred and no matching stop has
/// completed - encoded by the controller holding `Option<RenderSession>`.
struct RenderSession {
    running: Arc<AtomicBool>,
    thread: thread::JoinHandle<()>,
}

/// Drives render sessions in response to host surface notifications.
///
/// Owns the scene and render configuration; each
/// [`SurfaceController::on_surface_available`] call binds them to a fresh
/// session on the offered surface. One controller handles one surface at a
/// time, but independent controllers run independent sessions.
pub struct SurfaceController {
    scene: Arc<dyn Scene>,
    config: RenderConfig,
    state: LifecycleState,
    session: Option<RenderSession>,
}

impl SurfaceController {
    #[must_use]
    pub fn new(scene: Arc<dyn Scene>, config: RenderConfig) -> Self {
        Self {
            scene,
            config,
            state: LifecycleState::Idle,
            session: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The host surface is ready for drawing: spawn the render session.
    ///
    /// Valid only from `Idle`. A dead surface, a repeated call, or a failed
    /// thread spawn is logged and leaves the controller `Idle` (or `Active`
    /// with its existing session, for the repeated call) - never a panic.
    pub fn on_surface_available(&mut self, surface: Arc<dyn Surface>) {
        if self.state != LifecycleState::Idle {
            warn!(
                "SurfaceController: on_surface_available ignored in state {:?}",
                self.state
            );
            return;
        }
        if !surface.is_alive() {
            warn!("SurfaceController: surface is not alive, session not started");
            return;
        }

        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);
        let scene = Arc::clone(&self.scene);
        let config = self.config.clone();

        let spawned = thread::Builder::new()
            .name("render-loop".to_string())
            .spawn(move || {
                run_render_loop(surface, scene, thread_running, &config);
            });

        match spawned {
            Ok(thread) => {
                self.session = Some(RenderSession { running, thread });
                self.state = LifecycleState::Active;
                info!("SurfaceController: session started, Idle -> Active");
            }
            Err(e) => {
                error!("SurfaceController: failed to spawn render thread: {e}");
            }
        }
    }

    /// The host surface changed size. Informational only: the render loop
    /// re-reads dimensions from every locked buffer, so nothing needs
    /// resynchronizing here.
    pub fn on_surface_resized(&mut self, width: u32, height: u32) {
        if self.state != LifecycleState::Active {
            warn!(
                "SurfaceController: on_surface_resized({width}, {height}) ignored in state {:?}",
                self.state
            );
            return;
        }
        info!("SurfaceController: surface resized to {width}x{height}");
    }

    /// The host surface is about to be destroyed: stop the session.
    ///
    /// Valid only from `Active`. Blocks until the render thread has exited
    /// its loop and been joined; on return the host is guaranteed no
    /// further buffer access will occur. A panicked render thread is logged
    /// and treated as terminated - `join` only returns once the thread is
    /// finished either way.
    pub fn on_surface_destroyed(&mut self) {
        if self.state != LifecycleState::Active {
            warn!(
                "SurfaceController: on_surface_destroyed ignored in state {:?}",
                self.state
            );
            return;
        }

        self.state = LifecycleState::Stopping;
        info!("SurfaceController: Active -> Stopping, joining render thread");

        match self.session.take() {
            Some(session) => {
                session.running.store(false, Ordering::Release);
                if let Err(panic) = session.thread.join() {
                    error!("SurfaceController: render thread panicked: {panic:?}");
                }
            }
            None => {
                // Unreachable if the state machine holds; recover anyway.
                error!("SurfaceController: Active with no session, nothing to join");
            }
        }

        self.state = LifecycleState::Idle;
        info!("SurfaceController: render thread joined, Stopping -> Idle");
    }
}

impl Drop for SurfaceController {
    /// A controller dropped mid-session still quiesces its render thread;
    /// leaking a detached thread past the surface's lifetime is the one
    /// failure mode this type exists to rule out.
    fn drop(&mut self) {
        if self.state == LifecycleState::Active {
            warn!("SurfaceController: dropped while Active, stopping session");
            self.on_surface_destroyed();
        }
    }
}
