// src/lib.rs

//! softframe - a threaded, surface-backed frame renderer.
//!
//! A background thread repeatedly locks a host-owned pixel buffer, draws
//! one animation frame, presents it, and paces itself to a target frame
//! rate. A lifecycle controller starts and stops that thread in response to
//! surface notifications, with a join-based shutdown guarantee: once
//! [`lifecycle::SurfaceController::on_surface_destroyed`] returns, no
//! further buffer access can occur.
//!
//! The host windowing system is abstracted behind [`surface::Surface`];
//! adapt that trait to your backend (window back buffer, framebuffer
//! device, offscreen allocation) rather than reproducing any host's
//! callback names. [`surface::HeadlessSurface`] ships as the in-memory
//! reference implementation.

pub mod config;
pub mod lifecycle;
pub mod pacing;
pub mod render_loop;
pub mod scene;
pub mod surface;

pub use config::{Config, PacingPolicy, RenderConfig, SceneConfig};
pub use lifecycle::{LifecycleState, SurfaceController};
pub use scene::{BouncingCircle, Scene};
pub use surface::{FrameBuffer, HeadlessSurface, LockError, PixelFormat, Surface};
