// src/surface/headless.rs
//! In-memory surface implementation.
//!
//! Backs the demo binary and the test suite: no windowing system, just a
//! boxed pixel allocation that is handed out on lock and taken back on
//! present. Mirrors the ownership ping-pong a real host buffer provider
//! performs, including stride padding and teardown mid-session.

use crate::surface::{FrameBuffer, LockError, PixelFormat, Surface};
use log::{info, trace, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

struct HeadlessState {
    width: u32,
    height: u32,
    stride: u32,
    format: PixelFormat,
    /// `None` while a lock is outstanding.
    buffer: Option<FrameBuffer>,
    /// Applied when the outstanding buffer comes back, so a resize never
    /// invalidates a frame mid-draw.
    pending_resize: Option<(u32, u32)>,
    alive: bool,
}

/// A headless, heap-backed [`Surface`].
///
/// The buffer starts zeroed. `stride` may be set larger than `width` to
/// exercise stride-aware drawing the way padded host buffers do.
pub struct HeadlessSurface {
    state: Mutex<HeadlessState>,
    presented: AtomicU64,
}

impl HeadlessSurface {
    /// Every mutation of the state is complete before its guard drops, so
    /// a poisoned mutex still holds a consistent state; recover it rather
    /// than cascading the panic into whichever thread asks next.
    fn guard(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Creates a surface whose stride equals its width.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_stride(width, height, width)
    }

    /// Creates a surface with explicit stride padding (in pixels).
    #[must_use]
    pub fn with_stride(width: u32, height: u32, stride: u32) -> Self {
        let format = PixelFormat::Rgba8888;
        Self {
            state: Mutex::new(HeadlessState {
                width,
                height,
                stride,
                format,
                buffer: Some(FrameBuffer::new(width, height, stride, format)),
                pending_resize: None,
                alive: true,
            }),
            presented: AtomicU64::new(0),
        }
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn presented_frames(&self) -> u64 {
        self.presented.load(Ordering::Acquire)
    }

    /// Resizes the backing storage.
    ///
    /// Takes effect immediately if no lock is outstanding, otherwise when
    /// the current buffer is presented. Stride padding is preserved
    /// proportionally (same padding pixel count).
    pub fn resize(&self, width: u32, height: u32) {
        let mut state = self.guard();
        info!(
            "HeadlessSurface: resize {}x{} -> {}x{}",
            state.width, state.height, width, height
        );
        if state.buffer.is_some() {
            let padding = state.stride.saturating_sub(state.width);
            state.width = width;
            state.height = height;
            state.stride = width + padding;
            state.buffer = Some(FrameBuffer::new(width, height, state.stride, state.format));
        } else {
            state.pending_resize = Some((width, height));
        }
    }

    /// Tears the surface down. Outstanding and future locks fail with
    /// [`LockError::SurfaceGone`]; a buffer already out is swallowed on
    /// present.
    pub fn kill(&self) {
        let mut state = self.guard();
        info!("HeadlessSurface: killed");
        state.alive = false;
        state.buffer = None;
    }

    /// Clones the most recently presented pixels, padding included.
    ///
    /// Returns `None` while a lock is outstanding or after teardown.
    #[must_use]
    pub fn snapshot(&self) -> Option<FrameBuffer> {
        let state = self.guard();
        state.buffer.clone()
    }
}

impl Surface for HeadlessSurface {
    fn is_alive(&self) -> bool {
        self.guard().alive
    }

    fn lock(&self) -> Result<FrameBuffer, LockError> {
        let mut state = self.guard();
        if !state.alive {
            return Err(LockError::SurfaceGone);
        }
        match state.buffer.take() {
            Some(frame) => {
                trace!(
                    "HeadlessSurface: locked {}x{} stride={}",
                    frame.width(),
                    frame.height(),
                    frame.stride()
                );
                Ok(frame)
            }
            None => Err(LockError::AlreadyLocked),
        }
    }

    fn unlock_and_present(&self, frame: FrameBuffer) {
        let mut state = self.guard();
        if !state.alive {
            // Surface died while the frame was out; nothing to present to.
            trace!("HeadlessSurface: present after teardown, frame dropped");
            return;
        }
        if state.buffer.is_some() {
            warn!("HeadlessSurface: present without matching lock, frame dropped");
            return;
        }
        self.presented.fetch_add(1, Ordering::AcqRel);
        if let Some((width, height)) = state.pending_resize.take() {
            let padding = state.stride.saturating_sub(state.width);
            state.width = width;
            state.height = height;
            state.stride = width + padding;
            state.buffer = Some(FrameBuffer::new(width, height, state.stride, state.format));
        } else {
            state.buffer = Some(frame);
        }
    }
}
