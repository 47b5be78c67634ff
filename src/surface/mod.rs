// src/surface/mod.rs
//! Surface abstraction - the seam between the render loop and the host
//! compositor.
//!
//! A [`Surface`] hands out exclusive write access to its current pixel
//! storage as an owned [`FrameBuffer`] and takes it back on
//! [`Surface::unlock_and_present`]. All communication happens via ownership
//! transfer - the render loop can never retain a buffer past its unlock,
//! because unlocking consumes it.
//!
//! ## Threading Model
//! - `lock` / `unlock_and_present` are called only from the render thread,
//!   always as a bracketed pair.
//! - The control thread never touches pixel storage; it only drives
//!   lifecycle transitions on the controller.

pub mod headless;

pub use headless::HeadlessSurface;

use std::fmt;

/// Pixel channel layout for a 32-bit pixel.
///
/// Hosts differ on byte order; the draw routine packs its colors through
/// the buffer's reported format rather than assuming one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Little-endian RGBA: red in the low byte.
    Rgba8888,
    /// ARGB: blue in the low byte, alpha in the high byte.
    Argb8888,
}

impl PixelFormat {
    /// Packs an opaque color into a single 32-bit pixel in this format.
    #[must_use]
    pub fn pack(self, r: u8, g: u8, b: u8) -> u32 {
        let (r, g, b) = (u32::from(r), u32::from(g), u32::from(b));
        match self {
            PixelFormat::Rgba8888 => r | (g << 8) | (b << 16) | (0xFF << 24),
            PixelFormat::Argb8888 => (0xFF << 24) | (r << 16) | (g << 8) | b,
        }
    }
}

/// Exclusive, transient view of a surface's pixel storage.
///
/// Valid only between a [`Surface::lock`] and the matching
/// [`Surface::unlock_and_present`]. `stride` is in pixels, not bytes, and
/// may exceed `width` due to host alignment; every row offset computation
/// must go through it.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    stride: u32,
    format: PixelFormat,
    pixels: Box<[u32]>,
}

impl FrameBuffer {
    /// Allocates a zeroed buffer. `stride` is clamped up to `width` so the
    /// addressable region is always in bounds.
    #[must_use]
    pub fn new(width: u32, height: u32, stride: u32, format: PixelFormat) -> Self {
        let stride = stride.max(width);
        let len = stride as usize * height as usize;
        Self {
            width,
            height,
            stride,
            format,
            pixels: vec![0u32; len].into_boxed_slice(),
        }
    }

    /// Width of the addressable region in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in pixels. May exceed `width`.
    #[must_use]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Channel layout of each pixel.
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The addressable pixels of row `y`, excluding stride padding.
    ///
    /// Returns `None` for out-of-range rows, including every row of a
    /// zero-width buffer (an empty addressable region).
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u32]> {
        if y >= self.height || self.width == 0 {
            return None;
        }
        let start = y as usize * self.stride as usize;
        Some(&mut self.pixels[start..start + self.width as usize])
    }

    /// Reads one pixel. Row offsets go through the stride.
    ///
    /// Returns `None` out of the addressable region.
    #[must_use]
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.stride as usize + x as usize])
    }

    /// Raw pixel storage, padding included. Test hooks and blit paths only;
    /// drawing code goes through [`FrameBuffer::row_mut`].
    #[must_use]
    pub fn raw_pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable raw pixel storage, padding included.
    pub fn raw_pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }
}

/// Why a lock attempt yielded no buffer.
///
/// None of these are fatal: the render loop skips the frame, paces, and
/// re-checks its running flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockError {
    /// The surface exists but has no buffer to give out right now.
    NotReady,
    /// A previous lock is still outstanding. At most one `FrameBuffer` may
    /// be out per surface at any instant.
    AlreadyLocked,
    /// The surface has been torn down and will never produce a buffer again.
    SurfaceGone,
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::NotReady => write!(f, "surface not ready for locking"),
            LockError::AlreadyLocked => write!(f, "surface buffer already locked"),
            LockError::SurfaceGone => write!(f, "surface has been destroyed"),
        }
    }
}

impl std::error::Error for LockError {}

/// A lockable, presentable pixel target owned by the host.
///
/// Implementations wrap whatever the host compositor provides (a window
/// back buffer, a framebuffer device mapping, an offscreen allocation).
/// The render loop drives them through this trait only.
pub trait Surface: Send + Sync {
    /// Whether the underlying host target still exists.
    ///
    /// The lifecycle controller refuses to start a session on a dead
    /// surface; a surface dying mid-session surfaces as
    /// [`LockError::SurfaceGone`] instead.
    fn is_alive(&self) -> bool;

    /// Acquires exclusive write access to the current pixel storage.
    ///
    /// Every `Ok` must be paired with exactly one
    /// [`Surface::unlock_and_present`] call from the same thread.
    fn lock(&self) -> Result<FrameBuffer, LockError>;

    /// Releases the buffer and presents it to the compositor.
    ///
    /// Consumes the frame, so a stale reference past the unlock is
    /// unrepresentable.
    fn unlock_and_present(&self, frame: FrameBuffer);
}
