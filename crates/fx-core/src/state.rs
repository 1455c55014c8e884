//! Surface-side state shared by the scenes.
//!
//! These types avoid platform APIs: the host surface is reached through the
//! [`Surface`] trait so the same tracking code runs against a canvas in the
//! browser and a fake in host tests.

use crate::gl::GlBackend;
use glam::Vec2;

/// Layout box of the surface in page (client) coordinates, origin top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// The drawable the engine renders into.
pub trait Surface {
    /// Size the surface is displayed at, in the pixels its backing buffer should have.
    fn display_size(&self) -> (u32, u32);
    /// Currently allocated backing-buffer size.
    fn backing_size(&self) -> (u32, u32);
    /// Reallocate the backing buffer.
    fn set_backing_size(&self, width: u32, height: u32);
    /// Layout box, used to map page coordinates onto the surface.
    fn bounding_rect(&self) -> SurfaceRect;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub width: u32,
    pub height: u32,
}

/// Last pointer position in surface space (origin bottom-left, y up).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

/// Map a page-space event position onto the surface, flipping y so the
/// origin is bottom-left. Not clamped: positions outside the box stay
/// outside.
#[inline]
pub fn page_to_surface(raw_x: f32, raw_y: f32, rect: &SurfaceRect) -> Vec2 {
    Vec2::new(raw_x - rect.left, rect.height - (raw_y - rect.top))
}

/// Viewport and pointer tracking for one surface.
#[derive(Debug, Default)]
pub struct SurfaceState {
    viewport: ViewportState,
    // size last handed to `gl.viewport`; None until the first sync
    gl_viewport: Option<ViewportState>,
    pointer: PointerState,
    reallocations: u64,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the backing buffer and GPU viewport in line with the displayed
    /// size. Returns `true` when the backing buffer was reallocated. Cheap
    /// when nothing changed.
    pub fn sync_viewport<S: Surface, G: GlBackend>(&mut self, surface: &S, gl: &G) -> bool {
        let (width, height) = surface.display_size();
        let mut reallocated = false;
        if surface.backing_size() != (width, height) {
            surface.set_backing_size(width, height);
            self.reallocations += 1;
            reallocated = true;
        }
        let target = ViewportState { width, height };
        if self.gl_viewport != Some(target) {
            gl.viewport(0, 0, width as i32, height as i32);
            self.gl_viewport = Some(target);
        }
        self.viewport = target;
        reallocated
    }

    /// Record a pointer move given in page coordinates. Last write wins.
    pub fn on_pointer_move<S: Surface>(&mut self, surface: &S, raw_x: f32, raw_y: f32) {
        let local = page_to_surface(raw_x, raw_y, &surface.bounding_rect());
        self.pointer = PointerState {
            x: local.x,
            y: local.y,
        };
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Forget the viewport handed to GL so the next sync sets it again, as
    /// needed on a fresh context.
    pub fn reset_gl(&mut self) {
        self.gl_viewport = None;
    }

    /// Number of backing-buffer reallocations performed so far.
    pub fn reallocations(&self) -> u64 {
        self.reallocations
    }
}
