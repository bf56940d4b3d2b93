use crate::geometry::{ClientPoint, DisplayRect, ImagePoint, SurfaceSize};

/// Converts client-space positions into the surface's native pixel space,
/// undoing whatever scale the host applied for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    display: DisplayRect,
    native: SurfaceSize,
}

impl CoordinateMapper {
    pub const fn new(display: DisplayRect, native: SurfaceSize) -> Self {
        Self { display, native }
    }

    pub const fn display(&self) -> DisplayRect {
        self.display
    }

    pub const fn native(&self) -> SurfaceSize {
        self.native
    }

    /// Native pixels per client pixel on each axis, if the display rect has area.
    pub fn scale(&self) -> Option<(f64, f64)> {
        if !self.display.has_area() {
            return None;
        }
        Some((
            f64::from(self.native.width) / self.display.width,
            f64::from(self.native.height) / self.display.height,
        ))
    }

    /// Points outside the surface are kept as-is; rendering clips them.
    pub fn map(&self, client: ClientPoint) -> Option<ImagePoint> {
        let (scale_x, scale_y) = self.scale()?;
        Some(ImagePoint::new(
            (client.x - self.display.left) * scale_x,
            (client.y - self.display.top) * scale_y,
        ))
    }
}
