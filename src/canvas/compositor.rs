use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use image::RgbaImage;

use super::{CompositeError, CompositeResult};
use crate::assets::ImageAsset;
use crate::editor::tools::{Stroke, StrokeStyle};
use crate::geometry::SurfaceSize;

/// Composited pixels at the image's native size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width(), self.height())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Row-major RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

/// Decodes the asset and replays `strokes` over it.
pub fn render_asset(
    asset: &ImageAsset,
    strokes: &[Stroke],
    style: StrokeStyle,
) -> CompositeResult<RasterSurface> {
    let base = asset
        .blob
        .decode_rgba()
        .map_err(|source| CompositeError::Asset {
            asset_id: asset.id,
            source,
        })?;
    Ok(RasterSurface::new(composite(&base, strokes, style)?))
}

/// Full redraw: the base image at the origin, then every stroke in order so
/// later strokes cover earlier ones.
pub fn composite(
    base: &RgbaImage,
    strokes: &[Stroke],
    style: StrokeStyle,
) -> CompositeResult<RgbaImage> {
    if base.width() == 0 || base.height() == 0 {
        return Ok(base.clone());
    }

    let mut surface = rgba_image_to_cairo_surface(base)?;
    {
        let context = Context::new(&surface)?;
        for stroke in strokes {
            paint_stroke(&context, stroke, style)?;
        }
    }
    surface.flush();
    cairo_surface_to_rgba_image(&mut surface)
}

/// Strokes one polyline with round caps and joins. Cairo fills the union of
/// the stroke outline, so a path crossing itself is blended once.
///
/// Non-finite points are skipped. Fewer than two usable points paint nothing.
pub fn paint_stroke(
    context: &Context,
    stroke: &Stroke,
    style: StrokeStyle,
) -> Result<(), cairo::Error> {
    let mut points = stroke
        .points
        .iter()
        .filter(|point| point.x.is_finite() && point.y.is_finite())
        .peekable();
    let Some(first) = points.next() else {
        return Ok(());
    };
    if points.peek().is_none() {
        return Ok(());
    }

    let (r, g, b) = stroke.color.rgb();
    set_source_rgb_u8(context, r, g, b);
    context.set_line_width(f64::from(style.line_width));
    context.set_line_cap(LineCap::Round);
    context.set_line_join(LineJoin::Round);
    context.move_to(first.x, first.y);
    for point in points {
        context.line_to(point.x, point.y);
    }
    context.stroke()
}

fn set_source_rgb_u8(context: &Context, r: u8, g: u8, b: u8) {
    context.set_source_rgb(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    );
}

fn rgba_image_to_cairo_surface(image: &RgbaImage) -> CompositeResult<ImageSurface> {
    let invalid = || CompositeError::InvalidSurface {
        width: image.width(),
        height: image.height(),
    };
    let width = i32::try_from(image.width()).map_err(|_| invalid())?;
    let height = i32::try_from(image.height()).map_err(|_| invalid())?;
    let mut surface = ImageSurface::create(Format::ARgb32, width, height)?;
    let stride = usize::try_from(surface.stride()).map_err(|_| invalid())?;

    {
        let mut data = surface.data()?;
        let src_row_len = image.width() as usize * 4;
        let src = image.as_raw();

        for (row, src_row) in src.chunks_exact(src_row_len).enumerate() {
            let dst_row_offset = row * stride;
            let dst_row = data
                .get_mut(dst_row_offset..dst_row_offset + src_row_len)
                .ok_or_else(invalid)?;

            for (src_pixel, dst_pixel) in src_row.chunks_exact(4).zip(dst_row.chunks_exact_mut(4)) {
                let [r, g, b, a] = [src_pixel[0], src_pixel[1], src_pixel[2], src_pixel[3]];
                let premultiply = |channel: u8| -> u8 {
                    ((u16::from(channel) * u16::from(a) + 127) / 255) as u8
                };
                // ARGB32 is stored native-endian: B, G, R, A on little-endian hosts.
                dst_pixel.copy_from_slice(&match a {
                    0 => [0, 0, 0, 0],
                    255 => [b, g, r, 255],
                    _ => [premultiply(b), premultiply(g), premultiply(r), a],
                });
            }
        }
    }

    surface.flush();
    Ok(surface)
}

fn cairo_surface_to_rgba_image(surface: &mut ImageSurface) -> CompositeResult<RgbaImage> {
    let width = u32::try_from(surface.width()).unwrap_or(0);
    let height = u32::try_from(surface.height()).unwrap_or(0);
    let invalid = || CompositeError::InvalidSurface { width, height };
    let stride = usize::try_from(surface.stride()).map_err(|_| invalid())?;
    let row_len = width as usize * 4;

    let data = surface.data()?;
    let mut rgba_bytes = Vec::with_capacity(row_len * height as usize);
    for row in 0..height as usize {
        let offset = row * stride;
        let src_row = data.get(offset..offset + row_len).ok_or_else(invalid)?;
        for src_pixel in src_row.chunks_exact(4) {
            let [b, g, r, a] = [src_pixel[0], src_pixel[1], src_pixel[2], src_pixel[3]];
            let unpremultiply = |channel: u8| -> u8 {
                ((u16::from(channel) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8
            };
            rgba_bytes.extend_from_slice(&match a {
                0 => [0, 0, 0, 0],
                255 => [r, g, b, 255],
                _ => [unpremultiply(r), unpremultiply(g), unpremultiply(b), a],
            });
        }
    }

    RgbaImage::from_raw(width, height, rgba_bytes).ok_or_else(invalid)
}
