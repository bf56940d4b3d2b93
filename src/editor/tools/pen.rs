use crate::geometry::{Color, ImagePoint};

pub const DEFAULT_LINE_WIDTH: f32 = 5.0;
pub const MIN_LINE_WIDTH: f32 = 1.0;
pub const MAX_LINE_WIDTH: f32 = 64.0;

/// Visual parameters shared by every stroke when it is replayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub line_width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl StrokeStyle {
    pub fn with_line_width(line_width: f32) -> Self {
        let mut style = Self::default();
        style.set_line_width(line_width);
        style
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.line_width = clamp_line_width(line_width);
    }
}

fn clamp_line_width(value: f32) -> f32 {
    if value.is_nan() {
        DEFAULT_LINE_WIDTH
    } else {
        value.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH)
    }
}

/// One freehand polyline in the image's native pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub points: Vec<ImagePoint>,
    pub finalized: bool,
}

impl Stroke {
    pub fn new(color: Color, start: ImagePoint) -> Self {
        Self {
            color,
            points: vec![start],
            finalized: false,
        }
    }

    /// Builds an already finished stroke, mostly for replaying recorded data.
    pub fn from_points(color: Color, points: Vec<ImagePoint>) -> Self {
        Self {
            color,
            points,
            finalized: true,
        }
    }

    pub fn append_point(&mut self, point: ImagePoint) -> bool {
        if self.finalized {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    pub fn segments(&self) -> impl Iterator<Item = (ImagePoint, ImagePoint)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_starts_with_single_point_and_grows_until_finalized() {
        let mut stroke = Stroke::new(Color::RED, ImagePoint::new(1.0, 2.0));
        assert!(stroke.append_point(ImagePoint::new(3.0, 4.0)));
        stroke.finalize();
        assert!(!stroke.append_point(ImagePoint::new(5.0, 6.0)));
        assert_eq!(
            stroke.points,
            vec![ImagePoint::new(1.0, 2.0), ImagePoint::new(3.0, 4.0)]
        );
    }

    #[test]
    fn segments_pair_consecutive_points() {
        let stroke = Stroke::from_points(
            Color::RED,
            vec![
                ImagePoint::new(0.0, 0.0),
                ImagePoint::new(1.0, 0.0),
                ImagePoint::new(1.0, 1.0),
            ],
        );
        let segments = stroke.segments().collect::<Vec<_>>();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], (ImagePoint::new(1.0, 0.0), ImagePoint::new(1.0, 1.0)));
        assert_eq!(
            Stroke::new(Color::RED, ImagePoint::new(0.0, 0.0))
                .segments()
                .count(),
            0
        );
    }

    #[test]
    fn line_width_is_clamped_into_supported_range() {
        assert_eq!(StrokeStyle::default().line_width, DEFAULT_LINE_WIDTH);
        assert_eq!(StrokeStyle::with_line_width(0.0).line_width, MIN_LINE_WIDTH);
        assert_eq!(StrokeStyle::with_line_width(500.0).line_width, MAX_LINE_WIDTH);
        assert_eq!(
            StrokeStyle::with_line_width(f32::NAN).line_width,
            DEFAULT_LINE_WIDTH
        );
    }
}
