use crate::color::Color;
use image::RgbImage;

/// Axis-aligned box in whole pixels, `x1`/`y1` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BBox {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        BBox { x0, y0, x1, y1 }
    }

    /// Box from `[x0, y0, x1, y1]` fractions of a square canvas, truncated
    pub fn scaled(size: u32, fractions: [f32; 4]) -> Self {
        let s = size as f32;
        BBox::new(
            (fractions[0] * s) as i32,
            (fractions[1] * s) as i32,
            (fractions[2] * s) as i32,
            (fractions[3] * s) as i32,
        )
    }

    /// Square box of `radius` around (`cx`, `cy`)
    pub fn around(cx: f32, cy: f32, radius: f32) -> Self {
        BBox::new(
            (cx - radius) as i32,
            (cy - radius) as i32,
            (cx + radius) as i32,
            (cy + radius) as i32,
        )
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    fn center(&self) -> (f32, f32) {
        (
            (self.x0 + self.x1) as f32 / 2.0,
            (self.y0 + self.y1) as f32 / 2.0,
        )
    }

    fn radii(&self) -> (f32, f32) {
        (self.width() as f32 / 2.0, self.height() as f32 / 2.0)
    }
}

/// Which side of the motif a wave sits on. Angles are degrees clockwise from
/// 3 o'clock, since image rows grow downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSpan {
    /// 90° -> 270°, through 9 o'clock
    Left,
    /// 270° -> 90°, through 3 o'clock
    Right,
}

impl ArcSpan {
    pub fn degrees(self) -> (f32, f32) {
        match self {
            ArcSpan::Left => (90.0, 270.0),
            ArcSpan::Right => (270.0, 90.0),
        }
    }
}

fn angle_in_span(angle: f32, start: f32, end: f32) -> bool {
    if start <= end {
        angle >= start && angle <= end
    } else {
        angle >= start || angle <= end
    }
}

/// Normalised distance of a point from an ellipse center; 1.0 is on the edge
fn ellipse_distance(x: f32, y: f32, cx: f32, cy: f32, rx: f32, ry: f32) -> f32 {
    if rx <= 0.0 || ry <= 0.0 {
        return f32::INFINITY;
    }
    let nx = (x - cx) / rx;
    let ny = (y - cy) / ry;
    nx * nx + ny * ny
}

/// Visit every canvas pixel inside `bbox` whose center passes `covers`,
/// compositing `color` at `opacity`. Writes outside the canvas are clipped.
fn paint<F>(img: &mut RgbImage, bbox: BBox, color: Color, opacity: f32, covers: F)
where
    F: Fn(f32, f32) -> bool,
{
    if bbox.is_empty() {
        return;
    }

    let x_start = bbox.x0.max(0) as u32;
    let y_start = bbox.y0.max(0) as u32;
    let x_end = (bbox.x1.max(0) as u32).min(img.width());
    let y_end = (bbox.y1.max(0) as u32).min(img.height());

    for py in y_start..y_end {
        for px in x_start..x_end {
            if !covers(px as f32 + 0.5, py as f32 + 0.5) {
                continue;
            }
            let below = Color::from_rgb(*img.get_pixel(px, py));
            img.put_pixel(px, py, color.over(below, opacity).to_rgb());
        }
    }
}

pub fn fill_rect(img: &mut RgbImage, bbox: BBox, color: Color) {
    paint(img, bbox, color, 1.0, |_, _| true);
}

/// Paint full-width row `y`
pub fn fill_row(img: &mut RgbImage, y: u32, color: Color) {
    if y >= img.height() {
        return;
    }
    let px = color.to_rgb();
    for x in 0..img.width() {
        img.put_pixel(x, y, px);
    }
}

pub fn fill_rounded_rect(img: &mut RgbImage, bbox: BBox, radius: f32, color: Color) {
    let (x0, y0, x1, y1) = (bbox.x0 as f32, bbox.y0 as f32, bbox.x1 as f32, bbox.y1 as f32);
    let r = radius.max(0.0).min(bbox.width() as f32 / 2.0).min(bbox.height() as f32 / 2.0);

    paint(img, bbox, color, 1.0, |x, y| {
        // Nearest corner center; pixels outside the corner squares are inside
        let cx = x.clamp(x0 + r, x1 - r);
        let cy = y.clamp(y0 + r, y1 - r);
        let dx = x - cx;
        let dy = y - cy;
        dx * dx + dy * dy <= r * r
    });
}

pub fn fill_ellipse(img: &mut RgbImage, bbox: BBox, color: Color) {
    let (cx, cy) = bbox.center();
    let (rx, ry) = bbox.radii();
    paint(img, bbox, color, 1.0, |x, y| {
        ellipse_distance(x, y, cx, cy, rx, ry) <= 1.0
    });
}

/// Ellipse outline `width` pixels thick, drawn inside `bbox`
pub fn stroke_ellipse(img: &mut RgbImage, bbox: BBox, width: u32, color: Color) {
    let (cx, cy) = bbox.center();
    let (rx, ry) = bbox.radii();
    let w = width as f32;
    paint(img, bbox, color, 1.0, |x, y| {
        ellipse_distance(x, y, cx, cy, rx, ry) <= 1.0
            && ellipse_distance(x, y, cx, cy, rx - w, ry - w) > 1.0
    });
}

/// Arc of the ellipse in `bbox`, `width` pixels thick inside the box, over
/// `span`. `opacity` below 1.0 blends the stroke with what is underneath.
pub fn stroke_arc(
    img: &mut RgbImage,
    bbox: BBox,
    span: ArcSpan,
    width: u32,
    color: Color,
    opacity: f32,
) {
    if opacity <= 0.0 {
        return;
    }
    let (cx, cy) = bbox.center();
    let (rx, ry) = bbox.radii();
    let w = width as f32;
    let (start, end) = span.degrees();

    paint(img, bbox, color, opacity, |x, y| {
        if ellipse_distance(x, y, cx, cy, rx, ry) > 1.0
            || ellipse_distance(x, y, cx, cy, rx - w, ry - w) <= 1.0
        {
            return false;
        }
        let angle = (y - cy).atan2(x - cx).to_degrees().rem_euclid(360.0);
        angle_in_span(angle, start, end)
    });
}
