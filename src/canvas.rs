use image::{Rgb, RgbImage};

/// Smoothing kernel matching the "smooth more" filter of common imaging toolkits.
pub const SMOOTH_MORE: ([[i32; 5]; 5], i32) = (
    [
        [1, 1, 1, 1, 1],
        [1, 5, 5, 5, 1],
        [1, 5, 44, 5, 1],
        [1, 5, 5, 5, 1],
        [1, 1, 1, 1, 1],
    ],
    100,
);

/// A color with its channels already multiplied by its alpha, all in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremulColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

pub fn premultiply(color: Rgb<u8>, alpha: f32) -> PremulColor {
    let a = alpha.clamp(0.0, 1.0);
    let [r, g, b] = color.0;
    PremulColor {
        r: r as f32 / 255.0 * a,
        g: g as f32 / 255.0 * a,
        b: b as f32 / 255.0 * a,
        a,
    }
}

/// Source-over compositing of `src` onto an opaque pixel.
pub fn composite_over(dst: Rgb<u8>, src: PremulColor) -> Rgb<u8> {
    if src.a <= 0.0 {
        return dst;
    }

    let keep = 1.0 - src.a;
    let [dr, dg, db] = dst.0;
    let channel = |s: f32, d: u8| ((s * 255.0 + d as f32 * keep).round()).clamp(0.0, 255.0) as u8;

    Rgb([channel(src.r, dr), channel(src.g, dg), channel(src.b, db)])
}

/// The RGB pixel buffer a single render pass draws into.
///
/// Drawing coordinates are inclusive and may lie anywhere; everything is clipped to the buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Clips an inclusive box to the buffer, returning `None` if nothing is left.
    fn clip(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> Option<(u32, u32, u32, u32)> {
        let (x0, x1) = (x0.min(x1), x0.max(x1));
        let (y0, y1) = (y0.min(y1), y0.max(y1));
        let max_x = self.width() as i64 - 1;
        let max_y = self.height() as i64 - 1;

        if x1 < 0 || y1 < 0 || x0 > max_x || y0 > max_y {
            return None;
        }

        Some((
            x0.max(0) as u32,
            y0.max(0) as u32,
            x1.min(max_x) as u32,
            y1.min(max_y) as u32,
        ))
    }

    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let Some((x0, y0, x1, y1)) = self.clip(x0, y0, x1, y1) else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    pub fn blend_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>, alpha: f32) {
        let Some((x0, y0, x1, y1)) = self.clip(x0, y0, x1, y1) else {
            return;
        };

        let src = premultiply(color, alpha);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dst = *self.image.get_pixel(x, y);
                self.image.put_pixel(x, y, composite_over(dst, src));
            }
        }
    }

    /// One-pixel rectangle outline, blended.
    pub fn blend_outline(
        &mut self,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        color: Rgb<u8>,
        alpha: f32,
    ) {
        self.blend_rect(x0, y0, x1, y0, color, alpha);
        if y1 != y0 {
            self.blend_rect(x0, y1, x1, y1, color, alpha);
        }
        if y1 - y0 > 1 {
            self.blend_rect(x0, y0 + 1, x0, y1 - 1, color, alpha);
            if x1 != x0 {
                self.blend_rect(x1, y0 + 1, x1, y1 - 1, color, alpha);
            }
        }
    }

    /// Filled ellipse inscribed in the inclusive bounding box.
    pub fn fill_ellipse(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        let Some((cx0, cy0, cx1, cy1)) = self.clip(x0, y0, x1, y1) else {
            return;
        };

        let cx = (x0 + x1) as f64 / 2.0;
        let cy = (y0 + y1) as f64 / 2.0;
        let rx = ((x1 - x0).abs() as f64 / 2.0).max(0.5);
        let ry = ((y1 - y0).abs() as f64 / 2.0).max(0.5);

        for y in cy0..=cy1 {
            let dy = (y as f64 - cy) / ry;
            for x in cx0..=cx1 {
                let dx = (x as f64 - cx) / rx;
                if dx * dx + dy * dy <= 1.0 {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Filled triangle; a degenerate triangle fills its bounding box instead.
    pub fn fill_triangle(&mut self, points: [(i64, i64); 3], color: Rgb<u8>) {
        let [a, b, c] = points;
        let min_x = a.0.min(b.0).min(c.0);
        let max_x = a.0.max(b.0).max(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);

        let edge = |p: (i64, i64), q: (i64, i64), x: i64, y: i64| {
            (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
        };

        let area = edge(a, b, c.0, c.1);
        if area == 0 {
            self.fill_rect(min_x, min_y, max_x, max_y, color);
            return;
        }

        let Some((x0, y0, x1, y1)) = self.clip(min_x, min_y, max_x, max_y) else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let (x, y) = (x as i64, y as i64);
                let w0 = edge(b, c, x, y);
                let w1 = edge(c, a, x, y);
                let w2 = edge(a, b, x, y);
                let inside = if area > 0 {
                    w0 >= 0 && w1 >= 0 && w2 >= 0
                } else {
                    w0 <= 0 && w1 <= 0 && w2 <= 0
                };
                if inside {
                    self.image.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    /// Convolves the whole canvas with a 5x5 kernel, extending edge pixels outward.
    pub fn convolve5x5(&mut self, kernel: &[[i32; 5]; 5], divisor: i32) {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 || divisor == 0 {
            return;
        }

        let source = self.image.clone();
        for y in 0..height {
            for x in 0..width {
                let mut acc = [0i32; 3];
                for (ky, row) in kernel.iter().enumerate() {
                    let sy = (y as i64 + ky as i64 - 2).clamp(0, height as i64 - 1) as u32;
                    for (kx, weight) in row.iter().enumerate() {
                        let sx = (x as i64 + kx as i64 - 2).clamp(0, width as i64 - 1) as u32;
                        let pixel = source.get_pixel(sx, sy);
                        for (c, value) in acc.iter_mut().enumerate() {
                            *value += pixel.0[c] as i32 * weight;
                        }
                    }
                }

                let out =
                    acc.map(|v| ((v as f64 / divisor as f64).round()).clamp(0.0, 255.0) as u8);
                self.image.put_pixel(x, y, Rgb(out));
            }
        }
    }
}
