/// Line rasterization onto RGB frames
use image::{Rgb, RgbImage};

/// A rendered frame: `size` x `size` pixels, 3 channels
pub type Frame = RgbImage;

/// Default wireframe colour
pub const LINE_COLOR: [u8; 3] = [255, 200, 100];

/// A privately owned drawing surface
pub struct Canvas {
    image: RgbImage,
    color: Rgb<u8>,
}

impl Canvas {
    /// A black `size` x `size` canvas drawing in `color`
    pub fn new(size: u32, color: [u8; 3]) -> Self {
        Self {
            image: RgbImage::new(size, size),
            color: Rgb(color),
        }
    }

    fn plot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x as u32 >= self.image.width() || y as u32 >= self.image.height() {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, self.color);
    }

    /// 8-connected Bresenham line, clipped to the canvas
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32)) {
        let (mut x0, mut y0) = (from.0 as i64, from.1 as i64);
        let (x1, y1) = (to.0 as i64, to.1 as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0 as i32, y0 as i32);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Closed outline through `points` in order. A single point is plotted.
    pub fn draw_closed_polyline(&mut self, points: &[(i32, i32)]) {
        match points {
            [] => {}
            [p] => self.plot(p.0, p.1),
            _ => {
                for pair in points.windows(2) {
                    self.draw_line(pair[0], pair[1]);
                }
                self.draw_line(points[points.len() - 1], points[0]);
            }
        }
    }

    pub fn into_frame(self) -> Frame {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(frame: &Frame) -> usize {
        frame.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    #[test]
    fn test_blank_canvas() {
        let frame = Canvas::new(16, LINE_COLOR).into_frame();
        assert_eq!(frame.dimensions(), (16, 16));
        assert_eq!(lit(&frame), 0);
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = Canvas::new(10, LINE_COLOR);
        canvas.draw_line((1, 2), (8, 2));
        let frame = canvas.into_frame();

        assert_eq!(lit(&frame), 8);
        assert_eq!(frame.get_pixel(1, 2).0, LINE_COLOR);
        assert_eq!(frame.get_pixel(8, 2).0, LINE_COLOR);
    }

    #[test]
    fn test_diagonal_is_eight_connected() {
        let mut canvas = Canvas::new(10, LINE_COLOR);
        canvas.draw_line((0, 0), (9, 9));
        let frame = canvas.into_frame();

        assert_eq!(lit(&frame), 10);
        for i in 0..10 {
            assert_eq!(frame.get_pixel(i, i).0, LINE_COLOR);
        }
    }

    #[test]
    fn test_clipping() {
        let mut canvas = Canvas::new(10, LINE_COLOR);
        canvas.draw_line((-50, 5), (50, 5));
        canvas.draw_line((-5, -5), (-1, -1));
        let frame = canvas.into_frame();

        assert_eq!(lit(&frame), 10);
    }

    #[test]
    fn test_closed_polyline() {
        let mut canvas = Canvas::new(10, [1, 2, 3]);
        canvas.draw_closed_polyline(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        let frame = canvas.into_frame();

        // Square outline of side 5
        assert_eq!(lit(&frame), 16);
        assert_eq!(frame.get_pixel(0, 2).0, [1, 2, 3]);
    }

    #[test]
    fn test_single_point() {
        let mut canvas = Canvas::new(4, LINE_COLOR);
        canvas.draw_closed_polyline(&[(2, 3)]);
        assert_eq!(lit(&canvas.into_frame()), 1);
    }
}
