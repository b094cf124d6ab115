/// ASCII point-cloud rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use std::io::Write;
use wavegl_core::mesh::{FLOATS_PER_VERTEX, WAVE_AMPLITUDE};
use wavegl_core::projection::project_to_screen;

/// Character ramp from wave trough to crest
const HEIGHT_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Renders mesh vertices as characters, nearest point per cell wins
pub struct PointRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl PointRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Plot every `(x, y, z, w)` vertex of `vertices` through `mvp`
    pub fn render_points(&mut self, vertices: &[f32], mvp: &Matrix4<f32>) {
        for vertex in vertices.chunks_exact(FLOATS_PER_VERTEX) {
            let point = Point3::new(vertex[0], vertex[1], vertex[2]);
            if let Some((x, y, depth)) =
                project_to_screen(mvp, &point, self.width as u32, self.height as u32)
            {
                self.plot(x, y, depth, height_char(vertex[1]));
            }
        }
    }

    fn plot(&mut self, x: f32, y: f32, depth: f32, character: char) {
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    /// Rendered character at a cell, for inspection
    pub fn cell(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    '.' | ':' => Color::DarkRed,
                    '-' | '=' | '+' => Color::Red,
                    '*' | '#' => Color::Yellow,
                    '%' | '@' => Color::White,
                    _ => Color::Reset,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map a wave height in `[-A, A]` onto the character ramp
fn height_char(height: f32) -> char {
    let t = ((height / WAVE_AMPLITUDE + 1.0) * 0.5).clamp(0.0, 1.0);
    let idx = (t * (HEIGHT_RAMP.len() - 1) as f32).round() as usize;
    HEIGHT_RAMP[idx.min(HEIGHT_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavegl_core::matrix;

    #[test]
    fn test_height_ramp_ends() {
        assert_eq!(height_char(-WAVE_AMPLITUDE), '.');
        assert_eq!(height_char(WAVE_AMPLITUDE), '@');
        assert_eq!(height_char(10.0), '@');
    }

    #[test]
    fn test_nearest_point_wins() {
        let mut renderer = PointRenderer::new(20, 10);
        renderer.plot(5.0, 5.0, 0.9, '@');
        renderer.plot(5.0, 5.0, 0.5, '.');
        renderer.plot(5.0, 5.0, 0.7, '#');
        assert_eq!(renderer.cell(5, 5), '.');
    }

    #[test]
    fn test_point_in_front_of_camera_lands_in_center() {
        let mut renderer = PointRenderer::new(20, 10);
        let mvp = matrix::to_matrix4(&matrix::perspective(50.0, 2.0, 0.1, 100.0));
        renderer.render_points(&[0.0, 0.0, -4.0, 1.0], &mvp);
        assert_eq!(renderer.cell(10, 5), '+');

        renderer.clear();
        assert_eq!(renderer.cell(10, 5), ' ');
    }
}
