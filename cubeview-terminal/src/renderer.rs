/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use cubeview_core::{Color, DrawSurface, Scene, Triangle, Viewport};
use nalgebra::Matrix4;
use std::io::{self, Write};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide; the scene sees
/// a viewport of `rows * CELL_ASPECT` pixels so the cube stays square.
pub const CELL_ASPECT: u32 = 2;

/// Viewport for a terminal of `cols` x `rows` cells
pub fn terminal_viewport(cols: u16, rows: u16) -> Viewport {
    Viewport::new(u32::from(cols), u32::from(rows) * CELL_ASPECT)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub character: char,
    pub color: Option<Color>,
}

impl Cell {
    const EMPTY: Cell = Cell {
        character: ' ',
        color: None,
    };
}

/// Rasterizes the scene into a grid of shaded characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(viewport: Viewport) -> Self {
        let mut renderer = Self {
            width: 0,
            height: 0,
            depth_buffer: Vec::new(),
            cells: Vec::new(),
        };
        renderer.resize(viewport);
        renderer
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.width = viewport.width as usize;
        self.height = (viewport.height / CELL_ASPECT) as usize;
        let size = self.width * self.height;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.cells = vec![Cell::EMPTY; size];
    }

    /// Size in cells
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(Cell::EMPTY);
    }

    pub fn render_scene(&mut self, scene: &Scene) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let model = scene.cube.transform.model_matrix();
        for triangle in &scene.cube.mesh.triangles {
            self.render_triangle(triangle, &model, scene);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, model_matrix: &Matrix4<f32>, scene: &Scene) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (coords, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match scene.camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(projected) => *coords = projected,
                None => return, // Triangle is clipped
            }
        }

        // Shade from the face normal: the light picks the character,
        // the lit material picks the color
        let normal = triangle.vertices[0].normal;
        let world_normal = (scene.cube.transform.normal_matrix() * normal).normalize();
        let light = &scene.light;
        let brightness = if light.intensity > 0.0 {
            light.irradiance(&world_normal).luminance() / light.intensity
        } else {
            0.0
        };
        let char_index = (brightness.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let cell = Cell {
            character: LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)],
            color: Some(scene.cube.shade(&normal, light)),
        };

        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let [v0, v1, v2] = *coords;

        // Bounding box clipped to the screen
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i64).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i64).min(self.width as i64 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i64).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p)
                else {
                    return; // Degenerate triangle
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Write the grid, row by row, starting at the top-left corner
    pub fn draw<W: Write>(&self, writer: &mut W, background: Color) -> io::Result<()> {
        let (r, g, b) = background.to_rgb8();
        writer.queue(SetBackgroundColor(TermColor::Rgb { r, g, b }))?;

        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            writer.queue(MoveTo(0, y as u16))?;
            for cell in row {
                if let Some(color) = cell.color {
                    let (r, g, b) = color.to_rgb8();
                    writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                }
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

/// Drawing surface that renders to a terminal writer
pub struct TerminalSurface<W: Write> {
    renderer: AsciiRenderer,
    out: W,
    /// One-line overlay drawn over the top row
    pub status: String,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self {
            renderer: AsciiRenderer::new(viewport),
            out,
            status: String::new(),
        }
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> DrawSurface for TerminalSurface<W> {
    type Error = io::Error;

    fn set_size(&mut self, viewport: Viewport) {
        self.renderer.resize(viewport);
    }

    fn draw(&mut self, scene: &Scene) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_scene(scene);
        self.renderer.draw(&mut self.out, scene.background)?;

        if !self.status.is_empty() {
            self.out
                .queue(MoveTo(0, 0))?
                .queue(SetForegroundColor(TermColor::Yellow))?
                .queue(Print(&self.status))?
                .queue(ResetColor)?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_core::{DrawSurface, SceneConfig};

    fn scene(viewport: Viewport) -> Scene {
        Scene::new(&SceneConfig::default(), viewport)
    }

    #[test]
    fn test_terminal_viewport_doubles_rows() {
        assert_eq!(terminal_viewport(80, 24), Viewport::new(80, 48));
    }

    #[test]
    fn test_cube_covers_center() {
        let viewport = terminal_viewport(80, 24);
        let mut renderer = AsciiRenderer::new(viewport);
        renderer.render_scene(&scene(viewport));

        assert_eq!(renderer.dimensions(), (80, 24));
        let center = renderer.cell(40, 12).unwrap();
        assert_ne!(center.character, ' ');
        assert!(center.color.is_some());
        // Corners stay empty
        assert_eq!(renderer.cell(0, 0), Some(Cell::EMPTY));
        assert_eq!(renderer.cell(79, 23), Some(Cell::EMPTY));
    }

    #[test]
    fn test_clear_empties_grid() {
        let viewport = terminal_viewport(40, 20);
        let mut renderer = AsciiRenderer::new(viewport);
        renderer.render_scene(&scene(viewport));
        renderer.clear();
        assert_eq!(renderer.cell(20, 10), Some(Cell::EMPTY));
    }

    #[test]
    fn test_zero_size_is_harmless() {
        let mut renderer = AsciiRenderer::new(Viewport::new(0, 0));
        renderer.render_scene(&scene(Viewport::new(1, 1)));
        assert_eq!(renderer.dimensions(), (0, 0));
        assert!(renderer.cell(0, 0).is_none());
    }

    #[test]
    fn test_surface_resize_and_draw() {
        let mut surface = TerminalSurface::new(Vec::new(), terminal_viewport(20, 10));
        surface.set_size(terminal_viewport(30, 12));
        assert_eq!(surface.renderer().dimensions(), (30, 12));

        surface.status = "paused".to_string();
        let scene = scene(terminal_viewport(30, 12));
        surface.draw(&scene).unwrap();

        let output = String::from_utf8_lossy(surface.writer_mut());
        assert!(output.contains("paused"));
        assert!(LUMINOSITY_RAMP[1..].iter().any(|c| output.contains(*c)));
    }
}
