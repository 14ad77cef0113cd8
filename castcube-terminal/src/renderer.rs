/// ASCII rasterizer consuming the packed vertex buffer and uniform block
use castcube_core::geometry::{triangles, Triangle, Vertex};
use castcube_core::{Camera, Uniforms};
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector4};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Largest width or height a target can have, matching what a terminal reports
pub const MAX_DIMENSION: usize = u16::MAX as usize;

/// ASCII renderer that converts the cube's triangle list to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    /// Each dimension is clamped to `MAX_DIMENSION`
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.min(MAX_DIMENSION);
        let height = height.min(MAX_DIMENSION);
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Aspect ratio of the target in square units
    pub fn aspect(&self) -> f32 {
        self.width as f32 / (self.height as f32 * CELL_ASPECT)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Draw a triangle list with the transforms of one frame
    pub fn render(&mut self, vertices: &[Vertex], uniforms: &Uniforms) {
        let mvp = uniforms.mvp();
        let normal_mat = uniforms.normal();
        let [r, g, b, _] = uniforms.ambient_color;
        let ambient = (r + g + b) / 3.0;

        for triangle in triangles(vertices) {
            self.render_triangle(&triangle, &mvp, &normal_mat, ambient);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        mvp: &Matrix4<f32>,
        normal_mat: &Matrix4<f32>,
        ambient: f32,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (coord, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            let [x, y, z] = vertex.position;
            let clip = mvp * Vector4::new(x, y, z, 1.0);
            // Off-screen vertices are kept; the raster clips per pixel
            match Camera::clip_to_screen(&clip, self.width as u32, self.height as u32) {
                Some(projected) => *coord = projected,
                None => return, // Behind the eye
            }
        }

        // Front faces wind clockwise in clip space, which is counter-clockwise
        // once screen y points down
        if signed_area(&screen_coords) <= 0.0 {
            return;
        }

        // Headlight shading: the eye looks down +Z, so a normal facing it has negative z
        let normal = normal_mat * triangle.face_normal().push(0.0);
        let facing = -normal.xyz().normalize().z;

        self.rasterize_triangle(&screen_coords, shade_character(facing, ambient));
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Depth is already divided by w, so linear is exact
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        if !(0.0..=1.0).contains(&depth) {
                            continue;
                        }

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                        }
                    }
                }
            }
        }
    }

    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    /// The frame as plain text, one string per row
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.char_buffer
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_at(x, y);

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Ramp character for a face whose normal has cosine `facing` with the view
/// direction, lifted by the `ambient` floor
fn shade_character(facing: f32, ambient: f32) -> char {
    let brightness = facing.max(0.0) + ambient;
    if brightness.is_nan() {
        return LUMINOSITY_RAMP[0];
    }

    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (brightness.clamp(0.0, 1.0) * last as f32) as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

/// Twice the signed area of a screen-space triangle, positive when it winds
/// counter-clockwise with y pointing down
fn signed_area(coords: &[(f32, f32, f32); 3]) -> f32 {
    let (a, b, c) = (coords[0], coords[1], coords[2]);
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
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

#[cfg(test)]
mod tests {
    use super::*;
    use castcube_core::{CubeScene, SceneConfig, CUBE_VERTICES};
    use std::f32::consts::FRAC_PI_3;

    fn render_scene(scene: &CubeScene, width: usize, height: usize) -> AsciiRenderer {
        let mut renderer = AsciiRenderer::new(width, height);
        let uniforms = scene.uniforms(renderer.aspect());
        renderer.render(&CUBE_VERTICES, &uniforms);
        renderer
    }

    #[test]
    fn test_front_face_is_lit() {
        let renderer = render_scene(&CubeScene::default(), 40, 20);
        assert_eq!(renderer.char_at(20, 10), '@');

        // Unrotated, only the face toward the eye is visible
        let drawn: Vec<char> = renderer
            .rows()
            .flat_map(|row| row.chars().collect::<Vec<_>>())
            .collect();
        assert!(drawn.iter().all(|c| *c == ' ' || *c == '@'));
        assert!(drawn.iter().filter(|c| **c == '@').count() > 20);
        // Corners stay empty
        assert_eq!(renderer.char_at(0, 0), ' ');
        assert_eq!(renderer.char_at(39, 19), ' ');
    }

    #[test]
    fn test_close_cube_fills_the_screen() {
        // The front face sits between the near plane and the eye-facing half
        // of the cube, so its corners project far outside the target
        for offset in [0.8, 1.0] {
            let config = SceneConfig {
                camera_offset: [0.0, 0.0, offset],
                ..SceneConfig::default()
            };
            let renderer = render_scene(&CubeScene::new(&config), 40, 20);
            assert_eq!(renderer.char_at(20, 10), '@', "offset {}", offset);
            assert!(renderer.rows().all(|row| row.chars().all(|c| c == '@')));
        }
    }

    #[test]
    fn test_side_faces_pick_ramp_by_angle() {
        // Sixty degrees about y: the +x face turns to 30 degrees off the view
        // axis and the front face to 60 degrees
        let config = SceneConfig {
            spin_axis: [0.0, 1.0, 0.0],
            ..SceneConfig::default()
        };
        let mut scene = CubeScene::new(&config);
        scene.spin.rotate(FRAC_PI_3);
        let renderer = render_scene(&scene, 60, 30);

        let mut shades: Vec<char> = renderer
            .rows()
            .flat_map(|row| row.chars().collect::<Vec<_>>())
            .filter(|c| *c != ' ')
            .collect();
        shades.sort_unstable();
        shades.dedup();
        assert_eq!(shades, vec!['%', '+']);
    }

    #[test]
    fn test_shade_character() {
        assert_eq!(shade_character(1.0, 0.1), '@');
        assert_eq!(shade_character(85f32.to_radians().cos(), 0.1), '.');
        assert_eq!(shade_character(0.5, 0.1), '+');
        // Faces turned away fall back to the ambient floor
        assert_eq!(shade_character(-0.7, 0.1), ' ');
        assert_eq!(shade_character(-0.7, 0.5), '=');
        assert_eq!(shade_character(f32::NAN, 0.1), ' ');
        assert_eq!(shade_character(0.9, f32::NAN), ' ');
        assert_eq!(shade_character(0.9, 0.9), '@');
    }

    #[test]
    fn test_oversized_target_is_clamped() {
        let renderer = AsciiRenderer::new(usize::MAX, 1);
        assert_eq!(renderer.width(), MAX_DIMENSION);
        assert_eq!(renderer.height(), 1);

        let empty = AsciiRenderer::new(usize::MAX, 0);
        assert_eq!(empty.rows().count(), 0);
    }

    #[test]
    fn test_cube_behind_eye_draws_nothing() {
        let config = SceneConfig {
            camera_offset: [0.0, 0.0, -3.0],
            ..SceneConfig::default()
        };
        let renderer = render_scene(&CubeScene::new(&config), 40, 20);
        assert!(renderer.rows().all(|row| row.trim().is_empty()));
    }

    #[test]
    fn test_rotated_cube_shows_several_shades() {
        let mut scene = CubeScene::default();
        scene.spin.rotate(0.9);
        let renderer = render_scene(&scene, 60, 30);

        let mut shades: Vec<char> = renderer
            .rows()
            .flat_map(|row| row.chars().collect::<Vec<_>>())
            .filter(|c| *c != ' ')
            .collect();
        shades.sort_unstable();
        shades.dedup();
        assert!(shades.len() >= 2, "shades: {:?}", shades);
    }

    #[test]
    fn test_nan_uniforms_are_ignored() {
        let mut scene = CubeScene::default();
        scene.spin.axis = [0.0, 0.0, 0.0];
        let renderer = render_scene(&scene, 20, 10);
        assert!(renderer.rows().all(|row| row.trim().is_empty()));
    }

    #[test]
    fn test_clear_and_rows() {
        let mut renderer = render_scene(&CubeScene::default(), 16, 8);
        assert_eq!(renderer.rows().count(), 8);
        assert!(renderer.rows().all(|row| row.chars().count() == 16));

        renderer.clear();
        assert!(renderer.rows().all(|row| row.trim().is_empty()));
    }

    #[test]
    fn test_draw_emits_every_row() {
        let renderer = render_scene(&CubeScene::default(), 10, 4);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 4);
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)];
        assert!(signed_area(&ccw) > 0.0);
        let cw = [(0.0, 0.0, 0.0), (0.0, 1.0, 0.0), (1.0, 0.0, 0.0)];
        assert!(signed_area(&cw) < 0.0);
    }
}
