/// Terminal front-end drawing the spinning cube as ASCII
use castcube_core::{CubeScene, Vertex};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Angle nudge per arrow key press, in radians
const NUDGE: f32 = 0.1;
/// Spin speed change per key press, in radians per second
const SPEED_STEP: f32 = 0.25;

/// Render one frame of the scene into a fresh target of the given size
pub fn snapshot(
    vertices: &[Vertex],
    scene: &CubeScene,
    width: usize,
    height: usize,
) -> AsciiRenderer {
    let mut renderer = AsciiRenderer::new(width, height);
    let uniforms = scene.uniforms(renderer.aspect());
    renderer.render(vertices, &uniforms);
    renderer
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    vertices: &'static [Vertex],
    scene: CubeScene,
    renderer: AsciiRenderer,
    running: bool,
    paused: bool,
    last_update: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(vertices: &'static [Vertex], scene: CubeScene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let now = Instant::now();

        Ok(Self {
            vertices,
            scene,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            paused: false,
            last_update: now,
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.update(frame_start);
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Resize(width, height) => {
                log::debug!("terminal resized to {}x{}", width, height);
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.scene.spin.rotate(-NUDGE);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.scene.spin.rotate(NUDGE);
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.scene.spin.speed += SPEED_STEP;
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.scene.spin.speed -= SPEED_STEP;
            }
            _ => {}
        }
    }

    fn update(&mut self, now: Instant) {
        let dt = (now - self.last_update).as_secs_f32();
        self.last_update = now;
        if !self.paused {
            self.scene.advance(dt);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let uniforms = self.scene.uniforms(self.renderer.aspect());

        self.renderer.clear();
        self.renderer.render(self.vertices, &uniforms);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "castcube | FPS: {:.1} | spin {:.2} rad/s | A/D=Nudge W/S=Speed Space=Pause Q=Quit",
                self.fps, self.scene.spin.speed
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
