/// Terminal frontend for the animated wave mesh
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::warn;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wavegl_core::matrix;
use wavegl_core::{FpsCounter, FrameDriver, KeyCommand, PointerTracker, ViewControl};

pub mod config;
pub mod renderer;

pub use config::Args;
pub use renderer::PointRenderer;

/// Approximate pixel size of a terminal cell; drags are scaled to pixels
/// so pan and orbit speed match a windowed viewer.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Main application struct for terminal rendering
pub struct TerminalApp {
    driver: FrameDriver,
    renderer: PointRenderer,
    pointer: PointerTracker,
    fps: FpsCounter,
    frame_time: Duration,
    running: bool,
}

impl TerminalApp {
    pub fn new(driver: FrameDriver, target_fps: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut app = Self::with_size(driver, target_fps, width, height);
        app.resize(width, height);
        Ok(app)
    }

    fn with_size(driver: FrameDriver, target_fps: u32, width: u16, height: u16) -> Self {
        Self {
            driver,
            renderer: PointRenderer::new(width as usize, height as usize),
            pointer: PointerTracker::new(),
            fps: FpsCounter::new(Instant::now()),
            frame_time: Duration::from_secs(1) / target_fps.max(1),
            running: true,
        }
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn into_driver(self) -> FrameDriver {
        self.driver
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Drain pending input before the tick
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            let output = self
                .driver
                .tick()
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

            self.render(&output.projection, &output.model_view)?;

            self.fps.record_frame(Instant::now());
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }
        }

        Ok(())
    }

    /// Apply one terminal event to the view
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.resize(width, height),
            _ => {}
        }
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) {
        if kind != KeyEventKind::Press {
            return;
        }
        let command = match code {
            KeyCode::Esc => Some(KeyCommand::Quit),
            KeyCode::Char(c) => KeyCommand::from_char(c.to_ascii_lowercase()),
            _ => None,
        };
        match command {
            Some(KeyCommand::Quit) => self.running = false,
            Some(KeyCommand::ToggleStrategy) => {
                if let Err(err) = self.driver.toggle_strategy() {
                    warn!("cannot switch vertex generation: {}", err);
                }
            }
            None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let x = mouse.column as f32 * CELL_WIDTH_PX;
        let y = mouse.row as f32 * CELL_HEIGHT_PX;
        match mouse.kind {
            MouseEventKind::Down(_) | MouseEventKind::Moved | MouseEventKind::Up(_) => {
                self.pointer.anchor(x, y);
            }
            MouseEventKind::Drag(button) => {
                let (dx, dy) = self.pointer.drag_to(x, y);
                let primary = button == MouseButton::Left;
                let secondary = button == MouseButton::Right;
                self.driver.on_drag(dx, dy, primary, secondary);
            }
            MouseEventKind::ScrollDown => {
                self.pointer.anchor(x, y);
                self.driver.on_scroll(1.0);
            }
            MouseEventKind::ScrollUp => {
                self.pointer.anchor(x, y);
                self.driver.on_scroll(-1.0);
            }
            _ => {}
        }
    }

    /// Cells are about twice as tall as wide, so the projection sees the
    /// surface in pixel proportions.
    fn resize(&mut self, width: u16, height: u16) {
        self.renderer.resize(width as usize, height as usize);
        self.driver
            .on_resize(width as u32 * CELL_WIDTH_PX as u32, height as u32 * CELL_HEIGHT_PX as u32);
    }

    fn render(&mut self, projection: &matrix::Matrix16, model_view: &matrix::Matrix16) -> io::Result<()> {
        let mvp = matrix::to_matrix4(projection) * matrix::to_matrix4(model_view);

        // Clear renderer
        self.renderer.clear();

        // Render the point cloud
        self.renderer.render_points(self.driver.vertices(), &mvp);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        format!(
            "wavegl - {} mode: {:.2} FPS | LMB=Pan RMB=Orbit Wheel=Zoom T=Toggle Q=Quit",
            self.driver.strategy(),
            self.fps.fps()
        )
    }
}
