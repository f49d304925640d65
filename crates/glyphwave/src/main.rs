use std::io::stdout;
use std::time::Instant;

use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use glyphwave_art::{builtin_styles, load_style_set};
use glyphwave_config::Config;
use glyphwave_core::{CellMetrics, ColorTheme, StyleSet};
use glyphwave_engine::{BufferSurface, EngineConfig, GlitchRng, GlyphEngine, ManualScheduler};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::Line,
};
use tracing::{debug, info};

mod logging;

type Engine = GlyphEngine<ManualScheduler, BufferSurface>;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    logging::init(&config)?;
    let styles = load_styles(&config)?;

    let terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
    let result = App::new(config, styles).run(terminal);
    let cleanup = execute!(stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    result?;
    cleanup?;
    Ok(())
}

/// The configured style file, or the built-in styles.
fn load_styles(config: &Config) -> color_eyre::Result<StyleSet> {
    match &config.styles_file {
        Some(path) => load_style_set(path)
            .wrap_err_with(|| format!("failed to load styles from {}", path.display())),
        None => Ok(builtin_styles()),
    }
}

/// Map a terminal position to logical grid coordinates (the center of the glyph cell).
fn pointer_position(
    content: Rect,
    metrics: &CellMetrics,
    column: u16,
    row: u16,
) -> Option<(f32, f32)> {
    if !content.contains(ratatui::layout::Position::new(column, row)) {
        return None;
    }
    let col = f32::from(column - content.x);
    let row = f32::from(row - content.y);
    Some((
        (col + 0.5) * metrics.cell_width,
        (row + 0.5) * metrics.line_height,
    ))
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    styles: StyleSet,
    /// Foreground theme the current engine was created with.
    theme: ColorTheme,
    engine: Engine,
    /// Where the engine's surface was last drawn.
    content: Rect,
    /// Whether the pointer is over the content area.
    pointer_inside: bool,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, styles: StyleSet) -> Self {
        let theme = config.theme;
        let engine = build_engine(&config, &styles, config.style.as_deref(), theme, 0);
        Self {
            running: false,
            config,
            styles,
            theme,
            engine,
            content: Rect::ZERO,
            pointer_inside: false,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.engine.start();
        while self.running {
            self.engine.pump(self.elapsed_ms());
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.engine.stop();
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let color = self.theme.color();
        let area = frame.area();
        let (width, height) = self
            .engine
            .surface()
            .map(BufferSurface::cell_size)
            .unwrap_or_default();

        let chunks = Layout::vertical([
            Constraint::Fill(1),        // Top padding
            Constraint::Length(height), // Glyph grid
            Constraint::Fill(1),        // Bottom padding
            Constraint::Length(1),      // Help text
        ])
        .split(area);

        let grid_row = chunks[1];
        let width = width.min(grid_row.width);
        self.content = Rect::new(
            grid_row.x + (grid_row.width - width) / 2,
            grid_row.y,
            width,
            grid_row.height,
        );
        if let Some(surface) = self.engine.surface() {
            frame.render_widget(surface, self.content);
        }

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "n".bold().fg(color),
            " next  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color  ".dark_gray(),
            "r".bold().fg(color),
            " restyle".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[3]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one frame interval so the animation keeps running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.config.frame_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::FocusLost => self.pointer_left(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('n')) => {
                let now = self.elapsed_ms();
                self.engine.skip(now);
            }
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('r')) => self.reinitialize(None),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !matches!(
            mouse.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)
        ) {
            return;
        }
        match pointer_position(self.content, &self.config.cells, mouse.column, mouse.row) {
            Some((x, y)) => {
                self.pointer_inside = true;
                self.engine.on_pointer_move(x, y);
            }
            None => self.pointer_left(),
        }
    }

    fn pointer_left(&mut self) {
        if self.pointer_inside {
            self.pointer_inside = false;
            self.engine.on_pointer_leave();
        }
    }

    /// Cycle through color themes. The theme is sampled once per engine, so this
    /// builds a new one showing the same style.
    fn cycle_color_theme(&mut self) {
        self.theme = self.theme.next();
        let style = self.engine.style().map(|s| s.name.clone());
        self.reinitialize(style.as_deref());
    }

    /// Replace the engine with a fresh instance.
    fn reinitialize(&mut self, style: Option<&str>) {
        self.engine.stop();
        self.pointer_inside = false;
        let now = self.elapsed_ms();
        self.engine = build_engine(&self.config, &self.styles, style, self.theme, now);
        self.engine.start();
        debug!(theme = ?self.theme, "engine reinitialized");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        info!("quit requested");
        self.running = false;
    }
}

fn build_engine(
    config: &Config,
    styles: &StyleSet,
    style: Option<&str>,
    theme: ColorTheme,
    now_ms: u64,
) -> Engine {
    let engine_config = EngineConfig {
        cells: config.cells,
        physics: config.physics,
        morph: config.morph,
        cycle: config.cycle,
        density: config.density,
    };
    GlyphEngine::with_style_set(
        engine_config,
        styles,
        style,
        theme.color(),
        ManualScheduler::starting_at(now_ms),
        BufferSurface::new(config.cells),
        GlitchRng::from_time(),
    )
}
