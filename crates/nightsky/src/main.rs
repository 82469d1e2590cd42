use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nightsky_background::{SkyState, viewport_for};
use nightsky_config::Config;
use nightsky_core::{Layer, LayerStyle, Rgba};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
};
use tracing::{info, warn};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "could not load config, using defaults");
            Config::default()
        }
    };
    if let Some(path) = log_path {
        info!(path = %path.display(), style = ?config.style, "starting nightsky");
    }

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Settings loaded at startup; updated when saved.
    config: Config,
    /// Both background layers.
    sky: SkyState,
    /// Whether the key help bar is visible.
    show_help: bool,
    /// One-shot message shown in place of the help bar.
    status: Option<String>,
    /// Start of the animation clock.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let sky = SkyState::new(
            config.stars,
            config.shooting_stars,
            config.background,
            config.seed,
        );
        Self {
            running: false,
            show_help: config.show_help,
            config,
            sky,
            status: None,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);

        self.running = true;
        self.mounted(|app| {
            while app.running {
                let timestamp_ms = app.started.elapsed().as_secs_f64() * 1000.0;
                app.sky.frame(timestamp_ms);
                terminal.draw(|frame| app.render(frame))?;
                app.handle_crossterm_events()?;
            }
            Ok(())
        })
    }

    /// Mount the configured layers for the duration of `body`.
    /// Every layer is unmounted again, even when `body` fails.
    fn mounted<F>(&mut self, body: F) -> color_eyre::Result<()>
    where
        F: FnOnce(&mut Self) -> color_eyre::Result<()>,
    {
        self.sky.apply_style(self.config.style);
        let result = body(self);
        self.sky.apply_style(LayerStyle::None);
        result
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(self.sky.widget(), area);

        if !self.show_help && self.status.is_none() {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Sky
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let line = match &self.status {
            Some(message) => Line::from(message.clone().dark_gray()).centered(),
            None => self.help_line(),
        };
        frame.render_widget(line, chunks[1]);
    }

    fn help_line(&self) -> Line<'static> {
        let color = self.accent();
        Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "s".bold().fg(color),
            " stars  ".dark_gray(),
            "m".bold().fg(color),
            " shooting stars  ".dark_gray(),
            "c".bold().fg(color),
            " cycle  ".dark_gray(),
            "w".bold().fg(color),
            " save  ".dark_gray(),
            "h".bold().fg(color),
            " hide help".dark_gray(),
        ])
        .centered()
    }

    /// Key color taken from the shooting star trail.
    fn accent(&self) -> Color {
        self.config
            .shooting_stars
            .trail_color
            .with_alpha(1.0)
            .blend_over(Rgba::BLACK)
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls for at most one frame so the animation keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.config.frame_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        self.status = None;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) => {
                self.sky.toggle(Layer::Stars);
            }
            (_, KeyCode::Char('m')) => {
                self.sky.toggle(Layer::ShootingStars);
            }
            (_, KeyCode::Char('c')) => self.cycle_style(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            (_, KeyCode::Char('w')) => self.save_config(),
            _ => {}
        }
    }

    /// Re-measure the sky after the terminal changed size.
    fn resize(&mut self, columns: u16, rows: u16) {
        self.sky.resize(viewport_for(Rect::new(0, 0, columns, rows)));
    }

    /// Cycle through which layers are shown.
    fn cycle_style(&mut self) {
        self.sky.apply_style(self.sky.style().next());
    }

    /// Persist the current layer selection and help visibility.
    fn save_config(&mut self) {
        self.config.style = self.sky.style();
        self.config.show_help = self.show_help;
        self.status = Some(match self.config.save() {
            Ok(path) => format!("saved {}", path.display()),
            Err(e) => {
                warn!(error = %e, "could not save config");
                format!("save failed: {e}")
            }
        });
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
