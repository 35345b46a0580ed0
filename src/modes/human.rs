use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::assets::TextureCache;
use crate::game::{Board, BoardState, GameConfig, InputAction};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::screen::{Layer, LayerEvent, Menu, MenuCommand};

/// Interactive play: menus, the board and the terminal frame loop
pub struct HumanMode {
    config: GameConfig,
    seed: Option<u64>,
    layer: Layer,
    textures: TextureCache,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_action: Option<InputAction>,
    games_started: u64,
}

impl HumanMode {
    /// With a `seed`, game `n` of the session uses `seed + n`, wrapping at
    /// `u64::MAX`.
    pub fn new(config: GameConfig, seed: Option<u64>, textures: TextureCache) -> Self {
        Self {
            config,
            seed,
            layer: Layer::Menu(Menu::main()),
            textures,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_action: None,
            games_started: 0,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // One simulation step and one draw per frame
        let frame_duration = Duration::from_secs_f64(1.0 / f64::from(self.config.frame_rate));
        let mut frame_timer = interval(frame_duration);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Frame: update then draw
                _ = frame_timer.tick() => {
                    self.update_frame(frame_duration)?;
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.layer, &self.textures, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(action) => {
                    self.pending_action = Some(action);
                }
                KeyAction::Pause => {
                    if let Some(board) = self.layer.board_mut() {
                        board.toggle_pause();
                    }
                }
                KeyAction::Restart => {
                    if self.layer.board().is_some() {
                        self.start_game()?;
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    /// Deliver the latest pending action to the active layer
    fn update_frame(&mut self, frame: Duration) -> Result<()> {
        let action = self.pending_action.take().unwrap_or_default();

        match self.layer.update(action) {
            LayerEvent::Command(command) => self.apply(command)?,
            LayerEvent::Step(step) => {
                let Some(board) = self.layer.board() else {
                    return Ok(());
                };

                if board.state() == BoardState::Playing {
                    self.metrics.on_frame(frame);
                }

                // Track game over
                if step.collision.is_some() || step.board_full {
                    self.metrics
                        .on_game_over(board.score(), board.snake().len());
                }
            }
            LayerEvent::Idle => {}
        }

        Ok(())
    }

    fn apply(&mut self, command: MenuCommand) -> Result<()> {
        match command {
            MenuCommand::StartGame => self.start_game()?,
            MenuCommand::Options => self.layer = Layer::Menu(Menu::options()),
            MenuCommand::MainMenu => self.layer = Layer::Menu(Menu::main()),
            MenuCommand::Quit => self.should_quit = true,
        }

        Ok(())
    }

    fn start_game(&mut self) -> Result<()> {
        let config = self.config.clone();
        let board = match self.seed {
            Some(seed) => Board::with_seed(
                config,
                &mut self.textures,
                seed.wrapping_add(self.games_started),
            ),
            None => Board::new(config, &mut self.textures),
        }
        .context("Failed to set up the board")?;

        self.games_started += 1;
        self.metrics.on_game_start();
        self.layer = Layer::Board(board);
        info!("Game {} started", self.games_started);

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
