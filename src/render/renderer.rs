use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::assets::TextureCache;
use crate::game::{Board, BoardState, Entity};
use crate::metrics::GameMetrics;
use crate::screen::{Layer, Menu};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        layer: &Layer,
        textures: &TextureCache,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board or menu
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        match layer {
            Layer::Board(board) => {
                frame.render_widget(self.render_stats(board, metrics), chunks[0]);

                if board.state() == BoardState::GameOver {
                    frame.render_widget(self.render_game_over(board, metrics), chunks[1]);
                } else {
                    frame.render_widget(self.render_board(board, textures), chunks[1]);
                }

                frame.render_widget(self.render_game_controls(), chunks[2]);
            }
            Layer::Menu(menu) => {
                let area = centered(chunks[1], 30, menu.items().len() as u16 + 4);
                frame.render_widget(self.render_menu(menu), area);
                frame.render_widget(self.render_menu_controls(), chunks[2]);
            }
        }
    }

    fn render_board(&self, board: &Board, textures: &TextureCache) -> Paragraph<'static> {
        let width = board.width() as usize;
        let height = board.height() as usize;
        let tile = board.config().tile_size;

        let empty = Span::styled(". ", Style::default().fg(Color::DarkGray));
        let mut cells = vec![vec![empty; width]; height];

        // back to front, so the head ends up on top
        for entity in board.entities().into_iter().rev() {
            if let Some((col, row)) = cell_of(entity, tile, width, height) {
                cells[row][col] = self.entity_span(entity, textures);
            }
        }

        let lines: Vec<Line> = cells.into_iter().map(Line::from).collect();

        let title = match board.state() {
            BoardState::Paused => " Snek - PAUSED ",
            _ => " Snek ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn entity_span(&self, entity: &Entity, textures: &TextureCache) -> Span<'static> {
        let sprite = entity
            .texture
            .and_then(|handle| textures.sheet(handle))
            .and_then(|sheet| sheet.sprite(entity.sprite_index));

        let Some(sprite) = sprite else {
            return Span::styled("? ", Style::default().fg(Color::Magenta));
        };

        let color = sprite
            .color
            .as_deref()
            .and_then(|name| name.parse::<Color>().ok())
            .unwrap_or(Color::White);

        Span::styled(
            sprite.glyph(entity.rotation_degrees()).to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    }

    fn render_stats(&self, board: &Board, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(board.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(board.snake().len().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{:.1}", board.snake().speed()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, board: &Board, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    board.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Longest: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.longest_snake.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Esc",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for the menu", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_menu(&self, menu: &Menu) -> Paragraph<'static> {
        let lines: Vec<Line> = menu
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == menu.selected() {
                    Line::from(Span::styled(
                        format!("> {}", item.label),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {}", item.label),
                        Style::default().fg(Color::White),
                    ))
                }
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(format!(" {} ", menu.title())),
        )
    }

    fn render_game_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("A/D", Style::default().fg(Color::Cyan)),
            Span::raw(" to turn | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("Esc", Style::default().fg(Color::Cyan)),
            Span::raw(" menu | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓", Style::default().fg(Color::Cyan)),
            Span::raw(" to choose | "),
            Span::styled("→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" to select | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Grid cell holding the entity's center, if it is on the board
fn cell_of(entity: &Entity, tile: f32, width: usize, height: usize) -> Option<(usize, usize)> {
    let center = entity.bounds().center();
    let col = (center.x / tile).floor();
    let row = (center.y / tile).floor();

    if col < 0.0 || row < 0.0 || col >= width as f32 || row >= height as f32 {
        return None;
    }

    Some((col as usize, row as usize))
}

/// `width` x `height` box centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, InputAction, Vec2};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(layer: &Layer, textures: &TextureCache) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                Renderer::new().render(frame, layer, textures, &GameMetrics::new());
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn config() -> GameConfig {
        GameConfig {
            rock_count: 2,
            ..GameConfig::small()
        }
    }

    #[test]
    fn test_cell_of_uses_center() {
        let entity = Entity::tile(Vec2::new(52.0, 18.0), 20.0, None);
        assert_eq!(cell_of(&entity, 20.0, 10, 10), Some((3, 1)));

        let off_board = Entity::tile(Vec2::new(-15.0, 0.0), 20.0, None);
        assert_eq!(cell_of(&off_board, 20.0, 10, 10), None);
    }

    #[test]
    fn test_board_shows_head_facing_up() {
        let mut textures = TextureCache::builtin();
        let board = Board::with_seed(config(), &mut textures, 1).unwrap();
        let screen = draw(&Layer::Board(board), &textures);

        assert!(screen.contains('▲'));
        assert!(screen.contains('■'));
        assert!(screen.contains('●'));
        assert!(screen.contains("Score:"));
    }

    #[test]
    fn test_paused_title() {
        let mut textures = TextureCache::builtin();
        let mut board = Board::with_seed(config(), &mut textures, 1).unwrap();
        board.pause();

        let screen = draw(&Layer::Board(board), &textures);
        assert!(screen.contains("PAUSED"));
    }

    #[test]
    fn test_missing_texture_draws_placeholder() {
        let mut textures = TextureCache::builtin();
        let board = Board::with_seed(config(), &mut textures, 1).unwrap();

        // a fresh cache knows none of the board's handles
        let screen = draw(&Layer::Board(board), &TextureCache::builtin());
        assert!(screen.contains('?'));
    }

    #[test]
    fn test_menu_marks_selection() {
        let mut menu = Menu::main();
        menu.update(InputAction::Backward);

        let screen = draw(&Layer::Menu(menu), &TextureCache::builtin());
        assert!(screen.contains("> Options"));
        assert!(screen.contains("  Start Game"));
    }
}
