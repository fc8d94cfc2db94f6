use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::scene::Scene;
use crate::game::{is_collided, Border, Entity, EntityKind, EntityView, Game, GameState};
use crate::metrics::GameMetrics;

/// What occupies one grid cell on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cell {
    Head,
    Body,
    Fruit,
    Inside,
    Outside,
}

/// Classify the unit cell at `(x, y)` from what the scene holds
pub(crate) fn classify(scene: &Scene, x: i64, y: i64) -> Cell {
    let cell = Entity::new(EntityKind::Snake, 0, x as f64, y as f64, 1.0);
    let covers = |view: &EntityView| {
        is_collided(
            &cell,
            &Entity::new(view.kind, view.id, view.x, view.y, view.size),
        )
    };

    if scene.get(EntityKind::Snake, 0).is_some_and(covers) {
        return Cell::Head;
    }
    if scene.of_kind(EntityKind::Snake).skip(1).any(covers) {
        return Cell::Body;
    }
    if scene.of_kind(EntityKind::Fruit).any(covers) {
        return Cell::Fruit;
    }
    match scene.border() {
        Some(border) if !covers(border) => Cell::Outside,
        _ => Cell::Inside,
    }
}

/// Border size for the header, flagged once it can shrink no further
pub(crate) fn border_label(border: &Border) -> String {
    if border.is_at_minimum() {
        format!("{:.1} (min)", border.size())
    } else {
        format!("{:.1}", border.size())
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, game: &Game<Scene>, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(game, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = chunks[1];
        let scene = game.sinks();
        if scene.replay_visible() {
            let game_over = self.render_game_over(scene, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, game);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(game.state());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, area: Rect, game: &Game<Scene>) -> Paragraph<'_> {
        let scene = game.sinks();
        let arena = game.config().arena_size.ceil() as i64;
        // Two columns per cell, minus the block's frame
        let rows = arena.min(area.height.saturating_sub(2) as i64);
        let cols = arena.min((area.width.saturating_sub(2) / 2) as i64);

        let mut lines = Vec::with_capacity(rows as usize);
        for y in 0..rows {
            let spans: Vec<Span> = (0..cols)
                .map(|x| match classify(scene, x, y) {
                    Cell::Head => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
                    Cell::Fruit => Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Cell::Inside => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    Cell::Outside => Span::styled("░░", Style::default().fg(Color::DarkGray)),
                })
                .collect();
            lines.push(Line::from(spans));
        }

        let title = match game.state() {
            GameState::Pause => " Paused - press Space ",
            GameState::Play => " Shrink Snake ",
            GameState::End => " Game Over ",
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

    fn render_stats(&self, game: &Game<Scene>, metrics: &GameMetrics) -> Paragraph<'_> {
        let previous = game
            .previous_score()
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());

        let text = vec![Line::from(vec![
            Span::styled("Points: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game.sinks().score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Last: ", Style::default().fg(Color::Yellow)),
            Span::styled(previous, Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Border: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                border_label(game.border()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, scene: &Scene, metrics: &GameMetrics) -> Paragraph<'_> {
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
                    scene.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Border shrinks: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.shrinks.to_string(), Style::default().fg(Color::White)),
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
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: GameState) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
        ];
        match state {
            GameState::Pause => {
                spans.push(Span::styled("Space", Style::default().fg(Color::Green)));
                spans.push(Span::raw(" to start | "));
            }
            GameState::Play => {
                spans.push(Span::styled("P", Style::default().fg(Color::Green)));
                spans.push(Span::raw(" to pause | "));
            }
            GameState::End => {}
        }
        spans.push(Span::styled("R", Style::default().fg(Color::Green)));
        spans.push(Span::raw(" to replay | "));
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Command, GameConfig, RenderSink};
    use std::time::Instant;

    #[test]
    fn test_empty_scene_is_all_inside() {
        let scene = Scene::new();
        assert_eq!(classify(&scene, 0, 0), Cell::Inside);
        assert_eq!(classify(&scene, 49, 49), Cell::Inside);
    }

    #[test]
    fn test_classify_after_tick() {
        let now = Instant::now();
        let mut game = Game::new(GameConfig::seeded(2), Scene::new(), now);
        game.handle_command(Command::Start, now);
        game.tick(now);
        let scene = game.sinks();

        assert_eq!(classify(scene, 0, 1), Cell::Head);
        assert_eq!(classify(scene, 0, 0), Cell::Body);
        assert_eq!(classify(scene, 25, 25), Cell::Fruit);
        assert_eq!(classify(scene, 10, 10), Cell::Inside);
    }

    #[test]
    fn test_cells_outside_shrunk_border() {
        let mut scene = Scene::new();
        scene.draw(
            &Entity::new(EntityKind::Border, 0, 3.53125, 3.53125, 42.9375).view(),
        );

        assert_eq!(classify(&scene, 2, 10), Cell::Outside);
        assert_eq!(classify(&scene, 3, 10), Cell::Inside);
        assert_eq!(classify(&scene, 47, 10), Cell::Outside);
    }

    #[test]
    fn test_border_label_marks_minimum() {
        let config = GameConfig::default();
        let mut border = Border::new(&config);
        assert_eq!(border_label(&border), "50.0");

        for _ in 0..20 {
            border.shrink();
        }
        assert_eq!(border_label(&border), "7.1 (min)");
    }
}
