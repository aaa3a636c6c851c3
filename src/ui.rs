use crate::consts;
use crate::game::{
    ActivePowerUp, Cell, Direction, GameOverCause, Grid, MutationKind, Phase, Snapshot,
};
use crate::leaderboard::Leaderboard;
use crate::util::{abbreviate, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Widget},
};

/// Width of player IDs in the leaderboard panel
const PLAYER_WIDTH: usize = 20;

/// Everything that's drawn on the game screen: the grid with the snake & item,
/// a score bar, and a side panel with the power-up status & leaderboard
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameView<'a> {
    pub(crate) snapshot: Snapshot,
    pub(crate) leaderboard: &'a Leaderboard,
    pub(crate) player: &'a str,
}

impl Widget for &GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let snap = &self.snapshot;
        let score_bar = format!(
            " Score: {}   Tier: {}   Tick: {} ms",
            snap.score,
            snap.tier,
            snap.period.as_millis()
        );
        Line::from(score_bar)
            .style(consts::SCORE_BAR_STYLE)
            .render(
                Rect {
                    height: 1,
                    ..display
                },
                buf,
            );

        let block_area = grid_block_area(display, snap.grid);
        Block::bordered().render(block_area, buf);
        let mut canvas = Canvas {
            area: Rect {
                x: block_area.x.saturating_add(1),
                y: block_area.y.saturating_add(1),
                width: block_area.width.saturating_sub(2),
                height: block_area.height.saturating_sub(2),
            },
            buf,
        };
        if let Some(item) = snap.item {
            canvas.draw_cell(item.cell, item_symbol(item.kind), consts::ITEM_STYLE);
        }
        let style = snake_style(snap.power_up_kind());
        for &cell in snap.snake.iter().skip(1) {
            canvas.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, style);
        }
        if let Some(head) = snap.head() {
            if matches!(
                snap.phase,
                Phase::GameOver(GameOverCause::HitWall | GameOverCause::HitSelf)
            ) {
                canvas.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                canvas.draw_cell(head, head_symbol(snap.heading), style);
            }
        }

        let panel_x = block_area.right().saturating_add(2);
        let panel = Rect {
            x: panel_x,
            y: block_area.y,
            width: display.right().saturating_sub(panel_x),
            height: display.height.saturating_sub(2),
        };
        self.side_panel().render(panel, buf);

        let help = Line::from_iter([
            Span::styled("←↑↓→", consts::KEY_STYLE),
            Span::raw(" steer   "),
            Span::styled("r", consts::KEY_STYLE),
            Span::raw(" restart   "),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(" quit"),
        ]);
        help.render(
            Rect {
                x: display.x.saturating_add(1),
                y: display.bottom().saturating_sub(1),
                width: display.width.saturating_sub(1),
                height: 1,
            },
            buf,
        );
    }
}

impl GameView<'_> {
    fn side_panel(&self) -> Text<'static> {
        let snap = &self.snapshot;
        let mut lines = vec![Line::from(format!(
            "Player: {}",
            abbreviate(self.player, PLAYER_WIDTH)
        ))];
        match snap.phase {
            Phase::Running => {
                lines.push(power_up_line(snap.power_up));
                if snap.double_points_pending {
                    lines.push(Line::from("Next catch scores double!"));
                } else {
                    lines.push(Line::default());
                }
            }
            Phase::GameOver(cause) => {
                lines.push(Line::from(format!("GAME OVER: the snake {cause}!")));
                let rank = match self.leaderboard.rank_of(self.player) {
                    Some(rank) => format!("Your best is #{rank}."),
                    None => String::from("Not on the leaderboard."),
                };
                lines.push(Line::from(format!("{rank}  Press r to play again.")));
            }
        }
        lines.push(Line::default());
        lines.push(Line::from(
            MutationKind::iter()
                .map(|kind| format!("{} {kind}", item_symbol(kind)))
                .collect::<Vec<_>>()
                .join("  "),
        ));
        lines.push(Line::default());
        lines.push(Line::from("Leaderboard"));
        if self.leaderboard.entries().is_empty() {
            lines.push(Line::from("  (no scores yet)"));
        }
        for (i, entry) in self.leaderboard.entries().iter().enumerate() {
            let line = Line::from(format!(
                "{rank:>2}. {name:<width$} {score:>5}",
                rank = i + 1,
                width = PLAYER_WIDTH,
                name = abbreviate(&entry.player, PLAYER_WIDTH),
                score = entry.score,
            ));
            if entry.player == self.player {
                lines.push(line.style(consts::PLAYER_ENTRY_STYLE));
            } else {
                lines.push(line);
            }
        }
        Text::from(lines)
    }
}

/// The area of the bordered block around the grid: the top-left of the
/// display, just below the score bar
fn grid_block_area(display: Rect, grid: Grid) -> Rect {
    let width = u16::try_from(grid.width())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let height = u16::try_from(grid.height())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    Rect {
        x: display.x,
        y: display.y.saturating_add(1),
        width,
        height,
    }
    .intersection(display)
}

fn power_up_line(power_up: Option<ActivePowerUp>) -> Line<'static> {
    match power_up {
        Some(ActivePowerUp { kind, remaining }) => Line::from(format!(
            "Power-up: {kind} ({:.1}s left)",
            remaining.as_secs_f64()
        )),
        None => Line::from("Power-up: none"),
    }
}

fn snake_style(power_up: Option<MutationKind>) -> Style {
    match power_up {
        Some(MutationKind::Camouflage) => consts::CAMOUFLAGED_SNAKE_STYLE,
        Some(MutationKind::Shield) => consts::SHIELDED_SNAKE_STYLE,
        _ => consts::SNAKE_STYLE,
    }
}

fn head_symbol(heading: Option<Direction>) -> char {
    match heading {
        Some(Direction::North) => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Some(Direction::South) => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Some(Direction::East) => consts::SNAKE_HEAD_EAST_SYMBOL,
        Some(Direction::West) => consts::SNAKE_HEAD_WEST_SYMBOL,
        None => consts::SNAKE_HEAD_IDLE_SYMBOL,
    }
}

fn item_symbol(kind: MutationKind) -> char {
    match kind {
        MutationKind::Speed => consts::SPEED_SYMBOL,
        MutationKind::Shield => consts::SHIELD_SYMBOL,
        MutationKind::DoublePoints => consts::DOUBLE_POINTS_SYMBOL,
        MutationKind::Camouflage => consts::CAMOUFLAGE_SYMBOL,
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let (Ok(dx), Ok(dy)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        if dx >= self.area.width || dy >= self.area.height {
            return;
        }
        if let Some(c) = self
            .buf
            .cell_mut((self.area.x.saturating_add(dx), self.area.y.saturating_add(dy)))
        {
            c.set_char(symbol);
            c.set_style(style);
        }
    }
}
