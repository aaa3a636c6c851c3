//! The game engine.  Nothing in here draws, reads input, or looks at a clock:
//! the front end pushes directions & elapsed time in and pulls
//! [`Snapshot`]s & [`GameEvent`]s out.
mod direction;
mod grid;
mod item;
mod pace;
mod powerup;
mod scoring;
mod snake;
mod snapshot;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::{Cell, Grid};
pub(crate) use self::item::MutationKind;
pub(crate) use self::powerup::ActivePowerUp;
pub(crate) use self::scoring::{EvolutionTier, Milestone};
pub(crate) use self::snapshot::Snapshot;
use self::item::Item;
use self::pace::Pace;
use self::powerup::PowerUps;
use self::scoring::Scoreboard;
use self::snake::Snake;
use crate::consts;
use rand::Rng;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Gameplay settings that can be changed in the configuration file
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Rules {
    /// Scores at which the rewards collaborator is notified
    pub(crate) reward_thresholds: Vec<u32>,

    /// Whether the speed granted by a Speed power-up is taken back when the
    /// power-up ends
    pub(crate) symmetric_speed_revert: bool,
}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            reward_thresholds: consts::DEFAULT_REWARD_THRESHOLDS.to_vec(),
            symmetric_speed_revert: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    Running,
    GameOver(GameOverCause),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameOverCause {
    HitWall,
    HitSelf,
    /// The snake fills the grid and there is nowhere left to put an item
    BoardFull,
}

impl fmt::Display for GameOverCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverCause::HitWall => f.write_str("hit a wall"),
            GameOverCause::HitSelf => f.write_str("ran into itself"),
            GameOverCause::BoardFull => f.write_str("filled the board"),
        }
    }
}

/// Something that happened during a tick or countdown step
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum GameEvent {
    Consumed {
        kind: MutationKind,
        points: u32,
        score: u32,
    },
    PowerUpStarted(MutationKind),
    PowerUpEnded(MutationKind),
    Evolved(EvolutionTier),
    Milestone(&'static str),
    ThresholdReached(u32),
    GameOver {
        cause: GameOverCause,
        score: u32,
    },
}

/// A single session, from the snake's first appearance until game over
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    rules: Rules,
    grid: Grid,
    snake: Snake,

    /// The direction the snake moved in on the most recent tick; `None` until
    /// the player first picks a direction
    heading: Option<Direction>,

    /// The most recent direction input, applied at the start of the next tick
    pending: Option<Direction>,

    item: Option<Item>,
    powerups: PowerUps,
    pace: Pace,
    scoreboard: Scoreboard,
    phase: Phase,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(rules: Rules) -> Self {
        Game::new_with_rng(rules, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(rules: Rules, rng: R) -> Game<R> {
        Game::with_grid(rules, consts::GRID, rng)
    }

    pub(crate) fn with_grid(rules: Rules, grid: Grid, rng: R) -> Game<R> {
        let mut game = Game {
            rng,
            powerups: PowerUps::new(rules.symmetric_speed_revert),
            scoreboard: Scoreboard::new(&rules.reward_thresholds),
            rules,
            grid,
            snake: Snake::new(grid.center()),
            heading: None,
            pending: None,
            item: None,
            pace: Pace::new(),
            phase: Phase::Running,
        };
        game.place_item();
        game
    }

    /// Throw away the current session and start a fresh one
    pub(crate) fn restart(&mut self) {
        self.snake = Snake::new(self.grid.center());
        self.heading = None;
        self.pending = None;
        self.powerups = PowerUps::new(self.rules.symmetric_speed_revert);
        self.pace = Pace::new();
        self.scoreboard = Scoreboard::new(&self.rules.reward_thresholds);
        self.phase = Phase::Running;
        self.place_item();
        log::info!("New game started");
    }

    /// Ask the snake to travel in `direction` from the next tick on.  Only the
    /// latest request before a tick counts.  Requests to reverse onto the
    /// snake's own body are ignored.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if !self.running() {
            return;
        }
        if self.snake.len() > 1 && self.heading == Some(direction.reverse()) {
            log::debug!("Ignoring request to reverse direction to {direction:?}");
            return;
        }
        self.pending = Some(direction);
    }

    /// Advance the simulation by one step
    pub(crate) fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.running() {
            return events;
        }
        if let Some(d) = self.pending.take() {
            self.heading = Some(d);
        }
        let Some(direction) = self.heading else {
            return events;
        };
        let next_head = self.snake.advance(direction);
        if self.snake.would_collide_with_wall(next_head, self.grid) {
            self.end(GameOverCause::HitWall, &mut events);
            return events;
        }
        let item = self.item.filter(|item| item.cell == next_head);
        if !self.powerups.shielded() && self.snake.would_collide_with_self(next_head, item.is_some())
        {
            self.end(GameOverCause::HitSelf, &mut events);
            return events;
        }
        match item {
            Some(item) => self.consume(item, &mut events),
            None => self.snake.move_without_growth(next_head),
        }
        events
    }

    /// Count down the active power-up by `elapsed` real time
    pub(crate) fn advance_clock(&mut self, elapsed: Duration) -> Option<GameEvent> {
        if !self.running() {
            return None;
        }
        let kind = self.powerups.tick(elapsed, &mut self.pace)?;
        log::debug!("{kind} power-up expired");
        Some(GameEvent::PowerUpEnded(kind))
    }

    fn consume(&mut self, item: Item, events: &mut Vec<GameEvent>) {
        let points = scoring::points_for(self.powerups.take_double_points());
        let change = self.scoreboard.award(points);
        self.pace.on_catch();
        log::debug!(
            "Ate {} item at {}; score is now {}",
            item.kind,
            item.cell,
            change.score
        );
        events.push(GameEvent::Consumed {
            kind: item.kind,
            points,
            score: change.score,
        });
        if let Some(tier) = change.tier {
            log::info!("Snake evolved into {tier}");
            events.push(GameEvent::Evolved(tier));
        }
        if let Some(label) = change.milestone {
            events.push(GameEvent::Milestone(label));
        }
        events.extend(
            change
                .thresholds
                .into_iter()
                .map(GameEvent::ThresholdReached),
        );
        if let Some(replaced) = self.powerups.activate(item.kind, &mut self.pace) {
            events.push(GameEvent::PowerUpEnded(replaced));
        }
        events.push(GameEvent::PowerUpStarted(item.kind));
        self.snake.grow(item.cell);
        if !self.place_item() {
            self.end(GameOverCause::BoardFull, events);
        }
    }

    /// Put a new item on the grid.  Returns `false` if there was no room.
    fn place_item(&mut self) -> bool {
        self.item = item::spawn(&mut self.rng, self.grid, &self.snake);
        self.item.is_some()
    }
}

impl<R> Game<R> {
    fn end(&mut self, cause: GameOverCause, events: &mut Vec<GameEvent>) {
        let score = self.scoreboard.score();
        self.phase = Phase::GameOver(cause);
        self.pending = None;
        if let Some(kind) = self.powerups.deactivate(&mut self.pace) {
            events.push(GameEvent::PowerUpEnded(kind));
        }
        log::info!(
            "Game over: snake {cause} at {} with a score of {score}",
            self.snake.head()
        );
        events.push(GameEvent::GameOver { cause, score });
    }

    pub(crate) fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// The time that should elapse before the next tick
    pub(crate) fn period(&self) -> Duration {
        self.pace.period()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            snake: self.snake.segments().collect(),
            heading: self.heading,
            item: self.item,
            score: self.scoreboard.score(),
            tier: self.scoreboard.tier(),
            power_up: self.powerups.active(),
            double_points_pending: self.powerups.double_points_pending(),
            phase: self.phase,
            tick_interval: self.pace.interval(),
            period: self.pace.period(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game() -> Game<ChaCha12Rng> {
        Game::new_with_rng(Rules::default(), ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    /// Put an item of the given kind directly in front of the snake
    fn bait<R>(game: &mut Game<R>, direction: Direction, kind: MutationKind) {
        game.item = Some(Item {
            cell: game.snake.advance(direction),
            kind,
        });
    }

    /// A snake whose head at (5,5) has just moved west, with body segments
    /// directly north of the head
    fn coiled_game() -> Game<ChaCha12Rng> {
        let mut game = new_game();
        game.snake = Snake::from_segments(
            Cell::new(5, 5),
            [
                Cell::new(6, 5),
                Cell::new(6, 4),
                Cell::new(5, 4),
                Cell::new(4, 4),
            ],
        );
        game.heading = Some(Direction::West);
        game.item = Some(Item {
            cell: Cell::new(0, 0),
            kind: MutationKind::Speed,
        });
        game
    }

    #[test]
    fn fresh_game() {
        let game = new_game();
        let snap = game.snapshot();
        assert_eq!(snap.snake, [Cell::new(10, 10)]);
        assert_eq!(snap.heading, None);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.tier, EvolutionTier::Tiny);
        assert_eq!(snap.power_up, None);
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.tick_interval, Duration::from_millis(200));
        let item = snap.item.expect("fresh game should have an item");
        assert_ne!(item.cell, Cell::new(10, 10));
        assert!(snap.grid.in_bounds(item.cell));
    }

    #[test]
    fn idle_until_first_direction() {
        let mut game = new_game();
        let before = game.snapshot();
        for _ in 0..5 {
            assert!(game.tick().is_empty());
        }
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn eat_speed_item() {
        let mut game = new_game();
        bait(&mut game, Direction::East, MutationKind::Speed);
        game.set_direction(Direction::East);
        let events = game.tick();
        assert_eq!(
            events,
            [
                GameEvent::Consumed {
                    kind: MutationKind::Speed,
                    points: 1,
                    score: 1,
                },
                GameEvent::PowerUpStarted(MutationKind::Speed),
            ]
        );
        let snap = game.snapshot();
        assert_eq!(snap.snake, [Cell::new(11, 10), Cell::new(10, 10)]);
        assert_eq!(snap.score, 1);
        assert_eq!(snap.tick_interval, Duration::from_millis(190));
        assert_eq!(
            snap.power_up,
            Some(ActivePowerUp {
                kind: MutationKind::Speed,
                remaining: Duration::from_secs(5),
            })
        );
        let item = snap.item.expect("a new item should have been spawned");
        assert!(!snap.snake.contains(&item.cell));
        // The power-up's speed-up comes on top of the per-catch speed-up
        assert_eq!(snap.period, Duration::from_millis(160));
        assert_eq!(game.period(), snap.period);
    }

    #[test]
    fn plain_move() {
        let mut game = new_game();
        game.item = Some(Item {
            cell: Cell::new(0, 0),
            kind: MutationKind::Shield,
        });
        game.set_direction(Direction::North);
        assert!(game.tick().is_empty());
        let snap = game.snapshot();
        assert_eq!(snap.snake, [Cell::new(10, 9)]);
        assert_eq!(snap.heading, Some(Direction::North));
        assert_eq!(snap.score, 0);
    }

    #[test]
    fn hit_wall() {
        let mut game = new_game();
        game.snake = Snake::from_segments(Cell::new(19, 5), [Cell::new(18, 5), Cell::new(17, 5)]);
        game.heading = Some(Direction::East);
        let events = game.tick();
        assert_eq!(
            events,
            [GameEvent::GameOver {
                cause: GameOverCause::HitWall,
                score: 0,
            }]
        );
        let snap = game.snapshot();
        assert_eq!(snap.phase, Phase::GameOver(GameOverCause::HitWall));
        assert_eq!(
            snap.snake,
            [Cell::new(19, 5), Cell::new(18, 5), Cell::new(17, 5)]
        );
    }

    #[test]
    fn game_over_ends_power_up() {
        let mut game = new_game();
        game.snake = Snake::new(Cell::new(18, 5));
        bait(&mut game, Direction::East, MutationKind::Speed);
        game.set_direction(Direction::East);
        let _ = game.tick();
        assert_eq!(game.snapshot().power_up_kind(), Some(MutationKind::Speed));
        assert_eq!(
            game.tick(),
            [
                GameEvent::PowerUpEnded(MutationKind::Speed),
                GameEvent::GameOver {
                    cause: GameOverCause::HitWall,
                    score: 1,
                },
            ]
        );
        assert_eq!(game.snapshot().power_up, None);
    }

    #[test]
    fn game_over_is_final() {
        let mut game = new_game();
        game.snake = Snake::new(Cell::new(0, 0));
        game.set_direction(Direction::West);
        assert_eq!(game.tick().len(), 1);
        let snap = game.snapshot();
        assert!(game.tick().is_empty());
        game.set_direction(Direction::East);
        assert_eq!(game.advance_clock(Duration::from_secs(10)), None);
        assert!(game.tick().is_empty());
        assert_eq!(game.snapshot(), snap);
    }

    #[test]
    fn hit_self() {
        let mut game = coiled_game();
        game.set_direction(Direction::North);
        let events = game.tick();
        assert_eq!(
            events,
            [GameEvent::GameOver {
                cause: GameOverCause::HitSelf,
                score: 0,
            }]
        );
        assert_eq!(game.snapshot().snake.len(), 5);
        assert_eq!(game.snapshot().snake[0], Cell::new(5, 5));
    }

    #[test]
    fn shield_prevents_self_collision() {
        let mut game = coiled_game();
        let _ = game.powerups.activate(MutationKind::Shield, &mut game.pace);
        game.set_direction(Direction::North);
        assert!(game.tick().is_empty());
        let snap = game.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.head(), Some(Cell::new(5, 4)));
    }

    #[test]
    fn self_collision_resumes_after_shield() {
        let mut game = coiled_game();
        let _ = game.powerups.activate(MutationKind::Shield, &mut game.pace);
        assert_eq!(game.advance_clock(Duration::from_secs(4)), None);
        assert_eq!(
            game.advance_clock(Duration::from_secs(1)),
            Some(GameEvent::PowerUpEnded(MutationKind::Shield))
        );
        game.set_direction(Direction::North);
        assert_eq!(
            game.tick(),
            [GameEvent::GameOver {
                cause: GameOverCause::HitSelf,
                score: 0,
            }]
        );
    }

    #[test]
    fn double_points() {
        let mut game = new_game();
        let _ = game
            .powerups
            .activate(MutationKind::DoublePoints, &mut game.pace);
        assert_eq!(game.advance_clock(Duration::from_secs(2)), None);
        bait(&mut game, Direction::South, MutationKind::Camouflage);
        game.set_direction(Direction::South);
        let events = game.tick();
        assert_eq!(
            events[..2].to_vec(),
            vec![
                GameEvent::Consumed {
                    kind: MutationKind::Camouflage,
                    points: 2,
                    score: 2,
                },
                GameEvent::PowerUpEnded(MutationKind::DoublePoints),
            ]
        );
        let snap = game.snapshot();
        assert_eq!(snap.score, 2);
        assert!(!snap.double_points_pending);
        bait(&mut game, Direction::South, MutationKind::Camouflage);
        let _ = game.tick();
        assert_eq!(game.snapshot().score, 3);
    }

    #[test]
    fn double_points_item_doubles_next_catch() {
        let mut game = new_game();
        bait(&mut game, Direction::North, MutationKind::DoublePoints);
        game.set_direction(Direction::North);
        let _ = game.tick();
        assert_eq!(game.snapshot().score, 1);
        assert!(game.snapshot().double_points_pending);
        bait(&mut game, Direction::North, MutationKind::Shield);
        let _ = game.tick();
        assert_eq!(game.snapshot().score, 3);
    }

    #[test]
    fn reversal_ignored() {
        let mut game = new_game();
        game.snake = Snake::from_segments(Cell::new(10, 10), [Cell::new(9, 10)]);
        game.heading = Some(Direction::East);
        game.item = Some(Item {
            cell: Cell::new(0, 0),
            kind: MutationKind::Speed,
        });
        game.set_direction(Direction::West);
        let _ = game.tick();
        let snap = game.snapshot();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.head(), Some(Cell::new(11, 10)));
        assert_eq!(snap.heading, Some(Direction::East));
    }

    #[test]
    fn reversal_allowed_for_lone_head() {
        let mut game = new_game();
        game.item = Some(Item {
            cell: Cell::new(0, 0),
            kind: MutationKind::Speed,
        });
        game.set_direction(Direction::East);
        let _ = game.tick();
        game.set_direction(Direction::West);
        let _ = game.tick();
        assert_eq!(game.snapshot().head(), Some(Cell::new(10, 10)));
    }

    #[test]
    fn latest_direction_wins() {
        let mut game = new_game();
        game.item = Some(Item {
            cell: Cell::new(0, 0),
            kind: MutationKind::Speed,
        });
        game.set_direction(Direction::North);
        game.set_direction(Direction::South);
        game.set_direction(Direction::East);
        let _ = game.tick();
        assert_eq!(game.snapshot().head(), Some(Cell::new(11, 10)));
    }

    #[test]
    fn restart_resets_session() {
        let mut game = new_game();
        bait(&mut game, Direction::East, MutationKind::Speed);
        game.set_direction(Direction::East);
        let _ = game.tick();
        for _ in 0..20 {
            let _ = game.tick();
        }
        assert!(!game.running());
        game.restart();
        let snap = game.snapshot();
        assert_eq!(snap.snake, [Cell::new(10, 10)]);
        assert_eq!(snap.heading, None);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.tier, EvolutionTier::Tiny);
        assert_eq!(snap.power_up, None);
        assert!(!snap.double_points_pending);
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.tick_interval, Duration::from_millis(200));
        assert_eq!(game.period(), Duration::from_millis(200));
        assert!(snap.item.is_some());
    }

    #[test]
    fn evolution_and_rewards() {
        let mut game = Game::with_grid(
            Rules::default(),
            Grid::new(64, 3),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        game.set_direction(Direction::East);
        let mut evolved = Vec::new();
        let mut milestones = Vec::new();
        let mut thresholds = Vec::new();
        for _ in 0..30 {
            bait(&mut game, Direction::East, MutationKind::Camouflage);
            for ev in game.tick() {
                match ev {
                    GameEvent::Evolved(tier) => evolved.push((game.snapshot().score, tier)),
                    GameEvent::Milestone(label) => milestones.push((game.snapshot().score, label)),
                    GameEvent::ThresholdReached(t) => thresholds.push(t),
                    _ => (),
                }
            }
            let snap = game.snapshot();
            assert_eq!(snap.tier, EvolutionTier::for_score(snap.score));
        }
        assert_eq!(game.snapshot().score, 30);
        assert_eq!(
            evolved,
            [
                (10, EvolutionTier::Agile),
                (20, EvolutionTier::Armored),
                (30, EvolutionTier::Legendary),
            ]
        );
        assert_eq!(milestones, [(15, "Mutation Frenzy")]);
        assert_eq!(thresholds, [5, 10, 20]);
        assert_eq!(game.snapshot().tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn board_full() {
        let mut game = Game::with_grid(
            Rules::default(),
            Grid::new(2, 1),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        );
        assert_eq!(game.snapshot().head(), Some(Cell::new(1, 0)));
        assert_eq!(
            game.snapshot().item.map(|item| item.cell),
            Some(Cell::new(0, 0))
        );
        game.set_direction(Direction::West);
        let events = game.tick();
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                cause: GameOverCause::BoardFull,
                score: 1,
            })
        );
        let snap = game.snapshot();
        assert_eq!(snap.snake, [Cell::new(0, 0), Cell::new(1, 0)]);
        assert_eq!(snap.item, None);
    }

    fn direction_for(n: u8) -> Option<Direction> {
        match n {
            0 => Some(Direction::North),
            1 => Some(Direction::East),
            2 => Some(Direction::South),
            3 => Some(Direction::West),
            _ => None,
        }
    }

    proptest! {
        #[test]
        fn session_invariants(
            seed in any::<u64>(),
            steps in proptest::collection::vec((0..6u8, 0..3000u64, 0..8usize), 1..300),
        ) {
            let mut game = Game::new_with_rng(Rules::default(), ChaCha12Rng::seed_from_u64(seed));
            for (input, millis, lure) in steps {
                if let Some(d) = direction_for(input) {
                    game.set_direction(d);
                }
                // Half the time, drop an item right where the snake is going
                if let (Some(d), Some(kind)) = (
                    game.pending.or(game.heading),
                    MutationKind::iter().nth(lure),
                ) {
                    bait(&mut game, d, kind);
                }
                let _ = game.advance_clock(Duration::from_millis(millis));
                let before = game.snapshot();
                let events = game.tick();
                let after = game.snapshot();
                if before.phase != Phase::Running {
                    prop_assert!(events.is_empty());
                    prop_assert_eq!(&after, &before);
                    continue;
                }
                let points = events.iter().find_map(|ev| match ev {
                    GameEvent::Consumed { points, .. } => Some(*points),
                    _ => None,
                });
                prop_assert_eq!(
                    after.snake.len(),
                    before.snake.len() + usize::from(points.is_some())
                );
                prop_assert_eq!(after.score, before.score + points.unwrap_or(0));
                if let Some(p) = points {
                    let expected = if before.double_points_pending { 2 } else { 1 };
                    prop_assert_eq!(p, expected);
                    if after.double_points_pending {
                        prop_assert_eq!(after.power_up_kind(), Some(MutationKind::DoublePoints));
                    }
                }
                prop_assert!(after.tier >= before.tier);
                prop_assert_eq!(after.tier, EvolutionTier::for_score(after.score));
                prop_assert!(after.tick_interval <= before.tick_interval);
                prop_assert!(after.tick_interval >= consts::MIN_TICK_INTERVAL);
                prop_assert!(after.period <= after.tick_interval);
                prop_assert!(after.period >= consts::MIN_TICK_INTERVAL);
                if after.phase == Phase::Running {
                    prop_assert!(after.snake.iter().all(|&c| after.grid.in_bounds(c)));
                } else {
                    prop_assert_eq!(after.power_up, None);
                }
            }
        }
    }
}
