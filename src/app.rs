use crate::clock::{Stopwatch, Ticker};
use crate::command::Command;
use crate::consts;
use crate::game::{Game, GameEvent};
use crate::leaderboard::{Leaderboard, LeaderboardStore};
use crate::notify::{self, Notifier};
use crate::ui::GameView;
use crate::util::get_display_area;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Frame, Terminal};
use std::io;
use std::time::Instant;

/// Runs sessions in the terminal.  Owns the session, the leaderboard & its
/// store, and the notifier, and is the only thing that feeds the session
/// input and elapsed time.
#[derive(Debug)]
pub(crate) struct App<S, N, R = rand::rngs::ThreadRng> {
    game: Game<R>,
    leaderboard: Leaderboard,
    store: S,
    notifier: N,
    player: String,
    ticker: Ticker,
    stopwatch: Stopwatch,

    /// A pop-up that pauses the game until dismissed
    warning: Option<Warning>,

    quitting: bool,
}

impl<S: LeaderboardStore, N: Notifier, R: Rng> App<S, N, R> {
    pub(crate) fn new(
        game: Game<R>,
        leaderboard: Leaderboard,
        store: S,
        notifier: N,
        player: String,
    ) -> Self {
        App {
            game,
            leaderboard,
            store,
            notifier,
            player,
            ticker: Ticker::new(),
            stopwatch: Stopwatch::new(Instant::now()),
            warning: None,
            quitting: false,
        }
    }

    /// Start with the given warning shown
    pub(crate) fn with_warning(mut self, warning: Option<Warning>) -> Self {
        self.warning = warning;
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        log::info!("Starting game for player {}", self.player);
        while !self.quitting {
            terminal.draw(|frame| self.draw(frame))?;
            self.process_input()?;
        }
        log::info!("Quitting");
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        if self.game.running() && self.warning.is_none() {
            let wait = self
                .ticker
                .wait(Instant::now(), self.game.period())
                .min(consts::COUNTDOWN_STEP);
            if poll(wait)? {
                self.handle_event(read()?);
            }
            self.advance(Instant::now());
        } else {
            self.handle_event(read()?);
        }
        Ok(())
    }

    /// Let time pass up to `now`: count down the active power-up, then tick
    /// if a tick is due
    fn advance(&mut self, now: Instant) {
        let elapsed = self.stopwatch.lap(now);
        if let Some(ev) = self.game.advance_clock(elapsed) {
            self.handle_game_events(&[ev]);
        }
        if self.ticker.fire(now) {
            let events = self.game.tick();
            self.handle_game_events(&events);
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return;
        };
        if let Some(ref warning) = self.warning {
            match warning.handle_command(cmd) {
                Some(WarningOutcome::Dismissed) => {
                    self.warning = None;
                    self.resume(Instant::now());
                }
                Some(WarningOutcome::Quit) => self.quitting = true,
                None => (),
            }
            return;
        }
        match cmd {
            Command::Quit | Command::Q => self.quitting = true,
            Command::Restart if !self.game.running() => {
                self.game.restart();
                self.resume(Instant::now());
            }
            _ => {
                if let Some(direction) = cmd.direction() {
                    self.game.set_direction(direction);
                }
            }
        }
    }

    fn handle_game_events(&mut self, events: &[GameEvent]) {
        notify::dispatch(&mut self.notifier, events);
        for ev in events {
            if let GameEvent::GameOver { score, .. } = *ev {
                self.record_score(score);
            }
        }
    }

    fn record_score(&mut self, score: u32) {
        match self.leaderboard.merge(&self.player, score) {
            Some(rank) => log::info!("Player {} is #{rank} on the leaderboard", self.player),
            None => log::info!("Player {} is not on the leaderboard", self.player),
        }
        if let Err(e) = self.store.save(&self.leaderboard) {
            self.warning = Some(Warning::from_error(&e));
            let e = anyhow::Error::new(e);
            log::error!("{e:#}");
        }
    }

    /// Restart tick scheduling & countdown measurement from `now`, so that
    /// time spent not playing isn't counted
    fn resume(&mut self, now: Instant) {
        self.ticker.reset();
        self.stopwatch = Stopwatch::new(now);
    }
}

impl<S, N, R> App<S, N, R> {
    fn draw(&self, frame: &mut Frame<'_>) {
        let view = GameView {
            snapshot: self.game.snapshot(),
            leaderboard: &self.leaderboard,
            player: &self.player,
        };
        frame.render_widget(&view, frame.area());
        if let Some(ref warning) = self.warning {
            frame.render_widget(warning, get_display_area(frame.area()));
        }
    }
}
