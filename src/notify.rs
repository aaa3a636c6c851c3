use crate::game::GameEvent;

/// Receives the announcements that the game hands off to the outside world
pub(crate) trait Notifier {
    /// The score landed exactly on a milestone
    fn on_milestone(&mut self, label: &str);

    /// The score reached a reward threshold for the first time this run
    fn on_threshold_reached(&mut self, threshold: u32);
}

/// Forward the notifiable events among `events` to `notifier`
pub(crate) fn dispatch<N: Notifier + ?Sized>(notifier: &mut N, events: &[GameEvent]) {
    for ev in events {
        match *ev {
            GameEvent::Milestone(label) => notifier.on_milestone(label),
            GameEvent::ThresholdReached(threshold) => notifier.on_threshold_reached(threshold),
            _ => (),
        }
    }
}

/// A [`Notifier`] that writes each hand-off to the log
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LogNotifier {
    player: String,
}

impl LogNotifier {
    pub(crate) fn new(player: String) -> LogNotifier {
        LogNotifier { player }
    }
}

impl Notifier for LogNotifier {
    fn on_milestone(&mut self, label: &str) {
        log::info!("Milestone reached by {}: {label}", self.player);
    }

    fn on_threshold_reached(&mut self, threshold: u32) {
        log::info!(
            "Reward threshold {threshold} reached by {}; handing off to rewards",
            self.player
        );
    }
}

/// A [`Notifier`] that records what it's told, for tests
#[cfg(test)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct RecordingNotifier {
    pub(crate) milestones: Vec<String>,
    pub(crate) thresholds: Vec<u32>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn on_milestone(&mut self, label: &str) {
        self.milestones.push(label.to_owned());
    }

    fn on_threshold_reached(&mut self, threshold: u32) {
        self.thresholds.push(threshold);
    }
}
