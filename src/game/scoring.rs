use crate::consts;
use std::fmt;

/// A status label derived purely from the score
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum EvolutionTier {
    #[default]
    Tiny,
    Agile,
    Armored,
    Legendary,
}

impl EvolutionTier {
    pub(super) fn for_score(score: u32) -> EvolutionTier {
        match score {
            30.. => EvolutionTier::Legendary,
            20.. => EvolutionTier::Armored,
            10.. => EvolutionTier::Agile,
            _ => EvolutionTier::Tiny,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            EvolutionTier::Tiny => "Tiny",
            EvolutionTier::Agile => "Agile",
            EvolutionTier::Armored => "Armored",
            EvolutionTier::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for EvolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A score that is announced once when the player lands on it exactly
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Milestone {
    pub(crate) score: u32,
    pub(crate) label: &'static str,
}

/// Points awarded for one catch
pub(super) fn points_for(double_points: bool) -> u32 {
    if double_points {
        2
    } else {
        1
    }
}

/// Hands out each reward threshold once, in increasing order, as the score
/// reaches it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct RewardTracker {
    thresholds: Vec<u32>,
    /// Index into `thresholds` of the next threshold to hand out
    next: usize,
}

impl RewardTracker {
    pub(super) fn new(thresholds: &[u32]) -> RewardTracker {
        RewardTracker::resume_at(thresholds, 0)
    }

    /// Create a tracker for a run that already has `score` points.
    /// Thresholds at or below `score` count as already handed out.
    pub(super) fn resume_at(thresholds: &[u32], score: u32) -> RewardTracker {
        let mut thresholds = thresholds.to_vec();
        thresholds.sort_unstable();
        thresholds.dedup();
        let next = thresholds.partition_point(|&t| t <= score);
        RewardTracker { thresholds, next }
    }

    /// Return every not-yet-reached threshold that `score` has reached, in
    /// increasing order
    pub(super) fn reached(&mut self, score: u32) -> Vec<u32> {
        let pending = self.thresholds.get(self.next..).unwrap_or_default();
        let hit = pending.iter().take_while(|&&t| t <= score).copied().collect::<Vec<_>>();
        self.next += hit.len();
        hit
    }
}

/// The result of adding points to a [`Scoreboard`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct ScoreChange {
    pub(super) score: u32,
    /// The new tier, if it changed
    pub(super) tier: Option<EvolutionTier>,
    pub(super) milestone: Option<&'static str>,
    pub(super) thresholds: Vec<u32>,
}

/// Score, tier & reward bookkeeping for a single run
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Scoreboard {
    score: u32,
    tier: EvolutionTier,
    rewards: RewardTracker,
}

impl Scoreboard {
    pub(super) fn new(reward_thresholds: &[u32]) -> Scoreboard {
        Scoreboard {
            score: 0,
            tier: EvolutionTier::Tiny,
            rewards: RewardTracker::new(reward_thresholds),
        }
    }

    pub(super) fn score(&self) -> u32 {
        self.score
    }

    pub(super) fn tier(&self) -> EvolutionTier {
        self.tier
    }

    pub(super) fn award(&mut self, points: u32) -> ScoreChange {
        self.score = self.score.saturating_add(points);
        let tier = EvolutionTier::for_score(self.score);
        let tier_change = (tier > self.tier).then_some(tier);
        self.tier = self.tier.max(tier);
        let milestone = consts::MILESTONES
            .iter()
            .find(|m| m.score == self.score)
            .map(|m| m.label);
        ScoreChange {
            score: self.score,
            tier: tier_change,
            milestone,
            thresholds: self.rewards.reached(self.score),
        }
    }
}
