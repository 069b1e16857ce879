use std::time::{Duration, Instant};

use super::config::GameConfig;

/// An active speed boost: the interval to restore and when to restore it
#[derive(Debug, Clone, Copy)]
struct Boost {
    pre_boost_interval: Duration,
    expires_at: Instant,
}

/// Current tick interval, permanent escalation, and the special-food boost.
///
/// Escalation lowers the interval by a fixed step every elapsed period,
/// clamped to a floor. A boost lowers it further for a fixed duration and
/// then restores the snapshot taken when the boost began; if a permanent
/// escalation fires during the boost window, the restore still reverts to
/// the pre-boost snapshot (snapshot-and-restore, deliberately simple).
#[derive(Debug, Clone)]
pub struct SpeedController {
    current: Duration,
    min: Duration,
    escalation_step: Duration,
    boost_step: Duration,
    boost_duration: Duration,
    boost: Option<Boost>,
}

impl SpeedController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            current: config.base_interval,
            min: config.min_interval,
            escalation_step: config.escalation_step,
            boost_step: config.boost_step,
            boost_duration: config.boost_duration,
            boost: None,
        }
    }

    /// The interval the game loop should tick at right now
    pub fn interval(&self) -> Duration {
        self.current
    }

    /// Permanent escalation: fires every elapsed period while running
    pub fn on_elapsed_period(&mut self) {
        self.current = clamp_floor(self.current, self.escalation_step, self.min);
    }

    /// Special-food pickup: temporarily drop the interval. A pickup while a
    /// boost is already live keeps the original pre-boost snapshot and
    /// re-arms the deadline, superseding the earlier revert.
    pub fn on_special_pickup(&mut self, now: Instant) {
        let pre_boost_interval = match self.boost {
            Some(boost) => boost.pre_boost_interval,
            None => self.current,
        };

        self.current = clamp_floor(self.current, self.boost_step, self.min);
        self.boost = Some(Boost {
            pre_boost_interval,
            expires_at: now + self.boost_duration,
        });
    }

    /// When the live boost reverts, if one is live
    pub fn boost_deadline(&self) -> Option<Instant> {
        self.boost.map(|b| b.expires_at)
    }

    /// Restore the pre-boost interval if the boost has run out.
    /// Returns true if the interval changed.
    pub fn revert_boost_if_due(&mut self, now: Instant) -> bool {
        match self.boost {
            Some(boost) if now >= boost.expires_at => {
                self.boost = None;
                let changed = self.current != boost.pre_boost_interval;
                self.current = boost.pre_boost_interval;
                changed
            }
            _ => false,
        }
    }
}

fn clamp_floor(current: Duration, step: Duration, min: Duration) -> Duration {
    current.saturating_sub(step).max(min)
}
