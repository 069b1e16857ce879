use super::config::GameConfig;
use super::food::Pickup;

/// Score, combo counter, and multiplier for one session.
///
/// The multiplier escalates once the combo counter reaches the threshold
/// and is sticky until a tick passes without food.
#[derive(Debug, Clone)]
pub struct Scoring {
    score: u32,
    combo: u32,
    multiplier: u32,
    regular_points: u32,
    special_points: u32,
    combo_threshold: u32,
    combo_multiplier: u32,
}

impl Scoring {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            combo: 0,
            multiplier: 1,
            regular_points: config.regular_points,
            special_points: config.special_points,
            combo_threshold: config.combo_threshold,
            combo_multiplier: config.combo_multiplier,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Award points for an eaten food and advance the combo.
    /// Returns the points awarded.
    pub fn on_food_eaten(&mut self, kind: Pickup) -> u32 {
        let base = match kind {
            Pickup::Regular => self.regular_points,
            Pickup::Special => self.special_points,
            Pickup::None => return 0,
        };

        let awarded = base * self.multiplier;
        self.score += awarded;

        self.combo += 1;
        if self.combo >= self.combo_threshold {
            self.multiplier = self.combo_multiplier;
        }

        awarded
    }

    /// A tick passed with nothing eaten: combo and multiplier reset
    pub fn on_no_food_tick(&mut self) {
        self.combo = 0;
        self.multiplier = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scoring() -> Scoring {
        Scoring::new(&GameConfig::default())
    }

    #[test]
    fn test_regular_and_special_points() {
        let mut s = scoring();
        assert_eq!(s.on_food_eaten(Pickup::Regular), 10);
        assert_eq!(s.on_food_eaten(Pickup::Special), 50);
        assert_eq!(s.score(), 60);
    }

    #[test]
    fn test_multiplier_escalates_at_threshold() {
        let mut s = scoring();
        assert_eq!(s.on_food_eaten(Pickup::Regular), 10);
        assert_eq!(s.on_food_eaten(Pickup::Regular), 10);
        assert_eq!(s.multiplier(), 1);

        // Third consecutive food tick arms the multiplier for later awards
        assert_eq!(s.on_food_eaten(Pickup::Regular), 10);
        assert_eq!(s.multiplier(), 2);
        assert_eq!(s.on_food_eaten(Pickup::Regular), 20);
        assert_eq!(s.on_food_eaten(Pickup::Special), 100);
    }

    #[test]
    fn test_no_food_tick_resets_combo() {
        let mut s = scoring();
        for _ in 0..3 {
            s.on_food_eaten(Pickup::Regular);
        }
        assert_eq!(s.multiplier(), 2);

        s.on_no_food_tick();
        assert_eq!(s.combo(), 0);
        assert_eq!(s.multiplier(), 1);
        assert_eq!(s.on_food_eaten(Pickup::Regular), 10);
    }

    #[test]
    fn test_score_monotonic() {
        let mut s = scoring();
        let mut last = 0;
        for i in 0..20 {
            if i % 4 == 3 {
                s.on_no_food_tick();
            } else {
                s.on_food_eaten(Pickup::Regular);
            }
            assert!(s.score() >= last);
            last = s.score();
        }
    }
}
