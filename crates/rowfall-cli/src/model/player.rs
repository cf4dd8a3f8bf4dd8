use rowfall_engine::{Points, Position, TurnCoordinator};
use serde::{Deserialize, Serialize};

/// Player resources fed by scored streaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("HP {hp}/{max_hp}  EXP {exp}/{max_exp}  GOLD {gold}  DMG {monster_damage}")]
pub struct PlayerStats {
    pub hp: i64,
    pub max_hp: i64,
    pub exp: i64,
    pub max_exp: i64,
    pub gold: i64,
    /// Total damage taken from monster pieces
    pub monster_damage: i64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            hp: Self::MAX_HP,
            max_hp: Self::MAX_HP,
            exp: 0,
            max_exp: Self::MAX_EXP,
            gold: 0,
            monster_damage: 0,
        }
    }
}

impl PlayerStats {
    pub const MAX_HP: i64 = 20;
    pub const MAX_EXP: i64 = 20;

    /// Applies one streak's points. Only positive totals count; healing is
    /// capped at `max_hp` and monster damage is taken after healing.
    pub fn apply(&mut self, points: Points) {
        if points.experience > 0 {
            self.exp += points.experience;
        }
        if points.health > 0 {
            self.update_hp(points.health);
        }
        if points.gold > 0 {
            self.gold += points.gold;
        }
        if points.monster_damage > 0 {
            self.monster_damage += points.monster_damage;
            self.update_hp(-points.monster_damage);
        }
    }

    fn update_hp(&mut self, amount: i64) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    #[must_use]
    pub fn should_level_up(&self) -> bool {
        self.exp >= self.max_exp
    }
}

/// Turn coordinator backing the player panel.
///
/// Selecting a row locks input until the board reports the end of the turn.
#[derive(Debug, Clone)]
pub struct PlayerPanel {
    stats: PlayerStats,
    accepts_input: bool,
    selected: Option<Position>,
    turn_points: Vec<Points>,
    turns_completed: usize,
}

impl Default for PlayerPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerPanel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stats: PlayerStats::default(),
            accepts_input: true,
            selected: None,
            turn_points: vec![],
            turns_completed: 0,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.accepts_input
    }

    #[must_use]
    pub fn turns_completed(&self) -> usize {
        self.turns_completed
    }

    /// Returns the selected cell and streak points of the current turn,
    /// leaving the panel ready for the next one.
    pub fn take_turn(&mut self) -> (Option<Position>, Vec<Points>) {
        (self.selected.take(), std::mem::take(&mut self.turn_points))
    }
}

impl TurnCoordinator for PlayerPanel {
    fn on_cell_selected(&mut self, cell: Position) {
        self.selected = Some(cell);
        self.accepts_input = false;
    }

    fn on_streak_scored(&mut self, points: Points) {
        self.stats.apply(points);
        self.turn_points.push(points);
    }

    fn on_turn_complete(&mut self) {
        self.accepts_input = true;
        self.turns_completed += 1;
        if self.stats.should_level_up() {
            eprintln!("Level up available ({})", self.stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healing_is_capped() {
        let mut stats = PlayerStats::default();
        stats.apply(Points {
            health: 5,
            ..Points::ZERO
        });
        assert_eq!(stats.hp, PlayerStats::MAX_HP);
    }

    #[test]
    fn test_damage_applies_after_healing() {
        let mut stats = PlayerStats {
            hp: 15,
            ..PlayerStats::default()
        };
        stats.apply(Points {
            health: 8,
            monster_damage: 3,
            ..Points::ZERO
        });
        assert_eq!(stats.hp, 17);
        assert_eq!(stats.monster_damage, 3);
    }

    #[test]
    fn test_non_positive_totals_are_ignored() {
        let mut stats = PlayerStats {
            hp: 10,
            ..PlayerStats::default()
        };
        stats.apply(Points {
            health: -4,
            gold: 2,
            experience: 0,
            monster_damage: -1,
        });
        assert_eq!(stats.hp, 10);
        assert_eq!(stats.gold, 2);
        assert_eq!(stats.monster_damage, 0);

        stats.apply(Points::ZERO);
        assert_eq!(
            stats,
            PlayerStats {
                hp: 10,
                gold: 2,
                ..PlayerStats::default()
            }
        );
    }

    #[test]
    fn test_level_up_threshold() {
        let mut stats = PlayerStats::default();
        stats.apply(Points {
            experience: PlayerStats::MAX_EXP - 1,
            ..Points::ZERO
        });
        assert!(!stats.should_level_up());
        stats.apply(Points {
            experience: 1,
            ..Points::ZERO
        });
        assert!(stats.should_level_up());
    }

    #[test]
    fn test_panel_locks_input_for_a_turn() {
        let mut panel = PlayerPanel::new();
        assert!(panel.accepts_input());

        panel.on_cell_selected(Position::new(1, 2));
        assert!(!panel.accepts_input());
        panel.on_streak_scored(Points {
            gold: 3,
            ..Points::ZERO
        });
        panel.on_streak_scored(Points {
            experience: 2,
            ..Points::ZERO
        });
        panel.on_turn_complete();
        assert!(panel.accepts_input());
        assert_eq!(panel.turns_completed(), 1);

        let (selected, points) = panel.take_turn();
        assert_eq!(selected, Some(Position::new(1, 2)));
        assert_eq!(points.len(), 2);
        assert_eq!(panel.stats().gold, 3);
        assert_eq!(panel.stats().exp, 2);
        assert_eq!(panel.take_turn(), (None, vec![]));
    }

    #[test]
    fn test_stats_display() {
        assert_eq!(
            PlayerStats::default().to_string(),
            "HP 20/20  EXP 0/20  GOLD 0  DMG 0"
        );
    }
}
