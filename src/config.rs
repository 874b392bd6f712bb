//! Engine tuning.
//!
//! Every section is `#[serde(default)]`, so a partial JSON document only
//! overrides the fields it names. [`EngineConfig::from_json`] validates the
//! merged result before handing it out.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Item counts and grid side for one digging level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub trash: usize,
    pub decoys: usize,
    pub traps: usize,
    pub grid: usize,
}

impl LevelConfig {
    pub fn cells(&self) -> usize {
        self.grid * self.grid
    }

    pub fn items(&self) -> usize {
        self.trash + self.decoys + self.traps
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigConfig {
    /// Reveal delay before upgrades, in ms.
    pub base_dig_ms: u64,
    /// How long a muzzle trap disables digging.
    pub muzzle_ms: u64,
    /// Enables the boss variant (trash theft + math challenge).
    pub adversary_enabled: bool,
    /// Chance per non-final trash find that the boss appears.
    pub adversary_chance: f64,
    /// Time allowed to answer the boss' math problem.
    pub boss_time_limit_ms: u64,
    /// Coins paid for beating the boss.
    pub boss_reward: u64,
    /// Upper bound of the lucky-charm bonus roll (inclusive, minimum 1).
    pub luck_bonus_max: u64,
}

impl Default for DigConfig {
    fn default() -> Self {
        Self {
            base_dig_ms: 1500,
            muzzle_ms: 3000,
            adversary_enabled: true,
            adversary_chance: 0.25,
            boss_time_limit_ms: 20_000,
            boss_reward: 5,
            luck_bonus_max: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekConfig {
    pub grid: usize,
    pub attempts: u32,
    /// Cells strictly farther than this are "cold".
    pub cold_distance: u32,
}

impl Default for SeekConfig {
    fn default() -> Self {
        Self {
            grid: 5,
            attempts: 8,
            cold_distance: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeConfig {
    pub grid: usize,
    pub initial_energy: i32,
    pub wall_durability: u32,
    pub move_cost: i32,
    pub break_cost: i32,
    pub trap_penalty: i32,
    pub water_bonus: i32,
    pub traps: usize,
    pub waters: usize,
    pub adversary_chance: f64,
    /// Completed moves before the adversary may relocate the exit.
    pub adversary_trigger: u32,
    /// How long the takeover notice stays up.
    pub takeover_ms: u64,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self {
            grid: 6,
            initial_energy: 25,
            wall_durability: 3,
            move_cost: 1,
            break_cost: 2,
            trap_penalty: 5,
            water_bonus: 8,
            traps: 3,
            waters: 2,
            adversary_chance: 0.2,
            adversary_trigger: 4,
            takeover_ms: 3000,
        }
    }
}

impl EscapeConfig {
    /// Player start: second-to-last row, middle column.
    pub fn start_cell(&self) -> usize {
        (self.grid - 2) * self.grid + self.grid / 2
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    pub plots: usize,
    pub bonus_reward: u64,
    pub bonus_cooldown_ms: u64,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            plots: 4,
            bonus_reward: 15,
            bonus_cooldown_ms: 3600 * 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    pub max: u32,
    pub decay_per_level: u32,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            max: 100,
            decay_per_level: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Digging levels, 1-based. Levels past the end repeat the last entry.
    pub levels: Vec<LevelConfig>,
    pub dig: DigConfig,
    pub seek: SeekConfig,
    pub escape: EscapeConfig,
    pub farm: FarmConfig,
    pub mood: MoodConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let level = |trash, decoys, traps, grid| LevelConfig {
            trash,
            decoys,
            traps,
            grid,
        };
        Self {
            levels: vec![
                level(3, 1, 0, 4),
                level(4, 2, 1, 4),
                level(5, 2, 1, 4),
                level(6, 3, 2, 5),
                level(8, 3, 2, 5),
            ],
            dig: DigConfig::default(),
            seek: SeekConfig::default(),
            escape: EscapeConfig::default(),
            farm: FarmConfig::default(),
            mood: MoodConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parameters for a 1-based level. Never fails for high levels.
    pub fn level(&self, level: u32) -> LevelConfig {
        let idx = (level.max(1) as usize - 1).min(self.levels.len().saturating_sub(1));
        self.levels.get(idx).copied().unwrap_or(LevelConfig {
            trash: 1,
            decoys: 0,
            traps: 0,
            grid: 1,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (i, l) in self.levels.iter().enumerate() {
            let level = i + 1;
            if l.grid == 0 {
                return Err(ConfigError::EmptyGrid { level });
            }
            if l.trash == 0 {
                return Err(ConfigError::NoTrash { level });
            }
            if l.items() > l.cells() {
                return Err(ConfigError::Overfull {
                    level,
                    items: l.items(),
                    cells: l.cells(),
                });
            }
        }

        if self.seek.grid == 0 {
            return Err(ConfigError::EmptySearchGrid);
        }
        if self.seek.attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }

        let side = self.escape.grid;
        if side < 3 {
            return Err(ConfigError::EscapeTooSmall(side));
        }
        // Interior cells minus the start cell.
        let available = (side - 2) * (side - 2) - 1;
        let needed = self.escape.traps + self.escape.waters;
        if needed > available {
            return Err(ConfigError::EscapeOverfull { needed, available });
        }

        for (name, value) in [
            ("dig.adversary_chance", self.dig.adversary_chance),
            ("escape.adversary_chance", self.escape.adversary_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::BadChance { name, value });
            }
        }
        Ok(())
    }
}
