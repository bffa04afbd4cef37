//! Session configuration.
//!
//! Defaults reproduce the classic rules (30 moves, 1000 points). Every field
//! can be overridden from the environment:
//!
//! - `MATCH3_SEED`: RNG seed (default: derived from the clock)
//! - `MATCH3_MOVES`: move budget
//! - `MATCH3_TARGET`: target score
//! - `MATCH3_PACE_MS`: delay between step events in the terminal front end

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{DEFAULT_MOVES, DEFAULT_PACE_MS, DEFAULT_TARGET_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub moves: u32,
    pub target_score: u32,
    pub pace_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            moves: DEFAULT_MOVES,
            target_score: DEFAULT_TARGET_SCORE,
            pace_ms: DEFAULT_PACE_MS,
        }
    }
}

impl GameConfig {
    /// Create from environment variables; unset or unparsable values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());
        let defaults = Self::default();

        Self {
            seed: parse("MATCH3_SEED").unwrap_or_else(clock_seed),
            moves: parse("MATCH3_MOVES").unwrap_or(defaults.moves),
            target_score: parse("MATCH3_TARGET").unwrap_or(defaults.target_score),
            pace_ms: parse("MATCH3_PACE_MS").unwrap_or(defaults.pace_ms),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_moves(mut self, moves: u32) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.target_score = target_score;
        self
    }
}

/// Seed from the wall clock (sub-second nanos mixed with seconds).
pub fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_classic_rules() {
        let config = GameConfig::default();
        assert_eq!(config.moves, 30);
        assert_eq!(config.target_score, 1000);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = GameConfig::from_lookup(lookup_from(&[
            ("MATCH3_SEED", "77"),
            ("MATCH3_MOVES", "12"),
            ("MATCH3_TARGET", " 500 "),
            ("MATCH3_PACE_MS", "0"),
        ]));
        assert_eq!(
            config,
            GameConfig {
                seed: 77,
                moves: 12,
                target_score: 500,
                pace_ms: 0,
            }
        );
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = GameConfig::from_lookup(lookup_from(&[
            ("MATCH3_SEED", "5"),
            ("MATCH3_MOVES", "lots"),
            ("MATCH3_TARGET", "-1"),
        ]));
        assert_eq!(config.seed, 5);
        assert_eq!(config.moves, DEFAULT_MOVES);
        assert_eq!(config.target_score, DEFAULT_TARGET_SCORE);
        assert_eq!(config.pace_ms, DEFAULT_PACE_MS);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = GameConfig::from_env();
    }
}
