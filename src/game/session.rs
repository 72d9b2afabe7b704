// src/game/session.rs

//! The turn-by-turn state machine of "Running out of Hilbert space".
//!
//! A session walks a player from a start universe towards a target universe
//! through single bit flips ("portals"). Each turn reads one statistics table,
//! counting down from the end of the walk, so the tables the player sees are
//! those of an ever shorter walk away from the target.

use crate::core::constants::game::{
    HAZARD_THRESHOLD, IMMUNITY, INITIAL_SCORE, MALFUNCTION_PROBABILITY, MIN_DISTANCE, SCORE_FLOOR,
};
use crate::core::{Bitstring, Distribution, QreativeError};
use crate::walk::{WalkData, WalkKind};
use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    LostBudget,
    LostHazard,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Status::Playing
    }
}

/// Rule set of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Score by log-strength; no hazards.
    #[default]
    Classic,
    /// "Hunt the Quantpus": weak universes and malfunctioning portals can end the game.
    Quantpus,
}

impl FromStr for Variant {
    type Err = QreativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "quantpus" | "dodgy" => Ok(Variant::Quantpus),
            other => Err(QreativeError::InvalidState {
                message: format!("Unknown game variant '{}' (use 'classic' or 'quantpus')", other),
            }),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Classic => write!(f, "classic"),
            Variant::Quantpus => write!(f, "quantpus"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Move budget; `None` uses one move per step of the walk.
    pub moves: Option<usize>,
    pub immunity: u32,
    pub hazard_threshold: f64,
    pub malfunction_probability: f64,
    pub initial_score: f64,
    pub min_distance: usize,
    pub variant: Variant,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            moves: None,
            immunity: IMMUNITY,
            hazard_threshold: HAZARD_THRESHOLD,
            malfunction_probability: MALFUNCTION_PROBABILITY,
            initial_score: INITIAL_SCORE,
            min_distance: MIN_DISTANCE,
            variant: Variant::Classic,
        }
    }
}

/// What the player is shown at the start of a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Moves left after this one.
    pub remaining: usize,
    /// Strength of the current universe in this turn's table, if present.
    pub strength: Option<f64>,
    /// Portal that must not be used this turn.
    pub malfunctioning: Option<usize>,
    pub status: Status,
}

#[derive(Debug, Clone)]
pub struct Session {
    tables: Vec<Distribution>,
    config: GameConfig,
    position: Bitstring,
    target: Bitstring,
    remaining: usize,
    immunity: u32,
    score: f64,
    status: Status,
    last_direction: Option<usize>,
    malfunctioning: Option<usize>,
    in_turn: bool,
}

impl Session {
    /// Starts a session at `start` that is won by reaching `target`.
    ///
    /// `tables[k]` is the table read when `k` moves remain after the current one.
    ///
    /// # Errors
    /// `InvalidState` if the universes differ in length or are closer than
    /// `config.min_distance`, or if there are too few tables for the budget.
    pub fn new(
        tables: Vec<Distribution>,
        start: Bitstring,
        target: Bitstring,
        config: GameConfig,
    ) -> Result<Self, QreativeError> {
        if start.len() != target.len() || start.is_empty() {
            return Err(QreativeError::InvalidState {
                message: format!("Start '{}' and target '{}' must be non-empty and equally long", start, target),
            });
        }
        let distance = start.hamming_distance(&target);
        if distance < config.min_distance {
            return Err(QreativeError::InvalidState {
                message: format!(
                    "Start '{}' is only {} flips from target '{}'; at least {} are required",
                    start, distance, target, config.min_distance
                ),
            });
        }
        let moves = config.moves.unwrap_or(tables.len().saturating_sub(1));
        if moves == 0 || moves > tables.len() {
            return Err(QreativeError::InvalidState {
                message: format!("A budget of {} moves needs between 1 and {} tables", moves, tables.len()),
            });
        }
        debug!("new {} session: {} -> {} in {} moves", config.variant, start, target, moves);
        Ok(Self {
            tables,
            position: start,
            target,
            remaining: moves,
            immunity: config.immunity,
            score: config.initial_score,
            status: Status::Playing,
            last_direction: None,
            malfunctioning: None,
            in_turn: false,
            config,
        })
    }

    /// Sets up a session on a random sample of a hypercube walk. The walk's
    /// start is the target and the player begins far from it.
    pub fn from_walk<R: Rng + ?Sized>(data: &WalkData, config: GameConfig, rng: &mut R) -> Result<Self, QreativeError> {
        if data.kind != WalkKind::Hypercube {
            return Err(QreativeError::InvalidStructure {
                message: format!("The game needs hypercube statistics, not {} statistics", data.kind),
            });
        }
        if data.samples() == 0 {
            return Err(QreativeError::InvalidState { message: "No walk samples to play on".to_string() });
        }
        let sample = rng.random_range(0..data.samples());
        let target = data.start_bitstring(sample)?;
        let start = target.random_distant(config.min_distance, rng)?;
        Self::new(data.tables[sample].clone(), start, target, config)
    }

    fn ensure_playing(&self) -> Result<(), QreativeError> {
        if self.status.is_over() {
            return Err(QreativeError::SessionOver { message: format!("The session has already ended ({:?})", self.status) });
        }
        Ok(())
    }

    /// Spends a move, runs the hazard checks and rolls for a malfunctioning portal.
    pub fn begin_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TurnReport, QreativeError> {
        self.ensure_playing()?;
        if self.in_turn {
            return Err(QreativeError::InvalidState { message: "A turn is already waiting for a direction".to_string() });
        }
        self.remaining -= 1;
        self.immunity = self.immunity.saturating_sub(1);
        self.in_turn = true;
        self.malfunctioning = None;

        let strength = self.tables[self.remaining].get(self.position.as_str());
        if self.config.variant == Variant::Quantpus {
            match strength {
                None => self.status = Status::LostHazard,
                Some(p) if p < self.config.hazard_threshold && self.immunity == 0 => {
                    if rng.random_bool(0.5) {
                        self.status = Status::LostHazard;
                    }
                }
                Some(_) => {}
            }
            if !self.status.is_over() && rng.random_bool(self.config.malfunction_probability.clamp(0.0, 1.0)) {
                let candidates: Vec<usize> =
                    (1..=self.num_bits()).filter(|d| Some(*d) != self.last_direction).collect();
                self.malfunctioning = candidates.choose(rng).copied();
            }
        }
        if self.status.is_over() {
            self.in_turn = false;
            debug!("hazard at {} with {} moves left", self.position, self.remaining);
        }

        Ok(TurnReport { remaining: self.remaining, strength, malfunctioning: self.malfunctioning, status: self.status })
    }

    /// Moves through portal `direction` (1-based) and resolves the turn.
    ///
    /// # Errors
    /// * `InvalidDirection` if `direction` is not in `[1, n]`; nothing changes.
    /// * `SessionOver` once the session has ended.
    pub fn choose(&mut self, direction: usize) -> Result<Status, QreativeError> {
        self.ensure_playing()?;
        if !self.in_turn {
            return Err(QreativeError::InvalidState { message: "Call begin_turn before choosing a direction".to_string() });
        }
        let n = self.num_bits();
        if direction == 0 || direction > n {
            return Err(QreativeError::InvalidDirection { input: direction.to_string(), max: n });
        }

        self.position = self.position.flip(direction - 1)?;
        self.last_direction = Some(direction);
        self.in_turn = false;

        let table = &self.tables[self.remaining];
        match table.get(self.position.as_str()).filter(|p| *p > 0.0) {
            Some(p) => self.score += p.log2(),
            None => {
                if self.config.variant == Variant::Classic {
                    self.score = SCORE_FLOOR;
                }
            }
        }

        self.status = if self.malfunctioning == Some(direction) {
            Status::LostHazard
        } else if self.position == self.target {
            Status::Won
        } else if self.remaining == 0 {
            Status::LostBudget
        } else {
            Status::Playing
        };
        debug!("portal {} -> {} (score {:.3}, {:?})", direction, self.position, self.score, self.status);
        Ok(self.status)
    }

    pub fn position(&self) -> &Bitstring {
        &self.position
    }

    pub fn target(&self) -> &Bitstring {
        &self.target
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn immunity(&self) -> u32 {
        self.immunity
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn last_direction(&self) -> Option<usize> {
        self.last_direction
    }

    pub fn malfunctioning(&self) -> Option<usize> {
        self.malfunctioning
    }

    /// Number of portals (bits per universe).
    pub fn num_bits(&self) -> usize {
        self.position.len()
    }

    /// The table of the current turn.
    pub fn current_table(&self) -> &Distribution {
        &self.tables[self.remaining]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn flat(entries: &[(&str, f64)], count: usize) -> Vec<Distribution> {
        let table: Distribution = entries.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        vec![table; count]
    }

    fn bits(s: &str) -> Bitstring {
        Bitstring::new(s).unwrap()
    }

    #[test]
    fn close_start_is_rejected() {
        let result = Session::new(flat(&[], 4), bits("000"), bits("011"), GameConfig::default());
        assert!(matches!(result, Err(QreativeError::InvalidState { .. })));
    }

    #[test]
    fn invalid_direction_changes_nothing() -> Result<(), QreativeError> {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = Session::new(flat(&[("000", 1.0)], 4), bits("111"), bits("000"), GameConfig::default())?;
        session.begin_turn(&mut rng)?;
        assert!(matches!(session.choose(0), Err(QreativeError::InvalidDirection { max: 3, .. })));
        assert!(matches!(session.choose(4), Err(QreativeError::InvalidDirection { .. })));
        assert_eq!(session.position().as_str(), "111");
        assert_eq!(session.remaining(), 2);
        assert_eq!(session.choose(2)?, Status::Playing);
        assert_eq!(session.position().as_str(), "101");
        Ok(())
    }

    #[test]
    fn classic_scores_log_strength() -> Result<(), QreativeError> {
        let mut rng = StdRng::seed_from_u64(1);
        let tables = flat(&[("011", 0.5), ("111", 0.5)], 4);
        let mut session = Session::new(tables, bits("111"), bits("000"), GameConfig::default())?;
        session.begin_turn(&mut rng)?;
        session.choose(1)?;
        assert!((session.score() - (INITIAL_SCORE - 1.0)).abs() < 1e-12);
        session.begin_turn(&mut rng)?;
        session.choose(2)?;
        assert_eq!(session.score(), SCORE_FLOOR);
        Ok(())
    }

    #[test]
    fn terminal_sessions_refuse_turns() -> Result<(), QreativeError> {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = Session::new(flat(&[], 2), bits("111"), bits("000"), GameConfig::default())?;
        session.begin_turn(&mut rng)?;
        assert_eq!(session.choose(1)?, Status::LostBudget);
        assert!(matches!(session.begin_turn(&mut rng), Err(QreativeError::SessionOver { .. })));
        assert!(matches!(session.choose(1), Err(QreativeError::SessionOver { .. })));
        Ok(())
    }

    #[test]
    fn weak_universe_is_safe_while_immune() -> Result<(), QreativeError> {
        let config = GameConfig { variant: Variant::Quantpus, malfunction_probability: 0.0, ..GameConfig::default() };
        let tables = flat(&[("111", 0.001), ("011", 0.001), ("001", 0.001)], 4);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = Session::new(tables.clone(), bits("111"), bits("000"), config)?;
            // immunity 3 -> 2 -> 1: the first two checks cannot fail
            assert_eq!(session.begin_turn(&mut rng)?.status, Status::Playing);
            session.choose(1)?;
            assert_eq!(session.begin_turn(&mut rng)?.status, Status::Playing);
        }
        Ok(())
    }

    #[test]
    fn weak_universe_hazard_fires_once_immunity_runs_out() -> Result<(), QreativeError> {
        let config = GameConfig { variant: Variant::Quantpus, malfunction_probability: 0.0, ..GameConfig::default() };
        let tables = flat(&[("111", 0.001), ("011", 0.001), ("001", 0.001)], 5);
        let runs = 200;
        let mut fired = 0;
        for seed in 0..runs {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = Session::new(tables.clone(), bits("111"), bits("000"), config)?;
            for direction in [1, 2] {
                assert_eq!(session.begin_turn(&mut rng)?.status, Status::Playing);
                assert!(session.immunity() > 0);
                session.choose(direction)?;
            }
            let report = session.begin_turn(&mut rng)?;
            assert_eq!(session.immunity(), 0);
            if report.status == Status::LostHazard {
                fired += 1;
                assert!(matches!(session.choose(3), Err(QreativeError::SessionOver { .. })));
            } else {
                assert_eq!(session.choose(3)?, Status::Won);
            }
        }
        assert!((60..=140).contains(&fired), "hazard fired {}/{}", fired, runs);
        Ok(())
    }

    #[test]
    fn strong_universe_never_triggers_hazard() -> Result<(), QreativeError> {
        let config = GameConfig { variant: Variant::Quantpus, malfunction_probability: 0.0, ..GameConfig::default() };
        let tables = flat(&[("111", 0.3), ("011", 0.3), ("001", 0.3)], 5);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = Session::new(tables.clone(), bits("111"), bits("000"), config)?;
            for direction in [1, 2, 3] {
                assert_eq!(session.begin_turn(&mut rng)?.status, Status::Playing);
                session.choose(direction)?;
            }
            assert_eq!(session.status(), Status::Won);
        }
        Ok(())
    }

    #[test]
    fn malfunction_skips_last_portal_and_kills() -> Result<(), QreativeError> {
        let config = GameConfig {
            variant: Variant::Quantpus,
            malfunction_probability: 1.0,
            min_distance: 2,
            ..GameConfig::default()
        };
        let tables = flat(&[("11", 0.4), ("01", 0.3), ("10", 0.3)], 4);
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = Session::new(tables, bits("11"), bits("00"), config)?;
        let first = session.begin_turn(&mut rng)?.malfunctioning;
        let safe = if first == Some(1) { 2 } else { 1 };
        assert_eq!(session.choose(safe)?, Status::Playing);
        assert_eq!(session.last_direction(), Some(safe));
        let report = session.begin_turn(&mut rng)?;
        // the portal just used is never the broken one
        assert_eq!(report.malfunctioning, Some(3 - safe));
        assert_eq!(session.choose(3 - safe)?, Status::LostHazard);
        Ok(())
    }

    #[test]
    fn variant_names_parse() {
        assert_eq!("Quantpus".parse::<Variant>(), Ok(Variant::Quantpus));
        assert_eq!("classic".parse::<Variant>(), Ok(Variant::Classic));
        assert!("arcade".parse::<Variant>().is_err());
    }
}
