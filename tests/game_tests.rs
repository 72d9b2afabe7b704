// tests/game_tests.rs

use proptest::prelude::*;
use qreative::backend::StateVectorBackend;
use qreative::game::Console;
use qreative::{
    Bitstring, Distribution, GameConfig, Graph, QreativeError, Session, Status, Structure, Variant, WalkConfig,
    WalkData, generate,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;

fn table(entries: &[(&str, f64)]) -> Distribution {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn bits(s: &str) -> Result<Bitstring, QreativeError> {
    Bitstring::new(s)
}

#[test]
fn test_scenario_a_direct_route_wins() -> Result<(), QreativeError> {
    // n = 3, L = 5: only "000" has any strength, at every step
    let tables = vec![table(&[("000", 1.0)]); 6];
    let config = GameConfig { initial_score: 0.0, ..GameConfig::default() };
    let mut session = Session::new(tables, bits("111")?, bits("000")?, config)?;
    let mut rng = StdRng::seed_from_u64(0);

    let mut score = session.score();
    let mut turns = 0;
    while session.status() == Status::Playing {
        session.begin_turn(&mut rng)?;
        let portal = session.position().differing_positions(session.target())[0] + 1;
        session.choose(portal)?;
        assert!(session.score() >= score);
        score = session.score();
        turns += 1;
    }
    assert_eq!(session.status(), Status::Won);
    assert!(turns <= 3);
    Ok(())
}

#[test]
fn test_scenario_b_budget_too_small() -> Result<(), QreativeError> {
    let tables = vec![table(&[("000", 1.0)]); 2];
    for portal in 1..=3 {
        let mut session = Session::new(tables.clone(), bits("111")?, bits("000")?, GameConfig::default())?;
        let mut rng = StdRng::seed_from_u64(portal as u64);
        session.begin_turn(&mut rng)?;
        assert_eq!(session.choose(portal)?, Status::LostBudget);
    }
    Ok(())
}

#[test]
fn test_scenario_c_absent_universe_is_fatal_next_turn() -> Result<(), QreativeError> {
    let tables = vec![table(&[("111", 0.5), ("000", 0.5)]); 6];
    let config = GameConfig { variant: Variant::Quantpus, malfunction_probability: 0.0, ..GameConfig::default() };
    let mut session = Session::new(tables, bits("111")?, bits("000")?, config)?;
    let mut rng = StdRng::seed_from_u64(9);

    assert_eq!(session.begin_turn(&mut rng)?.status, Status::Playing);
    assert_eq!(session.choose(1)?, Status::Playing);
    assert_eq!(session.score(), config.initial_score);

    let report = session.begin_turn(&mut rng)?;
    assert_eq!(report.strength, None);
    assert_eq!(report.status, Status::LostHazard);
    assert!(matches!(session.choose(2), Err(QreativeError::SessionOver { .. })));
    Ok(())
}

#[test]
fn test_classic_survives_absent_universe() -> Result<(), QreativeError> {
    let tables = vec![table(&[("111", 0.5), ("000", 0.5)]); 6];
    let mut session = Session::new(tables, bits("111")?, bits("000")?, GameConfig::default())?;
    let mut rng = StdRng::seed_from_u64(9);
    session.begin_turn(&mut rng)?;
    session.choose(1)?;
    assert_eq!(session.score(), 0.0);
    assert_eq!(session.begin_turn(&mut rng)?.status, Status::Playing);
    Ok(())
}

#[test]
fn test_thousand_starts_keep_their_distance() -> Result<(), QreativeError> {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..1000 {
        let target = Bitstring::random(5, &mut rng);
        let start = target.random_distant(3, &mut rng)?;
        assert!(start.hamming_distance(&target) >= 3);
    }
    Ok(())
}

fn generated() -> Result<WalkData, QreativeError> {
    let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(31));
    let mut rng = StdRng::seed_from_u64(32);
    let config = WalkConfig { length: 8, samples: 3, shots: 256, ..WalkConfig::default() };
    generate(&mut backend, &Structure::Hypercube(Graph::device("ibmqx4")?), &config, None, &mut rng)
}

#[test]
fn test_session_from_generated_walk() -> Result<(), QreativeError> {
    let data = generated()?;
    let mut rng = StdRng::seed_from_u64(33);
    let session = Session::from_walk(&data, GameConfig::default(), &mut rng)?;
    assert!(data.starts.contains(&session.target().to_string()));
    assert!(session.position().hamming_distance(session.target()) >= 3);
    assert_eq!(session.remaining(), 8);
    Ok(())
}

#[test]
fn test_graph_statistics_cannot_be_played() -> Result<(), QreativeError> {
    let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(1));
    let mut rng = StdRng::seed_from_u64(2);
    let config = WalkConfig { length: 2, samples: 1, shots: 64, ..WalkConfig::default() };
    let data = generate(&mut backend, &Structure::Graph(Graph::grid(2, 2)), &config, None, &mut rng)?;
    assert!(Session::from_walk(&data, GameConfig::default(), &mut rng).is_err());
    Ok(())
}

#[test]
fn test_console_plays_to_an_ending() -> Result<(), QreativeError> {
    let data = generated()?;
    let mut rng = StdRng::seed_from_u64(34);
    let config = GameConfig { variant: Variant::Quantpus, ..GameConfig::default() };
    let mut session = Session::from_walk(&data, config, &mut rng)?;
    let input = "1\n".repeat(8);
    let mut console = Console::new(Cursor::new(input), Vec::new());
    let status = console.play(&mut session, &mut rng)?;
    assert!(status.is_over());
    let text = String::from_utf8_lossy(&console.into_output()).to_string();
    let endings = ["You saved the multiverse", "You ceased to exist", "The multiverse has been destroyed"];
    assert_eq!(endings.iter().filter(|e| text.contains(*e)).count(), 1);
    Ok(())
}

proptest! {
    #[test]
    fn sessions_never_start_close(seed in any::<u64>(), n in 3..8usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let target = Bitstring::random(n, &mut rng);
        let start = target.random_distant(3, &mut rng).unwrap();
        let tables = vec![Distribution::new(); 4];
        prop_assert!(Session::new(tables.clone(), start, target.clone(), GameConfig::default()).is_ok());
        let near = target.flip(0).unwrap();
        prop_assert!(Session::new(tables, near, target, GameConfig::default()).is_err());
    }
}
