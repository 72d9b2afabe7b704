// src/lib.rs

//! `qreative` - Creative tools for quantum computers
//!
//! This library generates random-walk statistics by running circuits on a
//! [`Backend`], caches them, and plays "Running out of Hilbert space" on top
//! of them. A handful of smaller toys (integers and booleans on one qubit,
//! Bell correlations, superposed strings, a QRNG) live in [`creative`].

pub mod core;
pub mod operations;
pub mod circuits;
pub mod backend;
pub mod validation;
pub mod walk;
pub mod cache;
pub mod game;
pub mod creative;

// Re-export the most common types for easier top-level use
pub use crate::core::{Bitstring, Counts, Distribution, QreativeError};
pub use operations::{Basis, Gate};
pub use circuits::{Circuit, CircuitBuilder};
pub use backend::{Backend, BackendConfig, BackendKind, ExecuteOptions, ExecutionResult, backend_from_config};
pub use walk::{Graph, Structure, WalkConfig, WalkData, WalkKind, generate};
pub use game::{GameConfig, Session, Status, Variant};

// Example 1: Generate hypercube statistics and cache them
// A short walk on the 5-qubit bowtie device, written to JSON and read back.
/// ```
/// use qreative::{backend_from_config, cache, generate, BackendConfig, Graph, QreativeError, Structure, WalkConfig};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// # fn main() -> Result<(), QreativeError> {
/// let config = BackendConfig::default().with_seed(Some(7)).with_shots(256);
/// let mut backend = backend_from_config(&config)?;
/// let structure = Structure::Hypercube(Graph::device("ibmqx4")?);
/// let walk = WalkConfig { length: 3, samples: 2, shots: config.shots, ..WalkConfig::default() };
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let data = generate(backend.as_mut(), &structure, &walk, None, &mut rng)?;
/// println!("Step 3 of sample 0:\n{}", data.tables[0][3]);
///
/// // One table per prefix length, each summing to one
/// assert_eq!(data.tables[0].len(), 4);
/// assert!((data.tables[1][2].total() - 1.0).abs() < 1e-9);
///
/// let reloaded = cache::from_json(&cache::to_json(&data)?)?;
/// assert_eq!(reloaded, data);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Play a scripted session
// Three-bit universes where only the target has any strength; flipping each
// disagreeing bit wins the game.
/// ```
/// use qreative::{Bitstring, Distribution, GameConfig, QreativeError, Session, Status};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// # fn main() -> Result<(), QreativeError> {
/// let table: Distribution = [("000".to_string(), 1.0)].into_iter().collect();
/// let config = GameConfig { initial_score: 0.0, ..GameConfig::default() };
/// let mut session = Session::new(vec![table; 6], Bitstring::new("111")?, Bitstring::new("000")?, config)?;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// for portal in [1, 2, 3] {
///     session.begin_turn(&mut rng)?;
///     session.choose(portal)?;
/// }
/// assert_eq!(session.status(), Status::Won);
/// assert_eq!(session.remaining(), 2);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
