//! Builds a 4x3 grid of qubits, seeds one corner and lets partial CNOTs
//! spread it along the rows, then prints the most common patterns and a few
//! random numbers from the QRNG.

use qreative::QreativeError;
use qreative::backend::{Backend, StateVectorBackend};
use qreative::creative::{Axis, Qrng, RandomGrid};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), QreativeError> {
    let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(7));

    let mut grid = RandomGrid::new(4, 3)?;
    grid.not((0, 0), 1.0, Axis::X)?;
    for y in 0..grid.height() {
        if y > 0 {
            grid.cnot((0, y - 1), (0, y), 0.7, Axis::Y)?;
        }
        for x in 1..grid.width() {
            grid.cnot((x - 1, y), (x, y), 0.6, Axis::X)?;
        }
    }
    println!("{}", grid.circuit());

    let samples = grid.samples(&mut backend, 1024)?;
    let mut common: Vec<_> = samples.counts.iter().collect();
    common.sort_by(|a, b| b.1.cmp(a.1));
    for (pattern, n) in common.into_iter().take(3) {
        println!("seen {} times:\n{}\n", n, pattern);
    }

    println!("32-bit numbers from the {} backend:", backend.name());
    let mut qrng = Qrng::with_precision(32, &mut backend)?;
    for _ in 0..4 {
        println!("  {} {:.6}", qrng.rand_int(), qrng.rand());
    }
    Ok(())
}
