// src/creative/bell.rs

use crate::backend::{Backend, ExecuteOptions};
use crate::circuits::CircuitBuilder;
use crate::core::QreativeError;
use crate::operations::{Basis, Gate};
use std::f64::consts::FRAC_PI_4;

/// Agreement statistics of a measured Bell pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BellCorrelation {
    /// Fraction of shots in which both qubits gave the same result.
    pub agreement: f64,
    pub samples: usize,
}

/// Prepares a rotated Bell pair and measures qubit `j` in `bases[j]`.
///
/// In the ideal case ZZ, ZX and XZ agree about 85% of the time and XX about
/// 15%, the pattern behind the CHSH game.
pub fn bell_correlation(bases: [Basis; 2], backend: &mut dyn Backend, shots: usize) -> Result<BellCorrelation, QreativeError> {
    let mut builder = CircuitBuilder::new(2)
        .add_gate(Gate::H { target: 0 })
        .add_gate(Gate::Cx { control: 0, target: 1 })
        .add_gate(Gate::Ry { target: 1, theta: FRAC_PI_4 })
        .add_gate(Gate::H { target: 1 });
    for (qubit, basis) in bases.iter().enumerate() {
        builder = builder.add_gates(basis.rotate_into(qubit));
    }
    let circuit = builder.build()?;

    let result = backend.execute(&[circuit], &ExecuteOptions::shots(shots))?;
    let counts = result.get_counts(0)?;
    let samples = counts.total();
    let agreeing = counts.get("00") + counts.get("11");
    let agreement = if samples == 0 { 0.0 } else { agreeing as f64 / samples as f64 };
    Ok(BellCorrelation { agreement, samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StateVectorBackend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn xx_disagrees_where_zz_agrees() -> Result<(), QreativeError> {
        let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(21));
        let zz = bell_correlation([Basis::Z, Basis::Z], &mut backend, 4096)?;
        let xx = bell_correlation([Basis::X, Basis::X], &mut backend, 4096)?;
        let ideal = (1.0 + FRAC_PI_4.cos()) / 2.0;
        assert_eq!(zz.samples, 4096);
        assert!((zz.agreement - ideal).abs() < 0.05, "zz = {}", zz.agreement);
        assert!((xx.agreement - (1.0 - ideal)).abs() < 0.05, "xx = {}", xx.agreement);
        Ok(())
    }
}
