//! Reads a Bell pair in every pair of bases and prints how often the two
//! qubits agree.

use qreative::creative::bell_correlation;
use qreative::{BackendConfig, Basis, QreativeError, backend_from_config};

fn main() -> Result<(), QreativeError> {
    let config = BackendConfig::from_env().with_seed(Some(2019));
    let mut backend = backend_from_config(&config)?;

    println!("Bell pair agreement over {} shots:\n", config.shots);
    for first in [Basis::X, Basis::Z] {
        for second in [Basis::X, Basis::Z] {
            let correlation = bell_correlation([first, second], backend.as_mut(), config.shots)?;
            println!("  {}{}: {:.3}", first, second, correlation.agreement);
        }
    }
    Ok(())
}
