// src/creative/superposer.rs

//! Superpositions of bitstrings, and of short ASCII strings encoded as bits.

use crate::backend::{Backend, ExecuteOptions};
use crate::circuits::Circuit;
use crate::core::{Bitstring, Distribution, QreativeError};
use crate::operations::Gate;
use std::collections::BTreeMap;

/// Bits per character used by [`emoticon_superposer`] for plain ASCII.
pub const EMOTICON_ENCODING: usize = 7;

fn superposition_circuit<S: AsRef<str>>(strings: &[S], bias: f64) -> Result<Circuit, QreativeError> {
    if strings.len() < 2 {
        return Err(QreativeError::InvalidState {
            message: format!("A superposition needs at least two strings, got {}", strings.len()),
        });
    }
    let num = strings.iter().map(|s| s.as_ref().len()).max().unwrap_or(0);
    let padded = strings
        .iter()
        .map(|s| Bitstring::new(&format!("{:0>num$}", s.as_ref(), num = num)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut circuit = Circuit::new(num);
    let everything = u32::try_from(num).ok().and_then(|n| 1usize.checked_shl(n));
    if everything == Some(strings.len()) {
        for q in 0..num {
            circuit.add_gate(Gate::H { target: q })?;
        }
        return Ok(circuit);
    }

    let (first, second) = (&padded[0], &padded[1]);
    let diff = first.differing_positions(second);
    for (q, bit) in first.bits().enumerate() {
        if bit && !diff.contains(&q) {
            circuit.add_gate(Gate::X { target: q })?;
        }
    }
    if let Some((&lead, rest)) = diff.split_first() {
        // |0> on the lead qubit selects `first` with probability `bias`
        let theta = 2.0 * bias.clamp(0.0, 1.0).sqrt().acos();
        circuit.add_gate(Gate::Rx { target: lead, theta })?;
        for &q in rest {
            circuit.add_gate(Gate::Cx { control: lead, target: q })?;
        }
        for &q in &diff {
            if first.bit(q) == Some(true) {
                circuit.add_gate(Gate::X { target: q })?;
            }
        }
    }
    Ok(circuit)
}

/// Measures a superposition for each request and returns the fraction of
/// shots giving each string.
///
/// A request lists binary strings; shorter ones are left-padded with zeros.
/// If it lists all `2^n` strings of its length the result is uniform.
/// Otherwise only the first two are superposed, the first with weight `bias`.
pub fn bitstring_superposer<S: AsRef<str>>(
    requests: &[Vec<S>],
    bias: f64,
    backend: &mut dyn Backend,
    shots: usize,
) -> Result<Vec<Distribution>, QreativeError> {
    let batch = requests
        .iter()
        .map(|strings| superposition_circuit(strings, bias))
        .collect::<Result<Vec<_>, _>>()?;
    let result = backend.execute(&batch, &ExecuteOptions::shots(shots))?;
    (0..batch.len()).map(|j| Ok(result.get_counts(j)?.to_distribution())).collect()
}

fn encode(text: &str, encoding: usize) -> Result<String, QreativeError> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if encoding < 32 && code >> encoding != 0 {
                return Err(QreativeError::InvalidState {
                    message: format!("Character '{}' does not fit in {} bits", c, encoding),
                });
            }
            Ok(format!("{:0width$b}", code, width = encoding))
        })
        .collect()
}

fn decode(bits: &str, encoding: usize) -> String {
    bits.as_bytes()
        .chunks(encoding)
        .map(|chunk| {
            let code = chunk.iter().fold(0u32, |acc, b| (acc << 1) | u32::from(*b == b'1'));
            char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect()
}

/// Superposes pairs of emoticons such as `";)"` and `"8)"`.
///
/// Every character is encoded in `encoding` bits; all emoticons of one request
/// must have the same number of characters. Returns, per request, the strength
/// of each string that was measured.
pub fn emoticon_superposer<S: AsRef<str>>(
    requests: &[Vec<S>],
    bias: f64,
    encoding: usize,
    backend: &mut dyn Backend,
    shots: usize,
) -> Result<Vec<BTreeMap<String, f64>>, QreativeError> {
    if encoding == 0 {
        return Err(QreativeError::InvalidState { message: "Characters need at least one bit".to_string() });
    }
    let mut encoded = Vec::with_capacity(requests.len());
    for emoticons in requests {
        let width = emoticons.first().map(|e| e.as_ref().chars().count());
        if emoticons.iter().any(|e| Some(e.as_ref().chars().count()) != width) {
            return Err(QreativeError::InvalidState {
                message: "Emoticons in one superposition must have the same length".to_string(),
            });
        }
        encoded.push(emoticons.iter().map(|e| encode(e.as_ref(), encoding)).collect::<Result<Vec<_>, _>>()?);
    }

    let stats = bitstring_superposer(&encoded, bias, backend, shots)?;
    Ok(stats
        .iter()
        .map(|dist| dist.iter().map(|(bits, p)| (decode(bits, encoding), p)).collect())
        .collect())
}
