//! Text dump of basis-state probabilities

use crate::{DensityMatrixRegister, StateVectorRegister};
use std::fmt;

/// Column width of the table
const COLUMN: usize = 10;

/// Basis label `|b..b>`, most significant position first
pub fn basis_label(index: usize, num_qubits: usize) -> String {
    format!("|{:0width$b}>", index, width = num_qubits)
}

/// Render a `State`/`Value` table with probabilities rounded to 2 dp
///
/// With `only_ones`, rows whose rounded probability is not 1 are skipped.
pub(crate) fn probability_table(num_qubits: usize, probabilities: &[f64], only_ones: bool) -> String {
    let mut out = format!("{:<w$}{:<w$}\n", "State", "Value", w = COLUMN);
    for (index, p) in probabilities.iter().enumerate() {
        let mut rounded = (p * 100.0).round() / 100.0;
        if rounded == 0.0 {
            // avoid printing -0.00 for tiny negative diagonal noise
            rounded = 0.0;
        }
        if only_ones && rounded != 1.0 {
            continue;
        }
        out.push_str(&format!(
            "{:<w$}{:<w$}\n",
            basis_label(index, num_qubits),
            format!("{:.2}", rounded),
            w = COLUMN
        ));
    }
    out
}

impl fmt::Display for StateVectorRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.probability_table(false))
    }
}

impl fmt::Display for DensityMatrixRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.probability_table(false))
    }
}
