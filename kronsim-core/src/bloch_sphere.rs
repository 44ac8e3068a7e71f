//! Bloch sphere coordinates for single-qubit states
//!
//! Any pure single-qubit state can be written, up to a global phase, as
//!
//! |ψ⟩ = cos(θ/2)|0⟩ + e^(iφ)sin(θ/2)|1⟩
//!
//! where θ ∈ [0, π] is the polar angle and φ the azimuth.
//!
//! # Example
//!
//! ```
//! use kronsim_core::BlochAngles;
//! use num_complex::Complex64;
//!
//! let h = 1.0 / 2.0_f64.sqrt();
//! let plus = [Complex64::new(h, 0.0), Complex64::new(h, 0.0)];
//! let angles = BlochAngles::from_state(&plus).unwrap();
//! assert!(angles.phi.abs() < 1e-10);
//! assert!((angles.theta - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
//! ```

use crate::{QuantumError, Result};
use num_complex::Complex64;

/// Amplitudes below this magnitude are treated as zero when fixing the gauge
const ZERO_AMPLITUDE: f64 = 1e-12;

/// Bloch sphere angles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlochAngles {
    /// Azimuthal angle φ ∈ (-π, π]
    pub phi: f64,
    /// Polar angle θ ∈ [0, π]
    pub theta: f64,
}

/// A point on the Bloch sphere in Cartesian coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    /// +Z is |0⟩ and -Z is |1⟩
    pub z: f64,
}

impl BlochAngles {
    /// Project the amplitudes `[α, β]` onto the Bloch sphere
    ///
    /// The state is first rephased so that its first non-zero amplitude is
    /// real and non-negative. Then θ = 2·arccos(Re α') and φ = arg β'.
    ///
    /// # Errors
    /// Returns [`QuantumError::Validation`] for the all-zero vector.
    pub fn from_state(state: &[Complex64; 2]) -> Result<Self> {
        let canonical = canonical_gauge(state)?;

        let theta = 2.0 * canonical[0].re.clamp(-1.0, 1.0).acos();
        let phi = if canonical[1].norm() > ZERO_AMPLITUDE {
            canonical[1].arg()
        } else {
            0.0
        };

        Ok(Self { phi, theta })
    }

    /// Cartesian form of these angles on the unit sphere
    pub fn to_vector(&self) -> BlochVector {
        BlochVector {
            x: self.theta.sin() * self.phi.cos(),
            y: self.theta.sin() * self.phi.sin(),
            z: self.theta.cos(),
        }
    }
}

impl BlochVector {
    /// Bloch vector from Pauli expectation values of `[α, β]`
    pub fn from_state(state: &[Complex64; 2]) -> Self {
        let alpha = state[0];
        let beta = state[1];
        let alpha_conj_beta = alpha.conj() * beta;

        Self {
            x: 2.0 * alpha_conj_beta.re,
            y: 2.0 * alpha_conj_beta.im,
            z: alpha.norm_sqr() - beta.norm_sqr(),
        }
    }

    /// Length of the vector; 1 for pure states
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Rephase `state` so its first non-zero amplitude is real and non-negative
fn canonical_gauge(state: &[Complex64; 2]) -> Result<[Complex64; 2]> {
    let lead = state
        .iter()
        .position(|a| a.norm() > ZERO_AMPLITUDE)
        .ok_or_else(|| QuantumError::Validation("cannot project the zero vector".to_string()))?;

    let rephase = Complex64::from_polar(1.0, -state[lead].arg());
    let mut canonical = [state[0] * rephase, state[1] * rephase];
    canonical[lead] = Complex64::new(canonical[lead].re, 0.0);
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const H: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_zero_state() {
        let angles = BlochAngles::from_state(&[Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]).unwrap();
        assert_relative_eq!(angles.theta, 0.0, epsilon = 1e-10);
        assert_relative_eq!(angles.phi, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_one_state() {
        let angles = BlochAngles::from_state(&[Complex64::new(0.0, 0.0), Complex64::new(0.0, 1.0)]).unwrap();
        assert_relative_eq!(angles.theta, PI, epsilon = 1e-10);
        assert_relative_eq!(angles.phi, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_plus_state() {
        let angles = BlochAngles::from_state(&[Complex64::new(H, 0.0), Complex64::new(H, 0.0)]).unwrap();
        assert_relative_eq!(angles.theta, FRAC_PI_2, epsilon = 1e-10);
        assert_relative_eq!(angles.phi, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_global_phase_is_removed() {
        let phase = Complex64::from_polar(1.0, 1.234);
        let state = [Complex64::new(H, 0.0) * phase, Complex64::new(0.0, H) * phase];
        let angles = BlochAngles::from_state(&state).unwrap();
        assert_relative_eq!(angles.theta, FRAC_PI_2, epsilon = 1e-10);
        assert_relative_eq!(angles.phi, FRAC_PI_2, epsilon = 1e-10);
    }

    #[test]
    fn test_t_phase() {
        let state = [Complex64::new(H, 0.0), Complex64::from_polar(H, FRAC_PI_4)];
        let angles = BlochAngles::from_state(&state).unwrap();
        assert_relative_eq!(angles.phi, FRAC_PI_4, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_vector_rejected() {
        let zero = Complex64::new(0.0, 0.0);
        assert!(BlochAngles::from_state(&[zero, zero]).is_err());
    }

    #[test]
    fn test_vector_agrees_with_angles() {
        let state = [Complex64::new(0.6, 0.0), Complex64::from_polar(0.8, 0.7)];
        let from_angles = BlochAngles::from_state(&state).unwrap().to_vector();
        let direct = BlochVector::from_state(&state);
        assert_relative_eq!(from_angles.x, direct.x, epsilon = 1e-10);
        assert_relative_eq!(from_angles.y, direct.y, epsilon = 1e-10);
        assert_relative_eq!(from_angles.z, direct.z, epsilon = 1e-10);
        assert_relative_eq!(direct.magnitude(), 1.0, epsilon = 1e-10);
    }
}
