//! State evolution engine
//!
//! Applying a local gate is a three step sandwich:
//!
//! 1. permute the gate's qubits onto the leading tensor positions
//! 2. apply the gate expanded against that ordering
//! 3. apply the inverse permutation and restore the ordering
//!
//! Every operator involved is built before the register is touched, so a
//! failed application leaves amplitudes and ordering exactly as they were.

use crate::circuit::LoweredStep;
use kronsim_core::{
    permutation, Gate, GateShape, LocalGate, Matrix, PermutationGate, QuantumError, QubitId,
    Result, Swap,
};
use kronsim_gates::{expand, leading_ordering, SwapCache};
use kronsim_state::Register;
use std::sync::Arc;
use tracing::debug;

/// Operators prepared for one local gate application
struct Plan {
    swaps: Vec<Swap>,
    desired: Vec<QubitId>,
    restore: Vec<QubitId>,
    /// Forward and inverse swap blocks, absent when the gate is in place
    blocks: Option<(Arc<Matrix>, Arc<Matrix>)>,
    operator: Matrix,
}

/// Applies gates to registers, sharing one [`SwapCache`]
#[derive(Debug, Clone, Default)]
pub struct Engine {
    cache: Arc<SwapCache>,
}

impl Engine {
    /// Engine with a fresh cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine reusing an existing cache
    pub fn with_cache(cache: Arc<SwapCache>) -> Self {
        Self { cache }
    }

    /// The swap operator cache
    pub fn cache(&self) -> &Arc<SwapCache> {
        &self.cache
    }

    /// Apply one gate
    ///
    /// Local gates go through the permute/apply/unpermute sandwich and the
    /// register ordering is unchanged afterwards. A permutation gate is a
    /// physical swap of the amplitudes at the given tensor positions and must
    /// span the whole register.
    ///
    /// # Errors
    /// - [`QuantumError::RegistrySize`] if the gate spans more qubits than the register
    /// - [`QuantumError::InvalidQubit`] if a gate qubit is not in the register
    /// - [`QuantumError::DimensionMismatch`] for a permutation gate of the wrong size
    pub fn apply<R: Register + ?Sized>(&self, register: &mut R, gate: &Gate) -> Result<()> {
        match gate {
            Gate::Local(local) => self.apply_local(register, local),
            Gate::Permutation(permutation) => {
                check_permutation_size(register, permutation)?;
                register.apply_operator(permutation.local_matrix())?;
                debug!(gate = %gate, "applied permutation gate");
                Ok(())
            }
        }
    }

    /// Apply a local gate with immediate swap planning
    pub fn apply_local<R: Register + ?Sized>(&self, register: &mut R, gate: &LocalGate) -> Result<()> {
        let plan = self.plan(register, gate)?;

        match &plan.blocks {
            Some((forward, backward)) => {
                register.apply_operator(forward)?;
                register.set_ordering(plan.desired)?;
                register.apply_operator(&plan.operator)?;
                register.apply_operator(backward)?;
                register.set_ordering(plan.restore)?;
            }
            None => register.apply_operator(&plan.operator)?,
        }

        debug!(
            gate = gate.name(),
            qubits = ?gate.qubits(),
            swaps = plan.swaps.len(),
            "applied gate"
        );
        Ok(())
    }

    /// Run a pre-lowered gate list
    ///
    /// This is the append-time view of the sandwich (see
    /// [`Circuit::lowered`](crate::Circuit::lowered)). Relabel steps move
    /// amplitudes *and* update the ordering bookkeeping. Circuit gates behave
    /// as in [`Engine::apply`], except that local gates are expanded against
    /// the current ordering without further swaps, so they must already sit
    /// on consecutive positions.
    ///
    /// # Errors
    /// Returns [`QuantumError::GateNotAligned`] if a local gate is not in
    /// place, plus the errors of [`Engine::apply`]. Steps before the failing
    /// one stay applied.
    pub fn run_lowered<R: Register + ?Sized>(
        &self,
        register: &mut R,
        steps: &[LoweredStep],
    ) -> Result<()> {
        for step in steps {
            match step {
                LoweredStep::Relabel(block) => {
                    check_permutation_size(register, block)?;
                    let mut ordering = register.qubits().to_vec();
                    permutation::apply_swaps(&mut ordering, block.swaps());
                    register.apply_operator(block.local_matrix())?;
                    register.set_ordering(ordering)?;
                }
                LoweredStep::Apply(Gate::Local(local)) => {
                    let operator = expand(local, register.qubits())?;
                    register.apply_operator(&operator)?;
                }
                LoweredStep::Apply(gate) => self.apply(register, gate)?,
            }
        }
        debug!(steps = steps.len(), "ran lowered gate list");
        Ok(())
    }

    fn plan<R: Register + ?Sized>(&self, register: &R, gate: &LocalGate) -> Result<Plan> {
        let n = register.num_qubits();
        if gate.size() > n {
            return Err(QuantumError::registry_size(gate.name(), gate.size(), n));
        }
        for &qubit in gate.qubits() {
            register.position_of(qubit)?;
        }

        let current = register.qubits().to_vec();
        let desired = leading_ordering(gate, &current);
        let swaps = permutation::resolve(&current, &desired)?;
        debug!(gate = gate.name(), swaps = swaps.len(), "resolved swap plan");

        let blocks = if swaps.is_empty() {
            None
        } else {
            let forward = self.cache.build_block(&swaps, n)?;
            let backward = self.cache.build_block(&permutation::inverse(&swaps), n)?;
            Some((forward, backward))
        };
        let operator = expand(gate, &desired)?;

        Ok(Plan {
            swaps,
            desired,
            restore: current,
            blocks,
            operator,
        })
    }
}

fn check_permutation_size<R: Register + ?Sized>(register: &R, gate: &PermutationGate) -> Result<()> {
    let n = register.num_qubits();
    if gate.size() > n {
        return Err(QuantumError::registry_size(gate.name(), gate.size(), n));
    }
    if gate.size() != n {
        return Err(QuantumError::DimensionMismatch {
            expected: register.dimension(),
            actual: gate.local_matrix().dim(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kronsim_core::ErrorKind;
    use kronsim_gates::standard;
    use kronsim_state::{DensityMatrixRegister, StateVectorRegister};
    use num_complex::Complex64;

    const H: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_hadamard_on_zero() {
        let engine = Engine::new();
        let mut register = StateVectorRegister::new(1).unwrap();
        engine.apply(&mut register, &standard::h(0).unwrap().into()).unwrap();

        assert_relative_eq!(register.ket()[0].re, H, epsilon = 1e-12);
        assert_relative_eq!(register.ket()[1].re, H, epsilon = 1e-12);
    }

    #[test]
    fn test_aligned_gate_needs_no_swaps() {
        let engine = Engine::new();
        let mut register = StateVectorRegister::new(2).unwrap();
        engine.apply(&mut register, &standard::x(0).unwrap().into()).unwrap();

        assert_eq!(register.ket()[1], Complex64::new(1.0, 0.0));
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_reversed_cx_uses_swaps() {
        let engine = Engine::new();
        // |q1 q0> = |01>: control q0 is 1
        let mut register = StateVectorRegister::from_basis_state(2, 0b01).unwrap();
        engine.apply(&mut register, &standard::cx(0, 1).unwrap().into()).unwrap();
        assert_eq!(register.ket()[0b11], Complex64::new(1.0, 0.0));

        // control q1 sits at position 1, so the gate needs a swap in and out
        let mut register = StateVectorRegister::from_basis_state(2, 0b10).unwrap();
        engine.apply(&mut register, &standard::cx(1, 0).unwrap().into()).unwrap();
        assert_eq!(register.ket()[0b11], Complex64::new(1.0, 0.0));
        assert_eq!(register.qubits(), QubitId::range(2).as_slice());
        assert!(engine.cache().misses() > 0);
    }

    #[test]
    fn test_oversized_gate_is_rejected() {
        let engine = Engine::new();
        let mut register = StateVectorRegister::new(1).unwrap();
        let before = register.ket().to_vec();

        let err = engine
            .apply(&mut register, &standard::cx(0, 1).unwrap().into())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RegistrySize);
        assert_eq!(register.ket(), before.as_slice());
    }

    #[test]
    fn test_unknown_qubit_is_rejected() {
        let engine = Engine::new();
        let mut register = StateVectorRegister::new(2).unwrap();
        let err = engine
            .apply(&mut register, &standard::h(5).unwrap().into())
            .unwrap_err();
        assert!(matches!(err, QuantumError::InvalidQubit(5, 2)));
    }

    #[test]
    fn test_swap_gate_is_physical() {
        let engine = Engine::new();
        let mut register = StateVectorRegister::from_basis_state(3, 0b001).unwrap();
        let swap = engine.cache().swap_gate(Swap::new(0, 2), 3).unwrap();
        engine.apply(&mut register, &swap.into()).unwrap();

        assert_eq!(register.ket()[0b100], Complex64::new(1.0, 0.0));
        assert_eq!(register.qubits(), QubitId::range(3).as_slice());

        let narrow = engine.cache().swap_gate(Swap::new(0, 1), 2).unwrap();
        assert!(engine.apply(&mut register, &narrow.into()).is_err());
    }

    #[test]
    fn test_density_register() {
        let engine = Engine::new();
        let mut register = DensityMatrixRegister::new(2).unwrap();
        engine.apply(&mut register, &standard::h(1).unwrap().into()).unwrap();
        engine.apply(&mut register, &standard::cx(1, 0).unwrap().into()).unwrap();

        let rho = register.density_matrix();
        assert_relative_eq!(rho.get(0, 0).re, 0.5, epsilon = 1e-12);
        assert_relative_eq!(rho.get(3, 3).re, 0.5, epsilon = 1e-12);
        assert_relative_eq!(rho.get(0, 3).re, 0.5, epsilon = 1e-12);
        assert_relative_eq!(register.trace(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cache_is_shared() {
        let cache = Arc::new(SwapCache::new());
        let a = Engine::with_cache(Arc::clone(&cache));
        let b = Engine::with_cache(Arc::clone(&cache));

        let gate: Gate = standard::cx(2, 0).unwrap().into();
        a.apply(&mut StateVectorRegister::new(3).unwrap(), &gate).unwrap();
        let misses = cache.misses();
        b.apply(&mut StateVectorRegister::new(3).unwrap(), &gate).unwrap();

        assert_eq!(cache.misses(), misses);
        assert!(cache.hits() > 0);
    }
}
