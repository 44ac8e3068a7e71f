use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kronsim_core::Swap;
use kronsim_gates::SwapCache;
use kronsim_sim::{Circuit, Engine};
use kronsim_state::{DensityMatrixRegister, StateVectorRegister};

fn create_ghz_circuit(num_qubits: usize) -> Circuit {
    let mut circuit = Circuit::new(num_qubits);
    circuit.h(0).unwrap();
    for i in 0..(num_qubits - 1) {
        circuit.cx(i, i + 1).unwrap();
    }
    circuit
}

/// Controls above their targets, so every gate needs a swap sandwich
fn create_reversed_circuit(num_qubits: usize) -> Circuit {
    let mut circuit = Circuit::new(num_qubits);
    for i in 0..num_qubits {
        circuit.h(i).unwrap();
    }
    for i in (1..num_qubits).rev() {
        circuit.cx(i, 0).unwrap();
    }
    circuit
}

fn bench_state_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_vector");

    for num_qubits in [4, 6, 8].iter() {
        let ghz = create_ghz_circuit(*num_qubits);
        let reversed = create_reversed_circuit(*num_qubits);
        let engine = Engine::new();

        group.bench_with_input(BenchmarkId::new("ghz", num_qubits), num_qubits, |b, &n| {
            b.iter(|| {
                let mut register = StateVectorRegister::new(n).unwrap();
                ghz.run(&engine, &mut register).unwrap();
                black_box(register)
            })
        });

        group.bench_with_input(BenchmarkId::new("reversed_cx", num_qubits), num_qubits, |b, &n| {
            b.iter(|| {
                let mut register = StateVectorRegister::new(n).unwrap();
                reversed.run(&engine, &mut register).unwrap();
                black_box(register)
            })
        });
    }

    group.finish();
}

fn bench_density_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("density_matrix");

    for num_qubits in [3, 5].iter() {
        let circuit = create_ghz_circuit(*num_qubits);
        let engine = Engine::new();

        group.bench_with_input(BenchmarkId::new("ghz", num_qubits), num_qubits, |b, &n| {
            b.iter(|| {
                let mut register = DensityMatrixRegister::new(n).unwrap();
                circuit.run(&engine, &mut register).unwrap();
                black_box(register)
            })
        });
    }

    group.finish();
}

fn bench_swap_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap_cache");
    let swaps = [Swap::new(0, 5), Swap::new(1, 3), Swap::new(2, 4)];

    group.bench_function("cold_block_6q", |b| {
        b.iter(|| {
            let cache = SwapCache::new();
            black_box(cache.build_block(black_box(&swaps), 6).unwrap())
        })
    });

    let warm = SwapCache::new();
    warm.build_block(&swaps, 6).unwrap();
    group.bench_function("warm_block_6q", |b| {
        b.iter(|| black_box(warm.build_block(black_box(&swaps), 6).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_state_vector, bench_density_matrix, bench_swap_cache);
criterion_main!(benches);
