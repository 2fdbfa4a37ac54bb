use blueprint_algebra::{bn254::BN254Scalar, prelude::*};
use blueprint_plonk::plonk::builder::CircuitBuilder;
use blueprint_plonk::plonk::checker::check;
use blueprint_plonk::plonk::component::{
    ArithmeticBatch, ArithmeticOp, ColumnLayout, RangeCheck, XIndex, XIndexInput,
};
use blueprint_plonk::plonk::constraint_system::{TableShape, Variable};
use criterion::{criterion_group, criterion_main, Criterion};

const WITNESS: usize = 15;

fn bench_checker(c: &mut Criterion) {
    let mut prng = test_rng();
    let mut builder = CircuitBuilder::<BN254Scalar>::new(TableShape::new(WITNESS, 1, 1));

    let n = 1 << 10;
    let input: Vec<(Variable, Variable)> = (0..n)
        .map(|_| {
            (
                builder.public_input(BN254Scalar::from(u64::from(prng.next_u32()))),
                builder.public_input(BN254Scalar::from(u64::from(prng.next_u32()))),
            )
        })
        .collect();
    let mul = ArithmeticBatch::new(
        ArithmeticOp::Multiplication,
        n,
        ColumnLayout::contiguous(WITNESS, 0, 0),
    );
    let products = builder.add_component(&mul, &input);

    let firsts: Vec<Variable> = input.iter().map(|(a, _)| *a).collect();
    let range = RangeCheck::new(n, 8, 4, ColumnLayout::contiguous(WITNESS, 0, 0));
    builder.add_component(&range, &firsts);

    // omega^(2^16 - 1) with every bit set to zero
    let omega = BN254Scalar::from(5u32);
    let bits_amount = 16;
    let mut tmp = BN254Scalar::one();
    for _ in 0..bits_amount {
        tmp = tmp.square() * omega;
    }
    let x = builder.public_input(tmp);
    let bits = (0..bits_amount)
        .map(|_| builder.public_input(BN254Scalar::zero()))
        .collect();
    let x_index = XIndex::new(
        bits_amount,
        omega,
        ColumnLayout::contiguous(WITNESS, 1, 0),
    );
    builder.add_component(&x_index, &XIndexInput { x, bits });

    let (circuit, assignment) = builder.finalize();
    check(&circuit, &assignment).unwrap();
    assert_eq!(products.len(), n);

    let mut checker_group = c.benchmark_group("bench_checker");
    checker_group.sample_size(10);
    checker_group.bench_function("check".to_string(), |b| {
        b.iter(|| check(&circuit, &assignment).unwrap())
    });
    checker_group.finish();
}

criterion_group!(benches, bench_checker);
criterion_main!(benches);
