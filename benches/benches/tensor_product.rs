use benches::setup;
use diol::prelude::*;
use pair_interaction::{system_pair::SystemPair, tensor_product::calculate_tensor_product};

fn main() -> eyre::Result<()> {
    let bench = Bench::new(Config::from_args()?);

    bench.register("full tensor product", bench_full_tensor_product, [16, 32, 64, 128]);
    bench.register(
        "windowed tensor product",
        bench_windowed_tensor_product,
        [64, 128, 256, 512],
    );
    bench.register("pair hamiltonian", bench_pair_hamiltonian, [64, 128, 256]);

    bench.run()?;
    Ok(())
}

fn bench_full_tensor_product(b: Bencher, size: usize) {
    let (basis, operator) = setup(size, None);

    b.bench(|| {
        let mut product = calculate_tensor_product(&basis, &operator, &operator).unwrap();

        black_box(&mut product);
    });
}

fn bench_windowed_tensor_product(b: Bencher, size: usize) {
    let (basis, operator) = setup(size, Some(0.05));

    b.bench(|| {
        let mut product = calculate_tensor_product(&basis, &operator, &operator).unwrap();

        black_box(&mut product);
    });
}

fn bench_pair_hamiltonian(b: Bencher, size: usize) {
    let (basis, _) = setup(size, Some(0.05));
    let mut system = SystemPair::new(basis);

    b.bench(|| {
        system.set_distance(10.0).unwrap();
        let hamiltonian = system.hamiltonian().unwrap();

        black_box(hamiltonian);
    });
}
