#[cfg(feature = "allocations")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() {
    #[cfg(feature = "allocations")]
    tensor_product();

    #[cfg(feature = "allocations")]
    pair_hamiltonian();
}

#[cfg(feature = "allocations")]
fn tensor_product() {
    use benches::setup;
    use pair_interaction::tensor_product::calculate_tensor_product;

    let (basis, operator) = setup(256, Some(0.1));

    let _profiler = dhat::Profiler::new_heap();
    calculate_tensor_product(&basis, &operator, &operator).unwrap();
}

#[cfg(feature = "allocations")]
fn pair_hamiltonian() {
    use benches::setup;
    use pair_interaction::system_pair::SystemPair;

    let (basis, _) = setup(128, Some(0.1));
    let mut system = SystemPair::new(basis);
    system.set_distance(10.0).unwrap();

    let _profiler = dhat::Profiler::new_heap();
    system.hamiltonian().unwrap();
}
