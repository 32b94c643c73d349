//! Demo showing kernel composition and parameter-path addressing

use mercer::{
    kernel_matrix, ArdKernel, GaussianKernel, Kernel, LinearKernel, ProductKernel, ScaledKernel,
    SumKernel,
};
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Kernel Composition Demo ===");

    // Sum of a smooth Gaussian and a linear trend
    let kernel = SumKernel::new(
        1.0,
        ScaledKernel::new(2.0, GaussianKernel::new(0.5)?)?,
        0.1,
        LinearKernel::plain(),
    )?;

    let x = array![1.0, -0.5];
    let y = array![0.2, 0.8];
    println!("K(x, y) = {:.6}", kernel.compute(x.view(), y.view())?);
    println!("positive semi-definite: {}", kernel.is_psd());

    // Flattened parameter namespace: coefficients first, then children
    println!("\n=== Parameter Addressing ===");
    for (index, name) in kernel.param_names().iter().enumerate() {
        let grad = kernel.grad_param_index(index, x.view(), y.view())?;
        println!("[{index}] {name}: dK/dp = {grad:.6}");
    }

    // Structured description of the kernel tree
    println!("\n=== Description ===");
    println!("{:#?}", kernel.describe());

    // Product of two Gaussians keeps the batched Gram path
    println!("\n=== Batched Composite Gram ===");
    let product = ProductKernel::new(1.0, GaussianKernel::unit(), GaussianKernel::new(3.0)?)?;
    let data = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
    let gram = kernel_matrix(&product, data.view())?;
    println!("reduction: {:?}", product.reduction());
    for row in gram.rows() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.4}")).collect();
        println!("[{}]", cells.join(", "));
    }

    // ARD weighting masks out irrelevant dimensions
    println!("\n=== ARD Weighting ===");
    let ard = ArdKernel::new(GaussianKernel::unit(), array![1.0, 0.0])?;
    let a = array![0.0, 100.0];
    let b = array![0.0, -100.0];
    println!(
        "K(a, b) with second dimension masked: {:.6}",
        ard.compute(a.view(), b.view())?
    );

    Ok(())
}
