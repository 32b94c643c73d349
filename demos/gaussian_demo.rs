//! Demo showing Gaussian kernel evaluation and Gram matrix assembly

use mercer::{kernel_matrix, kernel_matrix_dx, GaussianKernel, Kernel};
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Gaussian Kernel Demo ===");

    // Three bandwidths over the same pair of points
    let x = array![0.0, 0.0];
    let y = array![1.0, 0.0];

    for alpha in [0.5, 1.0, 2.0] {
        let kernel = GaussianKernel::new(alpha)?;
        let value = kernel.compute(x.view(), y.view())?;
        println!("alpha = {alpha}: K(x, y) = {value:.6}");
    }

    // Gram matrix over a small observation set (rows = observations)
    println!("\n=== Gram Matrix ===");
    let data = array![
        [0.0, 0.0],
        [1.0, 0.0],
        [0.0, 2.0],
        [1.5, 1.5],
    ];
    let kernel = GaussianKernel::unit();
    let gram = kernel_matrix(&kernel, data.view())?;
    for row in gram.rows() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.4}")).collect();
        println!("[{}]", cells.join(", "));
    }

    // Per-pair gradient tensor
    println!("\n=== Gradient w.r.t. x ===");
    let dx = kernel_matrix_dx(&kernel, data.view(), data.view())?;
    println!(
        "gradient tensor shape: {} x {} x {}",
        dx.dim().0,
        dx.dim().1,
        dx.dim().2
    );
    println!("dK[0,1]/dx = {:?}", dx.slice(ndarray::s![0, 1, ..]));

    Ok(())
}
