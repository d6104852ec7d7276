use interp_skel::{interp_skel, SkeletonConfig, SparseMatrixCSC, StopPolicy};
use ndarray::Array1;

/// 1-D Laplacian `tridiag(-1, 2, -1)` of order `n`
fn laplacian_1d(n: usize) -> SparseMatrixCSC<f64> {
    let mut col_ptr = Vec::with_capacity(n + 1);
    let mut row_idx = Vec::new();
    let mut values = Vec::new();

    col_ptr.push(0);
    for j in 0..n {
        if j > 0 {
            row_idx.push(j - 1);
            values.push(-1.0);
        }
        row_idx.push(j);
        values.push(2.0);
        if j + 1 < n {
            row_idx.push(j + 1);
            values.push(-1.0);
        }
        col_ptr.push(row_idx.len());
    }

    SparseMatrixCSC::new(n, n, col_ptr, row_idx, values)
}

/// One column per coarse point, holding `A e_c` on the fine points around it
fn coarse_columns(a: &SparseMatrixCSC<f64>, stride: usize) -> SparseMatrixCSC<f64> {
    let coarse: Vec<usize> = (stride / 2..a.n_cols).step_by(stride).collect();
    let mut col_ptr = Vec::with_capacity(coarse.len() + 1);
    let mut row_idx = Vec::new();
    let mut values = Vec::new();

    col_ptr.push(0);
    for &c in &coarse {
        for (i, &v) in a.col_iter(c) {
            if i != c {
                row_idx.push(i);
                values.push(-v);
            }
        }
        col_ptr.push(row_idx.len());
    }

    SparseMatrixCSC::new(a.n_rows, coarse.len(), col_ptr, row_idx, values)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("interp-skel: greedy sparse interpolation skeletons");

    let n = 32;
    let a = laplacian_1d(n);
    let b = coarse_columns(&a, 4);
    let d = a.diagonal();
    let u = Array1::from_elem(b.n_cols, 1.0);

    println!("\nSystem:");
    println!("  A: {} x {}, nnz = {}", a.n_rows, a.n_cols, a.nnz());
    println!("  B: {} x {}, nnz = {}", b.n_rows, b.n_cols, b.nnz());

    println!("\nRight-hand sides:");
    println!("{:?}", b);

    for policy in [StopPolicy::SumNormalized, StopPolicy::MaxNormalized] {
        let config = SkeletonConfig::with_tolerance(0.05).with_stop_policy(policy);

        match interp_skel(&a, &b, d.view(), u.view(), &config) {
            Ok(out) => {
                println!("\n{:?} (threshold {}):", policy, config.threshold());
                println!("  Skeleton nnz: {}", out.skeleton.nnz());
                for (j, report) in out.columns.iter().enumerate().take(3) {
                    println!(
                        "  Column {}: rows {:?}, statistic {:.3e}",
                        j,
                        out.skeleton.col(j),
                        report.final_norm
                    );
                }
                println!("  Weighted sum (first 8): {:?}", &out.weighted_sum.to_vec()[..8]);
            }
            Err(err) => {
                eprintln!("interp_skel failed: {}", err);
                std::process::exit(1);
            }
        }
    }
}
