//! Small dense matrices stored as fixed-size arrays.
//!
//! Laminate stiffness blocks are at most 8x8, so the crate works with
//! `[[f64; N]; N]` directly instead of pulling in a linear algebra library.

pub type Mat2 = [[f64; 2]; 2];
pub type Mat3 = [[f64; 3]; 3];
pub type Mat6 = [[f64; 6]; 6];
pub type Mat8 = [[f64; 8]; 8];

pub const ZERO2: Mat2 = [[0.0; 2]; 2];
pub const ZERO3: Mat3 = [[0.0; 3]; 3];

/// `acc += factor * m`
pub fn add_scaled<const N: usize>(acc: &mut [[f64; N]; N], m: &[[f64; N]; N], factor: f64) {
    for (row_acc, row) in acc.iter_mut().zip(m.iter()) {
        for (a, v) in row_acc.iter_mut().zip(row.iter()) {
            *a += factor * v;
        }
    }
}

pub fn scaled<const N: usize>(m: &[[f64; N]; N], factor: f64) -> [[f64; N]; N] {
    let mut out = *m;
    for row in out.iter_mut() {
        for v in row.iter_mut() {
            *v *= factor;
        }
    }
    out
}

pub fn matmul<const N: usize>(a: &[[f64; N]; N], b: &[[f64; N]; N]) -> [[f64; N]; N] {
    let mut out = [[0.0; N]; N];
    for i in 0..N {
        for j in 0..N {
            out[i][j] = (0..N).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

/// Inverse by Gauss-Jordan elimination with partial pivoting.
///
/// Returns `None` when a pivot falls below `1e-14` times the largest
/// absolute entry of the input.
pub fn invert<const N: usize>(m: &[[f64; N]; N]) -> Option<[[f64; N]; N]> {
    let scale = m
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return None;
    }
    let tol = scale * 1e-14;

    let mut a = *m;
    let mut inv = [[0.0; N]; N];
    for (i, row) in inv.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for col in 0..N {
        let pivot = (col..N).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() <= tol {
            return None;
        }
        a.swap(col, pivot);
        inv.swap(col, pivot);

        let p = a[col][col];
        for j in 0..N {
            a[col][j] /= p;
            inv[col][j] /= p;
        }
        for row in 0..N {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..N {
                a[row][j] -= factor * a[col][j];
                inv[row][j] -= factor * inv[col][j];
            }
        }
    }
    Some(inv)
}
