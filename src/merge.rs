
use crate::errors::{EvalError, Result};

use ndarray::{prelude::*, s, DataMut};
use tracing::{debug, warn};


#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    #[default]
    Mean,
    Sum, // what the trainer saves as its final vecs
    Main,
    Context,
}

impl MergeStrategy {

    pub fn parse(name: &str) -> Result<MergeStrategy> {
        match name {
            "mean" => Ok(MergeStrategy::Mean),
            "sum" => Ok(MergeStrategy::Sum),
            "main" => Ok(MergeStrategy::Main),
            "context" => Ok(MergeStrategy::Context),
            _ => Err(EvalError::InvalidConfig(format!("unrecognized merge strategy {}", name)))
        }
    }

    pub fn combine(&self, main: ArrayView1<f32>, context: ArrayView1<f32>) -> Array1<f32> {
        match self {
            MergeStrategy::Mean => mean(main, context),
            MergeStrategy::Sum => &main + &context,
            MergeStrategy::Main => main.to_owned(),
            MergeStrategy::Context => context.to_owned(),
        }
    }
}

// what to do with a vector of zero (or non-finite) norm when normalizing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZeroNorm {
    #[default]
    Keep, // leave the row as is and report its id
    Reject,
}

impl ZeroNorm {
    pub fn parse(name: &str) -> Result<ZeroNorm> {
        match name {
            "keep" => Ok(ZeroNorm::Keep),
            "reject" => Ok(ZeroNorm::Reject),
            _ => Err(EvalError::InvalidConfig(format!("unrecognized zero_norm policy {}", name)))
        }
    }
}

pub fn mean(main: ArrayView1<f32>, context: ArrayView1<f32>) -> Array1<f32> {
    (&main + &context) / 2.0
}

/// Scales `v` to unit length in place. Returns false, leaving `v` untouched,
/// when `v` is all zeros or holds a non-finite value.
pub fn unit_normalize<S>(v: &mut ArrayBase<S, Ix1>) -> bool
where
    S: DataMut<Elem = f32>,
{
    // squares of f32 values neither underflow nor overflow in f64
    let norm = v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return false;
    }
    v.mapv_inplace(|x| (x as f64 / norm) as f32);
    true
}

// ids of rows that could not be normalized, see `ZeroNorm`
pub fn normalize_rows(w: &mut Array2<f32>, zero_norm: ZeroNorm) -> Result<Vec<usize>> {

    let mut degenerate: Vec<usize> = Vec::new();
    for (i, mut row) in w.axis_iter_mut(Axis(0)).enumerate() {
        if !unit_normalize(&mut row) {
            match zero_norm {
                ZeroNorm::Keep => degenerate.push(i),
                ZeroNorm::Reject => return Err(EvalError::DegenerateVector { id: i }),
            }
        }
    }

    if !degenerate.is_empty() {
        warn!(count = degenerate.len(), "vectors with zero or non-finite norm were left unnormalized");
    }
    Ok(degenerate)
}

#[derive(Debug)]
pub struct MergedMatrix {
    pub w: Array2<f32>,           // (vocab_size, dim), row i is token id i
    pub degenerate: Vec<usize>,   // ids whose combined vector could not be normalized
}

/// Merges a `(2 * vocab_size, dim)` matrix of stacked main and context vectors
/// into `(vocab_size, dim)`, row `i` being `merge_fun(w[i], w[i + vocab_size])`.
///
/// The first half of `w` is overwritten with the merged rows and the matrix is
/// then cut down to it. All zero rows are handled according to `zero_norm`.
pub fn merge_main_context<F>(mut w: Array2<f32>, merge_fun: F, normalize: bool, zero_norm: ZeroNorm) -> Result<MergedMatrix>
where
    F: Fn(ArrayView1<f32>, ArrayView1<f32>) -> Array1<f32>,
{

    let (rows, dim) = w.dim();
    if rows % 2 != 0 {
        return Err(EvalError::InvalidShape(format!("expected an even number of rows (main followed by context), got {}", rows)));
    }
    let vocab_size = rows / 2;
    debug!(rows, dim, vocab_size, normalize, "merging main and context vectors");

    let mut degenerate: Vec<usize> = Vec::new();
    {
        let (mut main, context) = w.view_mut().split_at(Axis(0), vocab_size);
        for (i, (mut row, context_row)) in main.axis_iter_mut(Axis(0)).zip(context.axis_iter(Axis(0))).enumerate() {

            let mut merged = merge_fun(row.view(), context_row);
            if merged.len() != dim {
                return Err(EvalError::InvalidShape(format!("merge function returned {} values for dim {}", merged.len(), dim)));
            }

            if normalize && !unit_normalize(&mut merged) {
                match zero_norm {
                    ZeroNorm::Keep => degenerate.push(i),
                    ZeroNorm::Reject => return Err(EvalError::DegenerateVector { id: i }),
                }
            }

            row.assign(&merged);
        }
    }

    // from here on only the merged half is visible
    w.slice_collapse(s![..vocab_size, ..]);

    if !degenerate.is_empty() {
        warn!(count = degenerate.len(), "merged vectors with zero or non-finite norm were left unnormalized");
    }

    Ok(MergedMatrix { w, degenerate })
}

pub fn merge_with(w: Array2<f32>, strategy: MergeStrategy, normalize: bool, zero_norm: ZeroNorm) -> Result<MergedMatrix> {
    merge_main_context(w, |m, c| strategy.combine(m, c), normalize, zero_norm)
}
