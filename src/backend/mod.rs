//! Tensor backends.
//!
//! The regression core never touches numbers directly: every arithmetic and
//! comparison operation is issued through [`TensorBackend`], which a secure
//! multi-party computation runtime can implement over secret-shared values.
//! The core only requires that each operation is synchronous and total, and
//! it guarantees in return that its control flow never depends on tensor
//! contents.
//!
//! Two in-crate realizations are provided:
//!
//! - [`PlaintextBackend`]: `ndarray` f32 tensors, the reference realization
//!   used by tests and plaintext deployments.
//! - [`FixedPointBackend`]: single-party fixed-point arithmetic (`i64` raw
//!   values with a power-of-two scale), mirroring the numeric representation
//!   secure backends typically compute in.

mod fixed;
mod plaintext;

pub use fixed::{FixedMatrix, FixedPointBackend, FixedPointError, FixedVector, DEFAULT_SCALE};
pub use plaintext::PlaintextBackend;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Capability contract consumed by the regression core.
///
/// Implementations supply matrix-vector products (plain and transposed, which
/// together cover the transpose requirement), elementwise add/subtract,
/// scaling by a *public* scalar, an elementwise greater-than producing an
/// opaque mask, and an elementwise select that blends two tensors under that
/// mask.
///
/// # Obliviousness
///
/// [`Mask`](TensorBackend::Mask) is deliberately opaque: callers may only
/// pass it back to [`select`](TensorBackend::select). Nothing outside the
/// backend can observe which elements compared true, so the comparison
/// result never influences control flow.
///
/// # Encode / reveal
///
/// [`matrix_from_array`](TensorBackend::matrix_from_array),
/// [`vector_from_array`](TensorBackend::vector_from_array) and the `reveal_*`
/// functions are the harness boundary: they move values between plaintext
/// `ndarray` types and the backend representation. The training loop itself
/// never reveals; only evaluation harnesses and tests do.
pub trait TensorBackend {
    /// Two-dimensional tensor, `[n_rows, n_cols]`.
    type Matrix: Clone;
    /// One-dimensional tensor.
    type Vector: Clone;
    /// Boolean-valued tensor produced by [`gt`](Self::gt). Opaque.
    type Mask;

    // --- Harness boundary ---

    /// Encode a plaintext matrix into the backend representation.
    fn matrix_from_array(data: ArrayView2<'_, f32>) -> Self::Matrix;

    /// Encode a plaintext vector into the backend representation.
    fn vector_from_array(data: ArrayView1<'_, f32>) -> Self::Vector;

    /// Decode a matrix back to plaintext. Evaluation/test use only.
    fn reveal_matrix(m: &Self::Matrix) -> Array2<f32>;

    /// Decode a vector back to plaintext. Evaluation/test use only.
    fn reveal_vector(v: &Self::Vector) -> Array1<f32>;

    // --- Shape queries (shapes are public) ---

    /// `(n_rows, n_cols)` of a matrix.
    fn matrix_shape(m: &Self::Matrix) -> (usize, usize);

    /// Length of a vector.
    fn vector_len(v: &Self::Vector) -> usize;

    // --- Constructors for public values ---

    /// All-zeros vector of the given length.
    fn zeros(len: usize) -> Self::Vector;

    /// Vector filled with a public constant.
    fn constant(value: f32, len: usize) -> Self::Vector;

    // --- Linear algebra ---

    /// `m · v`, length `n_rows`.
    fn matvec(m: &Self::Matrix, v: &Self::Vector) -> Self::Vector;

    /// `mᵀ · v`, length `n_cols`.
    fn matvec_t(m: &Self::Matrix, v: &Self::Vector) -> Self::Vector;

    // --- Elementwise arithmetic ---

    /// Elementwise `a + b`.
    fn add(a: &Self::Vector, b: &Self::Vector) -> Self::Vector;

    /// Elementwise `a - b`.
    fn sub(a: &Self::Vector, b: &Self::Vector) -> Self::Vector;

    /// Scale by a public scalar.
    fn scale(v: &Self::Vector, factor: f32) -> Self::Vector;

    // --- Oblivious comparison and blend ---

    /// Elementwise `a > b`. The dominant cost under secure backends; the
    /// core issues at most one call per sample per training iteration.
    fn gt(a: &Self::Vector, b: &Self::Vector) -> Self::Mask;

    /// Elementwise blend: `on_true` where the mask holds, `on_false`
    /// elsewhere, without branching on mask contents.
    fn select(mask: &Self::Mask, on_true: &Self::Vector, on_false: &Self::Vector) -> Self::Vector;

    // --- Structure ---

    /// Append a column of ones (intercept column) to a matrix.
    fn append_ones_column(m: &Self::Matrix) -> Self::Matrix;
}
