//! Plaintext ndarray backend.

use ndarray::{concatenate, Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

use super::TensorBackend;

/// Reference backend computing directly on `ndarray` f32 tensors.
///
/// The mask is a boolean array, but it stays private to this module's
/// [`select`](TensorBackend::select); callers cannot branch on it through
/// the trait surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextBackend;

impl TensorBackend for PlaintextBackend {
    type Matrix = Array2<f32>;
    type Vector = Array1<f32>;
    type Mask = Array1<bool>;

    fn matrix_from_array(data: ArrayView2<'_, f32>) -> Self::Matrix {
        data.to_owned()
    }

    fn vector_from_array(data: ArrayView1<'_, f32>) -> Self::Vector {
        data.to_owned()
    }

    fn reveal_matrix(m: &Self::Matrix) -> Array2<f32> {
        m.clone()
    }

    fn reveal_vector(v: &Self::Vector) -> Array1<f32> {
        v.clone()
    }

    fn matrix_shape(m: &Self::Matrix) -> (usize, usize) {
        m.dim()
    }

    fn vector_len(v: &Self::Vector) -> usize {
        v.len()
    }

    fn zeros(len: usize) -> Self::Vector {
        Array1::zeros(len)
    }

    fn constant(value: f32, len: usize) -> Self::Vector {
        Array1::from_elem(len, value)
    }

    fn matvec(m: &Self::Matrix, v: &Self::Vector) -> Self::Vector {
        m.dot(v)
    }

    fn matvec_t(m: &Self::Matrix, v: &Self::Vector) -> Self::Vector {
        m.t().dot(v)
    }

    fn add(a: &Self::Vector, b: &Self::Vector) -> Self::Vector {
        debug_assert_eq!(a.len(), b.len());
        a + b
    }

    fn sub(a: &Self::Vector, b: &Self::Vector) -> Self::Vector {
        debug_assert_eq!(a.len(), b.len());
        a - b
    }

    fn scale(v: &Self::Vector, factor: f32) -> Self::Vector {
        v * factor
    }

    fn gt(a: &Self::Vector, b: &Self::Vector) -> Self::Mask {
        debug_assert_eq!(a.len(), b.len());
        Zip::from(a).and(b).map_collect(|&x, &y| x > y)
    }

    fn select(mask: &Self::Mask, on_true: &Self::Vector, on_false: &Self::Vector) -> Self::Vector {
        debug_assert_eq!(mask.len(), on_true.len());
        debug_assert_eq!(mask.len(), on_false.len());
        Zip::from(mask)
            .and(on_true)
            .and(on_false)
            .map_collect(|&m, &t, &f| if m { t } else { f })
    }

    fn append_ones_column(m: &Self::Matrix) -> Self::Matrix {
        let ones = Array2::ones((m.nrows(), 1));
        concatenate(Axis(1), &[m.view(), ones.view()]).expect("row counts match")
    }
}
