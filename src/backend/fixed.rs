//! Fixed-point backend.
//!
//! Secure backends rarely compute over floats; they encode values as
//! integers with an implicit power-of-two scale and wrap on overflow, the
//! same way modular share arithmetic behaves. This module provides a
//! single-party realization of that representation so the regression core
//! can be exercised (and its convergence characterized) in the arithmetic a
//! deployment would actually use. It does not implement secret sharing.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use thiserror::Error;

use super::TensorBackend;

/// Default scale exponent: values are stored as `raw / 2^20`.
pub const DEFAULT_SCALE: u8 = 20;

/// Largest accepted scale exponent.
pub const MAX_SCALE: u8 = 40;

/// Errors surfaced by checked encode paths.
///
/// In-protocol arithmetic never fails: add/sub wrap and products truncate,
/// matching share semantics. Only the plaintext→fixed boundary checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixedPointError {
    /// Value does not fit the representable range at the given scale.
    #[error("value {value} overflows the fixed-point range at scale {scale}")]
    Overflow { value: f64, scale: u8 },

    /// Scale exponent out of range.
    #[error("invalid scale {0}, must be at most {MAX_SCALE}")]
    InvalidScale(u8),
}

#[inline]
fn scale_factor(scale: u8) -> f64 {
    (1u64 << scale) as f64
}

#[inline]
fn encode_saturating(value: f32, scale: u8) -> i64 {
    let scaled = value as f64 * scale_factor(scale);
    if scaled >= i64::MAX as f64 {
        i64::MAX
    } else if scaled <= i64::MIN as f64 {
        i64::MIN
    } else {
        scaled.round() as i64
    }
}

#[inline]
fn encode_checked(value: f32, scale: u8) -> Result<i64, FixedPointError> {
    let scaled = value as f64 * scale_factor(scale);
    if scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
        return Err(FixedPointError::Overflow {
            value: value as f64,
            scale,
        });
    }
    Ok(scaled.round() as i64)
}

#[inline]
fn decode(raw: i64, scale: u8) -> f32 {
    (raw as f64 / scale_factor(scale)) as f32
}

/// Truncating fixed-point product: `(a * b) / 2^scale`.
#[inline]
fn mul_rescale(a: i64, b: i64, scale: u8) -> i64 {
    ((a as i128 * b as i128) >> scale) as i64
}

// =============================================================================
// FixedVector / FixedMatrix
// =============================================================================

/// One-dimensional fixed-point tensor: raw `i64` values at a common scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedVector {
    raw: Vec<i64>,
    scale: u8,
}

impl FixedVector {
    /// Zero vector at the given scale.
    pub fn zeros(len: usize, scale: u8) -> Self {
        debug_assert!(scale <= MAX_SCALE);
        Self {
            raw: vec![0; len],
            scale,
        }
    }

    /// Checked encode from plaintext values.
    pub fn from_f32_slice(values: &[f32], scale: u8) -> Result<Self, FixedPointError> {
        if scale > MAX_SCALE {
            return Err(FixedPointError::InvalidScale(scale));
        }
        let raw = values
            .iter()
            .map(|&v| encode_checked(v, scale))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { raw, scale })
    }

    /// Decode every element back to plaintext.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.raw.iter().map(|&r| decode(r, self.scale)).collect()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True when the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Scale exponent shared by all elements.
    pub fn scale(&self) -> u8 {
        self.scale
    }
}

/// Two-dimensional fixed-point tensor, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedMatrix {
    raw: Vec<i64>,
    rows: usize,
    cols: usize,
    scale: u8,
}

impl FixedMatrix {
    /// Checked encode from row-major plaintext values.
    pub fn from_f32_slice(
        values: &[f32],
        rows: usize,
        cols: usize,
        scale: u8,
    ) -> Result<Self, FixedPointError> {
        assert_eq!(values.len(), rows * cols, "row-major length mismatch");
        if scale > MAX_SCALE {
            return Err(FixedPointError::InvalidScale(scale));
        }
        let raw = values
            .iter()
            .map(|&v| encode_checked(v, scale))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw,
            rows,
            cols,
            scale,
        })
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Scale exponent shared by all elements.
    pub fn scale(&self) -> u8 {
        self.scale
    }

    #[inline]
    fn row(&self, r: usize) -> &[i64] {
        &self.raw[r * self.cols..(r + 1) * self.cols]
    }
}

// =============================================================================
// Backend implementation
// =============================================================================

/// Fixed-point realization of [`TensorBackend`] at [`DEFAULT_SCALE`].
///
/// The trait's encode functions saturate out-of-range inputs so that every
/// operation stays total; use [`FixedVector::from_f32_slice`] /
/// [`FixedMatrix::from_f32_slice`] when overflow must surface as an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPointBackend;

impl TensorBackend for FixedPointBackend {
    type Matrix = FixedMatrix;
    type Vector = FixedVector;
    type Mask = Vec<bool>;

    fn matrix_from_array(data: ArrayView2<'_, f32>) -> Self::Matrix {
        let (rows, cols) = data.dim();
        let mut raw = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                raw.push(encode_saturating(data[[r, c]], DEFAULT_SCALE));
            }
        }
        FixedMatrix {
            raw,
            rows,
            cols,
            scale: DEFAULT_SCALE,
        }
    }

    fn vector_from_array(data: ArrayView1<'_, f32>) -> Self::Vector {
        FixedVector {
            raw: data
                .iter()
                .map(|&v| encode_saturating(v, DEFAULT_SCALE))
                .collect(),
            scale: DEFAULT_SCALE,
        }
    }

    fn reveal_matrix(m: &Self::Matrix) -> Array2<f32> {
        Array2::from_shape_fn((m.rows, m.cols), |(r, c)| {
            decode(m.raw[r * m.cols + c], m.scale)
        })
    }

    fn reveal_vector(v: &Self::Vector) -> Array1<f32> {
        Array1::from_vec(v.to_f32_vec())
    }

    fn matrix_shape(m: &Self::Matrix) -> (usize, usize) {
        m.shape()
    }

    fn vector_len(v: &Self::Vector) -> usize {
        v.len()
    }

    fn zeros(len: usize) -> Self::Vector {
        FixedVector::zeros(len, DEFAULT_SCALE)
    }

    fn constant(value: f32, len: usize) -> Self::Vector {
        FixedVector {
            raw: vec![encode_saturating(value, DEFAULT_SCALE); len],
            scale: DEFAULT_SCALE,
        }
    }

    fn matvec(m: &Self::Matrix, v: &Self::Vector) -> Self::Vector {
        debug_assert_eq!(m.cols, v.len());
        debug_assert_eq!(m.scale, v.scale);
        let raw = (0..m.rows)
            .map(|r| {
                // Accumulate the double-width products, rescale once.
                let acc: i128 = m
                    .row(r)
                    .iter()
                    .zip(&v.raw)
                    .map(|(&a, &b)| a as i128 * b as i128)
                    .sum();
                (acc >> m.scale) as i64
            })
            .collect();
        FixedVector {
            raw,
            scale: m.scale,
        }
    }

    fn matvec_t(m: &Self::Matrix, v: &Self::Vector) -> Self::Vector {
        debug_assert_eq!(m.rows, v.len());
        debug_assert_eq!(m.scale, v.scale);
        let mut acc = vec![0i128; m.cols];
        for r in 0..m.rows {
            let y = v.raw[r] as i128;
            for (c, &a) in m.row(r).iter().enumerate() {
                acc[c] += a as i128 * y;
            }
        }
        FixedVector {
            raw: acc.into_iter().map(|a| (a >> m.scale) as i64).collect(),
            scale: m.scale,
        }
    }

    fn add(a: &Self::Vector, b: &Self::Vector) -> Self::Vector {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.scale, b.scale);
        FixedVector {
            raw: a
                .raw
                .iter()
                .zip(&b.raw)
                .map(|(&x, &y)| x.wrapping_add(y))
                .collect(),
            scale: a.scale,
        }
    }

    fn sub(a: &Self::Vector, b: &Self::Vector) -> Self::Vector {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.scale, b.scale);
        FixedVector {
            raw: a
                .raw
                .iter()
                .zip(&b.raw)
                .map(|(&x, &y)| x.wrapping_sub(y))
                .collect(),
            scale: a.scale,
        }
    }

    fn scale(v: &Self::Vector, factor: f32) -> Self::Vector {
        let f = encode_saturating(factor, v.scale);
        FixedVector {
            raw: v
                .raw
                .iter()
                .map(|&x| mul_rescale(x, f, v.scale))
                .collect(),
            scale: v.scale,
        }
    }

    fn gt(a: &Self::Vector, b: &Self::Vector) -> Self::Mask {
        debug_assert_eq!(a.len(), b.len());
        debug_assert_eq!(a.scale, b.scale);
        // Same scale, so raw order is value order.
        a.raw.iter().zip(&b.raw).map(|(&x, &y)| x > y).collect()
    }

    fn select(mask: &Self::Mask, on_true: &Self::Vector, on_false: &Self::Vector) -> Self::Vector {
        debug_assert_eq!(mask.len(), on_true.len());
        debug_assert_eq!(mask.len(), on_false.len());
        debug_assert_eq!(on_true.scale, on_false.scale);
        FixedVector {
            raw: mask
                .iter()
                .zip(on_true.raw.iter().zip(&on_false.raw))
                .map(|(&m, (&t, &f))| if m { t } else { f })
                .collect(),
            scale: on_true.scale,
        }
    }

    fn append_ones_column(m: &Self::Matrix) -> Self::Matrix {
        let one = 1i64 << m.scale;
        let mut raw = Vec::with_capacity(m.rows * (m.cols + 1));
        for r in 0..m.rows {
            raw.extend_from_slice(m.row(r));
            raw.push(one);
        }
        FixedMatrix {
            raw,
            rows: m.rows,
            cols: m.cols + 1,
            scale: m.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    type B = FixedPointBackend;

    /// One least-significant fraction bit at the default scale.
    const ULP: f32 = 1.0 / (1u64 << DEFAULT_SCALE) as f32;

    #[test]
    fn encode_decode_roundtrip() {
        let values = [0.0f32, 1.0, -1.0, 0.5, -0.5, 3.14159, -100.25];
        let v = FixedVector::from_f32_slice(&values, DEFAULT_SCALE).unwrap();
        for (&original, decoded) in values.iter().zip(v.to_f32_vec()) {
            assert!((original - decoded).abs() <= ULP);
        }
    }

    #[test]
    fn checked_encode_overflow() {
        let result = FixedVector::from_f32_slice(&[1e16], MAX_SCALE);
        assert!(matches!(result, Err(FixedPointError::Overflow { .. })));
    }

    #[test]
    fn invalid_scale_rejected() {
        let result = FixedVector::from_f32_slice(&[1.0], MAX_SCALE + 1);
        assert_eq!(result, Err(FixedPointError::InvalidScale(MAX_SCALE + 1)));
    }

    #[test]
    fn checked_matrix_encode() {
        let m = FixedMatrix::from_f32_slice(&[1.0, -2.0, 0.5, 4.0], 2, 2, DEFAULT_SCALE).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.scale(), DEFAULT_SCALE);

        let result = FixedMatrix::from_f32_slice(&[1e16, 0.0], 1, 2, MAX_SCALE);
        assert!(matches!(result, Err(FixedPointError::Overflow { .. })));
    }

    #[test]
    fn add_sub_scale() {
        let a = B::vector_from_array(array![1.5f32, -2.0].view());
        let b = B::vector_from_array(array![0.5f32, 1.0].view());

        let sum = B::reveal_vector(&B::add(&a, &b));
        assert!((sum[0] - 2.0).abs() <= ULP);
        assert!((sum[1] - -1.0).abs() <= ULP);

        let diff = B::reveal_vector(&B::sub(&a, &b));
        assert!((diff[0] - 1.0).abs() <= ULP);
        assert!((diff[1] - -3.0).abs() <= ULP);

        let scaled = B::reveal_vector(&B::scale(&a, 0.5));
        assert!((scaled[0] - 0.75).abs() <= 2.0 * ULP);
        assert!((scaled[1] - -1.0).abs() <= 2.0 * ULP);
    }

    #[test]
    fn matvec_matches_plaintext() {
        let m = B::matrix_from_array(array![[1.0f32, 2.0], [3.0, -4.0]].view());
        let v = B::vector_from_array(array![0.5f32, 1.5].view());

        let out = B::reveal_vector(&B::matvec(&m, &v));
        assert!((out[0] - 3.5).abs() < 1e-4);
        assert!((out[1] - -4.5).abs() < 1e-4);

        let w = B::vector_from_array(array![1.0f32, 1.0].view());
        let out_t = B::reveal_vector(&B::matvec_t(&m, &w));
        assert!((out_t[0] - 4.0).abs() < 1e-4);
        assert!((out_t[1] - -2.0).abs() < 1e-4);
    }

    #[test]
    fn gt_is_strict_and_select_blends() {
        let a = B::vector_from_array(array![1.0f32, -1.0, 0.0].view());
        let mask = B::gt(&a, &B::zeros(3));
        assert_eq!(mask, vec![true, false, false]);

        let blended = B::select(&mask, &B::constant(0.3, 3), &B::constant(-0.7, 3));
        let revealed = B::reveal_vector(&blended);
        assert!((revealed[0] - 0.3).abs() <= ULP);
        assert!((revealed[1] - -0.7).abs() <= ULP);
        assert!((revealed[2] - -0.7).abs() <= ULP);
    }

    #[test]
    fn append_ones_column_exact() {
        let m = B::matrix_from_array(array![[2.0f32], [4.0]].view());
        let augmented = B::append_ones_column(&m);

        assert_eq!(B::matrix_shape(&augmented), (2, 2));
        let revealed = B::reveal_matrix(&augmented);
        // The intercept column is exactly representable.
        assert_eq!(revealed[[0, 1]], 1.0);
        assert_eq!(revealed[[1, 1]], 1.0);
    }

    #[test]
    fn saturating_encode_is_total() {
        // The trait boundary clamps instead of failing.
        let v = B::vector_from_array(array![f32::MAX].view());
        assert_eq!(v.len(), 1);
        assert!(v.to_f32_vec()[0] > 0.0);
    }
}
