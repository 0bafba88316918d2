//! Feature preprocessing.

use crate::backend::TensorBackend;

/// Augment a feature matrix with an intercept column.
///
/// With `fit_intercept` the backend appends a ones column (the intercept
/// slot is the *last* coefficient); otherwise the matrix is returned
/// unchanged. Pure and deterministic. `fit_intercept` is public
/// configuration, so ordinary control flow may depend on it.
pub fn prepare<B: TensorBackend>(features: &B::Matrix, fit_intercept: bool) -> B::Matrix {
    if fit_intercept {
        B::append_ones_column(features)
    } else {
        features.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PlaintextBackend;
    use ndarray::array;

    #[test]
    fn intercept_column_appended() {
        let x = PlaintextBackend::matrix_from_array(array![[1.0f32, 2.0], [3.0, 4.0]].view());
        let augmented = prepare::<PlaintextBackend>(&x, true);

        assert_eq!(PlaintextBackend::matrix_shape(&augmented), (2, 3));
        let revealed = PlaintextBackend::reveal_matrix(&augmented);
        assert_eq!(revealed, array![[1.0, 2.0, 1.0], [3.0, 4.0, 1.0]]);
    }

    #[test]
    fn without_intercept_unchanged() {
        let x = PlaintextBackend::matrix_from_array(array![[1.0f32, 2.0]].view());
        let unchanged = prepare::<PlaintextBackend>(&x, false);
        assert_eq!(PlaintextBackend::matrix_shape(&unchanged), (1, 2));
        assert_eq!(
            PlaintextBackend::reveal_matrix(&unchanged),
            array![[1.0, 2.0]]
        );
    }
}
