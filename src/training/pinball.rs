//! Branch-free pinball (quantile) subgradient.

use crate::backend::TensorBackend;

/// Pinball subgradient unit for quantile level τ.
///
/// For residuals `r = y - ŷ` the pinball loss
/// `L_τ(r) = τ·max(r, 0) + (1 - τ)·max(-r, 0)` has the residual-space
/// subgradient
///
/// - `τ` where `r > 0`
/// - `τ - 1` where `r ≤ 0`
///
/// The natural per-sample `if` cannot be taken over secret residuals, so the
/// branch is replaced by one oblivious comparison and an arithmetic blend:
/// `b = (r > 0)` then `g = select(b, τ, τ - 1)`. Exactly one comparison is
/// issued per sample per call; the mask is consumed by the blend and never
/// observed. Ties at `r = 0` take the `τ - 1` side, which keeps the strict
/// `gt` the only comparison needed.
#[derive(Debug, Clone, Copy)]
pub struct PinballGradient {
    quantile: f32,
}

impl PinballGradient {
    /// Create a gradient unit for the given quantile level.
    ///
    /// # Arguments
    ///
    /// * `quantile` - Quantile level in (0, 1). E.g., 0.5 for median.
    pub fn new(quantile: f32) -> Self {
        debug_assert!(
            quantile > 0.0 && quantile < 1.0,
            "quantile must be in (0, 1), got {}",
            quantile
        );
        Self { quantile }
    }

    /// Quantile level this unit targets.
    #[inline]
    pub fn quantile(&self) -> f32 {
        self.quantile
    }

    /// Per-sample subgradient of the pinball loss at the given residuals.
    pub fn gradient<B: TensorBackend>(&self, residuals: &B::Vector) -> B::Vector {
        let n = B::vector_len(residuals);
        let above = B::gt(residuals, &B::zeros(n));
        B::select(
            &above,
            &B::constant(self.quantile, n),
            &B::constant(self.quantile - 1.0, n),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PlaintextBackend;
    use ndarray::array;

    #[test]
    fn subgradient_values_at_quantile_03() {
        let residuals =
            PlaintextBackend::vector_from_array(array![-2.0f32, -0.001, 0.0, 0.001, 3.0].view());
        let g = PinballGradient::new(0.3).gradient::<PlaintextBackend>(&residuals);

        let expected = [-0.7f32, -0.7, -0.7, 0.3, 0.3];
        let revealed = PlaintextBackend::reveal_vector(&g);
        for (got, want) in revealed.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
        }
    }

    #[test]
    fn zero_residual_takes_lower_branch() {
        let residuals = PlaintextBackend::vector_from_array(array![0.0f32].view());
        let g = PinballGradient::new(0.5).gradient::<PlaintextBackend>(&residuals);
        assert!((PlaintextBackend::reveal_vector(&g)[0] - -0.5).abs() < 1e-6);
    }

    #[test]
    fn median_subgradient_is_symmetric() {
        let residuals = PlaintextBackend::vector_from_array(array![1.0f32, -1.0].view());
        let g = PinballGradient::new(0.5).gradient::<PlaintextBackend>(&residuals);
        let revealed = PlaintextBackend::reveal_vector(&g);
        assert!((revealed[0] - 0.5).abs() < 1e-6);
        assert!((revealed[1] - -0.5).abs() < 1e-6);
    }
}
