/// Share of a grade coming from the inter itself, the rest being left to
/// contextual support.
pub const INTRINSIC_RATIO: f64 = 0.8;

/// Named, weighted sub-scores behind the grade of an interpretation.
///
/// Every value is clamped to `[0, 1]`. The grade is the weighted geometric
/// mean of the values, scaled by the intrinsic ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeImpacts {
    names: &'static [&'static str],
    weights: &'static [f64],
    values: Vec<f64>,
    intrinsic_ratio: f64,
}

impl GradeImpacts {
    /// Creates impacts from parallel slices of names, weights and values.
    #[must_use]
    pub fn new(names: &'static [&'static str], weights: &'static [f64], values: &[f64]) -> Self {
        debug_assert_eq!(names.len(), weights.len());
        debug_assert_eq!(names.len(), values.len());
        Self {
            names,
            weights,
            values: values.iter().map(|v| v.clamp(0.0, 1.0)).collect(),
            intrinsic_ratio: INTRINSIC_RATIO,
        }
    }

    #[must_use]
    pub fn intrinsic_ratio(&self) -> f64 {
        self.intrinsic_ratio
    }

    #[must_use]
    pub fn grade(&self) -> f64 {
        let total: f64 = self.weights.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }

        let product: f64 = self
            .values
            .iter()
            .zip(self.weights)
            .map(|(v, w)| v.powf(*w))
            .product();

        self.intrinsic_ratio * product.powf(1.0 / total)
    }

    /// Value of the impact called `name`.
    #[must_use]
    pub fn impact(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    #[must_use]
    pub fn names(&self) -> &[&'static str] {
        self.names
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NAMES: &[&str] = &["a", "b"];
    const EVEN: &[f64] = &[1.0, 1.0];
    const SKEWED: &[f64] = &[3.0, 1.0];

    #[test]
    fn perfect_impacts_give_intrinsic_ratio() {
        let imp = GradeImpacts::new(NAMES, EVEN, &[1.0, 1.0]);
        assert_relative_eq!(imp.grade(), INTRINSIC_RATIO, epsilon = 1e-12);
    }

    #[test]
    fn geometric_mean_is_weighted() {
        let even = GradeImpacts::new(NAMES, EVEN, &[0.25, 1.0]);
        assert_relative_eq!(even.grade(), 0.8 * 0.5, epsilon = 1e-12);

        let skewed = GradeImpacts::new(NAMES, SKEWED, &[0.25, 1.0]);
        assert_relative_eq!(skewed.grade(), 0.8 * 0.25_f64.powf(0.75), epsilon = 1e-12);
    }

    #[test]
    fn values_are_clamped() {
        let imp = GradeImpacts::new(NAMES, EVEN, &[1.7, -0.2]);
        assert_eq!(imp.values(), &[1.0, 0.0]);
        assert_relative_eq!(imp.grade(), 0.0);
    }

    #[test]
    fn lookup_by_name() {
        let imp = GradeImpacts::new(NAMES, EVEN, &[0.3, 0.6]);
        assert_eq!(imp.impact("b"), Some(0.6));
        assert_eq!(imp.impact("c"), None);
        assert_eq!(imp.len(), 2);
    }
}
