/// Combine contributor values so each additional contributor adds less.
///
/// Values are ranked strongest first and the i-th is weighted by `factor^i`.
/// The result never exceeds the plain sum and is non-decreasing in every input.
pub fn diminishing_sum(values: &[f64], factor: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().map(|v| v.max(0.0)).collect();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut weight = 1.0;
    let mut total = 0.0;
    for v in sorted {
        total += v * weight;
        weight *= factor;
    }
    total
}

/// Move `current` toward `cap`, closing `ability / (ability + half_saturation)`
/// of the remaining gap. Never overshoots the cap.
pub fn diminishing_growth(current: f64, cap: f64, ability: f64, half_saturation: f64) -> f64 {
    if ability <= 0.0 || current >= cap {
        return current.clamp(0.0, cap.max(0.0));
    }
    let fraction = ability / (ability + half_saturation.max(f64::EPSILON));
    (current + (cap - current) * fraction).clamp(0.0, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!(diminishing_sum(&[], 0.8), 0.0);
    }

    #[test]
    fn single_value_is_unchanged() {
        assert_eq!(diminishing_sum(&[42.0], 0.8), 42.0);
    }

    #[test]
    fn never_exceeds_plain_sum() {
        let values = [80.0, 60.0, 75.0, 90.0];
        let plain: f64 = values.iter().sum();
        assert!(diminishing_sum(&values, 0.8) < plain);
    }

    #[test]
    fn order_of_inputs_does_not_matter() {
        let a = diminishing_sum(&[10.0, 50.0, 30.0], 0.7);
        let b = diminishing_sum(&[50.0, 30.0, 10.0], 0.7);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn each_equal_contributor_adds_less() {
        let mut previous_total = 0.0;
        let mut previous_gain = f64::INFINITY;
        for n in 1..=6 {
            let total = diminishing_sum(&vec![50.0; n], 0.8);
            let gain = total - previous_total;
            assert!(gain > 0.0);
            assert!(gain < previous_gain);
            previous_total = total;
            previous_gain = gain;
        }
    }

    #[test]
    fn raising_any_input_never_lowers_the_sum() {
        let base = [40.0, 70.0, 55.0];
        let before = diminishing_sum(&base, 0.8);
        for i in 0..base.len() {
            let mut raised = base;
            raised[i] += 20.0;
            assert!(diminishing_sum(&raised, 0.8) >= before);
        }
    }

    #[test]
    fn growth_is_bounded_by_cap() {
        let mut value = 0.0;
        for _ in 0..10_000 {
            value = diminishing_growth(value, 1000.0, 500.0, 100.0);
            assert!(value <= 1000.0);
        }
        assert!(value > 999.0);
    }

    #[test]
    fn growth_is_monotone_in_ability() {
        let mut previous = 0.0;
        for ability in [0.0, 1.0, 10.0, 100.0, 1000.0, 1e6] {
            let next = diminishing_growth(200.0, 1000.0, ability, 5000.0);
            assert!(next >= previous);
            assert!(next <= 1000.0);
            previous = next;
        }
    }

    #[test]
    fn zero_ability_leaves_value_unchanged() {
        assert_eq!(diminishing_growth(300.0, 1000.0, 0.0, 5000.0), 300.0);
    }

    #[test]
    fn value_at_cap_stays_at_cap() {
        assert_eq!(diminishing_growth(1000.0, 1000.0, 900.0, 5000.0), 1000.0);
    }
}
