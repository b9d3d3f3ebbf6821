use crate::{cost::Cost, rate::KilowattHourRate};

quantity!(
    /// Metered energy, as read from a utility register or an inverter monitor.
    KilowattHours, via: f64, suffix: "kWh", precision: 1
);

implement_mul!(KilowattHours, KilowattHourRate, Cost);

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_display_rounds_to_one_decimal() {
        assert_eq!(KilowattHours(65.04).to_string(), "65.0 kWh");
        assert_eq!(KilowattHours(104.96).to_string(), "105.0 kWh");
    }

    #[test]
    fn test_mul_rate() {
        assert_abs_diff_eq!((KilowattHours(155.0) * KilowattHourRate(0.75)).0, 116.25);
        assert_abs_diff_eq!((KilowattHourRate(1.1) * KilowattHours(65.0)).0, 71.5, epsilon = 1e-9);
    }
}
