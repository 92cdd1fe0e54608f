use crate::Error;

const MICROS_PER_MINUTE: f32 = 60_000_000.0;

/// `u32::MAX` rounds up to `2^32` as a `f32`, so any delay which compares
/// less than this fits in the clock.
const DELAY_LIMIT: f32 = u32::MAX as f32;

/// How far the carriage travels for a single step of the motor.
///
/// This is the lead screw's calibration constant (thread pitch divided by
/// steps per revolution) expressed in whatever length unit the caller
/// prefers. It is always finite and strictly positive.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct DistancePerStep(f32);

impl DistancePerStep {
    /// The calibration used when none is given: one unit per step.
    pub const DEFAULT: DistancePerStep = DistancePerStep(1.0);

    pub fn new(distance: f32) -> Result<DistancePerStep, Error> {
        if distance.is_finite() && distance > 0.0 {
            Ok(DistancePerStep(distance))
        } else {
            Err(Error::InvalidDistancePerStep(distance))
        }
    }

    #[inline]
    pub fn get(self) -> f32 { self.0 }

    /// The (signed) number of whole steps needed to travel `distance`,
    /// rounding half-way values away from zero.
    ///
    /// A negative distance gives a negative step count, i.e. travel in
    /// reverse. Distances too large for an `i32` saturate and `NaN` maps to
    /// zero steps.
    #[inline]
    pub fn steps_for_distance(self, distance: f32) -> i32 {
        libm::roundf(distance / self.0) as i32
    }

    /// The number of microseconds to wait between consecutive steps to
    /// travel at `distance_per_minute`.
    pub fn delay_for_rate(self, distance_per_minute: f32) -> Result<u32, Error> {
        if !distance_per_minute.is_finite() || distance_per_minute <= 0.0 {
            return Err(Error::InvalidRate(distance_per_minute));
        }

        // (us/step) = (distance/step) * (us/min) / (distance/min)
        let delay = self.0 * MICROS_PER_MINUTE / distance_per_minute;

        if delay < DELAY_LIMIT {
            Ok(delay as u32)
        } else {
            Err(Error::DelayOutOfRange)
        }
    }
}

impl Default for DistancePerStep {
    fn default() -> DistancePerStep { DistancePerStep::DEFAULT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_non_positive_distances() {
        for &bad in &[0.0, -0.0, -1.5, core::f32::NAN, core::f32::INFINITY] {
            let got = DistancePerStep::new(bad);

            assert!(got.is_err(), "{} should have been rejected", bad);
        }

        assert_eq!(DistancePerStep::new(0.25).unwrap().get(), 0.25);
    }

    #[test]
    fn half_millimetre_steps() {
        let dps = DistancePerStep::new(0.5).unwrap();

        assert_eq!(dps.steps_for_distance(10.0), 20);
        assert_eq!(dps.steps_for_distance(-10.0), -20);
        assert_eq!(dps.steps_for_distance(0.0), 0);
    }

    #[test]
    fn round_to_the_nearest_step() {
        let dps = DistancePerStep::DEFAULT;

        assert_eq!(dps.steps_for_distance(2.4), 2);
        assert_eq!(dps.steps_for_distance(2.6), 3);
        assert_eq!(dps.steps_for_distance(-2.4), -2);
        assert_eq!(dps.steps_for_distance(-2.6), -3);
    }

    #[test]
    fn half_way_rounds_away_from_zero() {
        let dps = DistancePerStep::DEFAULT;

        assert_eq!(dps.steps_for_distance(2.5), 3);
        assert_eq!(dps.steps_for_distance(-2.5), -3);
        assert_eq!(dps.steps_for_distance(0.5), 1);
        assert_eq!(dps.steps_for_distance(-0.5), -1);
    }

    #[test]
    fn huge_distances_saturate() {
        let dps = DistancePerStep::DEFAULT;

        assert_eq!(dps.steps_for_distance(1e20), core::i32::MAX);
        assert_eq!(dps.steps_for_distance(-1e20), core::i32::MIN);
        assert_eq!(dps.steps_for_distance(core::f32::NAN), 0);
    }

    #[test]
    fn one_step_per_second() {
        let dps = DistancePerStep::DEFAULT;

        assert_eq!(dps.delay_for_rate(60.0), Ok(1_000_000));
    }

    #[test]
    fn delay_scales_with_distance_per_step() {
        let dps = DistancePerStep::new(0.5).unwrap();

        assert_eq!(dps.delay_for_rate(60.0), Ok(500_000));
        assert_eq!(dps.delay_for_rate(120.0), Ok(250_000));
    }

    #[test]
    fn reject_bad_rates() {
        let dps = DistancePerStep::DEFAULT;

        assert_eq!(dps.delay_for_rate(0.0), Err(Error::InvalidRate(0.0)));
        assert_eq!(dps.delay_for_rate(-60.0), Err(Error::InvalidRate(-60.0)));
        assert!(dps.delay_for_rate(core::f32::NAN).is_err());
        assert!(dps.delay_for_rate(core::f32::INFINITY).is_err());
    }

    #[test]
    fn absurdly_slow_rates_dont_fit_in_the_clock() {
        let dps = DistancePerStep::DEFAULT;

        // one step every ~69 minutes still fits, one every ~83 doesn't
        assert!(dps.delay_for_rate(0.0145).is_ok());
        assert_eq!(dps.delay_for_rate(0.012), Err(Error::DelayOutOfRange));
    }
}
