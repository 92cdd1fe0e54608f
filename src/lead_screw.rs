use crate::{
    clock::elapsed_since, Device, Direction, DistancePerStep, Error, Phase,
    PhaseSequencer, SystemClock,
};
use core::time::Duration;
use log::{debug, trace};

/// A stepper motor turning a lead screw, moved by distance rather than by
/// steps.
///
/// All moves are *blocking*. [`LeadScrew::move_steps()`] and
/// [`LeadScrew::move_distance()`] busy-poll the clock and only return once
/// every step has been issued, so the call takes at least `steps *
/// step_delay` to complete. Use [`LeadScrew::poll()`] from your main loop if
/// you need to do other work while the motor is moving.
///
/// # Note
///
/// Stepper motors are an open-loop system, so there's no guarantee the
/// carriage will *actually* be where the step count says it is.
#[derive(Debug, PartialEq)]
pub struct LeadScrew<D> {
    device: D,
    distance_per_step: DistancePerStep,
    /// The most recently requested rate, in `distance/minute`.
    speed: Option<f32>,
    /// Microseconds between consecutive steps.
    step_delay: u32,
    last_step_time: u32,
    sequencer: PhaseSequencer,
    current_position: i64,
}

impl<D> LeadScrew<D> {
    /// Create a new [`LeadScrew`] which travels one unit of distance per step.
    ///
    /// Until [`LeadScrew::set_speed()`] is called there is no delay between
    /// steps, so the motor is stepped as fast as the clock is polled.
    pub fn new(device: D) -> LeadScrew<D> {
        LeadScrew {
            device,
            distance_per_step: DistancePerStep::DEFAULT,
            speed: None,
            step_delay: 0,
            last_step_time: 0,
            sequencer: PhaseSequencer::new(),
            current_position: 0,
        }
    }

    /// Create a new [`LeadScrew`] with a particular calibration.
    pub fn with_distance_per_step(
        device: D,
        distance_per_step: f32,
    ) -> Result<LeadScrew<D>, Error> {
        let distance_per_step = DistancePerStep::new(distance_per_step)?;

        Ok(LeadScrew {
            distance_per_step,
            ..LeadScrew::new(device)
        })
    }

    pub fn inner(&mut self) -> &mut D { &mut self.device }

    pub fn into_inner(self) -> D { self.device }

    /// Set the travel rate in `distance/minute`, using the same length unit
    /// as the distance per step.
    ///
    /// The rate must be finite and positive. On error the previous speed is
    /// kept.
    pub fn set_speed(&mut self, distance_per_minute: f32) -> Result<(), Error> {
        let step_delay =
            self.distance_per_step.delay_for_rate(distance_per_minute)?;

        debug!(
            "Travelling at {} per minute ({}us per step)",
            distance_per_minute, step_delay
        );
        self.speed = Some(distance_per_minute);
        self.step_delay = step_delay;

        Ok(())
    }

    /// Get the most recently set speed, in `distance/minute`.
    #[inline]
    pub fn speed(&self) -> Option<f32> { self.speed }

    /// The minimum time between two consecutive steps.
    #[inline]
    pub fn step_delay(&self) -> Duration {
        Duration::from_micros(u64::from(self.step_delay))
    }

    /// Change the calibration (e.g. after swapping lead screws).
    ///
    /// If a speed was already set, the step delay is recalculated so the
    /// carriage keeps travelling at the same rate. On error nothing is
    /// changed.
    pub fn set_distance_per_step(
        &mut self,
        distance_per_step: f32,
    ) -> Result<(), Error> {
        let distance_per_step = DistancePerStep::new(distance_per_step)?;

        let step_delay = match self.speed {
            Some(speed) => distance_per_step.delay_for_rate(speed)?,
            None => self.step_delay,
        };

        debug!("Distance per step set to {}", distance_per_step.get());
        self.distance_per_step = distance_per_step;
        self.step_delay = step_delay;

        Ok(())
    }

    #[inline]
    pub fn distance_per_step(&self) -> f32 { self.distance_per_step.get() }

    /// How many steps it would take to travel `distance`, rounded to the
    /// nearest step.
    ///
    /// A negative distance gives a negative number of steps.
    #[inline]
    pub fn compute_step_count(&self, distance: f32) -> i32 {
        self.distance_per_step.steps_for_distance(distance)
    }

    /// The motor's current commutation state.
    #[inline]
    pub fn phase(&self) -> Phase { self.sequencer.phase() }

    /// The clock reading (in microseconds) when the last step was issued.
    #[inline]
    pub fn last_step_time(&self) -> u32 { self.last_step_time }

    /// Get the current position, as measured by counting the number of steps
    /// issued.
    #[inline]
    pub fn current_position(&self) -> i64 { self.current_position }

    /// Reset the current position so the carriage's current location is
    /// considered to be `position`.
    ///
    /// Useful for setting a zero position after homing against an end stop.
    #[inline]
    pub fn set_current_position(&mut self, position: i64) {
        self.current_position = position;
    }
}

impl<D: Device> LeadScrew<D> {
    /// Write the current phase's pattern to the motor again.
    ///
    /// Nothing is written to the lines at construction, so this can be used
    /// to energise the coils and hold the motor in place before moving.
    pub fn emit(&mut self) -> Result<(), D::Error> {
        self.device.write(self.sequencer.pattern())
    }

    /// De-energise every coil and go back to the initial phase.
    ///
    /// The speed and position are left untouched.
    pub fn disable(&mut self) -> Result<(), D::Error> {
        debug!("Disabling the motor");
        let pattern = self.sequencer.reset();

        self.device.write(pattern)
    }

    /// Check the clock and take a single step in `direction` if the step
    /// delay has passed since the previous one, returning whether a step was
    /// taken.
    ///
    /// This never blocks.
    ///
    /// # Warning
    ///
    /// For correctness, the same [`SystemClock`] should be used every time
    /// the [`LeadScrew`] is polled. Failing to do so may mess up internal
    /// timing calculations.
    pub fn poll<C>(
        &mut self,
        direction: Direction,
        clock: C,
    ) -> Result<bool, D::Error>
    where
        C: SystemClock,
    {
        let now = clock.micros();

        if elapsed_since(now, self.last_step_time) < self.step_delay {
            return Ok(false);
        }

        // a failed write shouldn't update any internal state
        let phase = self.sequencer.phase().next(direction);
        self.device.write(phase.pattern())?;

        self.last_step_time = now;
        self.sequencer.advance(direction);
        self.current_position += match direction {
            Direction::Forward => 1,
            Direction::Backward => -1,
        };
        trace!("Stepped to {:?} at {}us", phase, now);

        Ok(true)
    }

    /// Move by the specified number of steps, blocking until the last one
    /// has been issued.
    ///
    /// Positive counts move forwards and negative counts move backwards.
    /// Consecutive steps are at least [`LeadScrew::step_delay()`] apart.
    pub fn move_steps<C>(
        &mut self,
        steps: i32,
        clock: C,
    ) -> Result<(), D::Error>
    where
        C: SystemClock,
    {
        let direction = Direction::of(steps);
        let mut remaining = steps.unsigned_abs();

        if remaining > 0 {
            debug!("Moving {} steps {:?}", remaining, direction);
        }

        while remaining > 0 {
            if self.poll(direction, &clock)? {
                remaining -= 1;
            }
        }

        Ok(())
    }

    /// Move by a (signed) distance, blocking until the move is complete.
    ///
    /// The distance is rounded to the nearest whole step (see
    /// [`LeadScrew::compute_step_count()`]).
    pub fn move_distance<C>(
        &mut self,
        distance: f32,
        clock: C,
    ) -> Result<(), D::Error>
    where
        C: SystemClock,
    {
        let steps = self.compute_step_count(distance);
        debug!("Moving {} ({} steps)", distance, steps);

        self.move_steps(steps, clock)
    }
}
