/// A free-running microsecond counter.
///
/// The counter is 32 bits wide and wraps back to zero roughly every 71
/// minutes, just like the `micros()` timer on most microcontrollers. Elapsed
/// times should always be computed with [`elapsed_since()`] so they stay
/// correct across a wrap.
///
/// This uses shared references because it may be shared between multiple
/// components at any one time.
pub trait SystemClock {
    /// Microseconds since a clock-specific reference point (e.g. device
    /// startup), modulo `2^32`.
    fn micros(&self) -> u32;
}

impl<'a, C: SystemClock> SystemClock for &'a C {
    fn micros(&self) -> u32 { (*self).micros() }
}

/// The number of microseconds from `earlier` to `now` on a wrapping clock.
///
/// Unsigned wrapping subtraction gives the right answer as long as less than
/// one full wrap period separates the two readings.
#[inline]
pub fn elapsed_since(now: u32, earlier: u32) -> u32 { now.wrapping_sub(earlier) }

/// A monotonically non-decreasing clock backed by the operating system.
///
/// Requires the `std` feature.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingSystemClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl OperatingSystemClock {
    pub fn new() -> OperatingSystemClock { OperatingSystemClock::default() }
}

#[cfg(feature = "std")]
impl SystemClock for OperatingSystemClock {
    fn micros(&self) -> u32 {
        // truncating is the same as letting a 32-bit counter wrap
        self.created_at.elapsed().as_micros() as u32
    }
}

#[cfg(feature = "std")]
impl Default for OperatingSystemClock {
    fn default() -> OperatingSystemClock {
        OperatingSystemClock {
            created_at: std::time::Instant::now(),
        }
    }
}
