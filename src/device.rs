use crate::Pattern;
use void::Void;

/// The four output lines wired to the motor's coils.
///
/// A [`Device`] is owned by exactly one [`crate::LeadScrew`], which is the
/// only thing allowed to write to its lines.
pub trait Device {
    /// The type of error that may be encountered when writing to the lines.
    ///
    /// Use `!` (or `void::Void` on stable) if writing can never fail.
    type Error;

    /// Drive all four lines to the levels in `pattern`.
    ///
    /// Writing the same pattern twice in a row must be harmless.
    fn write(&mut self, pattern: Pattern) -> Result<(), Self::Error>;
}

impl<'a, D: Device> Device for &'a mut D {
    type Error = D::Error;

    #[inline]
    fn write(&mut self, pattern: Pattern) -> Result<(), Self::Error> {
        (*self).write(pattern)
    }
}

/// A [`Device`] which hands every [`Pattern`] to a callback.
///
/// See [`fallible_func_device()`] for a version which accepts a fallible
/// callback.
pub fn func_device<F, T>(write: F) -> impl Device<Error = Void>
where
    F: FnMut(Pattern) -> T,
{
    Infallible { write }
}

struct Infallible<F> {
    write: F,
}

impl<F, T> Device for Infallible<F>
where
    F: FnMut(Pattern) -> T,
{
    type Error = Void;

    #[inline]
    fn write(&mut self, pattern: Pattern) -> Result<(), Self::Error> {
        (self.write)(pattern);
        Ok(())
    }
}

/// A device which uses a callback which may fail.
///
/// See [`func_device()`] for a version which uses an infallible callback.
pub fn fallible_func_device<F, T, E>(write: F) -> impl Device<Error = E>
where
    F: FnMut(Pattern) -> Result<T, E>,
{
    Fallible { write }
}

struct Fallible<F> {
    write: F,
}

impl<F, T, E> Device for Fallible<F>
where
    F: FnMut(Pattern) -> Result<T, E>,
{
    type Error = E;

    #[inline]
    fn write(&mut self, pattern: Pattern) -> Result<(), Self::Error> {
        (self.write)(pattern)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn callbacks_see_every_pattern() {
        let mut seen = Vec::new();

        {
            let mut dev = func_device(|p| seen.push(p));
            dev.write(Pattern::from_bits(0b1010)).unwrap();
            dev.write(Pattern::OFF).unwrap();
        }

        assert_eq!(seen, vec![Pattern::from_bits(0b1010), Pattern::OFF]);
    }

    #[test]
    fn errors_are_propagated() {
        let mut dev = fallible_func_device(|p: Pattern| {
            if p == Pattern::OFF {
                Err("unplugged")
            } else {
                Ok(())
            }
        });

        assert_eq!(dev.write(Pattern::from_bits(0b0110)), Ok(()));
        assert_eq!(dev.write(Pattern::OFF), Err("unplugged"));
    }

    #[test]
    fn borrowed_devices_write_through() {
        fn turn_off<D: Device>(mut dev: D) -> Result<(), D::Error> {
            dev.write(Pattern::OFF)
        }

        let mut count = 0;

        {
            let mut dev = func_device(|_| count += 1);
            turn_off(&mut dev).unwrap();
            turn_off(&mut dev).unwrap();
        }

        assert_eq!(count, 2);
    }
}
