use crate::{Device, Pattern};
use embedded_hal::digital::v2::OutputPin;

/// A [`Device`] which drives the motor's four coil lines directly from
/// GPIO pins (e.g. through a ULN2003 or L298N).
///
/// The pins are expected to already be configured as push-pull outputs,
/// which most HALs enforce through the pin's type.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FourWire<P1, P2, P3, P4> {
    line_1: P1,
    line_2: P2,
    line_3: P3,
    line_4: P4,
}

impl<P1, P2, P3, P4> FourWire<P1, P2, P3, P4> {
    pub fn new(line_1: P1, line_2: P2, line_3: P3, line_4: P4) -> Self {
        FourWire {
            line_1,
            line_2,
            line_3,
            line_4,
        }
    }

    pub fn into_inner(self) -> (P1, P2, P3, P4) {
        (self.line_1, self.line_2, self.line_3, self.line_4)
    }
}

fn set_output<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), P::Error> {
    if high {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

impl<P1, P2, P3, P4, E> Device for FourWire<P1, P2, P3, P4>
where
    P1: OutputPin<Error = E>,
    P2: OutputPin<Error = E>,
    P3: OutputPin<Error = E>,
    P4: OutputPin<Error = E>,
{
    type Error = E;

    #[inline]
    fn write(&mut self, pattern: Pattern) -> Result<(), Self::Error> {
        let [one, two, three, four] = pattern.levels();

        set_output(&mut self.line_1, one)?;
        set_output(&mut self.line_2, two)?;
        set_output(&mut self.line_3, three)?;
        set_output(&mut self.line_4, four)?;

        Ok(())
    }
}
