/// The logic levels written to the motor's four output lines, packed into the
/// low nibble of a byte with line 1 as the most significant bit.
///
/// `Pattern::from_bits(0b1010)` means line 1 and line 3 are driven high while lines 2
/// and 4 are driven low.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(u8);

impl Pattern {
    /// Every line inactive, leaving the coils de-energised.
    pub const OFF: Pattern = Pattern(0b0000);

    pub const fn from_bits(bits: u8) -> Pattern { Pattern(bits & 0b1111) }

    pub const fn bits(self) -> u8 { self.0 }

    /// Is `line` (numbered `1..=4`, matching the motor wiring) high?
    ///
    /// # Panics
    ///
    /// The line number must be in the range `1..=4`.
    pub fn is_high(self, line: usize) -> bool {
        assert!((1..=4).contains(&line), "there are only 4 lines");

        self.0 & (0b1000 >> (line - 1)) != 0
    }

    /// The levels of lines 1 to 4, in that order.
    pub fn levels(self) -> [bool; 4] {
        [
            self.is_high(1),
            self.is_high(2),
            self.is_high(3),
            self.is_high(4),
        ]
    }
}

/// The direction to move in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The direction to travel for a signed step count, treating zero as
    /// forwards.
    pub fn of(steps: i32) -> Direction {
        if steps < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    pub fn reversed(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    fn offset(self) -> u8 {
        match self {
            Direction::Forward => 1,
            // -1 mod 4
            Direction::Backward => 3,
        }
    }
}

/// One of the four full-step commutation states.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    Zero,
    One,
    Two,
    Three,
}

/// Coil energisation for each [`Phase`], indexed by [`Phase::index()`].
const PATTERNS: [Pattern; 4] = [
    Pattern(0b1010),
    Pattern(0b0110),
    Pattern(0b0101),
    Pattern(0b1001),
];

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Zero, Phase::One, Phase::Two, Phase::Three];

    /// Look up a phase by index, wrapping anything outside `0..4`.
    pub fn from_index(index: u8) -> Phase { Phase::ALL[usize::from(index & 0b11)] }

    pub fn index(self) -> u8 {
        match self {
            Phase::Zero => 0,
            Phase::One => 1,
            Phase::Two => 2,
            Phase::Three => 3,
        }
    }

    /// The phase one step away in the given direction.
    pub fn next(self, direction: Direction) -> Phase {
        Phase::from_index((self.index() + direction.offset()) % 4)
    }

    pub fn pattern(self) -> Pattern { PATTERNS[usize::from(self.index())] }
}

impl Default for Phase {
    fn default() -> Phase { Phase::Zero }
}

/// Tracks the motor's commutation state.
///
/// Moving to the next phase is kept separate from writing it out, so a
/// caller can re-emit the current pattern at any time (writing the same
/// pattern twice is harmless).
///
/// # Note
///
/// Only full steps are supported. Half or micro-stepping would need more
/// than four states and a different table.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PhaseSequencer {
    phase: Phase,
}

impl PhaseSequencer {
    pub fn new() -> PhaseSequencer { PhaseSequencer::default() }

    #[inline]
    pub fn phase(&self) -> Phase { self.phase }

    /// Step the commutation state one place in `direction`, wrapping around
    /// at either end.
    #[inline]
    pub fn advance(&mut self, direction: Direction) -> Phase {
        self.phase = self.phase.next(direction);
        debug_assert!(self.phase.index() < 4);

        self.phase
    }

    /// The pattern the output lines should currently be showing.
    #[inline]
    pub fn pattern(&self) -> Pattern { self.phase.pattern() }

    /// Go back to the initial phase, returning the pattern which switches
    /// every coil off.
    #[inline]
    pub fn reset(&mut self) -> Pattern {
        self.phase = Phase::Zero;

        Pattern::OFF
    }
}
