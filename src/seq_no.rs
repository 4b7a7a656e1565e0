use std::fmt::{Display, Formatter};

/// A 32-bit wrapping sequence counter: 0 follows after FFFFFFFF. All arithmetic is modulo
///  2^32, emulating the counters of the wire protocol rather than relying on the platform's
///  integer promotion.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SeqNo(u32);

impl Display for SeqNo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SeqNo {
    pub const ZERO: SeqNo = SeqNo(0);

    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    pub fn to_raw(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> SeqNo {
        SeqNo(self.0.wrapping_add(1))
    }

    /// The number of increments that lead from `earlier` to `self`, modulo 2^32.
    ///
    /// NB: This is the "add 2^32 until no longer smaller" comparison: a count that is
    ///      numerically below `earlier` is treated as having wrapped, never as a regression.
    pub fn delta_since(&self, earlier: SeqNo) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// True iff advancing from `earlier` to `self` crosses the 2^32 boundary, i.e. `self`
    ///  is numerically smaller although it is logically ahead.
    pub fn wrapped_from(&self, earlier: SeqNo) -> bool {
        self.0 < earlier.0
    }
}
