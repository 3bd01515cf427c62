use derive_more::Display;

use crate::utils::time::TimeOfDay;

/// Validation failures on engine inputs.
///
/// Only malformed configuration is an error. "No schedule for the date",
/// "day not worked" and "no override" are valid states represented in the
/// results, never raised here.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum EngineError {
    #[display(fmt = "unparseable time of day: {:?}", _0)]
    BadTimeOfDay(String),

    #[display(fmt = "schedule end {} is not after start {}", end, start)]
    EndNotAfterStart { start: TimeOfDay, end: TimeOfDay },

    #[display(
        fmt = "break of {} min does not fit the {} min shift",
        break_minutes,
        shift_minutes
    )]
    BreakTooLong {
        break_minutes: i32,
        shift_minutes: i32,
    },

    #[display(
        fmt = "break starting at {} runs past the shift window {}..{}",
        break_start,
        start,
        end
    )]
    BreakOutsideShift {
        break_start: TimeOfDay,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    #[display(fmt = "negative break duration: {} min", _0)]
    NegativeBreak(i32),
}

impl std::error::Error for EngineError {}
