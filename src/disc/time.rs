use crate::error::{CuetocError, CuetocResult};
use std::fmt;

/// Audio frames per second on a CD.
const FPS: u32 = 75;
/// Seconds per minute.
const SPM: u32 = 60;
/// Audio frames per minute.
const FPM: u32 = FPS * SPM;

/// A position or duration in CD audio data, addressed as
/// minutes:seconds:frames (75 frames per second).
///
/// Fields parsed from text are kept verbatim, even when a field exceeds its
/// modulus, so already-validated CUE values round-trip exactly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrackTime {
    minutes: u32,
    seconds: u32,
    frames: u32,
}

impl TrackTime {
    pub fn new(minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            minutes,
            seconds,
            frames,
        }
    }

    /// Parses a 'MM:SS:FF' value.
    pub fn parse(text: &str) -> CuetocResult<Self> {
        let fields = text
            .split(':')
            .map(|f| f.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| CuetocError::BadTimeValue(text.to_string()))?;
        match fields[..] {
            [minutes, seconds, frames] => Ok(Self::new(minutes, seconds, frames)),
            _ => Err(CuetocError::BadTimeValue(text.to_string())),
        }
    }

    /// Converts a total frame count to minutes, seconds and frames.
    pub fn from_frames(frames: u32) -> Self {
        let minutes = frames / FPM;
        let frames = frames % FPM;
        Self::new(minutes, frames / FPS, frames % FPS)
    }

    pub fn total_frames(&self) -> u32 {
        self.minutes * FPM + self.seconds * FPS + self.frames
    }

    /// Component-wise subtraction, borrowing from the seconds and minutes
    /// fields. A negative minute result means the input times contradict
    /// each other.
    pub fn try_sub(&self, other: &TrackTime) -> CuetocResult<TrackTime> {
        let mut minutes = self.minutes as i64 - other.minutes as i64;
        let mut seconds = self.seconds as i64 - other.seconds as i64;
        let mut frames = self.frames as i64 - other.frames as i64;
        if frames < 0 {
            seconds -= 1;
            frames += FPS as i64;
        }
        if seconds < 0 {
            minutes -= 1;
            seconds += SPM as i64;
        }
        if minutes < 0 {
            return Err(CuetocError::Underflow);
        }
        Ok(TrackTime::new(minutes as u32, seconds as u32, frames as u32))
    }
}

impl fmt::Display for TrackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.minutes, self.seconds, self.frames
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CuetocError;

    fn time_sub(minuend: &str, subtrahend: &str, expected: &str) {
        let result = TrackTime::parse(minuend)
            .unwrap()
            .try_sub(&TrackTime::parse(subtrahend).unwrap())
            .unwrap();
        assert_eq!(result.to_string(), expected);
    }

    #[test]
    fn string_output_equals_input() {
        // un-normalized fields must round-trip verbatim
        for text in ["00:01:02", "99:98:97"] {
            assert_eq!(TrackTime::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn frame_count_round_trips() {
        for frames in [0, 1, 74, 75, 4499, 4500, 123_456] {
            assert_eq!(TrackTime::from_frames(frames).total_frames(), frames);
        }
    }

    #[test]
    fn from_frames_normalizes() {
        assert_eq!(TrackTime::from_frames(4500 + 150 + 3), TrackTime::new(1, 2, 3));
    }

    #[test]
    fn equal_components_are_equal() {
        assert_eq!(
            TrackTime::parse("01:02:03").unwrap(),
            TrackTime::parse("01:02:03").unwrap()
        );
        assert_ne!(
            TrackTime::parse("01:20:03").unwrap(),
            TrackTime::parse("01:02:03").unwrap()
        );
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(TrackTime::default().to_string(), "00:00:00");
        assert_eq!(TrackTime::default().total_frames(), 0);
    }

    #[test]
    fn subtraction_of_self_is_zero() {
        time_sub("10:10:10", "10:10:10", "00:00:00");
    }

    #[test]
    fn subtraction_by_component() {
        time_sub("10:10:10", "01:00:00", "09:10:10");
        time_sub("10:10:10", "00:01:00", "10:09:10");
        time_sub("10:10:10", "00:00:01", "10:10:09");
    }

    #[test]
    fn subtraction_borrows_seconds() {
        time_sub("10:10:10", "00:11:00", "09:59:10");
    }

    #[test]
    fn subtraction_borrows_frames() {
        time_sub("10:10:10", "00:00:11", "10:09:74");
    }

    #[test]
    fn subtraction_underflow_is_an_error() {
        let a = TrackTime::parse("00:00:00").unwrap();
        let b = TrackTime::parse("00:00:01").unwrap();
        assert!(matches!(a.try_sub(&b), Err(CuetocError::Underflow)));
    }

    #[test]
    fn rejects_malformed_values() {
        for text in ["00:00", "1:2:3:4", "aa:bb:cc", ""] {
            assert!(matches!(
                TrackTime::parse(text),
                Err(CuetocError::BadTimeValue(_))
            ));
        }
    }
}
