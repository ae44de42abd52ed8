//! Scripted camera programs
//!
//! A program is a compact, six-field string such as
//! `"35.66,139.835,0.025,0.0025,2,20"`:
//!
//! | field | meaning                               |
//! |-------|---------------------------------------|
//! | 0     | latitude of the center, degrees       |
//! | 1     | longitude of the center, degrees      |
//! | 2     | zoomed-out camera height              |
//! | 3     | zoomed-in camera height               |
//! | 4     | seconds between keyframes             |
//! | 5     | number of in/out repeats              |
//!
//! Parsing is all-or-nothing. A parsed program expands into `2 * repeats + 1`
//! keyframes that start zoomed out and alternate in/out.

use crate::core::constants::PROGRAM_FIELD_COUNT;
use crate::core::geo::LatLng;
use crate::prelude::Duration;

/// Upper bound on repeats, keeps the schedule to a sane number of timers
pub const MAX_REPEAT_COUNT: u32 = 10_000;

/// Upper bound on the time from the first to the last keyframe (one year).
/// Keeps every delay representable as a `Duration` and far from `Instant` overflow.
pub const MAX_PROGRAM_SECONDS: f64 = 365.0 * 24.0 * 60.0 * 60.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("camera program needs {expected} comma separated fields, got {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("camera program field {index} is not a number: {field:?}")]
    NotNumeric { index: usize, field: String },

    #[error("camera program {field} {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraProgram {
    pub center: LatLng,
    pub out_height: f64,
    pub in_height: f64,
    pub interval_seconds: f64,
    pub repeat_count: u32,
}

impl CameraProgram {
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval_seconds)
    }

    /// Number of keyframes [`build_schedule`] produces
    pub fn keyframe_count(&self) -> usize {
        2 * self.repeat_count as usize + 1
    }
}

/// Camera height target fired at `fire_time` seconds after the program starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraKeyframe {
    pub index: usize,
    pub target_height: f64,
    pub fire_time: f64,
}

impl CameraKeyframe {
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.fire_time)
    }
}

pub fn parse_program(raw: &str) -> Result<CameraProgram, ParseError> {
    let fields: Vec<&str> = raw.split(',').collect();
    if fields.len() != PROGRAM_FIELD_COUNT {
        return Err(ParseError::FieldCount {
            expected: PROGRAM_FIELD_COUNT,
            found: fields.len(),
        });
    }

    let mut values = [0.0f64; PROGRAM_FIELD_COUNT];
    for (index, field) in fields.iter().enumerate() {
        values[index] = field
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::NotNumeric {
                index,
                field: field.to_string(),
            })?;
    }

    if values.iter().any(|v| !v.is_finite()) {
        return Err(invalid("fields", "must be finite"));
    }

    let [lat, lng, out_height, in_height, interval_seconds, repeats] = values;

    let center = LatLng::new(lat, lng);
    if !center.is_valid() {
        return Err(invalid("center", "is outside valid latitude/longitude ranges"));
    }
    if out_height <= 0.0 {
        return Err(invalid("outHeight", "must be positive"));
    }
    if in_height <= 0.0 {
        return Err(invalid("inHeight", "must be positive"));
    }
    if interval_seconds <= 0.0 {
        return Err(invalid("intervalSeconds", "must be positive"));
    }
    if repeats < 0.0 {
        return Err(invalid("repeatCount", "must not be negative"));
    }
    let repeat_count = repeats.trunc();
    if repeat_count > MAX_REPEAT_COUNT as f64 {
        return Err(invalid("repeatCount", "is too large"));
    }

    let span = interval_seconds * 2.0 * repeat_count;
    if interval_seconds > MAX_PROGRAM_SECONDS || span > MAX_PROGRAM_SECONDS {
        return Err(invalid("intervalSeconds", "makes the program run too long"));
    }

    Ok(CameraProgram {
        center,
        out_height,
        in_height,
        interval_seconds,
        repeat_count: repeat_count as u32,
    })
}

fn invalid(field: &'static str, reason: &'static str) -> ParseError {
    ParseError::InvalidValue { field, reason }
}

/// Expand a program into its keyframes, ordered by fire time.
///
/// Even indices (including the first) target `out_height`, odd ones `in_height`.
pub fn build_schedule(program: &CameraProgram) -> Vec<CameraKeyframe> {
    (0..program.keyframe_count())
        .map(|index| CameraKeyframe {
            index,
            target_height: if index % 2 == 1 {
                program.in_height
            } else {
                program.out_height
            },
            fire_time: index as f64 * program.interval_seconds,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_program() {
        let program = parse_program("35.66,139.835,0.025,0.0025,2,20").unwrap();
        assert_eq!(program.center, LatLng::new(35.66, 139.835));
        assert_eq!(program.out_height, 0.025);
        assert_eq!(program.in_height, 0.0025);
        assert_eq!(program.interval_seconds, 2.0);
        assert_eq!(program.repeat_count, 20);
        assert_eq!(program.interval(), Duration::from_secs(2));
    }

    #[test]
    fn test_schedule_alternates_starting_zoomed_out() {
        let program = parse_program("35.66,139.835,0.025,0.0025,2,20").unwrap();
        let schedule = build_schedule(&program);

        assert_eq!(schedule.len(), 41);
        assert_eq!(schedule[0].target_height, 0.025);
        assert_eq!(schedule[0].fire_time, 0.0);
        assert_eq!(schedule[1].target_height, 0.0025);
        assert_eq!(schedule[1].fire_time, 2.0);
        assert_eq!(schedule[40].target_height, 0.0025);
        assert_eq!(schedule[40].fire_time, 80.0);
        assert_eq!(schedule[40].delay(), Duration::from_secs(80));

        assert!(schedule.windows(2).all(|w| w[0].fire_time < w[1].fire_time));
    }

    #[test]
    fn test_zero_repeats_is_a_single_keyframe() {
        let program = parse_program("0,0,1,0.5,1,0").unwrap();
        let schedule = build_schedule(&program);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].target_height, 1.0);
    }

    #[test]
    fn test_field_count() {
        assert_eq!(
            parse_program("1,2,3"),
            Err(ParseError::FieldCount { expected: 6, found: 3 })
        );
        assert!(matches!(
            parse_program("1,2,3,4,5,6,7"),
            Err(ParseError::FieldCount { found: 7, .. })
        ));
        assert!(matches!(
            parse_program(""),
            Err(ParseError::FieldCount { found: 1, .. })
        ));
    }

    #[test]
    fn test_not_numeric() {
        assert_eq!(
            parse_program("a,2,3,4,5,6"),
            Err(ParseError::NotNumeric {
                index: 0,
                field: "a".to_string()
            })
        );
        assert!(matches!(
            parse_program("1,2,3,4,5,"),
            Err(ParseError::NotNumeric { index: 5, .. })
        ));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let program = parse_program(" 35.66, 139.835 ,0.025,0.0025, 2 ,20\n").unwrap();
        assert_eq!(program.repeat_count, 20);
    }

    #[test]
    fn test_repeat_count_truncates() {
        assert_eq!(parse_program("0,0,1,0.5,1,2.9").unwrap().repeat_count, 2);
    }

    #[test]
    fn test_overlong_programs_are_rejected() {
        for raw in ["0,0,1,0.5,1e20,1", "0,0,1,0.5,1e20,0", "0,0,1,0.5,1e7,10"] {
            assert_eq!(
                parse_program(raw),
                Err(ParseError::InvalidValue {
                    field: "intervalSeconds",
                    reason: "makes the program run too long"
                }),
                "{} should be rejected",
                raw
            );
        }

        // A day-long program is fine and every delay converts
        let program = parse_program("0,0,1,0.5,3600,12").unwrap();
        let last = build_schedule(&program).last().copied().unwrap();
        assert_eq!(last.delay(), Duration::from_secs(24 * 3600));
    }

    #[test]
    fn test_invalid_values() {
        for raw in [
            "0,0,1,0.5,0,3",
            "0,0,1,0.5,-1,3",
            "0,0,1,0.5,1,-1",
            "0,0,0,0.5,1,1",
            "0,0,1,-0.5,1,1",
            "95,0,1,0.5,1,1",
            "0,0,inf,0.5,1,1",
            "0,0,1,0.5,1,NaN",
            "0,0,1,0.5,1,1e9",
        ] {
            assert!(
                matches!(parse_program(raw), Err(ParseError::InvalidValue { .. })),
                "{} should be rejected",
                raw
            );
        }
    }
}
