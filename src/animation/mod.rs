pub mod program;
pub mod runner;

// Re-export commonly used types and functions for convenience
pub use program::{build_schedule, parse_program, CameraKeyframe, CameraProgram, ParseError};
pub use runner::{CameraDriver, CameraProgramRunner, RunnerState};
