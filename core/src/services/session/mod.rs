//! Session recording for issued token pairs.

mod recorder;


pub use recorder::{SessionRecorder, SessionRecorderConfig};
