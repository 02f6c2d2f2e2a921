//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use clock::{Clock, ManualClock, SystemClock};
pub use session::{SessionRecorder, SessionRecorderConfig};
pub use token::{TokenMinter, TokenServiceConfig};
