pub mod course;
pub mod errors;
pub mod round;
pub mod statistics;

// Re-export all types
pub use course::*;
pub use errors::*;
pub use round::*;
pub use statistics::*;
