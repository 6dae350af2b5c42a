pub mod config;
pub mod course_validation;
pub mod events;
pub mod practice;
pub mod round_tracker;
pub mod score_keeper;
pub mod scoring;
pub mod share;
pub mod statistics;
pub mod store;

// Re-export main components
pub use config::*;
pub use course_validation::*;
pub use events::*;
pub use practice::*;
pub use round_tracker::*;
pub use score_keeper::*;
pub use scoring::*;
pub use share::*;
pub use statistics::*;
pub use store::*;
