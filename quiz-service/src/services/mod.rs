pub mod cleaner;
pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod quiz;

pub use quiz::QuizGenerator;
