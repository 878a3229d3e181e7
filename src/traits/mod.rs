pub mod step;

pub use step::StepOutcome;
