mod generate;

pub use generate::{GenerateInput, GenerateOperation, GenerateOutcome};
