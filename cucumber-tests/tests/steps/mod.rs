// Steps live in the test target so every step is linked into the runner.
pub mod collection_steps;
pub mod model_steps;
