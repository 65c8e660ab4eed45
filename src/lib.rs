pub mod letter_pipeline;
pub mod logger;
