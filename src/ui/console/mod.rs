pub mod prompt;
pub mod wizard;
