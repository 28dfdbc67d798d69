pub mod errors;
pub mod task;

pub use errors::*;
pub use task::*;
