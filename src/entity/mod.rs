pub mod project;
pub mod task;
pub mod user;

pub mod prelude;

pub use prelude::*;
