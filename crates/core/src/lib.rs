#![forbid(unsafe_code)]

pub mod answers;
pub mod assessment;
pub mod model;
pub mod time;

pub use time::Clock;
