pub mod datetime;
pub mod math;
pub mod stats;
pub mod text;
