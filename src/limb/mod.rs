pub mod chain;
pub mod segment;

pub use chain::*;
pub use segment::*;
