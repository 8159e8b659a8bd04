pub mod bars;
pub mod chain;
pub mod contracts;
