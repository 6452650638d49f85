pub mod builtin;
pub mod chain;

pub use builtin::*;
pub use chain::*;
