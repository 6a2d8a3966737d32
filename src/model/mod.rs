mod report;
mod roster;

pub use report::*;
pub use roster::*;
