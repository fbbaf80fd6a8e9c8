mod patcher;
mod report;
mod term;

pub use patcher::*;
pub use report::*;
pub use term::*;
