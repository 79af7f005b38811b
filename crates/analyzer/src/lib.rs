mod classify;
mod convert;
mod forecast;
mod reader;
mod report;
mod stats;
mod utils;
mod variables;

pub use classify::*;
pub use convert::*;
pub use forecast::*;
pub use reader::*;
pub use report::*;
pub use stats::*;
pub use utils::*;
pub use variables::*;
