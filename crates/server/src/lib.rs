pub mod routes;
pub mod snapshot;
pub mod startup;
pub mod utils;

pub use routes::*;
pub use snapshot::*;
pub use startup::*;
pub use utils::*;
