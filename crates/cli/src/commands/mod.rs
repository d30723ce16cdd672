pub mod purge;
pub mod scan;

pub use purge::*;
pub use scan::*;
