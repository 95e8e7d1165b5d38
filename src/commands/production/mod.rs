pub mod crop;
pub mod harvest;
pub mod silo;

pub use crop::*;
pub use harvest::*;
pub use silo::*;
