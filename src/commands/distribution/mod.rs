pub mod assignment;
pub mod pos;
pub mod vehicle;

pub use assignment::*;
pub use pos::*;
pub use vehicle::*;
