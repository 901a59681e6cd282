pub mod ops;
pub mod types;

pub use ops::*;
pub use types::*;
