//! Type definitions

pub mod driver;
pub mod params;

pub use driver::*;
pub use params::*;
