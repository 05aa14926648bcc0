//! Safe SQL builder: identifiers from code and validated settings only, values as parameters.

mod builder;
pub use builder::*;
