//! Environment settings and their validation.

pub mod settings;
pub mod validator;

pub use self::settings::*;
pub use self::validator::*;
