pub mod error;

pub use error::{DjError, Result};
