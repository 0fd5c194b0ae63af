mod recognition;
mod upload;

pub use recognition::*;
pub use upload::*;
