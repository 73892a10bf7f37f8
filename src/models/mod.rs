pub mod faculty;
pub mod publication;

pub use faculty::*;
pub use publication::*;
