pub mod annotation;
pub mod event;
pub mod interval;
pub mod token;

pub use annotation::*;
pub use event::*;
pub use interval::*;
pub use token::*;
