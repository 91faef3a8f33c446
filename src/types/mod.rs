pub mod payload;
pub mod price;
pub mod sentiment;
pub mod signals;

pub use payload::*;
pub use price::*;
pub use sentiment::*;
pub use signals::*;
