pub mod config;
pub mod idea;
pub mod preference;

pub use config::*;
pub use idea::*;
pub use preference::*;
