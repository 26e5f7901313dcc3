pub mod cache;
pub mod country_codes;
pub mod loader;
pub mod source;

pub use cache::*;
pub use country_codes::*;
pub use loader::*;
pub use source::*;
