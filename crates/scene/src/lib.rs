pub mod feature;
pub mod render_set;
pub mod selection;
pub mod style;

pub use feature::*;
pub use render_set::*;
pub use selection::*;
pub use style::*;
