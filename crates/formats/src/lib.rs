pub mod boundaries;
pub mod geojson;

pub use boundaries::*;
pub use geojson::*;
