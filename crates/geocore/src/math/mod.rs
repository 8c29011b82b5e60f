pub mod ecef;
pub mod ellipsoid;
pub mod helmert;
pub mod tmerc;

pub use ecef::*;
pub use ellipsoid::*;
pub use helmert::*;
pub use tmerc::*;
