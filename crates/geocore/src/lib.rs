pub mod cone;
pub mod datum;
pub mod error;
pub mod math;
pub mod point;
pub mod utm;

// Geocore crate: stateless geodesy only, no I/O.
pub use cone::*;
pub use datum::*;
pub use error::*;
pub use point::*;
pub use utm::*;
