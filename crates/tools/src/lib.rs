pub mod output;
pub mod replay;
pub mod settings;

pub use output::*;
pub use replay::*;
pub use settings::*;
