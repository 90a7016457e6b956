mod harness;
pub use harness::*;
mod settings;
pub use settings::*;
