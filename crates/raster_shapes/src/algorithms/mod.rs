pub mod growth;
pub mod assembly;
pub mod reduction;
pub mod sweep;

pub use growth::*;
pub use assembly::*;
pub use reduction::*;
pub use sweep::*;
