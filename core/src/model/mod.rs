mod asset;
mod category;
mod id_types;

pub use asset::*;
pub use category::*;
pub use id_types::*;
