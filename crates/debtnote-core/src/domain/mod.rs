pub mod anchors;
pub mod collections;
pub mod entities;
pub mod errors;
pub mod identity;
pub mod payloads;
pub mod write_set;

pub use anchors::*;
pub use collections::*;
pub use entities::*;
pub use errors::*;
pub use identity::*;
pub use payloads::*;
pub use write_set::*;
