pub mod error;
pub mod network;
pub mod node;
pub mod quantity;

pub use error::ModelError;
pub use network::NetworkDescriptor;
pub use node::{NodeDescriptor, NodeType, Tier};
pub use quantity::{CpuQuantity, MemoryQuantity, QuantityError};
