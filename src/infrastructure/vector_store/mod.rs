//! Vector store implementations

mod factory;
mod in_memory;
mod pinecone;

pub use factory::VectorStoreFactory;
pub use in_memory::{InMemoryVectorRegistry, InMemoryVectorStore};
pub use pinecone::{PineconeConfig, PineconeVectorStore, DEFAULT_API_VERSION, DEFAULT_CONTROL_PLANE_URL};
