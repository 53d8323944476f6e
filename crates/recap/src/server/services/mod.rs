pub mod embeddings;
pub mod generator;
pub mod summary_store;
pub mod vector_index;

#[cfg(feature = "ml-features")]
pub mod lancedb;
#[cfg(feature = "ml-features")]
pub mod onnx_embedder;
