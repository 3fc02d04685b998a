mod arc_retriever;
mod wedges_builder;

pub use arc_retriever::{ArcRetriever, RetrievalSummary};
pub use wedges_builder::WedgesBuilder;
