use async_trait::async_trait;
use std::fmt::Debug;
use crate::runtime::node::Node;

pub mod http;

/// Source of graph nodes: resolves a path identifier to its decoded [`Node`].
///
/// `None` covers every way a resource can be unavailable. Callers treat it
/// exactly like a node with no message and no successors.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    async fn fetch(&self, path: &str) -> Option<Node>;
}
