use logline_graph::NodeIndex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("commit graph contains a cycle through nodes {nodes:?}")]
    Cycle { nodes: Vec<NodeIndex> },

    #[error("edge {from} -> {to} does not point forward in the layout order")]
    BackwardEdge { from: NodeIndex, to: NodeIndex },

    #[error("layout covers {layout} nodes but the graph has {graph}")]
    LayoutSize { layout: usize, graph: usize },

    #[error("invalid layout: {message}")]
    InvalidLayout { message: String },

    #[error("node {node} is not part of the graph")]
    UnknownNode { node: NodeIndex },
}

pub type Result<T> = std::result::Result<T, Error>;
