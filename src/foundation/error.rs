/// Convenience result type used across the pipeline.
pub type GossipResult<T> = Result<T, GossipError>;

/// Top-level error taxonomy. Every variant is fatal for a run.
#[derive(thiserror::Error, Debug)]
pub enum GossipError {
    /// The input is not valid node-link JSON, or references are structurally invalid.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The input graph has no nodes.
    #[error("empty graph: the input contains no nodes")]
    EmptyGraph,

    /// Layout or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Assembling the final animation failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Creating, writing or deleting an intermediate file failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GossipError {
    /// Build a [`GossipError::MalformedInput`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Build a [`GossipError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GossipError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`GossipError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Name of the pipeline stage the error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) | Self::EmptyGraph => "load",
            Self::Render(_) => "render",
            Self::Encoding(_) => "encode",
            Self::Storage(_) => "storage",
            Self::Other(_) => "unknown",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
