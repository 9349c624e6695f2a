use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HealError {
    // Upstream data contract violation: parity outside [1, 8] or surplus above parity.
    #[error("invalid parity shard count/surplus shard count given (surplus: {surplus}, parity: {parity})")]
    InvalidParity { surplus: i64, parity: i64 },

    // The built-in tie-break table has no threshold for a valid input.
    #[error("cannot get a heal color code (surplus: {surplus}, parity: {parity})")]
    Classification { surplus: i64, parity: i64 },

    #[error("heal status call failed: {0}")]
    RemoteCall(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("unable to marshal heal record to JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unable to write heal status: {0}")]
    Output(#[from] std::io::Error),
}

impl HealError {
    pub fn remote(err: anyhow::Error) -> HealError {
        HealError::RemoteCall(err.into())
    }

    /// Whether the error was raised by classifying a heal result, as opposed
    /// to talking to the cluster or writing output.
    pub fn is_classification(&self) -> bool {
        matches!(
            self,
            HealError::InvalidParity { .. } | HealError::Classification { .. }
        )
    }
}
