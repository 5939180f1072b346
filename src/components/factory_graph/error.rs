use thiserror::Error;

/// Every way an editing action can be refused. None of these are fatal;
/// the editor reports them as notices and keeps the previous state.
#[derive(Debug, Error)]
pub enum GraphError {
	#[error("asset \"{0}\" is already placed on the canvas")]
	AssetAlreadyUsed(String),
	#[error("connection {0} no longer exists")]
	EdgeNotFound(String),
	#[error("an endpoint of connection {0} no longer exists")]
	EndpointMissing(String),
	#[error("node {0} no longer exists")]
	NodeNotFound(String),
	#[error("nothing to undo")]
	NothingToUndo,
	#[error("nothing to redo")]
	NothingToRedo,
	#[error("invalid file format: {0}")]
	InvalidFormat(String),
	#[error("file is not valid JSON: {0}")]
	ParseFailure(#[source] serde_json::Error),
	#[error("failed to serialize graph: {0}")]
	Serialize(#[source] serde_json::Error),
}

impl GraphError {
	/// Boundary conditions that are worth a notice but are not failures.
	pub fn is_boundary(&self) -> bool {
		matches!(self, GraphError::NothingToUndo | GraphError::NothingToRedo)
	}
}
