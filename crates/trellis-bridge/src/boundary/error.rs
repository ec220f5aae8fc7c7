use thiserror::Error;

/// Recoverable failures reported by the bridge.
///
/// Failures of the engine entry functions themselves are not represented
/// here; they are fatal (see [`super::EntryRole`]).
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The UI loop that owned the queue has shut down; the task was dropped
    /// without running.
    #[error("UI loop is closed; task was dropped without running")]
    UiLoopClosed,

    #[error("failed to spawn worker thread `{name}`")]
    WorkerSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A host creates its root container once, even after it was destroyed.
    #[error("root container was already created on this host")]
    RootAlreadyCreated,

    #[error("display density must be finite and positive, got {0}")]
    InvalidDensity(f32),

    #[error("failed to decode bitmap")]
    ImageDecode(#[from] image::ImageError),
}
