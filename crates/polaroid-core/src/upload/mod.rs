//! Upload sessions: stage a batch of files, validate them, transfer them
//! concurrently and hand the successful ones back as photo records.

mod error;
mod file;
mod preview;
mod session;
mod transfer;

pub use error::{describe_types, UploadError};
pub use file::{FileCandidate, UploadFile, UploadStatus};
pub use preview::{PreviewHandle, PreviewRegistry};
pub use session::{NoOpObserver, UploadObserver, UploadSession, UploadSummary};
pub use transfer::{ProgressSink, SimulatedTransfer, Transfer, TransferRequest};
