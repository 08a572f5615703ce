//! Interview pilot engine: backend client and effect execution.
mod backend;
mod engine;
mod types;

pub use backend::{Backend, BackendSettings, ReqwestBackend};
pub use engine::EngineHandle;
pub use types::{BackendError, EngineEvent, FailureKind};
