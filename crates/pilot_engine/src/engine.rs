use std::sync::{mpsc, Arc};
use std::thread;

use pilot_core::{AgentKind, RecordId, ReviewInput, Ticket};
use pilot_logging::{pilot_debug, pilot_warn};

use crate::backend::{Backend, BackendSettings, ReqwestBackend};
use crate::{BackendError, EngineEvent, FailureKind};

enum EngineCommand {
    LoadInterviews,
    SubmitInterview {
        text: String,
    },
    SubmitReview {
        record_id: RecordId,
        review: ReviewInput,
    },
    RunAgent {
        ticket: Ticket,
        kind: AgentKind,
        record_id: RecordId,
    },
}

/// Runs backend calls on a worker thread and reports every completion as an
/// [`EngineEvent`].
///
/// Each command produces exactly one event, success or failure. Dropping the
/// handle stops the worker; requests still in flight then report `Cancelled`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let backend = ReqwestBackend::new(settings)?;
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Result<Self, BackendError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
            pilot_debug!("Engine command channel closed; shutting down");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_interviews(&self) {
        self.send(EngineCommand::LoadInterviews);
    }

    pub fn submit_interview(&self, text: impl Into<String>) {
        self.send(EngineCommand::SubmitInterview { text: text.into() });
    }

    pub fn submit_review(&self, record_id: RecordId, review: ReviewInput) {
        self.send(EngineCommand::SubmitReview { record_id, review });
    }

    pub fn run_agent(&self, ticket: Ticket, kind: AgentKind, record_id: RecordId) {
        self.send(EngineCommand::RunAgent {
            ticket,
            kind,
            record_id,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            pilot_warn!("Engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::LoadInterviews => {
            let guard = CompletionGuard::new(event_tx, EngineEvent::InterviewsLoaded);
            guard.complete(backend.list_interviews().await);
        }
        EngineCommand::SubmitInterview { text } => {
            let guard = CompletionGuard::new(event_tx, EngineEvent::InterviewSubmitted);
            guard.complete(backend.submit_interview(&text).await);
        }
        EngineCommand::SubmitReview { record_id, review } => {
            let guard = CompletionGuard::new(event_tx, EngineEvent::ReviewSubmitted);
            guard.complete(backend.submit_review(&record_id, &review).await);
        }
        EngineCommand::RunAgent {
            ticket,
            kind,
            record_id,
        } => {
            let guard = CompletionGuard::new(event_tx, move |result| EngineEvent::AgentCompleted {
                ticket,
                kind,
                result,
            });
            guard.complete(backend.run_agent(kind, &record_id).await);
        }
    }
}

type Wrap<T> = Box<dyn FnOnce(Result<T, BackendError>) -> EngineEvent + Send>;

/// Guarantees one completion event per request.
///
/// If the task is dropped before `complete` (runtime shutdown, panic in the
/// backend) the guard reports a `Cancelled` failure instead.
struct CompletionGuard<T> {
    tx: mpsc::Sender<EngineEvent>,
    wrap: Option<Wrap<T>>,
}

impl<T> CompletionGuard<T> {
    fn new(
        tx: mpsc::Sender<EngineEvent>,
        wrap: impl FnOnce(Result<T, BackendError>) -> EngineEvent + Send + 'static,
    ) -> Self {
        Self {
            tx,
            wrap: Some(Box::new(wrap)),
        }
    }

    fn complete(mut self, result: Result<T, BackendError>) {
        if let Err(err) = &result {
            pilot_warn!("Backend call failed: {err}");
        }
        self.emit(result);
    }

    fn emit(&mut self, result: Result<T, BackendError>) {
        if let Some(wrap) = self.wrap.take() {
            let _ = self.tx.send(wrap(result));
        }
    }
}

impl<T> Drop for CompletionGuard<T> {
    fn drop(&mut self) {
        if self.wrap.is_some() {
            pilot_warn!("Backend call ended without a result");
            self.emit(Err(BackendError::new(
                FailureKind::Cancelled,
                "request ended without a result",
            )));
        }
    }
}
