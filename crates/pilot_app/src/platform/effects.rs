use pilot_core::{Effect, Msg, RecordId};
use pilot_engine::{EngineEvent, EngineHandle};
use pilot_logging::{pilot_debug, pilot_info, pilot_warn};

/// Turns core effects into engine commands, and engine events back into
/// core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Starts the engine-bound effects. Returns the record to bring into view,
    /// if any; focusing is the caller's job since it depends on the rendered
    /// page.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Option<RecordId> {
        let mut focus = None;
        for effect in effects {
            match effect {
                Effect::LoadInterviews => {
                    pilot_debug!("LoadInterviews");
                    self.engine.load_interviews();
                }
                Effect::SubmitInterview { text } => {
                    pilot_info!("SubmitInterview text_len={}", text.len());
                    self.engine.submit_interview(text);
                }
                Effect::SubmitReview { record_id, review } => {
                    pilot_info!("SubmitReview record_id={record_id}");
                    self.engine.submit_review(record_id, review);
                }
                Effect::RunAgent {
                    ticket,
                    kind,
                    record_id,
                } => {
                    pilot_info!("RunAgent ticket={ticket} kind={kind} record_id={record_id}");
                    self.engine.run_agent(ticket, kind, record_id);
                }
                Effect::FocusRecord { record_id } => {
                    pilot_debug!("FocusRecord record_id={record_id}");
                    focus = Some(record_id);
                }
            }
        }
        focus
    }

    /// Engine completions received since the last call, as core messages.
    pub fn drain(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::InterviewsLoaded(result) => match result {
            Ok(records) => {
                pilot_debug!("Loaded {} interviews", records.len());
                Msg::RecordsLoaded(Ok(records))
            }
            Err(err) => Msg::RecordsLoaded(Err(err.to_string())),
        },
        EngineEvent::InterviewSubmitted(result) => {
            Msg::SubmitFinished(result.map_err(|err| err.to_string()))
        }
        EngineEvent::ReviewSubmitted(result) => {
            Msg::ReviewFinished(result.map_err(|err| err.to_string()))
        }
        EngineEvent::AgentCompleted {
            ticket,
            kind,
            result,
        } => {
            if let Err(err) = &result {
                pilot_warn!("{kind} agent ticket {ticket} failed: {err}");
            }
            Msg::AgentFinished {
                ticket,
                result: result.map_err(|err| err.to_string()),
            }
        }
    }
}
