use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use pilot_core::{
    events_on, record_anchor, update, AppState, AppViewModel, Msg, RecordId, SelectSource, View,
};
use pilot_engine::EngineHandle;
use pilot_logging::{pilot_debug, pilot_info, pilot_warn};

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui::calendar::{self, MonthCursor};
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render;
use super::viewport::{FocusSchedule, Page, Viewport};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Input-side events of the main loop. Engine completions are polled
/// separately.
enum LoopEvent {
    Line(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load()?;
    logging::initialize(config.log_destination, config.log_level.into());
    pilot_info!("Interview pilot starting; backend at {}", config.base_url);

    let engine = EngineHandle::new(config.backend_settings())
        .with_context(|| format!("connecting to backend {}", config.base_url))?;
    let (loop_tx, loop_rx) = mpsc::channel();
    spawn_input_reader(loop_tx);

    let mut shell = Shell::new(
        EffectRunner::new(engine),
        config.viewport_height,
        config.settle_delay(),
    );
    shell.dispatch(Msg::Startup);
    shell.render()?;

    loop {
        match loop_rx.recv_timeout(shell.wait_budget(Instant::now())) {
            Ok(LoopEvent::Line(line)) => {
                if shell.handle_line(&line) == Flow::Quit {
                    break;
                }
                shell.render()?;
            }
            Ok(LoopEvent::InputClosed) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        let mut dirty = false;
        for msg in shell.effects.drain() {
            dirty |= shell.dispatch(msg);
        }
        if shell.focus_due(Instant::now()) {
            dirty = true;
        }
        if dirty {
            shell.render()?;
        }
    }

    pilot_info!("Interview pilot shutting down");
    Ok(())
}

fn spawn_input_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if loop_tx.send(LoopEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    pilot_warn!("Reading input failed: {err}");
                    break;
                }
            }
        }
        let _ = loop_tx.send(LoopEvent::InputClosed);
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Shell {
    state: AppState,
    effects: EffectRunner,
    month: MonthCursor,
    viewport: Viewport,
    focus_schedule: FocusSchedule,
    notice: Vec<String>,
}

impl Shell {
    fn new(effects: EffectRunner, viewport_height: usize, settle_delay: Duration) -> Self {
        Self {
            state: AppState::new(),
            effects,
            month: MonthCursor::current(),
            viewport: Viewport::new(viewport_height),
            focus_schedule: FocusSchedule::new(settle_delay),
            notice: Vec::new(),
        }
    }

    fn wait_budget(&self, now: Instant) -> Duration {
        self.focus_schedule.wait_budget(now, POLL_INTERVAL)
    }

    /// Applies a pending focus once its settle delay has passed. Returns
    /// whether the viewport moved.
    fn focus_due(&mut self, now: Instant) -> bool {
        match self.focus_schedule.take_due(now) {
            Some(record_id) => self.focus(&record_id),
            None => false,
        }
    }

    /// Runs one message through `update`, starts its effects, and reports
    /// whether the screen needs redrawing.
    fn dispatch(&mut self, msg: Msg) -> bool {
        pilot_debug!("dispatch {msg:?}");
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if let Some(record_id) = self.effects.enqueue(effects) {
            self.focus_schedule.schedule(record_id, Instant::now());
        }
        was_dirty
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(err) => {
                self.notify(err.to_string());
                return Flow::Continue;
            }
        };

        if self.state.alert().is_some() && !matches!(command, Command::Dismiss | Command::Quit) {
            self.notify("Dismiss the alert with `ok` first.");
            return Flow::Continue;
        }

        match command {
            Command::Show(view) => {
                self.dispatch(Msg::ViewSelected(view));
            }
            Command::Day(day) => self.select_day(day),
            Command::Event { day, index } => self.select_event(day, index),
            Command::Open(record_id) => {
                if self.known(&record_id) {
                    self.dispatch(Msg::TimelineCardClicked { record_id });
                }
            }
            Command::Agents(record_id) => {
                if self.known(&record_id) {
                    self.dispatch(Msg::AgentsRequested { record_id });
                }
            }
            Command::Run(kind) => {
                if self.state.current_record().is_none() {
                    self.notify("Select an interview first (`open <id>` or `agents <id>`).");
                } else {
                    self.dispatch(Msg::AgentKindSelected(kind));
                }
            }
            Command::Review(record_id) => {
                if self.known(&record_id) {
                    self.dispatch(Msg::ReviewRequested { record_id });
                }
            }
            Command::Save(review) => {
                if self.state.view().review_drawer.is_none() {
                    self.notify("Open a review first with `review <id>`.");
                } else {
                    self.dispatch(Msg::ReviewSubmitted(review));
                }
            }
            Command::CloseReview => {
                self.dispatch(Msg::ReviewDrawerClosed);
            }
            Command::Add(text) => {
                self.dispatch(Msg::InputChanged(text));
                self.dispatch(Msg::SubmitClicked);
            }
            Command::MonthShift(months) => {
                let year = self.month.year();
                self.month.shift(months);
                self.month_changed(year);
            }
            Command::MonthSet { year, month } => match MonthCursor::new(year, month) {
                Some(cursor) => {
                    let previous_year = self.month.year();
                    self.month = cursor;
                    self.month_changed(previous_year);
                }
                None => self.notify("That month is out of range."),
            },
            Command::Scroll(lines) => {
                let total = self.timeline_page().lines.len();
                self.viewport.scroll(lines, total);
            }
            Command::Refresh => {
                self.dispatch(Msg::RefreshRequested);
            }
            Command::Dismiss => {
                self.dispatch(Msg::AlertDismissed);
            }
            Command::Help => self.notice = HELP.iter().map(|line| line.to_string()).collect(),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn select_day(&mut self, day: u32) {
        let Some(date) = self.month.date_for_day(day) else {
            self.notify(format!("{day} is not a day of the shown month."));
            return;
        };
        if events_on(&self.state.events(), date).next().is_none() {
            self.notify(format!("No interviews on {date}."));
        }
        self.dispatch(Msg::CalendarDateSelected {
            date,
            source: SelectSource::Date,
        });
    }

    fn select_event(&mut self, day: u32, index: usize) {
        let view = self.state.view();
        let record_id = calendar::events_for_day(self.month, &view.events, day)
            .get(index.wrapping_sub(1))
            .map(|event| event.record_id.clone());
        match record_id {
            Some(record_id) => {
                self.dispatch(Msg::CalendarEventClicked { record_id });
            }
            None => self.notify(format!("Day {day} has no interview number {index}.")),
        }
    }

    /// Panel navigation reports a selection too; it never changes the record.
    fn month_changed(&mut self, previous_year: i32) {
        let source = if self.month.year() == previous_year {
            SelectSource::Month
        } else {
            SelectSource::Year
        };
        if let Some(date) = self.month.date_for_day(1) {
            self.dispatch(Msg::CalendarDateSelected { date, source });
        }
    }

    fn known(&mut self, record_id: &RecordId) -> bool {
        let known = self
            .state
            .records()
            .iter()
            .any(|record| &record.id == record_id);
        if !known {
            self.notify(format!("No interview with id {record_id}."));
        }
        known
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notice.push(message.into());
    }

    /// Brings a record's card into view. Does nothing if the timeline is no
    /// longer showing or the card is not on the page.
    fn focus(&mut self, record_id: &RecordId) -> bool {
        if self.state.selection().active_view() != View::Timeline {
            return false;
        }
        let page = self.timeline_page();
        self.viewport.focus_anchor(&page, &record_anchor(record_id))
    }

    fn timeline_page(&self) -> Page {
        render::timeline_page(&self.state.view())
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        let total = render::timeline_page(&view).lines.len();
        self.viewport.scroll(0, total);
        let lines = self.screen(&view);
        self.notice.clear();

        let mut out = io::stdout().lock();
        write!(out, "{CLEAR_SCREEN}")?;
        for line in lines {
            writeln!(out, "{line}")?;
        }
        write!(out, "> ")?;
        out.flush()
    }

    fn screen(&self, view: &AppViewModel) -> Vec<String> {
        let mut lines = render::header(view);
        match view.active_view {
            View::Calendar => lines.extend(render::calendar_view(self.month, view)),
            View::Timeline => {
                let page = render::timeline_page(view);
                lines.extend(self.viewport.visible(&page).iter().cloned());
                if page.lines.len() > self.viewport.visible(&page).len() {
                    lines.push(format!(
                        "-- line {} of {} (up/down to scroll) --",
                        self.viewport.offset() + 1,
                        page.lines.len()
                    ));
                }
            }
            View::Agents => lines.extend(render::agents_view(view)),
        }
        if let Some(drawer) = &view.review_drawer {
            lines.extend(render::review_drawer(drawer));
        }
        if let Some(message) = &view.alert {
            lines.extend(render::alert(message));
        }
        if !self.notice.is_empty() {
            lines.push(String::new());
            lines.extend(self.notice.iter().cloned());
        }
        lines
    }
}
