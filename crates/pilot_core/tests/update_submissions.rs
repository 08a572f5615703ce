use pilot_core::{
    update, AppState, Company, Effect, FailedAction, InterviewData, InterviewRecord, Msg,
    RecordId, ReviewInput,
};

fn record(id: u64) -> InterviewRecord {
    InterviewRecord {
        id: RecordId::from(id),
        created_at: None,
        original_text: None,
        data: InterviewData {
            company: Company {
                name: format!("Company {id}"),
            },
            ..InterviewData::default()
        },
    }
}

fn typed(text: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::InputChanged(text.to_string()));
    state
}

fn with_review_drawer(id: u64) -> AppState {
    let (state, _) = update(AppState::new(), Msg::RecordsLoaded(Ok(vec![record(id)])));
    let (state, _) = update(
        state,
        Msg::ReviewRequested {
            record_id: RecordId::from(id),
        },
    );
    state
}

#[test]
fn blank_input_is_not_submitted() {
    pilot_logging::initialize_for_tests();
    for text in ["", "   \n\t"] {
        let state = typed(text);
        let (next, effects) = update(state.clone(), Msg::SubmitClicked);
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }
}

#[test]
fn submit_sends_trimmed_text_and_blocks_double_submit() {
    let state = typed("  Onsite at Acme on 2024年3月5日  ");
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(
        effects,
        vec![Effect::SubmitInterview {
            text: "Onsite at Acme on 2024年3月5日".to_string()
        }]
    );
    assert!(state.view().submitting);

    let (_state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
}

#[test]
fn successful_submit_clears_input_and_reloads() {
    let (state, _) = update(typed("mail"), Msg::SubmitClicked);
    let (state, effects) = update(state, Msg::SubmitFinished(Ok(())));
    let view = state.view();
    assert!(!view.submitting);
    assert_eq!(view.input, "");
    assert_eq!(effects, vec![Effect::LoadInterviews]);
}

#[test]
fn failed_submit_keeps_input_and_alerts() {
    let (state, _) = update(typed("mail"), Msg::SubmitClicked);
    let (state, effects) = update(state, Msg::SubmitFinished(Err("http status 500".into())));
    let view = state.view();
    assert!(!view.submitting);
    assert_eq!(view.input, "mail");
    assert!(effects.is_empty());
    assert_eq!(
        state.alert().map(|a| a.action),
        Some(FailedAction::SubmitInterview)
    );
}

#[test]
fn failed_refresh_keeps_previous_records() {
    let (state, _) = update(AppState::new(), Msg::RecordsLoaded(Ok(vec![record(1)])));
    let (state, _) = update(state, Msg::RecordsLoaded(Err("network error".into())));
    assert_eq!(state.records().len(), 1);
    assert_eq!(
        state.alert().map(|a| a.action),
        Some(FailedAction::LoadInterviews)
    );
}

#[test]
fn review_is_sanitized_before_sending() {
    let state = with_review_drawer(4);
    assert!(state.view().review_drawer.is_some());

    let (state, effects) = update(
        state,
        Msg::ReviewSubmitted(ReviewInput {
            summary: "  Went well overall ".to_string(),
            score: Some(8),
            improvement: Some("  ".to_string()),
        }),
    );

    assert_eq!(
        effects,
        vec![Effect::SubmitReview {
            record_id: RecordId::from(4),
            review: ReviewInput {
                summary: "Went well overall".to_string(),
                score: Some(5),
                improvement: None,
            },
        }]
    );
    assert!(state.view().review_drawer.unwrap().saving);
}

#[test]
fn review_without_summary_or_selection_is_ignored() {
    let state = with_review_drawer(4);
    let (next, effects) = update(
        state.clone(),
        Msg::ReviewSubmitted(ReviewInput {
            summary: "   ".to_string(),
            ..ReviewInput::default()
        }),
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());

    let (_next, effects) = update(
        AppState::new(),
        Msg::ReviewSubmitted(ReviewInput {
            summary: "fine".to_string(),
            ..ReviewInput::default()
        }),
    );
    assert!(effects.is_empty());
}

#[test]
fn review_with_closed_drawer_is_ignored() {
    let (state, _) = update(AppState::new(), Msg::RecordsLoaded(Ok(vec![record(1)])));
    let (state, _) = update(
        state,
        Msg::TimelineCardClicked {
            record_id: RecordId::from(1),
        },
    );
    let (next, effects) = update(
        state.clone(),
        Msg::ReviewSubmitted(ReviewInput {
            summary: "went well".to_string(),
            ..ReviewInput::default()
        }),
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());

    let (state, _) = update(with_review_drawer(1), Msg::ReviewDrawerClosed);
    let (_next, effects) = update(
        state,
        Msg::ReviewSubmitted(ReviewInput {
            summary: "went well".to_string(),
            ..ReviewInput::default()
        }),
    );
    assert!(effects.is_empty());
}

#[test]
fn review_success_closes_drawer_and_reloads() {
    let state = with_review_drawer(4);
    let (state, _) = update(
        state,
        Msg::ReviewSubmitted(ReviewInput {
            summary: "ok".to_string(),
            ..ReviewInput::default()
        }),
    );
    let (state, effects) = update(state, Msg::ReviewFinished(Ok(())));
    assert!(state.view().review_drawer.is_none());
    assert_eq!(effects, vec![Effect::LoadInterviews]);
}

#[test]
fn review_failure_keeps_drawer_open_and_alerts() {
    let state = with_review_drawer(4);
    let (state, _) = update(
        state,
        Msg::ReviewSubmitted(ReviewInput {
            summary: "ok".to_string(),
            ..ReviewInput::default()
        }),
    );
    let (state, effects) = update(state, Msg::ReviewFinished(Err("timeout".into())));
    let drawer = state.view().review_drawer.expect("drawer still open");
    assert!(!drawer.saving);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().alert.as_deref(),
        Some("Failed to save review: timeout")
    );
}

#[test]
fn refresh_reloads_without_touching_state() {
    let state = with_review_drawer(3);
    let (next, effects) = update(state.clone(), Msg::RefreshRequested);
    assert_eq!(next, state);
    assert_eq!(effects, vec![Effect::LoadInterviews]);
}
