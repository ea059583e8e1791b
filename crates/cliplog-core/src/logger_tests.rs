use super::*;
use crate::gate::RequiredContextGate;
use crate::recording::{RecordingSink, SinkRecord};
use mockall::mock;
use parking_lot::Mutex;
use serde_json::json;

mock! {
    pub Gate {}

    impl ContextGate for Gate {
        fn requirements_are_met(&self, properties: &ContextProperties) -> bool;
    }
}

fn ungated() -> (SessionLogger, RecordingSink) {
    let sink = RecordingSink::with_session_id("session-1");
    let logger = SessionLogger::new(Arc::new(sink.clone()));
    (logger, sink)
}

fn gated_on_app_id() -> (SessionLogger, RecordingSink) {
    let sink = RecordingSink::with_session_id("session-1");
    let options = SessionLoggerOptions::new()
        .with_context_gate(Arc::new(RequiredContextGate::new([ContextKey::AppInfoId])));
    let logger = SessionLogger::with_options(Arc::new(sink.clone()), options);
    (logger, sink)
}

fn interact_count(sink: &RecordingSink) -> usize {
    sink.records()
        .iter()
        .filter(|r| {
            matches!(
                r,
                SinkRecord::UserFunnel {
                    label: FunnelLabel::Interact
                }
            )
        })
        .count()
}

#[test]
fn test_ungated_event_dispatches_immediately() {
    let (mut logger, sink) = ungated();
    let event = Event::new(EventLabel::InvokeClipper);

    logger.log_event(event.clone());

    assert_eq!(sink.records(), vec![SinkRecord::Event { event }]);
    assert!(logger.pending_operations().is_empty());
}

#[test]
fn test_closed_gate_defers_without_hooks() {
    let (mut logger, sink) = gated_on_app_id();

    logger.log_event(Event::new(EventLabel::InvokeClipper));
    logger.log_user_funnel(FunnelLabel::Invoke);
    logger.log_trace(TraceLabel::GeneralInfo, TraceLevel::Information, None);
    logger.log_session_start();
    logger.log_click_event("modeButton");

    assert!(sink.is_empty());
    let methods: Vec<_> = logger
        .pending_operations()
        .iter()
        .map(|op| op.method())
        .collect();
    assert_eq!(
        methods,
        vec![
            cliplog_protocols::LogMethod::LogEvent,
            cliplog_protocols::LogMethod::LogUserFunnel,
            cliplog_protocols::LogMethod::LogTrace,
            cliplog_protocols::LogMethod::LogSessionStart,
            cliplog_protocols::LogMethod::LogClickEvent,
        ]
    );
    assert_eq!(logger.session_state(), SessionState::Ended);
}

#[test]
fn test_gate_opening_replays_in_issue_order() {
    let (mut logger, sink) = gated_on_app_id();
    let event = Event::new(EventLabel::InvokeClipper);

    logger.log_event(event.clone());
    logger.log_click_event("a");
    logger.set_context_property(ContextKey::AppInfoId, "clipper");

    assert_eq!(
        sink.records(),
        vec![
            SinkRecord::SetContext {
                key: ContextKey::AppInfoId,
                value: ContextValue::from("clipper"),
            },
            SinkRecord::Event { event },
            SinkRecord::UserFunnel {
                label: FunnelLabel::Interact
            },
            SinkRecord::Click {
                click_id: "a".to_string()
            },
        ]
    );
    assert_eq!(logger.streams().values(EventLabel::Click).unwrap(), &[json!("a")]);
    assert!(logger.pending_operations().is_empty());
    assert_eq!(logger.flush_state(), FlushState::Flushed);
}

#[test]
fn test_deferred_failure_and_session_end_replay() {
    let (mut logger, sink) = gated_on_app_id();

    logger.log_session_start();
    logger.log_failure(
        FailureLabel::NotImplemented,
        FailureType::Expected,
        None,
        None,
    );
    logger.log_click_event("x");
    logger.log_session_end(Some(EndTrigger::SignOut));
    logger.log_session_end(None);
    assert!(sink.is_empty());
    assert_eq!(logger.pending_operations().len(), 5);

    logger.set_context_property(ContextKey::AppInfoId, "clipper");

    let records = sink.records();
    assert_eq!(records.len(), 9);
    assert!(matches!(records[0], SinkRecord::SetContext { .. }));
    assert_eq!(records[1], SinkRecord::SessionStart);
    assert_eq!(
        records[2],
        SinkRecord::SetUserSessionId {
            session_id: Some("session-1".to_string())
        }
    );
    assert_eq!(
        records[3],
        SinkRecord::Failure {
            label: FailureLabel::NotImplemented,
            failure_type: FailureType::Expected,
            info: None,
            id: None,
        }
    );
    assert_eq!(
        records[4],
        SinkRecord::UserFunnel {
            label: FunnelLabel::Interact
        }
    );
    assert_eq!(
        records[5],
        SinkRecord::Click {
            click_id: "x".to_string()
        }
    );
    match &records[6] {
        SinkRecord::EventPure { event } => {
            assert_eq!(event.label, EventLabel::Click);
            assert_eq!(event.stream, vec![json!("x")]);
        }
        other => panic!("unexpected record: {:?}", other),
    }
    assert_eq!(
        records[7],
        SinkRecord::SessionEnd {
            end_trigger: Some(EndTrigger::SignOut)
        }
    );
    assert_eq!(
        records[8],
        SinkRecord::Failure {
            label: FailureLabel::SessionAlreadySet,
            failure_type: FailureType::Unexpected,
            info: Some(FailureInfo::new("Session already ENDED")),
            id: None,
        }
    );
    assert_eq!(logger.session_state(), SessionState::Ended);
    assert!(logger.user_session_id().is_none());
    assert_eq!(logger.flush_state(), FlushState::Flushed);
}

#[test]
fn test_unsatisfying_context_keeps_queue() {
    let (mut logger, sink) = gated_on_app_id();

    logger.log_event(Event::new(EventLabel::InvokeClipper));
    logger.set_context_property(ContextKey::UserInfoLanguage, "en-US");

    assert_eq!(sink.len(), 1);
    assert_eq!(logger.pending_operations().len(), 1);
    assert_eq!(logger.flush_state(), FlushState::Idle);
}

#[test]
fn test_queue_flushes_only_once() {
    let (mut logger, sink) = gated_on_app_id();

    logger.log_event(Event::new(EventLabel::InvokeClipper));
    logger.set_context_property(ContextKey::AppInfoId, "clipper");
    logger.set_context_property(ContextKey::AppInfoId, "clipper-2");

    let events = sink
        .records()
        .iter()
        .filter(|r| matches!(r, SinkRecord::Event { .. }))
        .count();
    assert_eq!(events, 1);
}

#[test]
fn test_queued_session_lifecycle_replays() {
    let (mut logger, sink) = gated_on_app_id();

    logger.log_session_start();
    logger.push_to_stream(EventLabel::Click, "early");
    logger.set_context_property(ContextKey::AppInfoId, "clipper");

    assert_eq!(logger.session_state(), SessionState::Started);
    assert_eq!(logger.user_session_id().as_deref(), Some("session-1"));
    // The stream push was applied immediately, then cleared by the replayed start.
    assert!(logger.streams().is_empty());
    assert!(sink.records().contains(&SinkRecord::SessionStart));
}

#[test]
fn test_gate_that_closes_again_rearms_queue() {
    let sink = RecordingSink::new();
    let gate = |props: &ContextProperties| {
        props.get(&ContextKey::AuthType) == Some(&ContextValue::from("msa"))
    };
    let options = SessionLoggerOptions::new().with_context_gate(Arc::new(gate));
    let mut logger = SessionLogger::with_options(Arc::new(sink.clone()), options);

    logger.set_context_property(ContextKey::AuthType, "msa");
    assert_eq!(logger.flush_state(), FlushState::Flushed);

    logger.set_context_property(ContextKey::AuthType, "none");
    logger.log_user_funnel(FunnelLabel::SignOut);
    assert_eq!(logger.flush_state(), FlushState::Idle);
    assert_eq!(logger.pending_operations().len(), 1);

    logger.set_context_property(ContextKey::AuthType, "msa");
    assert!(logger.pending_operations().is_empty());
    assert_eq!(
        sink.records().last(),
        Some(&SinkRecord::UserFunnel {
            label: FunnelLabel::SignOut
        })
    );
}

#[test]
fn test_gate_consulted_for_gated_operations_only() {
    let mut gate = MockGate::new();
    gate.expect_requirements_are_met().times(2).return_const(true);

    let sink = RecordingSink::new();
    let options = SessionLoggerOptions::new().with_context_gate(Arc::new(gate));
    let mut logger = SessionLogger::with_options(Arc::new(sink.clone()), options);

    logger.push_to_stream(EventLabel::Click, "x");
    logger.log_user_funnel(FunnelLabel::Invoke);
    logger.log_trace(TraceLabel::GeneralInfo, TraceLevel::Verbose, Some("hi".to_string()));

    assert_eq!(sink.len(), 2);
}

#[test]
fn test_gate_sees_accumulated_context() {
    let mut gate = MockGate::new();
    gate.expect_requirements_are_met()
        .withf(|props| props.contains_key(&ContextKey::DeviceInfoId))
        .times(1)
        .return_const(false);

    let sink = RecordingSink::new();
    let options = SessionLoggerOptions::new().with_context_gate(Arc::new(gate));
    let mut logger = SessionLogger::with_options(Arc::new(sink.clone()), options);

    logger.set_context_property(ContextKey::DeviceInfoId, "device");
    assert_eq!(logger.flush_state(), FlushState::Idle);
}

#[test]
fn test_session_start_reveals_session_id() {
    let (mut logger, sink) = ungated();

    logger.log_session_start();

    assert_eq!(logger.session_state(), SessionState::Started);
    assert_eq!(logger.user_session_id().as_deref(), Some("session-1"));
    assert_eq!(
        sink.records(),
        vec![
            SinkRecord::SessionStart,
            SinkRecord::SetUserSessionId {
                session_id: Some("session-1".to_string())
            },
        ]
    );
}

#[test]
fn test_double_start_reports_once_and_stays_started() {
    let (mut logger, sink) = ungated();

    logger.log_session_start();
    logger.log_session_start();

    let failures = sink.failures(FailureLabel::SessionAlreadySet);
    assert_eq!(failures.len(), 1);
    assert_eq!(
        failures[0],
        SinkRecord::Failure {
            label: FailureLabel::SessionAlreadySet,
            failure_type: FailureType::Unexpected,
            info: Some(FailureInfo::new("Session already STARTED")),
            id: None,
        }
    );
    assert_eq!(logger.session_state(), SessionState::Started);
    let starts = sink
        .records()
        .iter()
        .filter(|r| **r == SinkRecord::SessionStart)
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn test_end_while_ended_reports_trigger() {
    let (mut logger, sink) = ungated();

    logger.log_session_end(Some(EndTrigger::Unload));

    let failures = sink.failures(FailureLabel::SessionAlreadySet);
    assert_eq!(failures.len(), 1);
    match &failures[0] {
        SinkRecord::Failure { info, .. } => assert_eq!(
            info.as_ref().unwrap().error,
            "Session already ENDED. EndTrigger: Unload"
        ),
        other => panic!("unexpected record: {:?}", other),
    }
    assert!(
        !sink
            .records()
            .iter()
            .any(|r| matches!(r, SinkRecord::SessionEnd { .. }))
    );
}

#[test]
fn test_end_while_ended_without_trigger() {
    let (mut logger, sink) = ungated();

    logger.log_session_end(None);

    match &sink.failures(FailureLabel::SessionAlreadySet)[0] {
        SinkRecord::Failure { info, .. } => {
            assert_eq!(info.as_ref().unwrap().error, "Session already ENDED")
        }
        other => panic!("unexpected record: {:?}", other),
    }
}

#[test]
fn test_double_end_does_not_flush_streams_again() {
    let (mut logger, sink) = ungated();

    logger.log_session_start();
    logger.push_to_stream(EventLabel::Click, "v");
    logger.log_session_end(Some(EndTrigger::SignOut));
    logger.push_to_stream(EventLabel::Click, "w");
    logger.log_session_end(Some(EndTrigger::SignOut));

    let pure_events = sink
        .records()
        .iter()
        .filter(|r| matches!(r, SinkRecord::EventPure { .. }))
        .count();
    assert_eq!(pure_events, 1);
    assert_eq!(sink.failures(FailureLabel::SessionAlreadySet).len(), 1);
    assert_eq!(logger.streams().values(EventLabel::Click).unwrap(), &[json!("w")]);
}

#[test]
fn test_session_end_flushes_streams_in_order() {
    let (mut logger, sink) = ungated();

    logger.log_session_start();
    logger.push_to_stream(EventLabel::AddEmbeddedVideo, "v1");
    logger.push_to_stream(EventLabel::Click, "c1");
    logger.push_to_stream(EventLabel::AddEmbeddedVideo, "v2");
    logger.push_to_stream(EventLabel::AddEmbeddedVideo, "");
    sink.clear();

    logger.log_session_end(Some(EndTrigger::Unload));

    let records = sink.records();
    match (&records[0], &records[1]) {
        (SinkRecord::EventPure { event: first }, SinkRecord::EventPure { event: second }) => {
            assert_eq!(first.label, EventLabel::AddEmbeddedVideo);
            assert_eq!(first.stream, vec![json!("v1"), json!("v2")]);
            assert_eq!(second.label, EventLabel::Click);
            assert_eq!(second.stream, vec![json!("c1")]);
        }
        other => panic!("unexpected records: {:?}", other),
    }
    assert_eq!(
        records[2],
        SinkRecord::SessionEnd {
            end_trigger: Some(EndTrigger::Unload)
        }
    );
    assert_eq!(records.len(), 3);
    assert!(logger.streams().is_empty());
    assert!(logger.user_session_id().is_none());
    assert_eq!(logger.session_state(), SessionState::Ended);
}

#[test]
fn test_session_start_clears_previous_streams() {
    let (mut logger, _sink) = ungated();

    logger.push_to_stream(EventLabel::Click, "stale");
    logger.log_session_start();

    assert!(logger.streams().is_empty());
}

#[test]
fn test_interaction_logged_once_per_session() {
    let (mut logger, sink) = ungated();

    logger.send_funnel_interaction_event("modeButton");
    logger.send_funnel_interaction_event("modeButton");
    assert_eq!(interact_count(&sink), 1);
    assert!(logger.has_user_interacted());

    logger.log_session_start();
    logger.log_session_end(None);
    assert!(!logger.has_user_interacted());

    logger.send_funnel_interaction_event("modeButton");
    assert_eq!(interact_count(&sink), 2);
}

#[test]
fn test_exempt_click_never_interacts() {
    let (mut logger, sink) = ungated();

    logger.log_click_event("clipButton");
    logger.log_click_event("signOutButton");

    assert_eq!(interact_count(&sink), 0);
    assert!(!logger.has_user_interacted());
    assert_eq!(
        logger.streams().values(EventLabel::Click).unwrap(),
        &[json!("clipButton"), json!("signOutButton")]
    );
}

#[test]
fn test_configured_exemption() {
    let sink = RecordingSink::new();
    let options = SessionLoggerOptions::new().with_non_interaction_ids(["feedbackButton"]);
    let mut logger = SessionLogger::with_options(Arc::new(sink.clone()), options);

    logger.log_click_event("feedbackButton");
    assert_eq!(interact_count(&sink), 0);
}

#[test]
fn test_click_without_id_reports_invalid_argument() {
    let (mut logger, sink) = ungated();

    logger.log_click_event("");

    let failures = sink.failures(FailureLabel::InvalidArgument);
    assert_eq!(failures.len(), 1);
    match &failures[0] {
        SinkRecord::Failure { info, .. } => assert_eq!(
            info.as_ref().unwrap().error,
            "Button clicked without an ID! Logged with ID \"\""
        ),
        other => panic!("unexpected record: {:?}", other),
    }
    assert!(
        !sink
            .records()
            .iter()
            .any(|r| matches!(r, SinkRecord::Click { .. }))
    );
    assert!(logger.streams().is_empty());
}

#[test]
fn test_failure_passes_info_and_id() {
    let (mut logger, sink) = ungated();

    logger.log_failure(
        FailureLabel::UnhandledApiCode,
        FailureType::Expected,
        Some(FailureInfo::new("409")),
        Some("corr-1".to_string()),
    );

    assert_eq!(
        sink.records(),
        vec![SinkRecord::Failure {
            label: FailureLabel::UnhandledApiCode,
            failure_type: FailureType::Expected,
            info: Some(FailureInfo::new("409")),
            id: Some("corr-1".to_string()),
        }]
    );
}

#[test]
fn test_json_parse_unexpected() {
    let (mut logger, sink) = ungated();

    logger.log_json_parse_unexpected("{not json");

    match &sink.failures(FailureLabel::JsonParse)[0] {
        SinkRecord::Failure {
            failure_type, info, ..
        } => {
            assert_eq!(*failure_type, FailureType::Unexpected);
            assert!(info.as_ref().unwrap().error.contains("{not json"));
        }
        other => panic!("unexpected record: {:?}", other),
    }
}

#[test]
fn test_session_id_subscribers() {
    let cell = SessionIdCell::new();
    let handle = cell.handle();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    handle.subscribe(move |id| seen_clone.lock().push(id.map(str::to_string)));

    let sink = RecordingSink::with_session_id("abc");
    let options = SessionLoggerOptions::new().with_session_id(cell);
    let mut logger = SessionLogger::with_options(Arc::new(sink), options);

    logger.log_session_start();
    assert_eq!(handle.get().as_deref(), Some("abc"));
    logger.log_session_end(Some(EndTrigger::SignOut));
    assert!(handle.get().is_none());

    assert_eq!(*seen.lock(), vec![Some("abc".to_string()), None]);
}

#[test]
fn test_default_sink_id_is_generated() {
    let sink = RecordingSink::new();
    let mut logger = SessionLogger::new(Arc::new(sink));

    logger.log_session_start();
    let id = logger.user_session_id().unwrap();
    assert_eq!(id.len(), 36);

    // A repeated start keeps the id already revealed.
    logger.log_session_start();
    assert_eq!(logger.user_session_id().unwrap(), id);
}

#[test]
fn test_apply_dispatches_operation() {
    let (mut logger, sink) = ungated();

    logger.apply(LogOperation::SetContextProperty {
        key: ContextKey::UserInfoLanguage,
        value: ContextValue::from("fr-FR"),
    });
    logger.apply(LogOperation::PushToStream {
        label: EventLabel::Click,
        value: json!("x"),
    });

    assert_eq!(
        logger.context_properties().get(&ContextKey::UserInfoLanguage),
        Some(&ContextValue::from("fr-FR"))
    );
    assert_eq!(logger.streams().values(EventLabel::Click).unwrap(), &[json!("x")]);
    assert_eq!(sink.len(), 1);
}
