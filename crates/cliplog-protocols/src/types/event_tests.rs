use super::*;

#[test]
fn test_event_new_defaults() {
    let event = Event::new(EventLabel::InvokeClipper);
    assert_eq!(event.label, EventLabel::InvokeClipper);
    assert_eq!(event.category, EventCategory::Base);
    assert_eq!(event.status, EventStatus::Succeeded);
    assert!(event.properties.is_empty());
    assert!(event.stream.is_empty());
}

#[test]
fn test_event_properties() {
    let mut event = Event::promise(EventLabel::AugmentationApiCall)
        .with_property(PropertyName::RequestCorrelationId, "abc");
    event.set_property(PropertyName::AugmentationModel, "Article");
    event.set_property(PropertyName::RequestCorrelationId, "def");

    assert_eq!(
        event.property(PropertyName::RequestCorrelationId),
        Some(&Value::from("def"))
    );
    assert_eq!(event.properties.len(), 2);
}

#[test]
fn test_promise_event_stop_records_duration_once() {
    let mut event = Event::promise(EventLabel::GetNotebooks);
    assert!(event.duration_ms.is_none());

    event.stop();
    let first = event.duration_ms;
    assert!(first.is_some());
    assert!(first.unwrap() >= 0);

    event.stop();
    assert_eq!(event.duration_ms, first);
}

#[test]
fn test_base_event_stop_is_noop() {
    let mut event = Event::new(EventLabel::CloseClipper);
    event.stop();
    assert!(event.duration_ms.is_none());
}

#[test]
fn test_failure_info_marks_failed() {
    let mut event = Event::promise(EventLabel::AddEmbeddedVideo);
    event.set_failure_info(FailureInfo::new("no video"));
    assert_eq!(event.status, EventStatus::Failed);
    assert_eq!(event.failure_info.unwrap().error, "no video");
}

#[test]
fn test_stream_event_append_order() {
    let mut event = Event::stream(EventLabel::Click);
    event.append(Value::from("a"));
    event.append(Value::from("b"));
    assert_eq!(event.category, EventCategory::Stream);
    assert_eq!(event.stream, vec![Value::from("a"), Value::from("b")]);
}

#[test]
fn test_event_serialization() {
    let event = Event::new(EventLabel::Click).with_property(PropertyName::Url, "https://example.com");
    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["label"], "Click");
    assert_eq!(json["category"], "base");
    assert_eq!(json["properties"]["Url"], "https://example.com");
    assert!(json.get("stream").is_none());

    let parsed: Event = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, event);
}

#[test]
fn test_event_deserialize_minimal() {
    let event: Event = serde_json::from_str(r#"{"label": "InvokeClipper"}"#).unwrap();
    assert_eq!(event.label, EventLabel::InvokeClipper);
    assert_eq!(event.category, EventCategory::Base);
}

#[test]
fn test_label_display() {
    assert_eq!(EventLabel::ClipToOneNoteAction.to_string(), "ClipToOneNoteAction");
    assert_eq!(PropertyName::VideoSrcUrl.as_str(), "VideoSrcUrl");
}
