//! Stream accumulator.

use cliplog_protocols::{Event, EventLabel};
use serde_json::Value;

/// Whether a value counts as present when pushed to a stream.
///
/// `null`, `false`, `0`, `NaN` and the empty string are ignored; every
/// other value, including empty arrays and objects, is kept.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Per-label ordered value buffers for the current session.
///
/// Labels are kept in the order they first received a value.
#[derive(Debug, Default)]
pub struct StreamMap {
    streams: Vec<(EventLabel, Vec<Value>)>,
}

impl StreamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the stream for `label`. Returns false if the value was ignored.
    pub fn push(&mut self, label: EventLabel, value: Value) -> bool {
        if !is_truthy(&value) {
            return false;
        }

        match self.streams.iter_mut().find(|(l, _)| *l == label) {
            Some((_, values)) => values.push(value),
            None => self.streams.push((label, vec![value])),
        }
        true
    }

    pub fn values(&self, label: EventLabel) -> Option<&[Value]> {
        self.streams
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, values)| values.as_slice())
    }

    pub fn labels(&self) -> Vec<EventLabel> {
        self.streams.iter().map(|(l, _)| *l).collect()
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn clear(&mut self) {
        self.streams.clear();
    }

    /// Convert every stream into one aggregated stream event, emptying the map.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.streams
            .drain(..)
            .map(|(label, values)| {
                let mut event = Event::stream(label);
                for value in values {
                    event.append(value);
                }
                event
            })
            .collect()
    }
}
