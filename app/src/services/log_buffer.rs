//! In-memory log buffer backed by tracing subscriber events.
//!
//! Encoding and export failures are reported to the user with generic
//! messages; their causes land here for `/api/logs`.

use std::collections::VecDeque;
use std::sync::{LazyLock, Mutex};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

pub const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
    pub fields: Map<String, Value>,
}

static LOG_ENTRIES: LazyLock<Mutex<VecDeque<LogEntry>>> =
    LazyLock::new(|| Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES)));

/// Most recent entries, oldest first.
pub fn recent(limit: usize) -> Vec<LogEntry> {
    let safe_limit = limit.clamp(1, MAX_LOG_ENTRIES);
    let Ok(entries) = LOG_ENTRIES.lock() else {
        return Vec::new();
    };

    let mut logs = entries
        .iter()
        .rev()
        .take(safe_limit)
        .cloned()
        .collect::<Vec<_>>();
    logs.reverse();
    logs
}

pub fn clear() -> usize {
    let Ok(mut entries) = LOG_ENTRIES.lock() else {
        return 0;
    };
    let cleared = entries.len();
    entries.clear();
    cleared
}

fn push(entry: LogEntry) {
    let Ok(mut entries) = LOG_ENTRIES.lock() else {
        return;
    };

    if entries.len() >= MAX_LOG_ENTRIES {
        entries.pop_front();
    }
    entries.push_back(entry);
}

#[derive(Default)]
pub struct LogCaptureLayer;

impl LogCaptureLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for LogCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        let message = visitor.message.unwrap_or_else(|| meta.name().to_string());

        push(LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: meta.level().to_string().to_lowercase(),
            target: meta.target().to_string(),
            message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl JsonVisitor {
    fn record_field_value(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = value
                .as_str()
                .map(ToString::to_string)
                .or_else(|| Some(value.to_string()));
            return;
        }
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_field_value(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_field_value(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_field_value(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_field_value(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_field_value(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record_field_value(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_field_value(field, Value::from(format!("{value:?}")));
    }
}
