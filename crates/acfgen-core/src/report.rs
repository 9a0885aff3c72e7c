use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogLevel,
    pub code: String,
    pub message: String,
}

/// Ordered log stream for one conversion run.
///
/// The front ends display this verbatim; nothing in the pipeline reads it
/// back, so pushing is append-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionLog {
    pub messages: Vec<LogMessage>,
}

impl ConversionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, code: &str, message: impl Into<String>) {
        self.push(LogLevel::Info, code, message.into());
    }

    pub fn warning(&mut self, code: &str, message: impl Into<String>) {
        self.push(LogLevel::Warning, code, message.into());
    }

    pub fn error(&mut self, code: &str, message: impl Into<String>) {
        self.push(LogLevel::Error, code, message.into());
    }

    fn push(&mut self, level: LogLevel, code: &str, message: String) {
        self.messages.push(LogMessage {
            level,
            code: code.to_string(),
            message,
        });
    }

    pub fn warning_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.level == LogLevel::Warning)
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReport {
    pub name: String,
    pub role: String,
    pub vertex_count: usize,
    pub face_count: usize,
}

/// Summary of one conversion run, serialized by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub groups: Vec<GroupReport>,
    pub body_count: usize,
    pub station_counts: Vec<usize>,
    pub wing_count: usize,
    pub log: ConversionLog,
}
