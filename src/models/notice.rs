use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Error,
    Warning,
    Success,
    Info,
}

/// A message shown to the user alongside the result of an interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

/// Notices collected while serving a single request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Notices(Vec<Notice>);

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        self.0.push(Notice { level, message: message.into() });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Level::Warning, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.0.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|n| n.level == Level::Error)
    }
}
