use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which pipe a chunk of output came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// One relayed chunk of console output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    /// When the chunk reached the session
    pub timestamp: DateTime<Utc>,
    pub stream: OutputStream,
    /// Raw text as read from the pipe (may hold several lines or a partial one)
    pub text: String,
}

impl OutputLine {
    pub fn new(stream: OutputStream, text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            stream,
            text: text.into(),
        }
    }

    pub fn stdout(text: impl Into<String>) -> Self {
        Self::new(OutputStream::Stdout, text)
    }

    pub fn stderr(text: impl Into<String>) -> Self {
        Self::new(OutputStream::Stderr, text)
    }

    pub fn is_error(&self) -> bool {
        self.stream == OutputStream::Stderr
    }

    /// Text as shown in the console, stderr gets an `ERROR: ` prefix
    pub fn display_text(&self) -> String {
        match self.stream {
            OutputStream::Stdout => self.text.clone(),
            OutputStream::Stderr => format!("ERROR: {}", self.text),
        }
    }
}
