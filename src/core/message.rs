use serde::{Deserialize, Serialize};

/// Who produced a message shown in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SenderKind {
    User,
    Assistant,
    System,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: SenderKind,
    pub content: String,
}

impl Message {
    pub fn new(sender: SenderKind, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(SenderKind::Assistant, content)
    }
}

impl SenderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SenderKind::User => "user",
            SenderKind::Assistant => "assistant",
            SenderKind::System => "system",
            SenderKind::Error => "error",
        }
    }

    /// Label inserted ahead of the message body.
    pub fn label(self) -> &'static str {
        match self {
            SenderKind::User => "You: ",
            SenderKind::Assistant => "Assistant: ",
            SenderKind::System => "System: ",
            SenderKind::Error => "Error: ",
        }
    }

    /// Only assistant replies go through the markdown scanners; everything
    /// else is shown verbatim.
    pub fn renders_markdown(self) -> bool {
        self == SenderKind::Assistant
    }
}

impl AsRef<str> for SenderKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for SenderKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(SenderKind::User),
            "assistant" | "model" => Ok(SenderKind::Assistant),
            "system" => Ok(SenderKind::System),
            "error" => Ok(SenderKind::Error),
            _ => Err(format!("invalid sender kind: {value}")),
        }
    }
}

impl TryFrom<String> for SenderKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        Self::try_from(value.as_str())
    }
}

impl From<SenderKind> for String {
    fn from(value: SenderKind) -> Self {
        value.as_str().to_string()
    }
}

impl std::str::FromStr for SenderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}
