use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use uuid::Uuid;

/// Reviewer verdict on a transcript. `Unset` travels as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackValue {
    Positive,
    Negative,
    #[default]
    Unset,
}

impl FeedbackValue {
    /// Stored tag, `None` for `Unset`.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            FeedbackValue::Positive => Some("positive"),
            FeedbackValue::Negative => Some("negative"),
            FeedbackValue::Unset => None,
        }
    }

    pub fn from_tag(tag: Option<&str>) -> Result<Self, String> {
        match tag {
            None => Ok(FeedbackValue::Unset),
            Some(tag) => tag.parse(),
        }
    }
}

impl FromStr for FeedbackValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(FeedbackValue::Positive),
            "negative" => Ok(FeedbackValue::Negative),
            other => Err(format!(
                "unknown feedback value '{}', expected 'positive', 'negative' or null",
                other
            )),
        }
    }
}

impl Serialize for FeedbackValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(tag) => serializer.serialize_str(tag),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FeedbackValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        FeedbackValue::from_tag(tag.as_deref()).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub message: String,
}

impl ConversationMessage {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            message: message.into(),
        }
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            message: message.into(),
        }
    }
}

/// One reviewed chatbot interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub schema: String,
    pub question: String,
    pub query: String,
    pub feedback: FeedbackValue,
    pub hidden: bool,
    pub conversation: Vec<ConversationMessage>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Insert shape; the store assigns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewFeedbackRecord {
    pub schema: String,
    pub question: String,
    pub query: String,
    #[serde(default)]
    pub feedback: FeedbackValue,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub conversation: Vec<ConversationMessage>,
}

impl NewFeedbackRecord {
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> FeedbackRecord {
        FeedbackRecord {
            id,
            schema: self.schema,
            question: self.question,
            query: self.query,
            feedback: self.feedback,
            hidden: self.hidden,
            conversation: self.conversation,
            created_at,
        }
    }
}

/// Single-field update accepted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackPatch {
    Feedback(FeedbackValue),
    Hidden(bool),
}

impl FeedbackPatch {
    pub fn apply(self, record: &mut FeedbackRecord) {
        match self {
            FeedbackPatch::Feedback(value) => record.feedback = value,
            FeedbackPatch::Hidden(hidden) => record.hidden = hidden,
        }
    }
}
