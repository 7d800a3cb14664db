use crate::configuration::ListingSettings;
use crate::db::FeedbackFilter;
use crate::errors::FeedbackError;
use crate::models::FeedbackValue;
use serde::{Deserialize, Serialize};

/// Raw `GET /api/feedback` query string. Everything arrives as text and is
/// parsed by [`ListQuery::to_filter`] and [`ListQuery::limit`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    pub schema: Option<String>,
    pub feedback: Option<String>,
    #[serde(rename = "showHidden")]
    pub show_hidden: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn to_filter(&self) -> Result<FeedbackFilter, FeedbackError> {
        let feedback = match non_blank(&self.feedback) {
            Some(raw) => Some(parse_feedback_filter(&raw)?),
            None => None,
        };

        Ok(FeedbackFilter {
            schema: non_blank(&self.schema),
            feedback,
            include_hidden: self.show_hidden(),
            search: non_blank(&self.search),
        })
    }

    /// Only an explicit `true` (or `1`) opts into hidden records.
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
            .as_deref()
            .map(|raw| {
                let raw = raw.trim();
                raw.eq_ignore_ascii_case("true") || raw == "1"
            })
            .unwrap_or(false)
    }

    /// Requested limit; missing, non-numeric and non-positive values fall
    /// back to the configured default.
    pub fn limit(&self, listing: &ListingSettings) -> i64 {
        let requested = self
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(listing.default_limit);

        match listing.max_limit {
            Some(max) if requested > max => max,
            _ => requested,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .filter(|value| !value.trim().is_empty())
        .cloned()
}

fn parse_feedback_filter(raw: &str) -> Result<FeedbackValue, FeedbackError> {
    match raw.trim().to_lowercase().as_str() {
        "unset" => Ok(FeedbackValue::Unset),
        tag => tag.parse().map_err(|_| {
            FeedbackError::Validation(format!(
                "feedback filter must be 'positive', 'negative' or 'unset', got '{}'",
                raw
            ))
        }),
    }
}

/// Body of `PATCH /api/feedback/{id}/feedback`. `null` clears the tag; the
/// key itself is required so `{}` cannot clear it by accident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackUpdate {
    #[serde(deserialize_with = "FeedbackValue::deserialize")]
    pub feedback: FeedbackValue,
}

/// Body of `PATCH /api/feedback/{id}/hidden`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiddenUpdate {
    pub hidden: bool,
}
