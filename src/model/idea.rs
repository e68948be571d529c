use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Highest rating an idea can receive
pub const MAX_RATING: u8 = 100;

/// A stored startup idea.
///
/// Only `votes` changes after creation; everything else is fixed when the
/// idea is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Creation timestamp in milliseconds, as a string
    pub id: String,
    pub startup_name: String,
    pub tagline: String,
    pub description: String,
    /// 0..=100
    #[serde(deserialize_with = "deserialize_rating")]
    pub rating: u8,
    /// Canned feedback for the rating bracket
    pub feedback: String,
    #[serde(default)]
    pub votes: u32,
}

/// Stored ratings outside 0..=MAX_RATING make the whole slot invalid.
fn deserialize_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    if value > MAX_RATING {
        return Err(D::Error::custom(format!("rating {value} is above {MAX_RATING}")));
    }
    Ok(value)
}

/// Unvalidated user input for a new idea
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaDraft {
    pub startup_name: String,
    pub tagline: String,
    pub description: String,
}

impl IdeaDraft {
    pub fn new(
        startup_name: impl Into<String>,
        tagline: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        IdeaDraft {
            startup_name: startup_name.into(),
            tagline: tagline.into(),
            description: description.into(),
        }
    }

    /// Fields that are empty once surrounding whitespace is ignored, in
    /// form order.
    pub fn missing_fields(&self) -> Vec<IdeaField> {
        [
            (IdeaField::StartupName, &self.startup_name),
            (IdeaField::Tagline, &self.tagline),
            (IdeaField::Description, &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// A required text field of an idea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IdeaField {
    StartupName,
    Tagline,
    Description,
}

impl fmt::Display for IdeaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdeaField::StartupName => write!(f, "startup name"),
            IdeaField::Tagline => write!(f, "tagline"),
            IdeaField::Description => write!(f, "description"),
        }
    }
}

/// Ordering applied when listing ideas. Both orders are descending and
/// stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Rating,
    Votes,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Rating => write!(f, "rating"),
            SortKey::Votes => write!(f, "votes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idea_serializes_with_camel_case_fields() {
        let idea = Idea {
            id: "1700000000000".into(),
            startup_name: "Rocket Socks".into(),
            tagline: "Socks, but faster".into(),
            description: "Aerodynamic footwear".into(),
            rating: 72,
            feedback: "ok".into(),
            votes: 3,
        };
        let json = serde_json::to_value(&idea).unwrap();
        assert_eq!(json["startupName"], "Rocket Socks");
        assert_eq!(json["rating"], 72);
        assert_eq!(json["votes"], 3);
        assert!(json.get("startup_name").is_none());
    }

    fn idea_json(rating: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "1",
            "startupName": "n",
            "tagline": "t",
            "description": "d",
            "rating": rating,
            "feedback": "f",
            "votes": 0,
        })
    }

    #[test]
    fn test_field_order_is_not_significant() {
        let text = concat!(
            r#"{"votes":1,"feedback":"f","rating":5,"description":"d","#,
            r#""tagline":"t","startupName":"n","id":"9"}"#,
        );
        let idea: Idea = serde_json::from_str(text).unwrap();
        assert_eq!(idea.id, "9");
        assert_eq!(idea.startup_name, "n");
        assert_eq!(idea.votes, 1);
    }

    #[test]
    fn test_rating_above_u8_is_rejected() {
        let result: Result<Idea, _> = serde_json::from_value(idea_json(300.into()));
        assert!(result.is_err());
    }

    #[test]
    fn test_rating_above_max_is_rejected() {
        let err = serde_json::from_value::<Idea>(idea_json(101.into())).unwrap_err();
        assert!(err.to_string().contains("rating 101 is above 100"));
        assert!(serde_json::from_value::<Idea>(idea_json(255.into())).is_err());
    }

    #[test]
    fn test_rating_bounds_are_accepted() {
        let top: Idea = serde_json::from_value(idea_json(100.into())).unwrap();
        assert_eq!(top.rating, MAX_RATING);
        let bottom: Idea = serde_json::from_value(idea_json(0.into())).unwrap();
        assert_eq!(bottom.rating, 0);
    }

    #[test]
    fn test_missing_fields_reports_blank_input_in_order() {
        let draft = IdeaDraft::new("  ", "tag", "\n\t");
        assert_eq!(
            draft.missing_fields(),
            vec![IdeaField::StartupName, IdeaField::Description]
        );
        assert!(IdeaDraft::new("a", "b", "c").missing_fields().is_empty());
        assert_eq!(IdeaDraft::default().missing_fields().len(), 3);
    }

    #[test]
    fn test_sort_key_display_matches_cli_value() {
        assert_eq!(SortKey::Rating.to_string(), "rating");
        assert_eq!(SortKey::Votes.to_string(), "votes");
        let key: SortKey = serde_json::from_str("\"votes\"").unwrap();
        assert_eq!(key, SortKey::Votes);
    }
}
