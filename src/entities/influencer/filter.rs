//! Influencer list filters

use super::model::Influencer;
use crate::core::query::FilterContract;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Equality filters for listing influencers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluencerFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media_links: Option<String>,
}

impl FilterContract for InfluencerFilter {
    type Entity = Influencer;

    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "location",
        "language",
        "genre",
        "social_media_links",
    ];

    fn conditions(&self) -> Vec<(&'static str, String)> {
        [
            ("id", self.id.map(|id| id.to_string())),
            ("name", self.name.clone()),
            ("location", self.location.clone()),
            ("language", self.language.clone()),
            ("genre", self.genre.clone()),
            ("social_media_links", self.social_media_links.clone()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_orphan_fields() {
        assert!(InfluencerFilter::orphan_fields().is_empty());
    }

    #[test]
    fn test_conditions_only_include_set_fields() {
        let filter = InfluencerFilter {
            genre: Some("Pop".into()),
            language: Some("EN".into()),
            ..Default::default()
        };
        assert_eq!(
            filter.conditions(),
            vec![("language", "EN".to_string()), ("genre", "Pop".to_string())]
        );
    }

    #[test]
    fn test_deserialize_ignores_pagination_keys() {
        let filter: InfluencerFilter =
            serde_json::from_value(serde_json::json!({ "genre": "Rock", "limit": 3 })).unwrap();
        assert_eq!(filter.genre.as_deref(), Some("Rock"));
    }
}
