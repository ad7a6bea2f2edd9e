//! Influencer entity model with validation rules

use crate::core::entity::{Data, Entity};
use crate::core::field::{Cardinality, EntitySchema, FieldKind, FieldSpec, FieldValue, RelationSpec};
use crate::core::validation::ValidationErrors;
use crate::entities::credit_transaction::CreditTransaction;
use crate::{impl_entity, impl_validated_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub static INFLUENCER_SCHEMA: EntitySchema = EntitySchema {
    entity: "influencer",
    route: "influencers",
    fields: &[
        FieldSpec::system("id", FieldKind::Id),
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("location", FieldKind::Text),
        FieldSpec::required("language", FieldKind::Text),
        FieldSpec::required("genre", FieldKind::Text),
        FieldSpec::required("followers", FieldKind::Integer),
        FieldSpec::required("social_media_links", FieldKind::Text),
        FieldSpec::system("created_at", FieldKind::Timestamp),
        FieldSpec::system("updated_at", FieldKind::Timestamp),
    ],
    relations: &[RelationSpec {
        name: "credit_transaction",
        target: "credit_transaction",
        cardinality: Cardinality::HasMany,
        foreign_key: "influencer_id",
    }],
};

/// An influencer whose reach users spend credits on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influencer {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub language: String,
    pub genre: String,
    pub followers: u64,
    pub social_media_links: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Transactions spent on this influencer, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_transaction: Option<Vec<CreditTransaction>>,

    /// Aggregate counts of related records, when requested
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<InfluencerCount>,
}

/// `_count` sub-object of an influencer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluencerCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_transaction: Option<usize>,
}

impl_entity!(Influencer, INFLUENCER_SCHEMA);

impl_validated_entity!(
    Influencer,
    "influencer",
    validate: {
        name: [required string],
        location: [required string],
        language: [required string],
        genre: [required string],
        followers: [required number integer non_negative],
        social_media_links: [required string],
    },
    filters: {
        followers: [integral],
    }
);

impl Data for Influencer {
    fn indexed_fields() -> &'static [&'static str] {
        &["name", "location", "language", "genre"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Uuid(self.id)),
            "name" => Some(self.name.clone().into()),
            "location" => Some(self.location.clone().into()),
            "language" => Some(self.language.clone().into()),
            "genre" => Some(self.genre.clone().into()),
            "followers" => Some(self.followers.into()),
            "social_media_links" => Some(self.social_media_links.clone().into()),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(FieldValue::DateTime(self.updated_at)),
            _ => None,
        }
    }
}

impl Influencer {
    /// Build a new record from a draft, assigning id and timestamps
    pub fn from_draft(draft: InfluencerDraft) -> Result<Self, ValidationErrors> {
        draft.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name,
            location: draft.location,
            language: draft.language,
            genre: draft.genre,
            followers: draft.followers,
            social_media_links: draft.social_media_links,
            created_at: now,
            updated_at: now,
            credit_transaction: None,
            count: None,
        })
    }
}

/// Client input for creating an influencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct InfluencerDraft {
    #[validate(length(min = 1, message = "name is a required field"))]
    pub name: String,
    #[validate(length(min = 1, message = "location is a required field"))]
    pub location: String,
    #[validate(length(min = 1, message = "language is a required field"))]
    pub language: String,
    #[validate(length(min = 1, message = "genre is a required field"))]
    pub genre: String,
    pub followers: u64,
    #[validate(length(min = 1, message = "social_media_links is a required field"))]
    pub social_media_links: String,
}

/// Client input for a partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InfluencerPatch {
    #[validate(length(min = 1, message = "name is a required field"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "location is a required field"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[validate(length(min = 1, message = "language is a required field"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[validate(length(min = 1, message = "genre is a required field"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[validate(length(min = 1, message = "social_media_links is a required field"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media_links: Option<String>,
}

impl InfluencerPatch {
    /// Apply the present fields to a record and bump `updated_at`
    pub fn apply(self, influencer: &mut Influencer) -> Result<(), ValidationErrors> {
        self.validate()?;

        if let Some(name) = self.name {
            influencer.name = name;
        }
        if let Some(location) = self.location {
            influencer.location = location;
        }
        if let Some(language) = self.language {
            influencer.language = language;
        }
        if let Some(genre) = self.genre {
            influencer.genre = genre;
        }
        if let Some(followers) = self.followers {
            influencer.followers = followers;
        }
        if let Some(links) = self.social_media_links {
            influencer.social_media_links = links;
        }
        influencer.touch();
        Ok(())
    }
}
