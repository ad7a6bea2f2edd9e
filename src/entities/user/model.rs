//! User entity model

use crate::core::entity::{Data, Entity};
use crate::core::field::{Cardinality, EntitySchema, FieldKind, FieldSpec, FieldValue, RelationSpec};
use crate::core::validation::ValidationErrors;
use crate::entities::credit_transaction::CreditTransaction;
use crate::{impl_entity, impl_validated_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub static USER_SCHEMA: EntitySchema = EntitySchema {
    entity: "user",
    route: "users",
    fields: &[
        FieldSpec::system("id", FieldKind::Id),
        FieldSpec::required("email", FieldKind::Text),
        FieldSpec::optional("first_name", FieldKind::Text),
        FieldSpec::optional("last_name", FieldKind::Text),
        FieldSpec::required("roq_user_id", FieldKind::Text),
        FieldSpec::required("tenant_id", FieldKind::Text),
        FieldSpec::system("created_at", FieldKind::Timestamp),
        FieldSpec::system("updated_at", FieldKind::Timestamp),
    ],
    relations: &[RelationSpec {
        name: "credit_transaction",
        target: "credit_transaction",
        cardinality: Cardinality::HasMany,
        foreign_key: "user_id",
    }],
};

/// A platform user, linked to the identity provider by `roq_user_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub roq_user_id: String,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_transaction: Option<Vec<CreditTransaction>>,

    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<UserCount>,
}

/// `_count` sub-object of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_transaction: Option<usize>,
}

impl_entity!(User, USER_SCHEMA);

impl_validated_entity!(
    User,
    "user",
    validate: {
        email: [required string email],
        first_name: [string],
        last_name: [string],
        roq_user_id: [required string],
        tenant_id: [required string],
    }
);

impl Data for User {
    fn indexed_fields() -> &'static [&'static str] {
        &["email", "roq_user_id", "tenant_id"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Uuid(self.id)),
            "email" => Some(self.email.clone().into()),
            "first_name" => Some(self.first_name.clone().into()),
            "last_name" => Some(self.last_name.clone().into()),
            "roq_user_id" => Some(self.roq_user_id.clone().into()),
            "tenant_id" => Some(self.tenant_id.clone().into()),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(FieldValue::DateTime(self.updated_at)),
            _ => None,
        }
    }
}

impl User {
    pub fn from_draft(draft: UserDraft) -> Result<Self, ValidationErrors> {
        draft.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email: draft.email,
            first_name: draft.first_name,
            last_name: draft.last_name,
            roq_user_id: draft.roq_user_id,
            tenant_id: draft.tenant_id,
            created_at: now,
            updated_at: now,
            credit_transaction: None,
            count: None,
        })
    }

    /// "First Last", falling back to the e-mail address
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Client input for registering a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserDraft {
    #[validate(email(message = "email must be a valid email"))]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[validate(length(min = 1, message = "roq_user_id is a required field"))]
    pub roq_user_id: String,
    #[validate(length(min = 1, message = "tenant_id is a required field"))]
    pub tenant_id: String,
}

/// Client input for a partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UserPatch {
    #[validate(email(message = "email must be a valid email"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[validate(length(min = 1, message = "roq_user_id is a required field"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roq_user_id: Option<String>,
    #[validate(length(min = 1, message = "tenant_id is a required field"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl UserPatch {
    /// Apply the present fields to a record and bump `updated_at`
    pub fn apply(self, user: &mut User) -> Result<(), ValidationErrors> {
        self.validate()?;

        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(first_name) = self.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = self.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(roq_user_id) = self.roq_user_id {
            user.roq_user_id = roq_user_id;
        }
        if let Some(tenant_id) = self.tenant_id {
            user.tenant_id = tenant_id;
        }
        user.touch();
        Ok(())
    }
}
