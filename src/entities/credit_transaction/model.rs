//! Credit transaction entity model with validation rules

use crate::core::entity::{Data, Entity};
use crate::core::field::{Cardinality, EntitySchema, FieldKind, FieldSpec, FieldValue, RelationSpec};
use crate::core::validation::ValidationErrors;
use crate::entities::influencer::Influencer;
use crate::entities::user::User;
use crate::{impl_entity, impl_validated_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub static CREDIT_TRANSACTION_SCHEMA: EntitySchema = EntitySchema {
    entity: "credit_transaction",
    route: "credit-transactions",
    fields: &[
        FieldSpec::system("id", FieldKind::Id),
        FieldSpec::required("user_id", FieldKind::Reference("user")),
        FieldSpec::required("credits_spent", FieldKind::Number),
        FieldSpec::required("influencer_id", FieldKind::Reference("influencer")),
        FieldSpec::system("created_at", FieldKind::Timestamp),
        FieldSpec::system("updated_at", FieldKind::Timestamp),
    ],
    relations: &[
        RelationSpec {
            name: "user",
            target: "user",
            cardinality: Cardinality::BelongsTo,
            foreign_key: "user_id",
        },
        RelationSpec {
            name: "influencer",
            target: "influencer",
            cardinality: Cardinality::BelongsTo,
            foreign_key: "influencer_id",
        },
    ],
};

/// Credits a user spent on an influencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub credits_spent: f64,
    pub influencer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// The spending user, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<User>>,

    /// The influencer credits were spent on, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influencer: Option<Box<Influencer>>,

    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<CreditTransactionCount>,
}

/// `_count` sub-object of a credit transaction; it has no countable relations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditTransactionCount {}

impl_entity!(CreditTransaction, CREDIT_TRANSACTION_SCHEMA);

impl_validated_entity!(
    CreditTransaction,
    "credit_transaction",
    validate: {
        credits_spent: [required number],
        user_id: [required string uuid],
        influencer_id: [required string uuid],
    }
);

impl Data for CreditTransaction {
    fn indexed_fields() -> &'static [&'static str] {
        &["user_id", "influencer_id"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Uuid(self.id)),
            "user_id" => Some(FieldValue::Uuid(self.user_id)),
            "credits_spent" => Some(FieldValue::Float(self.credits_spent)),
            "influencer_id" => Some(FieldValue::Uuid(self.influencer_id)),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(FieldValue::DateTime(self.updated_at)),
            _ => None,
        }
    }
}

impl CreditTransaction {
    /// Build a new record from a draft, assigning id and timestamps
    ///
    /// References are checked by `DashboardApi`, not here.
    pub fn from_draft(draft: CreditTransactionDraft) -> Result<Self, ValidationErrors> {
        draft.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            credits_spent: draft.credits_spent,
            influencer_id: draft.influencer_id,
            created_at: now,
            updated_at: now,
            user: None,
            influencer: None,
            count: None,
        })
    }
}

/// Client input for recording a credit transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreditTransactionDraft {
    pub user_id: Uuid,
    #[validate(custom(function = "finite_credits"))]
    pub credits_spent: f64,
    pub influencer_id: Uuid,
}

/// Client input for a partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreditTransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[validate(custom(function = "finite_credits"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_spent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influencer_id: Option<Uuid>,
}

impl CreditTransactionPatch {
    /// Apply the present fields to a record and bump `updated_at`
    pub fn apply(self, transaction: &mut CreditTransaction) -> Result<(), ValidationErrors> {
        self.validate()?;

        if let Some(user_id) = self.user_id {
            transaction.user_id = user_id;
            transaction.user = None;
        }
        if let Some(credits_spent) = self.credits_spent {
            transaction.credits_spent = credits_spent;
        }
        if let Some(influencer_id) = self.influencer_id {
            transaction.influencer_id = influencer_id;
            transaction.influencer = None;
        }
        transaction.touch();
        Ok(())
    }
}

fn finite_credits(credits: f64) -> Result<(), validator::ValidationError> {
    if credits.is_finite() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("finite");
        error.message = Some("credits_spent must be a finite number".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{Submission, ValidatableEntity};
    use crate::entities::user::UserDraft;
    use serde_json::json;

    fn draft() -> CreditTransactionDraft {
        CreditTransactionDraft {
            user_id: Uuid::new_v4(),
            credits_spent: 12.5,
            influencer_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_from_draft() {
        let d = draft();
        let tx = CreditTransaction::from_draft(d.clone()).unwrap();
        assert_eq!(tx.user_id, d.user_id);
        assert_eq!(tx.influencer_id, d.influencer_id);
        assert_eq!(CreditTransaction::resource_name(), "credit-transactions");
        assert_eq!(CreditTransaction::resource_name_singular(), "credit_transaction");
    }

    #[test]
    fn test_from_draft_rejects_nan() {
        let mut d = draft();
        d.credits_spent = f64::NAN;
        let errors = CreditTransaction::from_draft(d).unwrap_err();
        assert_eq!(
            errors.get("credits_spent"),
            Some("credits_spent must be a finite number")
        );
    }

    #[test]
    fn test_patch_rejects_infinite_credits() {
        let mut tx = CreditTransaction::from_draft(draft()).unwrap();
        let errors = CreditTransactionPatch {
            credits_spent: Some(f64::INFINITY),
            ..Default::default()
        }
        .apply(&mut tx)
        .unwrap_err();
        assert_eq!(
            errors.get("credits_spent"),
            Some("credits_spent must be a finite number")
        );
        assert!((tx.credits_spent - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validation_requires_every_field() {
        let errors =
            CreditTransaction::validate_payload(Submission::Create, &json!({})).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["credits_spent", "user_id", "influencer_id"]
        );
    }

    #[test]
    fn test_validation_rejects_malformed_reference() {
        let errors = CreditTransaction::validate_payload(
            Submission::Create,
            &json!({
                "credits_spent": 5,
                "user_id": "bob",
                "influencer_id": Uuid::new_v4().to_string(),
            }),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("user_id"), Some("user_id must be a valid identifier"));
    }

    #[test]
    fn test_patch_moves_reference_and_drops_stale_relation() {
        let mut tx = CreditTransaction::from_draft(draft()).unwrap();
        let owner = User::from_draft(UserDraft {
            email: "jane@example.com".into(),
            first_name: None,
            last_name: None,
            roq_user_id: "roq-1".into(),
            tenant_id: "tenant-1".into(),
        })
        .unwrap();
        tx.user = Some(Box::new(owner));
        let new_user = Uuid::new_v4();

        CreditTransactionPatch {
            user_id: Some(new_user),
            ..Default::default()
        }
        .apply(&mut tx)
        .unwrap();

        assert_eq!(tx.user_id, new_user);
        assert!(tx.user.is_none());
        assert!((tx.credits_spent - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_count_serializes_as_object() {
        let mut tx = CreditTransaction::from_draft(draft()).unwrap();
        tx.count = Some(CreditTransactionCount {});
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["_count"], json!({}));
    }
}
