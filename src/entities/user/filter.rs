//! User list filters

use super::model::User;
use crate::core::query::FilterContract;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Equality filters for listing users
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roq_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl FilterContract for UserFilter {
    type Entity = User;

    const FIELDS: &'static [&'static str] = &["id", "email", "roq_user_id", "tenant_id"];

    fn conditions(&self) -> Vec<(&'static str, String)> {
        [
            ("id", self.id.map(|id| id.to_string())),
            ("email", self.email.clone()),
            ("roq_user_id", self.roq_user_id.clone()),
            ("tenant_id", self.tenant_id.clone()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}
