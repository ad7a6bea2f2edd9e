//! Credit transaction list filters

use super::model::CreditTransaction;
use crate::core::query::FilterContract;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Equality filters for listing credit transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditTransactionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influencer_id: Option<Uuid>,
}

impl FilterContract for CreditTransactionFilter {
    type Entity = CreditTransaction;

    const FIELDS: &'static [&'static str] = &["id", "user_id", "influencer_id"];

    fn conditions(&self) -> Vec<(&'static str, String)> {
        [
            ("id", self.id),
            ("user_id", self.user_id),
            ("influencer_id", self.influencer_id),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v.to_string())))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_orphan_fields() {
        assert!(CreditTransactionFilter::orphan_fields().is_empty());
    }

    #[test]
    fn test_conditions() {
        let influencer = Uuid::new_v4();
        let filter = CreditTransactionFilter {
            influencer_id: Some(influencer),
            ..Default::default()
        };
        assert_eq!(
            filter.conditions(),
            vec![("influencer_id", influencer.to_string())]
        );
    }
}
