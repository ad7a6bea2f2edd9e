//! Domain entities of the dashboard: users, influencers and the credit
//! transactions linking them.

pub mod credit_transaction;
pub mod influencer;
pub mod macros;
pub mod user;

pub use credit_transaction::{
    CreditTransaction, CreditTransactionDraft, CreditTransactionFilter, CreditTransactionPatch,
};
pub use influencer::{Influencer, InfluencerDraft, InfluencerFilter, InfluencerPatch};
pub use user::{User, UserDraft, UserFilter, UserPatch};

use crate::core::field::EntitySchema;

/// Every entity schema known to the dashboard
pub fn schemas() -> [&'static EntitySchema; 3] {
    [
        &user::USER_SCHEMA,
        &influencer::INFLUENCER_SCHEMA,
        &credit_transaction::CREDIT_TRANSACTION_SCHEMA,
    ]
}

/// Look up a schema by its canonical entity key
pub fn schema_for(entity: &str) -> Option<&'static EntitySchema> {
    schemas().into_iter().find(|s| s.entity == entity)
}
