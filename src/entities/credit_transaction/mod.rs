//! Credit transaction entity

pub mod filter;
pub mod model;

pub use filter::CreditTransactionFilter;
pub use model::{
    CREDIT_TRANSACTION_SCHEMA, CreditTransaction, CreditTransactionCount, CreditTransactionDraft,
    CreditTransactionPatch,
};
