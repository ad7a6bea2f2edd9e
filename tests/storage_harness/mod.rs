//! Shared test harness for storage backend testing
//!
//! Provides builders for the dashboard entities and a few assertion helpers.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_service_tests;

use influencer_dash::core::field::FieldValue;
use influencer_dash::entities::{
    CreditTransaction, CreditTransactionDraft, Influencer, InfluencerDraft, User, UserDraft,
};
use serde_json::{Value, json};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

/// Build an influencer record with the given searchable fields
pub fn create_test_influencer(name: &str, genre: &str, language: &str, followers: u64) -> Influencer {
    Influencer::from_draft(InfluencerDraft {
        name: name.to_string(),
        location: "Los Angeles".to_string(),
        language: language.to_string(),
        genre: genre.to_string(),
        followers,
        social_media_links: format!("https://social.example/{}", name.to_lowercase()),
    })
    .expect("test influencer is valid")
}

/// Five influencers with distinct names and follower counts
pub fn sample_batch() -> Vec<Influencer> {
    vec![
        create_test_influencer("Alice", "Pop", "EN", 1200),
        create_test_influencer("Bruno", "Rock", "PT", 800),
        create_test_influencer("Chen", "Pop", "ZH", 15000),
        create_test_influencer("Dana", "Jazz", "EN", 300),
        create_test_influencer("Emil", "Rock", "DE", 4200),
    ]
}

pub fn create_test_user(email: &str) -> User {
    User::from_draft(UserDraft {
        email: email.to_string(),
        first_name: Some("Test".to_string()),
        last_name: None,
        roq_user_id: format!("roq-{}", Uuid::new_v4()),
        tenant_id: "tenant-acme".to_string(),
    })
    .expect("test user is valid")
}

pub fn create_test_transaction(user_id: Uuid, influencer_id: Uuid, credits: f64) -> CreditTransaction {
    CreditTransaction::from_draft(CreditTransactionDraft {
        user_id,
        credits_spent: credits,
        influencer_id,
    })
    .expect("test transaction is valid")
}

// ---------------------------------------------------------------------------
// Submission payloads
// ---------------------------------------------------------------------------

/// A create payload that passes influencer validation
pub fn influencer_payload(name: &str) -> Value {
    json!({
        "name": name,
        "location": "LA",
        "language": "EN",
        "genre": "Pop",
        "followers": 1000,
        "social_media_links": "http://x"
    })
}

pub fn user_payload(email: &str) -> Value {
    json!({
        "email": email,
        "first_name": "Jane",
        "roq_user_id": "roq-1",
        "tenant_id": "tenant-acme"
    })
}

pub fn transaction_payload(user_id: Uuid, influencer_id: Uuid, credits: f64) -> Value {
    json!({
        "user_id": user_id.to_string(),
        "influencer_id": influencer_id.to_string(),
        "credits_spent": credits
    })
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

pub fn assert_names(list: &[Influencer], expected: &[&str]) {
    let names: Vec<&str> = list.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, expected);
}

pub fn assert_field_value_string(fv: &FieldValue, expected: &str) {
    match fv {
        FieldValue::String(s) => assert_eq!(s, expected),
        other => panic!("Expected FieldValue::String(\"{}\"), got {:?}", expected, other),
    }
}
