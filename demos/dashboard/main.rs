//! Walk through the dashboard pages: create records, view an influencer with
//! its transactions, and check what an end customer is allowed to do.

use anyhow::Result;
use influencer_dash::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_yaml_file("config/app.yaml")
        .unwrap_or_else(|_| AppConfig::default_config());
    println!("{}\n", config.application_name);

    let api = DashboardApi::in_memory();

    let owner = api
        .create_user(json!({
            "email": "owner@example.com",
            "first_name": "Olivia",
            "roq_user_id": "roq-owner",
            "tenant_id": "tenant-1"
        }))
        .await?;

    let jane = api
        .create_influencer(json!({
            "name": "Jane",
            "location": "LA",
            "language": "EN",
            "genre": "Pop",
            "followers": 1000,
            "social_media_links": "https://social.example/jane"
        }))
        .await?;

    for credits in [10.0, 25.5] {
        api.create_credit_transaction(json!({
            "user_id": owner.id.to_string(),
            "influencer_id": jane.id.to_string(),
            "credits_spent": credits
        }))
        .await?;
    }

    // A submission the create form would reject
    match api
        .create_influencer(json!({ "name": "", "followers": -1 }))
        .await
    {
        Err(DashError::Validation(errors)) => {
            println!("Rejected submission:");
            for (field, message) in errors.iter() {
                println!("  {field}: {message}");
            }
        }
        other => println!("Unexpected result: {other:?}"),
    }

    let view = api
        .get_influencer_by_id(
            &jane.id,
            &GetQuery {
                relations: vec![
                    "credit_transaction".to_string(),
                    "credit_transaction.count".to_string(),
                ],
                ..Default::default()
            },
        )
        .await?;
    println!("\nInfluencer view:\n{}", serde_json::to_string_pretty(&view)?);

    let checker = RoleAccessChecker::from_config(&config);
    let customer = AuthContext::user("roq-customer", &["End Customer"]);
    for op in AccessOperation::ALL {
        let verdict = match authorize_route(&checker, &customer, "influencers", op) {
            Ok(entity) => format!("allowed on {entity}"),
            Err(e) => e.to_string(),
        };
        println!("End Customer {op}: {verdict}");
    }

    Ok(())
}
