//! Route resolution and role-based access checks working together

use influencer_dash::prelude::*;
use influencer_dash::routes::mapped_routes;

mod route_resolution {
    use super::*;

    #[test]
    fn test_every_mapping() {
        assert_eq!(
            mapped_routes(),
            vec![
                ("businesses", "business"),
                ("credit-transactions", "credit_transaction"),
                ("influencers", "influencer"),
                ("users", "user"),
            ]
        );
        for (segment, entity) in mapped_routes() {
            assert_eq!(convert_route_to_entity(segment), entity);
        }
    }

    #[test]
    fn test_unmapped_segments_pass_through() {
        for segment in ["unknown-resource", "influencer", "credit_transactions", "/users", ""] {
            assert_eq!(convert_route_to_entity(segment), segment);
            assert!(resolve_route_strict(segment).is_err());
        }
    }

    #[test]
    fn test_routes_match_entity_schemas() {
        assert_eq!(convert_route_to_entity(Influencer::resource_name()), "influencer");
        assert_eq!(
            convert_route_to_entity(CreditTransaction::resource_name()),
            CreditTransaction::resource_name_singular()
        );
        assert_eq!(convert_route_to_entity(User::resource_name()), "user");
    }
}

mod role_access {
    use super::*;

    fn checker() -> RoleAccessChecker {
        RoleAccessChecker::from_config(&AppConfig::default_config())
    }

    #[test]
    fn test_owner_may_do_everything() {
        let owner = AuthContext::user("roq-1", &["Business Owner"]);
        for segment in ["influencers", "credit-transactions", "users"] {
            for op in AccessOperation::ALL {
                assert!(authorize_route(&checker(), &owner, segment, op).is_ok());
            }
        }
    }

    #[test]
    fn test_customer_may_only_read() {
        let customer = AuthContext::User {
            user_id: "roq-2".into(),
            tenant_id: Some("tenant-acme".into()),
            roles: vec!["End Customer".into()],
        };
        assert_eq!(
            authorize_route(&checker(), &customer, "influencers", AccessOperation::Read).unwrap(),
            "influencer"
        );
        for op in [
            AccessOperation::Create,
            AccessOperation::Update,
            AccessOperation::Delete,
        ] {
            let err = authorize_route(&checker(), &customer, "influencers", op).unwrap_err();
            assert_eq!(err.error_code(), "FORBIDDEN");
        }
    }

    #[test]
    fn test_anonymous_is_denied() {
        for op in AccessOperation::ALL {
            assert!(authorize_route(&checker(), &AuthContext::Anonymous, "users", op).is_err());
        }
    }

    #[test]
    fn test_unknown_role_is_denied() {
        let stranger = AuthContext::user("roq-3", &["Auditor"]);
        assert!(!checker().check(&stranger, "influencer", AccessOperation::Read));
    }

    #[test]
    fn test_custom_roles_from_config() {
        let config = AppConfig::from_yaml_str(
            r#"
owner_roles: [Agency Admin]
customer_roles: [Brand]
tenant_name: Agency
application_name: Reach
"#,
        )
        .unwrap();
        let checker = RoleAccessChecker::from_config(&config);
        let admin = AuthContext::user("roq-1", &["Agency Admin"]);
        let old_owner = AuthContext::user("roq-2", &["Business Owner"]);
        assert!(checker.check(&admin, "user", AccessOperation::Delete));
        assert!(!checker.check(&old_owner, "user", AccessOperation::Read));
    }
}
