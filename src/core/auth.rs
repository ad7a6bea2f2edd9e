//! Role-based access control for dashboard operations
//!
//! Identity extraction happens outside this crate; callers hand in an
//! `AuthContext` and the entity key of the page or record being touched.

use crate::config::AppConfig;
use crate::core::error::{DashError, DashResult};
use crate::routes::convert_route_to_entity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An operation a caller wants to perform on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessOperation {
    Create,
    Read,
    Update,
    Delete,
}

impl AccessOperation {
    pub const ALL: [AccessOperation; 4] = [
        AccessOperation::Create,
        AccessOperation::Read,
        AccessOperation::Update,
        AccessOperation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessOperation::Create => "create",
            AccessOperation::Read => "read",
            AccessOperation::Update => "update",
            AccessOperation::Delete => "delete",
        }
    }

    /// Whether the operation modifies data
    pub fn is_write(&self) -> bool {
        !matches!(self, AccessOperation::Read)
    }
}

impl fmt::Display for AccessOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization context supplied by the identity layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Authenticated user
    User {
        user_id: String,
        tenant_id: Option<String>,
        roles: Vec<String>,
    },

    /// No authentication
    Anonymous,
}

impl AuthContext {
    /// Authenticated user with the given roles and no tenant
    pub fn user(user_id: impl Into<String>, roles: &[&str]) -> Self {
        AuthContext::User {
            user_id: user_id.into(),
            tenant_id: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn tenant_id(&self) -> Option<&str> {
        match self {
            AuthContext::User { tenant_id, .. } => tenant_id.as_deref(),
            AuthContext::Anonymous => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthContext::User { user_id, .. } => Some(user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn roles(&self) -> &[String] {
        match self {
            AuthContext::User { roles, .. } => roles,
            AuthContext::Anonymous => &[],
        }
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// No authentication required
    Public,

    /// Any authenticated user
    Authenticated,

    /// User must have one of these roles
    HasRole(Vec<String>),

    /// Every policy must pass
    And(Vec<AccessPolicy>),

    /// At least one policy must pass
    Or(Vec<AccessPolicy>),

    /// Nobody
    Deny,
}

impl AccessPolicy {
    /// Check if an auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AccessPolicy::Public => true,

            AccessPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),

            AccessPolicy::HasRole(required) => match context {
                AuthContext::User { roles, .. } => required.iter().any(|r| roles.contains(r)),
                AuthContext::Anonymous => false,
            },

            AccessPolicy::And(policies) => policies.iter().all(|p| p.check(context)),

            AccessPolicy::Or(policies) => policies.iter().any(|p| p.check(context)),

            AccessPolicy::Deny => false,
        }
    }

    /// Parse a policy from its config form
    ///
    /// Accepts `public`, `authenticated`, `deny` and `role:<name>`; anything
    /// else falls back to `authenticated`.
    pub fn parse_policy(s: &str) -> Self {
        match s {
            "public" => AccessPolicy::Public,
            "authenticated" => AccessPolicy::Authenticated,
            "deny" => AccessPolicy::Deny,
            s => match s.strip_prefix("role:") {
                Some(role) => AccessPolicy::HasRole(vec![role.to_string()]),
                None => AccessPolicy::Authenticated,
            },
        }
    }
}

static DENY_ALL: AccessPolicy = AccessPolicy::Deny;

/// Decides whether a context may perform an operation on an entity
pub trait AccessChecker: Send + Sync {
    fn check(&self, context: &AuthContext, entity: &str, operation: AccessOperation) -> bool;
}

/// Policy table derived from the application's role configuration.
///
/// Owner roles may perform every operation and customer roles may read.
/// Anonymous contexts are denied by the defaults. Per-entity overrides,
/// from `AppConfig::access` or `with_override`, replace the default policy
/// for that entity and operation.
#[derive(Debug, Clone)]
pub struct RoleAccessChecker {
    defaults: HashMap<AccessOperation, AccessPolicy>,
    overrides: HashMap<(String, AccessOperation), AccessPolicy>,
}

impl RoleAccessChecker {
    pub fn from_config(config: &AppConfig) -> Self {
        let owners = AccessPolicy::HasRole(config.owner_roles.clone());
        let readers = AccessPolicy::Or(vec![
            owners.clone(),
            AccessPolicy::HasRole(config.customer_roles.clone()),
        ]);

        let defaults = AccessOperation::ALL
            .into_iter()
            .map(|op| {
                let policy = if op.is_write() {
                    owners.clone()
                } else {
                    readers.clone()
                };
                (op, AccessPolicy::And(vec![AccessPolicy::Authenticated, policy]))
            })
            .collect();

        let overrides = config
            .access
            .iter()
            .flat_map(|(entity, operations)| {
                operations.iter().map(move |(op, policy)| {
                    ((entity.clone(), *op), AccessPolicy::parse_policy(policy))
                })
            })
            .collect();

        Self {
            defaults,
            overrides,
        }
    }

    /// Replace the policy for one entity and operation
    pub fn with_override(
        mut self,
        entity: impl Into<String>,
        operation: AccessOperation,
        policy: AccessPolicy,
    ) -> Self {
        self.overrides.insert((entity.into(), operation), policy);
        self
    }

    /// The policy that applies to an entity and operation
    pub fn policy_for(&self, entity: &str, operation: AccessOperation) -> &AccessPolicy {
        self.overrides
            .get(&(entity.to_string(), operation))
            .or_else(|| self.defaults.get(&operation))
            .unwrap_or(&DENY_ALL)
    }
}

impl AccessChecker for RoleAccessChecker {
    fn check(&self, context: &AuthContext, entity: &str, operation: AccessOperation) -> bool {
        self.policy_for(entity, operation).check(context)
    }
}

/// Resolve a route segment and check the operation against it.
///
/// Returns the resolved entity key, or `Forbidden` when the checker denies
/// the operation.
pub fn authorize_route<'a>(
    checker: &dyn AccessChecker,
    context: &AuthContext,
    segment: &'a str,
    operation: AccessOperation,
) -> DashResult<&'a str> {
    let entity = convert_route_to_entity(segment);
    if checker.check(context, entity, operation) {
        Ok(entity)
    } else {
        tracing::warn!(
            entity = %entity,
            operation = %operation,
            user_id = context.user_id().unwrap_or("anonymous"),
            "access denied"
        );
        Err(DashError::Forbidden {
            entity: entity.to_string(),
            operation,
        })
    }
}
