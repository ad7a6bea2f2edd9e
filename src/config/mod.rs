//! Application configuration loading

use crate::core::auth::AccessOperation;
use crate::core::error::{DashError, DashResult};
use crate::entities::schema_for;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Dashboard-wide settings: role names, tenant naming and enabled add-ons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Roles that own the tenant and may manage every record
    #[serde(alias = "ownerRoles")]
    pub owner_roles: Vec<String>,

    /// Roles of end customers, limited to reading
    #[serde(alias = "customerRoles")]
    pub customer_roles: Vec<String>,

    /// Roles allowed to create a tenant
    #[serde(alias = "tenantRoles", default)]
    pub tenant_roles: Vec<String>,

    /// Display name of a tenant (e.g. "Business")
    #[serde(alias = "tenantName")]
    pub tenant_name: String,

    #[serde(alias = "applicationName")]
    pub application_name: String,

    #[serde(alias = "addOns", default)]
    pub add_ons: Vec<String>,

    /// Per-entity policy overrides in their config form, keyed by entity
    /// then operation (e.g. `influencer: { delete: "role:Admin" }`)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub access: HashMap<String, HashMap<AccessOperation, String>>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> DashResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        tracing::debug!(
            application = %config.application_name,
            owner_roles = config.owner_roles.len(),
            customer_roles = config.customer_roles.len(),
            "loaded application config"
        );
        Ok(config)
    }

    /// The settings the dashboard ships with
    pub fn default_config() -> Self {
        Self {
            owner_roles: vec!["Business Owner".to_string()],
            customer_roles: vec!["End Customer".to_string()],
            tenant_roles: vec!["Business Owner".to_string()],
            tenant_name: "Business".to_string(),
            application_name: "Influencer Dash".to_string(),
            add_ons: Vec::new(),
            access: HashMap::new(),
        }
    }

    pub fn is_owner_role(&self, role: &str) -> bool {
        self.owner_roles.iter().any(|r| r == role)
    }

    pub fn is_customer_role(&self, role: &str) -> bool {
        self.customer_roles.iter().any(|r| r == role)
    }

    /// Whether an add-on is enabled
    pub fn has_add_on(&self, add_on: &str) -> bool {
        self.add_ons.iter().any(|a| a == add_on)
    }

    fn check(&self) -> DashResult<()> {
        if self.owner_roles.is_empty() {
            return Err(DashError::Config(
                "at least one owner role is required".to_string(),
            ));
        }
        if self.application_name.trim().is_empty() {
            return Err(DashError::Config(
                "application_name must not be empty".to_string(),
            ));
        }
        if let Some(entity) = self.access.keys().find(|e| schema_for(e).is_none()) {
            return Err(DashError::Config(format!(
                "access overrides name unknown entity '{}'",
                entity
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
