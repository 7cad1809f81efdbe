//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core operations. The acting role in particular is never read from ambient
//! session state by the validators; callers hand it over explicitly.

use crate::error::{LimsError, LimsResult};
use crate::policy::Role;

/// Role assumed when no acting role is configured.
pub const DEFAULT_ACTING_ROLE: Role = Role::Cliente;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    acting_role: Role,
    operator: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`LimsError::InvalidInput`] if `operator` is blank.
    pub fn new(acting_role: Role, operator: String) -> LimsResult<Self> {
        let operator = operator.trim().to_string();
        if operator.is_empty() {
            return Err(LimsError::InvalidInput("operator cannot be empty".into()));
        }

        Ok(Self {
            acting_role,
            operator,
        })
    }

    pub fn acting_role(&self) -> Role {
        self.acting_role
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Returns a copy acting as `role`.
    pub fn with_acting_role(&self, role: Role) -> Self {
        Self {
            acting_role: role,
            ..self.clone()
        }
    }
}

/// Parse the acting role from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_ACTING_ROLE`].
pub fn acting_role_from_env_value(value: Option<String>) -> LimsResult<Role> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| Role::parse(&v)).transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_ACTING_ROLE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acting_role_defaults_to_least_privilege() {
        assert_eq!(acting_role_from_env_value(None).expect("default"), Role::Cliente);
        assert_eq!(
            acting_role_from_env_value(Some("  ".into())).expect("default"),
            Role::Cliente
        );
    }

    #[test]
    fn acting_role_parses_configured_value() {
        assert_eq!(
            acting_role_from_env_value(Some("administrador".into())).expect("parse"),
            Role::Administrador
        );
        let err = acting_role_from_env_value(Some("root".into())).expect_err("should reject");
        assert!(matches!(err, LimsError::InvalidInput(msg) if msg.contains("root")));
    }

    #[test]
    fn config_rejects_blank_operator() {
        let err = CoreConfig::new(Role::Administrador, " ".into()).expect_err("should reject");
        assert!(matches!(err, LimsError::InvalidInput(msg) if msg.contains("operator")));
    }

    #[test]
    fn config_can_switch_acting_role() {
        let cfg = CoreConfig::new(Role::Cliente, " Ana ".into()).expect("config");
        assert_eq!(cfg.operator(), "Ana");
        let admin = cfg.with_acting_role(Role::Administrador);
        assert_eq!(admin.acting_role(), Role::Administrador);
        assert_eq!(admin.operator(), "Ana");
        assert_eq!(cfg.acting_role(), Role::Cliente);
    }
}
