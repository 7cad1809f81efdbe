//! Role-gated field policy.
//!
//! Two decision tables used by the validators and by any UI gating:
//! which roles an actor may register, and which extra fields each user type carries.
//! Both are plain data so that every consumer reads the same source.

use serde::{Deserialize, Serialize};

use crate::constants::{
    FIELD_CODIGO_SEGURIDAD, FIELD_ESPECIALIDAD, FIELD_RAZON_SOCIAL, FIELD_TIPO_CLIENTE,
    MSG_CAMPO_REQUERIDO, MSG_RAZON_SOCIAL_REQUERIDA, MSG_TIPO_CLIENTE_REQUERIDO,
};
use crate::error::{LimsError, LimsResult};
use crate::normalize::fold_key;

/// Application role of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Cliente,
    Laboratorista,
    Administrador,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Cliente,
        Role::Laboratorista,
        Role::Administrador,
        Role::SuperAdmin,
    ];

    /// Parses a role from its wire string (case-insensitive, `super admin` accepted).
    ///
    /// # Errors
    ///
    /// Returns [`LimsError::InvalidInput`] if the string does not name a role.
    pub fn parse(s: &str) -> LimsResult<Self> {
        match fold_key(s).replace(' ', "_").as_str() {
            "cliente" => Ok(Self::Cliente),
            "laboratorista" => Ok(Self::Laboratorista),
            "administrador" => Ok(Self::Administrador),
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            _ => Err(LimsError::InvalidInput(format!("Invalid role: {}", s))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cliente => "cliente",
            Self::Laboratorista => "laboratorista",
            Self::Administrador => "administrador",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Administrators and super administrators.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Administrador | Self::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An extra field a user type carries beyond the common registration fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtraField {
    /// Payload key.
    pub name: &'static str,
    /// Whether the validator requires it.
    pub enforced: bool,
    /// Message reported when an enforced field is missing.
    pub message: &'static str,
}

const SUPER_ADMIN_TARGETS: &[Role] = &[Role::Administrador];
const ADMINISTRADOR_TARGETS: &[Role] = &[Role::Cliente, Role::Laboratorista];
const NO_TARGETS: &[Role] = &[];

const CLIENTE_FIELDS: &[ExtraField] = &[
    ExtraField {
        name: FIELD_TIPO_CLIENTE,
        enforced: true,
        message: MSG_TIPO_CLIENTE_REQUERIDO,
    },
    ExtraField {
        name: FIELD_RAZON_SOCIAL,
        enforced: true,
        message: MSG_RAZON_SOCIAL_REQUERIDA,
    },
];
const LABORATORISTA_FIELDS: &[ExtraField] = &[ExtraField {
    name: FIELD_ESPECIALIDAD,
    enforced: false,
    message: MSG_CAMPO_REQUERIDO,
}];
const SUPER_ADMIN_FIELDS: &[ExtraField] = &[ExtraField {
    name: FIELD_CODIGO_SEGURIDAD,
    enforced: false,
    message: MSG_CAMPO_REQUERIDO,
}];
const NO_FIELDS: &[ExtraField] = &[];

/// Roles that `acting` may register.
pub fn allowed_target_roles(acting: Role) -> &'static [Role] {
    match acting {
        Role::SuperAdmin => SUPER_ADMIN_TARGETS,
        Role::Administrador => ADMINISTRADOR_TARGETS,
        Role::Cliente | Role::Laboratorista => NO_TARGETS,
    }
}

/// Whether `acting` may register a user of type `target`.
pub fn can_register(acting: Role, target: Role) -> bool {
    allowed_target_roles(acting).contains(&target)
}

/// Extra fields carried by users of type `tipo`.
pub fn required_extra_fields(tipo: Role) -> &'static [ExtraField] {
    match tipo {
        Role::Cliente => CLIENTE_FIELDS,
        Role::Laboratorista => LABORATORISTA_FIELDS,
        Role::Administrador => NO_FIELDS,
        Role::SuperAdmin => SUPER_ADMIN_FIELDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_roles_follow_hierarchy() {
        assert_eq!(
            allowed_target_roles(Role::SuperAdmin),
            &[Role::Administrador]
        );
        assert_eq!(
            allowed_target_roles(Role::Administrador),
            &[Role::Cliente, Role::Laboratorista]
        );
        assert!(allowed_target_roles(Role::Laboratorista).is_empty());
        assert!(allowed_target_roles(Role::Cliente).is_empty());
    }

    #[test]
    fn can_register_matches_table() {
        for acting in Role::ALL {
            for target in Role::ALL {
                assert_eq!(
                    can_register(acting, target),
                    allowed_target_roles(acting).contains(&target)
                );
            }
        }
        assert!(!can_register(Role::Administrador, Role::Administrador));
        assert!(can_register(Role::SuperAdmin, Role::Administrador));
    }

    #[test]
    fn only_client_extra_fields_are_enforced() {
        let enforced = |tipo| {
            required_extra_fields(tipo)
                .iter()
                .filter(|f| f.enforced)
                .map(|f| f.name)
                .collect::<Vec<_>>()
        };
        assert_eq!(enforced(Role::Cliente), vec!["tipo_cliente", "razonSocial"]);
        assert!(enforced(Role::Laboratorista).is_empty());
        assert!(enforced(Role::Administrador).is_empty());
        assert!(enforced(Role::SuperAdmin).is_empty());
        assert_eq!(required_extra_fields(Role::Laboratorista)[0].name, "especialidad");
        assert_eq!(required_extra_fields(Role::SuperAdmin)[0].name, "codigoSeguridad");
    }

    #[test]
    fn parses_roles_from_wire_strings() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()).expect("parse role"), role);
        }
        assert_eq!(Role::parse(" Administrador ").expect("parse"), Role::Administrador);
        assert_eq!(Role::parse("Super Admin").expect("parse"), Role::SuperAdmin);
        let err = Role::parse("invitado").expect_err("should reject unknown role");
        assert!(matches!(err, LimsError::InvalidInput(msg) if msg.contains("invitado")));
    }

    #[test]
    fn serde_uses_snake_case_wire_names() {
        let json = serde_json::to_string(&Role::SuperAdmin).expect("serialise");
        assert_eq!(json, "\"super_admin\"");
        let role: Role = serde_json::from_str("\"laboratorista\"").expect("deserialise");
        assert_eq!(role, Role::Laboratorista);
    }
}
