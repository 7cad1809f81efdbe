//! User registration payloads and their validation.
//!
//! Validation is gated by the role of the user performing the registration, which the caller
//! passes in explicitly. Only administrators register users through this form; anyone else
//! gets a single `auth` error and no field checks.
//!
//! Unlike the sample validator, the password rules stop at the first failing rule so the user
//! is told one thing to fix at a time.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::LimsResult;
use crate::payload::parse_json;
use crate::policy::{can_register, required_extra_fields, Role};
use crate::validation::{is_digits, is_email, is_phone_number, present, require, FieldErrors};

/// User registration payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRegistration {
    /// Role being created: `cliente`, `laboratorista`, `administrador` or `super_admin`.
    pub tipo: Option<String>,
    pub nombre: Option<String>,
    pub documento: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub tipo_cliente: Option<String>,
    #[serde(rename = "razonSocial")]
    pub razon_social: Option<String>,
    pub especialidad: Option<String>,
    #[serde(rename = "codigoSeguridad")]
    pub codigo_seguridad: Option<String>,
}

impl UserRegistration {
    /// Parses a registration payload from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LimsError::InvalidPayload`] if a field has an unexpected type.
    pub fn from_json(json_text: &str) -> LimsResult<Self> {
        parse_json(json_text)
    }

    /// Value of a role-specific extra field by its payload key.
    pub fn extra_field(&self, name: &str) -> Option<&str> {
        match name {
            FIELD_TIPO_CLIENTE => self.tipo_cliente.as_deref(),
            FIELD_RAZON_SOCIAL => self.razon_social.as_deref(),
            FIELD_ESPECIALIDAD => self.especialidad.as_deref(),
            FIELD_CODIGO_SEGURIDAD => self.codigo_seguridad.as_deref(),
            _ => None,
        }
    }

    /// Role being created, if `tipo` names one.
    pub fn target_role(&self) -> Option<Role> {
        self.tipo.as_deref().and_then(|t| Role::parse(t).ok())
    }
}

/// Returns the message of the first password rule `password` breaks, if any.
///
/// Rules are checked in order: length, uppercase letter, digit, special character.
pub fn password_problem(password: &str) -> Option<&'static str> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Some(MSG_PASSWORD_LONGITUD);
    }
    if !password.chars().any(char::is_uppercase) {
        return Some(MSG_PASSWORD_MAYUSCULA);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some(MSG_PASSWORD_NUMERO);
    }
    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        return Some(MSG_PASSWORD_ESPECIAL);
    }
    None
}

/// Validates a user registration performed by `acting_role`.
pub fn validate_user_registration(user: &UserRegistration, acting_role: Role) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if acting_role != Role::Administrador {
        tracing::debug!("registration attempted by {}", acting_role);
        errors.insert(FIELD_AUTH, MSG_SOLO_ADMINISTRADORES);
        return errors;
    }

    let target = require(
        &mut errors,
        FIELD_TIPO,
        user.tipo.as_deref(),
        MSG_TIPO_USUARIO_REQUERIDO,
    )
    .and_then(|tipo| Role::parse(tipo).ok());
    if present(user.tipo.as_deref()).is_some()
        && !target.is_some_and(|role| can_register(acting_role, role))
    {
        errors.insert(FIELD_TIPO, MSG_TIPO_USUARIO_NO_PERMITIDO);
    }

    require(
        &mut errors,
        FIELD_NOMBRE,
        user.nombre.as_deref(),
        MSG_NOMBRE_REQUERIDO,
    );
    if let Some(documento) = require(
        &mut errors,
        FIELD_DOCUMENTO,
        user.documento.as_deref(),
        MSG_DOCUMENTO_REQUERIDO,
    ) {
        if !is_digits(documento) {
            errors.insert(FIELD_DOCUMENTO, MSG_DOCUMENTO_NUMERICO);
        }
    }
    if let Some(telefono) = require(
        &mut errors,
        FIELD_TELEFONO,
        user.telefono.as_deref(),
        MSG_TELEFONO_REQUERIDO,
    ) {
        if !is_phone_number(telefono) {
            errors.insert(FIELD_TELEFONO, MSG_TELEFONO_INVALIDO);
        }
    }
    require(
        &mut errors,
        FIELD_DIRECCION,
        user.direccion.as_deref(),
        MSG_DIRECCION_REQUERIDA,
    );
    if let Some(email) = require(
        &mut errors,
        FIELD_EMAIL,
        user.email.as_deref(),
        MSG_EMAIL_REQUERIDO,
    ) {
        if !is_email(email) {
            errors.insert(FIELD_EMAIL, MSG_EMAIL_INVALIDO);
        }
    }

    // Role-specific rules follow the requested role even when it is flagged on `tipo`.
    if let Some(role) = target {
        if role != Role::Cliente {
            // Passwords are not trimmed: surrounding spaces are part of the secret.
            match user.password.as_deref().filter(|p| !p.is_empty()) {
                None => errors.insert(FIELD_PASSWORD, MSG_PASSWORD_REQUERIDA),
                Some(password) => {
                    if let Some(problem) = password_problem(password) {
                        errors.insert(FIELD_PASSWORD, problem);
                    }
                }
            }
        }

        for field in required_extra_fields(role).iter().filter(|f| f.enforced) {
            require(&mut errors, field.name, user.extra_field(field.name), field.message);
        }
    }

    tracing::debug!(errors = errors.len(), "validated user registration");
    errors
}
