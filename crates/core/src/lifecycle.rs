//! Sample lifecycle.
//!
//! A sample is registered by an administrator as `Recibida` (or `Rechazada` when refused at
//! intake), moves to `En análisis` when results start being entered, waits in
//! `Pendiente de resultados` until an administrator verifies them, and ends as `Finalizada`.
//! `Rechazada` and `Finalizada` are terminal.
//!
//! Moves are checked against a fixed transition table that also names the roles allowed to
//! perform each move. Verification cannot be skipped: the only way into `Finalizada` is from
//! `Pendiente de resultados`, by an administrator.

use serde::{Deserialize, Serialize};

use crate::error::{LimsError, LimsResult};
use crate::normalize::fold_key;
use crate::policy::Role;

/// Lifecycle status of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleStatus {
    /// Quote requested; not yet received at the laboratory.
    #[serde(rename = "En Cotización")]
    EnCotizacion,
    #[serde(rename = "Recibida")]
    Recibida,
    #[serde(rename = "En análisis")]
    EnAnalisis,
    /// Results entered and awaiting administrator verification.
    #[serde(rename = "Pendiente de resultados")]
    PendienteResultados,
    #[serde(rename = "Finalizada")]
    Finalizada,
    #[serde(rename = "Rechazada")]
    Rechazada,
}

/// Who may perform a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Actor {
    Admin,
    Staff,
}

impl Actor {
    fn permits(self, role: Role) -> bool {
        match self {
            Actor::Admin => role.is_admin(),
            Actor::Staff => role.is_admin() || role == Role::Laboratorista,
        }
    }
}

/// Lifecycle moves other than rejection, which is allowed from any non-terminal status.
const TRANSITIONS: &[(SampleStatus, SampleStatus, Actor)] = &[
    (SampleStatus::EnCotizacion, SampleStatus::Recibida, Actor::Admin),
    (SampleStatus::Recibida, SampleStatus::EnAnalisis, Actor::Staff),
    (SampleStatus::EnAnalisis, SampleStatus::PendienteResultados, Actor::Staff),
    (SampleStatus::PendienteResultados, SampleStatus::EnAnalisis, Actor::Admin),
    (SampleStatus::PendienteResultados, SampleStatus::Finalizada, Actor::Admin),
];

impl SampleStatus {
    pub const ALL: [SampleStatus; 6] = [
        SampleStatus::EnCotizacion,
        SampleStatus::Recibida,
        SampleStatus::EnAnalisis,
        SampleStatus::PendienteResultados,
        SampleStatus::Finalizada,
        SampleStatus::Rechazada,
    ];

    /// Parses a status from its display string (case- and accent-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`LimsError::InvalidInput`] if the string does not name a status.
    pub fn parse(s: &str) -> LimsResult<Self> {
        let key = fold_key(s);
        Self::ALL
            .into_iter()
            .find(|status| fold_key(status.as_str()) == key)
            .ok_or_else(|| LimsError::InvalidInput(format!("Invalid sample status: {}", s)))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnCotizacion => "En Cotización",
            Self::Recibida => "Recibida",
            Self::EnAnalisis => "En análisis",
            Self::PendienteResultados => "Pendiente de resultados",
            Self::Finalizada => "Finalizada",
            Self::Rechazada => "Rechazada",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalizada | Self::Rechazada)
    }

    fn rule(self, to: SampleStatus) -> Option<Actor> {
        if to == SampleStatus::Rechazada && !self.is_terminal() {
            return Some(Actor::Admin);
        }
        TRANSITIONS
            .iter()
            .find(|(from, target, _)| *from == self && *target == to)
            .map(|(_, _, actor)| *actor)
    }

    /// Moves a sample to `to` on behalf of `role`.
    ///
    /// # Errors
    ///
    /// - [`LimsError::TerminalStatus`] if the sample is already `Finalizada` or `Rechazada`
    /// - [`LimsError::InvalidTransition`] if the move is not in the lifecycle
    /// - [`LimsError::TransitionNotPermitted`] if `role` may not perform the move
    pub fn transition(self, to: SampleStatus, role: Role) -> LimsResult<SampleStatus> {
        if self.is_terminal() {
            tracing::debug!("refused move out of terminal status {}", self);
            return Err(LimsError::TerminalStatus(self));
        }

        let Some(actor) = self.rule(to) else {
            tracing::debug!("refused move {} -> {}", self, to);
            return Err(LimsError::InvalidTransition { from: self, to });
        };

        if !actor.permits(role) {
            tracing::warn!("role {} attempted move {} -> {}", role, self, to);
            return Err(LimsError::TransitionNotPermitted {
                role,
                from: self,
                to,
            });
        }

        Ok(to)
    }

    /// Statuses `role` may move a sample to from `self`, in lifecycle order.
    pub fn allowed_transitions(self, role: Role) -> Vec<SampleStatus> {
        if self.is_terminal() {
            return Vec::new();
        }
        Self::ALL
            .into_iter()
            .filter(|to| self.rule(*to).is_some_and(|actor| actor.permits(role)))
            .collect()
    }
}

impl std::fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a newly registered sample.
///
/// # Errors
///
/// Returns [`LimsError::IntakeNotPermitted`] unless `role` is an administrator.
pub fn intake_status(role: Role, rejected: bool) -> LimsResult<SampleStatus> {
    if !role.is_admin() {
        return Err(LimsError::IntakeNotPermitted(role));
    }
    Ok(if rejected {
        SampleStatus::Rechazada
    } else {
        SampleStatus::Recibida
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_reaches_finalizada() {
        let status = intake_status(Role::Administrador, false).expect("intake");
        assert_eq!(status, SampleStatus::Recibida);

        let status = status
            .transition(SampleStatus::EnAnalisis, Role::Laboratorista)
            .expect("start analysis");
        let status = status
            .transition(SampleStatus::PendienteResultados, Role::Laboratorista)
            .expect("submit results");
        let status = status
            .transition(SampleStatus::Finalizada, Role::Administrador)
            .expect("verify");
        assert_eq!(status, SampleStatus::Finalizada);
    }

    #[test]
    fn intake_requires_admin() {
        assert_eq!(
            intake_status(Role::Administrador, true).expect("intake"),
            SampleStatus::Rechazada
        );
        let err = intake_status(Role::Laboratorista, false).expect_err("should refuse");
        assert!(matches!(err, LimsError::IntakeNotPermitted(Role::Laboratorista)));
    }

    #[test]
    fn verification_cannot_be_skipped() {
        for from in [SampleStatus::Recibida, SampleStatus::EnAnalisis] {
            let err = from
                .transition(SampleStatus::Finalizada, Role::Administrador)
                .expect_err("should refuse skip");
            assert!(matches!(err, LimsError::InvalidTransition { .. }), "{from}");
        }
    }

    #[test]
    fn only_admin_verifies() {
        let err = SampleStatus::PendienteResultados
            .transition(SampleStatus::Finalizada, Role::Laboratorista)
            .expect_err("lab cannot verify");
        assert!(matches!(
            err,
            LimsError::TransitionNotPermitted {
                role: Role::Laboratorista,
                ..
            }
        ));
        assert!(SampleStatus::PendienteResultados
            .transition(SampleStatus::Finalizada, Role::SuperAdmin)
            .is_ok());
    }

    #[test]
    fn terminal_statuses_do_not_move() {
        for from in [SampleStatus::Finalizada, SampleStatus::Rechazada] {
            let err = from
                .transition(SampleStatus::EnAnalisis, Role::Administrador)
                .expect_err("terminal");
            assert!(matches!(err, LimsError::TerminalStatus(s) if s == from));
            assert!(from.allowed_transitions(Role::Administrador).is_empty());
        }
    }

    #[test]
    fn rejection_is_admin_only_from_any_open_status() {
        for from in SampleStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert_eq!(
                from.transition(SampleStatus::Rechazada, Role::Administrador)
                    .expect("reject"),
                SampleStatus::Rechazada
            );
            assert!(from
                .transition(SampleStatus::Rechazada, Role::Laboratorista)
                .is_err());
        }
    }

    #[test]
    fn clients_cannot_move_samples() {
        for from in SampleStatus::ALL {
            assert!(from.allowed_transitions(Role::Cliente).is_empty(), "{from}");
        }
    }

    #[test]
    fn allowed_transitions_follow_role() {
        assert_eq!(
            SampleStatus::Recibida.allowed_transitions(Role::Laboratorista),
            vec![SampleStatus::EnAnalisis]
        );
        assert_eq!(
            SampleStatus::Recibida.allowed_transitions(Role::Administrador),
            vec![SampleStatus::EnAnalisis, SampleStatus::Rechazada]
        );
        assert_eq!(
            SampleStatus::PendienteResultados.allowed_transitions(Role::Administrador),
            vec![
                SampleStatus::EnAnalisis,
                SampleStatus::Finalizada,
                SampleStatus::Rechazada
            ]
        );
        assert_eq!(
            SampleStatus::EnCotizacion.allowed_transitions(Role::Administrador),
            vec![SampleStatus::Recibida, SampleStatus::Rechazada]
        );
    }

    #[test]
    fn parses_and_serialises_display_strings() {
        for status in SampleStatus::ALL {
            assert_eq!(SampleStatus::parse(status.as_str()).expect("parse"), status);
            let json = serde_json::to_string(&status).expect("serialise");
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(
            SampleStatus::parse("en analisis").expect("folded parse"),
            SampleStatus::EnAnalisis
        );
        assert!(SampleStatus::parse("Perdida").is_err());
    }
}
