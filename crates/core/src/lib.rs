//! # LIMS Core
//!
//! Validation and normalisation rules for the laboratory sample-management front end.
//!
//! This crate contains pure, synchronous operations only:
//! - Field normalisation between form values and the backend wire format ([`normalize`])
//! - Sample registration validation ([`sample`])
//! - User registration validation gated by the acting role ([`user`])
//! - The role-gated field policy shared by both validators ([`policy`])
//! - The sample lifecycle state machine ([`lifecycle`])
//!
//! **No I/O**: reading payloads from disk, environment lookups, and logging subscribers belong
//! in the `lims-cli` binary.

pub mod config;
pub mod constants;
pub mod error;
pub mod lifecycle;
pub mod normalize;
pub mod payload;
pub mod policy;
pub mod sample;
pub mod user;
pub mod validation;

pub use config::CoreConfig;
pub use error::{LimsError, LimsResult};
pub use lifecycle::{intake_status, SampleStatus};
pub use normalize::{
    backend_to_input_value, date_time_to_backend, water_type_code, BackendDateTime,
    DateTimeInput, FechaHoraMuestreo, WaterType,
};
pub use policy::{allowed_target_roles, required_extra_fields, ExtraField, Role};
pub use sample::{validate_sample, SampleRecord, TipoDeAgua};
pub use user::{validate_user_registration, UserRegistration};
pub use validation::FieldErrors;
