//! Sample registration payloads and their validation.
//!
//! A [`SampleRecord`] mirrors the registration form while it is being filled in, so every
//! field is optional and nested objects may be partially present. [`validate_sample`] runs
//! every check independently and reports all failing fields at once.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::LimsResult;
use crate::lifecycle::SampleStatus;
use crate::normalize::{
    fold_key, AnalysisType, FechaHoraMuestreo, ResidualSubtype,
    SamplingType, WaterType,
};
use crate::payload::parse_json;
use crate::validation::{is_digits, present, require, FieldErrors};

/// Water classification block of a sample.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipoDeAgua {
    /// `potable`, `natural`, `residual` or `otra`.
    pub tipo: Option<String>,
    /// `Doméstica` / `No Doméstica`; required for residual water.
    pub subtipo: Option<String>,
    /// Free-text description; required for `otra`.
    pub descripcion: Option<String>,
}

/// Sample registration payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SampleRecord {
    /// Document number of the requesting client.
    pub documento: Option<String>,
    pub tipo_de_agua: Option<TipoDeAgua>,
    pub tipo_muestreo: Option<String>,
    pub lugar_muestreo: Option<String>,
    pub fecha_hora_muestreo: Option<FechaHoraMuestreo>,
    pub tipo_analisis: Option<String>,
    pub identificacion_muestra: Option<String>,
    pub plan_muestreo: Option<String>,
    pub condiciones_ambientales: Option<String>,
    pub preservacion_muestra: Option<String>,
    pub preservacion_muestra_otra: Option<String>,
    pub analisis_seleccionados: Option<Vec<String>>,
    /// Lifecycle status; blank is treated as absent.
    #[serde(deserialize_with = "deserialize_estado")]
    pub estado: Option<SampleStatus>,
}

fn deserialize_estado<'de, D>(deserializer: D) -> Result<Option<SampleStatus>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match present(raw.as_deref()) {
        Some(estado) => SampleStatus::parse(estado)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl SampleRecord {
    /// Parses a sample payload from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LimsError::InvalidPayload`] if a field has an unexpected type.
    pub fn from_json(json_text: &str) -> LimsResult<Self> {
        parse_json(json_text)
    }

    /// Water type as a canonical variant, if it is present and recognised.
    pub fn water_type(&self) -> Option<WaterType> {
        self.tipo_de_agua
            .as_ref()
            .and_then(|t| t.tipo.as_deref())
            .and_then(WaterType::parse)
    }
}

/// Validates a sample registration payload.
///
/// Every check runs; an empty map means the sample is valid.
pub fn validate_sample(sample: &SampleRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(documento) = require(
        &mut errors,
        FIELD_DOCUMENTO,
        sample.documento.as_deref(),
        MSG_DOCUMENTO_REQUERIDO,
    ) {
        if !is_digits(documento) {
            errors.insert(FIELD_DOCUMENTO, MSG_DOCUMENTO_NUMERICO);
        }
    }

    check_water_type(&mut errors, sample.tipo_de_agua.as_ref());

    if let Some(tipo) = require(
        &mut errors,
        FIELD_TIPO_MUESTREO,
        sample.tipo_muestreo.as_deref(),
        MSG_TIPO_MUESTREO_REQUERIDO,
    ) {
        if SamplingType::parse(tipo).is_none() {
            errors.insert(FIELD_TIPO_MUESTREO, MSG_TIPO_MUESTREO_INVALIDO);
        }
    }
    require(
        &mut errors,
        FIELD_LUGAR_MUESTREO,
        sample.lugar_muestreo.as_deref(),
        MSG_LUGAR_MUESTREO_REQUERIDO,
    );

    // Absent and malformed values share one message.
    if !sample
        .fecha_hora_muestreo
        .as_ref()
        .is_some_and(FechaHoraMuestreo::is_complete)
    {
        errors.insert(FIELD_FECHA_HORA_MUESTREO, MSG_FECHA_HORA_REQUERIDA);
    }

    if let Some(tipo) = require(
        &mut errors,
        FIELD_TIPO_ANALISIS,
        sample.tipo_analisis.as_deref(),
        MSG_TIPO_ANALISIS_REQUERIDO,
    ) {
        if AnalysisType::parse(tipo).is_none() {
            errors.insert(FIELD_TIPO_ANALISIS, MSG_TIPO_ANALISIS_INVALIDO);
        }
    }

    for (field, value, message) in [
        (
            FIELD_IDENTIFICACION_MUESTRA,
            &sample.identificacion_muestra,
            MSG_IDENTIFICACION_REQUERIDA,
        ),
        (
            FIELD_PLAN_MUESTREO,
            &sample.plan_muestreo,
            MSG_PLAN_MUESTREO_REQUERIDO,
        ),
        (
            FIELD_CONDICIONES_AMBIENTALES,
            &sample.condiciones_ambientales,
            MSG_CONDICIONES_REQUERIDAS,
        ),
    ] {
        require(&mut errors, field, value.as_deref(), message);
    }

    if let Some(preservacion) = require(
        &mut errors,
        FIELD_PRESERVACION_MUESTRA,
        sample.preservacion_muestra.as_deref(),
        MSG_PRESERVACION_REQUERIDA,
    ) {
        if fold_key(preservacion) == fold_key(PRESERVACION_OTRO) {
            require(
                &mut errors,
                FIELD_PRESERVACION_MUESTRA_OTRA,
                sample.preservacion_muestra_otra.as_deref(),
                MSG_PRESERVACION_OTRA_REQUERIDA,
            );
        }
    }

    let has_analysis = sample
        .analisis_seleccionados
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|a| present(Some(a.as_str())).is_some());
    if !has_analysis {
        errors.insert(FIELD_ANALISIS_SELECCIONADOS, MSG_ANALISIS_REQUERIDOS);
    }

    tracing::debug!(errors = errors.len(), "validated sample");
    errors
}

fn check_water_type(errors: &mut FieldErrors, tipo_de_agua: Option<&TipoDeAgua>) {
    let Some(tipo) = require(
        errors,
        FIELD_TIPO_DE_AGUA,
        tipo_de_agua.and_then(|t| t.tipo.as_deref()),
        MSG_TIPO_AGUA_REQUERIDO,
    ) else {
        return;
    };
    // `tipo` being present implies the block is present.
    let Some(block) = tipo_de_agua else {
        return;
    };

    match WaterType::parse(tipo) {
        Some(WaterType::Residual) => {
            if let Some(subtipo) = require(
                errors,
                FIELD_TIPO_AGUA_RESIDUAL,
                block.subtipo.as_deref(),
                MSG_SUBTIPO_RESIDUAL_REQUERIDO,
            ) {
                if ResidualSubtype::parse(subtipo).is_none() {
                    errors.insert(FIELD_TIPO_AGUA_RESIDUAL, MSG_SUBTIPO_RESIDUAL_REQUERIDO);
                }
            }
        }
        Some(WaterType::Otra) => {
            require(
                errors,
                FIELD_DESCRIPCION,
                block.descripcion.as_deref(),
                MSG_DESCRIPCION_REQUERIDA,
            );
        }
        Some(WaterType::Potable | WaterType::Natural) => {}
        None => errors.insert(FIELD_TIPO_DE_AGUA, MSG_TIPO_AGUA_INVALIDO),
    }
}
