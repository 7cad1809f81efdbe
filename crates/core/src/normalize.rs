//! Field normalisation between form values and the backend wire format.
//!
//! Responsibilities:
//! - Convert sampling date/time between the editable `YYYY-MM-DDTHH:mm` form value and the
//!   backend `{fecha: "dd/MM/yyyy", hora: "h:mm AM/PM"}` object
//! - Fold free-text enum inputs (case, accents, surrounding whitespace) onto canonical
//!   variants before any membership check
//! - Derive the one-letter water classification code
//!
//! Everything here is pure. Unparseable values become `None` (or an empty code) and are left
//! for the validators to report.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const INPUT_VALUE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const BACKEND_DATE_FORMAT: &str = "%d/%m/%Y";
const BACKEND_TIME_FORMAT: &str = "%-I:%M %p";

const ISO_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
const TIME_FORMATS: &[&str] = &["%I:%M %p", "%I:%M:%S %p", "%H:%M", "%H:%M:%S"];

// ============================================================================
// Text folding
// ============================================================================

/// Folds free text onto a comparison key: trimmed, lowercase, Spanish accents removed.
///
/// `ñ` is kept since it is a distinct letter.
pub fn fold_key(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

// ============================================================================
// Canonical enums
// ============================================================================

/// Water classification of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterType {
    Potable,
    Natural,
    Residual,
    Otra,
}

impl WaterType {
    pub fn parse(s: &str) -> Option<Self> {
        match fold_key(s).as_str() {
            "potable" => Some(Self::Potable),
            "natural" => Some(Self::Natural),
            "residual" => Some(Self::Residual),
            "otra" => Some(Self::Otra),
            _ => None,
        }
    }

    /// One-letter classification code used in sample identifiers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Potable => "P",
            Self::Natural => "N",
            Self::Residual => "R",
            Self::Otra => "O",
        }
    }
}

/// Sub-classification required for residual water.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResidualSubtype {
    Domestica,
    NoDomestica,
}

impl ResidualSubtype {
    pub fn parse(s: &str) -> Option<Self> {
        match fold_key(s).replace(['_', '-'], " ").as_str() {
            "domestica" => Some(Self::Domestica),
            "no domestica" => Some(Self::NoDomestica),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Domestica => "Doméstica",
            Self::NoDomestica => "No Doméstica",
        }
    }
}

/// How the sample was collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplingType {
    Simple,
    Compuesto,
}

impl SamplingType {
    pub fn parse(s: &str) -> Option<Self> {
        match fold_key(s).as_str() {
            "simple" => Some(Self::Simple),
            "compuesto" => Some(Self::Compuesto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Compuesto => "Compuesto",
        }
    }
}

/// Family of analyses requested for a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisType {
    Fisicoquimico,
    Microbiologico,
}

impl AnalysisType {
    /// Folds a label (`"Fisicoquímico"`, `" FISICOQUIMICO "`) onto its canonical code
    /// (`fisicoquimico`, `microbiologico`) and matches it case-sensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match fold_key(s).as_str() {
            "fisicoquimico" => Some(Self::Fisicoquimico),
            "microbiologico" => Some(Self::Microbiologico),
            _ => None,
        }
    }
}

/// Classification code for a water type selection; unknown input yields `""`.
pub fn water_type_code(tipo: &str) -> &'static str {
    WaterType::parse(tipo).map(|t| t.code()).unwrap_or("")
}

// ============================================================================
// Date and time
// ============================================================================

/// Sampling date/time as the backend stores it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDateTime {
    /// `dd/MM/yyyy`
    pub fecha: String,
    /// `h:mm AM/PM`
    pub hora: String,
}

/// `fechaHoraMuestreo` as it appears in form state or backend responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FechaHoraMuestreo {
    /// `YYYY-MM-DDTHH:mm` from a datetime-local input.
    Text(String),
    /// `{fecha, hora}` from the backend; either part may be missing while the form is filled.
    Parts {
        #[serde(default)]
        fecha: Option<String>,
        #[serde(default)]
        hora: Option<String>,
    },
}

impl FechaHoraMuestreo {
    /// Whether both the date and the time part are present.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Text(s) => match s.split_once('T') {
                Some((date, time)) => !date.trim().is_empty() && !time.trim().is_empty(),
                None => false,
            },
            Self::Parts { fecha, hora } => {
                fecha.as_deref().is_some_and(|f| !f.trim().is_empty())
                    && hora.as_deref().is_some_and(|h| !h.trim().is_empty())
            }
        }
    }
}

impl From<BackendDateTime> for FechaHoraMuestreo {
    fn from(value: BackendDateTime) -> Self {
        Self::Parts {
            fecha: Some(value.fecha),
            hora: Some(value.hora),
        }
    }
}

/// Inputs accepted by [`date_time_to_backend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateTimeInput {
    Iso(String),
    Native(NaiveDateTime),
    Backend(BackendDateTime),
}

impl From<&str> for DateTimeInput {
    fn from(value: &str) -> Self {
        Self::Iso(value.to_owned())
    }
}

impl From<NaiveDateTime> for DateTimeInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::Native(value)
    }
}

impl From<BackendDateTime> for DateTimeInput {
    fn from(value: BackendDateTime) -> Self {
        Self::Backend(value)
    }
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    ISO_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}

/// Rewrites Spanish-locale meridiem markers (`a. m.`, `p.m.`) as `AM`/`PM`.
fn normalize_meridiem(hora: &str) -> String {
    let upper = hora.trim().to_uppercase();
    let compact: String = upper.chars().filter(|c| *c != '.').collect();
    for (spanish, meridiem) in [("A M", "AM"), ("P M", "PM")] {
        if let Some(prefix) = compact.strip_suffix(spanish) {
            return format!("{} {}", prefix.trim_end(), meridiem);
        }
    }
    compact
}

fn parse_backend_time(hora: &str) -> Option<NaiveTime> {
    let hora = normalize_meridiem(hora);
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&hora, fmt).ok())
}

fn parse_backend(fecha: &str, hora: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(fecha.trim(), BACKEND_DATE_FORMAT).ok()?;
    let time = parse_backend_time(hora)?;
    Some(date.and_time(time))
}

fn to_backend(dt: NaiveDateTime) -> BackendDateTime {
    BackendDateTime {
        fecha: dt.format(BACKEND_DATE_FORMAT).to_string(),
        hora: dt.format(BACKEND_TIME_FORMAT).to_string(),
    }
}

/// Converts a form or native date/time into the backend `{fecha, hora}` shape.
///
/// An already-shaped backend object is passed through (trimmed). Empty or unparseable input
/// returns `None`, which callers treat as "not provided".
///
/// # Examples
///
/// ```
/// use lims_core::normalize::{date_time_to_backend, BackendDateTime};
///
/// let out = date_time_to_backend("2025-05-01T13:05").expect("valid input");
/// assert_eq!(out, BackendDateTime { fecha: "01/05/2025".into(), hora: "1:05 PM".into() });
/// ```
pub fn date_time_to_backend(input: impl Into<DateTimeInput>) -> Option<BackendDateTime> {
    match input.into() {
        DateTimeInput::Iso(s) => {
            let parsed = parse_iso(&s);
            if parsed.is_none() && !s.trim().is_empty() {
                tracing::debug!("cannot normalise sampling date/time: {:?}", s);
            }
            parsed.map(to_backend)
        }
        DateTimeInput::Native(dt) => Some(to_backend(dt)),
        DateTimeInput::Backend(b) => {
            let fecha = b.fecha.trim();
            let hora = b.hora.trim();
            if fecha.is_empty() || hora.is_empty() {
                return None;
            }
            Some(BackendDateTime {
                fecha: fecha.to_owned(),
                hora: hora.to_owned(),
            })
        }
    }
}

/// Produces the `YYYY-MM-DDTHH:mm` value used to populate an editable date/time field.
///
/// Backend objects have their `dd/MM/yyyy` date reordered and their 12-hour time converted to
/// 24-hour. A string value is re-rendered in canonical form. Returns `None` when the value
/// cannot be interpreted.
pub fn backend_to_input_value(value: &FechaHoraMuestreo) -> Option<String> {
    let parsed = match value {
        FechaHoraMuestreo::Text(s) => parse_iso(s),
        FechaHoraMuestreo::Parts { fecha, hora } => {
            parse_backend(fecha.as_deref()?, hora.as_deref()?)
        }
    };
    if parsed.is_none() {
        tracing::debug!("cannot populate sampling date/time from {:?}", value);
    }
    parsed.map(|dt| dt.format(INPUT_VALUE_FORMAT).to_string())
}
