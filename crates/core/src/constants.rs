//! Constants used throughout the LIMS core crate.
//!
//! Field keys match the JSON payloads exchanged with the backend so that error maps can be
//! rendered next to the form control that produced them. Messages are user-facing Spanish
//! text shown by the front end.

// ============================================================================
// Sample field keys
// ============================================================================

pub const FIELD_DOCUMENTO: &str = "documento";
pub const FIELD_TIPO_DE_AGUA: &str = "tipoDeAgua";
pub const FIELD_TIPO_AGUA_RESIDUAL: &str = "tipoAguaResidual";
pub const FIELD_DESCRIPCION: &str = "descripcion";
pub const FIELD_TIPO_MUESTREO: &str = "tipoMuestreo";
pub const FIELD_LUGAR_MUESTREO: &str = "lugarMuestreo";
pub const FIELD_FECHA_HORA_MUESTREO: &str = "fechaHoraMuestreo";
pub const FIELD_TIPO_ANALISIS: &str = "tipoAnalisis";
pub const FIELD_IDENTIFICACION_MUESTRA: &str = "identificacionMuestra";
pub const FIELD_PLAN_MUESTREO: &str = "planMuestreo";
pub const FIELD_CONDICIONES_AMBIENTALES: &str = "condicionesAmbientales";
pub const FIELD_PRESERVACION_MUESTRA: &str = "preservacionMuestra";
pub const FIELD_PRESERVACION_MUESTRA_OTRA: &str = "preservacionMuestraOtra";
pub const FIELD_ANALISIS_SELECCIONADOS: &str = "analisisSeleccionados";

// ============================================================================
// User registration field keys
// ============================================================================

pub const FIELD_AUTH: &str = "auth";
pub const FIELD_TIPO: &str = "tipo";
pub const FIELD_NOMBRE: &str = "nombre";
pub const FIELD_TELEFONO: &str = "telefono";
pub const FIELD_DIRECCION: &str = "direccion";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_TIPO_CLIENTE: &str = "tipo_cliente";
pub const FIELD_RAZON_SOCIAL: &str = "razonSocial";
pub const FIELD_ESPECIALIDAD: &str = "especialidad";
pub const FIELD_CODIGO_SEGURIDAD: &str = "codigoSeguridad";

// ============================================================================
// Messages
// ============================================================================

pub const MSG_DOCUMENTO_REQUERIDO: &str = "El documento es obligatorio";
pub const MSG_DOCUMENTO_NUMERICO: &str = "El documento debe contener solo numeros";
pub const MSG_TIPO_AGUA_REQUERIDO: &str = "Debe seleccionar el tipo de agua";
pub const MSG_TIPO_AGUA_INVALIDO: &str = "El tipo de agua seleccionado no es válido";
pub const MSG_SUBTIPO_RESIDUAL_REQUERIDO: &str =
    "Debe especificar si el agua residual es Doméstica o No Doméstica";
pub const MSG_DESCRIPCION_REQUERIDA: &str = "Debe describir el tipo de agua";
pub const MSG_TIPO_MUESTREO_REQUERIDO: &str = "Debe seleccionar el tipo de muestreo";
pub const MSG_TIPO_MUESTREO_INVALIDO: &str = "El tipo de muestreo debe ser Simple o Compuesto";
pub const MSG_LUGAR_MUESTREO_REQUERIDO: &str = "El lugar de muestreo es obligatorio";
pub const MSG_FECHA_HORA_REQUERIDA: &str = "Debe ingresar fecha y hora de muestreo";
pub const MSG_TIPO_ANALISIS_REQUERIDO: &str = "Debe seleccionar el tipo de análisis";
pub const MSG_TIPO_ANALISIS_INVALIDO: &str = "El tipo de análisis seleccionado no es válido";
pub const MSG_IDENTIFICACION_REQUERIDA: &str = "La identificación de la muestra es obligatoria";
pub const MSG_PLAN_MUESTREO_REQUERIDO: &str = "El plan de muestreo es obligatorio";
pub const MSG_CONDICIONES_REQUERIDAS: &str = "Las condiciones ambientales son obligatorias";
pub const MSG_PRESERVACION_REQUERIDA: &str = "Debe seleccionar la preservación de la muestra";
pub const MSG_PRESERVACION_OTRA_REQUERIDA: &str = "Debe especificar la preservación utilizada";
pub const MSG_ANALISIS_REQUERIDOS: &str = "Debe seleccionar al menos un análisis";

pub const MSG_SOLO_ADMINISTRADORES: &str = "Solo los administradores pueden registrar usuarios";
pub const MSG_TIPO_USUARIO_REQUERIDO: &str = "Debe seleccionar el tipo de usuario";
pub const MSG_TIPO_USUARIO_NO_PERMITIDO: &str = "No tiene permisos para registrar este tipo de usuario";
pub const MSG_NOMBRE_REQUERIDO: &str = "El nombre es obligatorio";
pub const MSG_TELEFONO_REQUERIDO: &str = "El teléfono es obligatorio";
pub const MSG_TELEFONO_INVALIDO: &str = "El teléfono debe tener exactamente 10 dígitos";
pub const MSG_DIRECCION_REQUERIDA: &str = "La dirección es obligatoria";
pub const MSG_EMAIL_REQUERIDO: &str = "El correo electrónico es obligatorio";
pub const MSG_EMAIL_INVALIDO: &str = "El correo electrónico no es válido";
pub const MSG_PASSWORD_REQUERIDA: &str = "La contraseña es obligatoria";
pub const MSG_PASSWORD_LONGITUD: &str = "La contraseña debe tener al menos 8 caracteres";
pub const MSG_PASSWORD_MAYUSCULA: &str = "La contraseña debe contener al menos una letra mayúscula";
pub const MSG_PASSWORD_NUMERO: &str = "La contraseña debe contener al menos un número";
pub const MSG_PASSWORD_ESPECIAL: &str = "La contraseña debe contener al menos un carácter especial";
pub const MSG_TIPO_CLIENTE_REQUERIDO: &str = "Debe seleccionar el tipo de cliente";
pub const MSG_RAZON_SOCIAL_REQUERIDA: &str = "La razón social es obligatoria";
pub const MSG_CAMPO_REQUERIDO: &str = "Este campo es obligatorio";

// ============================================================================
// Rules
// ============================================================================

/// Minimum password length for staff accounts.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Punctuation accepted as the "special character" of a password.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Required length of a phone number.
pub const PHONE_DIGITS: usize = 10;

/// Preservation value that requires a free-text description.
pub const PRESERVACION_OTRO: &str = "Otro";
