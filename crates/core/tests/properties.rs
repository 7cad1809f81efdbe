use lims_core::normalize::{backend_to_input_value, date_time_to_backend, FechaHoraMuestreo};
use lims_core::{
    validate_sample, validate_user_registration, Role, SampleRecord, TipoDeAgua,
    UserRegistration,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn optional_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[ A-Za-z0-9áéíóú@.!]{0,12}")
}

proptest! {
    #![proptest_config(Config::with_cases(256))]
    #[test]
    fn sampling_datetime_round_trips(
        year in 1970_i32..2100,
        month in 1_u32..=12,
        day in 1_u32..=28,
        hour in 0_u32..24,
        minute in 0_u32..60
    ) {
        let iso = format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}");
        let backend = date_time_to_backend(iso.as_str()).expect("valid datetime");
        let restored = backend_to_input_value(&FechaHoraMuestreo::from(backend));
        prop_assert_eq!(restored, Some(iso));
    }

    #[test]
    fn sample_validation_is_idempotent(
        documento in optional_text(),
        tipo in optional_text(),
        lugar in optional_text(),
        analisis in proptest::collection::vec("[a-zA-Z ]{0,6}", 0..3)
    ) {
        let sample = SampleRecord {
            documento,
            tipo_de_agua: Some(TipoDeAgua { tipo, ..Default::default() }),
            lugar_muestreo: lugar,
            analisis_seleccionados: Some(analisis),
            ..Default::default()
        };
        let first = serde_json::to_string(&validate_sample(&sample)).expect("serialise");
        let second = serde_json::to_string(&validate_sample(&sample)).expect("serialise");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn non_admin_registration_short_circuits(
        nombre in optional_text(),
        password in optional_text(),
        tipo in proptest::sample::select(vec!["cliente", "laboratorista", "administrador"])
    ) {
        let user = UserRegistration {
            tipo: Some(tipo.to_string()),
            nombre,
            password,
            ..Default::default()
        };
        let errors = validate_user_registration(&user, Role::Laboratorista);
        prop_assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["auth"]);
    }
}
