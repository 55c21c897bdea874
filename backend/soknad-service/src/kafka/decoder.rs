//! Payload decoding for the søknad topic

use crate::domain::SykepengesoknadEvent;
use crate::error::DecodeError;

/// Decode a raw record value into a søknad event.
///
/// Well-formed JSON that does not fit the event shape yields
/// [`DecodeError::ShapeMismatch`]; anything that is not JSON yields
/// [`DecodeError::Malformed`].
pub fn decode_soknad(payload: Option<&[u8]>) -> Result<SykepengesoknadEvent, DecodeError> {
    let payload = payload.ok_or(DecodeError::MissingPayload)?;
    Ok(serde_json::from_slice(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SoknadStatus;
    use chrono::NaiveDate;

    const VALID: &str = r#"{
        "id": "a1b2",
        "type": "ARBEIDSTAKERE",
        "status": "SENDT",
        "fnr": "12345678910",
        "sykmeldingId": "sm-1",
        "arbeidsgiver": { "navn": "Bedrift AS", "orgnummer": "999888777" },
        "fom": "2024-05-01",
        "tom": "2024-05-20",
        "sendtArbeidsgiver": "2024-05-21T10:15:30.123456",
        "sendtNav": null
    }"#;

    #[test]
    fn test_decode_valid_payload() {
        let event = decode_soknad(Some(VALID.as_bytes())).unwrap();

        assert_eq!(event.id, "a1b2");
        assert_eq!(event.status, SoknadStatus::Sent);
        assert_eq!(event.orgnummer(), Some("999888777"));
        assert_eq!(event.tom, NaiveDate::from_ymd_opt(2024, 5, 20));
        assert!(event.is_sent_to_employer());
        assert_eq!(event.other["type"], "ARBEIDSTAKERE");
        assert!(event.other["sendtNav"].is_null());
    }

    #[test]
    fn test_decode_minimal_payload() {
        let payload = br#"{"id":"x","status":"NY","fnr":"1"}"#;
        let event = decode_soknad(Some(payload)).unwrap();

        assert_eq!(event.status, SoknadStatus::New);
        assert!(event.arbeidsgiver.is_none());
        assert!(event.tom.is_none());
        assert!(!event.is_sent_to_employer());
    }

    #[test]
    fn test_null_sendt_arbeidsgiver_is_absent() {
        let payload =
            br#"{"id":"x","status":"SENDT","fnr":"1","sendtArbeidsgiver":null}"#;
        let event = decode_soknad(Some(payload)).unwrap();
        assert!(!event.is_sent_to_employer());
    }

    #[test]
    fn test_utc_sendt_arbeidsgiver_counts_as_sent() {
        let payload = br#"{
            "id": "A1",
            "status": "SENDT",
            "fnr": "1",
            "tom": "2026-10-29",
            "sendtArbeidsgiver": "2026-10-10T10:00:00Z"
        }"#;
        let event = decode_soknad(Some(payload)).unwrap();

        assert!(event.is_sent_to_employer());
        assert_eq!(
            event.sendt_arbeidsgiver_dato(),
            NaiveDate::from_ymd_opt(2026, 10, 10)
        );
    }

    #[test]
    fn test_unknown_status_is_shape_mismatch() {
        let payload = br#"{"id":"x","status":"UKJENT","fnr":"1"}"#;
        let err = decode_soknad(Some(payload)).unwrap_err();
        assert!(err.is_shape_mismatch(), "{err}");
    }

    #[test]
    fn test_wrong_field_type_is_shape_mismatch() {
        let payload = br#"{"id":"x","status":"NY","fnr":"1","tom":20240520}"#;
        let err = decode_soknad(Some(payload)).unwrap_err();
        assert!(err.is_shape_mismatch(), "{err}");
    }

    #[test]
    fn test_missing_fnr_is_shape_mismatch() {
        let payload =
            br#"{"id":"A1","status":"NY","arbeidsgiver":{"orgnummer":"999"},"tom":"2026-10-29"}"#;
        let err = decode_soknad(Some(payload)).unwrap_err();
        assert!(err.is_shape_mismatch(), "{err}");
    }

    #[test]
    fn test_unparseable_date_is_shape_mismatch() {
        let payload = br#"{"id":"x","status":"NY","fnr":"1","tom":"20.05.2024"}"#;
        let err = decode_soknad(Some(payload)).unwrap_err();
        assert!(err.is_shape_mismatch(), "{err}");
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = decode_soknad(Some(b"{\"id\": ")).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_missing_payload() {
        let err = decode_soknad(None).unwrap_err();
        assert!(matches!(err, DecodeError::MissingPayload));
    }
}
