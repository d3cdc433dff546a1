//! Validación de formularios
//!
//! Cada formulario declara un `FormSchema`: campos requeridos y una tabla
//! de reglas condicionales. La validación se hace en dos pasadas sobre el
//! mapa crudo de campos; la segunda sólo corre si la primera pasa. Después
//! el mapa se convierte al registro tipado del formulario.

use serde_json::{Map, Value};
use validator::Validate;

use crate::{
    models::{
        accident_report::{self, NewAccidentReport},
        bus_movement::{self, NewBusMovement},
        contact_message::{self, NewContactMessage},
        mid_report::{self, NewMidReport},
        submission::{FormKind, NewSubmission},
    },
    utils::{
        errors::{invalid_field_error, missing_fields_error, AppError, AppResult},
        validation::{as_text, is_present, is_truthy},
    },
};

/// Condición que activa una regla condicional
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// El campo disparador es truthy
    Truthy,
    /// El campo disparador es exactamente este texto
    Equals(&'static str),
}

/// "Si `trigger` cumple `when`, entonces `dependent` es requerido"
#[derive(Debug, Clone, Copy)]
pub struct ConditionalRule {
    pub trigger: &'static str,
    pub when: Trigger,
    pub dependent: &'static str,
    pub message: &'static str,
}

impl ConditionalRule {
    fn applies(&self, fields: &Map<String, Value>) -> bool {
        match (self.when, fields.get(self.trigger)) {
            (_, None) => false,
            (Trigger::Truthy, Some(value)) => is_truthy(value),
            (Trigger::Equals(expected), Some(value)) => value.as_str().map(str::trim) == Some(expected),
        }
    }
}

/// Esquema declarativo de un formulario
#[derive(Debug)]
pub struct FormSchema {
    pub required: &'static [&'static str],
    /// Requeridos booleanos: sólo faltan si están ausentes o son null
    pub flags: &'static [&'static str],
    pub conditionals: &'static [ConditionalRule],
}

impl FormSchema {
    /// Primera pasada: todos los campos requeridos ausentes, en orden de declaración
    pub fn missing_fields(&self, fields: &Map<String, Value>) -> Vec<String> {
        self.required
            .iter()
            .filter(|name| {
                let value = fields.get(**name);
                if self.flags.contains(*name) {
                    matches!(value, None | Some(Value::Null))
                } else {
                    !is_present(value)
                }
            })
            .map(|name| name.to_string())
            .collect()
    }

    /// Segunda pasada: la primera regla condicional que falla
    pub fn violated_rule(&self, fields: &Map<String, Value>) -> Option<&ConditionalRule> {
        self.conditionals
            .iter()
            .find(|rule| rule.applies(fields) && !is_present(fields.get(rule.dependent)))
    }

    pub fn check(&self, fields: &Map<String, Value>) -> AppResult<()> {
        let missing = self.missing_fields(fields);
        if !missing.is_empty() {
            return Err(missing_fields_error(missing));
        }

        if let Some(rule) = self.violated_rule(fields) {
            return Err(invalid_field_error(rule.dependent, rule.message));
        }

        Ok(())
    }
}

pub fn schema_for(kind: FormKind) -> &'static FormSchema {
    match kind {
        FormKind::AccidentReport => &accident_report::SCHEMA,
        FormKind::BusMovement => &bus_movement::SCHEMA,
        FormKind::ContactMessage => &contact_message::SCHEMA,
        FormKind::MidReport => &mid_report::SCHEMA,
    }
}

/// Lectura tipada de un mapa de campos ya validado
pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    /// Campo de texto requerido
    pub fn text(&self, name: &str) -> AppResult<String> {
        self.get(name)
            .and_then(as_text)
            .ok_or_else(|| invalid_field_error(name, &format!("Field '{}' must be text", name)))
    }

    /// Campo de texto opcional; vacío equivale a ausente
    pub fn optional_text(&self, name: &str) -> AppResult<Option<String>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(value) => as_text(value)
                .map(Some)
                .ok_or_else(|| invalid_field_error(name, &format!("Field '{}' must be text", name))),
        }
    }

    /// Booleano por truthiness; ausente equivale a `false`
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).map(is_truthy).unwrap_or(false)
    }
}

/// Validar un cuerpo crudo y normalizarlo al registro del formulario
pub fn validate(kind: FormKind, raw: &Value) -> AppResult<NewSubmission> {
    let fields = raw.as_object().ok_or_else(|| AppError::InvalidInput {
        message: "Request body must be a JSON object".to_string(),
        fields: Vec::new(),
    })?;

    schema_for(kind).check(fields)?;

    let reader = FieldReader::new(fields);
    let submission = match kind {
        FormKind::AccidentReport => {
            let record = NewAccidentReport::from_fields(&reader)?;
            record.validate()?;
            NewSubmission::AccidentReport(record)
        }
        FormKind::BusMovement => {
            let record = NewBusMovement::from_fields(&reader)?;
            record.validate()?;
            NewSubmission::BusMovement(record)
        }
        FormKind::ContactMessage => {
            let record = NewContactMessage::from_fields(&reader)?;
            record.validate()?;
            NewSubmission::ContactMessage(record)
        }
        FormKind::MidReport => {
            let record = NewMidReport::from_fields(&reader)?;
            record.validate()?;
            NewSubmission::MidReport(record)
        }
    };

    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn accident() -> Value {
        json!({
            "date": "2024-05-01",
            "time": "08:30",
            "location": "Main St depot",
            "description": "Clipped a mirror while reversing",
            "vehiclesInvolved": "Bus 12, parked van",
            "injuries": false,
            "driverName": "Sam Okafor",
            "busNumber": "12"
        })
    }

    fn bus_movement() -> Value {
        json!({
            "busNumber": "12",
            "driverName": "Sam Okafor",
            "departureLocation": "North depot",
            "arrivalLocation": "City centre",
            "departureTime": "2024-05-01T08:30:00Z",
            "status": "scheduled"
        })
    }

    fn contact() -> Value {
        json!({
            "subject": "Rota change",
            "message": "Can I swap my Friday shift?",
            "department": "Operations",
            "priority": "Low"
        })
    }

    fn mid_report() -> Value {
        json!({
            "midNumber": "MID-0042",
            "date": "2024-05-01",
            "incidentType": "Near Miss",
            "description": "Cyclist cut across the bus lane",
            "location": "Bridge Rd",
            "actionsTaken": "Logged with control",
            "followUpRequired": false
        })
    }

    fn with(mut value: Value, key: &str, field: Value) -> Value {
        value.as_object_mut().unwrap().insert(key.to_string(), field);
        value
    }

    fn without(mut value: Value, key: &str) -> Value {
        value.as_object_mut().unwrap().remove(key);
        value
    }

    fn expect_invalid(result: AppResult<NewSubmission>) -> (String, Vec<String>) {
        match result {
            Err(AppError::InvalidInput { message, fields }) => (message, fields),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_complete_forms_validate() {
        assert!(validate(FormKind::AccidentReport, &accident()).is_ok());
        assert!(validate(FormKind::BusMovement, &bus_movement()).is_ok());
        assert!(validate(FormKind::ContactMessage, &contact()).is_ok());
        assert!(validate(FormKind::MidReport, &mid_report()).is_ok());
    }

    #[test]
    fn test_each_missing_required_field_is_rejected() {
        let cases = [
            (FormKind::AccidentReport, accident()),
            (FormKind::BusMovement, bus_movement()),
            (FormKind::ContactMessage, contact()),
            (FormKind::MidReport, mid_report()),
        ];

        for (kind, complete) in cases {
            for field in schema_for(kind).required {
                let (message, fields) = expect_invalid(validate(kind, &without(complete.clone(), field)));
                assert_eq!(message, "Missing required fields");
                assert_eq!(fields, vec![field.to_string()], "{} / {}", kind, field);
            }
        }
    }

    #[test]
    fn test_all_missing_fields_reported_together() {
        let (_, fields) = expect_invalid(validate(FormKind::ContactMessage, &json!({ "subject": "Hi" })));
        assert_eq!(fields, vec!["message", "department", "priority"]);
    }

    #[test]
    fn test_blank_strings_count_as_missing() {
        let (_, fields) = expect_invalid(validate(
            FormKind::ContactMessage,
            &with(contact(), "subject", json!("   ")),
        ));
        assert_eq!(fields, vec!["subject"]);
    }

    #[test]
    fn test_false_boolean_counts_as_present() {
        let result = validate(FormKind::MidReport, &with(mid_report(), "followUpRequired", json!(false)));
        assert!(result.is_ok());

        let (_, fields) = expect_invalid(validate(FormKind::MidReport, &with(mid_report(), "followUpRequired", json!(null))));
        assert_eq!(fields, vec!["followUpRequired"]);
    }

    #[test]
    fn test_injuries_require_details() {
        let (message, fields) = expect_invalid(validate(
            FormKind::AccidentReport,
            &with(accident(), "injuries", json!(true)),
        ));
        assert_eq!(message, "Injury details are required when injuries are reported");
        assert_eq!(fields, vec!["injuryDetails"]);

        let with_details = with(with(accident(), "injuries", json!(true)), "injuryDetails", json!("Sprained wrist"));
        assert!(validate(FormKind::AccidentReport, &with_details).is_ok());

        let no_injuries = with(accident(), "injuryDetails", json!("n/a"));
        assert!(validate(FormKind::AccidentReport, &no_injuries).is_ok());
    }

    #[test]
    fn test_completed_trip_requires_arrival_time() {
        let completed = with(bus_movement(), "status", json!("completed"));
        let (message, fields) = expect_invalid(validate(FormKind::BusMovement, &completed));
        assert_eq!(message, "Arrival time is required for completed trips");
        assert_eq!(fields, vec!["arrivalTime"]);

        let completed = with(completed, "arrivalTime", json!("2024-05-01T09:10:00Z"));
        assert!(validate(FormKind::BusMovement, &completed).is_ok());

        for status in ["scheduled", "in_progress", "cancelled"] {
            let movement = with(bus_movement(), "status", json!(status));
            assert!(validate(FormKind::BusMovement, &movement).is_ok(), "{}", status);
        }
    }

    #[test]
    fn test_empty_string_flag_is_present_and_false() {
        let result = validate(FormKind::MidReport, &with(mid_report(), "followUpRequired", json!("")));
        match result {
            Ok(NewSubmission::MidReport(report)) => assert!(!report.follow_up_required),
            other => panic!("expected MidReport, got {:?}", other),
        }

        let result = validate(FormKind::AccidentReport, &with(accident(), "injuries", json!("")));
        match result {
            Ok(NewSubmission::AccidentReport(report)) => assert!(!report.injuries),
            other => panic!("expected AccidentReport, got {:?}", other),
        }
    }

    #[test]
    fn test_padded_completed_status_still_requires_arrival_time() {
        let padded = with(bus_movement(), "status", json!(" completed "));
        let (message, fields) = expect_invalid(validate(FormKind::BusMovement, &padded));
        assert_eq!(message, "Arrival time is required for completed trips");
        assert_eq!(fields, vec!["arrivalTime"]);
    }

    #[test]
    fn test_follow_up_requires_details() {
        let needs_follow_up = with(mid_report(), "followUpRequired", json!(true));
        let (message, _) = expect_invalid(validate(FormKind::MidReport, &needs_follow_up));
        assert_eq!(message, "Follow-up details are required when follow-up is needed");

        let with_details = with(needs_follow_up, "followUpDetails", json!("Call the cyclist back"));
        assert!(validate(FormKind::MidReport, &with_details).is_ok());
    }

    #[test]
    fn test_conditional_pass_runs_after_required_pass() {
        let body = without(with(accident(), "injuries", json!(true)), "location");
        let (message, fields) = expect_invalid(validate(FormKind::AccidentReport, &body));
        assert_eq!(message, "Missing required fields");
        assert_eq!(fields, vec!["location"]);
    }

    #[test]
    fn test_truthy_strings_trigger_conditionals() {
        let body = with(accident(), "injuries", json!("yes"));
        let (_, fields) = expect_invalid(validate(FormKind::AccidentReport, &body));
        assert_eq!(fields, vec!["injuryDetails"]);
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        let (message, _) = expect_invalid(validate(FormKind::ContactMessage, &json!(["subject"])));
        assert_eq!(message, "Request body must be a JSON object");
    }

    #[test]
    fn test_overlong_text_fails_length_validation() {
        let body = with(contact(), "subject", json!("x".repeat(201)));
        assert!(matches!(
            validate(FormKind::ContactMessage, &body),
            Err(AppError::Validation(_))
        ));
    }
}
