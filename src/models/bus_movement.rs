//! Modelo de BusMovement
//!
//! Mapea la tabla `bus_movements`. Las horas de salida y llegada se
//! componen en timestamps completos antes de persistir.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::{
    services::form_validator::{ConditionalRule, FieldReader, FormSchema, Trigger},
    utils::{
        errors::{invalid_field_error, AppResult},
        validation::{parse_non_negative_int, parse_timestamp},
    },
};

pub const SCHEMA: FormSchema = FormSchema {
    required: &[
        "busNumber",
        "driverName",
        "departureLocation",
        "arrivalLocation",
        "departureTime",
        "status",
    ],
    flags: &[],
    conditionals: &[ConditionalRule {
        trigger: "status",
        when: Trigger::Equals("completed"),
        dependent: "arrivalTime",
        message: "Arrival time is required for completed trips",
    }],
};

/// Estado del trayecto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl BusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusStatus::Scheduled => "scheduled",
            BusStatus::InProgress => "in_progress",
            BusStatus::Completed => "completed",
            BusStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(BusStatus::Scheduled),
            "in_progress" => Some(BusStatus::InProgress),
            "completed" => Some(BusStatus::Completed),
            "cancelled" => Some(BusStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BusMovement {
    pub id: i64,
    pub staff_id: Uuid,
    pub bus_number: String,
    pub driver_name: String,
    pub departure_location: String,
    pub arrival_location: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub status: String,
    pub passenger_count: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewBusMovement {
    #[validate(length(max = 200))]
    pub bus_number: String,
    #[validate(length(max = 200))]
    pub driver_name: String,
    #[validate(length(max = 200))]
    pub departure_location: String,
    #[validate(length(max = 200))]
    pub arrival_location: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub status: BusStatus,
    pub passenger_count: Option<i32>,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

impl NewBusMovement {
    pub fn from_fields(fields: &FieldReader<'_>) -> AppResult<Self> {
        let status_text = fields.text("status")?;
        let status = BusStatus::from_str(&status_text).ok_or_else(|| {
            invalid_field_error(
                "status",
                "Status must be one of: scheduled, in_progress, completed, cancelled",
            )
        })?;

        let departure_time = timestamp(fields, "departureTime", "departureDate")?
            .ok_or_else(|| invalid_field_error("departureTime", "Departure time is not a valid date and time"))?;
        let arrival_time = timestamp(fields, "arrivalTime", "arrivalDate")?;

        let passenger_count = match fields.get("passengerCount") {
            None => None,
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(parse_non_negative_int(value).ok_or_else(|| {
                invalid_field_error("passengerCount", "Passenger count must be a non-negative whole number")
            })?),
        };

        Ok(Self {
            bus_number: fields.text("busNumber")?,
            driver_name: fields.text("driverName")?,
            departure_location: fields.text("departureLocation")?,
            arrival_location: fields.text("arrivalLocation")?,
            departure_time,
            arrival_time,
            status,
            passenger_count,
            notes: fields.optional_text("notes")?,
        })
    }

    pub fn into_record(self, id: i64, staff_id: Uuid, created_at: DateTime<Utc>) -> BusMovement {
        BusMovement {
            id,
            staff_id,
            bus_number: self.bus_number,
            driver_name: self.driver_name,
            departure_location: self.departure_location,
            arrival_location: self.arrival_location,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            status: self.status.as_str().to_string(),
            passenger_count: self.passenger_count,
            notes: self.notes,
            created_at,
        }
    }
}

/// Componer un timestamp a partir del campo de hora y su fecha compañera
fn timestamp(fields: &FieldReader<'_>, time_field: &str, date_field: &str) -> AppResult<Option<DateTime<Utc>>> {
    let Some(time) = fields.optional_text(time_field)? else {
        return Ok(None);
    };
    let date = fields.optional_text(date_field)?;

    parse_timestamp(&time, date.as_deref())
        .map(Some)
        .ok_or_else(|| invalid_field_error(time_field, &format!("Field '{}' is not a valid date and time", time_field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn read(value: serde_json::Value) -> AppResult<NewBusMovement> {
        let map = value.as_object().cloned().unwrap();
        NewBusMovement::from_fields(&FieldReader::new(&map))
    }

    fn base() -> serde_json::Value {
        json!({
            "busNumber": "12",
            "driverName": "Sam Okafor",
            "departureLocation": "North depot",
            "arrivalLocation": "City centre",
            "departureTime": "2024-05-01T08:30:00.000Z",
            "status": "in_progress"
        })
    }

    #[test]
    fn test_departure_time_from_iso_string() {
        let movement = read(base()).unwrap();
        assert_eq!(movement.departure_time, Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());
        assert_eq!(movement.status, BusStatus::InProgress);
        assert!(movement.arrival_time.is_none());
    }

    #[test]
    fn test_times_composed_with_companion_dates() {
        let mut body = base();
        body["departureDate"] = json!("2024-05-01");
        body["departureTime"] = json!("08:30");
        body["arrivalDate"] = json!("2024-05-01");
        body["arrivalTime"] = json!("09:15");

        let movement = read(body).unwrap();
        assert_eq!(movement.departure_time, Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());
        assert_eq!(movement.arrival_time, Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 15, 0).unwrap()));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut body = base();
        body["status"] = json!("lost");
        assert!(read(body).is_err());
    }

    #[test]
    fn test_invalid_departure_time_rejected() {
        let mut body = base();
        body["departureTime"] = json!("half past eight");
        assert!(read(body).is_err());
    }

    #[test]
    fn test_passenger_count_coercion() {
        let mut body = base();
        body["passengerCount"] = json!("34");
        assert_eq!(read(body.clone()).unwrap().passenger_count, Some(34));

        body["passengerCount"] = json!("");
        assert_eq!(read(body.clone()).unwrap().passenger_count, None);

        body["passengerCount"] = json!(-3);
        assert!(read(body).is_err());
    }

    #[test]
    fn test_large_passenger_count_has_no_upper_bound() {
        let mut body = base();
        body["passengerCount"] = json!(12000);
        let movement = read(body).unwrap();
        assert_eq!(movement.passenger_count, Some(12000));
        assert!(movement.validate().is_ok());
    }
}
