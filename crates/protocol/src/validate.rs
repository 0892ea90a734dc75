//! Field-by-field validation of inbound messages
//!
//! Both schemas are checked first-failure-wins: validation stops at the first
//! violated rule and the error text is part of the wire contract, so the
//! checks here run in a fixed order. A "float" is strict — JSON integers are
//! rejected, only numbers with a fractional or exponent representation pass.

use serde_json::Value;
use thiserror::Error;

use crate::messages::{BusRecord, ErrorReply, ViewportBounds, MSG_TYPE_NEW_BOUNDS};

/// The exact key set a `newBounds` data object must carry.
const BOUNDS_KEYS: [&str; 4] = ["south_lat", "north_lat", "west_lng", "east_lng"];

/// A violated validation rule. The `Display` text is the canonical wire
/// message carried in the error reply.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid JSON")]
    InvalidJson,
    #[error("busId must be a string")]
    BusIdNotString,
    #[error("route must be a string")]
    RouteNotString,
    #[error("lat must be a float")]
    LatNotFloat,
    #[error("lng must be a float")]
    LngNotFloat,
    #[error("msgType must be specified")]
    MsgTypeNotSpecified,
    #[error("data must be specified")]
    DataNotSpecified,
    #[error("lat and lng must be specified")]
    BoundsKeysMismatch,
    #[error("lat and lng must be specified as floats")]
    BoundsNotFloat,
}

impl ValidationError {
    /// The structured reply sent back over the wire for this failure.
    pub fn reply(&self) -> ErrorReply {
        ErrorReply::new(self.to_string())
    }
}

/// Validate one producer message into a [`BusRecord`].
pub fn validate_bus_update(text: &str) -> Result<BusRecord, ValidationError> {
    let value: Value = serde_json::from_str(text).map_err(|_| ValidationError::InvalidJson)?;

    let bus_id = value
        .get("busId")
        .and_then(Value::as_str)
        .ok_or(ValidationError::BusIdNotString)?;
    let route = value
        .get("route")
        .and_then(Value::as_str)
        .ok_or(ValidationError::RouteNotString)?;
    let lat = float_field(&value, "lat").ok_or(ValidationError::LatNotFloat)?;
    let lng = float_field(&value, "lng").ok_or(ValidationError::LngNotFloat)?;

    Ok(BusRecord {
        bus_id: bus_id.to_string(),
        route: route.to_string(),
        lat,
        lng,
    })
}

/// Validate one consumer message into a [`ViewportBounds`] update.
pub fn validate_bounds_update(text: &str) -> Result<ViewportBounds, ValidationError> {
    let value: Value = serde_json::from_str(text).map_err(|_| ValidationError::InvalidJson)?;

    match value.get("msgType").and_then(Value::as_str) {
        Some(MSG_TYPE_NEW_BOUNDS) => {}
        _ => return Err(ValidationError::MsgTypeNotSpecified),
    }

    let data = value
        .get("data")
        .and_then(Value::as_object)
        .ok_or(ValidationError::DataNotSpecified)?;

    // Exact key set: nothing missing, nothing extra.
    if data.len() != BOUNDS_KEYS.len() || !BOUNDS_KEYS.iter().all(|k| data.contains_key(*k)) {
        return Err(ValidationError::BoundsKeysMismatch);
    }

    let mut coords = [0.0_f64; 4];
    for (slot, key) in coords.iter_mut().zip(BOUNDS_KEYS) {
        *slot = float_value(&data[key]).ok_or(ValidationError::BoundsNotFloat)?;
    }
    let [south_lat, north_lat, west_lng, east_lng] = coords;

    Ok(ViewportBounds {
        south_lat,
        north_lat,
        west_lng,
        east_lng,
    })
}

fn float_field(value: &Value, key: &str) -> Option<f64> {
    float_value(value.get(key)?)
}

fn float_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bus_update() {
        let record = validate_bus_update(
            r#"{"busId": "12345", "route": "104", "lat": 55.750152827772, "lng": 37.492125737793}"#,
        )
        .expect("valid update");

        assert_eq!(record.bus_id, "12345");
        assert_eq!(record.route, "104");
        assert_eq!(record.lat, 55.750152827772);
        assert_eq!(record.lng, 37.492125737793);
    }

    #[test]
    fn test_bus_update_invalid_json() {
        assert_eq!(
            validate_bus_update(r#""invalid json))}"#),
            Err(ValidationError::InvalidJson)
        );
    }

    #[test]
    fn test_bus_update_bus_id_not_string() {
        assert_eq!(
            validate_bus_update(r#"{"busId": 12345, "route": "104", "lat": 55.7, "lng": 37.4}"#),
            Err(ValidationError::BusIdNotString)
        );
    }

    #[test]
    fn test_bus_update_route_not_string() {
        assert_eq!(
            validate_bus_update(r#"{"busId": "12345", "route": 104, "lat": 55.7, "lng": 37.4}"#),
            Err(ValidationError::RouteNotString)
        );
    }

    #[test]
    fn test_bus_update_integer_lat_rejected() {
        assert_eq!(
            validate_bus_update(r#"{"busId": "12345", "route": "104", "lat": 55, "lng": 37.4}"#),
            Err(ValidationError::LatNotFloat)
        );
    }

    #[test]
    fn test_bus_update_integer_lng_rejected() {
        assert_eq!(
            validate_bus_update(r#"{"busId": "12345", "route": "104", "lat": 55.7, "lng": 37}"#),
            Err(ValidationError::LngNotFloat)
        );
    }

    #[test]
    fn test_bus_update_first_failure_wins() {
        // Every field is wrong; only the first check's error is reported.
        assert_eq!(
            validate_bus_update(r#"{"busId": 1, "route": 1, "lat": "x", "lng": "y"}"#),
            Err(ValidationError::BusIdNotString)
        );
    }

    #[test]
    fn test_bus_update_missing_field() {
        assert_eq!(
            validate_bus_update(r#"{"busId": "12345", "route": "104", "lat": 55.7}"#),
            Err(ValidationError::LngNotFloat)
        );
    }

    #[test]
    fn test_bus_update_non_object_payload() {
        // Valid JSON that is not an object fails the first field check.
        assert_eq!(
            validate_bus_update(r#"[1, 2, 3]"#),
            Err(ValidationError::BusIdNotString)
        );
    }

    #[test]
    fn test_valid_bounds_update() {
        let bounds = validate_bounds_update(
            r#"{"msgType": "newBounds", "data": {"south_lat": 55.1, "north_lat": 55.9, "west_lng": 37.1, "east_lng": 37.9}}"#,
        )
        .expect("valid bounds");

        assert_eq!(bounds.south_lat, 55.1);
        assert_eq!(bounds.north_lat, 55.9);
        assert_eq!(bounds.west_lng, 37.1);
        assert_eq!(bounds.east_lng, 37.9);
    }

    #[test]
    fn test_bounds_update_invalid_json() {
        assert_eq!(
            validate_bounds_update(r#""invalid json))}"#),
            Err(ValidationError::InvalidJson)
        );
    }

    #[test]
    fn test_bounds_update_wrong_msg_type() {
        assert_eq!(
            validate_bounds_update(r#"{"msgType": "invalid"}"#),
            Err(ValidationError::MsgTypeNotSpecified)
        );
    }

    #[test]
    fn test_bounds_update_missing_msg_type() {
        assert_eq!(
            validate_bounds_update(r#"{"data": {}}"#),
            Err(ValidationError::MsgTypeNotSpecified)
        );
    }

    #[test]
    fn test_bounds_update_null_data() {
        assert_eq!(
            validate_bounds_update(r#"{"msgType": "newBounds", "data": null}"#),
            Err(ValidationError::DataNotSpecified)
        );
    }

    #[test]
    fn test_bounds_update_empty_data() {
        assert_eq!(
            validate_bounds_update(r#"{"msgType": "newBounds", "data": {}}"#),
            Err(ValidationError::BoundsKeysMismatch)
        );
    }

    #[test]
    fn test_bounds_update_partial_keys() {
        assert_eq!(
            validate_bounds_update(r#"{"msgType": "newBounds", "data": {"south_lat": 1.0}}"#),
            Err(ValidationError::BoundsKeysMismatch)
        );
    }

    #[test]
    fn test_bounds_update_extra_key_rejected() {
        assert_eq!(
            validate_bounds_update(
                r#"{"msgType": "newBounds", "data": {"south_lat": 1.0, "north_lat": 2.0, "west_lng": 3.0, "east_lng": 4.0, "zoom": 5.0}}"#,
            ),
            Err(ValidationError::BoundsKeysMismatch)
        );
    }

    #[test]
    fn test_bounds_update_string_values_rejected() {
        assert_eq!(
            validate_bounds_update(
                r#"{"msgType": "newBounds", "data": {"south_lat": "54", "north_lat": "54", "west_lng": "54", "east_lng": "54"}}"#,
            ),
            Err(ValidationError::BoundsNotFloat)
        );
    }

    #[test]
    fn test_bounds_update_integer_values_rejected() {
        assert_eq!(
            validate_bounds_update(
                r#"{"msgType": "newBounds", "data": {"south_lat": 54, "north_lat": 55, "west_lng": 37, "east_lng": 38}}"#,
            ),
            Err(ValidationError::BoundsNotFloat)
        );
    }

    #[test]
    fn test_error_reply_wire_encoding() {
        let json = serde_json::to_string(&ValidationError::InvalidJson.reply())
            .expect("serialize reply");
        assert_eq!(json, r#"{"errors":["invalid JSON"],"msgType":"Errors"}"#);

        let json = serde_json::to_string(&ValidationError::BoundsKeysMismatch.reply())
            .expect("serialize reply");
        assert_eq!(
            json,
            r#"{"errors":["lat and lng must be specified"],"msgType":"Errors"}"#
        );
    }
}
