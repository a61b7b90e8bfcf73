use serde::Deserialize;
use serde_json::{Number, Value};

use crate::{
    error::GeoError,
    model::{GeoResult, Place},
};

/// What the HTTP transport hands back for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpOutcome {
    /// Request never produced a response (DNS, connect, body read...).
    TransportError(String),
    /// 4xx or 5xx response.
    HttpError { status: u16, reason: String, url: String },
    /// 2xx response body that parsed as JSON.
    JsonBody(Value),
    /// 2xx response body that is not JSON at all.
    InvalidBody(String),
}

/// Direct lookups answer with an array, ZIP lookups with a single object.
#[derive(Debug)]
enum ApiBody {
    Many(Vec<Value>),
    One(Value),
}

impl From<Value> for ApiBody {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => ApiBody::Many(items),
            other => ApiBody::One(other),
        }
    }
}

impl ApiBody {
    /// The single place to report; extra array elements are never inspected.
    fn into_place(self) -> Result<ApiPlace, GeoError> {
        let value = match self {
            ApiBody::One(value) => value,
            ApiBody::Many(items) => items.into_iter().next().ok_or(GeoError::EmptyResult)?,
        };

        serde_json::from_value(value).map_err(|e| GeoError::Decode(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename = "place")]
struct ApiPlace {
    lat: Option<Number>,
    lon: Option<Number>,
    name: Option<String>,
    country: Option<String>,
}

/// Collapse any transport outcome into a [`GeoResult`].
pub fn normalize(outcome: HttpOutcome) -> GeoResult {
    normalize_outcome(outcome).into()
}

fn normalize_outcome(outcome: HttpOutcome) -> Result<Place, GeoError> {
    match outcome {
        HttpOutcome::TransportError(detail) => Err(GeoError::Network(detail)),
        HttpOutcome::HttpError { status, reason, url } => {
            Err(GeoError::UpstreamHttp { status, reason, url })
        }
        HttpOutcome::InvalidBody(detail) => Err(GeoError::Decode(detail)),
        HttpOutcome::JsonBody(value) => place_from_body(value),
    }
}

fn place_from_body(value: Value) -> Result<Place, GeoError> {
    let place = ApiBody::from(value).into_place()?;

    // Zero counts as missing, same as an absent or null field.
    let usable = |c: Option<Number>| c.filter(|n| n.as_f64().is_some_and(|v| v != 0.0));

    match (usable(place.lat), usable(place.lon)) {
        (Some(latitude), Some(longitude)) => Ok(Place {
            latitude,
            longitude,
            name: place.name,
            country: place.country,
        }),
        _ => Err(GeoError::MissingCoordinates),
    }
}
