use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Number;
use url::Url;

use crate::error::GeoError;

/// Token joining a raw input to its rendered result in an output line.
pub const LOCATION_CODE_SEPARATOR: &str = ":=>";

/// Validated, typed form of a raw location string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLocation {
    Zip { code: String },
    Direct { city: String, state: String },
    /// Carries the untouched input so error messages can echo it verbatim.
    Invalid { raw: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// Fully resolved request for the geocoding API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRequest {
    pub url: Url,
    pub method: HttpMethod,
}

impl EndpointRequest {
    pub fn get(url: Url) -> Self {
        Self { url, method: HttpMethod::Get }
    }

    /// URL with the `appid` credential masked, safe for logs.
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "appid" { "***".to_string() } else { v.into_owned() };
                (k.into_owned(), v)
            })
            .collect();

        if pairs.is_empty() {
            return url.to_string();
        }

        let query = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&query));
        url.to_string()
    }
}

/// A resolved place.
///
/// Coordinates keep the JSON number exactly as the API sent it, so `40.0`
/// renders as `40.0` and an integer `40` as `40`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub latitude: Number,
    pub longitude: Number,
    /// Rendered as an empty string when the API omits it.
    pub name: Option<String>,
    pub country: Option<String>,
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "latitude={},longitude={},place name={},country={}",
            self.latitude,
            self.longitude,
            self.name.as_deref().unwrap_or_default(),
            self.country.as_deref().unwrap_or_default(),
        )
    }
}

impl FromStr for Place {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || anyhow::anyhow!("Malformed place string: '{s}'");

        let rest = s.strip_prefix("latitude=").ok_or_else(malformed)?;
        let (latitude, rest) = rest.split_once(",longitude=").ok_or_else(malformed)?;
        let (longitude, rest) = rest.split_once(",place name=").ok_or_else(malformed)?;
        let (name, country) = rest.rsplit_once(",country=").ok_or_else(malformed)?;

        let non_empty = |v: &str| (!v.is_empty()).then(|| v.to_string());

        Ok(Place {
            latitude: latitude.parse()?,
            longitude: longitude.parse()?,
            name: non_empty(name),
            country: non_empty(country),
        })
    }
}

/// Outcome of resolving one location.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoResult {
    Success(Place),
    Failure(GeoError),
}

impl GeoResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GeoResult::Success(_))
    }
}

impl From<Result<Place, GeoError>> for GeoResult {
    fn from(value: Result<Place, GeoError>) -> Self {
        match value {
            Ok(place) => GeoResult::Success(place),
            Err(err) => GeoResult::Failure(err),
        }
    }
}

impl fmt::Display for GeoResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoResult::Success(place) => place.fmt(f),
            GeoResult::Failure(err) => write!(f, "unable to get geo code. Exception: {err}"),
        }
    }
}

/// Raw input paired with its result. Only turned into text at the output boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultLine {
    pub input: String,
    pub result: GeoResult,
}

impl fmt::Display for ResultLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.input, LOCATION_CODE_SEPARATOR, self.result)
    }
}
