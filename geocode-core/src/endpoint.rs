use anyhow::{Context, Result};
use url::{Url, form_urlencoded};

use crate::{
    error::GeoError,
    model::{ClassifiedLocation, EndpointRequest},
};

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/geo/1.0";

/// Only US locations are supported.
const COUNTRY_CODE: &str = "US";

/// Only the first match of a direct lookup is ever used.
const DIRECT_RESULT_LIMIT: u8 = 1;

/// Turns classified locations into geocoding API requests.
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
    base_url: String,
    api_key: String,
}

impl EndpointBuilder {
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid API base URL: {base_url}"))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn with_default_base(api_key: String) -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), api_key }
    }

    /// Mask the API key wherever it appears in `text`, raw or URL-encoded.
    pub fn redact(&self, text: &str) -> String {
        if self.api_key.is_empty() {
            return text.to_string();
        }
        text.replace(&self.api_key, "***")
            .replace(&encode(&self.api_key), "***")
    }

    /// Build the request for `location`.
    ///
    /// Every user-supplied segment is form-encoded on its own while the commas
    /// between segments stay literal, so the URL surfaced in upstream error
    /// messages reads `zip=12345,US` and user text can never add parameters.
    pub fn build(&self, location: &ClassifiedLocation) -> Result<EndpointRequest, GeoError> {
        let appid = encode(&self.api_key);
        let raw_url = match location {
            ClassifiedLocation::Zip { code } => format!(
                "{}/zip?zip={},{COUNTRY_CODE}&appid={appid}",
                self.base_url,
                encode(code)
            ),
            ClassifiedLocation::Direct { city, state } => format!(
                "{}/direct?q={},{},{COUNTRY_CODE}&limit={DIRECT_RESULT_LIMIT}&appid={appid}",
                self.base_url,
                encode(city),
                encode(state)
            ),
            ClassifiedLocation::Invalid { raw } => {
                return Err(GeoError::InvalidInput(raw.clone()));
            }
        };

        let url = Url::parse(&raw_url).map_err(|e| GeoError::Decode(e.to_string()))?;
        Ok(EndpointRequest::get(url))
    }
}

fn encode(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}
