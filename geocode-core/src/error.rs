use thiserror::Error;

/// Every way resolving a single location can fail.
///
/// The `Display` text of each variant is the message shown after
/// `unable to get geo code. Exception: ` in an output line, so it must stay
/// stable for callers that pattern-match on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    /// Input is neither a ZIP code nor a "city, state" pair.
    #[error("Invalid location: {0}")]
    InvalidInput(String),

    /// Connection or transport level failure.
    #[error("{0}")]
    Network(String),

    /// Non-2xx response from the geocoding API.
    #[error(
        "{status} {kind} Error: {phrase}for url: {url}",
        kind = http_error_kind(.status),
        phrase = reason_phrase(.reason)
    )]
    UpstreamHttp {
        status: u16,
        reason: String,
        url: String,
    },

    /// 2xx response whose place has no usable `lat`/`lon`.
    #[error("api not returning latitude or longitude")]
    MissingCoordinates,

    /// Direct lookup returned an empty array.
    #[error("location not found")]
    EmptyResult,

    /// Body could not be decoded into the expected shape.
    #[error("{0}")]
    Decode(String),
}

fn http_error_kind(status: &u16) -> &'static str {
    if *status >= 500 { "Server" } else { "Client" }
}

/// Reason followed by a space, or nothing for statuses without one.
fn reason_phrase(reason: &str) -> String {
    match reason.trim() {
        "" => String::new(),
        reason => format!("{reason} "),
    }
}
