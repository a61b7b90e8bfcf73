use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    endpoint::EndpointBuilder,
    model::{GeoResult, ResultLine},
    normalizer::normalize,
    transport::GeoTransport,
    validator::classify,
};

/// Resolves batches of raw location strings, one request at a time.
#[derive(Debug)]
pub struct GeoLocator<T> {
    endpoints: EndpointBuilder,
    transport: T,
}

impl<T: GeoTransport> GeoLocator<T> {
    pub fn new(endpoints: EndpointBuilder, transport: T) -> Self {
        Self { endpoints, transport }
    }

    /// Resolve a single location. Invalid input never reaches the network.
    pub async fn resolve(&self, raw: &str) -> GeoResult {
        let classified = classify(raw);

        let request = match self.endpoints.build(&classified) {
            Ok(request) => request,
            Err(err) => {
                debug!(input = raw, "rejected location: {err}");
                return GeoResult::Failure(err);
            }
        };

        debug!(input = raw, url = %request.redacted_url(), "requesting geo code");
        let result = normalize(self.transport.get(&request).await);

        if let GeoResult::Failure(err) = &result {
            warn!(input = raw, "unable to get geo code: {}", self.endpoints.redact(&err.to_string()));
        }
        result
    }

    /// Resolve every input in order, awaiting each call before starting the
    /// next. Returns one line per input; a failed lookup never stops the batch.
    pub async fn process_all<S: AsRef<str>>(&self, raws: &[S]) -> Vec<ResultLine> {
        info!("Start processing {} geo locations", raws.len());
        let started = Instant::now();

        let mut lines = Vec::with_capacity(raws.len());
        for raw in raws {
            let raw = raw.as_ref();
            let result = self.resolve(raw).await;
            lines.push(ResultLine { input: raw.to_string(), result });
        }

        info!(
            "Finished processing {} geo locations. Elapsed time: {:?}",
            raws.len(),
            started.elapsed()
        );
        lines
    }
}
