//! # Admissions Analytics Client
//!
//! Fetches the analytics payload, normalizes it and wraps it with provenance.
//!
//! ## Failure policy
//! Every failure of the one outbound request collapses into the same outcome:
//! the caller receives a synthetic snapshot tagged `local_fallback`. That
//! covers transport errors (timeouts included), non-2xx statuses and bodies
//! that are not JSON. The cause is logged at `warn` and is not otherwise
//! reported; the envelope's `success` flag is always `true`.
//!
//! A 2xx response whose body is JSON `null` is still `external_api`; the
//! normalizer turns the absent payload into a synthetic snapshot.

use rand::rngs::StdRng;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::admissions::error::FetchError;
use crate::admissions::filter::{DateRange, TrendFilter};
use crate::admissions::model::{
    AnalyticsEnvelope, AnalyticsSnapshot, MetricEnvelope, MetricType, Source,
};
use crate::admissions::normalizer::normalize_with;
use crate::admissions::synthetic::SyntheticGenerator;
use crate::configs::AdmissionsConfig;
use crate::retrieve::ky_http::{ApiClient, ApiClientOptions};

/// Header carrying the static analytics credential.
pub const AUTH_HEADER: &str = "X-AUTH-TOKEN";

/// # Admissions API
///
/// Stateless between calls: nothing is cached and every fetch issues exactly
/// one request (plus configured retries). Safe to share behind an `Arc`.
pub struct AdmissionsApi {
    client: ApiClient,
    fallback_seed: Option<u64>,
}

impl AdmissionsApi {
    /// Builds the client from a resolved configuration.
    ///
    /// # Errors
    /// Fails on an invalid endpoint URL or an auth token that is not a valid
    /// header value. Fetch-time failures are never errors.
    pub fn new(config: &AdmissionsConfig) -> Result<Self, FetchError> {
        let mut default_headers = HeaderMap::new();
        match config.auth_token.as_deref() {
            Some(token) => {
                let value = HeaderValue::from_str(token).map_err(|source| FetchError::Header {
                    header: AUTH_HEADER,
                    source,
                })?;
                default_headers.insert(AUTH_HEADER, value);
            }
            None => debug!("No auth token configured, {} header will be omitted", AUTH_HEADER),
        }

        let options = ApiClientOptions {
            timeout: config.timeout(),
            max_retries: config.max_retries(),
            default_headers,
        };

        Ok(Self {
            client: ApiClient::new(config.endpoint(), options)?,
            fallback_seed: config.fallback_seed,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.client.base_url().as_str()
    }

    /// Fetches the full analytics snapshot.
    ///
    /// `from` / `to` are `YYYY-MM-DD`. The trend series is filtered to the
    /// inclusive range only when both are given; see [`TrendFilter::from_bounds`].
    pub async fn fetch_admissions_analytics(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> AnalyticsEnvelope {
        self.fetch_filtered(TrendFilter::from_bounds(from, to)).await
    }

    /// Typed variant of [`fetch_admissions_analytics`](Self::fetch_admissions_analytics).
    pub async fn fetch_analytics(&self, range: Option<DateRange>) -> AnalyticsEnvelope {
        self.fetch_filtered(TrendFilter::from(range)).await
    }

    /// Fetches one scalar metric by its dashboard key.
    ///
    /// Unrecognized keys still trigger the fetch and yield `0`.
    pub async fn fetch_metric(&self, metric_type: &str) -> MetricEnvelope {
        let metric = MetricType::from_key(metric_type);
        let (_, snapshot) = self.load_snapshot().await;
        MetricEnvelope::new(snapshot.metric(metric))
    }

    async fn fetch_filtered(&self, filter: TrendFilter) -> AnalyticsEnvelope {
        let (source, mut snapshot) = self.load_snapshot().await;
        snapshot.application_trends = filter.apply(snapshot.application_trends);
        AnalyticsEnvelope::new(source, snapshot)
    }

    /// The single collapse point between real and synthetic data.
    async fn load_snapshot(&self) -> (Source, AnalyticsSnapshot) {
        let mut generator = self.generator();
        match self.fetch_raw().await {
            Ok(raw) => {
                debug!(endpoint = self.endpoint(), "Analytics payload received");
                (Source::ExternalApi, normalize_with(Some(&raw), &mut generator))
            }
            Err(e) => {
                warn!(
                    endpoint = self.endpoint(),
                    error = %e,
                    "Analytics endpoint unavailable"
                );
                info!(source = %Source::LocalFallback, "Serving synthetic admissions data");
                (Source::LocalFallback, generator.snapshot())
            }
        }
    }

    async fn fetch_raw(&self) -> Result<Value, FetchError> {
        let response = self.client.request::<Value>(Method::GET, "", None).await?;

        match (response.success, response.data) {
            (true, Some(body)) => Ok(body),
            (_, _) => Err(FetchError::Status {
                status: response.status,
                body: response.error_body,
            }),
        }
    }

    fn generator(&self) -> SyntheticGenerator<StdRng> {
        match self.fallback_seed {
            Some(seed) => SyntheticGenerator::seeded(seed),
            None => SyntheticGenerator::from_entropy(),
        }
    }
}
