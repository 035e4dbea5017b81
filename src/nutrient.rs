//! External nutrient lookups against USDA FoodData Central.
//!
//! One search per call, top-ranked candidate only, energy nutrient only.
//! Every failure mode (no credential, transport error, non-success status,
//! timeout, malformed payload, missing nutrient) degrades to "no data" so
//! a long batch run never dies on a single lookup. There is no retry.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::time::{Duration, Instant};
use ureq::Agent;

const FDC_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// FoodData Central nutrient id for Energy (kcal).
const ENERGY_NUTRIENT_ID: u64 = 1008;

/// Per-call budget; exceeding it counts as a failed lookup, not a crash.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of energy values for normalized ingredient phrases. The pipeline
/// only ever sees this trait, so tests substitute deterministic stubs.
pub trait NutrientSource {
    /// Energy in kcal for the best match, or `None` when the source has no
    /// data. Must not be called with an empty query.
    fn energy_kcal(&self, query: &str) -> Option<f64>;
}

/// HTTP client for the FoodData Central search endpoint.
pub struct FdcClient {
    agent: Agent,
    api_key: Option<String>,
}

impl FdcClient {
    pub fn new(api_key: Option<String>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(LOOKUP_TIMEOUT))
            .build()
            .new_agent();
        Self { agent, api_key }
    }

    fn search(&self, api_key: &str, query: &str) -> Result<SearchResponse> {
        let url = format!("{FDC_BASE_URL}/foods/search");
        let mut response = self
            .agent
            .get(url.as_str())
            .query("api_key", api_key)
            .query("query", query)
            .query("pageSize", "1")
            .query("dataType", "Survey (FNDDS)")
            .query("dataType", "SR Legacy")
            .call()
            .context("fdc search request")?;
        response
            .body_mut()
            .read_json::<SearchResponse>()
            .context("decode fdc search response")
    }
}

impl NutrientSource for FdcClient {
    fn energy_kcal(&self, query: &str) -> Option<f64> {
        let api_key = self.api_key.as_deref()?;
        if query.is_empty() {
            return None;
        }
        let start = Instant::now();
        match self.search(api_key, query) {
            Ok(response) => {
                let kcal = energy_from_response(&response);
                tracing::debug!(
                    query,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    found = kcal.is_some(),
                    "fdc lookup complete"
                );
                kcal
            }
            Err(err) => {
                tracing::debug!(query, error = %err, "fdc lookup failed");
                None
            }
        }
    }
}

/// Resolve the API key: explicit flag first, then the environment.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| env::var("FDC_API_KEY").ok())
        .filter(|key| !key.is_empty())
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodRecord>,
}

#[derive(Debug, Deserialize)]
struct FoodRecord {
    #[serde(default, rename = "foodNutrients")]
    food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Deserialize)]
struct FoodNutrient {
    #[serde(default, rename = "nutrientId")]
    nutrient_id: Option<u64>,
    #[serde(default)]
    value: Option<f64>,
}

/// Energy value of the top-ranked candidate, if it carries one.
fn energy_from_response(response: &SearchResponse) -> Option<f64> {
    response
        .foods
        .first()?
        .food_nutrients
        .iter()
        .find(|nutrient| nutrient.nutrient_id == Some(ENERGY_NUTRIENT_ID))?
        .value
}
