use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::PlaceRecord;

pub const SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
pub const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

// Lead time the provider needs to materialize a continuation page
pub const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(3);

const DETAIL_FIELDS: &str = "name,formatted_address,formatted_phone_number,\
international_phone_number,website,rating,price_level,business_status,place_id,icon";

#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("transport failure talking to the places api: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("places api reported an error: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub candidates: Vec<PlaceRecord>,
    pub next_page_token: Option<String>,
}

// The two remote calls the pipeline depends on, plus the pause the provider
// demands before a continuation page. Tests swap in a scripted impl with a
// zero pause.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn search(
        &self,
        query: &str,
        region: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, PlacesError>;

    // None when the provider has nothing for the id; missing phones are not an error
    async fn fetch_details(&self, place_id: &str) -> Result<Option<PlaceRecord>, PlacesError>;

    fn page_pause(&self) -> Duration {
        PAGE_TOKEN_DELAY
    }
}

pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    search_url: String,
    details_url: String,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    query: &'a str,
    region: &'a str,
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagetoken: Option<&'a str>,
}

#[derive(Serialize)]
struct DetailsQuery<'a> {
    place_id: &'a str,
    fields: &'a str,
    key: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<PlaceRecord>,
    next_page_token: Option<String>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct DetailsResponse {
    result: Option<PlaceRecord>,
    error_message: Option<String>,
}

impl GooglePlacesClient {
    pub fn new(client: Client, api_key: String) -> Self {
        GooglePlacesClient {
            client,
            api_key,
            search_url: SEARCH_URL.to_string(),
            details_url: DETAILS_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_endpoints(
        client: Client,
        api_key: String,
        search_url: String,
        details_url: String,
    ) -> Self {
        GooglePlacesClient {
            client,
            api_key,
            search_url,
            details_url,
        }
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn search(
        &self,
        query: &str,
        region: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, PlacesError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&SearchQuery {
                query,
                region,
                key: &self.api_key,
                pagetoken: page_token,
            })
            .send()
            .await?
            .json::<SearchResponse>()
            .await?;

        if let Some(message) = response.error_message {
            return Err(PlacesError::Provider(message));
        }

        Ok(SearchPage {
            candidates: response.results,
            next_page_token: response.next_page_token,
        })
    }

    async fn fetch_details(&self, place_id: &str) -> Result<Option<PlaceRecord>, PlacesError> {
        let response = self
            .client
            .get(&self.details_url)
            .query(&DetailsQuery {
                place_id,
                fields: DETAIL_FIELDS,
                key: &self.api_key,
            })
            .send()
            .await?
            .json::<DetailsResponse>()
            .await?;

        if let Some(message) = response.error_message {
            return Err(PlacesError::Provider(message));
        }

        Ok(response.result)
    }
}
