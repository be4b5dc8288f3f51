use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::PlaceRecord;
use crate::services::places_client::{PlacesApi, PlacesError, SearchPage};
use crate::services::result_sink::ResultSink;

// Scripted stand-in for the remote place provider; every call is recorded
// so tests can assert on traffic
pub struct ScriptedApi {
    pages: Mutex<VecDeque<Result<SearchPage, PlacesError>>>,
    details: Mutex<HashMap<String, Option<PlaceRecord>>>,
    failing_details: Mutex<HashSet<String>>,
    pub search_calls: Mutex<Vec<(String, String, Option<String>)>>,
    pub detail_calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        ScriptedApi {
            pages: Mutex::new(VecDeque::new()),
            details: Mutex::new(HashMap::new()),
            failing_details: Mutex::new(HashSet::new()),
            search_calls: Mutex::new(Vec::new()),
            detail_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_page(&self, candidates: Vec<PlaceRecord>, token: Option<&str>) {
        self.pages.lock().unwrap().push_back(Ok(SearchPage {
            candidates,
            next_page_token: token.map(String::from),
        }));
    }

    pub fn push_provider_error(&self, message: &str) {
        self.pages
            .lock()
            .unwrap()
            .push_back(Err(PlacesError::Provider(message.to_string())));
    }

    pub fn push_error(&self, err: PlacesError) {
        self.pages.lock().unwrap().push_back(Err(err));
    }

    pub fn script_details(&self, record: PlaceRecord) {
        self.details
            .lock()
            .unwrap()
            .insert(record.place_id.clone(), Some(record));
    }

    pub fn script_missing_details(&self, place_id: &str) {
        self.details
            .lock()
            .unwrap()
            .insert(place_id.to_string(), None);
    }

    pub fn fail_details(&self, place_id: &str) {
        self.failing_details
            .lock()
            .unwrap()
            .insert(place_id.to_string());
    }

    pub fn searched_regions(&self) -> Vec<String> {
        self.search_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, region, _)| region.clone())
            .collect()
    }
}

#[async_trait]
impl PlacesApi for ScriptedApi {
    async fn search(
        &self,
        query: &str,
        region: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, PlacesError> {
        self.search_calls.lock().unwrap().push((
            query.to_string(),
            region.to_string(),
            page_token.map(String::from),
        ));
        match self.pages.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(SearchPage {
                candidates: vec![],
                next_page_token: None,
            }),
        }
    }

    async fn fetch_details(&self, place_id: &str) -> Result<Option<PlaceRecord>, PlacesError> {
        self.detail_calls.lock().unwrap().push(place_id.to_string());
        if self.failing_details.lock().unwrap().contains(place_id) {
            return Err(PlacesError::Provider(format!(
                "detail lookup refused for {}",
                place_id
            )));
        }
        Ok(self
            .details
            .lock()
            .unwrap()
            .get(place_id)
            .cloned()
            .flatten())
    }

    fn page_pause(&self) -> Duration {
        Duration::ZERO
    }
}

// Records every sink invocation instead of touching disk or SMTP
pub struct RecordingSink {
    pub writes: Mutex<Vec<(Vec<PlaceRecord>, String)>>,
    pub sends: Mutex<Vec<(String, String, PathBuf)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        RecordingSink {
            writes: Mutex::new(Vec::new()),
            sends: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ResultSink for RecordingSink {
    async fn write(&self, results: &[PlaceRecord], label: &str) -> anyhow::Result<PathBuf> {
        self.writes
            .lock()
            .unwrap()
            .push((results.to_vec(), label.to_string()));
        Ok(PathBuf::from(format!("data/{}.csv", label)))
    }

    async fn send(&self, to: &str, subject: &str, _body: &str, attachment: &Path) {
        self.sends.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            attachment.to_path_buf(),
        ));
    }
}

// Sink double whose write always fails
pub struct FailingWriteSink {
    pub sends: Mutex<Vec<(String, String, PathBuf)>>,
}

impl FailingWriteSink {
    pub fn new() -> Self {
        FailingWriteSink {
            sends: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ResultSink for FailingWriteSink {
    async fn write(&self, _results: &[PlaceRecord], label: &str) -> anyhow::Result<PathBuf> {
        Err(anyhow::anyhow!("no space left writing {}", label))
    }

    async fn send(&self, to: &str, subject: &str, _body: &str, attachment: &Path) {
        self.sends.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            attachment.to_path_buf(),
        ));
    }
}

pub fn search_hit(place_id: &str) -> PlaceRecord {
    PlaceRecord {
        place_id: place_id.to_string(),
        name: Some(format!("Place {}", place_id)),
        formatted_address: Some("12 Main St, Springfield".to_string()),
        business_status: Some("OPERATIONAL".to_string()),
        rating: Some(4.2),
        price_level: Some(2),
        website: None,
        icon: None,
        formatted_phone_number: None,
        international_phone_number: None,
        country: None,
    }
}

pub fn detail_with_phone(place_id: &str) -> PlaceRecord {
    let mut record = search_hit(place_id);
    record.formatted_phone_number = Some("(02) 5550 1234".to_string());
    record.website = Some("https://example.com".to_string());
    record
}

pub fn detail_without_phone(place_id: &str) -> PlaceRecord {
    let mut record = search_hit(place_id);
    record.website = Some("https://example.com".to_string());
    record
}

// A real connection-refused reqwest error, for scripting transport failures
pub async fn transport_error() -> PlacesError {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = reqwest::Client::new()
        .get(format!("http://127.0.0.1:{}/", port))
        .send()
        .await
        .unwrap_err();
    PlacesError::Transport(err)
}
