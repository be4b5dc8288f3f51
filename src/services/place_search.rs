use crate::domain::PlaceRecord;
use crate::services::places_client::{PlacesApi, PlacesError};

// Pagination state for one keyword/country pair. The cursor survives across
// calls, so a re-entry resumes instead of re-reading page one.
#[derive(Debug, Default)]
pub struct SearchSession {
    pub fetched: usize,
    pub cursor: Option<String>,
    pub exhausted: bool,
}

// The fetch cap is checked before each page is requested, so one page may
// push the session count past it. A provider-reported error ends the walk
// with whatever was gathered; a transport failure propagates.
pub async fn collect_candidates<A: PlacesApi>(
    api: &A,
    keyword: &str,
    country: &str,
    session: &mut SearchSession,
    fetch_limit: usize,
) -> Result<Vec<PlaceRecord>, PlacesError> {
    let mut collected: Vec<PlaceRecord> = Vec::new();

    while !session.exhausted && session.fetched < fetch_limit {
        if session.cursor.is_some() {
            log::info!(
                "Waiting {:?} before the next page of '{}' in {}",
                api.page_pause(),
                keyword,
                country
            );
            tokio::time::sleep(api.page_pause()).await;
        }

        let page = match api.search(keyword, country, session.cursor.as_deref()).await {
            Ok(page) => page,
            Err(PlacesError::Provider(message)) => {
                log::error!(
                    "Places api error for '{}' in {}: {}",
                    keyword,
                    country,
                    message
                );
                session.exhausted = true;
                break;
            }
            Err(err) => return Err(err),
        };

        if page.candidates.is_empty() {
            session.exhausted = true;
            break;
        }

        session.fetched += page.candidates.len();
        collected.extend(page.candidates.into_iter().map(|mut candidate| {
            candidate.country = Some(country.to_string());
            candidate
        }));

        match page.next_page_token {
            Some(token) => session.cursor = Some(token),
            None => {
                session.exhausted = true;
                break;
            }
        }
    }

    Ok(collected)
}
