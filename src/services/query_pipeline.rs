use tokio::sync::mpsc;

use crate::domain::{PlaceRecord, QueryJob};
use crate::services::phone_filter::filter_with_phone;
use crate::services::place_search::{collect_candidates, SearchSession};
use crate::services::places_client::{GooglePlacesClient, PlacesApi};
use crate::services::result_sink::{CsvMailSink, ResultSink};

const RESULTS_EMAIL_BODY: &str = "Please find the search results attached.";

pub struct JobSender {
    pub sender: mpsc::UnboundedSender<QueryJob>,
}

// Every dequeued job gets its own task, client, and sink from its config
// snapshot; jobs share nothing but the HTTP connection pool
pub async fn query_pipeline_handler(
    mut job_receiver: mpsc::UnboundedReceiver<QueryJob>,
    http_client: reqwest::Client,
) {
    log::info!("Started query pipeline handler");

    while let Some(job) = job_receiver.recv().await {
        log::info!(
            "Accepted query job: {} keyword(s) across {} country(ies), limit {}, results to {}",
            job.request.keywords.len(),
            job.request.countries.len(),
            job.settings.limit,
            job.request.email
        );

        let api = GooglePlacesClient::new(http_client.clone(), job.settings.api_key.clone());
        let sink = CsvMailSink::new(job.settings.clone());
        tokio::spawn(async move { process_query(job, &api, &sink).await });
    }
}

// Walks keyword/country pairs until the limit is reached or every pair is
// exhausted, then hands the accumulated set to the sink exactly once. Fetch
// or filter failures abandon the pair they happened in, never the job.
pub async fn process_query<A: PlacesApi, S: ResultSink>(job: QueryJob, api: &A, sink: &S) {
    let limit = job.settings.limit;
    let mut results: Vec<PlaceRecord> = Vec::new();

    for keyword in &job.request.keywords {
        if results.len() >= limit {
            break;
        }
        for country in &job.request.countries {
            if results.len() >= limit {
                break;
            }

            let mut session = SearchSession::default();
            while results.len() < limit {
                let candidates =
                    match collect_candidates(api, keyword, country, &mut session, limit).await {
                        Ok(candidates) => candidates,
                        Err(e) => {
                            log::error!("Abandoning '{}' in {}: {}", keyword, country, e);
                            break;
                        }
                    };
                if candidates.is_empty() {
                    log::info!("No more results for '{}' in {}", keyword, country);
                    break;
                }

                match filter_with_phone(api, &candidates, limit - results.len()).await {
                    Ok(kept) => results.extend(kept),
                    Err(e) => {
                        log::error!("Abandoning '{}' in {}: {}", keyword, country, e);
                        break;
                    }
                }
            }
        }
    }

    if results.len() >= limit {
        log::info!(
            "Query complete: reached the configured limit of {} results",
            limit
        );
    } else {
        log::info!(
            "Query complete: {} result(s) after exhausting every keyword and country",
            results.len()
        );
    }

    let label = job.request.label();
    match sink.write(&results, &label).await {
        Ok(path) => {
            log::info!("Results written to {}", path.display());
            sink.send(
                &job.request.email,
                &job.request.subject(),
                RESULTS_EMAIL_BODY,
                &path,
            )
            .await;
        }
        Err(e) => log::error!("Failed to write results workbook: {:?}", e),
    }
}
