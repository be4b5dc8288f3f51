use crate::domain::PlaceRecord;
use crate::services::places_client::{PlacesApi, PlacesError};

// The quota is strict, unlike the fetch cap upstream. The country tag comes
// from the candidate, never from the detail payload.
pub async fn filter_with_phone<A: PlacesApi>(
    api: &A,
    candidates: &[PlaceRecord],
    remaining_quota: usize,
) -> Result<Vec<PlaceRecord>, PlacesError> {
    let mut filtered: Vec<PlaceRecord> = Vec::new();

    for candidate in candidates {
        if filtered.len() >= remaining_quota {
            break;
        }

        let details = match api.fetch_details(&candidate.place_id).await? {
            Some(details) => details,
            None => continue,
        };

        if details.has_phone() {
            let mut record = details;
            record.country = candidate.country.clone();
            filtered.push(record);
        }
    }

    Ok(filtered)
}
