use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlaceRecord {
    pub place_id: String,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub business_status: Option<String>,
    pub rating: Option<f32>,
    pub price_level: Option<u8>,
    pub website: Option<String>,
    pub icon: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    // Assigned when the record is fetched, never present in provider payloads
    #[serde(skip)]
    pub country: Option<String>,
}

impl PlaceRecord {
    pub fn has_phone(&self) -> bool {
        self.formatted_phone_number.is_some() || self.international_phone_number.is_some()
    }
}
