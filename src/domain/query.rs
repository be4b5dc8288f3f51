use crate::configuration::Settings;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub keywords: Vec<String>,
    pub countries: Vec<String>,
    pub email: String,
}

impl QueryRequest {
    pub fn new(raw_keywords: &str, countries: Vec<String>, email: String) -> Self {
        let keywords = split_keywords(raw_keywords);
        let countries = countries
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            keywords,
            countries,
            email,
        }
    }

    // Workbook filename stem, also every row's keyword cell
    pub fn label(&self) -> String {
        self.keywords.join("_")
    }

    pub fn subject(&self) -> String {
        format!("Search results for {}", self.keywords.join(", "))
    }
}

pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

// The request plus the config snapshot it was submitted under
#[derive(Debug, Clone)]
pub struct QueryJob {
    pub request: QueryRequest,
    pub settings: Settings,
}
