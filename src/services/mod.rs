pub mod notifier;
pub mod phone_filter;
pub mod place_search;
pub mod places_client;
pub mod query_pipeline;
pub mod result_sink;
pub mod workbook;

#[cfg(test)]
pub mod test_support;

pub use notifier::*;
pub use phone_filter::*;
pub use place_search::*;
pub use places_client::*;
pub use query_pipeline::*;
pub use result_sink::*;
pub use workbook::*;
