pub mod default_route;
pub mod query_route;
