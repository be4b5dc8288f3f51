use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::{
    configuration::get_configuration,
    domain::{QueryJob, QueryRequest},
    services::JobSender,
};

#[derive(Deserialize)]
struct QueryBody {
    keywords: String,
    countries: Vec<String>,
    email: String,
}

// Configuration is read per submission so the job carries its own snapshot
#[post("/query")]
async fn submit_query(
    body: web::Json<QueryBody>,
    job_sender: web::Data<JobSender>,
) -> HttpResponse {
    let settings = match get_configuration() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to read configuration: {:?}", e);
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "success": false }));
        }
    };

    let body = body.into_inner();
    let request = QueryRequest::new(&body.keywords, body.countries, body.email);
    log::info!(
        "Queueing lookup for keywords {:?} in countries {:?}",
        request.keywords,
        request.countries
    );

    match job_sender.sender.send(QueryJob { request, settings }) {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => {
            log::error!("Found error while queueing query job: {:?}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "success": false }))
        }
    }
}
