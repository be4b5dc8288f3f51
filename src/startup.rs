use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{default_route, query_route},
    services::JobSender,
};

pub fn run(listener: TcpListener, job_sender: JobSender) -> Result<Server, std::io::Error> {
    let job_sender = web::Data::new(job_sender);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(default_route::index)
            .service(query_route::submit_query)
            .app_data(job_sender.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
