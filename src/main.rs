use std::{net::TcpListener, time::Duration};

use env_logger::Env;
use prospector::{
    configuration::get_configuration,
    domain::QueryJob,
    services::{query_pipeline_handler, JobSender},
    startup::run,
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!("{}:{}", configuration.host, configuration.port);
    let listener = TcpListener::bind(address)?;

    // One connection pool shared by every job; each job pairs it with the
    // api key from its own config snapshot
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client.");

    let (job_sender, job_receiver) = mpsc::unbounded_channel::<QueryJob>();

    // Spawn background tasks
    tokio::spawn(async move { query_pipeline_handler(job_receiver, http_client).await });

    run(listener, JobSender { sender: job_sender })?.await
}
