#[cfg(feature = "server")]
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use actix_web::{middleware::Logger, web, App, HttpServer};
    use reviewware::api::{routes, AppState};
    use reviewware::config::{self, Config};
    use reviewware::dataset;
    use reviewware::sentiment::{LexiconScorer, SentimentScorer};
    use reviewware::store::ReviewStore;
    use std::sync::Arc;
    use tracing::info;
    use tracing_subscriber::fmt;

    let directives = std::env::var("RUST_LOG").ok();
    fmt()
        .with_env_filter(config::log_filter(directives.as_deref()))
        .init();

    // Any failure up to here aborts before the socket is bound
    let config = Config::load()?;
    let raw_reviews = dataset::load_reviews(&config.reviews_path)?;

    info!("Scoring {} reviews...", raw_reviews.len());
    let scorer: Arc<dyn SentimentScorer> = Arc::new(LexiconScorer::new());
    let store = ReviewStore::initialize(raw_reviews, scorer.as_ref());

    let state = web::Data::new(AppState::new(store, scorer, config.score_on_write));
    if config.score_on_write {
        info!("Submitted reviews will be scored on write");
    }

    let max_body_bytes = config.max_body_bytes;
    let address = (config.host.clone(), config.port);
    info!("Listening on {}:{}...", address.0, address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes(max_body_bytes))
    })
    .bind(address)?
    .run()
    .await?;

    info!("Server shutting down...");
    Ok(())
}

#[cfg(not(feature = "server"))]
pub fn main() {
    // no HTTP transport without the `server` feature;
    // the library can still be used to load, score and filter reviews
}
