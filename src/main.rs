mod actions;
mod config;
mod flows;
mod model;
mod web;

use actix_files as fs;
use actix_web::{web::Data, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::info;
use std::sync::Arc;
use tera::Tera;

use config::Settings;
use model::{ModelProvider, OpenAiCompatibleProvider};
use web::routes;

// App state structure
struct AppState {
    tera: Tera,
    provider: Arc<dyn ModelProvider>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting emotion chat application");

    let settings = Settings::from_env().context("failed to read settings")?;

    let provider: Arc<dyn ModelProvider> = Arc::new(
        OpenAiCompatibleProvider::new(&settings).context("failed to initialize model provider")?,
    );
    info!("Model provider `{}` initialized", provider.id());

    // Initialize template engine
    let mut tera = Tera::new("templates/**/*").context("template parsing error")?;
    tera.autoescape_on(vec![".html"]);

    let app_state = Data::new(AppState { tera, provider });

    info!("Listening on {}:{}", settings.host, settings.port);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
            .service(fs::Files::new("/static", "./static"))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}
