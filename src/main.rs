mod config;
mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables still apply.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to load .env: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env();

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");
    db::seed_defaults(&pool).await.expect("catalog seeding failed");

    let state = state::AppState::new(pool, &config);

    // Scale reader is optional: without it, submissions use the fallback weight.
    let _scale = match config.scale_device.clone() {
        Some(device) => Some(services::scale::spawn_scale_task(device, config.scale_read_size, state.scale.clone())),
        None => {
            tracing::warn!(
                fallback_weight = config.scale_fallback_weight,
                "SCALE_DEVICE not set — submissions use the fallback weight"
            );
            None
        }
    };

    let app = routes::app(state, &config.static_dir);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "wastewatch listening");
    axum::serve(listener, app).await.expect("server failed");
}
