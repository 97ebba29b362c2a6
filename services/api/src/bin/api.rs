//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        JsonFileStore, OpenAiImageAdapter, OpenAiQuizAdapter, OpenAiTopicAdapter,
        OpenAiTranslateAdapter, OpenAiTtsAdapter, OpenAiTutorAdapter,
    },
    config::Config,
    error::ApiError,
    web::{
        ask_handler, dashboard_handler, history_handler, progress_handler, quiz_handler,
        rest::ApiDoc, speak_handler, state::AppState, translate_handler,
    },
};
use async_openai::{
    config::OpenAIConfig,
    types::{SpeechModel, Voice},
    Client,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use study_buddy_core::tracker::ProgressTracker;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Document Store ---
    info!("Opening document store at {}", config.data_dir.display());
    let store = Arc::new(JsonFileStore::open(&config.data_dir).await?);
    let tracker = Arc::new(ProgressTracker::new(store.clone()));

    // --- 3. Initialize Service Adapters ---
    let openai_config = OpenAIConfig::new().with_api_key(
        config
            .openai_api_key
            .as_ref()
            .ok_or_else(|| ApiError::Internal("OPENAI_API_KEY is required".to_string()))?,
    );
    let openai_client = Client::with_config(openai_config);

    let tutor_adapter = Arc::new(OpenAiTutorAdapter::new(
        openai_client.clone(),
        config.tutor_model.clone(),
    ));
    let topic_adapter = Arc::new(OpenAiTopicAdapter::new(
        openai_client.clone(),
        config.topic_model.clone(),
    ));
    let translate_adapter = Arc::new(OpenAiTranslateAdapter::new(
        openai_client.clone(),
        config.translate_model.clone(),
    ));
    let image_adapter = Arc::new(OpenAiImageAdapter::new(
        openai_client.clone(),
        config.image_model.clone(),
    ));
    let quiz_adapter = Arc::new(OpenAiQuizAdapter::new(
        openai_client.clone(),
        config.quiz_model.clone(),
    ));

    let tts_voice = match config.tts_voice.to_lowercase().as_str() {
        "alloy" => Voice::Alloy,
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        _ => {
            return Err(ApiError::Internal(format!(
                "Invalid TTS voice specified in config: '{}'",
                config.tts_voice
            )))
        }
    };
    let tts_adapter = Arc::new(OpenAiTtsAdapter::new(
        openai_client.clone(),
        SpeechModel::Tts1Hd,
        tts_voice,
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        store,
        tracker,
        config: config.clone(),
        tutor_adapter,
        topic_adapter,
        translate_adapter,
        image_adapter,
        tts_adapter,
        quiz_adapter,
    });

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN: {}", e)))?,
        )
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/ask", post(ask_handler))
        .route("/quiz", post(quiz_handler))
        .route("/translate", post(translate_handler))
        .route("/speak", post(speak_handler))
        .route("/history", get(history_handler))
        .route("/progress", get(progress_handler))
        .route("/dashboard", get(dashboard_handler))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
