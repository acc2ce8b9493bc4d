use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpResponse, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod bulk;
pub mod form;
pub mod pdf;
pub mod state;
pub mod storage;
pub mod template;

pub use crate::state::AppState;
pub use crate::template::ClassCategory;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn conflict(message: &str) -> Self {
        Self::new("Conflict", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

/// Resolve a `{category}` path segment, or build the 400 response inline.
pub fn parse_category(slug: &str) -> Result<ClassCategory, HttpResponse> {
    ClassCategory::from_slug(slug).ok_or_else(|| {
        HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
            "unknown class category: {slug}"
        )))
    })
}

pub async fn run() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::form::handlers::get_form,
            crate::form::handlers::set_field,
            crate::form::handlers::set_fields,
            crate::form::handlers::reset_form,
            crate::form::handlers::autofill_form,
            crate::form::handlers::get_fields,
            crate::bulk::handlers::get_csv_template,
            crate::pdf::handlers::render_form,
            crate::bulk::handlers::render_bulk,
        ),
        components(
            schemas(
                form::handlers::SetFieldRequest,
                form::handlers::AutofillRequest,
                form::classify::CategoryPartition,
                form::autofill::Term,
                template::ClassCategory,
                template::TemplateSchema,
                template::FieldDescriptor,
                template::PageSize,
                template::Position,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Form Service", description = "Form field map and classification endpoints."),
            (name = "Render Service", description = "Single and bulk PDF rendering endpoints.")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file

    let data_dir = std::env::var("REPORT_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let storage = Arc::new(crate::storage::LocalObjectStorage::new(PathBuf::from(
        data_dir,
    )));

    let app_state = match AppState::new_with_storage(storage).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to initialize application state: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("report_card_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    log::info!("Starting server at http://{}", bind_addr);

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/form/{category}")
                            .route(web::get().to(form::handlers::get_form))
                            .route(web::patch().to(form::handlers::set_fields))
                            .route(web::delete().to(form::handlers::reset_form)),
                    )
                    .service(
                        web::resource("/form/{category}/field")
                            .route(web::put().to(form::handlers::set_field)),
                    )
                    .service(
                        web::resource("/form/{category}/autofill")
                            .route(web::post().to(form::handlers::autofill_form)),
                    )
                    .service(
                        web::resource("/form/{category}/fields")
                            .route(web::get().to(form::handlers::get_fields)),
                    )
                    .service(
                        web::resource("/form/{category}/csv-template")
                            .route(web::get().to(bulk::handlers::get_csv_template)),
                    )
                    .service(
                        web::resource("/render/{category}")
                            .route(web::post().to(pdf::handlers::render_form)),
                    )
                    .service(
                        web::resource("/render/{category}/bulk")
                            .route(web::post().to(bulk::handlers::render_bulk)),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
