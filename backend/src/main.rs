use actix_files::Files;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;

use backend::config::Config;
use backend::mailer;
use backend::services;
use backend::state::AppState;
use backend::store::dossiers::DossierStore;
use backend::store::submissions::SubmissionStore;
use backend::store::uploads::UploadStore;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Serves the embedded form and admin pages.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let uploads = UploadStore::new(&config.upload_dir);
    if let Err(e) = uploads.ensure_dir() {
        error!("cannot create upload directory: {}", e);
        std::process::exit(1);
    }

    let dossiers = DossierStore::new(&config.db_path);
    if let Err(e) = dossiers.init_schema() {
        error!("cannot initialize dossier database: {}", e);
        std::process::exit(1);
    }

    let mailer = mailer::start(config.smtp.clone(), config.ops_email.clone());

    let state = web::Data::new(AppState {
        dossiers,
        submissions: SubmissionStore::new(&config.data_path),
        uploads,
        mailer,
        fonts_dir: config.fonts_dir.clone(),
    });

    let bind = config.bind_address();
    let upload_dir = config.upload_dir.clone();
    info!("Server running at http://{}", bind);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(services::intake::configure_routes())
            .service(services::dossiers::configure_routes())
            .service(services::submissions::configure_routes())
            // Raw stored-file retrieval; unauthenticated, like the rest of
            // the admin surface.
            .service(Files::new("/uploads", upload_dir.clone()))
            .default_service(web::route().to(serve_embedded))
    })
    .bind(bind.as_str())?
    .run()
    .await
}
