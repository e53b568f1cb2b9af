use actix_cors::Cors;
use actix_files::NamedFile;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use hemicycle_storage::SnapshotStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::UNIX_EPOCH;
use tracing::{error, info, warn};

#[derive(Serialize)]
struct MeasureInfo<'a> {
    key: &'a str,
    title: &'a str,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(store: Arc<SnapshotStore>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(store.clone()))
                .configure(Self::routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Route table, expects `web::Data<Arc<SnapshotStore>>` in app data
    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::get().to(status))
            .route("/groups", web::get().to(list_groups))
            .route("/measures", web::get().to(list_measures))
            .route("/submit", web::post().to(submit_votes))
            .route("/reload", web::post().to(reload))
            .route("/dendrograms/{filename}", web::get().to(get_dendrogram));
    }
}

async fn status(store: web::Data<Arc<SnapshotStore>>) -> ActixResult<HttpResponse> {
    let snapshot = store.current();
    let loaded_at = snapshot
        .loaded_at()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "title": "hemicycle",
        "loaded_at": loaded_at,
        "version": env!("CARGO_PKG_VERSION"),
        "members": snapshot.matrix().n_members(),
        "measures": snapshot.matrix().n_measures(),
        "groups": snapshot.visible_groups().len(),
        "skipped": snapshot.skipped().len(),
    })))
}

async fn list_groups(store: web::Data<Arc<SnapshotStore>>) -> ActixResult<HttpResponse> {
    let snapshot = store.current();
    let groups: serde_json::Map<String, serde_json::Value> = snapshot
        .visible_groups()
        .iter()
        .map(|(label, names)| (format!("Group {}", label), serde_json::json!(names)))
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": groups
    })))
}

async fn list_measures(store: web::Data<Arc<SnapshotStore>>) -> ActixResult<HttpResponse> {
    let snapshot = store.current();
    let titles = snapshot.titles();
    let measures: Vec<MeasureInfo> = titles
        .entries()
        .map(|(key, title)| MeasureInfo { key, title })
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": measures,
        "ambiguous": titles.ambiguities(),
    })))
}

async fn submit_votes(
    store: web::Data<Arc<SnapshotStore>>,
    req: web::Json<BTreeMap<String, String>>,
) -> ActixResult<HttpResponse> {
    let answers = req.into_inner();
    if answers.is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "No answers provided"
        })));
    }

    let snapshot = store.current();
    match snapshot.top_matches(answers) {
        Ok(top) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": top
        }))),
        Err(e) => {
            warn!("Rejected submission: {}", e);
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

async fn reload(store: web::Data<Arc<SnapshotStore>>) -> ActixResult<HttpResponse> {
    let store = store.get_ref().clone();
    let reloaded = web::block(move || store.reload()).await;

    match reloaded {
        Ok(Ok(snapshot)) => {
            info!("Reload requested over HTTP");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "result": {
                    "members": snapshot.matrix().n_members(),
                    "measures": snapshot.matrix().n_measures(),
                    "groups": snapshot.visible_groups().len(),
                    "skipped": snapshot.skipped().len(),
                }
            })))
        }
        Ok(Err(e)) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        }))),
        Err(e) => {
            error!("Reload task failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Reload failed"
            })))
        }
    }
}

async fn get_dendrogram(
    store: web::Data<Arc<SnapshotStore>>,
    path: web::Path<String>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let filename = path.into_inner();
    let not_found = || {
        HttpResponse::NotFound().json(serde_json::json!({
            "error": "Dendrogram not found"
        }))
    };

    // Plain file names only
    if Path::new(&filename).file_name().and_then(|n| n.to_str()) != Some(filename.as_str()) {
        return Ok(not_found());
    }

    let dir = match store
        .config()
        .dendrogram_path
        .as_deref()
        .and_then(Path::parent)
    {
        Some(dir) => dir.to_path_buf(),
        None => return Ok(not_found()),
    };

    match NamedFile::open(dir.join(&filename)) {
        Ok(file) => Ok(file.into_response(&req)),
        Err(_) => Ok(not_found()),
    }
}
