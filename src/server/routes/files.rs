//! Result file download

use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::debug;

/// Configure download routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/download/{filename}", web::get().to(download_result));
}

/// Serve a result artifact as a CSV attachment
pub async fn download_result(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let filename = path.into_inner();
    let content = state.store.read_artifact(&filename).await?;
    debug!("Serving {} ({} bytes)", filename, content.len());

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(content))
}
