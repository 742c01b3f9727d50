//! Credential file submission

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::parse_records;
use crate::utils::error::CheckerError;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};
use futures::StreamExt;
use serde::Serialize;
use tracing::{info, warn};

/// Configure submission routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", web::post().to(upload_accounts));
}

/// Reply to an accepted submission
#[derive(Debug, Clone, Serialize)]
pub struct UploadAccepted {
    pub message: String,
    pub filename: String,
    pub batch_id: String,
    pub total: usize,
}

/// Accept a credential file (multipart field `file`) and start a batch
///
/// Replies 202 right away; progress is only visible on the event stream.
pub async fn upload_accounts(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let limit = state.config.server().max_body_size;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item
            .map_err(|e| CheckerError::bad_request(format!("Invalid multipart data: {}", e)))?;

        if field.name() != Some("file") {
            while field.next().await.is_some() {}
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("accounts.csv")
            .to_string();

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let bytes = chunk
                .map_err(|e| CheckerError::bad_request(format!("Error reading file: {}", e)))?;
            if data.len() + bytes.len() > limit {
                return Err(CheckerError::bad_request(format!(
                    "Uploaded file exceeds {} bytes",
                    limit
                ))
                .into());
            }
            data.extend_from_slice(&bytes);
        }
        upload = Some((filename, data));
    }

    let (filename, data) = upload.ok_or_else(|| CheckerError::bad_request("No file uploaded"))?;

    let records = parse_records(&data).map_err(|e| {
        warn!(filename = %filename, "Rejected upload: {}", e);
        CheckerError::from(e)
    })?;

    let ticket = state.coordinator.submit(records).await?;
    info!(
        batch_id = %ticket.batch_id,
        filename = %filename,
        total = ticket.total,
        "Upload accepted"
    );

    Ok(HttpResponse::Accepted().json(ApiResponse::success(UploadAccepted {
        message: "File uploaded successfully, processing started".to_string(),
        filename,
        batch_id: ticket.batch_id.clone(),
        total: ticket.total,
    })))
}
