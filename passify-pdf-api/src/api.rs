use crate::config::ApiConfig;
use crate::form::{render_page, FormSubmission, FormView, ValidSubmission};
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Json, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use passify_pdf::{encrypt_pdf, EncryptError, EncryptionReport};
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Prefix of every staged upload and output file
pub const STAGING_PREFIX: &str = "passifypdf-";

/// Application-specific error types for the web form
#[derive(Debug)]
pub enum AppError {
    /// The submission was incomplete or inconsistent
    Validation(String),
    /// The multipart body could not be read
    Upload(MultipartError),
    /// The encryption operation rejected the document
    Encrypt(EncryptError),
    /// Staging files could not be created, written or read back
    Io(std::io::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upload(e) => e.status(),
            AppError::Encrypt(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Validation(message) => message.clone(),
            AppError::Upload(e) => format!("Could not read the upload: {}", e.body_text()),
            AppError::Encrypt(e) => format!("Encryption failed: {e}"),
            AppError::Io(_) => "Something went wrong while handling the file. Please try again."
                .to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Io(e) => error!(error = %e, "staging failed"),
            other => warn!(error = %other.message(), "request rejected"),
        }

        let message = self.message();
        let page = render_page(&FormView {
            error: Some(&message),
            ..FormView::default()
        });

        (self.status(), Html(page)).into_response()
    }
}

impl From<EncryptError> for AppError {
    fn from(err: EncryptError) -> Self {
        AppError::Encrypt(err)
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Upload(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

/// Build the application router with default settings
pub fn app() -> Router {
    app_with_config(ApiConfig::default())
}

/// Build the application router with all routes configured
pub fn app_with_config(config: ApiConfig) -> Router {
    let body_limit = config.max_upload_bytes;

    Router::new()
        .route("/", get(form_page))
        .route("/encrypt", post(encrypt_handler))
        .route("/api/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}

/// Render the empty form
pub async fn form_page() -> Html<String> {
    Html(render_page(&FormView::default()))
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "passifypdf",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Protect an uploaded PDF and send it back as a download
pub async fn encrypt_handler(
    State(config): State<Arc<ApiConfig>>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_submission(multipart).await?;
    let valid = submission
        .validate()
        .map_err(|message| AppError::Validation(message.to_string()))?;

    let ValidSubmission {
        bytes,
        password,
        download_name,
    } = valid;

    let staging_dir = config.staging_dir.clone();
    let (report, pdf_bytes) = tokio::task::spawn_blocking(move || {
        protect_upload(staging_dir.as_deref(), &bytes, &password)
    })
    .await
    .map_err(|e| AppError::Io(std::io::Error::other(format!("encryption task failed: {e}"))))??;

    info!(
        pages = report.page_count,
        size = pdf_bytes.len(),
        download = %download_name,
        "served protected document"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{download_name}\""),
            ),
            (
                header::HeaderName::from_static("x-page-count"),
                report.page_count.to_string(),
            ),
        ],
        pdf_bytes,
    )
        .into_response())
}

/// Collect the form fields from a multipart body
async fn read_submission(mut multipart: Multipart) -> Result<FormSubmission, AppError> {
    let mut submission = FormSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                submission.upload = Some(field.bytes().await?);
            }
            "password" => submission.password = field.text().await?,
            "confirm_password" => submission.confirm_password = field.text().await?,
            "output_name" => submission.output_name = field.text().await?,
            _ => {}
        }
    }

    Ok(submission)
}

/// Stage `bytes`, encrypt them and read the protected document back.
///
/// Blocking; both staged files are removed when they go out of scope, on
/// every path.
fn protect_upload(
    dir: Option<&Path>,
    bytes: &[u8],
    password: &str,
) -> Result<(EncryptionReport, Vec<u8>), AppError> {
    let input = staging_file(dir)?;
    std::fs::write(input.path(), bytes)?;
    let output = staging_file(dir)?;

    let report = encrypt_pdf(input.path(), output.path(), password)?;
    let pdf_bytes = std::fs::read(output.path())?;
    Ok((report, pdf_bytes))
}

fn staging_file(dir: Option<&Path>) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(STAGING_PREFIX).suffix(".pdf");
    match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
}
