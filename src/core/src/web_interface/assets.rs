use rust_embed::RustEmbed;
use warp::{http::StatusCode, reply, Rejection, Reply};

/// Page template and static files compiled into the binary.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/assets"]
pub struct Assets;

pub const INDEX_TEMPLATE: &str = "index.html";

/// Looks up `static/<path>` and replies with its bytes and guessed MIME type.
pub async fn serve_static(path: &str) -> Result<reply::Response, Rejection> {
    let Some(file) = Assets::get(&format!("static/{}", path)) else {
        return Err(warp::reject::not_found());
    };
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let res = reply::with_status(
        reply::with_header(file.data.into_owned(), "Content-Type", mime.to_string()),
        StatusCode::OK,
    )
    .into_response();
    Ok(res)
}

pub fn template(name: &str) -> Option<String> {
    Assets::get(name).map(|file| String::from_utf8_lossy(&file.data).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_files_present() {
        assert!(Assets::get("static/script.js").is_some());
        assert!(Assets::get("static/style.css").is_some());
        assert!(template(INDEX_TEMPLATE).is_some());
    }

    #[tokio::test]
    async fn test_serve_static_sets_content_type() {
        let res = serve_static("script.js").await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let ct = res.headers()["content-type"].to_str().unwrap();
        assert!(ct.contains("javascript"), "unexpected content type {}", ct);
    }

    #[tokio::test]
    async fn test_serve_static_unknown_file_is_rejected() {
        assert!(serve_static("missing.js").await.is_err());
        assert!(serve_static("../index.html").await.is_err());
    }
}
