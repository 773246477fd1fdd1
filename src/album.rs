// src/album.rs

use crate::{
    api::ApiClient,
    errors::{PlatformError, PlatformResult},
    models::Solution,
};
use std::{fs, path::Path};
use tracing::info;

/// Where the solutions document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumSource<'a> {
    Remote(&'a str),
    Local(&'a Path),
}

impl<'a> AlbumSource<'a> {
    pub fn parse(source: &'a str) -> Self {
        let lowered = source.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            AlbumSource::Remote(source)
        } else {
            AlbumSource::Local(Path::new(source))
        }
    }
}

/// Loads the album in document order.
pub async fn load_solutions(client: &ApiClient, source: &str) -> PlatformResult<Vec<Solution>> {
    let solutions = match AlbumSource::parse(source) {
        AlbumSource::Remote(url) => client.fetch_solutions(url).await?,
        AlbumSource::Local(path) => read_solutions_file(path)?,
    };
    info!("loaded {} solutions from {}", solutions.len(), source);
    Ok(solutions)
}

fn read_solutions_file(path: &Path) -> PlatformResult<Vec<Solution>> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        PlatformError::decode_error(format!("{} is not a solutions list: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn source_kind_is_picked_from_scheme() {
        assert_eq!(
            AlbumSource::parse("https://portal.local/solutions.json"),
            AlbumSource::Remote("https://portal.local/solutions.json")
        );
        assert_eq!(
            AlbumSource::parse("assets/solutions.json"),
            AlbumSource::Local(Path::new("assets/solutions.json"))
        );
    }

    #[tokio::test]
    async fn loads_local_file_in_order() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("solutions.json");
        fs::write(
            &file,
            r#"[
                {"id": 2, "image": "/b.png", "title": "Second", "description": "b"},
                {"id": 1, "image": "/a.png", "title": "First", "description": "a"}
            ]"#,
        )
        .unwrap();

        let client = ApiClient::from_urls("http://unused.invalid", "http://unused.invalid");
        let solutions = load_solutions(&client, file.to_str().unwrap()).await.unwrap();

        let titles: Vec<&str> = solutions.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn missing_local_file_is_io_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nope.json");
        let client = ApiClient::from_urls("http://unused.invalid", "http://unused.invalid");

        let err = load_solutions(&client, file.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, PlatformError::Io(_)));
    }

    #[tokio::test]
    async fn loads_remote_document() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/solutions.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "erp", "image": "/erp.png", "title": "ERP", "description": "Back office" }
            ])))
            .mount(&mock_server)
            .await;

        let client = ApiClient::from_urls(&mock_server.uri(), &mock_server.uri());
        let url = format!("{}/solutions.json", mock_server.uri());
        let solutions = load_solutions(&client, &url).await.unwrap();

        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].title, "ERP");
    }

    #[test]
    fn bundled_album_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/solutions.json");
        let solutions = read_solutions_file(&path).unwrap();
        assert!(!solutions.is_empty());
    }
}
