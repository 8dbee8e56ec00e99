//! Figma REST API client
//!
//! Thin authenticated GET wrapper around the endpoints the tool layer
//! consumes. Every response comes back as an untyped `serde_json::Value`
//! tree; interpretation belongs to `fig_core`. Any transport or API failure
//! collapses into the single `FetchFailed` condition, and no call here
//! retries or caches.

use fig_common::{FigError, Result};
use fig_config::Config;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

/// Output format for node rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = FigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "svg" => Ok(ImageFormat::Svg),
            "pdf" => Ok(ImageFormat::Pdf),
            other => Err(FigError::ValidationError(format!(
                "Unknown image format '{}'. Expected png, jpg, svg, or pdf",
                other
            ))),
        }
    }
}

/// Client for the Figma REST API
pub struct FigmaClient {
    http: reqwest::Client,
    api_base: String,
}

impl FigmaClient {
    /// Build a client from an explicit configuration value
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut token_value = reqwest::header::HeaderValue::from_str(&config.token)
            .map_err(|_| FigError::ConfigError("Token contains invalid characters".to_string()))?;
        token_value.set_sensitive(true);
        headers.insert("X-Figma-Token", token_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FigError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Authenticated GET returning the parsed JSON body
    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!(target: "figma_api", %url, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FigError::FetchFailed(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| FigError::FetchFailed(e.to_string()))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| FigError::FetchFailed(e.to_string()))
    }

    /// `GET /v1/files/:key` - full file tree with metadata
    ///
    /// `depth` limits document tree traversal server-side; `node_ids`
    /// restricts the response to specific subtrees.
    pub async fn get_file(
        &self,
        file_key: &str,
        depth: Option<u32>,
        node_ids: Option<&[String]>,
    ) -> Result<Value> {
        let mut query = Vec::new();
        if let Some(depth) = depth {
            query.push(("depth", depth.to_string()));
        }
        if let Some(ids) = node_ids {
            if !ids.is_empty() {
                query.push(("ids", ids.join(",")));
            }
        }
        self.fetch(&format!("/v1/files/{}", file_key), &query).await
    }

    /// `GET /v1/files/:key/nodes?ids=` - specific node subtrees by id
    pub async fn get_file_nodes(&self, file_key: &str, node_ids: &[String]) -> Result<Value> {
        let query = vec![("ids", node_ids.join(","))];
        self.fetch(&format!("/v1/files/{}/nodes", file_key), &query)
            .await
    }

    /// `GET /v1/images/:key?ids=` - render nodes as images
    ///
    /// Returns per-id download URLs; a null URL means the render failed for
    /// that node.
    pub async fn get_images(
        &self,
        file_key: &str,
        node_ids: &[String],
        format: ImageFormat,
        scale: Option<f64>,
    ) -> Result<Value> {
        let mut query = vec![
            ("ids", node_ids.join(",")),
            ("format", format.as_str().to_string()),
        ];
        if let Some(scale) = scale {
            query.push(("scale", scale.to_string()));
        }
        self.fetch(&format!("/v1/images/{}", file_key), &query).await
    }

    /// `GET /v1/files/:key/styles` - published styles
    pub async fn get_file_styles(&self, file_key: &str) -> Result<Value> {
        self.fetch(&format!("/v1/files/{}/styles", file_key), &[])
            .await
    }

    /// `GET /v1/files/:key/variables/local` - design variables
    ///
    /// Requires Enterprise plan access on the Figma side.
    pub async fn get_local_variables(&self, file_key: &str) -> Result<Value> {
        self.fetch(&format!("/v1/files/{}/variables/local", file_key), &[])
            .await
    }

    /// `GET /v1/files/:key/comments` - file comments
    pub async fn get_comments(&self, file_key: &str) -> Result<Value> {
        self.fetch(&format!("/v1/files/{}/comments", file_key), &[])
            .await
    }

    /// `GET /v1/teams/:team_id/projects` - team projects
    pub async fn get_team_projects(&self, team_id: &str) -> Result<Value> {
        self.fetch(&format!("/v1/teams/{}/projects", team_id), &[])
            .await
    }

    /// `GET /v1/projects/:project_id/files` - project files
    pub async fn get_project_files(&self, project_id: &str) -> Result<Value> {
        self.fetch(&format!("/v1/projects/{}/files", project_id), &[])
            .await
    }

    /// `GET /v1/files/:key/components` - component metadata
    pub async fn get_components(&self, file_key: &str) -> Result<Value> {
        self.fetch(&format!("/v1/files/{}/components", file_key), &[])
            .await
    }

    /// `GET /v1/files/:key/component_sets` - component set variants
    pub async fn get_component_sets(&self, file_key: &str) -> Result<Value> {
        self.fetch(&format!("/v1/files/{}/component_sets", file_key), &[])
            .await
    }
}
