//! Thin client for the Figma REST API style endpoints.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.figma.com";

const TOKEN_HEADER: &str = "X-Figma-Token";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("figma returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("style node {0} missing from response")]
    MissingNode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum StyleKind {
    #[serde(rename = "FILL")]
    Fill,
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "EFFECT")]
    Effect,
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct StyleDescriptor {
    pub node_id: String,
    pub name: String,
    #[serde(rename = "style_type")]
    pub kind: StyleKind,
}

#[derive(Debug, Deserialize)]
struct StylesResponse {
    meta: StylesMeta,
}

#[derive(Debug, Deserialize)]
struct StylesMeta {
    styles: Vec<StyleDescriptor>,
}

#[derive(Debug, Deserialize)]
struct NodesResponse {
    nodes: HashMap<String, NodeEntry>,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    document: StyleDocument,
}

/// The style-type-dependent payload under `nodes[id].document`. Only the
/// fields the transformer reads are modeled; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct StyleDocument {
    #[serde(default)]
    pub fills: Vec<Paint>,
    pub style: Option<TypeStyle>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

#[derive(Debug, Deserialize)]
pub struct Paint {
    pub color: Option<Rgba>,
    pub opacity: Option<f64>,
}

/// Color channels as Figma reports them, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Rgba {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    pub a: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub line_height_percent_font_size: Option<f64>,
    pub text_case: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    pub color: Option<Rgba>,
    pub offset: Option<Vector>,
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum EffectKind {
    #[serde(rename = "DROP_SHADOW")]
    DropShadow,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Vector {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

pub struct FigmaClient {
    http: reqwest::Client,
    base_url: String,
    file_key: String,
    token: String,
}

impl FigmaClient {
    pub fn new(
        base_url: impl Into<String>,
        file_key: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            file_key: file_key.into(),
            token: token.into(),
        }
    }

    /// Fetches the ordered list of shared style descriptors for the file.
    pub async fn list_styles(&self) -> Result<Vec<StyleDescriptor>, ApiError> {
        let url = format!("{}/v1/files/{}/styles", self.base_url, self.file_key);
        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;
        let parsed: StylesResponse = Self::check_status(response).await?.json().await?;
        Ok(parsed.meta.styles)
    }

    /// Resolves one style to its full document via the nodes endpoint.
    pub async fn get_style_document(&self, node_id: &str) -> Result<StyleDocument, ApiError> {
        let url = format!("{}/v1/files/{}/nodes", self.base_url, self.file_key);
        let response = self
            .http
            .get(&url)
            .query(&[("ids", node_id)])
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;
        let mut parsed: NodesResponse = Self::check_status(response).await?.json().await?;
        parsed
            .nodes
            .remove(node_id)
            .map(|entry| entry.document)
            .ok_or_else(|| ApiError::MissingNode(node_id.to_string()))
    }

    // Non-2xx responses carry the body in the error so authorization
    // failures surface with the provider's detail.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}
