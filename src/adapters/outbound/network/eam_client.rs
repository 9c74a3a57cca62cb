use super::ensure_success;
use crate::ports::outbound::{AccessTokenProvider, DiagramRepository, ExistingDiagram};
use crate::shared::error::VsmDiagramError;
use crate::shared::Result;
use log::info;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// EAM bookmarks client
///
/// Implements the DiagramRepository port: draw.io diagrams are stored as
/// `VISUALIZER` bookmarks of the `freedraw` group.
pub struct EamBookmarkClient<T> {
    client: Client,
    bookmarks_url: String,
    diagrams_url: String,
    tokens: T,
}

impl<T: AccessTokenProvider> EamBookmarkClient<T> {
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `base_url` - Platform base URL, e.g. `https://demo-eu.leanix.net`
    /// * `eam_workspace` - Workspace name used in the URL of uploaded diagrams
    /// * `tokens` - Bearer token source for the EAM workspace
    pub fn new(client: Client, base_url: &str, eam_workspace: &str, tokens: T) -> Self {
        Self {
            client,
            bookmarks_url: format!("{}/services/pathfinder/v1/bookmarks", base_url),
            diagrams_url: format!(
                "{}/{}/diagrams/freedraw",
                base_url,
                urlencoding::encode(eam_workspace)
            ),
            tokens,
        }
    }

    fn bookmark_url(&self, diagram_id: &str) -> String {
        format!("{}/{}", self.bookmarks_url, urlencoding::encode(diagram_id))
    }

    fn publish_error(operation: &str) -> impl Fn(String) -> VsmDiagramError + '_ {
        move |details| VsmDiagramError::Publish {
            operation: operation.to_string(),
            details,
        }
    }
}

impl<T: AccessTokenProvider> DiagramRepository for EamBookmarkClient<T> {
    fn fetch_existing_diagram(&self, diagram_id: &str) -> Result<ExistingDiagram> {
        let to_error = Self::publish_error("fetch existing diagram");
        let token = self.tokens.access_token()?;

        let response = self
            .client
            .get(self.bookmark_url(diagram_id))
            .bearer_auth(token)
            .send()
            .map_err(|e| to_error(e.to_string()))?;
        let envelope: BookmarkEnvelope = ensure_success(response, &to_error)?
            .json()
            .map_err(|e| to_error(format!("unexpected bookmark response: {}", e)))?;

        ExistingDiagram::new(diagram_id.to_string(), envelope.data)
    }

    fn update_existing_diagram(&self, diagram: &ExistingDiagram) -> Result<()> {
        let to_error = Self::publish_error("update existing diagram");
        let token = self.tokens.access_token()?;

        let response = self
            .client
            .put(self.bookmark_url(diagram.id()))
            .bearer_auth(token)
            .json(diagram.bookmark())
            .send()
            .map_err(|e| to_error(e.to_string()))?;
        ensure_success(response, &to_error)?;

        info!(diagram_id = diagram.id(); "Updated existing diagram");
        Ok(())
    }

    fn upload_new_diagram(&self, graph_xml: &str, diagram_name: &str) -> Result<String> {
        let to_error = Self::publish_error("upload diagram");
        let token = self.tokens.access_token()?;

        let response = self
            .client
            .post(&self.bookmarks_url)
            .bearer_auth(token)
            .json(&NewBookmark::freedraw(diagram_name, graph_xml))
            .send()
            .map_err(|e| to_error(e.to_string()))?;
        let created: CreatedBookmark = ensure_success(response, &to_error)?
            .json()
            .map_err(|e| to_error(format!("unexpected bookmark response: {}", e)))?;

        let url = format!(
            "{}/{}",
            self.diagrams_url,
            urlencoding::encode(&created.data.id)
        );
        info!(diagram_id = created.data.id.as_str(), url = url.as_str(); "Uploaded new diagram");
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct BookmarkEnvelope {
    data: Value,
}

#[derive(Debug, Deserialize)]
struct CreatedBookmark {
    data: CreatedBookmarkData,
}

#[derive(Debug, Deserialize)]
struct CreatedBookmarkData {
    id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewBookmark<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    bookmark_type: &'a str,
    group_key: &'a str,
    state: BookmarkState<'a>,
    auto_update: bool,
    is_just_migrated_from_legacy: bool,
    working_copy: Option<Value>,
    description: &'a str,
    i18n_key: Option<String>,
    predefined: bool,
    readonly: bool,
    default_sharing_priority: Option<Value>,
    permitted_read_user_ids: Vec<String>,
    permitted_write_user_ids: Vec<String>,
    views: u32,
    replay_sequence: u32,
    temporary: bool,
    #[serde(rename = "oDataEnabled")]
    odata_enabled: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookmarkState<'a> {
    version: u32,
    graph_xml: &'a str,
}

impl<'a> NewBookmark<'a> {
    fn freedraw(name: &'a str, graph_xml: &'a str) -> Self {
        Self {
            name,
            bookmark_type: "VISUALIZER",
            group_key: "freedraw",
            state: BookmarkState {
                version: 2,
                graph_xml,
            },
            auto_update: true,
            is_just_migrated_from_legacy: false,
            working_copy: None,
            description: "",
            i18n_key: None,
            predefined: false,
            readonly: false,
            default_sharing_priority: None,
            permitted_read_user_ids: Vec::new(),
            permitted_write_user_ids: Vec::new(),
            views: 0,
            replay_sequence: 0,
            temporary: false,
            odata_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::network::build_http_client;
    use mockito::Matcher;
    use serde_json::json;

    struct StaticToken;

    impl AccessTokenProvider for StaticToken {
        fn access_token(&self) -> Result<String> {
            Ok("bearer-123".to_string())
        }
    }

    fn client(server: &mockito::Server) -> EamBookmarkClient<StaticToken> {
        EamBookmarkClient::new(build_http_client().unwrap(), &server.url(), "acme", StaticToken)
    }

    #[test]
    fn test_new_bookmark_body_shape() {
        let body = serde_json::to_value(NewBookmark::freedraw("Checkout", "<x />")).unwrap();
        assert_eq!(body["type"], "VISUALIZER");
        assert_eq!(body["groupKey"], "freedraw");
        assert_eq!(body["state"]["graphXml"], "<x />");
        assert_eq!(body["state"]["version"], 2);
        assert_eq!(body["oDataEnabled"], false);
        assert_eq!(body["i18nKey"], Value::Null);
    }

    #[test]
    fn test_fetch_existing_diagram() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/services/pathfinder/v1/bookmarks/d1")
            .match_header("authorization", "Bearer bearer-123")
            .with_status(200)
            .with_body(r#"{"status":"OK","data":{"id":"d1","name":"Old","state":{"graphXml":"<mxGraphModel />"}}}"#)
            .create();

        let diagram = client(&server).fetch_existing_diagram("d1").unwrap();
        assert_eq!(diagram.id(), "d1");
        assert_eq!(diagram.graph_xml(), "<mxGraphModel />");
        assert_eq!(diagram.bookmark()["name"], "Old");
    }

    #[test]
    fn test_fetch_missing_diagram_is_publish_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/services/pathfinder/v1/bookmarks/gone")
            .with_status(404)
            .create();

        let err = client(&server).fetch_existing_diagram("gone").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VsmDiagramError>(),
            Some(VsmDiagramError::Publish { operation, .. }) if operation == "fetch existing diagram"
        ));
    }

    #[test]
    fn test_update_sends_full_bookmark() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/services/pathfinder/v1/bookmarks/d1")
            .match_body(Matcher::Json(json!({
                "id": "d1",
                "name": "Old",
                "state": {"graphXml": "<new />"}
            })))
            .with_status(200)
            .create();

        let diagram = ExistingDiagram::new(
            "d1".into(),
            json!({"id": "d1", "name": "Old", "state": {"graphXml": "<old />"}}),
        )
        .unwrap()
        .with_graph_xml("<new />".into());

        client(&server).update_existing_diagram(&diagram).unwrap();
        mock.assert();
    }

    #[test]
    fn test_upload_returns_diagram_url() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/services/pathfinder/v1/bookmarks")
            .match_body(Matcher::PartialJson(json!({
                "name": "Checkout - 01-02 03:04 - VSM Product Diagram",
                "groupKey": "freedraw"
            })))
            .with_status(200)
            .with_body(r#"{"status":"OK","data":{"id":"d2"}}"#)
            .create();

        let url = client(&server)
            .upload_new_diagram("<mxGraphModel />", "Checkout - 01-02 03:04 - VSM Product Diagram")
            .unwrap();

        assert_eq!(url, format!("{}/acme/diagrams/freedraw/d2", server.url()));
        mock.assert();
    }

    #[test]
    fn test_upload_rejected() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/services/pathfinder/v1/bookmarks")
            .with_status(500)
            .with_body("boom")
            .create();

        let err = client(&server)
            .upload_new_diagram("<mxGraphModel />", "name")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to upload diagram"));
        assert!(message.contains("HTTP 500"));
    }
}
