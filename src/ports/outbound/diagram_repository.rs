use crate::shared::error::VsmDiagramError;
use crate::shared::Result;
use serde_json::Value;

/// A diagram bookmark previously published to EAM
///
/// Keeps the full bookmark so that an update sends back every field the
/// server returned, with only the diagram XML replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingDiagram {
    id: String,
    bookmark: Value,
}

impl ExistingDiagram {
    /// Wraps a bookmark object
    ///
    /// A missing or `null` `state.graphXml` is accepted and reads as an empty
    /// document, which the staleness check treats as outdated.
    pub fn new(id: String, bookmark: Value) -> Result<Self> {
        if !bookmark.is_object() {
            return Err(VsmDiagramError::DiagramParse {
                details: format!("bookmark '{}' is not a JSON object", id),
            }
            .into());
        }
        Ok(Self { id, bookmark })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn graph_xml(&self) -> &str {
        self.bookmark
            .pointer("/state/graphXml")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn bookmark(&self) -> &Value {
        &self.bookmark
    }

    /// Same bookmark with the diagram XML replaced
    pub fn with_graph_xml(mut self, graph_xml: String) -> Self {
        if let Some(state) = self.bookmark.get_mut("state") {
            state["graphXml"] = Value::String(graph_xml);
        }
        self
    }
}

/// DiagramRepository port for published diagrams (EAM bookmarks)
pub trait DiagramRepository {
    /// Fetches a published diagram by bookmark id
    ///
    /// # Errors
    /// Returns an error if the request fails or the response is not a bookmark
    fn fetch_existing_diagram(&self, diagram_id: &str) -> Result<ExistingDiagram>;

    /// Replaces a published diagram with `diagram`
    fn update_existing_diagram(&self, diagram: &ExistingDiagram) -> Result<()>;

    /// Publishes a new diagram and returns its URL
    ///
    /// # Arguments
    /// * `graph_xml` - The draw.io document
    /// * `diagram_name` - Display name of the bookmark
    fn upload_new_diagram(&self, graph_xml: &str, diagram_name: &str) -> Result<String>;
}
