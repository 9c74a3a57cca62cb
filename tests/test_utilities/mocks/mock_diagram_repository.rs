use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use vsm_diagram::prelude::*;

/// Mock DiagramRepository keeping bookmarks in memory
#[derive(Clone, Default)]
pub struct MockDiagramRepository {
    pub diagrams: Arc<Mutex<HashMap<String, String>>>,
    pub uploads: Arc<Mutex<Vec<(String, String)>>>,
    pub update_count: Arc<Mutex<usize>>,
}

impl MockDiagramRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagram(self, diagram_id: &str, graph_xml: &str) -> Self {
        self.diagrams
            .lock()
            .unwrap()
            .insert(diagram_id.to_string(), graph_xml.to_string());
        self
    }

    pub fn graph_xml(&self, diagram_id: &str) -> Option<String> {
        self.diagrams.lock().unwrap().get(diagram_id).cloned()
    }

    pub fn get_uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn update_count(&self) -> usize {
        *self.update_count.lock().unwrap()
    }
}

impl DiagramRepository for MockDiagramRepository {
    fn fetch_existing_diagram(&self, diagram_id: &str) -> Result<ExistingDiagram> {
        let graph_xml = self
            .graph_xml(diagram_id)
            .ok_or_else(|| anyhow::anyhow!("Mock diagram {} not found", diagram_id))?;
        ExistingDiagram::new(
            diagram_id.to_string(),
            json!({"id": diagram_id, "state": {"version": 2, "graphXml": graph_xml}}),
        )
    }

    fn update_existing_diagram(&self, diagram: &ExistingDiagram) -> Result<()> {
        self.diagrams
            .lock()
            .unwrap()
            .insert(diagram.id().to_string(), diagram.graph_xml().to_string());
        *self.update_count.lock().unwrap() += 1;
        Ok(())
    }

    fn upload_new_diagram(&self, graph_xml: &str, diagram_name: &str) -> Result<String> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((graph_xml.to_string(), diagram_name.to_string()));
        let diagram_id = format!("d-new-{}", uploads.len());
        self.diagrams
            .lock()
            .unwrap()
            .insert(diagram_id.clone(), graph_xml.to_string());
        Ok(format!(
            "https://demo-eu.leanix.net/acme/diagrams/freedraw/{}",
            diagram_id
        ))
    }
}
