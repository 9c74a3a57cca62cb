use crate::diagram_generation::domain::ContentHash;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramOutcome {
    /// The published diagram already reflects the model; nothing was generated
    UpToDate,
    /// A diagram was generated but not published
    DryRun,
    /// A new diagram was uploaded and the product link points at `url`
    Published { url: String },
}

/// DiagramResponse - Internal response DTO from the diagram generation use case
#[derive(Debug, Clone)]
pub struct DiagramResponse {
    pub outcome: DiagramOutcome,
    /// Hash of the normalized model the run was based on
    pub content_hash: ContentHash,
    /// Generated draw.io XML; absent when the run stopped as up to date
    pub document: Option<String>,
    /// Bookmark name the diagram was (or would have been) published under
    pub diagram_name: Option<String>,
}

impl DiagramResponse {
    pub fn up_to_date(content_hash: ContentHash) -> Self {
        Self {
            outcome: DiagramOutcome::UpToDate,
            content_hash,
            document: None,
            diagram_name: None,
        }
    }

    pub fn generated(
        outcome: DiagramOutcome,
        content_hash: ContentHash,
        document: String,
        diagram_name: String,
    ) -> Self {
        Self {
            outcome,
            content_hash,
            document: Some(document),
            diagram_name: Some(diagram_name),
        }
    }
}
