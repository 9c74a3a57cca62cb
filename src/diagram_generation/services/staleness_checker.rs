use super::xml::escape_xml;
use crate::diagram_generation::domain::freshness::{CONTENT_HASH_ATTRIBUTE, FRESHNESS_INDICATOR_ID};
use crate::diagram_generation::domain::{ContentHash, FreshnessIndicator};
use crate::shared::error::VsmDiagramError;
use crate::shared::Result;
use log::{debug, info, warn};
use roxmltree::{Document, Node};
use std::ops::Range;

/// State of the freshness indicator found in a published diagram
#[derive(Debug, Clone, PartialEq)]
pub struct FreshnessSnapshot {
    pub hash: Option<ContentHash>,
    pub style: Option<String>,
    pub label: Option<String>,
}

/// StalenessChecker service inspecting previously published diagrams
///
/// Documents are edited textually: only the attribute values of the
/// freshness indicator are replaced, so everything else in the document
/// (including content a user added by hand in the editor) survives byte for byte.
pub struct StalenessChecker;

impl StalenessChecker {
    /// True only when the indicator exists and its stored hash equals `hash`.
    ///
    /// Unparseable documents and documents without an indicator are reported
    /// as outdated.
    pub fn is_up_to_date(document: &str, hash: &ContentHash) -> bool {
        match Self::find_indicator(document) {
            Ok(Some(FreshnessSnapshot {
                hash: Some(stored), ..
            })) => {
                let up_to_date = stored == *hash;
                info!(stored = stored.as_str(), current = hash.as_str(), up_to_date = up_to_date; "Compared diagram content hash");
                up_to_date
            }
            Ok(Some(_)) => {
                warn!("Freshness indicator has no content hash, treating diagram as outdated");
                false
            }
            Ok(None) => {
                warn!(id = FRESHNESS_INDICATOR_ID; "No freshness indicator in existing diagram, treating it as outdated");
                false
            }
            Err(e) => {
                warn!(error:% = e; "Existing diagram could not be parsed, treating it as outdated");
                false
            }
        }
    }

    pub fn find_indicator(document: &str) -> Result<Option<FreshnessSnapshot>> {
        let doc = parse(document)?;
        Ok(find_indicator_node(&doc).map(|node| FreshnessSnapshot {
            hash: node.attribute(CONTENT_HASH_ATTRIBUTE).map(ContentHash::from_hex),
            style: node.attribute("style").map(str::to_string),
            label: node.attribute("value").map(str::to_string),
        }))
    }

    /// Switches the indicator to its outdated rendering.
    ///
    /// Only the indicator's `style` and `value` attributes change. A document
    /// without an indicator is returned unchanged.
    pub fn mark_outdated(document: &str) -> Result<String> {
        let doc = parse(document)?;
        let Some(node) = find_indicator_node(&doc) else {
            warn!(id = FRESHNESS_INDICATOR_ID; "No freshness indicator to mark as outdated");
            return Ok(document.to_string());
        };

        let indicator = FreshnessIndicator::Outdated;
        let mut edits = vec![
            attribute_edit(document, &node, "style", &indicator.style()),
            attribute_edit(document, &node, "value", indicator.label()),
        ];
        // Apply back to front so earlier offsets stay valid
        edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));

        let mut updated = document.to_string();
        for (range, replacement) in edits {
            updated.replace_range(range, &replacement);
        }

        debug!("Marked existing diagram as outdated");
        Ok(updated)
    }
}

fn parse(document: &str) -> Result<Document<'_>> {
    Document::parse(document).map_err(|e| {
        VsmDiagramError::DiagramParse {
            details: e.to_string(),
        }
        .into()
    })
}

fn find_indicator_node<'a, 'i>(doc: &'a Document<'i>) -> Option<Node<'a, 'i>> {
    doc.descendants()
        .find(|n| n.has_tag_name("mxCell") && n.attribute("id") == Some(FRESHNESS_INDICATOR_ID))
}

/// Text edit that sets `name` to `value` on `node`: a value replacement when
/// the attribute exists, otherwise an insertion right after the tag name
fn attribute_edit(document: &str, node: &Node, name: &str, value: &str) -> (Range<usize>, String) {
    let escaped = escape_xml(value);
    if let Some(attribute) = node.attributes().find(|a| a.name() == name && a.namespace().is_none()) {
        return (attribute.range_value(), escaped);
    }

    let start = node.range().start;
    let name_end = document[start + 1..]
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .map_or(document.len(), |offset| start + 1 + offset);
    (name_end..name_end, format!(" {}=\"{}\"", name, escaped))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAGRAM: &str = r#"<mxGraphModel dx="1412"><root><mxCell id="0" /><mxCell id="1" parent="0" /><UserObject label="Cart &amp; Co" id="s1"><mxCell style="fillColor=#D29270" vertex="1" parent="1"><mxGeometry x="1" y="2" width="130" height="50" as="geometry" /></mxCell></UserObject><mxCell id="up_to_date_indicator" value="Up to date" style="whiteSpace=wrap;html=1;shape=mxgraph.basic.octagon2;align=center;verticalAlign=middle;dx=15;fillColor=#d5e8d4;strokeColor=#82b366;" vertex="1" parent="1" content_hash="abc"><mxGeometry x="-120" y="-250" width="100" height="100" as="geometry" /></mxCell></root></mxGraphModel>"#;

    #[test]
    fn test_matching_hash_is_up_to_date() {
        assert!(StalenessChecker::is_up_to_date(
            DIAGRAM,
            &ContentHash::from_hex("abc")
        ));
    }

    #[test]
    fn test_different_hash_is_outdated() {
        assert!(!StalenessChecker::is_up_to_date(
            DIAGRAM,
            &ContentHash::from_hex("def")
        ));
    }

    #[test]
    fn test_missing_indicator_is_outdated() {
        let doc = r#"<mxGraphModel><root><mxCell id="0" /></root></mxGraphModel>"#;
        assert!(!StalenessChecker::is_up_to_date(doc, &ContentHash::from_hex("abc")));
    }

    #[test]
    fn test_unparseable_document_is_outdated() {
        assert!(!StalenessChecker::is_up_to_date(
            "<mxGraphModel><root>",
            &ContentHash::from_hex("abc")
        ));
        assert!(StalenessChecker::find_indicator("not xml <").is_err());
    }

    #[test]
    fn test_mark_outdated_changes_only_indicator_rendering() {
        let updated = StalenessChecker::mark_outdated(DIAGRAM).unwrap();
        let snapshot = StalenessChecker::find_indicator(&updated).unwrap().unwrap();

        assert_eq!(snapshot.hash, Some(ContentHash::from_hex("abc")));
        assert_eq!(snapshot.label.as_deref(), Some("OUTDATED"));
        assert_eq!(snapshot.style, Some(FreshnessIndicator::Outdated.style()));

        // Everything outside the indicator's start tag is untouched
        let prefix_end = DIAGRAM.find(r#"<mxCell id="up_to_date_indicator""#).unwrap();
        assert_eq!(&updated[..prefix_end], &DIAGRAM[..prefix_end]);
        let suffix = r#"<mxGeometry x="-120" y="-250" width="100" height="100" as="geometry" /></mxCell></root></mxGraphModel>"#;
        assert!(updated.ends_with(suffix));
    }

    #[test]
    fn test_mark_outdated_inserts_missing_attributes() {
        let doc = r#"<root><mxCell id="up_to_date_indicator" content_hash="h1"/></root>"#;
        let updated = StalenessChecker::mark_outdated(doc).unwrap();
        let snapshot = StalenessChecker::find_indicator(&updated).unwrap().unwrap();

        assert_eq!(snapshot.hash, Some(ContentHash::from_hex("h1")));
        assert_eq!(snapshot.label.as_deref(), Some("OUTDATED"));
        assert!(snapshot.style.unwrap().contains("#f8cecc"));
    }

    #[test]
    fn test_mark_outdated_without_indicator_is_identity() {
        let doc = r#"<mxGraphModel><root><mxCell id="0" /></root></mxGraphModel>"#;
        assert_eq!(StalenessChecker::mark_outdated(doc).unwrap(), doc);
    }

    #[test]
    fn test_mark_outdated_is_idempotent() {
        let once = StalenessChecker::mark_outdated(DIAGRAM).unwrap();
        let twice = StalenessChecker::mark_outdated(&once).unwrap();
        assert_eq!(once, twice);
    }
}
