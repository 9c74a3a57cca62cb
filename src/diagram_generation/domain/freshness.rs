/// Well-known id of the freshness indicator cell in a generated diagram
pub const FRESHNESS_INDICATOR_ID: &str = "up_to_date_indicator";

/// Attribute on the freshness indicator carrying the content hash
pub const CONTENT_HASH_ATTRIBUTE: &str = "content_hash";

const INDICATOR_BASE_STYLE: &str =
    "whiteSpace=wrap;html=1;shape=mxgraph.basic.octagon2;align=center;verticalAlign=middle;dx=15;";

/// Visual state of the freshness indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessIndicator {
    UpToDate,
    Outdated,
}

impl FreshnessIndicator {
    pub fn label(self) -> &'static str {
        match self {
            FreshnessIndicator::UpToDate => "Up to date",
            FreshnessIndicator::Outdated => "OUTDATED",
        }
    }

    pub fn style(self) -> String {
        let colors = match self {
            FreshnessIndicator::UpToDate => "fillColor=#d5e8d4;strokeColor=#82b366;",
            FreshnessIndicator::Outdated => "fillColor=#f8cecc;strokeColor=#b85450;",
        };
        format!("{}{}", INDICATOR_BASE_STYLE, colors)
    }
}
