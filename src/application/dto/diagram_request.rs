use crate::diagram_generation::services::LayoutWeights;

/// DiagramRequest - Internal request DTO for the diagram generation use case
///
/// Carries everything a run needs from the resolved configuration; the use
/// case itself never reads configuration files or the environment.
#[derive(Debug, Clone)]
pub struct DiagramRequest {
    /// Exact VSM name of the product to diagram
    pub product_name: String,
    /// Name of the product link pointing at the published diagram
    pub product_link_name: String,
    /// VSM host, used for links embedded in the diagram
    pub hostname: String,
    /// VSM workspace, used for links embedded in the diagram
    pub vsm_workspace: String,
    /// Edge weights of the spring layout
    pub weights: LayoutWeights,
    /// Multiplier from layout units to diagram pixels, per node
    pub scale_factor: f64,
    /// Seed for the random initial placement of services and APIs
    pub layout_seed: u64,
    /// Stop early when the published diagram already matches the model
    pub skip_if_up_to_date: bool,
    /// Generate without publishing anything
    pub dry_run: bool,
}

impl DiagramRequest {
    pub fn new(product_name: String, product_link_name: String) -> Self {
        Self {
            product_name,
            product_link_name,
            hostname: String::new(),
            vsm_workspace: String::new(),
            weights: LayoutWeights::default(),
            scale_factor: 40.0,
            layout_seed: 0,
            skip_if_up_to_date: true,
            dry_run: false,
        }
    }

    pub fn with_workspace(mut self, hostname: String, vsm_workspace: String) -> Self {
        self.hostname = hostname;
        self.vsm_workspace = vsm_workspace;
        self
    }

    pub fn with_layout(mut self, weights: LayoutWeights, scale_factor: f64, layout_seed: u64) -> Self {
        self.weights = weights;
        self.scale_factor = scale_factor;
        self.layout_seed = layout_seed;
        self
    }

    pub fn with_skip_if_up_to_date(mut self, skip: bool) -> Self {
        self.skip_if_up_to_date = skip;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
