use crate::application::dto::{DiagramOutcome, DiagramRequest, DiagramResponse};
use crate::diagram_generation::domain::NormalizedGraph;
use crate::diagram_generation::services::{
    DrawioGenerator, LayoutEngine, Normalizer, StalenessChecker,
};
use crate::ports::inbound::DiagramGenerationPort;
use crate::ports::outbound::{DiagramRepository, ProgressReporter, VsmRepository};
use crate::shared::error::VsmDiagramError;
use crate::shared::Result;
use chrono::Local;
use log::{debug, info, warn};

/// Number of progress steps of a full run
const TOTAL_STEPS: usize = 5;

/// GenerateDiagramUseCase - Core use case for the VSM product diagram
///
/// This use case orchestrates the diagram workflow using generic dependency
/// injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `VR` - VsmRepository implementation
/// * `DR` - DiagramRepository implementation (absent for offline runs)
/// * `PR` - ProgressReporter implementation
pub struct GenerateDiagramUseCase<VR, DR, PR> {
    vsm_repository: VR,
    diagram_repository: Option<DR>,
    progress_reporter: PR,
}

impl<VR, DR, PR> GenerateDiagramUseCase<VR, DR, PR>
where
    VR: VsmRepository,
    DR: DiagramRepository,
    PR: ProgressReporter,
{
    /// Creates a new GenerateDiagramUseCase with injected dependencies
    pub fn new(vsm_repository: VR, diagram_repository: Option<DR>, progress_reporter: PR) -> Self {
        Self {
            vsm_repository,
            diagram_repository,
            progress_reporter,
        }
    }

    /// Executes the diagram generation use case
    ///
    /// # Arguments
    /// * `request` - Product, layout and publishing options
    ///
    /// # Returns
    /// DiagramResponse describing whether the diagram was skipped, generated or published
    pub fn execute(&self, request: DiagramRequest) -> Result<DiagramResponse> {
        // Step 1: Fetch and normalize the product graph
        let graph = self.fetch_and_normalize(&request)?;

        // Step 2: Compare against the previously published diagram
        if self.check_existing_diagram(&request, &graph)? {
            self.progress_reporter.report_completion(
                "Latest diagram is up to date, nothing to generate",
            );
            return Ok(DiagramResponse::up_to_date(graph.content_hash().clone()));
        }

        // Step 3: Layout
        self.progress_reporter
            .report_progress(3, TOTAL_STEPS, Some("Computing layout"));
        let engine = LayoutEngine::new(request.weights).with_seed(request.layout_seed);
        let product_positions = engine.layout_products(graph.products());
        let positions = engine.layout_full_graph(
            &product_positions,
            graph.products(),
            graph.services(),
            graph.apis(),
        );

        // Step 4: Serialize
        self.progress_reporter
            .report_progress(4, TOTAL_STEPS, Some("Generating draw.io diagram"));
        let generator = DrawioGenerator::new(
            request.hostname.clone(),
            request.vsm_workspace.clone(),
            request.scale_factor,
        );
        let document = generator.generate(
            &positions,
            graph.products(),
            graph.services(),
            graph.apis(),
            graph.content_hash(),
        )?;
        let diagram_name = Self::diagram_name(&request.product_name);

        // Step 5: Publish
        if request.dry_run {
            self.progress_reporter
                .report_completion("Dry run: diagram generated but not published");
            return Ok(DiagramResponse::generated(
                DiagramOutcome::DryRun,
                graph.content_hash().clone(),
                document,
                diagram_name,
            ));
        }

        let url = self.publish(&request, &graph, &document, &diagram_name)?;
        self.progress_reporter
            .report_completion(&format!("Diagram published: {}", url));

        Ok(DiagramResponse::generated(
            DiagramOutcome::Published { url },
            graph.content_hash().clone(),
            document,
            diagram_name,
        ))
    }

    fn fetch_and_normalize(&self, request: &DiagramRequest) -> Result<NormalizedGraph> {
        self.progress_reporter.report_progress(
            1,
            TOTAL_STEPS,
            Some(&format!("Fetching VSM data for '{}'", request.product_name)),
        );
        let raw = self
            .vsm_repository
            .fetch_product_graph(&request.product_name)?;

        let graph = Normalizer::new(&request.product_name, &request.product_link_name)
            .normalize(&raw)?;

        if graph.main_product_id().is_none() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: No product named '{}' found in the VSM response",
                request.product_name
            ));
        }
        self.progress_reporter.report(&format!(
            "✅ Normalized {} product(s), {} service(s), {} API(s)",
            graph.products().len(),
            graph.service_count(),
            graph.api_count()
        ));

        Ok(graph)
    }

    /// Returns true when the run should stop because the published diagram is current
    ///
    /// An outdated published diagram is flagged as such (outside dry runs), so
    /// readers of the old diagram see it is stale even if this run later fails.
    fn check_existing_diagram(&self, request: &DiagramRequest, graph: &NormalizedGraph) -> Result<bool> {
        self.progress_reporter
            .report_progress(2, TOTAL_STEPS, Some("Checking existing diagram"));

        let (Some(diagram_id), Some(repository)) = (graph.diagram_id(), &self.diagram_repository)
        else {
            debug!("No existing diagram to compare against");
            return Ok(false);
        };

        let existing = repository.fetch_existing_diagram(diagram_id)?;
        if StalenessChecker::is_up_to_date(existing.graph_xml(), graph.content_hash()) {
            info!(diagram_id = diagram_id; "Existing diagram is up to date");
            return Ok(request.skip_if_up_to_date);
        }

        info!(diagram_id = diagram_id; "Existing diagram is outdated");
        if request.dry_run {
            self.progress_reporter
                .report("Dry run: existing diagram is outdated but left unchanged");
            return Ok(false);
        }

        let marked = match StalenessChecker::mark_outdated(existing.graph_xml()) {
            Ok(marked) => marked,
            Err(e) => {
                warn!(diagram_id = diagram_id, error:% = e; "Existing diagram could not be parsed, leaving it unmarked");
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Existing diagram '{}' could not be parsed and was not marked as outdated",
                    diagram_id
                ));
                return Ok(false);
            }
        };
        repository.update_existing_diagram(&existing.with_graph_xml(marked))?;
        self.progress_reporter
            .report(&format!("🏷️  Marked diagram '{}' as outdated", diagram_id));

        Ok(false)
    }

    fn publish(
        &self,
        request: &DiagramRequest,
        graph: &NormalizedGraph,
        document: &str,
        diagram_name: &str,
    ) -> Result<String> {
        let repository = self.diagram_repository.as_ref().ok_or_else(|| {
            VsmDiagramError::Validation {
                message: "publishing requires the EAM connection; use --dry-run for offline runs"
                    .to_string(),
            }
        })?;

        self.progress_reporter
            .report_progress(5, TOTAL_STEPS, Some("Publishing diagram"));
        let url = repository.upload_new_diagram(document, diagram_name)?;

        self.vsm_repository.update_product_link(
            &request.product_link_name,
            &url,
            graph.main_product_id(),
            graph.main_product_link_id(),
        )?;
        info!(url = url.as_str(); "Product link updated");

        Ok(url)
    }

    fn diagram_name(product_name: &str) -> String {
        format!(
            "{} - {} - VSM Product Diagram",
            product_name,
            Local::now().format("%m-%d %H:%M")
        )
    }
}

impl<VR, DR, PR> DiagramGenerationPort for GenerateDiagramUseCase<VR, DR, PR>
where
    VR: VsmRepository,
    DR: DiagramRepository,
    PR: ProgressReporter,
{
    fn generate_diagram(&self, request: DiagramRequest) -> Result<DiagramResponse> {
        self.execute(request)
    }
}
