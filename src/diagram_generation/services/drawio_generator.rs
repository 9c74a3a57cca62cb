use super::xml::{fmt_coordinate, XmlWriter};
use crate::diagram_generation::domain::freshness::{CONTENT_HASH_ATTRIBUTE, FRESHNESS_INDICATOR_ID};
use crate::diagram_generation::domain::{
    Api, ContentHash, FreshnessIndicator, Point, Positions, Product, Service,
};
use crate::shared::error::VsmDiagramError;
use crate::shared::Result;
use indexmap::IndexMap;
use log::{debug, info};
use std::collections::HashSet;

const DEFAULT_LAYER: &str = "1";

const PRODUCT_STYLE: &str = "leanix_color_Application;swimlane;";
const SERVICE_STYLE: &str = "shape=parallelogram;perimeter=parallelogramPerimeter;whiteSpace=wrap;html=1;fixedSize=1;rounded=0;fillColor=#D29270;strokeColor=#D29270;fontColor=#FFFFFF;fontStyle=1";
const API_STYLE: &str = "shape=parallelogram;perimeter=parallelogramPerimeter;whiteSpace=wrap;html=1;fixedSize=1;rounded=0;fillColor=#02AFA4;strokeColor=#02AFA4;fontColor=#FFFFFF;fontStyle=1";
const EDGE_STYLE: &str = "rounded=0;orthogonalLoop=1;jettySize=auto;html=1;elbow=vertical;";
const LEGEND_STYLE: &str =
    "swimlane;horizontal=0;rounded=0;fillColor=#526179;strokeColor=#526179;fontColor=#ffffff;";
const LEGEND_API_STYLE: &str = "shape=parallelogram;perimeter=parallelogramPerimeter;whiteSpace=wrap;html=1;fixedSize=1;rounded=0;fontColor=#ffffff;strokeColor=#02AFA4;fillColor=#02AFA4;";
const LEGEND_SERVICE_STYLE: &str = "shape=parallelogram;perimeter=parallelogramPerimeter;whiteSpace=wrap;html=1;fixedSize=1;rounded=0;fontColor=#ffffff;strokeColor=#D29270;fillColor=#D29270;";

/// Padding left above and to the left of the top-left service in a container
const CONTAINER_MARGIN: f64 = 50.0;
const CONTAINER_BASE_WIDTH: f64 = 200.0;
const CONTAINER_BASE_HEIGHT: f64 = 150.0;
const NODE_WIDTH: &str = "130";
const NODE_HEIGHT: &str = "50";

/// DrawioGenerator service rendering a laid-out graph as draw.io XML
///
/// The output is an uncompressed `mxGraphModel` document. Product containers
/// are sized to fit their services, services are placed relative to the
/// container that owns them, and APIs plus edges live on the default layer.
/// A legend and the freshness indicator carrying the content hash are placed
/// above-left of the drawing.
pub struct DrawioGenerator {
    hostname: String,
    vsm_workspace: String,
    scale_factor: f64,
}

impl DrawioGenerator {
    pub fn new(hostname: String, vsm_workspace: String, scale_factor: f64) -> Self {
        Self {
            hostname,
            vsm_workspace,
            scale_factor,
        }
    }

    /// Renders the document.
    ///
    /// Every product, service and API must have an entry in `positions`.
    pub fn generate(
        &self,
        positions: &Positions,
        products: &IndexMap<String, Product>,
        services: &IndexMap<String, Service>,
        apis: &IndexMap<String, Api>,
        content_hash: &ContentHash,
    ) -> Result<String> {
        let mut render = Render {
            generator: self,
            positions,
            scale: (services.len() + apis.len()) as f64 * self.scale_factor,
            xml: XmlWriter::default(),
            rendered_services: HashSet::new(),
        };

        render.xml.open(
            "mxGraphModel",
            &[
                ("dx", "1412"),
                ("dy", "925"),
                ("grid", "1"),
                ("gridSize", "10"),
                ("guides", "1"),
                ("tooltips", "1"),
                ("connect", "1"),
                ("arrows", "1"),
                ("fold", "1"),
                ("page", "0"),
                ("pageScale", "1"),
                ("pageWidth", "850"),
                ("pageHeight", "1100"),
                ("math", "0"),
                ("shadow", "0"),
            ],
        );
        render.xml.open("root", &[]);
        render.xml.empty("mxCell", &[("id", "0")]);
        render
            .xml
            .empty("mxCell", &[("id", DEFAULT_LAYER), ("parent", "0")]);

        for product in products.values() {
            let owned: Vec<&Service> = services
                .values()
                .filter(|s| s.belongs_to(product.vsm_id()))
                .collect();
            let origin = render.product_container(product, &owned)?;
            for service in owned {
                render.service(service, Some((product.container_id(), origin)))?;
            }
        }

        // Productless services, plus any whose products were never resolved
        for service in services.values() {
            render.service(service, None)?;
        }

        for api in apis.values() {
            render.api(api)?;
        }

        render.information_panels(content_hash);

        info!(
            products = products.len(),
            services = services.len(),
            apis = apis.len();
            "Generated draw.io diagram"
        );
        Ok(render.xml.finish())
    }

    fn service_link(&self, service_id: &str) -> String {
        format!(
            "https://{}/{}/valuestreams/Services/{}",
            self.hostname, self.vsm_workspace, service_id
        )
    }

    fn api_link(&self, api_id: &str) -> String {
        format!(
            "https://{}/{}/valuestreams/Apis?selectedItem={}",
            self.hostname, self.vsm_workspace, api_id
        )
    }
}

struct Render<'a> {
    generator: &'a DrawioGenerator,
    positions: &'a Positions,
    scale: f64,
    xml: XmlWriter,
    rendered_services: HashSet<String>,
}

impl Render<'_> {
    fn scaled(&self, id: &str) -> Result<Point> {
        let point = self
            .positions
            .get(id)
            .ok_or_else(|| VsmDiagramError::MissingPosition {
                node_id: id.to_string(),
            })?;
        Ok(Point::new(point.x * self.scale, point.y * self.scale))
    }

    /// Emits the container of a product and returns its scaled top-left corner
    fn product_container(&mut self, product: &Product, services: &[&Service]) -> Result<Point> {
        let (origin, width, height) = if services.is_empty() {
            (
                self.scaled(product.vsm_id())?,
                CONTAINER_BASE_WIDTH,
                CONTAINER_BASE_HEIGHT,
            )
        } else {
            let mut min = Point::new(f64::INFINITY, f64::INFINITY);
            let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
            for service in services {
                let p = self.scaled(service.id())?;
                min = Point::new(min.x.min(p.x), min.y.min(p.y));
                max = Point::new(max.x.max(p.x), max.y.max(p.y));
            }
            (
                Point::new(min.x - CONTAINER_MARGIN, min.y - CONTAINER_MARGIN),
                max.x - min.x + CONTAINER_BASE_WIDTH,
                max.y - min.y + CONTAINER_BASE_HEIGHT,
            )
        };

        match product.eam_id() {
            Some(eam_id) => {
                self.xml.open(
                    "object",
                    &[
                        ("type", "factSheet"),
                        ("label", product.name()),
                        ("factSheetType", "Application"),
                        ("factSheetId", eam_id),
                        ("id", eam_id),
                    ],
                );
                self.xml.open(
                    "mxCell",
                    &[
                        ("style", PRODUCT_STYLE),
                        ("vertex", "1"),
                        ("parent", DEFAULT_LAYER),
                    ],
                );
            }
            None => self.xml.open(
                "mxCell",
                &[
                    ("id", product.vsm_id()),
                    ("value", product.name()),
                    ("style", PRODUCT_STYLE),
                    ("vertex", "1"),
                    ("parent", DEFAULT_LAYER),
                ],
            ),
        }
        self.geometry(origin, &fmt_coordinate(width), &fmt_coordinate(height));
        self.xml.close();
        if product.eam_id().is_some() {
            self.xml.close();
        }

        debug!(product = product.vsm_id(), services = services.len(); "Rendered product container");
        Ok(origin)
    }

    /// Emits a service once; later calls for the same service are no-ops
    fn service(&mut self, service: &Service, container: Option<(&str, Point)>) -> Result<()> {
        if self.rendered_services.contains(service.id()) {
            return Ok(());
        }

        let absolute = self.scaled(service.id())?;
        let (parent, position) = match container {
            Some((container_id, origin)) => (
                container_id,
                Point::new(absolute.x - origin.x, absolute.y - origin.y),
            ),
            None => (DEFAULT_LAYER, absolute),
        };

        let link = self.generator.service_link(service.id());
        self.xml.open(
            "UserObject",
            &[
                ("label", service.name()),
                ("link", link.as_str()),
                ("id", service.id()),
            ],
        );
        self.xml.open(
            "mxCell",
            &[("style", SERVICE_STYLE), ("vertex", "1"), ("parent", parent)],
        );
        self.geometry(position, NODE_WIDTH, NODE_HEIGHT);
        self.xml.close();
        self.xml.close();

        self.rendered_services.insert(service.id().to_string());
        Ok(())
    }

    fn api(&mut self, api: &Api) -> Result<()> {
        let position = self.scaled(api.id())?;
        let link = self.generator.api_link(api.id());

        self.xml.open(
            "UserObject",
            &[("label", api.name()), ("link", link.as_str()), ("id", api.id())],
        );
        self.xml.open(
            "mxCell",
            &[("style", API_STYLE), ("vertex", "1"), ("parent", DEFAULT_LAYER)],
        );
        self.geometry(position, NODE_WIDTH, NODE_HEIGHT);
        self.xml.close();
        self.xml.close();

        for source_id in api.source_ids() {
            let id = format!("{}_consumed_by_{}", api.id(), source_id);
            self.edge(&id, source_id, api.id());
        }
        for target_id in api.target_ids() {
            let id = format!("{}_provided_by_{}", api.id(), target_id);
            self.edge(&id, api.id(), target_id);
        }
        Ok(())
    }

    fn edge(&mut self, id: &str, source: &str, target: &str) {
        self.xml.open(
            "mxCell",
            &[
                ("id", id),
                ("style", EDGE_STYLE),
                ("edge", "1"),
                ("source", source),
                ("target", target),
                ("parent", DEFAULT_LAYER),
            ],
        );
        self.xml
            .empty("mxGeometry", &[("relative", "1"), ("as", "geometry")]);
        self.xml.close();
    }

    /// Legend and freshness indicator, anchored above-left of the drawing
    fn information_panels(&mut self, content_hash: &ContentHash) {
        let anchor = self
            .positions
            .values()
            .fold(None, |acc: Option<Point>, p| {
                Some(match acc {
                    Some(min) => Point::new(min.x.min(p.x), min.y.min(p.y)),
                    None => *p,
                })
            })
            .map(|p| Point::new(p.x * self.scale, p.y * self.scale))
            .unwrap_or_default();

        self.xml.open(
            "mxCell",
            &[
                ("id", "legend"),
                ("value", "Legend"),
                ("style", LEGEND_STYLE),
                ("parent", DEFAULT_LAYER),
                ("vertex", "1"),
            ],
        );
        self.geometry(Point::new(anchor.x - 140.0, anchor.y - 140.0), "140", "140");
        self.xml.close();

        self.legend_entry("legend_vsm_api", "VSM API", LEGEND_API_STYLE, ("34", "22.9", "90", "37.1"));
        self.legend_entry(
            "legend_vsm_service",
            "VSM Service",
            LEGEND_SERVICE_STYLE,
            ("26", "80", "98", "40.1"),
        );

        let indicator = FreshnessIndicator::UpToDate;
        let style = indicator.style();
        self.xml.open(
            "mxCell",
            &[
                ("id", FRESHNESS_INDICATOR_ID),
                ("value", indicator.label()),
                ("style", style.as_str()),
                ("vertex", "1"),
                ("parent", DEFAULT_LAYER),
                (CONTENT_HASH_ATTRIBUTE, content_hash.as_str()),
            ],
        );
        self.geometry(Point::new(anchor.x - 120.0, anchor.y - 250.0), "100", "100");
        self.xml.close();
    }

    fn legend_entry(
        &mut self,
        id: &str,
        label: &str,
        style: &str,
        (x, y, width, height): (&str, &str, &str, &str),
    ) {
        self.xml.open(
            "mxCell",
            &[
                ("id", id),
                ("value", label),
                ("style", style),
                ("parent", "legend"),
                ("vertex", "1"),
            ],
        );
        self.xml.empty(
            "mxGeometry",
            &[
                ("x", x),
                ("y", y),
                ("width", width),
                ("height", height),
                ("as", "geometry"),
            ],
        );
        self.xml.close();
    }

    fn geometry(&mut self, origin: Point, width: &str, height: &str) {
        let x = fmt_coordinate(origin.x);
        let y = fmt_coordinate(origin.y);
        self.xml.empty(
            "mxGeometry",
            &[
                ("x", x.as_str()),
                ("y", y.as_str()),
                ("width", width),
                ("height", height),
                ("as", "geometry"),
            ],
        );
    }
}
