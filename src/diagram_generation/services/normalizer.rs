use crate::diagram_generation::domain::{Api, NormalizedGraph, Product, Service, ServiceRole};
use crate::shared::error::VsmDiagramError;
use crate::shared::Result;
use anyhow::Context;
use indexmap::map::Entry;
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::Value;

/// Placeholder id used in errors when the entity id itself is missing
const UNKNOWN_ENTITY: &str = "<unknown>";

/// Normalizer service for flattening the nested VSM GraphQL response
///
/// The response is cyclic (products embed services, services embed APIs, APIs
/// embed services which embed products again). Every entity kind is checked
/// against its own map before any recursion, so the walk visits each distinct
/// entity once and terminates regardless of how the references loop.
///
/// The accumulated maps are only handed out, as a [`NormalizedGraph`], after the
/// whole walk succeeded.
pub struct Normalizer {
    product_name: String,
    product_link_name: String,
    products: IndexMap<String, Product>,
    services: IndexMap<String, Service>,
    apis: IndexMap<String, Api>,
    main_product_id: Option<String>,
    main_product_link_id: Option<String>,
    diagram_id: Option<String>,
}

impl Normalizer {
    /// Creates a normalizer for one run
    ///
    /// # Arguments
    /// * `product_name` - Exact name of the main product
    /// * `product_link_name` - Name of the product link pointing at the published diagram
    pub fn new(product_name: impl Into<String>, product_link_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            product_link_name: product_link_name.into(),
            products: IndexMap::new(),
            services: IndexMap::new(),
            apis: IndexMap::new(),
            main_product_id: None,
            main_product_link_id: None,
            diagram_id: None,
        }
    }

    /// Normalizes a raw GraphQL response body
    ///
    /// # Errors
    /// Returns an error if the body is not JSON or a `MalformedGraph` error
    /// naming the first entity that lacks an expected key.
    pub fn normalize(self, raw_response: &str) -> Result<NormalizedGraph> {
        let response: Value = serde_json::from_str(raw_response)
            .context("Failed to parse VSM GraphQL response as JSON")?;
        self.normalize_value(&response)
    }

    /// Normalizes an already parsed GraphQL response
    pub fn normalize_value(mut self, response: &Value) -> Result<NormalizedGraph> {
        let products = response
            .get("data")
            .and_then(|data| data.get("products"))
            .and_then(Value::as_array)
            .ok_or_else(|| VsmDiagramError::malformed("response", "data.products"))?;

        for product in products {
            self.normalize_product(product)?;
        }

        debug!(
            products = self.products.len(),
            services = self.services.len(),
            apis = self.apis.len();
            "Normalized VSM data"
        );

        Ok(NormalizedGraph::new(
            self.products,
            self.services,
            self.apis,
            self.main_product_id,
            self.main_product_link_id,
            self.diagram_id,
        ))
    }

    fn normalize_product(&mut self, product: &Value) -> Result<()> {
        let product_id = entity_id(product)?;
        if self.products.contains_key(product_id) {
            return Ok(());
        }

        let name = required_str(product, product_id, "name")?;

        let eam_id = match optional_array(product, product_id, "readOnlyLinksV2")?.first() {
            Some(link) => last_path_segment(required_str(link, product_id, "url")?),
            None => None,
        };

        let main_product = name == self.product_name;
        let mut norm_product = Product::new(
            product_id.to_string(),
            eam_id,
            name.to_string(),
            main_product,
        );

        for link in optional_array(product, product_id, "links")? {
            if required_str(link, product_id, "name")? != self.product_link_name {
                continue;
            }
            let link_id = required_str(link, product_id, "id")?;
            norm_product.set_link_id(link_id.to_string());

            if main_product && self.main_product_link_id.is_none() {
                self.main_product_link_id = Some(link_id.to_string());
                self.diagram_id = link
                    .get("url")
                    .and_then(Value::as_str)
                    .and_then(last_path_segment);
            }
        }

        if main_product && self.main_product_id.is_none() {
            self.main_product_id = Some(product_id.to_string());
        }

        self.products.insert(product_id.to_string(), norm_product);

        for rel in optional_array(product, product_id, "relProductToService")? {
            let service = required_object(rel, product_id, "service")?;
            self.normalize_service(service, Some(product_id))?;
        }

        Ok(())
    }

    fn normalize_service(&mut self, service: &Value, parent_product_id: Option<&str>) -> Result<()> {
        let service_id = entity_id(service)?;

        // A service asserting its own product membership wins over the caller's parent
        let nested_products = optional_array(service, service_id, "relServiceToProduct")?;
        let mut nested = Vec::with_capacity(nested_products.len());
        for rel in nested_products {
            nested.push(required_object(rel, service_id, "product")?);
        }

        let product_ids: Vec<String> = if nested.is_empty() {
            parent_product_id.map(str::to_string).into_iter().collect()
        } else {
            nested
                .iter()
                .map(|product| entity_id(product).map(str::to_string))
                .collect::<Result<_>>()?
        };

        match self.services.entry(service_id.to_string()) {
            Entry::Occupied(mut entry) => entry.get_mut().merge_product_ids(product_ids),
            Entry::Vacant(entry) => {
                let name = required_str(service, service_id, "name")?;
                entry.insert(Service::new(
                    service_id.to_string(),
                    name.to_string(),
                    product_ids,
                ));
            }
        }

        for product in nested {
            self.normalize_product(product)?;
        }

        // Walked even for already known services so APIs only reachable here are found
        for rel in optional_array(service, service_id, "relServiceToApi")? {
            let api = required_object(rel, service_id, "api")?;
            self.normalize_api(api)?;
        }

        Ok(())
    }

    fn normalize_api(&mut self, api: &Value) -> Result<()> {
        let api_id = entity_id(api)?;
        if self.apis.contains_key(api_id) {
            return Ok(());
        }

        let name = required_str(api, api_id, "name")?;
        let relations = api
            .get("relApiToService")
            .and_then(Value::as_array)
            .ok_or_else(|| VsmDiagramError::malformed(api_id, "relApiToService"))?;

        // Registered before recursing so a reference back to this API is a no-op
        self.apis
            .insert(api_id.to_string(), Api::new(api_id.to_string(), name.to_string()));

        let mut norm_api = Api::new(api_id.to_string(), name.to_string());
        for rel in relations {
            let service = required_object(rel, api_id, "service")?;
            let service_id = entity_id(service)?;
            let role = ServiceRole::parse(required_str(rel, api_id, "role")?);

            self.normalize_service(service, None)?;

            if !norm_api.attach_service(service_id, &role) {
                warn!(
                    api_id = api_id,
                    service_id = service_id,
                    role:? = role;
                    "Dropping service relation with unrecognized role"
                );
            }
        }

        self.apis.insert(api_id.to_string(), norm_api);
        Ok(())
    }
}

fn entity_id(entity: &Value) -> Result<&str> {
    required_str(entity, UNKNOWN_ENTITY, "id")
}

fn required_str<'a>(entity: &'a Value, entity_id: &str, key: &str) -> Result<&'a str> {
    entity
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| VsmDiagramError::malformed(entity_id, key).into())
}

fn required_object<'a>(entity: &'a Value, entity_id: &str, key: &str) -> Result<&'a Value> {
    entity
        .get(key)
        .filter(|value| value.is_object())
        .ok_or_else(|| VsmDiagramError::malformed(entity_id, key).into())
}

/// Absent or `null` lists are empty; anything else that is not a list is malformed
fn optional_array<'a>(entity: &'a Value, entity_id: &str, key: &str) -> Result<&'a [Value]> {
    match entity.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(VsmDiagramError::malformed(entity_id, key).into()),
    }
}

fn last_path_segment(url: &str) -> Option<String> {
    url.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
