use super::ensure_success;
use crate::ports::outbound::{AccessTokenProvider, VsmRepository};
use crate::shared::error::VsmDiagramError;
use crate::shared::Result;
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const PRODUCT_MODEL_QUERY: &str = r#"
query ProductModel($productname: String) {
  products(where: {name: {_eq: $productname}}) {
    id
    name
    links {
      name
      id
      url
    }
    readOnlyLinksV2(where: {source: {_like: "%eam%"}}) {
      url
    }
    relProductToService {
      service {
        id
        name
        relServiceToApi {
          api {
            id
            name
            relApiToService {
              role
              service {
                id
                name
                relServiceToProduct {
                  product {
                    id
                    name
                    readOnlyLinksV2(where: {source: {_like: "%eam%"}}) {
                      url
                    }
                  }
                }
              }
            }
          }
        }
      }
    }
  }
}
"#;

const INSERT_LINK_MUTATION: &str = r#"
mutation UpsertProductLink($values: LinksInsertInput!) {
  insertLinksOne(object: $values) {
    id
    url
    name
    __typename
  }
}
"#;

const UPDATE_LINK_MUTATION: &str = r#"
mutation UpsertProductLink($id: uuid, $values: LinksSetInput) {
  updateLinks(where: {id: {_eq: $id}}, _set: $values) {
    returning {
      id
      url
      name
      __typename
    }
    __typename
  }
}
"#;

/// VSM GraphQL client
///
/// Implements the VsmRepository port against the vsm-compass GraphQL endpoint.
/// Requests are sent once; there is no retry.
pub struct VsmGraphQlClient<T> {
    client: Client,
    graphql_url: String,
    tokens: T,
}

impl<T: AccessTokenProvider> VsmGraphQlClient<T> {
    pub fn new(client: Client, base_url: &str, tokens: T) -> Self {
        Self {
            client,
            graphql_url: format!("{}/services/vsm-compass/v1/graphql", base_url),
            tokens,
        }
    }

    /// Sends one GraphQL request and returns the raw body once the
    /// response is known to carry no GraphQL errors
    fn send(
        &self,
        query: &str,
        variables: Value,
        to_error: impl Fn(String) -> VsmDiagramError,
    ) -> Result<String> {
        let token = self.tokens.access_token()?;
        let request = GraphQlRequest { query, variables };

        let response = self
            .client
            .post(&self.graphql_url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .map_err(|e| to_error(e.to_string()))?;
        let body = ensure_success(response, &to_error)?
            .text()
            .map_err(|e| to_error(e.to_string()))?;

        let envelope: GraphQlEnvelope = serde_json::from_str(&body)
            .map_err(|e| to_error(format!("response is not valid JSON: {}", e)))?;
        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            return Err(to_error(format!("GraphQL errors: {}", messages.join("; "))).into());
        }

        Ok(body)
    }
}

impl<T: AccessTokenProvider> VsmRepository for VsmGraphQlClient<T> {
    fn fetch_product_graph(&self, product_name: &str) -> Result<String> {
        info!(product = product_name; "Fetching VSM product model");
        self.send(
            PRODUCT_MODEL_QUERY,
            json!({ "productname": product_name }),
            |details| VsmDiagramError::Fetch { details },
        )
    }

    fn update_product_link(
        &self,
        link_name: &str,
        diagram_url: &str,
        product_id: Option<&str>,
        existing_link_id: Option<&str>,
    ) -> Result<()> {
        let to_error = |details: String| VsmDiagramError::Publish {
            operation: "update VSM product link".to_string(),
            details,
        };

        let (mutation, variables) = match (existing_link_id, product_id) {
            (Some(link_id), _) => (
                UPDATE_LINK_MUTATION,
                json!({
                    "id": link_id,
                    "values": { "name": link_name, "url": diagram_url },
                }),
            ),
            (None, Some(product_id)) => (
                INSERT_LINK_MUTATION,
                json!({
                    "values": {
                        "name": link_name,
                        "url": diagram_url,
                        "vsmObjectId": product_id,
                    },
                }),
            ),
            (None, None) => {
                warn!(link = link_name; "No main product found, product link not updated");
                return Ok(());
            }
        };

        debug!(link = link_name, url = diagram_url; "Upserting product link");
        self.send(mutation, variables, to_error)?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    /// Absent or `null` on success
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}
