/// Role a service plays on an API relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRole {
    /// The service calls the API
    Consumer,
    /// The service implements the API
    Provider,
    /// Any other role value; carried only so it can be reported before being dropped
    Unrecognized(String),
}

impl ServiceRole {
    pub fn parse(role: &str) -> Self {
        match role {
            "consumer" => ServiceRole::Consumer,
            "provider" => ServiceRole::Provider,
            other => ServiceRole::Unrecognized(other.to_string()),
        }
    }
}

/// API entity - a directional contract between consuming and providing services
#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    id: String,
    name: String,
    source_ids: Vec<String>,
    target_ids: Vec<String>,
}

impl Api {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            source_ids: Vec::new(),
            target_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Services consuming this API
    pub fn source_ids(&self) -> &[String] {
        &self.source_ids
    }

    /// Services providing this API
    pub fn target_ids(&self) -> &[String] {
        &self.target_ids
    }

    /// Records a service under the given role.
    ///
    /// Returns `false` when the role is unrecognized and the service was dropped.
    pub fn attach_service(&mut self, service_id: &str, role: &ServiceRole) -> bool {
        let ids = match role {
            ServiceRole::Consumer => &mut self.source_ids,
            ServiceRole::Provider => &mut self.target_ids,
            ServiceRole::Unrecognized(_) => return false,
        };
        if !ids.iter().any(|id| id == service_id) {
            ids.push(service_id.to_string());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_role_parse() {
        assert_eq!(ServiceRole::parse("consumer"), ServiceRole::Consumer);
        assert_eq!(ServiceRole::parse("provider"), ServiceRole::Provider);
        assert_eq!(
            ServiceRole::parse("Consumer"),
            ServiceRole::Unrecognized("Consumer".to_string())
        );
    }

    #[test]
    fn test_attach_service_partitions_by_role() {
        let mut api = Api::new("a1".into(), "Orders API".into());
        assert!(api.attach_service("s1", &ServiceRole::Consumer));
        assert!(api.attach_service("s2", &ServiceRole::Provider));
        assert!(api.attach_service("s1", &ServiceRole::Consumer));
        assert!(!api.attach_service("s3", &ServiceRole::Unrecognized("owner".into())));

        assert_eq!(api.source_ids(), &["s1".to_string()]);
        assert_eq!(api.target_ids(), &["s2".to_string()]);
    }

    #[test]
    fn test_self_loop_service_in_both_roles() {
        let mut api = Api::new("a1".into(), "Loop".into());
        api.attach_service("s1", &ServiceRole::Consumer);
        api.attach_service("s1", &ServiceRole::Provider);
        assert_eq!(api.source_ids(), &["s1".to_string()]);
        assert_eq!(api.target_ids(), &["s1".to_string()]);
    }
}
