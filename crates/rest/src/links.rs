//! Hypermedia link enrichment.
//!
//! Models leave storage bare; this module decorates them with a `_links`
//! map before they go over the wire. Which relations appear is driven by
//! a [`LinkSpec`] (relation name to route identifier), and hrefs come
//! from a [`PathGenerator`] so link construction never hard-codes paths.

use std::collections::BTreeMap;

use petstore_model::{ListPage, Pet};
use serde::Serialize;
use thiserror::Error;

/// HTTP method attached to a link. Fixed per relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkMethod {
    /// GET, used by `read`.
    Get,
    /// POST, used by `create`.
    Post,
    /// PUT, used by `update`.
    Put,
    /// DELETE, used by `delete`.
    Delete,
}

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Path or URL of the linked operation.
    pub href: String,
    /// Method the client should use to follow the link.
    pub method: LinkMethod,
}

/// Errors raised while resolving a route identifier to a path.
///
/// These indicate server wiring mistakes, not client problems; the REST
/// layer maps them to HTTP 500.
#[derive(Debug, Error)]
pub enum PathError {
    /// No route is registered under that identifier.
    #[error("unknown route identifier: {route}")]
    UnknownRoute {
        /// The unrecognized route identifier.
        route: String,
    },

    /// The route template needs a parameter the caller did not supply.
    #[error("route {route} is missing parameter: {param}")]
    MissingParam {
        /// The route identifier being resolved.
        route: String,
        /// The placeholder left unbound.
        param: String,
    },
}

/// Capability for turning a route identifier plus parameters into a path.
pub trait PathGenerator: Send + Sync {
    /// Resolves `route` with the given `(name, value)` parameters.
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> Result<String, PathError>;
}

/// Route identifiers and their path templates.
///
/// Templates use `{name}` placeholders, mirroring the router's syntax so
/// the registered paths and the generated links cannot drift apart.
#[derive(Debug, Clone)]
pub struct RoutePaths {
    routes: BTreeMap<String, String>,
}

impl RoutePaths {
    /// Creates an empty route table.
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    /// Registers a route identifier with its path template.
    pub fn register(mut self, route: impl Into<String>, template: impl Into<String>) -> Self {
        self.routes.insert(route.into(), template.into());
        self
    }

    /// The route table for the pet resource.
    pub fn pet_defaults() -> Self {
        Self::new()
            .register("pets.collection", "/pets")
            .register("pets.item", "/pets/{id}")
    }
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self::pet_defaults()
    }
}

impl PathGenerator for RoutePaths {
    fn generate(&self, route: &str, params: &[(&str, &str)]) -> Result<String, PathError> {
        let template = self.routes.get(route).ok_or_else(|| PathError::UnknownRoute {
            route: route.to_string(),
        })?;

        let mut href = template.clone();
        for (name, value) in params {
            href = href.replace(&format!("{{{name}}}"), value);
        }

        if let (Some(start), Some(end)) = (href.find('{'), href.find('}')) {
            return Err(PathError::MissingParam {
                route: route.to_string(),
                param: href[start + 1..end].to_string(),
            });
        }
        Ok(href)
    }
}

/// Which hypermedia relations to attach, as relation name to route
/// identifier. Absent relations are omitted from `_links` entirely.
#[derive(Debug, Clone, Default)]
pub struct LinkSpec {
    /// Route for the item `read` link (GET).
    pub read: Option<String>,
    /// Route for the item `update` link (PUT).
    pub update: Option<String>,
    /// Route for the item `delete` link (DELETE).
    pub delete: Option<String>,
    /// Route for the collection `create` link (POST).
    pub create: Option<String>,
}

impl LinkSpec {
    /// The full link spec for the pet resource.
    pub fn pet_defaults() -> Self {
        Self {
            read: Some("pets.item".to_string()),
            update: Some("pets.item".to_string()),
            delete: Some("pets.item".to_string()),
            create: Some("pets.collection".to_string()),
        }
    }
}

/// A pet with its `_links` attached, as served over the wire.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedPet {
    /// The underlying pet, flattened into the envelope.
    #[serde(flatten)]
    pub pet: Pet,

    /// Hypermedia links keyed by relation name. Omitted when empty.
    #[serde(rename = "_links", skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, Link>,
}

/// A resolved list page with enriched items and collection-level links.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedList {
    /// The resolved page, flattened into the envelope.
    #[serde(flatten)]
    pub page: ListPage<EnrichedPet>,

    /// Collection-level links. Omitted when empty.
    #[serde(rename = "_links", skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, Link>,
}

/// Attaches item-level links (`read`, `update`, `delete`) to a pet.
///
/// Each relation present in `spec` resolves its route with `{id}` bound
/// to the pet's id; the method is fixed by the relation.
pub fn enrich_pet(
    pet: Pet,
    spec: &LinkSpec,
    paths: &dyn PathGenerator,
) -> Result<EnrichedPet, PathError> {
    let mut links = BTreeMap::new();
    let relations = [
        ("read", &spec.read, LinkMethod::Get),
        ("update", &spec.update, LinkMethod::Put),
        ("delete", &spec.delete, LinkMethod::Delete),
    ];

    for (relation, route, method) in relations {
        if let Some(route) = route {
            let href = paths.generate(route, &[("id", &pet.id)])?;
            links.insert(relation.to_string(), Link { href, method });
        }
    }

    Ok(EnrichedPet { pet, links })
}

/// Enriches every item in a page and attaches the collection `create`
/// link when the spec carries one. The create link is present even for
/// an empty page.
pub fn enrich_list(
    page: ListPage<Pet>,
    spec: &LinkSpec,
    paths: &dyn PathGenerator,
) -> Result<EnrichedList, PathError> {
    let mut items = Vec::with_capacity(page.items.len());
    let envelope = ListPage {
        offset: page.offset,
        limit: page.limit,
        filters: page.filters,
        sort: page.sort,
        count: page.count,
        items: Vec::new(),
    };

    for pet in page.items {
        items.push(enrich_pet(pet, spec, paths)?);
    }

    let mut links = BTreeMap::new();
    if let Some(route) = &spec.create {
        let href = paths.generate(route, &[])?;
        links.insert(
            "create".to_string(),
            Link {
                href,
                method: LinkMethod::Post,
            },
        );
    }

    let mut page = envelope;
    page.items = items;
    Ok(EnrichedList { page, links })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use petstore_model::ListQuery;

    fn pet(id: &str) -> Pet {
        Pet {
            id: id.to_string(),
            name: "Rex".to_string(),
            tag: None,
            vaccinations: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_generate_substitutes_params() {
        let paths = RoutePaths::pet_defaults();
        let href = paths.generate("pets.item", &[("id", "p-1")]).unwrap();
        assert_eq!(href, "/pets/p-1");
    }

    #[test]
    fn test_generate_unknown_route() {
        let paths = RoutePaths::pet_defaults();
        let err = paths.generate("pets.nope", &[]).unwrap_err();
        assert!(matches!(err, PathError::UnknownRoute { .. }));
    }

    #[test]
    fn test_generate_missing_param() {
        let paths = RoutePaths::pet_defaults();
        let err = paths.generate("pets.item", &[]).unwrap_err();
        match err {
            PathError::MissingParam { param, .. } => assert_eq!(param, "id"),
            other => panic!("expected missing param, got {:?}", other),
        }
    }

    #[test]
    fn test_enrich_pet_attaches_exactly_the_spec_relations() {
        let paths = RoutePaths::pet_defaults();
        let spec = LinkSpec {
            read: Some("pets.item".to_string()),
            ..LinkSpec::default()
        };
        let enriched = enrich_pet(pet("p-1"), &spec, &paths).unwrap();

        assert_eq!(enriched.links.len(), 1);
        let read = &enriched.links["read"];
        assert_eq!(read.href, "/pets/p-1");
        assert_eq!(read.method, LinkMethod::Get);
    }

    #[test]
    fn test_enrich_pet_full_spec() {
        let paths = RoutePaths::pet_defaults();
        let enriched = enrich_pet(pet("p-1"), &LinkSpec::pet_defaults(), &paths).unwrap();

        assert_eq!(enriched.links.len(), 3);
        assert_eq!(enriched.links["read"].method, LinkMethod::Get);
        assert_eq!(enriched.links["update"].method, LinkMethod::Put);
        assert_eq!(enriched.links["delete"].method, LinkMethod::Delete);
        for link in enriched.links.values() {
            assert_eq!(link.href, "/pets/p-1");
        }
    }

    #[test]
    fn test_enriched_pet_omits_empty_links() {
        let paths = RoutePaths::pet_defaults();
        let enriched = enrich_pet(pet("p-1"), &LinkSpec::default(), &paths).unwrap();
        let json = serde_json::to_value(&enriched).unwrap();
        assert!(json.get("_links").is_none());
    }

    #[test]
    fn test_enrich_list_create_link_independent_of_items() {
        let paths = RoutePaths::pet_defaults();
        let spec = LinkSpec {
            create: Some("pets.collection".to_string()),
            ..LinkSpec::default()
        };
        let empty = ListPage::resolved(ListQuery::default(), Vec::new(), 0);
        let enriched = enrich_list(empty, &spec, &paths).unwrap();

        assert_eq!(enriched.links.len(), 1);
        assert_eq!(enriched.links["create"].href, "/pets");
        assert_eq!(enriched.links["create"].method, LinkMethod::Post);
        assert!(enriched.page.items.is_empty());
    }

    #[test]
    fn test_enrich_list_enriches_every_item() {
        let paths = RoutePaths::pet_defaults();
        let page = ListPage::resolved(
            ListQuery::default(),
            vec![pet("p-1"), pet("p-2")],
            2,
        );
        let enriched = enrich_list(page, &LinkSpec::pet_defaults(), &paths).unwrap();

        assert_eq!(enriched.page.items[0].links["read"].href, "/pets/p-1");
        assert_eq!(enriched.page.items[1].links["update"].href, "/pets/p-2");
    }

    #[test]
    fn test_wire_shape_of_enriched_pet() {
        let paths = RoutePaths::pet_defaults();
        let enriched = enrich_pet(pet("p-1"), &LinkSpec::pet_defaults(), &paths).unwrap();
        let json = serde_json::to_value(&enriched).unwrap();

        assert_eq!(json["id"], "p-1");
        assert_eq!(json["_links"]["read"]["href"], "/pets/p-1");
        assert_eq!(json["_links"]["read"]["method"], "GET");
        assert_eq!(json["_links"]["update"]["method"], "PUT");
        assert_eq!(json["_links"]["delete"]["method"], "DELETE");
    }
}
