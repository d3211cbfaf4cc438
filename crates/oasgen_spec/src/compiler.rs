//! Expansion of a resource description into a full API description.

use indexmap::IndexMap;
use tracing::debug;

use crate::artifact::{
    CompiledArtifact, Components, Info, InlineResponse, MediaType, Operation, Parameter,
    PathItem, PropertySchema, Reference, Response, Schema, Server, Tag,
};
use crate::casing::{kebab_case, title_case_first, upper_camel_case};
use crate::error::SpecResult;
use crate::models::{Resource, ResourceDescription};

pub const OPENAPI_VERSION: &str = "3.0.2";
pub const API_VERSION: &str = "1.0.0";
pub const SERVER_URL_PLACEHOLDER: &str = "@TODO: Add server URL";

/// Shared header and response definitions, referenced but never expanded.
pub const ADR_COMPONENTS_URL: &str = "https://static.developer.overheid.nl/adr/components.yaml";

const ID_PARAMETER: &str = "id";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Compile a parsed description. Total: never fails on a parsed document.
pub fn compile(doc: &ResourceDescription) -> CompiledArtifact {
    debug!(
        "Compiling '{}' with {} resource(s)",
        doc.title,
        doc.resources.len()
    );

    CompiledArtifact {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: doc.title.clone(),
            description: doc.description.clone(),
            version: API_VERSION.to_string(),
            contact: doc.contact.clone(),
        },
        servers: vec![Server {
            url: SERVER_URL_PLACEHOLDER.to_string(),
        }],
        tags: doc.resources.iter().map(tag_for).collect(),
        paths: build_paths(&doc.resources),
        components: Components {
            schemas: build_schemas(&doc.resources),
            parameters: build_parameters(),
        },
    }
}

/// Parse raw input text and compile it.
pub fn compile_text(text: &str) -> SpecResult<CompiledArtifact> {
    let doc = ResourceDescription::from_json(text)?;
    Ok(compile(&doc))
}

/// Collection path for a resource, e.g. `/blog-posts`.
pub fn collection_path(resource: &Resource) -> String {
    format!("/{}", kebab_case(&resource.plural))
}

/// Item path for a resource, e.g. `/blog-posts/{id}`.
pub fn item_path(resource: &Resource) -> String {
    format!("{}/{{{}}}", collection_path(resource), ID_PARAMETER)
}

/// Component key of the resource's schema.
pub fn schema_name(resource: &Resource) -> String {
    upper_camel_case(&resource.name)
}

fn tag_for(resource: &Resource) -> Tag {
    Tag {
        name: title_case_first(&resource.plural),
        description: format!("Alle API operaties die bij {} horen.", resource.plural),
    }
}

fn build_paths(resources: &[Resource]) -> IndexMap<String, PathItem> {
    let mut paths = IndexMap::new();
    for resource in resources {
        paths.insert(collection_path(resource), collection_item(resource));
        paths.insert(item_path(resource), single_item(resource));
    }
    paths
}

fn collection_item(resource: &Resource) -> PathItem {
    let name = &resource.name;
    let plural = &resource.plural;

    let list = operation(
        resource,
        format!("list{}", upper_camel_case(plural)),
        format!("Alle {} ophalen", plural),
        [(
            "200",
            body_response(resource, "OK", &["API-Version", "Link"]),
        )],
    );

    let create = (!resource.is_readonly()).then(|| {
        operation(
            resource,
            format!("create{}", upper_camel_case(plural)),
            format!("Nieuwe {} aanmaken", name),
            [
                ("201", body_response(resource, "Created", &["API-Version"])),
                ("400", adr_response("400")),
            ],
        )
    });

    PathItem {
        parameters: Vec::new(),
        get: list,
        put: None,
        post: create,
        delete: None,
    }
}

fn single_item(resource: &Resource) -> PathItem {
    let label = title_case_first(&resource.name);
    let subject = upper_camel_case(&resource.name);

    let retrieve = operation(
        resource,
        format!("retrieve{}", subject),
        format!("{} ophalen", label),
        [
            ("200", body_response(resource, "OK", &["API-Version"])),
            ("404", adr_response("404")),
        ],
    );

    // Update and delete are generated together or not at all.
    let (edit, remove) = if resource.is_readonly() {
        (None, None)
    } else {
        let edit = operation(
            resource,
            format!("edit{}", subject),
            format!("{} wijzigen", label),
            [
                ("200", body_response(resource, "OK", &["API-Version"])),
                ("400", adr_response("400")),
            ],
        );
        let remove = operation(
            resource,
            format!("remove{}", subject),
            format!("{} verwijderen", label),
            [("204", adr_response("204")), ("404", adr_response("404"))],
        );
        (Some(edit), Some(remove))
    };

    PathItem {
        parameters: vec![Reference::new(format!(
            "#/components/parameters/{}",
            ID_PARAMETER
        ))],
        get: retrieve,
        put: edit,
        post: None,
        delete: remove,
    }
}

fn operation<const N: usize>(
    resource: &Resource,
    operation_id: String,
    text: String,
    responses: [(&str, Response); N],
) -> Operation {
    Operation {
        operation_id,
        description: text.clone(),
        summary: text,
        tags: vec![title_case_first(&resource.plural)],
        responses: responses
            .into_iter()
            .map(|(status, response)| (status.to_string(), response))
            .collect(),
    }
}

fn body_response(resource: &Resource, description: &str, headers: &[&str]) -> Response {
    let headers = headers
        .iter()
        .map(|header| {
            (
                header.to_string(),
                Reference::new(format!("{}#/headers/{}", ADR_COMPONENTS_URL, header)),
            )
        })
        .collect();

    let mut content = IndexMap::new();
    content.insert(
        JSON_MEDIA_TYPE.to_string(),
        MediaType {
            schema: Reference::new(format!("#/components/schemas/{}", schema_name(resource))),
        },
    );

    Response::Inline(InlineResponse {
        headers,
        description: description.to_string(),
        content,
    })
}

fn adr_response(status: &str) -> Response {
    Response::Ref(Reference::new(format!(
        "{}#/responses/{}",
        ADR_COMPONENTS_URL, status
    )))
}

fn build_schemas(resources: &[Resource]) -> IndexMap<String, Schema> {
    let mut schemas = IndexMap::new();
    for resource in resources {
        let mut properties = IndexMap::new();
        properties.insert(
            ID_PARAMETER.to_string(),
            PropertySchema {
                kind: "string".to_string(),
                format: Some("uuid".to_string()),
            },
        );
        schemas.insert(schema_name(resource), Schema { properties });
    }
    schemas
}

fn build_parameters() -> IndexMap<String, Parameter> {
    let mut parameters = IndexMap::new();
    parameters.insert(
        ID_PARAMETER.to_string(),
        Parameter {
            name: ID_PARAMETER.to_string(),
            location: "path".to_string(),
            description: ID_PARAMETER.to_string(),
            required: true,
            schema: PropertySchema {
                kind: "string".to_string(),
                format: None,
            },
        },
    );
    parameters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;

    fn description(resources: Vec<Resource>) -> ResourceDescription {
        let mut doc = ResourceDescription::new(
            "Orders",
            "Order API",
            Contact::new("A", "a@b.nl", "https://b.nl"),
        );
        doc.resources = resources;
        doc
    }

    #[test]
    fn test_operation_ids() {
        let artifact = compile(&description(vec![Resource::new("user", "users")]));

        let list = &artifact.paths["/users"];
        assert_eq!(list.get.operation_id, "listUsers");
        assert_eq!(list.post.as_ref().unwrap().operation_id, "createUsers");

        let item = &artifact.paths["/users/{id}"];
        assert_eq!(item.get.operation_id, "retrieveUser");
        assert_eq!(item.put.as_ref().unwrap().operation_id, "editUser");
        assert_eq!(item.delete.as_ref().unwrap().operation_id, "removeUser");
    }

    #[test]
    fn test_readonly_drops_mutations() {
        let artifact = compile(&description(vec![Resource::new("order", "orders").readonly()]));

        assert_eq!(artifact.paths["/orders"].methods(), vec!["get"]);
        assert_eq!(artifact.paths["/orders/{id}"].methods(), vec!["get"]);
    }

    #[test]
    fn test_path_derivation_kebab_cases_plural() {
        let artifact = compile(&description(vec![Resource::new("blogPost", "blogPosts")]));

        let keys: Vec<_> = artifact.paths.keys().cloned().collect();
        assert_eq!(keys, vec!["/blog-posts", "/blog-posts/{id}"]);
        assert_eq!(artifact.tags[0].name, "BlogPosts");
        assert!(artifact.components.schemas.contains_key("BlogPost"));
    }

    #[test]
    fn test_every_operation_tagged_with_plural_label() {
        let artifact = compile(&description(vec![Resource::new("blog_post", "blog_posts")]));

        for item in artifact.paths.values() {
            for op in item.operations() {
                assert_eq!(op.tags, vec!["Blog_posts".to_string()]);
            }
        }
    }

    #[test]
    fn test_body_refs_point_at_generated_schema() {
        let artifact = compile(&description(vec![Resource::new("blog_post", "blog_posts")]));

        let op = &artifact.paths["/blog-posts/{id}"].get;
        match &op.responses["200"] {
            Response::Inline(inline) => {
                assert_eq!(
                    inline.content["application/json"].schema.reference,
                    "#/components/schemas/BlogPost"
                );
            }
            other => panic!("expected inline response, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_resources_compile_to_degenerate_artifact() {
        let artifact = compile(&description(Vec::new()));
        assert!(artifact.paths.is_empty());
        assert!(artifact.tags.is_empty());
        assert!(artifact.components.parameters.contains_key("id"));
    }

    #[test]
    fn test_compile_text_rejects_missing_contact() {
        let result = compile_text(r#"{"title": "T", "description": "D", "resources": []}"#);
        assert!(result.is_err());
    }
}
