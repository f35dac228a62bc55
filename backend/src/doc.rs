//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers from [`crate::inbound::http::schemas`]. The
//! document is served at `/openapi.json`, browsable through Swagger UI at
//! `/docs/`, and exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::counter::HitsResponse;
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::schemas::{ErrorSchema, FieldViolationSchema, UserSchema};
use crate::inbound::http::users::CreateUserRequest;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docker E2E",
        description = "Health check, user registration and listing, and a hit counter."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::counter::increment_counter,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        FieldViolationSchema,
        CreateUserRequest,
        HitsResponse,
        HealthStatus
    )),
    tags(
        (name = "users", description = "User registration and listing"),
        (name = "counter", description = "Atomic hit counter"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[case("/users")]
    #[case("/counter")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn users_path_has_both_methods() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users").expect("users path");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
    }

    #[rstest]
    #[case("User", &["id", "email", "name"])]
    #[case("Error", &["detail"])]
    #[case("HitsResponse", &["hits"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }
}
