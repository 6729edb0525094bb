//! OpenAPI description of the routes mounted by [`CrudService::router`].
//!
//! [`CrudService::router`]: crate::CrudService::router
//!
//! ```rust,ignore
//! let doc = crudrest::openapi::resource_openapi::<CardTransaction>("/transactions");
//! let app = Router::new()
//!     .nest("/transactions", service.router())
//!     .route("/openapi.json", get(move || async move { Json(doc) }));
//! ```

use utoipa::openapi::path::{
    HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathsBuilder,
};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, Schema, Type};
use utoipa::openapi::{
    ComponentsBuilder, ContentBuilder, InfoBuilder, OpenApi, OpenApiBuilder, Ref, RefOr, Required,
    Response, ResponseBuilder,
};
use utoipa::ToSchema;

use crate::core::Resource;
use crate::operations::ID_PARAM;
use crate::pagination::{PAGE_PARAM, PER_PAGE_PARAM, PageLinks};

const JSON: &str = "application/json";

/// Document for one resource mounted at `base_path`.
#[must_use]
pub fn resource_openapi<R: Resource + ToSchema>(base_path: &str) -> OpenApi {
    let base = base_path.trim_end_matches('/');
    let singular = R::RESOURCE_NAME_SINGULAR;
    let plural = R::RESOURCE_NAME_PLURAL;
    let entity = || RefOr::Ref(Ref::from_schema_name(R::name()));

    let mut collection = PathItem::new(
        HttpMethod::Get,
        OperationBuilder::new()
            .operation_id(Some(format!("get_all_{plural}")))
            .summary(Some(format!("Get all {plural}")))
            .description(Some(describe(&format!("Retrieves a page of {plural}."), R::RESOURCE_DESCRIPTION)))
            .parameter(query_integer(PAGE_PARAM, "0-based page number"))
            .parameter(query_integer(PER_PAGE_PARAM, "Page size"))
            .parameter(
                ParameterBuilder::new()
                    .name(ID_PARAM)
                    .parameter_in(ParameterIn::Query)
                    .required(Required::False)
                    .description(Some(format!("Only return the {singular} with this identifier")))
                    .schema(Some(string_schema())),
            )
            .response("200", json_response("Page of resources", list_schema(entity())))
            .response("400", plain_response("Invalid query parameter"))
            .response("500", plain_response("Internal Server Error"))
            .build(),
    );
    collection.post = Some(
        OperationBuilder::new()
            .operation_id(Some(format!("create_one_{singular}")))
            .summary(Some(format!("Create one {singular}")))
            .description(Some(describe(&format!("Creates a new {singular}."), R::RESOURCE_DESCRIPTION)))
            .request_body(Some(json_body(entity())))
            .response("201", json_response("Resource created successfully", entity()))
            .response("400", plain_response("Malformed payload"))
            .response("500", plain_response("Internal Server Error"))
            .build(),
    );
    collection.options = Some(options_operation(&format!("options_{plural}")));

    let mut item = PathItem::new(
        HttpMethod::Get,
        OperationBuilder::new()
            .operation_id(Some(format!("get_one_{singular}")))
            .summary(Some(format!("Get one {singular}")))
            .description(Some(describe(&format!("Retrieves one {singular} by its ID."), R::RESOURCE_DESCRIPTION)))
            .parameter(id_parameter())
            .response("200", json_response("The requested resource", entity()))
            .response("404", plain_response("Resource not found"))
            .response("500", plain_response("Internal Server Error"))
            .build(),
    );
    item.patch = Some(
        OperationBuilder::new()
            .operation_id(Some(format!("patch_one_{singular}")))
            .summary(Some(format!("Patch one {singular}")))
            .description(Some(describe(
                "Updates only the fields present in the body. The identifier is never changed.",
                R::RESOURCE_DESCRIPTION,
            )))
            .parameter(id_parameter())
            .request_body(Some(json_body(entity())))
            .response("200", json_response("Resource updated successfully", entity()))
            .response("400", plain_response("Malformed payload"))
            .response("404", plain_response("Resource not found"))
            .response("500", plain_response("Internal Server Error"))
            .build(),
    );
    item.put = Some(
        OperationBuilder::new()
            .operation_id(Some(format!("update_one_{singular}")))
            .summary(Some(format!("Replace one {singular}")))
            .description(Some(describe(
                &format!("Replaces every field of one {singular} except its identifier."),
                R::RESOURCE_DESCRIPTION,
            )))
            .parameter(id_parameter())
            .request_body(Some(json_body(entity())))
            .response("200", plain_response("Resource replaced"))
            .response("400", plain_response("Malformed payload"))
            .response("404", plain_response("Resource not found"))
            .response("500", plain_response("Internal Server Error"))
            .build(),
    );
    item.options = Some(options_operation(&format!("options_one_{singular}")));

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title(format!("{plural} API"))
                .version(env!("CARGO_PKG_VERSION")),
        )
        .paths(
            PathsBuilder::new()
                .path(base.to_string(), collection)
                .path(format!("{base}/{{id}}"), item),
        )
        .components(Some(
            ComponentsBuilder::new()
                .schema_from::<R>()
                .schema_from::<PageLinks>()
                .build(),
        ))
        .build()
}

fn describe(summary: &str, resource_description: &str) -> String {
    if resource_description.is_empty() {
        summary.to_string()
    } else {
        format!("{summary}\n\n{resource_description}")
    }
}

fn string_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new().schema_type(Type::String).build(),
    ))
}

fn integer_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new().schema_type(Type::Integer).build(),
    ))
}

fn list_schema(entity: RefOr<Schema>) -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .property(
                "data",
                RefOr::T(Schema::Array(ArrayBuilder::new().items(entity).build())),
            )
            .required("data")
            .property("_meta_", RefOr::Ref(Ref::from_schema_name(PageLinks::name())))
            .build(),
    ))
}

fn query_integer(name: &str, description: &str) -> ParameterBuilder {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(integer_schema()))
}

fn id_parameter() -> ParameterBuilder {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(string_schema()))
}

fn json_body(schema: RefOr<Schema>) -> RequestBody {
    RequestBodyBuilder::new()
        .content(JSON, ContentBuilder::new().schema(Some(schema)).build())
        .required(Some(Required::True))
        .build()
}

fn json_response(description: &str, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(JSON, ContentBuilder::new().schema(Some(schema)).build())
        .build()
}

fn plain_response(description: &str) -> Response {
    ResponseBuilder::new().description(description).build()
}

fn options_operation(operation_id: &str) -> Operation {
    OperationBuilder::new()
        .operation_id(Some(operation_id))
        .summary(Some("Supported methods"))
        .response("200", plain_response("Methods listed in the Allow header"))
        .build()
}
