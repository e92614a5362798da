//! OpenAPI description served at `/swagger.json`

use serde_json::{json, Value};

use crate::VERSION;

/// OpenAPI 3 document describing the post routes
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Masterblog API",
            "version": VERSION,
            "description": "Create, read, update, delete and search blog posts."
        },
        "servers": [{ "url": "/api/v1" }],
        "security": [{ "ApiKeyHeader": [] }, { "ApiKeyQuery": [] }],
        "paths": {
            "/posts": { "get": list_operation(), "post": create_operation() },
            "/posts/search": { "get": search_operation() },
            "/posts/{id}": {
                "get": get_operation(),
                "put": update_operation(),
                "delete": delete_operation()
            }
        },
        "components": {
            "securitySchemes": {
                "ApiKeyHeader": { "type": "apiKey", "in": "header", "name": "X-API-Key" },
                "ApiKeyQuery": { "type": "apiKey", "in": "query", "name": "api_key" }
            },
            "schemas": schemas()
        }
    })
}

// =============================================================================
// Operations
// =============================================================================

fn list_operation() -> Value {
    let params = vec![
        integer_query("page", 1),
        integer_query("per_page", 5),
        enum_query("sort", &["title", "content", "author", "date"]),
        enum_query("direction", &["asc", "desc"]),
    ];
    json!({
        "summary": "List posts, paginated and optionally sorted",
        "parameters": params,
        "responses": {
            "200": json_response("One page of posts", schema_ref("PostPage")),
            "400": error_response("Invalid query parameters"),
            "401": error_response("Missing or invalid API key"),
            "429": error_response("Rate limit exceeded")
        }
    })
}

fn create_operation() -> Value {
    json!({
        "summary": "Create a post",
        "requestBody": json_body("PostInput"),
        "responses": {
            "201": json_response("Created post", schema_ref("Post")),
            "400": error_response("Invalid body"),
            "401": error_response("Missing or invalid API key"),
            "429": error_response("Rate limit exceeded")
        }
    })
}

fn search_operation() -> Value {
    let params = vec![
        string_query("query", "Matches title, content, author or date"),
        string_query("title", "Matches title only"),
        string_query("content", "Matches content only"),
        string_query("author", "Matches author only"),
        string_query("date", "Matches date only"),
    ];
    json!({
        "summary": "Case-insensitive substring search",
        "parameters": params,
        "responses": {
            "200": json_response("Matching posts", json!({ "type": "array", "items": schema_ref("Post") })),
            "401": error_response("Missing or invalid API key"),
            "429": error_response("Rate limit exceeded")
        }
    })
}

fn get_operation() -> Value {
    json!({
        "summary": "Fetch a post",
        "parameters": [id_param()],
        "responses": {
            "200": json_response("The post", schema_ref("Post")),
            "404": error_response("No such post")
        }
    })
}

fn update_operation() -> Value {
    json!({
        "summary": "Update some or all fields of a post",
        "parameters": [id_param()],
        "requestBody": json_body("PostPatch"),
        "responses": {
            "200": json_response("Updated post", schema_ref("Post")),
            "400": error_response("Invalid body"),
            "404": error_response("No such post")
        }
    })
}

fn delete_operation() -> Value {
    let confirmation = json!({
        "type": "object",
        "properties": { "message": { "type": "string" } }
    });
    json!({
        "summary": "Delete a post",
        "parameters": [id_param()],
        "responses": {
            "200": json_response("Deletion confirmation", confirmation),
            "404": error_response("No such post")
        }
    })
}

// =============================================================================
// Schemas
// =============================================================================

fn schemas() -> Value {
    let string = json!({ "type": "string" });
    let date = json!({ "type": "string", "example": "2025-02-18" });
    let integer = json!({ "type": "integer" });

    json!({
        "Post": {
            "type": "object",
            "required": ["id", "title", "content", "author", "date"],
            "properties": {
                "id": integer, "title": string, "content": string,
                "author": string, "date": date
            }
        },
        "PostInput": {
            "type": "object",
            "required": ["title", "content", "author", "date"],
            "properties": { "title": string, "content": string, "author": string, "date": date }
        },
        "PostPatch": {
            "type": "object",
            "properties": { "title": string, "content": string, "author": string, "date": date }
        },
        "PostPage": {
            "type": "object",
            "properties": {
                "page": integer, "per_page": integer, "total_posts": integer,
                "total_pages": integer, "posts": { "type": "array", "items": schema_ref("Post") }
            }
        },
        "Error": {
            "type": "object",
            "properties": { "error": {}, "message": string }
        }
    })
}

// =============================================================================
// Helpers
// =============================================================================

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn error_response(description: &str) -> Value {
    json_response(description, schema_ref("Error"))
}

fn json_body(schema: &str) -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": schema_ref(schema) } }
    })
}

fn id_param() -> Value {
    json!({
        "name": "id", "in": "path", "required": true,
        "schema": { "type": "integer", "minimum": 1 }
    })
}

fn integer_query(name: &str, default: u64) -> Value {
    json!({
        "name": name, "in": "query", "required": false,
        "schema": { "type": "integer", "minimum": 1, "default": default }
    })
}

fn enum_query(name: &str, values: &[&str]) -> Value {
    json!({
        "name": name, "in": "query", "required": false,
        "schema": { "type": "string", "enum": values }
    })
}

fn string_query(name: &str, description: &str) -> Value {
    json!({
        "name": name, "in": "query", "required": false,
        "description": description,
        "schema": { "type": "string" }
    })
}
