//! OpenAPI document endpoint: `GET /openapi.json`.

use axum::{Json, extract::State};
use petstore_persistence::StorageAdapter;

use crate::error::RestError;
use crate::state::AppState;

/// Handler serving the OpenAPI 3.0 description of the API.
pub async fn openapi_handler<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<serde_json::Value>, RestError>
where
    S: StorageAdapter + 'static,
{
    Ok(Json(openapi_document(state.base_url())))
}

/// Builds the OpenAPI document with the given server base URL.
pub fn openapi_document(base_url: &str) -> serde_json::Value {
    serde_json::json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Pet Store API",
            "description": "CRUD and list operations over the Pet resource, with hypermedia links.",
            "version": env!("CARGO_PKG_VERSION")
        },
        "servers": [{ "url": base_url }],
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "summary": "List pets",
                    "parameters": [
                        {
                            "name": "offset",
                            "in": "query",
                            "schema": { "type": "integer", "minimum": 0, "default": 0 }
                        },
                        {
                            "name": "limit",
                            "in": "query",
                            "schema": { "type": "integer", "minimum": 0, "default": 20 }
                        },
                        {
                            "name": "filters[name]",
                            "in": "query",
                            "description": "Exact-match filter on name",
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "filters[tag]",
                            "in": "query",
                            "description": "Exact-match filter on tag",
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "sort[name]",
                            "in": "query",
                            "schema": { "type": "string", "enum": ["asc", "desc"] }
                        },
                        {
                            "name": "sort[tag]",
                            "in": "query",
                            "schema": { "type": "string", "enum": ["asc", "desc"] }
                        },
                        {
                            "name": "sort[createdAt]",
                            "in": "query",
                            "schema": { "type": "string", "enum": ["asc", "desc"] }
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "The resolved page",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/PetList" }
                                }
                            }
                        },
                        "400": { "$ref": "#/components/responses/BadRequest" }
                    }
                },
                "post": {
                    "operationId": "createPet",
                    "summary": "Create a pet",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/PetInput" }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "Created",
                            "headers": {
                                "Location": {
                                    "description": "URL of the new pet",
                                    "schema": { "type": "string" }
                                }
                            },
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Pet" }
                                }
                            }
                        },
                        "400": { "$ref": "#/components/responses/BadRequest" }
                    }
                }
            },
            "/pets/{id}": {
                "parameters": [
                    {
                        "name": "id",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string" }
                    }
                ],
                "get": {
                    "operationId": "readPet",
                    "summary": "Read a pet",
                    "responses": {
                        "200": {
                            "description": "The pet",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Pet" }
                                }
                            }
                        },
                        "404": { "$ref": "#/components/responses/NotFound" }
                    }
                },
                "put": {
                    "operationId": "updatePet",
                    "summary": "Replace a pet",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/PetInput" }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "The updated pet",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Pet" }
                                }
                            }
                        },
                        "400": { "$ref": "#/components/responses/BadRequest" },
                        "404": { "$ref": "#/components/responses/NotFound" }
                    }
                },
                "delete": {
                    "operationId": "deletePet",
                    "summary": "Delete a pet",
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": { "$ref": "#/components/responses/NotFound" }
                    }
                }
            },
            "/health": {
                "get": {
                    "operationId": "health",
                    "summary": "Health check",
                    "responses": {
                        "200": { "description": "Server is healthy" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Vaccination": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string" }
                    }
                },
                "Link": {
                    "type": "object",
                    "required": ["href", "method"],
                    "properties": {
                        "href": { "type": "string" },
                        "method": {
                            "type": "string",
                            "enum": ["GET", "POST", "PUT", "DELETE"]
                        }
                    }
                },
                "Links": {
                    "type": "object",
                    "additionalProperties": { "$ref": "#/components/schemas/Link" }
                },
                "PetInput": {
                    "type": "object",
                    "required": ["name"],
                    "additionalProperties": false,
                    "properties": {
                        "name": { "type": "string", "minLength": 1 },
                        "tag": { "type": "string" },
                        "vaccinations": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/Vaccination" }
                        }
                    }
                },
                "Pet": {
                    "type": "object",
                    "required": ["id", "name", "createdAt"],
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "tag": { "type": "string" },
                        "vaccinations": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/Vaccination" }
                        },
                        "createdAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" },
                        "_links": { "$ref": "#/components/schemas/Links" }
                    }
                },
                "PetList": {
                    "type": "object",
                    "required": ["offset", "limit", "filters", "sort", "count", "items"],
                    "properties": {
                        "offset": { "type": "integer" },
                        "limit": { "type": "integer" },
                        "filters": {
                            "type": "object",
                            "additionalProperties": { "type": "string" }
                        },
                        "sort": {
                            "type": "object",
                            "additionalProperties": {
                                "type": "string",
                                "enum": ["asc", "desc"]
                            }
                        },
                        "count": { "type": "integer" },
                        "items": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/Pet" }
                        },
                        "_links": { "$ref": "#/components/schemas/Links" }
                    }
                },
                "Error": {
                    "type": "object",
                    "required": ["error"],
                    "properties": {
                        "error": {
                            "type": "object",
                            "required": ["code", "message"],
                            "properties": {
                                "code": { "type": "string" },
                                "message": { "type": "string" },
                                "fields": {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "field": { "type": "string" },
                                            "message": { "type": "string" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "responses": {
                "BadRequest": {
                    "description": "Validation failure",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/Error" }
                        }
                    }
                },
                "NotFound": {
                    "description": "No pet with that id",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/Error" }
                        }
                    }
                }
            }
        }
    })
}
