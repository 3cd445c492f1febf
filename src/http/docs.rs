use serde_json::{json, Value};

use crate::domain::params::PREDICTION_PARAMS;

/// Swagger 2.0 description of the public API, derived from the parameter table.
pub fn swagger_document() -> Value {
    let parameters: Vec<Value> = PREDICTION_PARAMS
        .iter()
        .map(|spec| {
            json!({
                "name": spec.name,
                "in": "query",
                "type": spec.kind.swagger_type(),
                "required": spec.required,
                "description": spec.help,
            })
        })
        .collect();

    json!({
        "swagger": "2.0",
        "basePath": "/",
        "info": {
            "title": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        },
        "consumes": ["application/json", "application/x-www-form-urlencoded"],
        "produces": ["application/json"],
        "paths": {
            "/predict": {
                "post": {
                    "operationId": "post_prediction_resource",
                    "parameters": parameters,
                    "responses": {
                        "200": {
                            "description": "Success",
                            "schema": {
                                "type": "object",
                                "properties": {
                                    "prediction": { "type": "integer" },
                                    "prediction_probability": { "type": "number" }
                                }
                            }
                        },
                        "400": {
                            "description": "Input payload validation failed"
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::swagger_document;

    #[test]
    fn lists_every_prediction_parameter() {
        let document = swagger_document();
        let parameters = document["paths"]["/predict"]["post"]["parameters"]
            .as_array()
            .expect("parameters array");

        let names: Vec<&str> = parameters
            .iter()
            .filter_map(|parameter| parameter["name"].as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "ticket_class",
                "sex",
                "age",
                "num_of_siblings_and_spouses",
                "num_of_parents_and_children",
                "fare",
                "port_of_embarkation",
            ]
        );
        assert!(parameters
            .iter()
            .all(|parameter| parameter["required"] == true));
        assert_eq!(parameters[5]["type"], "number");
        assert_eq!(parameters[0]["type"], "integer");
        assert_eq!(parameters[1]["description"], "Sex: 0 = Man, 1 = Woman");
    }
}
