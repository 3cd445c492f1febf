//! Extraction and coercion of prediction parameters
//!
//! Parameters may arrive in a JSON object body, the query string or a
//! form-encoded body. For each parameter the first source carrying it wins,
//! in that order.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::params::{
    FieldKind, ParamSpec, AGE, FARE, NUM_OF_PARENTS_AND_CHILDREN, NUM_OF_SIBLINGS_AND_SPOUSES,
    PORT_OF_EMBARKATION, SEX, TICKET_CLASS,
};

const MISSING_LOCATIONS: &str = "the JSON body or the post body or the query string";

/// Passenger attributes accepted by `POST /predict`.
///
/// Value domains such as `sex` in {0, 1} are documented in the parameter help
/// texts but intentionally not enforced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub ticket_class: i64,
    pub sex: i64,
    pub age: i64,
    pub num_of_siblings_and_spouses: i64,
    pub num_of_parents_and_children: i64,
    pub fare: f64,
    pub port_of_embarkation: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Integer(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Problem {
    Missing,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(skip)]
    pub field: &'static str,
    pub problem: Problem,
    pub expected: FieldKind,
    pub message: String,
}

impl FieldError {
    fn missing(spec: &ParamSpec) -> Self {
        Self {
            field: spec.name,
            problem: Problem::Missing,
            expected: spec.kind,
            message: format!(
                "{}: missing required parameter in {MISSING_LOCATIONS}",
                spec.help
            ),
        }
    }

    fn invalid(spec: &ParamSpec, got: impl fmt::Display) -> Self {
        let expected = match spec.kind {
            FieldKind::Integer => "an integer",
            FieldKind::Float => "a float",
        };
        Self {
            field: spec.name,
            problem: Problem::Invalid,
            expected: spec.kind,
            message: format!("{}: expected {expected}, got {got}", spec.help),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("input payload validation failed for: {}", field_names(.fields))]
pub struct ValidationError {
    fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }
}

fn field_names(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|field| field.field)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy)]
pub enum RawValue<'a> {
    Json(&'a Value),
    Text(&'a str),
}

#[derive(Debug, Default, Clone)]
pub struct ParamSources {
    json: Option<Map<String, Value>>,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl ParamSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, body: Map<String, Value>) -> Self {
        self.json = Some(body);
        self
    }

    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn with_form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.form = pairs;
        self
    }

    pub fn lookup(&self, name: &str) -> Option<RawValue<'_>> {
        if let Some(value) = self.json.as_ref().and_then(|body| body.get(name)) {
            return Some(RawValue::Json(value));
        }

        self.query
            .iter()
            .chain(self.form.iter())
            .find(|(key, _)| key == name)
            .map(|(_, value)| RawValue::Text(value.as_str()))
    }
}

pub fn coerce(spec: &ParamSpec, raw: RawValue<'_>) -> Result<ParamValue, FieldError> {
    match raw {
        RawValue::Text(text) => coerce_text(spec, text),
        RawValue::Json(Value::String(text)) => coerce_text(spec, text),
        RawValue::Json(Value::Number(number)) => match spec.kind {
            FieldKind::Integer => {
                if let Some(value) = number.as_i64() {
                    return Ok(ParamValue::Integer(value));
                }
                number
                    .as_f64()
                    .and_then(truncate_to_i64)
                    .map(ParamValue::Integer)
                    .ok_or_else(|| {
                        FieldError::invalid(spec, format!("out of range number {number}"))
                    })
            }
            FieldKind::Float => number
                .as_f64()
                .map(ParamValue::Float)
                .ok_or_else(|| FieldError::invalid(spec, format!("number {number}"))),
        },
        RawValue::Json(other) => Err(FieldError::invalid(spec, json_kind(other))),
    }
}

fn coerce_text(spec: &ParamSpec, text: &str) -> Result<ParamValue, FieldError> {
    let trimmed = text.trim();
    let parsed = match spec.kind {
        FieldKind::Integer => trimmed.parse::<i64>().ok().map(ParamValue::Integer),
        FieldKind::Float => trimmed.parse::<f64>().ok().map(ParamValue::Float),
    };
    parsed.ok_or_else(|| FieldError::invalid(spec, format!("{text:?}")))
}

// Fractional integers are truncated toward zero.
fn truncate_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct FieldCollector<'a> {
    sources: &'a ParamSources,
    errors: Vec<FieldError>,
}

impl<'a> FieldCollector<'a> {
    fn new(sources: &'a ParamSources) -> Self {
        Self {
            sources,
            errors: Vec::new(),
        }
    }

    fn value(&mut self, spec: &ParamSpec) -> Option<ParamValue> {
        let Some(raw) = self.sources.lookup(spec.name) else {
            if spec.required {
                self.errors.push(FieldError::missing(spec));
            }
            return None;
        };

        match coerce(spec, raw) {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.push(error);
                None
            }
        }
    }

    fn integer(&mut self, spec: &ParamSpec) -> i64 {
        match self.value(spec) {
            Some(ParamValue::Integer(value)) => value,
            _ => 0,
        }
    }

    fn float(&mut self, spec: &ParamSpec) -> f64 {
        match self.value(spec) {
            Some(ParamValue::Float(value)) => value,
            _ => 0.0,
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                fields: self.errors,
            })
        }
    }
}

impl PredictionRequest {
    /// Coerces every parameter, reporting all offending fields at once.
    pub fn from_sources(sources: &ParamSources) -> Result<Self, ValidationError> {
        let mut collector = FieldCollector::new(sources);
        let request = Self {
            ticket_class: collector.integer(&TICKET_CLASS),
            sex: collector.integer(&SEX),
            age: collector.integer(&AGE),
            num_of_siblings_and_spouses: collector.integer(&NUM_OF_SIBLINGS_AND_SPOUSES),
            num_of_parents_and_children: collector.integer(&NUM_OF_PARENTS_AND_CHILDREN),
            fare: collector.float(&FARE),
            port_of_embarkation: collector.integer(&PORT_OF_EMBARKATION),
        };
        collector.finish(request)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn json_sources(value: Value) -> ParamSources {
        let Value::Object(body) = value else {
            panic!("test body must be an object");
        };
        ParamSources::new().with_json(body)
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn complete_body() -> Value {
        json!({
            "ticket_class": 1,
            "sex": 0,
            "age": 29,
            "num_of_siblings_and_spouses": 0,
            "num_of_parents_and_children": 0,
            "fare": 211.5,
            "port_of_embarkation": 0
        })
    }

    #[test]
    fn parses_complete_json_body() {
        let request = PredictionRequest::from_sources(&json_sources(complete_body()))
            .expect("valid request");
        assert_eq!(
            request,
            PredictionRequest {
                ticket_class: 1,
                sex: 0,
                age: 29,
                num_of_siblings_and_spouses: 0,
                num_of_parents_and_children: 0,
                fare: 211.5,
                port_of_embarkation: 0,
            }
        );
    }

    #[test]
    fn parses_text_values_from_query() {
        let sources = ParamSources::new().with_query(pairs(&[
            ("ticket_class", "3"),
            ("sex", " 1 "),
            ("age", "+40"),
            ("num_of_siblings_and_spouses", "1"),
            ("num_of_parents_and_children", "2"),
            ("fare", "7.25"),
            ("port_of_embarkation", "2"),
        ]));
        let request = PredictionRequest::from_sources(&sources).expect("valid request");
        assert_eq!(request.sex, 1);
        assert_eq!(request.age, 40);
        assert_eq!(request.fare, 7.25);
    }

    #[test]
    fn json_takes_precedence_over_query_and_query_over_form() {
        let sources = json_sources(json!({ "age": 10 }))
            .with_query(pairs(&[("age", "20"), ("fare", "1.5")]))
            .with_form(pairs(&[("age", "30"), ("fare", "2.5"), ("sex", "1")]));

        assert!(matches!(
            sources.lookup("age"),
            Some(RawValue::Json(value)) if value == &json!(10)
        ));
        assert!(matches!(sources.lookup("fare"), Some(RawValue::Text("1.5"))));
        assert!(matches!(sources.lookup("sex"), Some(RawValue::Text("1"))));
        assert!(sources.lookup("ticket_class").is_none());
    }

    #[test]
    fn integer_fields_accept_whole_floats_by_truncation() {
        let value = coerce(&AGE, RawValue::Json(&json!(29.9))).expect("coercible");
        assert_eq!(value, ParamValue::Integer(29));

        let value = coerce(&AGE, RawValue::Json(&json!(-0.5))).expect("coercible");
        assert_eq!(value, ParamValue::Integer(0));
    }

    #[test]
    fn float_fields_accept_integers() {
        let value = coerce(&FARE, RawValue::Json(&json!(80))).expect("coercible");
        assert_eq!(value, ParamValue::Float(80.0));
    }

    #[test]
    fn rejects_non_numeric_text() {
        let error = coerce(&AGE, RawValue::Text("notanumber")).expect_err("not coercible");
        assert_eq!(error.field, "age");
        assert_eq!(error.problem, Problem::Invalid);
        assert_eq!(error.expected, FieldKind::Integer);
        assert!(error.message.contains("\"notanumber\""));
    }

    #[test]
    fn rejects_decimal_text_for_integer_fields() {
        let error = coerce(&TICKET_CLASS, RawValue::Text("1.5")).expect_err("not coercible");
        assert_eq!(error.problem, Problem::Invalid);
    }

    #[test]
    fn rejects_null_boolean_and_containers() {
        for value in [json!(null), json!(true), json!([1]), json!({ "v": 1 })] {
            let error = coerce(&FARE, RawValue::Json(&value)).expect_err("not coercible");
            assert_eq!(error.problem, Problem::Invalid);
            assert_eq!(error.expected, FieldKind::Float);
        }
    }

    #[test]
    fn rejects_out_of_range_integers() {
        let error =
            coerce(&AGE, RawValue::Json(&json!(u64::MAX))).expect_err("not representable");
        assert_eq!(error.problem, Problem::Invalid);
    }

    #[test]
    fn collects_every_offending_field() {
        let mut body = complete_body();
        let object = body.as_object_mut().expect("object body");
        object.remove("fare");
        object.insert("age".to_string(), json!("abc"));

        let error = PredictionRequest::from_sources(&json_sources(body))
            .expect_err("invalid request");
        let fields: Vec<_> = error.fields().iter().map(|field| field.field).collect();
        assert_eq!(fields, vec!["age", "fare"]);
        assert_eq!(error.fields()[1].problem, Problem::Missing);
        assert!(error.fields()[1]
            .message
            .starts_with("Fare: missing required parameter"));
        assert_eq!(
            error.to_string(),
            "input payload validation failed for: age, fare"
        );
    }

    #[test]
    fn empty_sources_report_all_fields_missing() {
        let error =
            PredictionRequest::from_sources(&ParamSources::new()).expect_err("invalid request");
        assert_eq!(error.fields().len(), 7);
        assert!(error
            .fields()
            .iter()
            .all(|field| field.problem == Problem::Missing));
    }
}
