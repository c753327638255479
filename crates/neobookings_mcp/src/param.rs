//! Declarative tool parameters.
//!
//! A [`Param`] describes one argument: its JSON shape, its constraints and
//! the upstream key it is sent under. The same description produces the
//! advertised input schema and drives validation and wire conversion, so
//! the two cannot drift apart.

use neobookings_core::validate::{json_type, parse_date, parse_date_or_datetime, parse_datetime};
use neobookings_core::{GatewayError, Result};
use serde_json::{Map, Value, json};

use crate::wire::{insert_path, pascal_case, pascalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    String,
    Integer,
    Number,
    Boolean,
}

impl Scalar {
    fn type_name(self) -> &'static str {
        match self {
            Scalar::String => "string",
            Scalar::Integer => "integer",
            Scalar::Number => "number",
            Scalar::Boolean => "boolean",
        }
    }
}

/// Textual formats checked on top of the JSON type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DDTHH:MM:SS`
    DateTime,
    DateOrDateTime,
    /// ISO 3166 alpha-2, upper case
    Country,
    /// ISO 4217, upper case
    Currency,
    Email,
}

impl Format {
    fn pattern(self) -> Option<&'static str> {
        match self {
            Format::Date => Some(r"^\d{4}-\d{2}-\d{2}$"),
            Format::DateTime => Some(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$"),
            Format::DateOrDateTime => Some(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}:\d{2})?$"),
            Format::Country => Some("^[A-Z]{2}$"),
            Format::Currency => Some("^[A-Z]{3}$"),
            Format::Email => None,
        }
    }

    fn check(self, path: &str, value: &str) -> Result<()> {
        let upper_letters = |len: usize| value.len() == len && value.chars().all(|c| c.is_ascii_uppercase());
        match self {
            Format::Date => parse_date(path, value).map(|_| ()),
            Format::DateTime => parse_datetime(path, value).map(|_| ()),
            Format::DateOrDateTime => parse_date_or_datetime(path, value).map(|_| ()),
            Format::Country if !upper_letters(2) => Err(invalid_value(
                path,
                format!("Country code must be 2 uppercase letters: {}", value),
            )),
            Format::Currency if !upper_letters(3) => Err(invalid_value(
                path,
                format!("Currency must be a 3-letter ISO code: {}", value),
            )),
            Format::Email if !looks_like_email(value) => {
                Err(invalid_value(path, format!("Invalid email address: {}", value)))
            }
            _ => Ok(()),
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Value sent upstream when the caller leaves an argument out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    Bool(bool),
    Int(i64),
    Str(&'static str),
}

impl Fallback {
    pub fn to_value(self) -> Value {
        match self {
            Fallback::Bool(value) => Value::Bool(value),
            Fallback::Int(value) => json!(value),
            Fallback::Str(value) => Value::String(value.to_string()),
        }
    }
}

/// Element of a list of scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub scalar: Scalar,
    pub description: &'static str,
    pub choices: &'static [&'static str],
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub format: Option<Format>,
}

impl Item {
    const fn of(scalar: Scalar, description: &'static str) -> Self {
        Self {
            scalar,
            description,
            choices: &[],
            min_length: None,
            max_length: None,
            format: None,
        }
    }

    pub const fn string(description: &'static str) -> Self {
        Self::of(Scalar::String, description)
    }

    pub const fn integer(description: &'static str) -> Self {
        Self::of(Scalar::Integer, description)
    }

    pub const fn number(description: &'static str) -> Self {
        Self::of(Scalar::Number, description)
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    pub const fn min_len(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub const fn max_len(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.scalar.type_name()));
        if !self.description.is_empty() {
            schema.insert("description".into(), json!(self.description));
        }
        string_constraints(&mut schema, self.choices, self.min_length, self.max_length, self.format);
        Value::Object(schema)
    }

    fn convert(&self, path: &str, value: &Value) -> Result<Value> {
        let value = check_scalar(self.scalar, path, value)?;
        if let Value::String(text) = &value {
            check_string(path, text, self.choices, self.min_length, self.max_length, self.format)?;
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Scalar(Scalar),
    /// Array of scalars
    List(Item),
    /// Closed object with known fields
    Object(&'static [Param]),
    /// Array of closed objects
    Records(&'static [Param]),
    /// Free-form object, keys converted to PascalCase
    Map,
}

/// One tool argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: Kind,
    pub required: bool,
    /// Upstream key, possibly a dotted path. Defaults to the PascalCase name.
    pub wire: Option<&'static str>,
    pub choices: &'static [&'static str],
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub format: Option<Format>,
    pub default: Option<Fallback>,
}

impl Param {
    const fn of(name: &'static str, description: &'static str, kind: Kind) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            wire: None,
            choices: &[],
            minimum: None,
            maximum: None,
            min_items: None,
            max_items: None,
            min_length: None,
            max_length: None,
            format: None,
            default: None,
        }
    }

    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::of(name, description, Kind::Scalar(Scalar::String))
    }

    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self::of(name, description, Kind::Scalar(Scalar::Integer))
    }

    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self::of(name, description, Kind::Scalar(Scalar::Number))
    }

    pub const fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::of(name, description, Kind::Scalar(Scalar::Boolean))
    }

    pub const fn list(name: &'static str, description: &'static str, item: Item) -> Self {
        Self::of(name, description, Kind::List(item))
    }

    pub const fn object(name: &'static str, description: &'static str, fields: &'static [Param]) -> Self {
        Self::of(name, description, Kind::Object(fields))
    }

    pub const fn records(name: &'static str, description: &'static str, fields: &'static [Param]) -> Self {
        Self::of(name, description, Kind::Records(fields))
    }

    pub const fn map(name: &'static str, description: &'static str) -> Self {
        Self::of(name, description, Kind::Map)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn wire(mut self, key: &'static str) -> Self {
        self.wire = Some(key);
        self
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    pub const fn min(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    pub const fn max(mut self, max: f64) -> Self {
        self.maximum = Some(max);
        self
    }

    pub const fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    pub const fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub const fn min_len(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub const fn max_len(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub const fn default_bool(mut self, value: bool) -> Self {
        self.default = Some(Fallback::Bool(value));
        self
    }

    pub const fn default_int(mut self, value: i64) -> Self {
        self.default = Some(Fallback::Int(value));
        self
    }

    pub const fn default_str(mut self, value: &'static str) -> Self {
        self.default = Some(Fallback::Str(value));
        self
    }

    /// The upstream key this argument is written to.
    pub fn wire_key(&self) -> String {
        match self.wire {
            Some(key) => key.to_string(),
            None => pascal_case(self.name),
        }
    }

    /// JSON Schema fragment for this argument.
    pub fn schema(&self) -> Value {
        let mut schema = Map::new();
        match self.kind {
            Kind::Scalar(scalar) => {
                schema.insert("type".into(), json!(scalar.type_name()));
            }
            Kind::List(item) => {
                schema.insert("type".into(), json!("array"));
                schema.insert("items".into(), item.schema());
            }
            Kind::Object(fields) => {
                schema = object_schema(fields);
            }
            Kind::Records(fields) => {
                schema.insert("type".into(), json!("array"));
                schema.insert("items".into(), Value::Object(object_schema(fields)));
            }
            Kind::Map => {
                schema.insert("type".into(), json!("object"));
                schema.insert("additionalProperties".into(), json!(true));
            }
        }

        if !self.description.is_empty() {
            schema.insert("description".into(), json!(self.description));
        }
        string_constraints(&mut schema, self.choices, self.min_length, self.max_length, self.format);
        if let Some(min) = self.minimum {
            schema.insert("minimum".into(), number_value(min));
        }
        if let Some(max) = self.maximum {
            schema.insert("maximum".into(), number_value(max));
        }
        if let Some(min) = self.min_items {
            schema.insert("minItems".into(), json!(min));
        }
        if let Some(max) = self.max_items {
            schema.insert("maxItems".into(), json!(max));
        }
        if let Some(default) = self.default {
            schema.insert("default".into(), default.to_value());
        }
        Value::Object(schema)
    }

    /// Validate one supplied value and convert it to its wire form.
    pub fn convert(&self, path: &str, value: &Value) -> Result<Value> {
        match self.kind {
            Kind::Scalar(scalar) => {
                let value = check_scalar(scalar, path, value)?;
                match &value {
                    Value::String(text) => check_string(
                        path,
                        text,
                        self.choices,
                        self.min_length,
                        self.max_length,
                        self.format,
                    )?,
                    Value::Number(number) => self.check_range(path, number.as_f64().unwrap_or_default())?,
                    _ => {}
                }
                Ok(value)
            }
            Kind::List(item) => {
                let items = self.check_array(path, value)?;
                items
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| item.convert(&format!("{}[{}]", path, index), entry))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
            Kind::Object(fields) => convert_fields(fields, path, value).map(Value::Object),
            Kind::Records(fields) => {
                let items = self.check_array(path, value)?;
                items
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| {
                        convert_fields(fields, &format!("{}[{}]", path, index), entry).map(Value::Object)
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
            Kind::Map => match value {
                Value::Object(_) => Ok(pascalize(trim_strings(value.clone()))),
                other => Err(type_error(path, "object", other)),
            },
        }
    }

    fn check_range(&self, path: &str, number: f64) -> Result<()> {
        if let Some(min) = self.minimum.filter(|min| number < *min) {
            return Err(out_of_range(path, format!("{} must be at least {}", path, number_value(min))));
        }
        if let Some(max) = self.maximum.filter(|max| number > *max) {
            return Err(out_of_range(path, format!("{} must be at most {}", path, number_value(max))));
        }
        Ok(())
    }

    fn check_array<'v>(&self, path: &str, value: &'v Value) -> Result<&'v Vec<Value>> {
        let Value::Array(items) = value else {
            return Err(type_error(path, "array", value));
        };
        if let Some(min) = self.min_items.filter(|min| items.len() < *min) {
            return Err(GatewayError::validation_with(
                format!("{}: at least {} item(s) required", path, min),
                "INVALID_LENGTH",
                json!({ "field": path, "min_items": min, "actual": items.len() }),
            ));
        }
        if let Some(max) = self.max_items.filter(|max| items.len() > *max) {
            return Err(GatewayError::validation_with(
                format!("{}: maximum {} items allowed", path, max),
                "INVALID_LENGTH",
                json!({ "field": path, "max_items": max, "actual": items.len() }),
            ));
        }
        Ok(items)
    }
}

/// Schema of a closed object made of `fields`.
pub fn object_schema(fields: &[Param]) -> Map<String, Value> {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|field| (field.name.to_string(), field.schema()))
        .collect();
    let required: Vec<&str> = fields
        .iter()
        .filter(|field| field.required)
        .map(|field| field.name)
        .collect();

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    schema.insert("additionalProperties".into(), json!(false));
    schema
}

/// Validate `arguments` against `fields` and build the wire object.
///
/// Checks run in order: missing required fields (all reported together),
/// unknown fields, then each supplied field. Omitted fields with a default
/// are written with that default.
pub fn convert_fields(fields: &[Param], path: &str, value: &Value) -> Result<Map<String, Value>> {
    let Value::Object(arguments) = value else {
        return Err(type_error(path, "object", value));
    };
    build(fields, path, arguments, &[])
}

/// Like [`convert_fields`], for the top level of a tool call. Keys listed
/// in `reserved` are accepted but left out of the wire object.
pub fn build(
    fields: &[Param],
    path: &str,
    arguments: &Map<String, Value>,
    reserved: &[&str],
) -> Result<Map<String, Value>> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|field| field.required && arguments.get(field.name).is_none_or(Value::is_null))
        .map(|field| join(path, field.name))
        .collect();
    if !missing.is_empty() {
        return Err(GatewayError::missing_fields(missing));
    }

    if let Some(unknown) = arguments
        .keys()
        .find(|key| !reserved.contains(&key.as_str()) && !fields.iter().any(|field| field.name == key.as_str()))
    {
        let allowed: Vec<&str> = fields.iter().map(|field| field.name).collect();
        return Err(GatewayError::validation_with(
            format!("Unknown argument '{}'", join(path, unknown)),
            "UNKNOWN_ARGUMENT",
            json!({ "argument": join(path, unknown), "allowed": allowed }),
        ));
    }

    let mut wire = Map::new();
    for field in fields {
        let converted = match arguments.get(field.name) {
            Some(value) if !value.is_null() => Some(field.convert(&join(path, field.name), value)?),
            _ => field.default.map(Fallback::to_value),
        };
        if let Some(converted) = converted {
            insert_path(&mut wire, &field.wire_key(), converted);
        }
    }
    Ok(wire)
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

fn check_scalar(scalar: Scalar, path: &str, value: &Value) -> Result<Value> {
    match (scalar, value) {
        (Scalar::String, Value::String(text)) => Ok(Value::String(text.trim().to_string())),
        (Scalar::Integer, Value::Number(number)) if number.is_i64() || number.is_u64() => Ok(value.clone()),
        (Scalar::Number, Value::Number(_)) => Ok(value.clone()),
        (Scalar::Boolean, Value::Bool(_)) => Ok(value.clone()),
        _ => Err(type_error(path, scalar.type_name(), value)),
    }
}

fn check_string(
    path: &str,
    text: &str,
    choices: &[&str],
    min_length: Option<usize>,
    max_length: Option<usize>,
    format: Option<Format>,
) -> Result<()> {
    let length = text.chars().count();
    if let Some(min) = min_length.filter(|min| length < *min) {
        return Err(GatewayError::validation_with(
            format!("{} must be at least {} characters", path, min),
            "INVALID_LENGTH",
            json!({ "field": path, "min_length": min }),
        ));
    }
    if let Some(max) = max_length.filter(|max| length > *max) {
        return Err(GatewayError::validation_with(
            format!("{} exceeds maximum length of {} characters", path, max),
            "INVALID_LENGTH",
            json!({ "field": path, "max_length": max }),
        ));
    }
    if !choices.is_empty() && !choices.contains(&text) {
        return Err(GatewayError::validation_with(
            format!("Invalid {}: '{}'. Must be one of: {}", path, text, choices.join(", ")),
            "INVALID_VALUE",
            json!({ "field": path, "value": text, "allowed": choices }),
        ));
    }
    match format {
        Some(format) => format.check(path, text),
        None => Ok(()),
    }
}

fn string_constraints(
    schema: &mut Map<String, Value>,
    choices: &[&str],
    min_length: Option<usize>,
    max_length: Option<usize>,
    format: Option<Format>,
) {
    if !choices.is_empty() {
        schema.insert("enum".into(), json!(choices));
    }
    if let Some(min) = min_length {
        schema.insert("minLength".into(), json!(min));
    }
    if let Some(max) = max_length {
        schema.insert("maxLength".into(), json!(max));
    }
    if let Some(format) = format {
        if let Some(pattern) = format.pattern() {
            schema.insert("pattern".into(), json!(pattern));
        }
        if format == Format::Email {
            schema.insert("format".into(), json!("email"));
        }
    }
}

fn trim_strings(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(text.trim().to_string()),
        Value::Array(items) => Value::Array(items.into_iter().map(trim_strings).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, trim_strings(v))).collect()),
        other => other,
    }
}

/// Whole numbers print without a fractional part.
fn number_value(number: f64) -> Value {
    if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        json!(number as i64)
    } else {
        json!(number)
    }
}

fn type_error(path: &str, expected: &str, actual: &Value) -> GatewayError {
    GatewayError::validation_with(
        format!("{} must be of type {}, got {}", path, expected, json_type(actual)),
        "INVALID_TYPE",
        json!({ "field": path, "expected": expected, "actual": json_type(actual) }),
    )
}

fn invalid_value(path: &str, message: String) -> GatewayError {
    GatewayError::validation_with(message, "INVALID_VALUE", json!({ "field": path }))
}

fn out_of_range(path: &str, message: String) -> GatewayError {
    GatewayError::validation_with(message, "OUT_OF_RANGE", json!({ "field": path }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use neobookings_core::ErrorKind;
    use pretty_assertions::assert_eq;

    const GUEST: &[Param] = &[
        Param::integer("age", "Guest age").required().min(0.0).max(99.0),
        Param::integer("amount", "Number of guests of this age").required().min(1.0),
    ];

    const FIELDS: &[Param] = &[
        Param::string("basket_id", "Basket identifier").required().max_len(12),
        Param::list("hotel_ids", "Hotel IDs", Item::string("Hotel ID").min_len(1))
            .max_items(2)
            .wire("HotelId"),
        Param::string("date_from", "Start date").format(Format::Date),
        Param::string("order_type", "Sort direction")
            .choices(&["asc", "desc"])
            .default_str("asc"),
        Param::number("amount", "Amount").wire("Payment.Quantity").min(0.0),
        Param::records("guests", "Guests", GUEST).wire("Guest"),
        Param::map("pricing_data", "Pricing"),
    ];

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn builds_wire_body_with_defaults_and_paths() {
        let body = build(
            FIELDS,
            "",
            &args(json!({
                "basket_id": "  B-1 ",
                "hotel_ids": ["H1"],
                "amount": 10.5,
                "guests": [{"age": 30, "amount": 2}],
                "pricing_data": {"base_price": 90, "extra_adults_price": [20]},
                "language": "en"
            })),
            &["language"],
        )
        .unwrap();

        assert_eq!(
            Value::Object(body),
            json!({
                "BasketId": "B-1",
                "HotelId": ["H1"],
                "OrderType": "asc",
                "Payment": {"Quantity": 10.5},
                "Guest": [{"Age": 30, "Amount": 2}],
                "PricingData": {"BasePrice": 90, "ExtraAdultsPrice": [20]}
            })
        );
    }

    #[test]
    fn reports_all_missing_fields_with_paths() {
        let error = build(FIELDS, "", &args(json!({"guests": [{}]})), &[]).unwrap_err();
        assert_eq!(error.details().unwrap()["missing_fields"], json!(["basket_id"]));

        let nested = build(FIELDS, "", &args(json!({"basket_id": "B", "guests": [{"age": 3}]})), &[])
            .unwrap_err();
        assert_eq!(nested.details().unwrap()["missing_fields"], json!(["guests[0].amount"]));
    }

    #[test]
    fn rejects_unknown_arguments() {
        let error = build(FIELDS, "", &args(json!({"basket_id": "B", "bogus": 1})), &[]).unwrap_err();
        assert_eq!(error.error_code(), Some("UNKNOWN_ARGUMENT"));
        assert_eq!(error.message(), "Unknown argument 'bogus'");
    }

    #[test]
    fn enforces_constraints() {
        let cases = [
            (json!({"basket_id": "B", "order_type": "up"}), "INVALID_VALUE"),
            (json!({"basket_id": "B", "hotel_ids": ["a", "b", "c"]}), "INVALID_LENGTH"),
            (json!({"basket_id": "B", "hotel_ids": [""]}), "INVALID_LENGTH"),
            (json!({"basket_id": "B", "date_from": "01/02/2025"}), "INVALID_DATE"),
            (json!({"basket_id": "B", "amount": -1}), "OUT_OF_RANGE"),
            (json!({"basket_id": "B", "guests": [{"age": "3", "amount": 1}]}), "INVALID_TYPE"),
            (json!({"basket_id": "B".repeat(13)}), "INVALID_LENGTH"),
        ];
        for (arguments, code) in cases {
            let error = build(FIELDS, "", &args(arguments.clone()), &[]).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Validation);
            assert_eq!(error.error_code(), Some(code), "{}", arguments);
        }
    }

    #[test]
    fn schema_is_closed_and_lists_required_fields() {
        let schema = Value::Object(object_schema(FIELDS));
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"], json!(["basket_id"]));
        assert_eq!(schema["properties"]["order_type"]["default"], "asc");
        assert_eq!(schema["properties"]["amount"]["minimum"], 0);
        assert_eq!(schema["properties"]["guests"]["items"]["required"], json!(["age", "amount"]));
        assert_eq!(schema["properties"]["date_from"]["pattern"], r"^\d{4}-\d{2}-\d{2}$");
    }

    #[test]
    fn formats() {
        assert!(Format::Country.check("country", "ES").is_ok());
        assert!(Format::Country.check("country", "es").is_err());
        assert!(Format::Currency.check("currency", "EUR").is_ok());
        assert!(Format::Email.check("email", "guest@example.com").is_ok());
        assert!(Format::Email.check("email", "guest@localhost").is_err());
    }
}
