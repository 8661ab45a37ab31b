//! Swagger 2.0 parser.
//!
//! Documents are first read into a `serde_json::Value` (YAML is converted with
//! mapping keys stringified, so `200:` and `"200":` are the same status code),
//! then deserialized into raw structs that mirror the document layout, and
//! finally converted into the [`Specification`] model.

use super::detection::{declared_version, detect_syntax, SourceSyntax};
use super::traits::{FormatConfidence, FormatDetection, ParseError, SpecParser};
use crate::model::{
    is_vendor_extension, BodySchema, Contact, ExternalDocs, HttpMethod, Info, License, Model,
    Operation, Parameter, ParameterLocation, Path, Property, Response, SecurityDefinition,
    Specification, Tag, VendorExtensions,
};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

const SUPPORTED_VERSION: &str = "2.0";
const DEFINITIONS_PREFIX: &str = "#/definitions/";
const PARAMETERS_PREFIX: &str = "#/parameters/";
const RESPONSES_PREFIX: &str = "#/responses/";

/// Parser for Swagger 2.0 documents in JSON or YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaggerParser;

impl SwaggerParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn read_value(content: &str) -> Result<Value, ParseError> {
        match detect_syntax(content) {
            SourceSyntax::Json => Ok(serde_json::from_str(content)?),
            SourceSyntax::Yaml => {
                let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
                yaml_to_json(yaml)
            }
        }
    }

    fn check_version(root: &Value) -> Result<(), ParseError> {
        let Some(object) = root.as_object() else {
            return Err(ParseError::InvalidStructure(
                "document root is not a mapping".to_string(),
            ));
        };
        match object.get("swagger") {
            Some(Value::String(v)) if v == SUPPORTED_VERSION => Ok(()),
            Some(Value::String(v)) => Err(ParseError::UnsupportedVersion(v.clone())),
            // Unquoted YAML `swagger: 2.0` arrives as a float.
            Some(Value::Number(n)) if matches!(n.to_string().as_str(), "2" | "2.0") => Ok(()),
            Some(other) => Err(ParseError::UnsupportedVersion(other.to_string())),
            None => match object.get("openapi") {
                Some(v) => Err(ParseError::UnsupportedVersion(format!(
                    "openapi {}",
                    v.as_str().unwrap_or_default()
                ))),
                None => Err(ParseError::MissingField("swagger".to_string())),
            },
        }
    }
}

impl SpecParser for SwaggerParser {
    fn parse_str(&self, content: &str) -> Result<Specification, ParseError> {
        let root = Self::read_value(content)?;
        Self::check_version(&root)?;
        let raw: RawSpec = serde_json::from_value(root)
            .map_err(|e| ParseError::InvalidStructure(e.to_string()))?;

        Ok(Converter::new(&raw).convert())
    }

    fn supported_versions(&self) -> Vec<&str> {
        vec![SUPPORTED_VERSION]
    }

    fn format_name(&self) -> &str {
        "Swagger"
    }

    fn detect(&self, content: &str) -> FormatDetection {
        let syntax = detect_syntax(content).to_string();
        if let Some(version) = declared_version(content, "swagger") {
            let detection = FormatDetection::with_confidence(FormatConfidence::CERTAIN)
                .variant(&syntax)
                .version(&version);
            if version == SUPPORTED_VERSION {
                return detection;
            }
            return FormatDetection {
                confidence: FormatConfidence::MEDIUM,
                ..detection.warning("only Swagger 2.0 documents can be compared")
            };
        }
        if let Some(version) = declared_version(content, "openapi") {
            return FormatDetection::with_confidence(FormatConfidence::MEDIUM)
                .variant(&syntax)
                .version(&version)
                .warning("OpenAPI 3 documents are not supported");
        }
        FormatDetection::default()
    }
}

// ============================================================================
// Conversion from raw document structs
// ============================================================================

struct Converter<'r> {
    raw: &'r RawSpec,
    spec: Specification,
}

impl<'r> Converter<'r> {
    fn new(raw: &'r RawSpec) -> Self {
        Self {
            raw,
            spec: Specification::new(),
        }
    }

    fn convert(mut self) -> Specification {
        let raw = self.raw;
        self.spec.info = raw.info.as_ref().map(convert_info);
        self.spec.host = raw.host.clone();
        self.spec.base_path = raw.base_path.clone();
        self.spec.vendor_extensions = extensions(&raw.extra);

        for (name, schema) in &raw.definitions {
            let model = convert_model(Model::new(self.spec.allocate_model_id()), schema);
            self.spec.definitions.insert(name.clone(), model);
        }

        self.spec.tags = raw.tags.iter().map(convert_tag).collect();
        self.spec.security_definitions = raw
            .security_definitions
            .iter()
            .map(|(name, def)| (name.clone(), convert_security(def)))
            .collect();

        for (url, raw_path) in &raw.paths {
            let path = self.convert_path(url, raw_path);
            self.spec.paths.insert(url.clone(), path);
        }

        self.spec
    }

    fn convert_path(&mut self, url: &str, raw_path: &'r RawPath) -> Path {
        let shared: Vec<Parameter> = raw_path
            .parameters
            .iter()
            .filter_map(|p| self.convert_parameter(url, p))
            .collect();

        let mut path = Path {
            operations: IndexMap::new(),
            vendor_extensions: extensions(&raw_path.extra),
        };

        for method in HttpMethod::ALL {
            let Some(raw_op) = raw_path.operation(method) else {
                continue;
            };
            let mut operation = self.convert_operation(url, raw_op);
            for param in &shared {
                let overridden = operation
                    .parameters
                    .iter()
                    .any(|p| p.name == param.name && p.location == param.location);
                if !overridden {
                    operation.parameters.push(param.clone());
                }
            }
            path.operations.insert(method, operation);
        }
        path
    }

    fn convert_operation(&mut self, url: &str, raw: &'r RawOperation) -> Operation {
        let parameters = raw
            .parameters
            .iter()
            .filter_map(|p| self.convert_parameter(url, p))
            .collect();
        let responses = raw.responses.as_ref().map(|responses| {
            responses
                .iter()
                .filter_map(|(code, r)| Some((code.clone(), self.convert_response(url, r)?)))
                .collect()
        });

        Operation {
            summary: raw.summary.clone(),
            description: raw.description.clone(),
            operation_id: raw.operation_id.clone(),
            tags: raw.tags.clone(),
            parameters,
            responses,
            deprecated: raw.deprecated,
            vendor_extensions: extensions(&raw.extra),
        }
    }

    fn convert_parameter(&mut self, url: &str, raw: &'r RawParameter) -> Option<Parameter> {
        let root: &'r RawSpec = self.raw;
        let raw = match raw.reference.as_deref() {
            Some(reference) => {
                let name = reference.strip_prefix(PARAMETERS_PREFIX).unwrap_or(reference);
                match root.parameters.get(name) {
                    Some(shared) => shared,
                    None => {
                        warn!(path = url, reference, "Unresolvable parameter reference, skipping");
                        return None;
                    }
                }
            }
            None => raw,
        };

        let location = match raw.location.as_deref().and_then(ParameterLocation::parse) {
            Some(location) => location,
            None => {
                warn!(
                    path = url,
                    parameter = raw.name.as_str(),
                    location = raw.location.as_deref().unwrap_or(""),
                    "Parameter has no valid location, skipping"
                );
                return None;
            }
        };

        let schema = raw.schema.as_ref().map(|schema| match &schema.reference {
            Some(reference) => BodySchema::Reference(ref_name(reference)),
            None => {
                let model = Model::new(self.spec.allocate_model_id());
                BodySchema::Inline(convert_model(model, schema))
            }
        });

        Some(Parameter {
            name: raw.name.clone(),
            location,
            required: raw.required,
            description: raw.description.clone(),
            param_type: raw.param_type.clone(),
            format: raw.format.clone(),
            schema,
            vendor_extensions: extensions(&raw.extra),
        })
    }

    fn convert_response(&self, url: &str, raw: &'r RawResponse) -> Option<Response> {
        let root: &'r RawSpec = self.raw;
        let raw = match raw.reference.as_deref() {
            Some(reference) => {
                let name = reference.strip_prefix(RESPONSES_PREFIX).unwrap_or(reference);
                match root.responses.get(name) {
                    Some(shared) => shared,
                    None => {
                        warn!(path = url, reference, "Unresolvable response reference, skipping");
                        return None;
                    }
                }
            }
            None => raw,
        };

        Some(Response {
            description: raw.description.clone(),
            schema: raw.schema.as_ref().map(|s| convert_property(s, false)),
            vendor_extensions: extensions(&raw.extra),
        })
    }
}

/// `#/definitions/Pet` becomes `Pet`; other references keep their last segment.
fn ref_name(reference: &str) -> String {
    match reference.strip_prefix(DEFINITIONS_PREFIX) {
        Some(name) => name.to_string(),
        None => reference
            .rsplit('/')
            .next()
            .unwrap_or(reference)
            .to_string(),
    }
}

fn extensions(extra: &IndexMap<String, Value>) -> VendorExtensions {
    extra
        .iter()
        .filter(|(key, _)| is_vendor_extension(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn convert_model(mut model: Model, schema: &RawSchema) -> Model {
    model.title = schema.title.clone();
    model.description = schema.description.clone();
    model.properties = convert_members(schema);
    model.vendor_extensions = extensions(&schema.extra);
    model
}

fn convert_members(schema: &RawSchema) -> IndexMap<String, Property> {
    schema
        .properties
        .iter()
        .map(|(name, member)| {
            let required = schema.required.iter().any(|r| r == name);
            (name.clone(), convert_property(member, required))
        })
        .collect()
}

fn convert_property(schema: &RawSchema, required: bool) -> Property {
    let extensions = extensions(&schema.extra);
    if let Some(reference) = &schema.reference {
        return Property {
            reference: Some(ref_name(reference)),
            required,
            vendor_extensions: extensions,
            ..Property::default()
        };
    }

    let property_type = schema
        .schema_type
        .clone()
        .or_else(|| (!schema.properties.is_empty()).then(|| "object".to_string()));

    Property {
        reference: None,
        property_type,
        format: schema.format.clone(),
        name: schema.xml_name(),
        title: schema.title.clone(),
        description: schema.description.clone(),
        example: schema.example.clone(),
        required,
        read_only: schema.read_only,
        access: schema.access.clone(),
        position: schema.position,
        allow_empty_value: schema.allow_empty_value,
        items: schema
            .items
            .as_deref()
            .map(|items| Box::new(convert_property(items, false))),
        properties: convert_members(schema),
        vendor_extensions: extensions,
    }
}

fn convert_info(raw: &RawInfo) -> Info {
    Info {
        title: raw.title.clone(),
        description: raw.description.clone(),
        version: raw.version.clone(),
        terms_of_service: raw.terms_of_service.clone(),
        contact: raw.contact.as_ref().map(|c| Contact {
            name: c.name.clone(),
            url: c.url.clone(),
            email: c.email.clone(),
        }),
        license: raw.license.as_ref().map(|l| License {
            name: l.name.clone(),
            url: l.url.clone(),
        }),
        vendor_extensions: extensions(&raw.extra),
    }
}

fn convert_tag(raw: &RawTag) -> Tag {
    Tag {
        name: raw.name.clone(),
        description: raw.description.clone(),
        external_docs: raw.external_docs.as_ref().map(|d| ExternalDocs {
            description: d.description.clone(),
            url: d.url.clone(),
        }),
        vendor_extensions: extensions(&raw.extra),
    }
}

fn convert_security(raw: &RawSecurityDefinition) -> SecurityDefinition {
    SecurityDefinition {
        scheme_type: raw.scheme_type.clone(),
        description: raw.description.clone(),
        name: raw.name.clone(),
        location: raw.location.clone(),
        flow: raw.flow.clone(),
        authorization_url: raw.authorization_url.clone(),
        token_url: raw.token_url.clone(),
        scopes: raw.scopes.clone(),
        vendor_extensions: extensions(&raw.extra),
    }
}

/// Convert a YAML tree to JSON, stringifying scalar mapping keys.
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, ParseError> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Null => "null".to_string(),
                    other => {
                        return Err(ParseError::InvalidStructure(format!(
                            "unsupported mapping key: {other:?}"
                        )))
                    }
                };
                object.insert(key, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

/// Accept `version: 1.0` as well as `version: "1.0"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

/// A schema-level `required` list; anything else (e.g. a stray boolean) is ignored.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    })
}

// ============================================================================
// Raw Swagger 2.0 document structures for deserialization
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpec {
    info: Option<RawInfo>,
    host: Option<String>,
    base_path: Option<String>,
    #[serde(default)]
    paths: IndexMap<String, RawPath>,
    #[serde(default)]
    definitions: IndexMap<String, RawSchema>,
    #[serde(default)]
    parameters: IndexMap<String, RawParameter>,
    #[serde(default)]
    responses: IndexMap<String, RawResponse>,
    #[serde(default)]
    security_definitions: IndexMap<String, RawSecurityDefinition>,
    #[serde(default)]
    tags: Vec<RawTag>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInfo {
    title: Option<String>,
    description: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    version: Option<String>,
    terms_of_service: Option<String>,
    contact: Option<RawContact>,
    license: Option<RawLicense>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawContact {
    name: Option<String>,
    url: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLicense {
    name: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTag {
    name: String,
    description: Option<String>,
    external_docs: Option<RawExternalDocs>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawExternalDocs {
    description: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSecurityDefinition {
    #[serde(rename = "type")]
    scheme_type: String,
    description: Option<String>,
    name: Option<String>,
    #[serde(rename = "in")]
    location: Option<String>,
    flow: Option<String>,
    authorization_url: Option<String>,
    token_url: Option<String>,
    #[serde(default)]
    scopes: IndexMap<String, String>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawPath {
    get: Option<RawOperation>,
    put: Option<RawOperation>,
    post: Option<RawOperation>,
    delete: Option<RawOperation>,
    options: Option<RawOperation>,
    head: Option<RawOperation>,
    patch: Option<RawOperation>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl RawPath {
    fn operation(&self, method: HttpMethod) -> Option<&RawOperation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOperation {
    summary: Option<String>,
    description: Option<String>,
    operation_id: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    responses: Option<IndexMap<String, RawResponse>>,
    #[serde(default)]
    deprecated: bool,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(rename = "in")]
    location: Option<String>,
    #[serde(default)]
    required: bool,
    description: Option<String>,
    #[serde(rename = "type")]
    param_type: Option<String>,
    format: Option<String>,
    schema: Option<RawSchema>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    description: Option<String>,
    schema: Option<RawSchema>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    schema_type: Option<String>,
    format: Option<String>,
    title: Option<String>,
    description: Option<String>,
    example: Option<Value>,
    read_only: Option<bool>,
    access: Option<String>,
    position: Option<i32>,
    allow_empty_value: Option<bool>,
    items: Option<Box<RawSchema>>,
    #[serde(default)]
    properties: IndexMap<String, RawSchema>,
    #[serde(default, deserialize_with = "string_list")]
    required: Vec<String>,
    xml: Option<RawXml>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

impl RawSchema {
    fn xml_name(&self) -> Option<String> {
        self.xml.as_ref().and_then(|xml| xml.name.clone())
    }
}

#[derive(Debug, Deserialize)]
struct RawXml {
    name: Option<String>,
}
