//! Adapter interfaces onto the documented web application.
//!
//! The pipeline never inspects a framework directly. A binding implements
//! these four traits over whatever introspection the host offers; the crate
//! ships one such binding, [`crate::snapshot::HostSnapshot`], backed by a
//! metadata file. All reads are expected to be side-effect free.

/// A single entry of the host's route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRoute {
    /// Controller path such as `api/widgets`; empty for routes without one
    pub controller: String,
    /// Action name such as `index`
    pub action: String,
    /// HTTP verb, possibly regex-anchored (`^GET$`)
    pub verb: String,
    /// Path spec, possibly carrying `(.:format)` and `:param` placeholders
    pub path: String,
}

/// Cardinality of a serializer association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// An association declared on a serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationDescriptor {
    pub name: String,
    pub cardinality: Cardinality,
    /// Class name of the related model, when the host can tell
    pub class_name: Option<String>,
}

/// A serializer class known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializerDescriptor {
    /// Qualified class name, e.g. `WidgetSerializer`
    pub name: String,
    /// Name of the model class the serializer is bound to
    pub model: Option<String>,
    /// Attribute name to declared type, in declaration order
    pub attributes: Vec<(String, String)>,
    pub associations: Vec<AssociationDescriptor>,
}

/// A permitted request parameter: a plain attribute or a nested group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermittedParam {
    Attribute(String),
    Group {
        name: String,
        attributes: Vec<PermittedParam>,
    },
}

/// A query scope accepted by a controller's index action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeDefinition {
    pub name: String,
    /// Declared scope type; `hash` scopes expand into one parameter per key
    pub scope_type: String,
    pub default: Option<String>,
    /// Sub-keys of a `hash` scope
    pub using: Vec<String>,
}

/// Enumerates the host route table.
pub trait RouteSource {
    fn routes(&self) -> Vec<HostRoute>;

    /// The host application's name, if it has one
    fn application_name(&self) -> Option<String> {
        None
    }
}

/// Resolves model classes and their column metadata.
pub trait ModelSchemaSource {
    /// Resolve a class by name, returning its canonical name
    fn resolve_model(&self, name: &str) -> Option<String>;

    /// Declared type of `column` on `model`
    fn column_type(&self, model: &str, column: &str) -> Option<String>;
}

/// Enumerates serializer classes.
pub trait SerializerSource {
    fn serializers(&self) -> Vec<SerializerDescriptor>;

    /// Name of the serializer designated for `model`
    fn serializer_for(&self, model: &str) -> Option<String>;
}

/// Controller parameter metadata.
pub trait ControllerParameterSource {
    /// Resolve the controller class behind `path`
    fn resolve_controller(&self, path: &str) -> Option<String>;

    /// Permitted parameters of the controller, possibly nested
    fn permitted_params(&self, path: &str) -> Option<Vec<PermittedParam>>;

    /// Index scopes of the controller, in declaration order
    fn scopes(&self, path: &str) -> Vec<ScopeDefinition>;
}

/// Everything the pipeline needs from a host.
pub trait Host: RouteSource + ModelSchemaSource + SerializerSource + ControllerParameterSource {}

impl<T> Host for T where T: RouteSource + ModelSchemaSource + SerializerSource + ControllerParameterSource {}
