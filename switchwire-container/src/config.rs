//! Declarative component records.
//!
//! A [`ComponentConfig`] is the serializable form of a descriptor, for
//! applications that keep their wiring in data:
//!
//! ```json
//! {
//!   "name": "PersonDAO",
//!   "alias": ["persons", "people"],
//!   "module": "dao/person",
//!   "constructorArgs": [{ "ref": "MemoryDataSource" }, { "value": 25 }],
//!   "attrs": ["audited"]
//! }
//! ```
//!
//! Records carry no code, so their base comes from a resolver (usually the
//! [`ModuleResolver`](crate::resolver::ModuleResolver) via `module`), and
//! anything that needs a function (named factory methods, lifecycle hooks,
//! property setters) has to be bound on a descriptor in code instead.

use serde::Deserialize;

use crate::descriptor::{Attribute, ComponentDescriptor, FactoryMethod, Instance, OrderedArg, instance};
use crate::error::{Result, SwitchwireError};

/// The serializable form of a [`ComponentDescriptor`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentConfig {
    pub name: String,
    #[serde(alias = "aliases")]
    pub alias: OneOrMany,
    pub scope: Option<String>,
    pub lazy: bool,
    pub priority: Option<i64>,
    #[serde(alias = "requirePath")]
    pub module: Option<String>,
    #[serde(alias = "requireBase")]
    pub module_base: Option<String>,
    pub factory_component: Option<String>,
    pub factory_method: Option<FactoryMethodConfig>,
    pub init_method: Option<String>,
    pub destroy_method: Option<String>,
    pub constructor_args: Vec<ArgConfig>,
    pub properties: Vec<PropertyConfig>,
    pub attrs: Vec<AttrConfig>,
}

/// A single string or a list of strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::None => Vec::new(),
            OneOrMany::One(one) => vec![one],
            OneOrMany::Many(many) => many,
        }
    }
}

/// `true` for the default factory method, or a method name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FactoryMethodConfig {
    Default(bool),
    Named(String),
}

/// A literal argument value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl LiteralValue {
    /// The value as an instance of `bool`, `i64`, `f64` or `String`.
    pub fn into_instance(self) -> Instance {
        match self {
            LiteralValue::Bool(value) => instance(value),
            LiteralValue::Integer(value) => instance(value),
            LiteralValue::Float(value) => instance(value),
            LiteralValue::Text(value) => instance(value),
        }
    }
}

/// A constructor argument record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArgConfig {
    pub index: Option<usize>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub value: Option<LiteralValue>,
}

impl From<ArgConfig> for OrderedArg {
    fn from(arg: ArgConfig) -> Self {
        OrderedArg {
            index: arg.index,
            value: arg.value.map(LiteralValue::into_instance),
            reference: arg.reference,
        }
    }
}

/// A property record. Parsed so it can be reported, never converted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PropertyConfig {
    pub name: String,
    #[serde(flatten)]
    pub arg: ArgConfig,
}

/// An attribute: a bare type tag or `{ "type": ... }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttrConfig {
    Tag(String),
    Typed {
        #[serde(rename = "type")]
        kind: String,
    },
}

impl AttrConfig {
    pub fn kind(&self) -> &str {
        match self {
            AttrConfig::Tag(kind) | AttrConfig::Typed { kind } => kind,
        }
    }
}

impl ComponentConfig {
    /// Converts the record into a descriptor.
    ///
    /// Role attributes get untyped views: the instance a resolver hands
    /// back for such a component must be an `Arc<dyn Role>`.
    ///
    /// # Errors
    /// [`SwitchwireError::InvalidDescriptor`] for anything that needs code
    /// bound to it.
    pub fn into_descriptor(self) -> Result<ComponentDescriptor> {
        let name = self.name;
        let needs_code = |what: &str| {
            SwitchwireError::invalid_descriptor(
                &name,
                format!("{what} cannot be given in a component record; bind it on a descriptor in code"),
            )
        };

        if let Some(hook) = &self.init_method {
            return Err(needs_code(&format!("init method \"{hook}\"")));
        }
        if let Some(hook) = &self.destroy_method {
            return Err(needs_code(&format!("destroy method \"{hook}\"")));
        }
        if let Some(property) = self.properties.first() {
            return Err(needs_code(&format!("property \"{}\"", property.name)));
        }

        let factory_method = match self.factory_method {
            None | Some(FactoryMethodConfig::Default(false)) => None,
            Some(FactoryMethodConfig::Default(true)) => Some(FactoryMethod::Default),
            Some(FactoryMethodConfig::Named(method)) => {
                return Err(needs_code(&format!("factory method \"{method}\"")));
            }
        };

        let mut builder = ComponentDescriptor::builder(name.as_str())
            .aliases(self.alias.into_vec())
            .lazy(self.lazy);

        if let Some(scope) = self.scope {
            builder = builder.scope(scope);
        }
        if let Some(priority) = self.priority {
            builder = builder.priority(priority);
        }
        if let Some(module) = self.module {
            builder = builder.module(module);
        }
        if let Some(module_base) = self.module_base {
            builder = builder.module_base(module_base);
        }
        if let Some(method) = factory_method {
            builder = builder.factory_method(method);
        }
        if let Some(component) = self.factory_component {
            builder = builder.factory_component(component);
        }

        let builder = self
            .constructor_args
            .into_iter()
            .fold(builder, |builder, arg| builder.constructor_arg(arg.into()));
        let builder = self
            .attrs
            .iter()
            .fold(builder, |builder, attr| builder.attr(Attribute::from_type(attr.kind())));

        let descriptor = builder.build();
        descriptor.validate()?;
        Ok(descriptor)
    }
}

impl TryFrom<ComponentConfig> for ComponentDescriptor {
    type Error = SwitchwireError;

    fn try_from(config: ComponentConfig) -> Result<Self> {
        config.into_descriptor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{PROTOTYPE, SINGLETON};

    fn parse(json: &str) -> ComponentConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn minimal_record_defaults() {
        let descriptor = parse(r#"{ "name": "PersonDAO" }"#).into_descriptor().unwrap();
        assert_eq!(descriptor.name(), "PersonDAO");
        assert_eq!(descriptor.scope(), SINGLETON);
        assert!(!descriptor.is_lazy());
        assert!(descriptor.aliases().is_empty());
        assert!(descriptor.base().is_none());
    }

    #[test]
    fn full_record_converts() {
        let descriptor = parse(
            r#"{
                "name": "PersonDAO",
                "alias": ["persons", "people"],
                "scope": "prototype",
                "lazy": true,
                "priority": 42,
                "requirePath": "person",
                "requireBase": "dao/",
                "constructorArgs": [
                    { "ref": "MemoryDataSource", "index": 1 },
                    { "value": 25, "index": 0 }
                ],
                "attrs": ["audited", { "type": "ComponentPostProcessor" }]
            }"#,
        )
        .into_descriptor()
        .unwrap();

        assert_eq!(descriptor.aliases(), ["persons", "people"]);
        assert_eq!(descriptor.scope(), PROTOTYPE);
        assert!(descriptor.is_lazy());
        assert_eq!(descriptor.priority(), Some(42));
        assert_eq!(descriptor.module(), Some("person"));
        assert_eq!(descriptor.module_base(), Some("dao/"));

        let args = descriptor.constructor_args();
        assert_eq!(args[0].reference.as_deref(), Some("MemoryDataSource"));
        assert_eq!(args[1].value.as_ref().and_then(|v| v.downcast_ref::<i64>()), Some(&25));

        let kinds: Vec<_> = descriptor.attrs().iter().map(Attribute::kind).collect();
        assert_eq!(kinds, ["audited", Attribute::POST_PROCESSOR]);
        assert!(matches!(descriptor.attrs()[1], Attribute::PostProcessor(_)));
    }

    #[test]
    fn single_alias_and_literal_kinds() {
        let config = parse(
            r#"{
                "name": "Settings",
                "alias": "cfg",
                "constructorArgs": [{ "value": true }, { "value": 1.5 }, { "value": "text" }]
            }"#,
        );
        assert_eq!(
            config.constructor_args.iter().map(|a| a.value.clone()).collect::<Vec<_>>(),
            [
                Some(LiteralValue::Bool(true)),
                Some(LiteralValue::Float(1.5)),
                Some(LiteralValue::Text("text".into())),
            ]
        );
        assert_eq!(config.into_descriptor().unwrap().aliases(), ["cfg"]);
    }

    #[test]
    fn default_factory_method_flag() {
        let descriptor = parse(r#"{ "name": "Ticket", "factoryMethod": true, "module": "tickets" }"#)
            .into_descriptor()
            .unwrap();
        assert!(matches!(descriptor.factory_method(), Some(FactoryMethod::Default)));

        let descriptor = parse(r#"{ "name": "Plain", "factoryMethod": false }"#).into_descriptor().unwrap();
        assert!(descriptor.factory_method().is_none());
    }

    #[test]
    fn code_bound_fields_are_rejected() {
        for json in [
            r#"{ "name": "A", "initMethod": "init" }"#,
            r#"{ "name": "A", "destroyMethod": "close" }"#,
            r#"{ "name": "A", "factoryMethod": "create", "factoryComponent": "F" }"#,
            r#"{ "name": "A", "properties": [{ "name": "dao", "ref": "PersonDAO" }] }"#,
        ] {
            assert!(
                matches!(parse(json).into_descriptor(), Err(SwitchwireError::InvalidDescriptor { .. })),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn mixed_indices_are_rejected() {
        let result = parse(r#"{ "name": "A", "constructorArgs": [{ "value": 1, "index": 0 }, { "value": 2 }] }"#)
            .into_descriptor();
        assert!(result.is_err());
    }
}
