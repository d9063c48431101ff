//! Constant values rendered as Dart expressions.
//!
//! Values of user-defined types are rendered by converters registered up
//! front in a [`ConverterRegistry`] under an explicit [`TypeTag`].

use std::fmt;

use dartgen_core::quote_string;
use indexmap::IndexMap;

use crate::error::{LookupError, Result};

/// Key a converter is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(&'static str);

impl TypeTag {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A compile-time constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    List(Vec<ConstValue>),
    Map(Vec<(ConstValue, ConstValue)>),
    /// `Type.value`
    EnumValue { ty: String, value: String },
    /// A value of a type rendered by a registered converter.
    Custom {
        tag: TypeTag,
        fields: Vec<(String, ConstValue)>,
    },
}

/// Converts the rendered fields of a custom value into an expression.
pub type Converter = Box<dyn Fn(&CustomFields) -> String + Send + Sync>;

/// Field name to rendered expression, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFields(IndexMap<String, String>);

impl CustomFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `name: value` named arguments.
    pub fn named_args(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Converters for custom constant values, keyed by tag.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: IndexMap<TypeTag, Converter>,
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("tags", &self.converters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a converter; each tag may be registered once.
    pub fn register<F>(&mut self, tag: TypeTag, converter: F) -> Result<()>
    where
        F: Fn(&CustomFields) -> String + Send + Sync + 'static,
    {
        if self.converters.contains_key(&tag) {
            return Err(LookupError::DuplicateConverter(tag.name().to_string()).into());
        }
        self.converters.insert(tag, Box::new(converter));
        Ok(())
    }

    /// Builder-style [`ConverterRegistry::register`].
    pub fn with<F>(mut self, tag: TypeTag, converter: F) -> Result<Self>
    where
        F: Fn(&CustomFields) -> String + Send + Sync + 'static,
    {
        self.register(tag, converter)?;
        Ok(self)
    }

    /// Look up a registered tag by its name.
    pub fn find_tag(&self, name: &str) -> Option<TypeTag> {
        self.converters.keys().find(|tag| tag.name() == name).copied()
    }

    pub fn contains(&self, tag: TypeTag) -> bool {
        self.converters.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Render a value as a Dart expression.
    pub fn render(&self, value: &ConstValue) -> Result<String> {
        Ok(match value {
            ConstValue::Null => "null".to_string(),
            ConstValue::Bool(b) => b.to_string(),
            ConstValue::Int(i) => i.to_string(),
            ConstValue::Double(d) => double_literal(*d),
            ConstValue::String(s) => quote_string(s),
            ConstValue::List(items) => {
                let items = items
                    .iter()
                    .map(|item| self.render(item))
                    .collect::<Result<Vec<_>>>()?;
                format!("[{}]", items.join(", "))
            }
            ConstValue::Map(entries) => {
                let entries = entries
                    .iter()
                    .map(|(k, v)| Ok(format!("{}: {}", self.render(k)?, self.render(v)?)))
                    .collect::<Result<Vec<_>>>()?;
                format!("{{{}}}", entries.join(", "))
            }
            ConstValue::EnumValue { ty, value } => format!("{}.{}", ty, value),
            ConstValue::Custom { tag, fields } => {
                let converter = self
                    .converters
                    .get(tag)
                    .ok_or_else(|| LookupError::MissingConverter(tag.name().to_string()))?;
                let mut rendered = CustomFields::default();
                for (name, field) in fields {
                    rendered.0.insert(name.clone(), self.render(field)?);
                }
                tracing::trace!(tag = %tag, "rendering custom value");
                converter(&rendered)
            }
        })
    }
}

fn double_literal(value: f64) -> String {
    if value.is_nan() {
        "double.nan".to_string()
    } else if value == f64::INFINITY {
        "double.infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "double.negativeInfinity".to_string()
    } else {
        // Debug formatting always keeps a fractional part or exponent.
        format!("{:?}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const DURATION: TypeTag = TypeTag::new("Duration");

    fn registry() -> ConverterRegistry {
        ConverterRegistry::new()
            .with(DURATION, |fields| format!("Duration({})", fields.named_args()))
            .unwrap()
    }

    #[test]
    fn test_scalars() {
        let r = ConverterRegistry::new();
        assert_eq!(r.render(&ConstValue::Null).unwrap(), "null");
        assert_eq!(r.render(&ConstValue::Bool(true)).unwrap(), "true");
        assert_eq!(r.render(&ConstValue::Int(-4)).unwrap(), "-4");
        assert_eq!(r.render(&ConstValue::Double(3.0)).unwrap(), "3.0");
        assert_eq!(r.render(&ConstValue::Double(0.25)).unwrap(), "0.25");
        assert_eq!(r.render(&ConstValue::Double(f64::NAN)).unwrap(), "double.nan");
        assert_eq!(
            r.render(&ConstValue::Double(f64::NEG_INFINITY)).unwrap(),
            "double.negativeInfinity"
        );
        assert_eq!(
            r.render(&ConstValue::String("it's $5".into())).unwrap(),
            r"'it\'s \$5'"
        );
    }

    #[test]
    fn test_collections_and_enum_values() {
        let r = ConverterRegistry::new();
        let list = ConstValue::List(vec![ConstValue::Int(1), ConstValue::Int(2)]);
        assert_eq!(r.render(&list).unwrap(), "[1, 2]");

        let map = ConstValue::Map(vec![(
            ConstValue::String("mode".into()),
            ConstValue::EnumValue {
                ty: "Mode".into(),
                value: "fast".into(),
            },
        )]);
        assert_eq!(r.render(&map).unwrap(), "{'mode': Mode.fast}");
    }

    #[test]
    fn test_custom_value_uses_converter() {
        let value = ConstValue::Custom {
            tag: DURATION,
            fields: vec![("seconds".into(), ConstValue::Int(30))],
        };
        assert_eq!(registry().render(&value).unwrap(), "Duration(seconds: 30)");
    }

    #[test]
    fn test_missing_converter() {
        let value = ConstValue::Custom {
            tag: TypeTag::new("Color"),
            fields: Vec::new(),
        };
        let err = registry().render(&value).unwrap_err();
        assert_eq!(
            err,
            Error::Lookup(LookupError::MissingConverter("Color".into()))
        );
    }

    #[test]
    fn test_duplicate_registration() {
        let mut r = registry();
        let err = r.register(DURATION, |_| String::new()).unwrap_err();
        assert_eq!(
            err,
            Error::Lookup(LookupError::DuplicateConverter("Duration".into()))
        );
        assert_eq!(r.find_tag("Duration"), Some(DURATION));
        assert_eq!(r.find_tag("Color"), None);
    }
}
