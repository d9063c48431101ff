use dartgen_dart::{ConstValue, ConverterRegistry, LookupError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A constant value as written in a library description.
///
/// Scalars and lists are written directly; enum values, maps and custom
/// values use a small table:
///
/// ```toml
/// value = { enum = "Level", value = "info" }
/// value = { map = [{ key = "a", value = 1 }] }
/// value = { custom = "Duration", fields = { seconds = 30 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueRecord {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    List(Vec<ValueRecord>),
    EnumValue {
        #[serde(rename = "enum")]
        ty: String,
        value: String,
    },
    Custom {
        custom: String,
        #[serde(default)]
        fields: IndexMap<String, ValueRecord>,
    },
    Map {
        map: Vec<EntryRecord>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub key: ValueRecord,
    pub value: ValueRecord,
}

impl ValueRecord {
    /// Convert to a [`ConstValue`], looking custom type names up in `registry`.
    pub fn to_const(&self, registry: &ConverterRegistry) -> dartgen_dart::Result<ConstValue> {
        Ok(match self {
            ValueRecord::Null => ConstValue::Null,
            ValueRecord::Bool(b) => ConstValue::Bool(*b),
            ValueRecord::Int(i) => ConstValue::Int(*i),
            ValueRecord::Double(d) => ConstValue::Double(*d),
            ValueRecord::String(s) => ConstValue::String(s.clone()),
            ValueRecord::List(items) => ConstValue::List(
                items
                    .iter()
                    .map(|item| item.to_const(registry))
                    .collect::<dartgen_dart::Result<_>>()?,
            ),
            ValueRecord::EnumValue { ty, value } => ConstValue::EnumValue {
                ty: ty.clone(),
                value: value.clone(),
            },
            ValueRecord::Custom { custom, fields } => {
                let tag = registry
                    .find_tag(custom)
                    .ok_or_else(|| LookupError::MissingConverter(custom.clone()))?;
                let fields = fields
                    .iter()
                    .map(|(name, field)| Ok((name.clone(), field.to_const(registry)?)))
                    .collect::<dartgen_dart::Result<_>>()?;
                ConstValue::Custom { tag, fields }
            }
            ValueRecord::Map { map } => ConstValue::Map(
                map.iter()
                    .map(|entry| {
                        Ok((
                            entry.key.to_const(registry)?,
                            entry.value.to_const(registry)?,
                        ))
                    })
                    .collect::<dartgen_dart::Result<_>>()?,
            ),
        })
    }

    /// Render as a Dart expression.
    pub fn render(&self, registry: &ConverterRegistry) -> dartgen_dart::Result<String> {
        registry.render(&self.to_const(registry)?)
    }
}

#[cfg(test)]
mod tests {
    use dartgen_dart::TypeTag;

    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        value: ValueRecord,
    }

    fn parse(src: &str) -> ValueRecord {
        toml::from_str::<Holder>(src).unwrap().value
    }

    #[test]
    fn test_scalars_from_toml() {
        let registry = ConverterRegistry::new();
        assert_eq!(parse("value = 3").render(&registry).unwrap(), "3");
        assert_eq!(parse("value = 1.5").render(&registry).unwrap(), "1.5");
        assert_eq!(parse("value = true").render(&registry).unwrap(), "true");
        assert_eq!(
            parse("value = \"it's\"").render(&registry).unwrap(),
            "'it\\'s'"
        );
        assert_eq!(parse("value = [1, 2]").render(&registry).unwrap(), "[1, 2]");
    }

    #[test]
    fn test_tables() {
        let registry = ConverterRegistry::new();
        assert_eq!(
            parse("value = { enum = \"Level\", value = \"info\" }")
                .render(&registry)
                .unwrap(),
            "Level.info"
        );
        assert_eq!(
            parse("value = { map = [{ key = \"a\", value = 1 }] }")
                .render(&registry)
                .unwrap(),
            "{'a': 1}"
        );
    }

    #[test]
    fn test_json_null() {
        let value: ValueRecord = serde_json::from_str("null").unwrap();
        assert_eq!(value, ValueRecord::Null);
    }

    #[test]
    fn test_custom_value() {
        let registry = ConverterRegistry::new()
            .with(TypeTag::new("Duration"), |fields| {
                format!("Duration({})", fields.named_args())
            })
            .unwrap();
        let value = parse("value = { custom = \"Duration\", fields = { seconds = 30 } }");
        assert_eq!(
            value.render(&registry).unwrap(),
            "Duration(seconds: 30)"
        );

        let err = value.render(&ConverterRegistry::new()).unwrap_err();
        assert_eq!(
            err,
            dartgen_dart::Error::Lookup(LookupError::MissingConverter("Duration".into()))
        );
    }
}
