//! Lowering of TOML and JSON library descriptions into rendered Dart.

use dartgen_dart::{
    AssetId, ConverterRegistry, LibraryNames, LookupError, PackageResolver, TypeTag, Violation,
};
use dartgen_ir::{Error, Library, LowerContext};

fn render(toml: &str) -> String {
    let library: Library = toml.parse().expect("Failed to parse library");
    library.lower().expect("Failed to lower library").render()
}

fn lower_err(toml: &str) -> Box<Error> {
    let library: Library = toml.parse().expect("Failed to parse library");
    library.lower().expect_err("lowering should fail")
}

#[test]
fn test_static_const_property() {
    let text = render(
        r#"
        [[declarations]]
        kind = "class"
        name = "Config"

        [[declarations.members]]
        kind = "property"
        name = "maxRetries"
        type = "int"
        modifiers = ["static", "const"]
        value = 3
        "#,
    );
    assert_eq!(
        text,
        "class Config {\n  static const int maxRetries = 3;\n}\n"
    );
}

#[test]
fn test_method_with_named_params() {
    let text = render(
        r#"
        [[declarations]]
        kind = "class"
        name = "Printer"

        [[declarations.members]]
        kind = "method"
        name = "describe"
        returns = "String"
        multiline_params = true
        params = [
            { name = "a", type = "int" },
            { name = "label", type = "String?", modifiers = ["named"] },
        ]
        body = { arrow = "a.toString()" }
        "#,
    );
    assert_eq!(
        text,
        "class Printer {\n  String describe(int a, {String? label,}) => a.toString();\n}\n"
    );
}

#[test]
fn test_enum_with_constructor_arguments() {
    let text = render(
        r#"
        [[declarations]]
        kind = "enum"
        name = "Color"
        constants = [
            { name = "red", args = ["255", "0", "0"] },
            { name = "gray", constructor = "mono", args = ["128"] },
        ]

        [[declarations.members]]
        kind = "property"
        name = "r"
        type = "int"
        modifiers = ["final"]

        [[declarations.members]]
        kind = "constructor"
        modifiers = ["const"]
        params = [{ name = "r", modifiers = ["this"] }]

        [[declarations.members]]
        kind = "constructor"
        name = "mono"
        modifiers = ["const"]
        params = [{ name = "r", modifiers = ["this"] }]
        "#,
    );
    assert_eq!(
        text,
        "\
enum Color {
  red(255, 0, 0),
  gray.mono(128);

  final int r;

  const Color(this.r);

  const Color.mono(this.r);
}
"
    );
}

#[test]
fn test_constructor_initializers() {
    let text = render(
        r#"
        [[declarations]]
        kind = "class"
        name = "Celsius"
        extends = "Temperature"

        [[declarations.members]]
        kind = "property"
        name = "degrees"
        type = "double"
        modifiers = ["final"]

        [[declarations.members]]
        kind = "constructor"
        params = [{ name = "value", type = "double" }]
        initializers = [
            { kind = "super", args = ["value"], named = { unit = "'C'" } },
            { kind = "field", name = "degrees", value = "value" },
            { kind = "assert", condition = "value > -273.15" },
        ]
        "#,
    );
    assert_eq!(
        text,
        "\
class Celsius extends Temperature {
  final double degrees;

  Celsius(double value) : assert(value > -273.15), degrees = value, super(value, unit: 'C');
}
"
    );
}

#[test]
fn test_custom_value_uses_registry() {
    let library: Library = r#"
        [[declarations]]
        kind = "variable"
        name = "timeout"
        modifiers = ["const"]
        value = { custom = "Duration", fields = { seconds = 30 } }
        "#
    .parse()
    .unwrap();

    let registry = ConverterRegistry::new()
        .with(TypeTag::new("Duration"), |fields| {
            format!("Duration({})", fields.named_args())
        })
        .unwrap();
    let paths = PackageResolver::new();
    let libraries = LibraryNames::new();
    let ctx = LowerContext::new(&registry, &paths, &libraries);
    assert_eq!(
        library.lower_with(&ctx).unwrap().render(),
        "const timeout = Duration(seconds: 30);\n"
    );

    let err = library.lower().unwrap_err();
    assert_eq!(
        err.node_error(),
        Some(&dartgen_dart::Error::Lookup(LookupError::MissingConverter(
            "Duration".into()
        )))
    );
    assert!(err.to_string().contains("declarations[0].value"), "{err}");
}

#[test]
fn test_structural_error_carries_record_path() {
    let err = lower_err(
        r#"
        [[declarations]]
        kind = "class"
        name = "A"

        [[declarations.members]]
        kind = "property"
        name = "ok"
        type = "int"

        [[declarations.members]]
        kind = "property"
        name = "limit"
        type = "int"
        modifiers = ["const"]
        default = "1"
        "#,
    );
    assert_eq!(err.to_string(), "cannot build 'declarations[0].members[1]'");
    let node = err.node_error().expect("node error");
    assert!(node.is_structural());
    assert_eq!(node.violation(), Some(&Violation::Requires("const", "static")));
}

#[test]
fn test_parameter_error_path() {
    let err = lower_err(
        r#"
        [[declarations]]
        kind = "function"
        name = "run"
        body = { block = "" }
        params = [
            { name = "a", type = "int" },
            { name = "b", type = "int", modifiers = ["named", "optional"] },
        ]
        "#,
    );
    assert_eq!(err.to_string(), "cannot build 'declarations[0].params[1]'");
    assert_eq!(
        err.node_error().and_then(|e| e.violation()),
        Some(&Violation::Conflict("named", "optional"))
    );
}

#[test]
fn test_modifier_not_accepted() {
    let err = lower_err(
        r#"
        [[declarations]]
        kind = "variable"
        name = "x"
        type = "int"
        modifiers = ["static"]
        "#,
    );
    assert_eq!(
        err.to_string(),
        "invalid record at 'declarations[0]': modifier 'static' is not accepted on a variable"
    );
}

#[test]
fn test_default_and_value_are_exclusive() {
    let err = lower_err(
        r#"
        [[declarations]]
        kind = "variable"
        name = "x"
        modifiers = ["final"]
        default = "1"
        value = 1
        "#,
    );
    assert!(matches!(*err, Error::Record { .. }), "{err:?}");
}

#[test]
fn test_single_class_modifier() {
    let err = lower_err(
        r#"
        [[declarations]]
        kind = "class"
        name = "A"
        modifiers = ["base", "final"]
        "#,
    );
    assert!(matches!(*err, Error::Record { .. }), "{err:?}");

    let text = render(
        r#"
        [[declarations]]
        kind = "class"
        name = "Shape"
        modifiers = ["sealed"]
        "#,
    );
    assert_eq!(text, "sealed class Shape {}\n");
}

#[test]
fn test_mixin_rejects_final() {
    let err = lower_err(
        r#"
        [[declarations]]
        kind = "mixin"
        name = "Walker"
        modifiers = ["final"]
        "#,
    );
    assert_eq!(
        err.node_error().and_then(|e| e.violation()),
        Some(&Violation::IllegalModifier("final", "a mixin"))
    );
}

#[test]
fn test_asset_directives() {
    let library: Library = r#"
        [output]
        asset = { package = "app", path = "lib/src/models/user.g.dart" }
        part_of = { asset = { package = "app", path = "lib/src/models/user.dart" } }

        [[directives]]
        kind = "import"
        asset = { package = "app", path = "lib/src/util.dart" }

        [[directives]]
        kind = "import"
        asset = { package = "http", path = "lib/http.dart" }
        as = "http"
        "#
    .parse()
    .unwrap();

    let registry = ConverterRegistry::new();
    let paths = PackageResolver::new();
    let unnamed =
        LibraryNames::new().with(AssetId::new("app", "lib/src/models/user.dart"), None);
    let ctx = LowerContext::new(&registry, &paths, &unnamed);
    assert_eq!(
        library.lower_with(&ctx).unwrap().render(),
        "\
part of 'user.dart';

import '../util.dart';
import 'package:http/http.dart' as http;
"
    );

    let named = LibraryNames::new().with(
        AssetId::new("app", "lib/src/models/user.dart"),
        Some("app.models"),
    );
    let ctx = LowerContext::new(&registry, &paths, &named);
    let text = library.lower_with(&ctx).unwrap().render();
    assert!(text.starts_with("part of app.models;\n"), "{text}");

    let unknown = LibraryNames::new();
    let ctx = LowerContext::new(&registry, &paths, &unknown);
    let err = library.lower_with(&ctx).unwrap_err();
    assert_eq!(err.to_string(), "cannot build 'output.part_of'");
}

#[test]
fn test_unreachable_asset() {
    let err = lower_err(
        r#"
        [output]
        asset = { package = "app", path = "lib/main.dart" }

        [[directives]]
        kind = "import"
        asset = { package = "app", path = "test/helpers.dart" }
        "#,
    );
    assert_eq!(err.to_string(), "cannot build 'directives[0]'");
    assert_eq!(
        err.node_error(),
        Some(&dartgen_dart::Error::Lookup(LookupError::UnreachableAsset {
            asset: "app|test/helpers.dart".into(),
            from: "app|lib/main.dart".into(),
        }))
    );
}

#[test]
fn test_deferred_import_requires_prefix() {
    let err = lower_err(
        r#"
        [[directives]]
        kind = "import"
        uri = "package:charts/charts.dart"
        modifiers = ["deferred"]
        "#,
    );
    assert_eq!(
        err.node_error().and_then(|e| e.violation()),
        Some(&Violation::Requires("deferred", "as"))
    );
}

#[test]
fn test_tab_indent_from_json() {
    let library = Library::from_json_str(
        r#"{
  "output": { "indent": 0 },
  "declarations": [
    {
      "kind": "extension",
      "name": "Shout",
      "on": "String",
      "members": [
        { "kind": "getter", "name": "loud", "type": "String", "body": { "arrow": "toUpperCase()" } }
      ]
    }
  ]
}"#,
        "shout.json",
    )
    .unwrap();
    assert_eq!(
        library.lower().unwrap().render(),
        "extension Shout on String {\n\tString get loud => toUpperCase();\n}\n"
    );
}

#[test]
fn test_three_space_indent() {
    let text = render(
        r#"
        [output]
        indent = 3

        [[declarations]]
        kind = "class"
        name = "A"

        [[declarations.members]]
        kind = "property"
        name = "x"
        type = "int"
        "#,
    );
    assert_eq!(text, "class A {\n   int x;\n}\n");
}

#[test]
fn test_named_owner_outside_lib() {
    let library: Library = r#"
        [output]
        asset = { package = "app", path = "lib/generated.dart" }
        part_of = { asset = { package = "app", path = "tool/owner.dart" } }
        "#
    .parse()
    .unwrap();

    let registry = ConverterRegistry::new();
    let paths = PackageResolver::new();
    let named = LibraryNames::new().with(AssetId::new("app", "tool/owner.dart"), Some("owner"));
    let ctx = LowerContext::new(&registry, &paths, &named);
    assert_eq!(library.lower_with(&ctx).unwrap().render(), "part of owner;\n");
}
