//! Methods and top-level functions.
//!
//! Both share one signature shape; a method may additionally be `static`
//! or carry `@override`.

use dartgen_codegen::{CodeFragment, Renderable};

use super::{
    common::{
        Body, Meta, TypeParam, body_modifier, check_callable, check_type_params, keywords,
        type_params_text, with_body,
    },
    params::{Param, ParamList},
};
use crate::error::{Guard, NodeKind, Result};

/// Signature and body fields common to methods and functions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Callable {
    name: String,
    meta: Meta,
    return_type: Option<String>,
    type_params: Vec<TypeParam>,
    params: Vec<Param>,
    multiline_params: bool,
    is_external: bool,
    is_async: bool,
    is_generator: bool,
    body: Option<Body>,
}

impl Callable {
    fn new(name: String) -> Self {
        Self {
            name,
            meta: Meta::default(),
            return_type: None,
            type_params: Vec::new(),
            params: Vec::new(),
            multiline_params: false,
            is_external: false,
            is_async: false,
            is_generator: false,
            body: None,
        }
    }

    fn check(&self, guard: &Guard<'_>) -> Result<ParamList> {
        guard.identifier(&self.name)?;
        check_type_params(&self.type_params)?;
        let params = ParamList::partition(self.params.iter().cloned());
        params.check(guard)?;
        params.check_no_formals(guard)?;
        check_callable(
            guard,
            self.is_external,
            self.is_async,
            self.is_generator,
            self.body.as_ref(),
        )?;
        Ok(params)
    }

    fn signature(&self, prefix: String, params: &ParamList) -> String {
        let mut out = prefix;
        if let Some(ty) = &self.return_type {
            out.push_str(ty);
            out.push(' ');
        }
        out.push_str(&self.name);
        out.push_str(&type_params_text(&self.type_params));
        out.push_str(&params.to_source(self.multiline_params));
        if let Some(modifier) = body_modifier(self.is_async, self.is_generator) {
            out.push(' ');
            out.push_str(modifier);
        }
        out
    }
}

/// Builder methods shared by [`MethodBuilder`] and [`FunctionBuilder`].
macro_rules! callable_setters {
    () => {
        pub fn doc(mut self, doc: impl Into<String>) -> Self {
            self.callable.meta.doc = Some(doc.into());
            self
        }

        pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
            self.callable.meta.annotations.push(annotation.into());
            self
        }

        pub fn returns(mut self, ty: impl Into<String>) -> Self {
            self.callable.return_type = Some(ty.into());
            self
        }

        pub fn type_param(mut self, param: TypeParam) -> Self {
            self.callable.type_params.push(param);
            self
        }

        pub fn param(mut self, param: Param) -> Self {
            self.callable.params.push(param);
            self
        }

        pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
            self.callable.params.extend(params);
            self
        }

        /// Add a trailing comma so a formatter puts one parameter per line.
        pub fn multiline_params(mut self) -> Self {
            self.callable.multiline_params = true;
            self
        }

        pub fn external(mut self) -> Self {
            self.callable.is_external = true;
            self
        }

        pub fn async_(mut self) -> Self {
            self.callable.is_async = true;
            self
        }

        pub fn generator(mut self) -> Self {
            self.callable.is_generator = true;
            self
        }

        /// Use a block body holding the given statements.
        pub fn body(mut self, statements: impl Into<String>) -> Self {
            self.callable.body = Some(Body::Block(statements.into()));
            self
        }

        /// Use an arrow body returning the given expression.
        pub fn arrow(mut self, expr: impl Into<String>) -> Self {
            self.callable.body = Some(Body::Arrow(expr.into()));
            self
        }
    };
}

/// An instance or static method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    callable: Callable,
    params: ParamList,
    is_override: bool,
    is_static: bool,
}

impl Method {
    pub fn builder(name: impl Into<String>) -> MethodBuilder {
        MethodBuilder {
            callable: Callable::new(name.into()),
            is_override: false,
            is_static: false,
        }
    }

    pub fn to_builder(&self) -> MethodBuilder {
        MethodBuilder {
            callable: self.callable.clone(),
            is_override: self.is_override,
            is_static: self.is_static,
        }
    }

    pub fn name(&self) -> &str {
        &self.callable.name
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

impl Renderable for Method {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.callable.meta.to_fragments();
        if self.is_override {
            fragments.push(CodeFragment::line("@override"));
        }
        let prefix = keywords(&[
            ("external", self.callable.is_external),
            ("static", self.is_static),
        ]);
        let signature = self.callable.signature(prefix, &self.params);
        fragments.extend(with_body(signature, self.callable.body.as_ref()));
        fragments
    }
}

/// Builder for [`Method`].
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    callable: Callable,
    is_override: bool,
    is_static: bool,
}

impl MethodBuilder {
    callable_setters!();

    /// Annotate with `@override`.
    pub fn override_(mut self) -> Self {
        self.is_override = true;
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn build(self) -> Result<Method> {
        let guard = Guard::new(NodeKind::Method, &self.callable.name);
        let params = self.callable.check(&guard)?;
        guard.exclusive(("static", self.is_static), ("@override", self.is_override))?;

        Ok(Method {
            callable: self.callable,
            params,
            is_override: self.is_override,
            is_static: self.is_static,
        })
    }
}

/// A top-level function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    callable: Callable,
    params: ParamList,
}

impl Function {
    pub fn builder(name: impl Into<String>) -> FunctionBuilder {
        FunctionBuilder {
            callable: Callable::new(name.into()),
        }
    }

    pub fn to_builder(&self) -> FunctionBuilder {
        FunctionBuilder {
            callable: self.callable.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.callable.name
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }
}

impl Renderable for Function {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.callable.meta.to_fragments();
        let prefix = keywords(&[("external", self.callable.is_external)]);
        let signature = self.callable.signature(prefix, &self.params);
        fragments.extend(with_body(signature, self.callable.body.as_ref()));
        fragments
    }
}

/// Builder for [`Function`].
#[derive(Debug, Clone)]
pub struct FunctionBuilder {
    callable: Callable,
}

impl FunctionBuilder {
    callable_setters!();

    pub fn build(self) -> Result<Function> {
        let guard = Guard::new(NodeKind::Function, &self.callable.name);
        let params = self.callable.check(&guard)?;

        Ok(Function {
            callable: self.callable,
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    fn int_a() -> Param {
        Param::builder("a").ty("int").build().unwrap()
    }

    #[test]
    fn test_arrow_method_with_named_param() {
        let label = Param::builder("label")
            .ty("String?")
            .named()
            .build()
            .unwrap();
        let m = Method::builder("describe")
            .returns("String")
            .param(int_a())
            .param(label)
            .multiline_params()
            .arrow("a.toString()")
            .build()
            .unwrap();
        assert_eq!(
            m.render(),
            "String describe(int a, {String? label,}) => a.toString();\n"
        );
    }

    #[test]
    fn test_override_static_generic() {
        let m = Method::builder("toString")
            .override_()
            .returns("String")
            .arrow("'A'")
            .build()
            .unwrap();
        assert_eq!(m.render(), "@override\nString toString() => 'A';\n");

        let s = Method::builder("cast")
            .static_()
            .type_param(TypeParam::new("T").bound("Object"))
            .returns("T")
            .param(Param::builder("value").ty("Object").build().unwrap())
            .arrow("value as T")
            .build()
            .unwrap();
        assert_eq!(
            s.render(),
            "static T cast<T extends Object>(Object value) => value as T;\n"
        );
    }

    #[test]
    fn test_async_block_method() {
        let m = Method::builder("load")
            .returns("Future<void>")
            .async_()
            .body("await _init();\n_ready = true;")
            .build()
            .unwrap();
        assert_eq!(
            m.render(),
            "Future<void> load() async {\n  await _init();\n  _ready = true;\n}\n"
        );
    }

    #[test]
    fn test_sync_generator() {
        let m = Method::builder("range")
            .returns("Iterable<int>")
            .param(int_a())
            .generator()
            .body("for (var i = 0; i < a; i++) yield i;")
            .build()
            .unwrap();
        assert!(m.render().starts_with("Iterable<int> range(int a) sync* {"));
    }

    #[test]
    fn test_external_method_has_no_body() {
        let m = Method::builder("now")
            .external()
            .returns("int")
            .build()
            .unwrap();
        assert_eq!(m.render(), "external int now();\n");
    }

    #[test]
    fn test_external_with_body_is_rejected() {
        let err = Method::builder("now")
            .external()
            .body("return 0;")
            .build()
            .unwrap_err();
        assert_eq!(err.violation(), Some(&Violation::UnexpectedBody));
    }

    #[test]
    fn test_method_rules() {
        let cases = [
            (Method::builder("m"), Violation::MissingBody),
            (
                Method::builder("m").external().generator(),
                Violation::Conflict("external", "generator"),
            ),
            (
                Method::builder("m").generator().arrow("x"),
                Violation::Conflict("=>", "generator"),
            ),
            (
                Method::builder("m").static_().override_().arrow("x"),
                Violation::Conflict("static", "@override"),
            ),
            (
                Method::builder("m")
                    .param(Param::builder("x").field_formal().build().unwrap())
                    .arrow("x"),
                Violation::FormalOutsideConstructor("this.x".into()),
            ),
        ];
        for (builder, expected) in cases {
            assert_eq!(builder.build().unwrap_err().violation(), Some(&expected));
        }
    }

    #[test]
    fn test_function() {
        let f = Function::builder("main")
            .returns("void")
            .body("print('hi');")
            .build()
            .unwrap();
        assert_eq!(f.render(), "void main() {\n  print('hi');\n}\n");
    }

    #[test]
    fn test_function_optional_positional() {
        let f = Function::builder("greet")
            .returns("String")
            .param(Param::builder("name").ty("String").build().unwrap())
            .param(
                Param::builder("greeting")
                    .ty("String")
                    .optional()
                    .default_value("'Hello'")
                    .build()
                    .unwrap(),
            )
            .arrow("'$greeting, $name'")
            .build()
            .unwrap();
        assert_eq!(
            f.render(),
            "String greet(String name, [String greeting = 'Hello']) => '$greeting, $name';\n"
        );
    }

    #[test]
    fn test_function_rejects_mixed_groups() {
        let err = Function::builder("f")
            .param(Param::builder("a").optional().build().unwrap())
            .param(Param::builder("b").named().build().unwrap())
            .arrow("null")
            .build()
            .unwrap_err();
        assert_eq!(err.violation(), Some(&Violation::MixedOptionalAndNamed));
    }
}
