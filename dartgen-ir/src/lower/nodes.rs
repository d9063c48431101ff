use dartgen_dart::ast::{
    Arguments, Class, ClassModifier, Constructor, Declaration, Enum, EnumConstant, Extension,
    Function, Getter, GlobalVariable, Initializer, Member, Method, Mixin, Param, Property, Setter,
    TypeParam,
};
use indexmap::IndexMap;

use super::{Flags, LowerContext, RecordPath};
use crate::{
    Result,
    library::{
        BodyRecord, CallableRecord, DeclarationRecord, EnumConstantRecord, InitializerRecord,
        MemberRecord, Modifier, ParamRecord, TypeParamRecord, ValueRecord,
    },
};

macro_rules! apply_meta {
    ($builder:expr, $meta:expr) => {{
        let mut builder = $builder;
        if let Some(doc) = &$meta.doc {
            builder = builder.doc(doc.clone());
        }
        for annotation in &$meta.annotations {
            builder = builder.annotation(annotation.clone());
        }
        builder
    }};
}

macro_rules! apply_body {
    ($builder:expr, $body:expr) => {
        match $body {
            Some(BodyRecord::Block(statements)) => $builder.body(statements.clone()),
            Some(BodyRecord::Arrow(expr)) => $builder.arrow(expr.clone()),
            None => $builder,
        }
    };
}

macro_rules! apply_callable {
    ($builder:expr, $record:expr, $flags:expr, $path:expr) => {{
        let record: &CallableRecord = $record;
        let mut builder = apply_meta!($builder, record.meta);
        if let Some(ty) = &record.returns {
            builder = builder.returns(ty.clone());
        }
        for param in type_params(&record.type_params) {
            builder = builder.type_param(param);
        }
        builder = builder.params(params(&record.params, $path)?);
        if record.multiline_params {
            builder = builder.multiline_params();
        }
        if $flags.has(Modifier::External) {
            builder = builder.external();
        }
        if $flags.has(Modifier::Async) {
            builder = builder.async_();
        }
        if $flags.has(Modifier::Generator) {
            builder = builder.generator();
        }
        apply_body!(builder, &record.body)
    }};
}

const CLASS_MODIFIERS: [(Modifier, ClassModifier); 4] = [
    (Modifier::Base, ClassModifier::Base),
    (Modifier::Interface, ClassModifier::Interface),
    (Modifier::Final, ClassModifier::Final),
    (Modifier::Sealed, ClassModifier::Sealed),
];

pub(super) fn declaration(
    record: &DeclarationRecord,
    ctx: &LowerContext<'_>,
    path: &RecordPath,
) -> Result<Declaration> {
    let declaration: Declaration = match record {
        DeclarationRecord::Class {
            name,
            meta,
            modifiers,
            type_params: tps,
            extends,
            with,
            implements,
            members: records,
        } => {
            let flags = Flags::check(
                path,
                modifiers,
                &[
                    Modifier::Abstract,
                    Modifier::Base,
                    Modifier::Interface,
                    Modifier::Final,
                    Modifier::Sealed,
                    Modifier::Mixin,
                ],
                "a class",
            )?;
            let mut builder = apply_meta!(Class::builder(name.clone()), meta);
            if flags.has(Modifier::Abstract) {
                builder = builder.abstract_();
            }
            if let Some(modifier) = class_modifier(&flags, path)? {
                builder = builder.modifier(modifier);
            }
            if flags.has(Modifier::Mixin) {
                builder = builder.mixin_class();
            }
            for param in type_params(tps) {
                builder = builder.type_param(param);
            }
            if let Some(superclass) = extends {
                builder = builder.extends(superclass.clone());
            }
            for mixin in with {
                builder = builder.with(mixin.clone());
            }
            for interface in implements {
                builder = builder.implements(interface.clone());
            }
            builder = builder.members(members(records, name, ctx, path)?);
            builder.build().map_err(|e| path.lower(e))?.into()
        }
        DeclarationRecord::Enum {
            name,
            meta,
            type_params: tps,
            with,
            implements,
            constants,
            members: records,
        } => {
            let mut builder = apply_meta!(Enum::builder(name.clone()), meta);
            for param in type_params(tps) {
                builder = builder.type_param(param);
            }
            for mixin in with {
                builder = builder.with(mixin.clone());
            }
            for interface in implements {
                builder = builder.implements(interface.clone());
            }
            for (i, constant) in constants.iter().enumerate() {
                builder = builder.constant(enum_constant(constant, &path.index("constants", i))?);
            }
            for member in members(records, name, ctx, path)? {
                builder = builder.member(member);
            }
            builder.build().map_err(|e| path.lower(e))?.into()
        }
        DeclarationRecord::Mixin {
            name,
            meta,
            modifiers,
            type_params: tps,
            on,
            implements,
            members: records,
        } => {
            let flags = Flags::check(
                path,
                modifiers,
                &CLASS_MODIFIERS.map(|(modifier, _)| modifier),
                "a mixin",
            )?;
            let mut builder = apply_meta!(Mixin::builder(name.clone()), meta);
            if let Some(modifier) = class_modifier(&flags, path)? {
                builder = builder.modifier(modifier);
            }
            for param in type_params(tps) {
                builder = builder.type_param(param);
            }
            for ty in on {
                builder = builder.on(ty.clone());
            }
            for interface in implements {
                builder = builder.implements(interface.clone());
            }
            for member in members(records, name, ctx, path)? {
                builder = builder.member(member);
            }
            builder.build().map_err(|e| path.lower(e))?.into()
        }
        DeclarationRecord::Extension {
            name,
            on,
            meta,
            type_params: tps,
            members: records,
        } => {
            let mut builder = apply_meta!(Extension::builder(on.clone()), meta);
            if let Some(name) = name {
                builder = builder.name(name.clone());
            }
            for param in type_params(tps) {
                builder = builder.type_param(param);
            }
            let owner = name.as_deref().unwrap_or(on);
            for member in members(records, owner, ctx, path)? {
                builder = builder.member(member);
            }
            builder.build().map_err(|e| path.lower(e))?.into()
        }
        DeclarationRecord::Function(record) => {
            let flags = Flags::check(
                path,
                &record.modifiers,
                &[Modifier::External, Modifier::Async, Modifier::Generator],
                "a function",
            )?;
            let builder = apply_callable!(Function::builder(record.name.clone()), record, flags, path);
            builder.build().map_err(|e| path.lower(e))?.into()
        }
        DeclarationRecord::Variable {
            name,
            meta,
            ty,
            modifiers,
            default,
            value,
        } => {
            let flags = Flags::check(
                path,
                modifiers,
                &[
                    Modifier::External,
                    Modifier::Late,
                    Modifier::Const,
                    Modifier::Final,
                ],
                "a variable",
            )?;
            let mut builder = apply_meta!(GlobalVariable::builder(name.clone()), meta);
            if let Some(ty) = ty {
                builder = builder.ty(ty.clone());
            }
            if flags.has(Modifier::External) {
                builder = builder.external();
            }
            if flags.has(Modifier::Late) {
                builder = builder.late();
            }
            if flags.has(Modifier::Const) {
                builder = builder.const_();
            }
            if flags.has(Modifier::Final) {
                builder = builder.final_();
            }
            if let Some(expr) = initial_value(default, value, ctx, path)? {
                builder = builder.value(expr);
            }
            builder.build().map_err(|e| path.lower(e))?.into()
        }
    };
    Ok(declaration)
}

fn members(
    records: &[MemberRecord],
    owner: &str,
    ctx: &LowerContext<'_>,
    path: &RecordPath,
) -> Result<Vec<Member>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let path = path.index("members", i);
            let member = member(record, owner, ctx, &path)?;
            tracing::trace!(path = %path, rank = member.rank(), "lowered member");
            Ok(member)
        })
        .collect()
}

fn member(
    record: &MemberRecord,
    owner: &str,
    ctx: &LowerContext<'_>,
    path: &RecordPath,
) -> Result<Member> {
    let member: Member = match record {
        MemberRecord::Property {
            name,
            meta,
            ty,
            modifiers,
            default,
            value,
        } => {
            let flags = Flags::check(
                path,
                modifiers,
                &[
                    Modifier::Static,
                    Modifier::Const,
                    Modifier::Final,
                    Modifier::Late,
                    Modifier::Covariant,
                    Modifier::External,
                ],
                "a property",
            )?;
            let mut builder = apply_meta!(Property::builder(name.clone()), meta);
            if let Some(ty) = ty {
                builder = builder.ty(ty.clone());
            }
            if flags.has(Modifier::Static) {
                builder = builder.static_();
            }
            if flags.has(Modifier::Const) {
                builder = builder.const_();
            }
            if flags.has(Modifier::Final) {
                builder = builder.final_();
            }
            if flags.has(Modifier::Late) {
                builder = builder.late();
            }
            if flags.has(Modifier::Covariant) {
                builder = builder.covariant();
            }
            if flags.has(Modifier::External) {
                builder = builder.external();
            }
            if let Some(expr) = initial_value(default, value, ctx, path)? {
                builder = builder.default_value(expr);
            }
            builder.build().map_err(|e| path.lower(e))?.into()
        }
        MemberRecord::Getter {
            name,
            meta,
            ty,
            modifiers,
            body,
        } => {
            let flags = Flags::check(
                path,
                modifiers,
                &[
                    Modifier::Static,
                    Modifier::External,
                    Modifier::Async,
                    Modifier::Generator,
                ],
                "a getter",
            )?;
            let mut builder = apply_meta!(Getter::builder(name.clone()), meta);
            if let Some(ty) = ty {
                builder = builder.ty(ty.clone());
            }
            if flags.has(Modifier::Static) {
                builder = builder.static_();
            }
            if flags.has(Modifier::External) {
                builder = builder.external();
            }
            if flags.has(Modifier::Async) {
                builder = builder.async_();
            }
            if flags.has(Modifier::Generator) {
                builder = builder.generator();
            }
            let builder = apply_body!(builder, body);
            builder.build().map_err(|e| path.lower(e))?.into()
        }
        MemberRecord::Setter {
            name,
            meta,
            param: param_record,
            modifiers,
            body,
        } => {
            let flags = Flags::check(
                path,
                modifiers,
                &[Modifier::Static, Modifier::External],
                "a setter",
            )?;
            let param = param(param_record, &path.field("param"))?;
            let mut builder = apply_meta!(Setter::builder(name.clone(), param), meta);
            if flags.has(Modifier::Static) {
                builder = builder.static_();
            }
            if flags.has(Modifier::External) {
                builder = builder.external();
            }
            let builder = apply_body!(builder, body);
            builder.build().map_err(|e| path.lower(e))?.into()
        }
        MemberRecord::Constructor {
            class,
            name,
            meta,
            params: param_records,
            modifiers,
            multiline_params,
            initializers,
            body,
        } => {
            let flags = Flags::check(
                path,
                modifiers,
                &[Modifier::Const, Modifier::Factory, Modifier::External],
                "a constructor",
            )?;
            let class = class.as_deref().unwrap_or(owner);
            let builder = match name {
                Some(name) => Constructor::named(class, name.clone()),
                None => Constructor::builder(class),
            };
            let mut builder = apply_meta!(builder, meta);
            builder = builder.params(params(param_records, path)?);
            if *multiline_params {
                builder = builder.multiline_params();
            }
            if flags.has(Modifier::Const) {
                builder = builder.const_();
            }
            if flags.has(Modifier::Factory) {
                builder = builder.factory();
            }
            if flags.has(Modifier::External) {
                builder = builder.external();
            }
            for record in initializers {
                builder = builder.initializer(initializer(record));
            }
            let builder = apply_body!(builder, body);
            builder.build().map_err(|e| path.lower(e))?.into()
        }
        MemberRecord::Method(record) => {
            let flags = Flags::check(
                path,
                &record.modifiers,
                &[
                    Modifier::Static,
                    Modifier::Override,
                    Modifier::External,
                    Modifier::Async,
                    Modifier::Generator,
                ],
                "a method",
            )?;
            let mut builder =
                apply_callable!(Method::builder(record.name.clone()), record, flags, path);
            if flags.has(Modifier::Static) {
                builder = builder.static_();
            }
            if flags.has(Modifier::Override) {
                builder = builder.override_();
            }
            builder.build().map_err(|e| path.lower(e))?.into()
        }
    };
    Ok(member)
}

fn param(record: &ParamRecord, path: &RecordPath) -> Result<Param> {
    let flags = Flags::check(
        path,
        &record.modifiers,
        &[
            Modifier::Named,
            Modifier::Optional,
            Modifier::Required,
            Modifier::This,
            Modifier::Super,
        ],
        "a parameter",
    )?;
    let mut builder = Param::builder(record.name.clone());
    if let Some(ty) = &record.ty {
        builder = builder.ty(ty.clone());
    }
    if flags.has(Modifier::Named) {
        builder = builder.named();
    }
    if flags.has(Modifier::Optional) {
        builder = builder.optional();
    }
    if flags.has(Modifier::Required) {
        builder = builder.required();
    }
    if flags.has(Modifier::This) {
        builder = builder.field_formal();
    }
    if flags.has(Modifier::Super) {
        builder = builder.super_formal();
    }
    if let Some(value) = &record.default {
        builder = builder.default_value(value.clone());
    }
    builder.build().map_err(|e| path.lower(e))
}

fn params(records: &[ParamRecord], path: &RecordPath) -> Result<Vec<Param>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| param(record, &path.index("params", i)))
        .collect()
}

fn type_params(records: &[TypeParamRecord]) -> Vec<TypeParam> {
    records
        .iter()
        .map(|record| {
            let param = TypeParam::new(record.name.clone());
            match &record.bound {
                Some(bound) => param.bound(bound.clone()),
                None => param,
            }
        })
        .collect()
}

fn class_modifier(flags: &Flags, path: &RecordPath) -> Result<Option<ClassModifier>> {
    let found: Vec<ClassModifier> = CLASS_MODIFIERS
        .iter()
        .filter(|(modifier, _)| flags.has(*modifier))
        .map(|(_, class_modifier)| *class_modifier)
        .collect();
    match found.as_slice() {
        [] => Ok(None),
        [one] => Ok(Some(*one)),
        _ => Err(path.record(
            "at most one of 'base', 'interface', 'final' and 'sealed' may be given",
        )),
    }
}

/// The initializer expression from either `default` or a constant `value`.
fn initial_value(
    default: &Option<String>,
    value: &Option<ValueRecord>,
    ctx: &LowerContext<'_>,
    path: &RecordPath,
) -> Result<Option<String>> {
    match (default, value) {
        (Some(_), Some(_)) => Err(path.record("'default' and 'value' cannot both be set")),
        (Some(expr), None) => Ok(Some(expr.clone())),
        (None, Some(value)) => value
            .render(ctx.registry)
            .map(Some)
            .map_err(|e| path.field("value").lower(e)),
        (None, None) => Ok(None),
    }
}

fn arguments(args: &[String], named: &IndexMap<String, String>) -> Arguments {
    named.iter().fold(
        Arguments::positional(args.iter().cloned()),
        |arguments, (label, value)| arguments.named(label.clone(), value.clone()),
    )
}

fn initializer(record: &InitializerRecord) -> Initializer {
    match record {
        InitializerRecord::Assert { condition, message } => match message {
            Some(message) => Initializer::assert_with_message(condition.clone(), message.clone()),
            None => Initializer::assert(condition.clone()),
        },
        InitializerRecord::Field { name, value } => Initializer::field(name.clone(), value.clone()),
        InitializerRecord::Super {
            constructor,
            args,
            named,
        } => match constructor {
            Some(name) => Initializer::super_named(name.clone(), arguments(args, named)),
            None => Initializer::super_call(arguments(args, named)),
        },
        InitializerRecord::Redirect {
            constructor,
            args,
            named,
        } => match constructor {
            Some(name) => Initializer::redirect_to(name.clone(), arguments(args, named)),
            None => Initializer::redirect(arguments(args, named)),
        },
    }
}

fn enum_constant(record: &EnumConstantRecord, path: &RecordPath) -> Result<EnumConstant> {
    let mut builder = apply_meta!(EnumConstant::builder(record.name.clone()), record.meta);
    let args = record.args.as_deref().unwrap_or_default();
    match &record.constructor {
        Some(constructor) => {
            builder = builder.named_ctor(constructor.clone(), arguments(args, &record.named));
        }
        None if record.args.is_some() || !record.named.is_empty() => {
            builder = builder.args(arguments(args, &record.named));
        }
        None => {}
    }
    builder.build().map_err(|e| path.lower(e))
}
