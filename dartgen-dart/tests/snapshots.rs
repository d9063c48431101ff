//! Snapshot tests for whole-file rendering.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use dartgen_dart::{
    DartFile, RenderOptions,
    ast::{
        Class, Constructor, Enum, Getter, Import, Method, Param, Part, Property, UriReference,
    },
};

fn user_library() -> DartFile {
    let id = Property::builder("id").final_().ty("String").build().unwrap();
    let tags = Property::builder("tags")
        .final_()
        .ty("List<String>")
        .build()
        .unwrap();
    let ctor = Constructor::builder("User")
        .const_()
        .param(
            Param::builder("id")
                .field_formal()
                .named()
                .required()
                .build()
                .unwrap(),
        )
        .param(
            Param::builder("tags")
                .field_formal()
                .named()
                .default_value("const []")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let from_json = Constructor::named("User", "fromJson")
        .factory()
        .param(
            Param::builder("json")
                .ty("Map<String, dynamic>")
                .build()
                .unwrap(),
        )
        .arrow("_$UserFromJson(json)")
        .build()
        .unwrap();
    let is_tagged = Getter::builder("isTagged")
        .ty("bool")
        .arrow("tags.isNotEmpty")
        .build()
        .unwrap();
    let to_json = Method::builder("toJson")
        .returns("Map<String, dynamic>")
        .arrow("_$UserToJson(this)")
        .build()
        .unwrap();

    let user = Class::builder("User")
        .doc("A registered user.")
        .annotation("JsonSerializable()")
        .member(to_json)
        .member(ctor)
        .member(from_json)
        .member(is_tagged)
        .member(id)
        .member(tags)
        .build()
        .unwrap();
    let role = Enum::builder("Role")
        .values(["admin", "member"])
        .unwrap()
        .build()
        .unwrap();

    DartFile::with_options(RenderOptions::new().generator("ModelGenerator"))
        .directive(Import::new(UriReference::package(
            "json_annotation",
            "json_annotation.dart",
        )))
        .directive(Part::new(UriReference::relative("lib/user.g.dart", "lib/user.dart")))
        .declaration(user)
        .declaration(role)
}

#[test]
fn test_user_library() {
    let text = user_library().render();
    insta::assert_snapshot!("user_library", text);
}
