//! Property tests for URI normalization, parameter partitioning and
//! modifier legality.

use dartgen_dart::ast::{Param, ParamGroup, ParamList, Property, normalize};
use proptest::prelude::*;

fn param(index: usize, group: u8) -> Param {
    let builder = Param::builder(format!("p{}", index)).ty("int");
    match group {
        0 => builder,
        1 => builder.optional(),
        _ => builder.named(),
    }
    .build()
    .unwrap()
}

fn names(params: &[Param]) -> Vec<String> {
    params.iter().map(|p| p.name().to_string()).collect()
}

proptest! {
    #[test]
    fn normalize_is_idempotent(path in "[a-z./\\\\_]{0,40}") {
        let once = normalize(&path);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(!once.contains('\\'));
    }

    #[test]
    fn partition_is_total_and_order_preserving(groups in prop::collection::vec(0u8..3, 0..24)) {
        let input: Vec<Param> = groups.iter().enumerate().map(|(i, g)| param(i, *g)).collect();
        let list = ParamList::partition(input.clone());

        prop_assert_eq!(list.len(), input.len());
        let mut all = names(list.required());
        all.extend(names(list.optional()));
        all.extend(names(list.named()));
        let mut expected = names(&input);
        let mut sorted = all.clone();
        sorted.sort();
        expected.sort();
        prop_assert_eq!(sorted, expected);

        for (group, members) in [
            (ParamGroup::RequiredPositional, list.required()),
            (ParamGroup::OptionalPositional, list.optional()),
            (ParamGroup::Named, list.named()),
        ] {
            let in_order: Vec<String> = input
                .iter()
                .filter(|p| p.group() == group)
                .map(|p| p.name().to_string())
                .collect();
            prop_assert_eq!(names(members), in_order);
        }
    }

    #[test]
    fn bracket_follows_last_required(required in 1usize..5, trailing in 1usize..5, named in any::<bool>(), multiline in any::<bool>()) {
        let group = if named { 2 } else { 1 };
        let params: Vec<Param> = (0..required)
            .map(|i| param(i, 0))
            .chain((required..required + trailing).map(|i| param(i, group)))
            .collect();
        let text = ParamList::partition(params).to_source(multiline);

        let (open, close) = if named { ('{', '}') } else { ('[', ']') };
        let last_required = format!("int p{}, {}", required - 1, open);
        prop_assert!(text.contains(&last_required), "{}", text);
        let ending = format!("{})", close);
        prop_assert!(text.ends_with(&ending), "{}", text);
        prop_assert_eq!(text.matches(open).count(), 1);
    }

    #[test]
    fn property_flags_follow_the_rules(
        is_static in any::<bool>(),
        is_const in any::<bool>(),
        is_final in any::<bool>(),
        is_late in any::<bool>(),
        is_covariant in any::<bool>(),
        is_external in any::<bool>(),
        has_value in any::<bool>(),
    ) {
        let mut builder = Property::builder("value").ty("int");
        if is_static { builder = builder.static_(); }
        if is_const { builder = builder.const_(); }
        if is_final { builder = builder.final_(); }
        if is_late { builder = builder.late(); }
        if is_covariant { builder = builder.covariant(); }
        if is_external { builder = builder.external(); }
        if has_value { builder = builder.default_value("0"); }

        let legal = !(is_const && !is_static)
            && !(is_const && (is_final || is_late || is_external))
            && !(is_late && is_external)
            && !(is_static && is_covariant)
            && !(is_covariant && is_final)
            && (!is_const || has_value)
            && !(is_external && has_value);

        let result = builder.build();
        prop_assert_eq!(result.is_ok(), legal, "{:?}", result);
    }
}
