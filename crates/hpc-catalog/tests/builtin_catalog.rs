use hpc_catalog::{Catalog, Category, OptionKind, OptionSpec, OptionValue};
use proptest::prelude::*;

#[test]
fn builtin_catalog_has_five_entries_in_order() {
    let catalog = Catalog::builtin();
    let ids: Vec<_> = catalog.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "c2-standard-8",
            "a2-highgpu-1g",
            "persistent-ssd",
            "hyperdisk-balanced",
            "vpc-network"
        ]
    );
}

#[test]
fn every_default_fits_its_option() {
    for def in Catalog::builtin().iter() {
        for option in &def.options {
            assert_eq!(
                option.check_value(&option.default),
                None,
                "default of {}.{} does not fit",
                def.id,
                option.id
            );
        }
    }
}

#[test]
fn every_category_is_represented() {
    let catalog = Catalog::builtin();
    for category in Category::ALL {
        assert!(catalog.by_category(category).next().is_some(), "{category}");
    }
}

#[test]
fn c2_defaults_match_the_published_shape() {
    let catalog = Catalog::builtin();
    let c2 = catalog.require("c2-standard-8").unwrap();
    let defaults: Vec<_> = c2
        .options
        .iter()
        .map(|o| (o.id.as_str(), o.default.to_string()))
        .collect();
    assert_eq!(
        defaults,
        vec![("cpuCount", "8".into()), ("memory", "32".into()), ("os", "debian-11".into())]
    );
    assert_eq!(c2.options[2].kind, OptionKind::Select);
}

fn memory_slider() -> OptionSpec {
    OptionSpec::slider("memory", "Memory", 32.0, 8.0, 240.0, 4.0)
}

proptest! {
    #[test]
    fn prop_on_step_values_in_range_fit(k in 0u32..=58) {
        let value = OptionValue::Number(8.0 + f64::from(k) * 4.0);
        prop_assert_eq!(memory_slider().check_value(&value), None);
    }

    #[test]
    fn prop_values_above_max_never_fit(extra in 1u32..10_000) {
        let value = OptionValue::Number(240.0 + f64::from(extra));
        prop_assert!(memory_slider().check_value(&value).is_some());
    }
}
