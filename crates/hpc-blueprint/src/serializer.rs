//! Blueprint serializer
//!
//! Converts the ordered instance list into a YAML-like blueprint document.
//! The document is first built as a [`serde_yaml::Value`] graph and then
//! walked by a small indentation-based emitter:
//!
//! - keys are emitted in insertion order, never sorted
//! - two spaces per nesting level
//! - list items start with `- `; a mapping item keeps its first key on the
//!   dash line and aligns the remaining keys under it
//! - scalars are written with their natural text, no quoting or escaping
//!
//! The output is not guaranteed to be valid YAML for arbitrary text values.

use crate::instance::ConfiguredInstance;
use serde_yaml::{Mapping, Number, Value};

/// Document returned when nothing is configured
pub const PLACEHOLDER: &str =
    "# Add components from the catalog to generate the YAML configuration.";

/// Blueprint name written at the top of every document
pub const BLUEPRINT_NAME: &str = "hpc-cluster-example";

/// Name of the single deployment group
pub const DEPLOYMENT_GROUP: &str = "primary";

/// Fixed `vars` block, in emission order
pub const DEFAULT_VARS: [(&str, &str); 4] = [
    ("project_id", "hpc-project"),
    ("deployment_name", "hpc-deployment"),
    ("region", "us-central1"),
    ("zone", "us-central1-a"),
];

const INDENT: &str = "  ";

/// Whether a document is the "nothing configured" placeholder
///
/// Anything starting with the comment marker counts; such documents must not
/// be sent to the external services.
#[inline]
#[must_use]
pub fn is_placeholder(document: &str) -> bool {
    document.starts_with('#')
}

/// Render instances as a blueprint document
///
/// Pure and deterministic: equal input yields byte-identical output.
#[must_use]
pub fn serialize(instances: &[ConfiguredInstance]) -> String {
    if instances.is_empty() {
        return PLACEHOLDER.to_string();
    }
    emit(&build_document(instances))
}

/// Build the blueprint object graph
#[must_use]
pub fn build_document(instances: &[ConfiguredInstance]) -> Value {
    let mut vars = Mapping::new();
    for (key, value) in DEFAULT_VARS {
        vars.insert(key.into(), value.into());
    }

    let modules = instances.iter().map(module).collect::<Vec<_>>();

    let mut group = Mapping::new();
    group.insert("group".into(), DEPLOYMENT_GROUP.into());
    group.insert("modules".into(), Value::Sequence(modules));

    let mut doc = Mapping::new();
    doc.insert("blueprint_name".into(), BLUEPRINT_NAME.into());
    doc.insert("vars".into(), Value::Mapping(vars));
    doc.insert(
        "deployment_groups".into(),
        Value::Sequence(vec![Value::Mapping(group)]),
    );
    Value::Mapping(doc)
}

fn module(instance: &ConfiguredInstance) -> Value {
    let mut settings = Mapping::new();
    for (key, value) in instance.values() {
        let value = match value {
            hpc_catalog::OptionValue::Number(n) => Value::Number(Number::from(*n)),
            hpc_catalog::OptionValue::Text(s) => Value::String(s.clone()),
        };
        settings.insert(Value::String(key.clone()), value);
    }

    let mut module = Mapping::new();
    module.insert("id".into(), instance.id().as_str().into());
    module.insert("source".into(), instance.definition().source_path().into());
    module.insert("settings".into(), Value::Mapping(settings));
    Value::Mapping(module)
}

/// Emit any value graph as indented text
#[must_use]
pub fn emit(value: &Value) -> String {
    let mut out = String::new();
    match untag(value) {
        Value::Mapping(map) if !map.is_empty() => emit_mapping(&mut out, map, 0),
        Value::Sequence(seq) if !seq.is_empty() => emit_sequence(&mut out, seq, 0),
        other => {
            out.push_str(&inline_text(other));
            out.push('\n');
        }
    }
    out
}

fn emit_mapping(out: &mut String, map: &Mapping, depth: usize) {
    for (key, value) in map {
        pad(out, depth);
        emit_entry(out, key, value, depth);
    }
}

/// Write `key: ...` at the current cursor; nested blocks go to `depth + 1`
fn emit_entry(out: &mut String, key: &Value, value: &Value, depth: usize) {
    out.push_str(&inline_text(key));
    out.push(':');
    match untag(value) {
        Value::Mapping(map) if !map.is_empty() => {
            out.push('\n');
            emit_mapping(out, map, depth + 1);
        }
        Value::Sequence(seq) if !seq.is_empty() => {
            out.push('\n');
            emit_sequence(out, seq, depth + 1);
        }
        other => {
            out.push(' ');
            out.push_str(&inline_text(other));
            out.push('\n');
        }
    }
}

fn emit_sequence(out: &mut String, seq: &[Value], depth: usize) {
    for item in seq {
        pad(out, depth);
        match untag(item) {
            Value::Mapping(map) if !map.is_empty() => {
                out.push_str("- ");
                let mut entries = map.iter();
                if let Some((key, value)) = entries.next() {
                    emit_entry(out, key, value, depth + 1);
                }
                for (key, value) in entries {
                    pad(out, depth + 1);
                    emit_entry(out, key, value, depth + 1);
                }
            }
            Value::Sequence(inner) if !inner.is_empty() => {
                out.push_str("-\n");
                emit_sequence(out, inner, depth + 1);
            }
            other => {
                out.push_str("- ");
                out.push_str(&inline_text(other));
                out.push('\n');
            }
        }
    }
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn untag(value: &Value) -> &Value {
    let mut current = value;
    while let Value::Tagged(tagged) = current {
        current = &tagged.value;
    }
    current
}

/// Text of a value written on the current line
fn inline_text(value: &Value) -> String {
    match untag(value) {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Mapping(_) => "{}".to_string(),
        Value::Sequence(_) => "[]".to_string(),
        Value::Tagged(tagged) => inline_text(&tagged.value),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConfigurationStore;
    use hpc_catalog::{Catalog, OptionValue};

    #[test]
    fn empty_input_is_placeholder() {
        assert_eq!(serialize(&[]), PLACEHOLDER);
        assert!(is_placeholder(&serialize(&[])));
    }

    #[test]
    fn single_c2_document_is_exact() {
        let catalog = Catalog::builtin();
        let mut store = ConfigurationStore::new();
        store.add(catalog.require("c2-standard-8").unwrap());

        let expected = "\
blueprint_name: hpc-cluster-example
vars:
  project_id: hpc-project
  deployment_name: hpc-deployment
  region: us-central1
  zone: us-central1-a
deployment_groups:
  - group: primary
    modules:
      - id: c2-standard-8-1
        source: compute/c2-standard-8
        settings:
          cpuCount: 8
          memory: 32
          os: debian-11
";
        assert_eq!(serialize(store.list()), expected);
    }

    #[test]
    fn fractional_numbers_keep_their_digits() {
        let catalog = Catalog::builtin();
        let mut store = ConfigurationStore::new();
        let id = store.add(catalog.require("vpc-network").unwrap());
        store
            .update_field(&id, "mtu", OptionValue::Number(1460.5))
            .unwrap();
        assert!(serialize(store.list()).contains("          mtu: 1460.5\n"));
    }

    #[test]
    fn text_is_not_quoted_or_escaped() {
        let catalog = Catalog::builtin();
        let mut store = ConfigurationStore::new();
        let id = store.add(catalog.require("vpc-network").unwrap());
        store
            .update_field(&id, "name", OptionValue::from("a: b # c"))
            .unwrap();
        assert!(serialize(store.list()).contains("          name: a: b # c\n"));
    }

    #[test]
    fn emitter_handles_nested_lists_and_empties() {
        let value: Value = serde_yaml::from_str(
            "a:\n  - [1, 2]\n  - {}\n  - x\nb: []\nc: {}\nd: ~\ne: true\n",
        )
        .unwrap();
        let expected = "\
a:
  -
    - 1
    - 2
  - {}
  - x
b: []
c: {}
d: null
e: true
";
        assert_eq!(emit(&value), expected);
    }

    #[test]
    fn mapping_items_align_nested_first_key() {
        let value: Value =
            serde_yaml::from_str("items:\n  - inner:\n      k: v\n    next: 1\n").unwrap();
        assert_eq!(emit(&value), "items:\n  - inner:\n      k: v\n    next: 1\n");
    }
}
