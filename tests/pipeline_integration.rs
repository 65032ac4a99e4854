//! End-to-end pipeline tests: raw artifact text for all three namespaces
//! through parse and merge.

use mapmerge::{load, EntryKind, LoadInput, MappingError, MergedRecord};

const INTERMEDIATE: &str = "\
tiny\t2\t0\tofficial\tintermediary
c\ta\tnet/pivot/class_10
\tf\tI\tb\tfield_21
\tm\t(La;)Z\tc\tmethod_33
\tm\t()Z\tc\tmethod_34
c\te\tnet/pivot/class_11
\tf\tLa;\tg\tfield_22
";

const HUMAN: &str = "\
tiny\t2\t0\tintermediary\tnamed
c\tnet/pivot/class_10\tcom/readable/Engine
\tf\tI\tfield_21\tticks
\tm\t(Lnet/pivot/class_10;)Z\tmethod_33\tisCompatible
c\tnet/pivot/class_11\tcom/readable/EngineHolder
\tf\tLnet/pivot/class_10;\tfield_22\tengine
";

const VENDOR: &str = "\
# vendor release mappings
com.vendor.Engine -> a:
    int tickCount -> b
    1:5:boolean matches(com.vendor.Engine) -> c
com.vendor.EngineHolder -> e:
    com.vendor.Engine held -> g
";

fn run() -> Vec<MergedRecord> {
    load(LoadInput {
        intermediate: INTERMEDIATE,
        human: HUMAN,
        vendor: VENDOR,
    })
    .unwrap()
}

#[test]
fn one_record_per_intermediate_entry_in_stable_order() {
    let records = run();
    // 2 classes, 2 methods, 2 fields, grouped in that order.
    assert_eq!(records.len(), 6);
    let kinds: Vec<EntryKind> = records.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            EntryKind::Class,
            EntryKind::Class,
            EntryKind::Method,
            EntryKind::Method,
            EntryKind::Field,
            EntryKind::Field,
        ]
    );
    assert_eq!(records[0].obfuscated_name, "a");
    assert_eq!(records[1].obfuscated_name, "e");
}

#[test]
fn class_record_resolves_all_namespaces() {
    let records = run();
    let class = &records[0];
    assert_eq!(class.intermediate_name, "net.pivot.class_10");
    assert_eq!(class.vendor_name.as_deref(), Some("com.vendor.Engine"));
    assert_eq!(class.vendor_short_name.as_deref(), Some("Engine"));
    assert_eq!(class.human_name.as_deref(), Some("com.readable.Engine"));
    assert_eq!(class.human_short_name.as_deref(), Some("Engine"));
}

#[test]
fn field_record_resolves_across_descriptor_namespaces() {
    let records = run();
    let field = records
        .iter()
        .find(|r| r.obfuscated_name == "e.g")
        .expect("field e.g");
    assert_eq!(field.kind, EntryKind::Field);
    assert_eq!(field.intermediate_name, "net.pivot.class_11.field_22");
    // The human store keys this field by the intermediate binary
    // descriptor Lnet/pivot/class_10;, re-encoded from the obfuscated La;.
    assert_eq!(
        field.human_name.as_deref(),
        Some("com.readable.EngineHolder.engine")
    );
    assert_eq!(field.human_display.as_deref(), Some("Engine engine"));
    assert_eq!(
        field.vendor_name.as_deref(),
        Some("com.vendor.EngineHolder.held")
    );
    assert_eq!(field.vendor_display.as_deref(), Some("Engine held"));
    assert_eq!(field.obfuscated_display.as_deref(), Some("a g"));
}

#[test]
fn overloaded_methods_resolve_independently() {
    let records = run();
    let overloads: Vec<&MergedRecord> = records
        .iter()
        .filter(|r| r.obfuscated_name == "a.c")
        .collect();
    assert_eq!(overloads.len(), 2);

    let resolved: Vec<&&MergedRecord> = overloads
        .iter()
        .filter(|r| r.human_name.is_some())
        .collect();
    assert_eq!(resolved.len(), 1);
    assert_eq!(
        resolved[0].human_name.as_deref(),
        Some("com.readable.Engine.isCompatible")
    );
    assert_eq!(
        resolved[0].human_display.as_deref(),
        Some("boolean isCompatible(Engine)")
    );
    assert_eq!(
        resolved[0].human_short_name.as_deref(),
        Some("Engine.isCompatible")
    );
}

#[test]
fn empty_human_artifact_leaves_human_side_absent() {
    let records = load(LoadInput {
        intermediate: INTERMEDIATE,
        human: "tiny\t2\n",
        vendor: VENDOR,
    })
    .unwrap();
    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.human_name.is_none()));
    assert!(records.iter().any(|r| r.vendor_name.is_some()));
}

#[test]
fn unsupported_header_produces_no_records() {
    let err = load(LoadInput {
        intermediate: "v1\t2\nc\ta\tFoo\n",
        human: HUMAN,
        vendor: VENDOR,
    })
    .unwrap_err();
    assert!(matches!(err, MappingError::UnsupportedFormat(_)));
}

#[test]
fn truncated_vendor_line_is_tolerated() {
    let vendor = "com.vendor.Engine -> a:\n    boolean matches( -> c\n    int tickCount -> b\n";
    let records = load(LoadInput {
        intermediate: INTERMEDIATE,
        human: HUMAN,
        vendor,
    })
    .unwrap();
    let method = records
        .iter()
        .find(|r| r.obfuscated_name == "a.c" && r.vendor_name.is_some());
    assert!(method.is_none(), "broken vendor line must not resolve");
    let field = records.iter().find(|r| r.obfuscated_name == "a.b").unwrap();
    assert_eq!(
        field.vendor_name.as_deref(),
        Some("com.vendor.Engine.tickCount")
    );
}

#[test]
fn merged_records_serialize_for_the_presentation_layer() {
    let records = run();
    let json = serde_json::to_string(&records).unwrap();
    assert!(json.contains("\"obfuscatedName\":\"a\""));
    assert!(json.contains("\"vendorShortName\":\"Engine\""));
    assert!(!json.contains("null"));
}
