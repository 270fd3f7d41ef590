// tests/document_graph.rs

//! Document-level workflow: describe packages, toggle file relationships,
//! manage extracted licenses, and round-trip the graph through serde.

mod common;

use common::fixture_tree;
use sbomedit::{
    remove_files_from_package, Document, ElementRef, LicenseAssertion, ManifestBuilder,
    RelationshipType, StandardLicenseCatalog,
};

fn scanned_document() -> Document {
    let dir = fixture_tree(&[
        ("src/widget.c", b"int widget;"),
        ("tools/gen.py", b"print('gen')"),
        ("data/table.txt", b"1,2,3"),
    ]);

    let pkg = ManifestBuilder::new("widget")
        .declared_license(LicenseAssertion::listed("Apache-2.0", &StandardLicenseCatalog).unwrap())
        .download_location("https://example.org/widget.tar.gz")
        .root_path(dir.path())
        .build(&StandardLicenseCatalog)
        .unwrap();

    let mut doc = Document::new("http://example.org/spdx/widget", "widget-doc");
    doc.add_package(pkg).unwrap();
    doc
}

/// A described package shows up on both sides of the relationship pair
#[test]
fn describe_package_pairs_edges() {
    let doc = scanned_document();

    let described = doc.packages_described_by();
    assert_eq!(described.len(), 1);
    assert_eq!(described[0].name(), "widget");

    // Document side: describes; package side: described-by
    assert!(doc
        .relationships
        .contains(RelationshipType::Describes, &ElementRef::package("widget")));
    assert!(described[0]
        .relationships
        .contains(RelationshipType::DescribedBy, &doc.element_ref()));

    // Exactly two edges total for a fresh pair
    assert_eq!(doc.relationships.len() + described[0].relationships.len(), 2);
}

/// File-to-package relationship toggling through the package surface
#[test]
fn file_relationship_presence_toggles() {
    let mut doc = scanned_document();
    let pkg = doc.package_mut("widget").unwrap();

    pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, true)
        .unwrap();
    pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, true)
        .unwrap();
    pkg.set_file_relationship("data/table.txt", RelationshipType::DataFileOf, true)
        .unwrap();

    let pkg = doc.package("widget").unwrap();
    assert_eq!(pkg.file("tools/gen.py").unwrap().relationships.len(), 1);
    assert_eq!(pkg.file("data/table.txt").unwrap().relationships.len(), 1);

    let pkg = doc.package_mut("widget").unwrap();
    pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, false)
        .unwrap();
    pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, false)
        .unwrap();
    assert!(doc
        .package("widget")
        .unwrap()
        .file("tools/gen.py")
        .unwrap()
        .relationships
        .is_empty());
}

/// The loose removal drops type-OR-target matches; exact removal only the pair
#[test]
fn loose_and_exact_removal_semantics() {
    let mut doc = scanned_document();
    let pkg = doc.package_mut("widget").unwrap();
    let pkg_ref = pkg.element_ref();

    pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, true)
        .unwrap();
    pkg.set_file_relationship("tools/gen.py", RelationshipType::TestCaseOf, true)
        .unwrap();

    // Exact removal via set_presence(false): only BuildToolOf goes
    pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, false)
        .unwrap();
    assert_eq!(pkg.file("tools/gen.py").unwrap().relationships.len(), 1);

    // Loose removal: removing (BuildToolOf, pkg) also drops the
    // TestCaseOf edge because its target matches
    pkg.set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, true)
        .unwrap();
    let mut set = pkg.file("tools/gen.py").unwrap().relationships.clone();
    let removed = set.remove_matching_any(RelationshipType::BuildToolOf, &pkg_ref);
    assert_eq!(removed, 2);
    assert!(set.is_empty());
}

/// Removing all files transitions the package back to unanalyzed
#[test]
fn removing_all_files_clears_analysis() {
    let mut doc = scanned_document();
    let pkg = doc.package_mut("widget").unwrap();

    remove_files_from_package(pkg, &["src/widget.c", "tools/gen.py", "data/table.txt"]).unwrap();
    let pkg = doc.package("widget").unwrap();
    assert!(!pkg.files_analyzed());
    assert!(pkg.verification_code().is_none());
    assert!(pkg.files().is_empty());
}

/// Extracted licenses: duplicate ids rejected, identical (name, text) reused
#[test]
fn extracted_license_registry_rules() {
    let mut doc = scanned_document();

    let assertion = doc
        .register_extracted_license("LicenseRef-1", "Widget License", "Use widgets freely.")
        .unwrap();
    doc.set_package_concluded_license("widget", assertion, &StandardLicenseCatalog)
        .unwrap();

    // Duplicate id
    let dup = doc.register_extracted_license("LicenseRef-1", "Other", "Other text");
    assert!(matches!(dup, Err(sbomedit::Error::DuplicateLicenseId(_))));

    // Identical (name, text) found and reused through the file-attach flow
    let reused = doc
        .attach_extracted_license_to_file(
            "widget",
            "src/widget.c",
            "LicenseRef-2",
            "Widget License",
            "Use widgets freely.",
        )
        .unwrap();
    match &reused {
        LicenseAssertion::Extracted(license) => assert_eq!(license.id, "LicenseRef-1"),
        other => panic!("expected extracted assertion, got {:?}", other),
    }
    assert_eq!(doc.extracted_licenses().len(), 1);
}

/// The whole graph is serde-exposed for codecs and survives a round trip
#[test]
fn model_graph_serde_round_trip() {
    let mut doc = scanned_document();
    doc.package_mut("widget")
        .unwrap()
        .set_file_relationship("tools/gen.py", RelationshipType::BuildToolOf, true)
        .unwrap();
    let assertion = doc
        .register_extracted_license("LicenseRef-1", "Widget License", "Use widgets freely.")
        .unwrap();
    doc.set_file_concluded_license("widget", "src/widget.c", assertion, &StandardLicenseCatalog)
        .unwrap();

    let json = serde_json::to_string(&doc).unwrap();
    let restored: Document = serde_json::from_str(&json).unwrap();

    assert_eq!(doc, restored);
    // Codec-visible accessors still line up after the round trip
    assert_eq!(restored.packages_described_by().len(), 1);
    assert_eq!(
        restored.package("widget").unwrap().verification_code().unwrap().value(),
        doc.package("widget").unwrap().verification_code().unwrap().value()
    );
}
