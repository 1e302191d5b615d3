mod common;

use common::{doc_from, init_logging, TestResult};
use fluxdom::{
    ConfigUpdate, Document, DocumentError, Insertable, NodeTarget, RESERVED_DB_SOURCE,
};
use std::path::PathBuf;

const CATALOG: &str = "<catalog><item>first</item></catalog>";

#[test]
fn load_inline_and_save_with_declaration() -> TestResult {
    let doc = doc_from(CATALOG)?;
    let xml = doc.save_xml("")?;
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<catalog>"));
    assert!(xml.contains("<item>first</item>"));
    Ok(())
}

#[test]
fn cut_xml_head_drops_declaration() -> TestResult {
    let doc = doc_from("<?xml version=\"1.0\"?><root><x/></root>")?;
    let xml = doc.save_xml("cutXmlHead")?;
    assert!(!xml.contains("<?xml"));
    assert!(xml.starts_with("<root"));
    Ok(())
}

#[test]
fn trim_root_through_the_facade() -> TestResult {
    let doc = doc_from("<r><inner>text</inner></r>")?;
    let xml = doc.save_xml("cutxmlhead trimroot")?;
    assert_eq!(xml, "<inner>text</inner>");
    Ok(())
}

#[test]
fn append_child_fragment_by_path() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    doc.append_child(
        Insertable::fragment("<item>second</item>"),
        NodeTarget::path("/catalog"),
    )?;
    let items = doc.query("/catalog/item")?;
    assert_eq!(items.len(), 2);
    let xml = doc.save_xml("")?;
    assert!(xml.contains("<item>second</item>"));
    Ok(())
}

#[test]
fn imported_nodes_do_not_share_state_with_their_source() -> TestResult {
    let source = doc_from("<donor><gift>g</gift></donor>")?;
    let before = source.save_xml("")?;

    let mut doc = doc_from(CATALOG)?;
    let gift = source
        .query_first("/donor/gift")?
        .expect("donor gift exists");
    doc.append_child(Insertable::node(gift), NodeTarget::path("/catalog"))?;

    // Mutating the receiving document leaves the donor untouched.
    doc.append_child(
        Insertable::fragment("<item>third</item>"),
        NodeTarget::path("/catalog/gift"),
    )?;
    assert_eq!(source.save_xml("")?, before);
    assert!(doc.save_xml("")?.contains("<gift>"));
    Ok(())
}

#[test]
fn insert_before_places_a_preceding_sibling() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    doc.insert_before(
        Insertable::fragment("<item>zeroth</item>"),
        NodeTarget::path("/catalog/item"),
    )?;
    let xml = doc.save_xml("cutxmlhead")?;
    let zeroth = xml.find("zeroth").expect("inserted item present");
    let first = xml.find("first").expect("original item present");
    assert!(zeroth < first);
    Ok(())
}

#[test]
fn insert_before_document_node_has_no_parent() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    let err = doc
        .insert_before(Insertable::fragment("<x/>"), NodeTarget::Root)
        .unwrap_err();
    assert!(matches!(err, DocumentError::NoParent));
    Ok(())
}

#[test]
fn replace_node_swaps_the_target() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    doc.replace_node(
        Insertable::fragment("<item>replacement</item>"),
        NodeTarget::path("/catalog/item"),
    )?;
    let xml = doc.save_xml("")?;
    assert!(xml.contains("replacement"));
    assert!(!xml.contains("first"));
    Ok(())
}

#[test]
fn replace_with_unmatched_path_changes_nothing() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    let before = doc.save_xml("")?;
    let err = doc
        .replace_node(Insertable::fragment("<x/>"), NodeTarget::path("/nowhere"))
        .unwrap_err();
    assert!(matches!(err, DocumentError::TargetNotFound(_)));
    assert_eq!(doc.save_xml("")?, before);
    Ok(())
}

#[test]
fn replace_demands_an_explicit_target() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    let err = doc
        .replace_node(Insertable::fragment("<x/>"), NodeTarget::Root)
        .unwrap_err();
    assert!(matches!(err, DocumentError::MissingTarget));
    Ok(())
}

const UPPER_XSL: &str = "<xsl:template match=\"/\"><shouted><xsl:value-of select=\"/catalog/item\"/></shouted></xsl:template>";

#[test]
fn transform_with_inline_fragment_gets_framed() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    let out = doc.transform_to_text("shout", Some(UPPER_XSL), "")?;
    assert!(out.contains("<shouted>first</shouted>"));
    Ok(())
}

#[test]
fn stylesheet_cache_is_reused_and_overwritten_by_name() -> TestResult {
    let mut doc = doc_from(CATALOG)?;

    // First registration caches under the name; later calls reuse it without
    // repeating the content.
    let first = doc.transform_to_text("style", Some(UPPER_XSL), "")?;
    let again = doc.transform_to_text("style", None, "")?;
    assert_eq!(first, again);

    // New inline content for the same name overwrites the cache entry.
    let replacement = "<xsl:template match=\"/\"><whispered><xsl:value-of select=\"/catalog/item\"/></whispered></xsl:template>";
    let overwritten = doc.transform_to_text("style", Some(replacement), "")?;
    assert!(overwritten.contains("<whispered>first</whispered>"));

    // And the overwrite sticks for subsequent no-source calls.
    let after = doc.transform_to_text("style", None, "")?;
    assert!(after.contains("<whispered>"));
    Ok(())
}

#[test]
fn reserved_db_source_is_fatal() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    let err = doc
        .resolve_stylesheet("anything", Some(RESERVED_DB_SOURCE))
        .unwrap_err();
    assert!(matches!(err, DocumentError::ReservedStylesheetSource));
    Ok(())
}

#[test]
fn transforms_chain_in_place() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    let stage1 = "<xsl:template match=\"/\"><stage1><xsl:value-of select=\"/catalog/item\"/></stage1></xsl:template>";
    let stage2 = "<xsl:template match=\"/\"><stage2><xsl:value-of select=\"/stage1\"/></stage2></xsl:template>";
    doc.transform_in_place("one", Some(stage1))?
        .transform_in_place("two", Some(stage2))?;
    let xml = doc.save_xml("cutxmlhead")?;
    assert!(xml.contains("<stage2>first</stage2>"));
    Ok(())
}

#[test]
fn bare_names_resolve_against_the_stylesheet_directory() -> TestResult {
    init_logging();
    let dir = tempfile::tempdir()?;
    let framed = fluxdom::ensure_framed(UPPER_XSL, &fluxdom::OutputSpec::default());
    std::fs::write(dir.path().join("shout.xsl"), framed)?;

    let mut doc = Document::with_config(ConfigUpdate {
        stylesheet_dir: Some(PathBuf::from(dir.path())),
        ..Default::default()
    })?;
    doc.load(CATALOG)?;
    let out = doc.transform_to_text("shout", None, "")?;
    assert!(out.contains("<shouted>first</shouted>"));
    Ok(())
}

#[test]
fn missing_stylesheet_file_is_reported() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    let err = doc.resolve_stylesheet("no-such-stylesheet", None).unwrap_err();
    assert!(matches!(
        err,
        DocumentError::Io(_) | DocumentError::Engine(_)
    ));
    Ok(())
}

#[test]
fn restart_discards_the_document_but_keeps_the_cache() -> TestResult {
    let mut doc = doc_from(CATALOG)?;
    doc.resolve_stylesheet("style", Some(UPPER_XSL))?;
    doc.restart(None, true)?;
    assert!(doc.root_element().is_none());

    // The cached stylesheet still resolves by bare name after a restart.
    doc.load(CATALOG)?;
    let out = doc.transform_to_text("style", None, "")?;
    assert!(out.contains("<shouted>first</shouted>"));
    Ok(())
}
