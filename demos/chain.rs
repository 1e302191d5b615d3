//! Loads a small catalog, chains two named transforms over it, and edits the
//! result in place before printing it.

use fluxdom::{Document, Insertable, NodeTarget};

const CATALOG: &str = r#"<catalog>
  <item sku="a1">Alpha</item>
  <item sku="b2">Beta</item>
</catalog>"#;

const LIST_XSL: &str = r#"<xsl:template match="/">
  <list><xsl:apply-templates select="/catalog/item"/></list>
</xsl:template>
<xsl:template match="item">
  <entry><xsl:value-of select="."/></entry>
</xsl:template>"#;

const WRAP_XSL: &str = r#"<xsl:template match="/">
  <report><xsl:copy-of select="/list"/></report>
</xsl:template>"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut doc = Document::new()?;
    doc.load(CATALOG)?;

    // Bare template fragments get framed into complete stylesheets and
    // cached under their names; the second run of either name could omit
    // the content entirely.
    doc.transform_in_place("list", Some(LIST_XSL))?
        .transform_in_place("wrap", Some(WRAP_XSL))?;

    doc.append_child(
        Insertable::fragment("<entry>Gamma (added by hand)</entry>"),
        NodeTarget::path("/report/list"),
    )?;

    println!("{}", doc.save_xml("cutXmlHead")?);
    Ok(())
}
