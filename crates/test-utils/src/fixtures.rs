//! Sample capabilities documents and builders for layer markup.

/// Complete 1.3.0 document with a three level layer tree.
pub const WMS_1_3_0_CAPABILITIES: &str = include_str!("../testdata/wms_1_3_0_capabilities.xml");

/// Complete 1.1.1 document mirroring the 1.3.0 sample.
pub const WMS_1_1_1_CAPABILITIES: &str = include_str!("../testdata/wms_1_1_1_capabilities.xml");

pub const WMS_NAMESPACE: &str = "http://www.opengis.net/wms";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Wrap a root layer in a minimal 1.3.0 document.
pub fn wms_1_3_0_document(root_layer: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="{WMS_NAMESPACE}" xmlns:xlink="{XLINK_NAMESPACE}">
  <Service><Name>WMS</Name><Title>Test</Title></Service>
  <Capability>
    {root_layer}
  </Capability>
</WMS_Capabilities>"#
    )
}

/// Wrap a root layer in a minimal 1.1.1 document.
pub fn wms_1_1_1_document(root_layer: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<WMT_MS_Capabilities version="1.1.1" xmlns:xlink="{XLINK_NAMESPACE}">
  <Service><Name>OGC:WMS</Name><Title>Test</Title></Service>
  <Capability>
    {root_layer}
  </Capability>
</WMT_MS_Capabilities>"#
    )
}

/// Builder for `Layer` markup.
///
/// ```ignore
/// let xml = LayerXml::named("roads")
///     .attr("queryable", "1")
///     .style("default")
///     .layer(LayerXml::named("highways"))
///     .to_xml();
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayerXml {
    attributes: Vec<(String, String)>,
    children: Vec<String>,
    layers: Vec<LayerXml>,
}

impl LayerXml {
    pub fn new() -> Self {
        Self::default()
    }

    /// A layer with a `Name` and a matching `Title`.
    pub fn named(name: &str) -> Self {
        Self::new()
            .element("Name", name)
            .element("Title", name)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), escape(value)));
        self
    }

    /// Add a simple text element.
    pub fn element(mut self, name: &str, text: &str) -> Self {
        self.children
            .push(format!("<{name}>{}</{name}>", escape(text)));
        self
    }

    /// Add raw child markup, e.g. vendor extensions.
    pub fn raw(mut self, markup: &str) -> Self {
        self.children.push(markup.to_string());
        self
    }

    pub fn style(self, name: &str) -> Self {
        let markup = format!(
            "<Style><Name>{}</Name><Title>{}</Title></Style>",
            escape(name),
            escape(name)
        );
        self.raw(&markup)
    }

    pub fn crs(self, code: &str) -> Self {
        self.element("CRS", code)
    }

    pub fn srs(self, code: &str) -> Self {
        self.element("SRS", code)
    }

    /// Add a `BoundingBox`; `reference_attribute` is `CRS` or `SRS`.
    pub fn bounding_box(self, reference_attribute: &str, code: &str, extent: [f64; 4]) -> Self {
        let [minx, miny, maxx, maxy] = extent;
        let markup = format!(
            r#"<BoundingBox {reference_attribute}="{}" minx="{minx}" miny="{miny}" maxx="{maxx}" maxy="{maxy}"/>"#,
            escape(code)
        );
        self.raw(&markup)
    }

    /// Nest a child layer after this layer's own elements.
    pub fn layer(mut self, child: LayerXml) -> Self {
        self.layers.push(child);
        self
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::from("<Layer");
        for (name, value) in &self.attributes {
            out.push_str(&format!(r#" {name}="{value}""#));
        }
        out.push('>');
        for child in &self.children {
            out.push_str(child);
        }
        for layer in &self.layers {
            out.push_str(&layer.to_xml());
        }
        out.push_str("</Layer>");
        out
    }
}

/// A single chain of nested layers, `levels[0]` outermost.
pub fn nested_chain(levels: Vec<LayerXml>) -> Option<LayerXml> {
    levels
        .into_iter()
        .rev()
        .reduce(|child, parent| parent.layer(child))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_have_expected_roots() {
        assert!(WMS_1_3_0_CAPABILITIES.contains("<WMS_Capabilities"));
        assert!(WMS_1_1_1_CAPABILITIES.contains("<WMT_MS_Capabilities"));
    }

    #[test]
    fn test_layer_markup() {
        let xml = LayerXml::named("a&b")
            .attr("queryable", "1")
            .style("s1")
            .layer(LayerXml::named("child"))
            .to_xml();
        assert!(xml.starts_with(r#"<Layer queryable="1"><Name>a&amp;b</Name>"#));
        assert!(xml.contains("<Style><Name>s1</Name>"));
        assert!(xml.ends_with("<Name>child</Name><Title>child</Title></Layer></Layer>"));
    }

    #[test]
    fn test_nested_chain_order() {
        let chain = nested_chain(vec![LayerXml::named("outer"), LayerXml::named("inner")]).unwrap();
        let xml = chain.to_xml();
        assert!(xml.find("outer").unwrap() < xml.find("inner").unwrap());
        assert!(nested_chain(Vec::new()).is_none());
    }

    #[test]
    fn test_document_wrappers() {
        let layer = LayerXml::named("x").to_xml();
        assert!(wms_1_3_0_document(&layer).contains(r#"version="1.3.0""#));
        assert!(wms_1_1_1_document(&layer).contains("<WMT_MS_Capabilities"));
    }
}
