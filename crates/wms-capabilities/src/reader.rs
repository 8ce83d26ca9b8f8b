//! Entry point: picks the grammar for a document and decodes it.

use std::io::BufRead;

use tracing::{debug, warn};

use crate::config::DecodeOptions;
use crate::engine::{push_parse_and_pop, Context};
use crate::error::{CapabilitiesError, CapabilitiesResult};
use crate::grammar::WmsVersion;
use crate::model::WmsCapabilities;
use crate::xml::{self, Element};

/// Decoder for WMS GetCapabilities responses.
///
/// The reader holds no per-document state and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct WmsCapabilitiesReader {
    options: DecodeOptions,
    version: Option<WmsVersion>,
}

impl WmsCapabilitiesReader {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            version: None,
        }
    }

    /// Always decode with the grammar of `version`, whatever the document
    /// declares. The root element must still be a recognized one.
    pub fn with_version(mut self, version: WmsVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a document held in a string.
    ///
    /// Returns `Ok(None)` if the input contains no element.
    pub fn read_str(&self, xml: &str) -> CapabilitiesResult<Option<WmsCapabilities>> {
        self.read_root(xml::parse_str(xml, self.options.max_depth)?)
    }

    /// Decode a document held in memory as raw bytes, in the encoding its
    /// XML declaration names.
    pub fn read_bytes(&self, bytes: &[u8]) -> CapabilitiesResult<Option<WmsCapabilities>> {
        self.read_from(bytes)
    }

    /// Decode a document from a buffered source.
    pub fn read_from<R: BufRead>(&self, source: R) -> CapabilitiesResult<Option<WmsCapabilities>> {
        self.read_root(xml::parse_reader(source, self.options.max_depth)?)
    }

    fn read_root(&self, root: Option<Element>) -> CapabilitiesResult<Option<WmsCapabilities>> {
        match root {
            Some(root) => self.read_element(&root).map(Some),
            None => {
                debug!("Document has no root element");
                Ok(None)
            }
        }
    }

    /// Decode an already parsed root element.
    pub fn read_element(&self, root: &Element) -> CapabilitiesResult<WmsCapabilities> {
        let root_name = root.local_name();
        let implied = WmsVersion::from_root_element(root_name)
            .ok_or_else(|| CapabilitiesError::UnrecognizedRoot(root_name.to_string()))?;

        let version = root
            .attribute("version")
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| CapabilitiesError::MissingVersion(root_name.to_string()))?;

        let grammar_version = match (self.version, WmsVersion::from_version_attribute(version)) {
            (Some(forced), _) => forced,
            (None, Some(declared)) => declared,
            (None, None) => {
                warn!(
                    version = %version,
                    root = %root_name,
                    grammar = %implied,
                    "Unrecognized version attribute, using the revision implied by the root element"
                );
                implied
            }
        };

        debug!(version = %version, grammar = %grammar_version, "Decoding capabilities document");

        let grammar = grammar_version.grammar();
        let ctx = Context::new(grammar);
        let seed = WmsCapabilities {
            version: version.to_string(),
            ..Default::default()
        };
        let capabilities = push_parse_and_pop(seed, grammar.document(), root, &ctx);

        debug!(
            layers = capabilities.layers().len(),
            has_service = capabilities.service.is_some(),
            "Decoded capabilities document"
        );
        Ok(capabilities)
    }
}

/// Decode a document with default options.
pub fn read_str(xml: &str) -> CapabilitiesResult<Option<WmsCapabilities>> {
    WmsCapabilitiesReader::default().read_str(xml)
}

/// Decode raw bytes with default options.
pub fn read_bytes(bytes: &[u8]) -> CapabilitiesResult<Option<WmsCapabilities>> {
    WmsCapabilitiesReader::default().read_bytes(bytes)
}

/// Decode an already parsed root element with default options.
pub fn read_element(root: &Element) -> CapabilitiesResult<WmsCapabilities> {
    WmsCapabilitiesReader::default().read_element(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_trimmed() {
        let caps = read_str(r#"<WMS_Capabilities version=" 1.3.0 "/>"#)
            .unwrap()
            .unwrap();
        assert_eq!(caps.version, "1.3.0");
        assert!(caps.service.is_none());
        assert!(caps.capability.is_none());
    }

    #[test]
    fn test_unrecognized_root() {
        let err = read_str(r#"<Capabilities version="1.3.0"/>"#).unwrap_err();
        assert!(matches!(err, CapabilitiesError::UnrecognizedRoot(ref name) if name == "Capabilities"));
    }

    #[test]
    fn test_missing_or_blank_version() {
        for xml in [
            "<WMT_MS_Capabilities/>",
            r#"<WMT_MS_Capabilities version="  "/>"#,
        ] {
            let err = read_str(xml).unwrap_err();
            assert!(matches!(err, CapabilitiesError::MissingVersion(_)), "{xml}");
        }
    }

    #[test]
    fn test_no_root_element() {
        assert!(read_str("").unwrap().is_none());
        assert!(read_bytes(b"<?xml version=\"1.0\"?>").unwrap().is_none());
    }

    #[test]
    fn test_unknown_version_falls_back_to_root() {
        let xml = r#"<WMT_MS_Capabilities version="1.0.8">
            <Capability><Layer><SRS>EPSG:4326</SRS><CRS>EPSG:3857</CRS></Layer></Capability>
        </WMT_MS_Capabilities>"#;
        let caps = read_str(xml).unwrap().unwrap();
        let layer = caps.root_layer().unwrap();
        assert_eq!(caps.version, "1.0.8");
        assert_eq!(layer.srs, vec!["EPSG:4326"]);
        assert!(layer.crs.is_empty());
    }

    #[test]
    fn test_forced_version() {
        let xml = r#"<WMS_Capabilities version="1.1.1">
            <Capability><Layer><CRS>EPSG:4326</CRS></Layer></Capability>
        </WMS_Capabilities>"#;
        let default = read_str(xml).unwrap().unwrap();
        assert!(default.root_layer().unwrap().crs.is_empty());

        let forced = WmsCapabilitiesReader::default()
            .with_version(WmsVersion::V1_3_0)
            .read_str(xml)
            .unwrap()
            .unwrap();
        assert_eq!(forced.root_layer().unwrap().crs, vec!["EPSG:4326"]);
        assert_eq!(forced.version, "1.1.1");
    }

    #[test]
    fn test_depth_limit_from_options() {
        let reader = WmsCapabilitiesReader::new(DecodeOptions::default().with_max_depth(2));
        let xml = r#"<WMS_Capabilities version="1.3.0"><Capability><Layer/></Capability></WMS_Capabilities>"#;
        assert!(matches!(
            reader.read_str(xml),
            Err(CapabilitiesError::DepthLimitExceeded { limit: 2 })
        ));
    }

    #[test]
    fn test_read_element() {
        let root = Element::new("WMS_Capabilities")
            .attr("version", "1.3.0")
            .child(Element::new("Service").child(Element::new("Title").text("Demo")));
        let caps = read_element(&root).unwrap();
        assert_eq!(
            caps.service.and_then(|s| s.title).as_deref(),
            Some("Demo")
        );
    }
}
