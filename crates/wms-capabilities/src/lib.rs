//! OGC WMS GetCapabilities decoder.
//!
//! Supports:
//! - WMS 1.1.1 (`WMT_MS_Capabilities`) and WMS 1.3.0 (`WMS_Capabilities`)
//! - Layer property inheritance down nested layer trees
//! - Best-effort decoding: missing or malformed fields are left empty
//!
//! ```
//! let xml = r#"<WMS_Capabilities version="1.3.0">
//!   <Capability>
//!     <Layer queryable="1">
//!       <Title>Root</Title>
//!       <Layer><Name>roads</Name></Layer>
//!     </Layer>
//!   </Capability>
//! </WMS_Capabilities>"#;
//!
//! let caps = wms_capabilities::read_str(xml).unwrap().unwrap();
//! assert!(caps.find_layer("roads").unwrap().queryable);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod inherit;
pub mod model;
pub mod reader;
pub mod xml;
pub mod xsd;

pub use config::DecodeOptions;
pub use error::{CapabilitiesError, CapabilitiesResult};
pub use grammar::{Grammar, WmsVersion};
pub use model::{
    Attribution, AuthorityUrl, BoundingBox, Capability, ContactAddress, ContactInformation,
    ContactPerson, DcpType, Dimension, DimensionExtent, Http, LatLonBoundingBox, Layer,
    MetadataUrl, OnlineResource, Operation, Request, ScaleHint, Service, SizedOnlineResource,
    Style, UserDefinedSymbolization, WmsCapabilities,
};
pub use reader::{read_bytes, read_element, read_str, WmsCapabilitiesReader};
