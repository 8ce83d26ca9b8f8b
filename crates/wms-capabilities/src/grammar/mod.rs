//! Grammar tables for the supported WMS revisions.
//!
//! Each revision gets one [`Grammar`]: a set of [`Table`]s, one per parsing
//! context, plus the layer inheritance rules. Grammars are built once on
//! first use and shared read-only between decodes.

mod common;
mod v1_1_1;
mod v1_3_0;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::engine::Table;
use crate::inherit::InheritanceRules;
use crate::model::{
    Attribution, Capability, ContactAddress, ContactInformation, ContactPerson, DcpType, Http,
    Layer, OnlineResource, Operation, Request, Service, Style, WmsCapabilities,
};

/// Root element of 1.1.x documents.
pub const LEGACY_ROOT: &str = "WMT_MS_Capabilities";

/// Root element of 1.3.x documents.
pub const CURRENT_ROOT: &str = "WMS_Capabilities";

static WMS_1_1_1: Lazy<Grammar> = Lazy::new(v1_1_1::grammar);
static WMS_1_3_0: Lazy<Grammar> = Lazy::new(v1_3_0::grammar);

/// Supported schema revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WmsVersion {
    V1_1_1,
    V1_3_0,
}

impl WmsVersion {
    pub const ALL: [WmsVersion; 2] = [WmsVersion::V1_1_1, WmsVersion::V1_3_0];

    /// The shared grammar for this revision.
    pub fn grammar(self) -> &'static Grammar {
        match self {
            WmsVersion::V1_1_1 => &WMS_1_1_1,
            WmsVersion::V1_3_0 => &WMS_1_3_0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WmsVersion::V1_1_1 => "1.1.1",
            WmsVersion::V1_3_0 => "1.3.0",
        }
    }

    /// Root element name documents of this revision use.
    pub fn root_element(self) -> &'static str {
        match self {
            WmsVersion::V1_1_1 => LEGACY_ROOT,
            WmsVersion::V1_3_0 => CURRENT_ROOT,
        }
    }

    /// Revision implied by a root element local name.
    pub fn from_root_element(local_name: &str) -> Option<Self> {
        match local_name {
            LEGACY_ROOT => Some(WmsVersion::V1_1_1),
            CURRENT_ROOT => Some(WmsVersion::V1_3_0),
            _ => None,
        }
    }

    /// Revision family of a `version` attribute value (`1.1.x` or `1.3.x`).
    pub fn from_version_attribute(version: &str) -> Option<Self> {
        let version = version.trim();
        if version.starts_with("1.3") {
            Some(WmsVersion::V1_3_0)
        } else if version.starts_with("1.1") {
            Some(WmsVersion::V1_1_1)
        } else {
            None
        }
    }
}

impl fmt::Display for WmsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WmsVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_version_attribute(s)
            .ok_or_else(|| format!("unsupported WMS version '{}', expected 1.1.1 or 1.3.0", s))
    }
}

/// The four `EX_GeographicBoundingBox` children as declared.
#[derive(Debug, Default)]
pub(crate) struct GeographicBounds {
    pub west: Option<f64>,
    pub east: Option<f64>,
    pub south: Option<f64>,
    pub north: Option<f64>,
}

/// Decoding tables for one revision, one per parsing context.
#[derive(Debug)]
pub struct Grammar {
    pub(crate) version: WmsVersion,
    pub(crate) inheritance: InheritanceRules,
    pub(crate) document: Table<WmsCapabilities>,
    pub(crate) service: Table<Service>,
    pub(crate) keyword_list: Table<Vec<String>>,
    pub(crate) contact_information: Table<ContactInformation>,
    pub(crate) contact_person: Table<ContactPerson>,
    pub(crate) contact_address: Table<ContactAddress>,
    pub(crate) capability: Table<Capability>,
    pub(crate) request: Table<Request>,
    pub(crate) exception: Table<Vec<String>>,
    pub(crate) operation: Table<Operation>,
    pub(crate) dcp_type: Table<DcpType>,
    pub(crate) http: Table<Http>,
    pub(crate) online_resource: Table<OnlineResource>,
    /// A layer's own children, nested layers excluded
    pub(crate) layer: Table<Layer>,
    /// Nested layers only, decoded after the enclosing layer is resolved
    pub(crate) nested_layers: Table<Vec<Layer>>,
    pub(crate) attribution: Table<Attribution>,
    pub(crate) geographic_bounding_box: Table<GeographicBounds>,
    pub(crate) style: Table<Style>,
}

impl Grammar {
    pub fn version(&self) -> WmsVersion {
        self.version
    }

    /// Layer inheritance rules of this revision.
    pub fn inheritance(&self) -> &InheritanceRules {
        &self.inheritance
    }

    /// Table for the top-level children of the root element.
    pub fn document(&self) -> &Table<WmsCapabilities> {
        &self.document
    }

    pub fn service(&self) -> &Table<Service> {
        &self.service
    }

    pub fn capability(&self) -> &Table<Capability> {
        &self.capability
    }

    pub fn request(&self) -> &Table<Request> {
        &self.request
    }

    pub fn layer(&self) -> &Table<Layer> {
        &self.layer
    }

    pub fn style(&self) -> &Table<Style> {
        &self.style
    }
}
