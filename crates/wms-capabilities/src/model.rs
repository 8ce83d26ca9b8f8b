//! Decoded capabilities structures.
//!
//! Field names serialize to the element and attribute names used by the
//! capabilities schema, so the JSON form of a decoded document reads like the
//! XML it came from. Absent values and empty lists are omitted.

use serde::{Deserialize, Serialize};

/// Top-level decoded capabilities document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WmsCapabilities {
    /// Trimmed `version` attribute of the root element
    pub version: String,

    #[serde(rename = "Service", default, skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,

    #[serde(rename = "Capability", default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<Capability>,
}

impl WmsCapabilities {
    /// The root of the layer tree, if the document advertised one.
    pub fn root_layer(&self) -> Option<&Layer> {
        self.capability.as_ref().and_then(|c| c.layer.as_ref())
    }

    /// All layers in depth-first document order.
    pub fn layers(&self) -> Vec<&Layer> {
        self.root_layer().map(Layer::descendants).unwrap_or_default()
    }

    /// Find the first layer with the given `Name`.
    pub fn find_layer(&self, name: &str) -> Option<&Layer> {
        self.layers()
            .into_iter()
            .find(|layer| layer.name.as_deref() == Some(name))
    }

    /// Format as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// General service metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_list: Option<Vec<String>>,
    /// Service home page (`xlink:href`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<ContactInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_constraints: Option<String>,
    /// 1.3.0 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_limit: Option<u64>,
    /// 1.3.0 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u64>,
    /// 1.3.0 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContactInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person_primary: Option<ContactPerson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_address: Option<ContactAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_voice_telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_facsimile_telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_electronic_mail_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContactPerson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_organization: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContactAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Operations, exception formats and the layer tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Capability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    /// Exception formats
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<Vec<String>>,
    /// Root of the layer tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
    /// 1.1.1 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_defined_symbolization: Option<UserDefinedSymbolization>,
}

/// SLD support flags advertised by 1.1.1 servers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDefinedSymbolization {
    #[serde(rename = "SupportSLD", skip_serializing_if = "Option::is_none")]
    pub support_sld: Option<bool>,
    #[serde(rename = "UserLayer", skip_serializing_if = "Option::is_none")]
    pub user_layer: Option<bool>,
    #[serde(rename = "UserStyle", skip_serializing_if = "Option::is_none")]
    pub user_style: Option<bool>,
    #[serde(rename = "RemoteWFS", skip_serializing_if = "Option::is_none")]
    pub remote_wfs: Option<bool>,
}

/// Request operations keyed by operation element name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_capabilities: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_map: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_feature_info: Option<Operation>,
    /// 1.1.1 SLD operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub describe_layer: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_legend_graphic: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_styles: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put_styles: Option<Operation>,
}

impl Request {
    /// Declared operations as `(element name, operation)` pairs.
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        [
            ("GetCapabilities", &self.get_capabilities),
            ("GetMap", &self.get_map),
            ("GetFeatureInfo", &self.get_feature_info),
            ("DescribeLayer", &self.describe_layer),
            ("GetLegendGraphic", &self.get_legend_graphic),
            ("GetStyles", &self.get_styles),
            ("PutStyles", &self.put_styles),
        ]
        .into_iter()
        .filter_map(|(name, op)| op.as_ref().map(|op| (name, op)))
        .collect()
    }
}

/// A request type: supported formats and the endpoints serving it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub format: Vec<String>,
    #[serde(rename = "DCPType", skip_serializing_if = "Vec::is_empty")]
    pub dcp_type: Vec<DcpType>,
}

impl Operation {
    /// First advertised GET endpoint.
    pub fn get_url(&self) -> Option<&str> {
        self.dcp_type
            .iter()
            .filter_map(|dcp| dcp.http.as_ref())
            .filter_map(|http| http.get.as_ref())
            .find_map(|resource| resource.online_resource.as_deref())
    }

    /// First advertised POST endpoint.
    pub fn post_url(&self) -> Option<&str> {
        self.dcp_type
            .iter()
            .filter_map(|dcp| dcp.http.as_ref())
            .filter_map(|http| http.post.as_ref())
            .find_map(|resource| resource.online_resource.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcpType {
    #[serde(rename = "HTTP", skip_serializing_if = "Option::is_none")]
    pub http: Option<Http>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Http {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<OnlineResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<OnlineResource>,
}

/// A `Format` plus `OnlineResource` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OnlineResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<String>,
}

/// An online resource with pixel dimensions (legends and logos).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SizedOnlineResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<String>,
    /// `[width, height]`
    #[serde(rename = "size")]
    pub size: [Option<u64>; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AuthorityUrl {
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MetadataUrl {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metadata_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Attribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<String>,
    #[serde(rename = "LogoURL", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<SizedOnlineResource>,
}

/// A bounding box in a named reference system.
///
/// Each coordinate is independently optional: a malformed or missing
/// attribute leaves its slot empty instead of defaulting to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    /// 1.3.0 `CRS` attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,
    /// 1.1.1 `SRS` attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srs: Option<String>,
    /// `[minx, miny, maxx, maxy]`
    pub extent: [Option<f64>; 4],
    /// `[resx, resy]`
    pub res: [Option<f64>; 2],
}

/// The 1.1.1 geographic extent, always in EPSG:4326.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatLonBoundingBox {
    pub srs: String,
    pub extent: [Option<f64>; 4],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dimension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_values: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
}

/// Valid values along a dimension (1.1.1 `Extent`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DimensionExtent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
}

/// 1.1.1 scale hint, in ground distance per pixel diagonal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleHint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(rename = "LegendURL", skip_serializing_if = "Vec::is_empty")]
    pub legend_url: Vec<SizedOnlineResource>,
    #[serde(rename = "StyleSheetURL", skip_serializing_if = "Option::is_none")]
    pub style_sheet_url: Option<OnlineResource>,
    #[serde(rename = "StyleURL", skip_serializing_if = "Option::is_none")]
    pub style_url: Option<OnlineResource>,
}

/// A layer with its inherited properties already resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Layer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_list: Option<Vec<String>>,
    /// 1.3.0 reference systems
    #[serde(rename = "CRS", skip_serializing_if = "Vec::is_empty")]
    pub crs: Vec<String>,
    /// 1.1.1 reference systems
    #[serde(rename = "SRS", skip_serializing_if = "Vec::is_empty")]
    pub srs: Vec<String>,
    /// `[west, south, east, north]` (1.3.0)
    #[serde(rename = "EX_GeographicBoundingBox", skip_serializing_if = "Option::is_none")]
    pub ex_geographic_bounding_box: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_lon_bounding_box: Option<LatLonBoundingBox>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bounding_box: Vec<BoundingBox>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimension: Vec<Dimension>,
    /// 1.1.1 dimension extents
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extent: Vec<DimensionExtent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
    #[serde(rename = "AuthorityURL", skip_serializing_if = "Vec::is_empty")]
    pub authority_url: Vec<AuthorityUrl>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<String>,
    #[serde(rename = "MetadataURL", skip_serializing_if = "Vec::is_empty")]
    pub metadata_url: Vec<MetadataUrl>,
    #[serde(rename = "DataURL", skip_serializing_if = "Vec::is_empty")]
    pub data_url: Vec<OnlineResource>,
    #[serde(rename = "FeatureListURL", skip_serializing_if = "Vec::is_empty")]
    pub feature_list_url: Vec<OnlineResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<Style>,
    /// 1.1.1 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_hint: Option<ScaleHint>,
    /// 1.3.0 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_scale_denominator: Option<f64>,
    /// 1.3.0 only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_scale_denominator: Option<f64>,

    // Attribute flags, resolved against ancestors.
    #[serde(rename = "queryable")]
    pub queryable: bool,
    #[serde(rename = "cascaded", skip_serializing_if = "Option::is_none")]
    pub cascaded: Option<u64>,
    #[serde(rename = "opaque")]
    pub opaque: bool,
    #[serde(rename = "noSubsets")]
    pub no_subsets: bool,
    #[serde(rename = "fixedWidth", skip_serializing_if = "Option::is_none")]
    pub fixed_width: Option<u64>,
    #[serde(rename = "fixedHeight", skip_serializing_if = "Option::is_none")]
    pub fixed_height: Option<u64>,

    /// Child layers in document order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layer: Vec<Layer>,
}

impl Layer {
    /// This layer and all nested layers, depth-first in document order.
    pub fn descendants(&self) -> Vec<&Layer> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(layer) = pending.pop() {
            out.push(layer);
            pending.extend(layer.layer.iter().rev());
        }
        out
    }

    /// Layers that can be requested by name in GetMap.
    pub fn is_named(&self) -> bool {
        self.name.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// Reference system identifiers regardless of revision.
    pub fn reference_systems(&self) -> impl Iterator<Item = &str> {
        self.crs.iter().chain(self.srs.iter()).map(String::as_str)
    }
}
