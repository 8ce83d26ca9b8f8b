//! WMS 1.1.1 (`WMT_MS_Capabilities`).
//!
//! Differs from 1.3.0 in using `SRS` instead of `CRS`, a `LatLonBoundingBox`
//! in place of `EX_GeographicBoundingBox`, dimension values carried by
//! separate `Extent` elements, `ScaleHint` instead of scale denominators, and
//! the extra SLD request types and symbolization flags.

use super::common::{self, corner_attributes, read_operation};
use super::{Grammar, WmsVersion};
use crate::engine::{pusher, setter, string_pusher, Context, Table};
use crate::inherit::WMS_1_1_1_RULES;
use crate::model::{
    Capability, Dimension, DimensionExtent, LatLonBoundingBox, Layer, Request, ScaleHint,
    UserDefinedSymbolization,
};
use crate::xml::Element;
use crate::xsd;

/// Reference system of every `LatLonBoundingBox`.
pub(crate) const LAT_LON_SRS: &str = "EPSG:4326";

pub(super) fn grammar() -> Grammar {
    Grammar {
        version: WmsVersion::V1_1_1,
        inheritance: WMS_1_1_1_RULES,
        document: common::document_table(),
        service: common::service_table(),
        keyword_list: common::keyword_list_table(),
        contact_information: common::contact_information_table(),
        contact_person: common::contact_person_table(),
        contact_address: common::contact_address_table(),
        capability: common::capability_table().with(
            "UserDefinedSymbolization",
            setter(
                |c: &mut Capability| &mut c.user_defined_symbolization,
                read_user_defined_symbolization,
            ),
        ),
        request: common::request_table()
            .with(
                "DescribeLayer",
                setter(|r: &mut Request| &mut r.describe_layer, read_operation),
            )
            .with(
                "GetLegendGraphic",
                setter(|r: &mut Request| &mut r.get_legend_graphic, read_operation),
            )
            .with(
                "GetStyles",
                setter(|r: &mut Request| &mut r.get_styles, read_operation),
            )
            .with(
                "PutStyles",
                setter(|r: &mut Request| &mut r.put_styles, read_operation),
            ),
        exception: common::exception_table(),
        operation: common::operation_table(),
        dcp_type: common::dcp_type_table(),
        http: common::http_table(),
        online_resource: common::online_resource_table(),
        layer: common::layer_table()
            .with("SRS", string_pusher(|l: &mut Layer| &mut l.srs))
            .with(
                "LatLonBoundingBox",
                setter(
                    |l: &mut Layer| &mut l.lat_lon_bounding_box,
                    read_lat_lon_bounding_box,
                ),
            )
            .with("Dimension", pusher(|l: &mut Layer| &mut l.dimension, read_dimension))
            .with("Extent", pusher(|l: &mut Layer| &mut l.extent, read_extent))
            .with(
                "ScaleHint",
                setter(|l: &mut Layer| &mut l.scale_hint, read_scale_hint),
            ),
        nested_layers: common::nested_layers_table(),
        attribution: common::attribution_table(),
        // EX_GeographicBoundingBox does not exist before 1.3.0
        geographic_bounding_box: Table::new(),
        style: common::style_table(),
    }
}

fn read_lat_lon_bounding_box(node: &Element, _ctx: &Context<'_>) -> Option<LatLonBoundingBox> {
    Some(LatLonBoundingBox {
        srs: LAT_LON_SRS.to_string(),
        extent: corner_attributes(node),
    })
}

/// 1.1.1 dimensions only declare the axis; values live in `Extent`.
fn read_dimension(node: &Element, _ctx: &Context<'_>) -> Option<Dimension> {
    Some(Dimension {
        name: xsd::string_attribute(node, "name"),
        units: xsd::string_attribute(node, "units"),
        unit_symbol: xsd::string_attribute(node, "unitSymbol"),
        ..Default::default()
    })
}

fn read_extent(node: &Element, _ctx: &Context<'_>) -> Option<DimensionExtent> {
    let values = node.text_content();
    let values = values.trim();
    Some(DimensionExtent {
        name: xsd::string_attribute(node, "name"),
        default: xsd::string_attribute(node, "default"),
        nearest_value: xsd::boolean_attribute(node, "nearestValue"),
        values: (!values.is_empty()).then(|| values.to_string()),
    })
}

fn read_scale_hint(node: &Element, _ctx: &Context<'_>) -> Option<ScaleHint> {
    Some(ScaleHint {
        min: xsd::decimal_attribute(node, "min"),
        max: xsd::decimal_attribute(node, "max"),
    })
}

fn read_user_defined_symbolization(
    node: &Element,
    _ctx: &Context<'_>,
) -> Option<UserDefinedSymbolization> {
    Some(UserDefinedSymbolization {
        support_sld: xsd::boolean_attribute(node, "SupportSLD"),
        user_layer: xsd::boolean_attribute(node, "UserLayer"),
        user_style: xsd::boolean_attribute(node, "UserStyle"),
        remote_wfs: xsd::boolean_attribute(node, "RemoteWFS"),
    })
}
