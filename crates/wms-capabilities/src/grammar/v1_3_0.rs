//! WMS 1.3.0 (`WMS_Capabilities`).

use super::common::{self, decimal, non_negative_integer, read_ex_geographic_bounding_box};
use super::{Grammar, WmsVersion};
use crate::engine::{pusher, setter, string_pusher, Context};
use crate::inherit::WMS_1_3_0_RULES;
use crate::model::{Dimension, Layer, Service};
use crate::xml::Element;
use crate::xsd;

pub(super) fn grammar() -> Grammar {
    Grammar {
        version: WmsVersion::V1_3_0,
        inheritance: WMS_1_3_0_RULES,
        document: common::document_table(),
        service: common::service_table()
            .with(
                "LayerLimit",
                setter(|s: &mut Service| &mut s.layer_limit, non_negative_integer),
            )
            .with(
                "MaxWidth",
                setter(|s: &mut Service| &mut s.max_width, non_negative_integer),
            )
            .with(
                "MaxHeight",
                setter(|s: &mut Service| &mut s.max_height, non_negative_integer),
            ),
        keyword_list: common::keyword_list_table(),
        contact_information: common::contact_information_table(),
        contact_person: common::contact_person_table(),
        contact_address: common::contact_address_table(),
        capability: common::capability_table(),
        request: common::request_table(),
        exception: common::exception_table(),
        operation: common::operation_table(),
        dcp_type: common::dcp_type_table(),
        http: common::http_table(),
        online_resource: common::online_resource_table(),
        layer: common::layer_table()
            .with("CRS", string_pusher(|l: &mut Layer| &mut l.crs))
            .with(
                "EX_GeographicBoundingBox",
                setter(
                    |l: &mut Layer| &mut l.ex_geographic_bounding_box,
                    read_ex_geographic_bounding_box,
                ),
            )
            .with("Dimension", pusher(|l: &mut Layer| &mut l.dimension, read_dimension))
            .with(
                "MinScaleDenominator",
                setter(|l: &mut Layer| &mut l.min_scale_denominator, decimal),
            )
            .with(
                "MaxScaleDenominator",
                setter(|l: &mut Layer| &mut l.max_scale_denominator, decimal),
            ),
        nested_layers: common::nested_layers_table(),
        attribution: common::attribution_table(),
        geographic_bounding_box: common::geographic_bounding_box_table(),
        style: common::style_table(),
    }
}

/// Dimension declaration with its values as element text.
fn read_dimension(node: &Element, _ctx: &Context<'_>) -> Option<Dimension> {
    let values = node.text_content();
    let values = values.trim();
    Some(Dimension {
        name: xsd::string_attribute(node, "name"),
        units: xsd::string_attribute(node, "units"),
        unit_symbol: xsd::string_attribute(node, "unitSymbol"),
        default: xsd::string_attribute(node, "default"),
        multiple_values: xsd::boolean_attribute(node, "multipleValues"),
        nearest_value: xsd::boolean_attribute(node, "nearestValue"),
        current: xsd::boolean_attribute(node, "current"),
        values: (!values.is_empty()).then(|| values.to_string()),
    })
}
