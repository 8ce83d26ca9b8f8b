//! Layer inheritance.
//!
//! A nested layer inherits from its nearest ancestor in three ways:
//!
//! - attribute flags keep the layer's own declaration and otherwise take the
//!   parent's resolved value (`queryable`, `opaque` and `noSubsets` end up
//!   `false` when nobody declared them);
//! - accumulating keys append the parent's resolved list after the layer's
//!   own entries;
//! - replace-if-absent keys copy the parent's whole value when the layer
//!   declares nothing.
//!
//! Which keys accumulate and which are replaced differs between schema
//! revisions, so those sets are data ([`InheritanceRules`]).

use crate::model::Layer;
use crate::xml::Element;
use crate::xsd;

/// Attribute flags exactly as a `Layer` element declares them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerAttributes {
    pub queryable: Option<bool>,
    pub cascaded: Option<u64>,
    pub opaque: Option<bool>,
    pub no_subsets: Option<bool>,
    pub fixed_width: Option<u64>,
    pub fixed_height: Option<u64>,
}

impl LayerAttributes {
    /// Read the declared flags of a `Layer` element. Lexically invalid values
    /// count as undeclared.
    pub fn from_element(node: &Element) -> Self {
        Self {
            queryable: xsd::boolean_attribute(node, "queryable"),
            cascaded: xsd::non_negative_integer_attribute(node, "cascaded"),
            opaque: xsd::boolean_attribute(node, "opaque"),
            no_subsets: xsd::boolean_attribute(node, "noSubsets"),
            fixed_width: xsd::non_negative_integer_attribute(node, "fixedWidth"),
            fixed_height: xsd::non_negative_integer_attribute(node, "fixedHeight"),
        }
    }
}

/// Inheritable child elements of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKey {
    Style,
    Crs,
    Srs,
    AuthorityUrl,
    ExGeographicBoundingBox,
    LatLonBoundingBox,
    BoundingBox,
    Dimension,
    Extent,
    Attribution,
    ScaleHint,
    MinScaleDenominator,
    MaxScaleDenominator,
}

impl LayerKey {
    /// Element name of the key.
    pub fn element_name(self) -> &'static str {
        match self {
            LayerKey::Style => "Style",
            LayerKey::Crs => "CRS",
            LayerKey::Srs => "SRS",
            LayerKey::AuthorityUrl => "AuthorityURL",
            LayerKey::ExGeographicBoundingBox => "EX_GeographicBoundingBox",
            LayerKey::LatLonBoundingBox => "LatLonBoundingBox",
            LayerKey::BoundingBox => "BoundingBox",
            LayerKey::Dimension => "Dimension",
            LayerKey::Extent => "Extent",
            LayerKey::Attribution => "Attribution",
            LayerKey::ScaleHint => "ScaleHint",
            LayerKey::MinScaleDenominator => "MinScaleDenominator",
            LayerKey::MaxScaleDenominator => "MaxScaleDenominator",
        }
    }

    /// Append the parent's entries after the child's own. Keys that are not
    /// lists are treated as replace-if-absent.
    fn accumulate(self, child: &mut Layer, parent: &Layer) {
        match self {
            LayerKey::Style => child.style.extend(parent.style.iter().cloned()),
            LayerKey::Crs => child.crs.extend(parent.crs.iter().cloned()),
            LayerKey::Srs => child.srs.extend(parent.srs.iter().cloned()),
            LayerKey::AuthorityUrl => child
                .authority_url
                .extend(parent.authority_url.iter().cloned()),
            LayerKey::BoundingBox => child
                .bounding_box
                .extend(parent.bounding_box.iter().cloned()),
            LayerKey::Dimension => child.dimension.extend(parent.dimension.iter().cloned()),
            LayerKey::Extent => child.extent.extend(parent.extent.iter().cloned()),
            LayerKey::ExGeographicBoundingBox
            | LayerKey::LatLonBoundingBox
            | LayerKey::Attribution
            | LayerKey::ScaleHint
            | LayerKey::MinScaleDenominator
            | LayerKey::MaxScaleDenominator => self.replace_if_absent(child, parent),
        }
    }

    /// Copy the parent's whole value when the child has none.
    fn replace_if_absent(self, child: &mut Layer, parent: &Layer) {
        fn fill_vec<T: Clone>(own: &mut Vec<T>, inherited: &[T]) {
            if own.is_empty() {
                own.extend_from_slice(inherited);
            }
        }

        fn fill<T: Clone>(own: &mut Option<T>, inherited: &Option<T>) {
            if own.is_none() {
                own.clone_from(inherited);
            }
        }

        match self {
            LayerKey::Style => fill_vec(&mut child.style, &parent.style),
            LayerKey::Crs => fill_vec(&mut child.crs, &parent.crs),
            LayerKey::Srs => fill_vec(&mut child.srs, &parent.srs),
            LayerKey::AuthorityUrl => fill_vec(&mut child.authority_url, &parent.authority_url),
            LayerKey::BoundingBox => fill_vec(&mut child.bounding_box, &parent.bounding_box),
            LayerKey::Dimension => fill_vec(&mut child.dimension, &parent.dimension),
            LayerKey::Extent => fill_vec(&mut child.extent, &parent.extent),
            LayerKey::ExGeographicBoundingBox => fill(
                &mut child.ex_geographic_bounding_box,
                &parent.ex_geographic_bounding_box,
            ),
            LayerKey::LatLonBoundingBox => {
                fill(&mut child.lat_lon_bounding_box, &parent.lat_lon_bounding_box)
            }
            LayerKey::Attribution => fill(&mut child.attribution, &parent.attribution),
            LayerKey::ScaleHint => fill(&mut child.scale_hint, &parent.scale_hint),
            LayerKey::MinScaleDenominator => {
                fill(&mut child.min_scale_denominator, &parent.min_scale_denominator)
            }
            LayerKey::MaxScaleDenominator => {
                fill(&mut child.max_scale_denominator, &parent.max_scale_denominator)
            }
        }
    }
}

/// Keys inherited by one schema revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InheritanceRules {
    /// Child entries first, then the parent's
    pub accumulate: &'static [LayerKey],
    /// Parent value copied verbatim when the child declares none
    pub replace: &'static [LayerKey],
}

impl InheritanceRules {
    /// True if `key` takes part in inheritance at all.
    pub fn inherits(&self, key: LayerKey) -> bool {
        self.accumulate.contains(&key) || self.replace.contains(&key)
    }
}

pub const WMS_1_1_1_RULES: InheritanceRules = InheritanceRules {
    accumulate: &[LayerKey::Style, LayerKey::Srs, LayerKey::AuthorityUrl],
    replace: &[
        LayerKey::BoundingBox,
        LayerKey::Dimension,
        LayerKey::Extent,
        LayerKey::Attribution,
    ],
};

pub const WMS_1_3_0_RULES: InheritanceRules = InheritanceRules {
    accumulate: &[LayerKey::Style, LayerKey::Crs, LayerKey::AuthorityUrl],
    replace: &[
        LayerKey::ExGeographicBoundingBox,
        LayerKey::BoundingBox,
        LayerKey::Dimension,
        LayerKey::Attribution,
        LayerKey::MinScaleDenominator,
        LayerKey::MaxScaleDenominator,
    ],
};

/// Resolve `layer` against its parent's already resolved state.
///
/// `layer` must hold only what its own element declared; nested layers are
/// not touched. At the top of the tree `parent` is an empty `Layer`.
pub fn resolve(
    layer: &mut Layer,
    declared: LayerAttributes,
    parent: &Layer,
    rules: &InheritanceRules,
) {
    layer.queryable = declared.queryable.unwrap_or(parent.queryable);
    layer.opaque = declared.opaque.unwrap_or(parent.opaque);
    layer.no_subsets = declared.no_subsets.unwrap_or(parent.no_subsets);
    layer.cascaded = declared.cascaded.or(parent.cascaded);
    layer.fixed_width = declared.fixed_width.or(parent.fixed_width);
    layer.fixed_height = declared.fixed_height.or(parent.fixed_height);

    for key in rules.accumulate {
        key.accumulate(layer, parent);
    }
    for key in rules.replace {
        key.replace_if_absent(layer, parent);
    }
}
