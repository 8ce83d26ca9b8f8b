//! Readers and tables shared by both revisions.
//!
//! The per-revision modules start from the `*_table` builders here and add
//! their own entries.

use tracing::trace;

use super::{GeographicBounds, Grammar};
use crate::engine::{push_parse_and_pop, pusher, setter, string_pusher, Context, Frame, Table};
use crate::inherit::{self, LayerAttributes};
use crate::model::{
    Attribution, AuthorityUrl, BoundingBox, Capability, ContactAddress, ContactInformation,
    ContactPerson, DcpType, Http, Layer, MetadataUrl, OnlineResource, Operation, Request, Service,
    SizedOnlineResource, Style, WmsCapabilities,
};
use crate::xml::Element;
use crate::xsd;

// Leaf readers

pub(crate) fn text(node: &Element, _ctx: &Context<'_>) -> Option<String> {
    xsd::read_string(Some(node.text_content().as_str()))
}

pub(crate) fn decimal(node: &Element, _ctx: &Context<'_>) -> Option<f64> {
    xsd::read_decimal(&node.text_content())
}

pub(crate) fn non_negative_integer(node: &Element, _ctx: &Context<'_>) -> Option<u64> {
    xsd::read_non_negative_integer(&node.text_content())
}

pub(crate) fn href(node: &Element, _ctx: &Context<'_>) -> Option<String> {
    xsd::read_href(node)
}

// Structured readers

fn grammar<'a>(ctx: &Context<'a>) -> &'a Grammar {
    ctx.grammar()
}

pub(crate) fn read_service(node: &Element, ctx: &Context<'_>) -> Option<Service> {
    Some(push_parse_and_pop(Service::default(), &grammar(ctx).service, node, ctx))
}

pub(crate) fn read_keyword_list(node: &Element, ctx: &Context<'_>) -> Option<Vec<String>> {
    Some(push_parse_and_pop(Vec::new(), &grammar(ctx).keyword_list, node, ctx))
}

pub(crate) fn read_contact_information(
    node: &Element,
    ctx: &Context<'_>,
) -> Option<ContactInformation> {
    Some(push_parse_and_pop(
        ContactInformation::default(),
        &grammar(ctx).contact_information,
        node,
        ctx,
    ))
}

pub(crate) fn read_contact_person(node: &Element, ctx: &Context<'_>) -> Option<ContactPerson> {
    Some(push_parse_and_pop(
        ContactPerson::default(),
        &grammar(ctx).contact_person,
        node,
        ctx,
    ))
}

pub(crate) fn read_contact_address(node: &Element, ctx: &Context<'_>) -> Option<ContactAddress> {
    Some(push_parse_and_pop(
        ContactAddress::default(),
        &grammar(ctx).contact_address,
        node,
        ctx,
    ))
}

pub(crate) fn read_capability(node: &Element, ctx: &Context<'_>) -> Option<Capability> {
    Some(push_parse_and_pop(
        Capability::default(),
        &grammar(ctx).capability,
        node,
        ctx,
    ))
}

pub(crate) fn read_request(node: &Element, ctx: &Context<'_>) -> Option<Request> {
    Some(push_parse_and_pop(Request::default(), &grammar(ctx).request, node, ctx))
}

pub(crate) fn read_exception(node: &Element, ctx: &Context<'_>) -> Option<Vec<String>> {
    Some(push_parse_and_pop(Vec::new(), &grammar(ctx).exception, node, ctx))
}

pub(crate) fn read_operation(node: &Element, ctx: &Context<'_>) -> Option<Operation> {
    Some(push_parse_and_pop(
        Operation::default(),
        &grammar(ctx).operation,
        node,
        ctx,
    ))
}

pub(crate) fn read_dcp_type(node: &Element, ctx: &Context<'_>) -> Option<DcpType> {
    Some(push_parse_and_pop(DcpType::default(), &grammar(ctx).dcp_type, node, ctx))
}

pub(crate) fn read_http(node: &Element, ctx: &Context<'_>) -> Option<Http> {
    Some(push_parse_and_pop(Http::default(), &grammar(ctx).http, node, ctx))
}

pub(crate) fn read_online_resource(node: &Element, ctx: &Context<'_>) -> Option<OnlineResource> {
    Some(push_parse_and_pop(
        OnlineResource::default(),
        &grammar(ctx).online_resource,
        node,
        ctx,
    ))
}

/// `LegendURL` and `LogoURL`: an online resource with `width`/`height`.
pub(crate) fn read_sized_online_resource(
    node: &Element,
    ctx: &Context<'_>,
) -> Option<SizedOnlineResource> {
    let resource = read_online_resource(node, ctx)?;
    Some(SizedOnlineResource {
        format: resource.format,
        online_resource: resource.online_resource,
        size: [
            xsd::non_negative_integer_attribute(node, "width"),
            xsd::non_negative_integer_attribute(node, "height"),
        ],
    })
}

pub(crate) fn read_authority_url(node: &Element, ctx: &Context<'_>) -> Option<AuthorityUrl> {
    let resource = read_online_resource(node, ctx)?;
    Some(AuthorityUrl {
        name: xsd::string_attribute(node, "name"),
        format: resource.format,
        online_resource: resource.online_resource,
    })
}

pub(crate) fn read_metadata_url(node: &Element, ctx: &Context<'_>) -> Option<MetadataUrl> {
    let resource = read_online_resource(node, ctx)?;
    Some(MetadataUrl {
        metadata_type: xsd::string_attribute(node, "type"),
        format: resource.format,
        online_resource: resource.online_resource,
    })
}

pub(crate) fn read_attribution(node: &Element, ctx: &Context<'_>) -> Option<Attribution> {
    Some(push_parse_and_pop(
        Attribution::default(),
        &grammar(ctx).attribution,
        node,
        ctx,
    ))
}

pub(crate) fn read_style(node: &Element, ctx: &Context<'_>) -> Option<Style> {
    Some(push_parse_and_pop(Style::default(), &grammar(ctx).style, node, ctx))
}

/// Extent and resolution are read coordinate by coordinate; a missing or
/// malformed attribute leaves its own slot empty.
pub(crate) fn read_bounding_box(node: &Element, _ctx: &Context<'_>) -> Option<BoundingBox> {
    Some(BoundingBox {
        crs: xsd::string_attribute(node, "CRS"),
        srs: xsd::string_attribute(node, "SRS"),
        extent: corner_attributes(node),
        res: [
            xsd::decimal_attribute(node, "resx"),
            xsd::decimal_attribute(node, "resy"),
        ],
    })
}

pub(crate) fn corner_attributes(node: &Element) -> [Option<f64>; 4] {
    [
        xsd::decimal_attribute(node, "minx"),
        xsd::decimal_attribute(node, "miny"),
        xsd::decimal_attribute(node, "maxx"),
        xsd::decimal_attribute(node, "maxy"),
    ]
}

/// `[west, south, east, north]`, only when all four bounds are valid.
pub(crate) fn read_ex_geographic_bounding_box(
    node: &Element,
    ctx: &Context<'_>,
) -> Option<[f64; 4]> {
    let bounds = push_parse_and_pop(
        GeographicBounds::default(),
        &grammar(ctx).geographic_bounding_box,
        node,
        ctx,
    );
    Some([bounds.west?, bounds.south?, bounds.east?, bounds.north?])
}

/// Decode a `Layer` element and everything nested in it.
///
/// The layer's own children and attributes are decoded first and resolved
/// against the nearest enclosing layer on the context stack (an empty layer
/// at the top of the tree). The resolved layer is then pushed so nested
/// layers inherit from it.
pub(crate) fn read_layer(node: &Element, ctx: &Context<'_>) -> Option<Layer> {
    let grammar = grammar(ctx);
    let root = Layer::default();
    let parent = ctx.parent_layer().unwrap_or(&root);

    let mut layer = push_parse_and_pop(Layer::default(), &grammar.layer, node, ctx);
    inherit::resolve(
        &mut layer,
        LayerAttributes::from_element(node),
        parent,
        &grammar.inheritance,
    );

    let scope = ctx.push(Frame::Layer(&layer));
    let nested = push_parse_and_pop(Vec::new(), &grammar.nested_layers, node, &scope);
    trace!(
        name = ?layer.name,
        depth = ctx.depth(),
        nested = nested.len(),
        "Resolved layer"
    );
    layer.layer = nested;
    Some(layer)
}

// Tables

pub(crate) fn document_table() -> Table<WmsCapabilities> {
    Table::new()
        .with("Service", setter(|d: &mut WmsCapabilities| &mut d.service, read_service))
        .with(
            "Capability",
            setter(|d: &mut WmsCapabilities| &mut d.capability, read_capability),
        )
}

pub(crate) fn service_table() -> Table<Service> {
    Table::new()
        .with("Name", setter(|s: &mut Service| &mut s.name, text))
        .with("Title", setter(|s: &mut Service| &mut s.title, text))
        .with("Abstract", setter(|s: &mut Service| &mut s.abstract_text, text))
        .with(
            "KeywordList",
            setter(|s: &mut Service| &mut s.keyword_list, read_keyword_list),
        )
        .with(
            "OnlineResource",
            setter(|s: &mut Service| &mut s.online_resource, href),
        )
        .with(
            "ContactInformation",
            setter(
                |s: &mut Service| &mut s.contact_information,
                read_contact_information,
            ),
        )
        .with("Fees", setter(|s: &mut Service| &mut s.fees, text))
        .with(
            "AccessConstraints",
            setter(|s: &mut Service| &mut s.access_constraints, text),
        )
}

pub(crate) fn keyword_list_table() -> Table<Vec<String>> {
    Table::new().with("Keyword", string_pusher(|list: &mut Vec<String>| list))
}

pub(crate) fn contact_information_table() -> Table<ContactInformation> {
    Table::new()
        .with(
            "ContactPersonPrimary",
            setter(
                |c: &mut ContactInformation| &mut c.contact_person_primary,
                read_contact_person,
            ),
        )
        .with(
            "ContactPosition",
            setter(|c: &mut ContactInformation| &mut c.contact_position, text),
        )
        .with(
            "ContactAddress",
            setter(
                |c: &mut ContactInformation| &mut c.contact_address,
                read_contact_address,
            ),
        )
        .with(
            "ContactVoiceTelephone",
            setter(|c: &mut ContactInformation| &mut c.contact_voice_telephone, text),
        )
        .with(
            "ContactFacsimileTelephone",
            setter(
                |c: &mut ContactInformation| &mut c.contact_facsimile_telephone,
                text,
            ),
        )
        .with(
            "ContactElectronicMailAddress",
            setter(
                |c: &mut ContactInformation| &mut c.contact_electronic_mail_address,
                text,
            ),
        )
}

pub(crate) fn contact_person_table() -> Table<ContactPerson> {
    Table::new()
        .with(
            "ContactPerson",
            setter(|p: &mut ContactPerson| &mut p.contact_person, text),
        )
        .with(
            "ContactOrganization",
            setter(|p: &mut ContactPerson| &mut p.contact_organization, text),
        )
}

pub(crate) fn contact_address_table() -> Table<ContactAddress> {
    Table::new()
        .with("AddressType", setter(|a: &mut ContactAddress| &mut a.address_type, text))
        .with("Address", setter(|a: &mut ContactAddress| &mut a.address, text))
        .with("City", setter(|a: &mut ContactAddress| &mut a.city, text))
        .with(
            "StateOrProvince",
            setter(|a: &mut ContactAddress| &mut a.state_or_province, text),
        )
        .with("PostCode", setter(|a: &mut ContactAddress| &mut a.post_code, text))
        .with("Country", setter(|a: &mut ContactAddress| &mut a.country, text))
}

pub(crate) fn capability_table() -> Table<Capability> {
    Table::new()
        .with("Request", setter(|c: &mut Capability| &mut c.request, read_request))
        .with(
            "Exception",
            setter(|c: &mut Capability| &mut c.exception, read_exception),
        )
        .with("Layer", setter(|c: &mut Capability| &mut c.layer, read_layer))
}

pub(crate) fn request_table() -> Table<Request> {
    Table::new()
        .with(
            "GetCapabilities",
            setter(|r: &mut Request| &mut r.get_capabilities, read_operation),
        )
        .with("GetMap", setter(|r: &mut Request| &mut r.get_map, read_operation))
        .with(
            "GetFeatureInfo",
            setter(|r: &mut Request| &mut r.get_feature_info, read_operation),
        )
}

pub(crate) fn exception_table() -> Table<Vec<String>> {
    Table::new().with("Format", string_pusher(|formats: &mut Vec<String>| formats))
}

pub(crate) fn operation_table() -> Table<Operation> {
    Table::new()
        .with("Format", string_pusher(|o: &mut Operation| &mut o.format))
        .with("DCPType", pusher(|o: &mut Operation| &mut o.dcp_type, read_dcp_type))
}

pub(crate) fn dcp_type_table() -> Table<DcpType> {
    Table::new().with("HTTP", setter(|d: &mut DcpType| &mut d.http, read_http))
}

pub(crate) fn http_table() -> Table<Http> {
    Table::new()
        .with("Get", setter(|h: &mut Http| &mut h.get, read_online_resource))
        .with("Post", setter(|h: &mut Http| &mut h.post, read_online_resource))
}

pub(crate) fn online_resource_table() -> Table<OnlineResource> {
    Table::new()
        .with("Format", setter(|r: &mut OnlineResource| &mut r.format, text))
        .with(
            "OnlineResource",
            setter(|r: &mut OnlineResource| &mut r.online_resource, href),
        )
}

/// Entries present in the layer table of every revision.
pub(crate) fn layer_table() -> Table<Layer> {
    Table::new()
        .with("Name", setter(|l: &mut Layer| &mut l.name, text))
        .with("Title", setter(|l: &mut Layer| &mut l.title, text))
        .with("Abstract", setter(|l: &mut Layer| &mut l.abstract_text, text))
        .with(
            "KeywordList",
            setter(|l: &mut Layer| &mut l.keyword_list, read_keyword_list),
        )
        .with(
            "BoundingBox",
            pusher(|l: &mut Layer| &mut l.bounding_box, read_bounding_box),
        )
        .with(
            "Attribution",
            setter(|l: &mut Layer| &mut l.attribution, read_attribution),
        )
        .with(
            "AuthorityURL",
            pusher(|l: &mut Layer| &mut l.authority_url, read_authority_url),
        )
        .with("Identifier", string_pusher(|l: &mut Layer| &mut l.identifier))
        .with(
            "MetadataURL",
            pusher(|l: &mut Layer| &mut l.metadata_url, read_metadata_url),
        )
        .with(
            "DataURL",
            pusher(|l: &mut Layer| &mut l.data_url, read_online_resource),
        )
        .with(
            "FeatureListURL",
            pusher(|l: &mut Layer| &mut l.feature_list_url, read_online_resource),
        )
        .with("Style", pusher(|l: &mut Layer| &mut l.style, read_style))
}

pub(crate) fn nested_layers_table() -> Table<Vec<Layer>> {
    Table::new().with("Layer", pusher(|layers: &mut Vec<Layer>| layers, read_layer))
}

pub(crate) fn attribution_table() -> Table<Attribution> {
    Table::new()
        .with("Title", setter(|a: &mut Attribution| &mut a.title, text))
        .with(
            "OnlineResource",
            setter(|a: &mut Attribution| &mut a.online_resource, href),
        )
        .with(
            "LogoURL",
            setter(|a: &mut Attribution| &mut a.logo_url, read_sized_online_resource),
        )
}

pub(crate) fn geographic_bounding_box_table() -> Table<GeographicBounds> {
    Table::new()
        .with(
            "westBoundLongitude",
            setter(|b: &mut GeographicBounds| &mut b.west, decimal),
        )
        .with(
            "eastBoundLongitude",
            setter(|b: &mut GeographicBounds| &mut b.east, decimal),
        )
        .with(
            "southBoundLatitude",
            setter(|b: &mut GeographicBounds| &mut b.south, decimal),
        )
        .with(
            "northBoundLatitude",
            setter(|b: &mut GeographicBounds| &mut b.north, decimal),
        )
}

pub(crate) fn style_table() -> Table<Style> {
    Table::new()
        .with("Name", setter(|s: &mut Style| &mut s.name, text))
        .with("Title", setter(|s: &mut Style| &mut s.title, text))
        .with("Abstract", setter(|s: &mut Style| &mut s.abstract_text, text))
        .with(
            "LegendURL",
            pusher(|s: &mut Style| &mut s.legend_url, read_sized_online_resource),
        )
        .with(
            "StyleSheetURL",
            setter(|s: &mut Style| &mut s.style_sheet_url, read_online_resource),
        )
        .with(
            "StyleURL",
            setter(|s: &mut Style| &mut s.style_url, read_online_resource),
        )
}
