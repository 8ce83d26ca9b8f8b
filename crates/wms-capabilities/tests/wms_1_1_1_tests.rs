//! Decoding the bundled WMS 1.1.1 sample document.

use test_utils::WMS_1_1_1_CAPABILITIES;
use wms_capabilities::{read_bytes, Layer, WmsCapabilities};

fn decode() -> WmsCapabilities {
    read_bytes(WMS_1_1_1_CAPABILITIES.as_bytes())
        .expect("sample document decodes")
        .expect("sample document has a root element")
}

fn layer<'a>(caps: &'a WmsCapabilities, name: &str) -> &'a Layer {
    caps.find_layer(name)
        .unwrap_or_else(|| panic!("layer {name} not found"))
}

// ============================================================================
// Service and Capability
// ============================================================================

#[test]
fn test_service() {
    let caps = decode();
    assert_eq!(caps.version, "1.1.1");

    let service = caps.service.as_ref().unwrap();
    assert_eq!(service.name.as_deref(), Some("OGC:WMS"));
    assert_eq!(service.online_resource.as_deref(), Some("http://hostname/"));
    assert_eq!(service.layer_limit, None);

    let contact = service.contact_information.as_ref().unwrap();
    assert_eq!(
        contact.contact_facsimile_telephone.as_deref(),
        Some("+1 301 286-1777")
    );
}

#[test]
fn test_sld_requests() {
    let caps = decode();
    let request = caps
        .capability
        .as_ref()
        .and_then(|c| c.request.as_ref())
        .unwrap();

    assert_eq!(
        request.get_capabilities.as_ref().unwrap().format,
        vec!["application/vnd.ogc.wms_xml"]
    );
    assert_eq!(
        request.describe_layer.as_ref().unwrap().format,
        vec!["application/vnd.ogc.gml"]
    );
    assert_eq!(
        request.get_legend_graphic.as_ref().unwrap().get_url(),
        Some("http://hostname:port/legend?")
    );
    assert!(request.get_styles.is_none());
    assert!(request.put_styles.is_none());
    assert_eq!(request.operations().len(), 5);
}

#[test]
fn test_user_defined_symbolization() {
    let caps = decode();
    let capability = caps.capability.as_ref().unwrap();
    let flags = capability.user_defined_symbolization.unwrap();
    assert_eq!(flags.support_sld, Some(true));
    assert_eq!(flags.user_layer, Some(false));
    assert_eq!(flags.user_style, Some(true));
    assert_eq!(flags.remote_wfs, Some(false));
    assert_eq!(capability.exception.as_ref().map(Vec::len), Some(3));
}

// ============================================================================
// Layer tree
// ============================================================================

#[test]
fn test_reference_systems() {
    let caps = decode();
    let root = caps.root_layer().unwrap();
    assert_eq!(root.srs, vec!["EPSG:4326"]);
    assert!(root.crs.is_empty());

    let roads = layer(&caps, "ROADS_RIVERS");
    assert_eq!(roads.srs, vec!["EPSG:26986", "EPSG:4326"]);
    assert_eq!(
        roads.reference_systems().collect::<Vec<_>>(),
        vec!["EPSG:26986", "EPSG:4326"]
    );

    // Concatenation keeps duplicates.
    let weather = caps
        .layers()
        .into_iter()
        .find(|l| l.title.as_deref() == Some("Weather Forecast Data"))
        .unwrap();
    assert_eq!(weather.srs, vec!["EPSG:4326", "EPSG:4326"]);
}

#[test]
fn test_bounding_boxes() {
    let caps = decode();
    let roads = layer(&caps, "ROADS_RIVERS");

    let lat_lon = roads.lat_lon_bounding_box.as_ref().unwrap();
    assert_eq!(lat_lon.srs, "EPSG:4326");
    assert_eq!(
        lat_lon.extent,
        [Some(-71.63), Some(41.75), Some(-70.78), Some(42.90)]
    );

    assert_eq!(roads.bounding_box.len(), 2);
    assert_eq!(roads.bounding_box[0].srs.as_deref(), Some("EPSG:4326"));
    assert_eq!(roads.bounding_box[0].crs, None);
    assert_eq!(roads.bounding_box[1].res, [Some(1.0), Some(1.0)]);
    assert!(roads.ex_geographic_bounding_box.is_none());
}

#[test]
fn test_inheritance() {
    let caps = decode();
    let roads = layer(&caps, "ROADS_RIVERS");
    let roads_1m = layer(&caps, "ROADS_1M");

    let styles: Vec<_> = roads_1m.style.iter().filter_map(|s| s.name.as_deref()).collect();
    assert_eq!(styles, vec!["ATLAS", "USGS"]);
    assert_eq!(roads_1m.bounding_box, roads.bounding_box);
    assert_eq!(roads_1m.attribution, roads.attribution);
    assert_eq!(roads_1m.authority_url.len(), 1);

    // Geographic extent and scale hints belong to the declaring layer only.
    assert!(roads_1m.lat_lon_bounding_box.is_none());
    assert!(roads_1m.scale_hint.is_none());
    let hint = roads.scale_hint.unwrap();
    assert_eq!(hint.min, Some(4000.0));
    assert_eq!(hint.max, Some(35000.0));

    assert!(layer(&caps, "RIVERS_1M").queryable);
}

#[test]
fn test_dimensions_and_extents() {
    let caps = decode();

    let clouds = layer(&caps, "Clouds");
    assert!(clouds.queryable);
    assert_eq!(clouds.dimension.len(), 1);
    assert_eq!(clouds.dimension[0].units.as_deref(), Some("ISO8601"));
    assert_eq!(clouds.dimension[0].values, None);
    assert_eq!(clouds.extent.len(), 1);
    assert_eq!(
        clouds.extent[0].values.as_deref(),
        Some("1999-01-01/2000-08-22/P1D")
    );

    let pressure = layer(&caps, "Pressure");
    assert_eq!(pressure.dimension.len(), 2);
    assert_eq!(pressure.extent.len(), 2);
    let elevation = &pressure.extent[1];
    assert_eq!(elevation.name.as_deref(), Some("elevation"));
    assert_eq!(elevation.default.as_deref(), Some("0"));
    assert_eq!(elevation.nearest_value, Some(false));

    let ozone = layer(&caps, "ozone_image");
    assert_eq!(ozone.extent.len(), 1);
    assert_eq!(ozone.extent[0].default.as_deref(), Some("1992"));
}

#[test]
fn test_layer_flags() {
    let caps = decode();
    let ozone = layer(&caps, "ozone_image");
    assert!(ozone.opaque && ozone.no_subsets);
    assert_eq!((ozone.fixed_width, ozone.fixed_height), (Some(512), Some(256)));
    assert_eq!(layer(&caps, "population").cascaded, Some(1));
}
