//! Decoding the bundled WMS 1.3.0 sample document.

use test_utils::{assert_approx_eq, WMS_1_3_0_CAPABILITIES};
use wms_capabilities::{read_str, Layer, WmsCapabilities};

fn decode() -> WmsCapabilities {
    read_str(WMS_1_3_0_CAPABILITIES)
        .expect("sample document decodes")
        .expect("sample document has a root element")
}

fn layer<'a>(caps: &'a WmsCapabilities, name: &str) -> &'a Layer {
    caps.find_layer(name)
        .unwrap_or_else(|| panic!("layer {name} not found"))
}

fn style_names(layer: &Layer) -> Vec<&str> {
    layer
        .style
        .iter()
        .filter_map(|s| s.name.as_deref())
        .collect()
}

// ============================================================================
// Service
// ============================================================================

#[test]
fn test_version() {
    assert_eq!(decode().version, "1.3.0");
}

#[test]
fn test_service_metadata() {
    let caps = decode();
    let service = caps.service.as_ref().unwrap();
    assert_eq!(service.name.as_deref(), Some("WMS"));
    assert_eq!(service.title.as_deref(), Some("Acme Corp. Map Server"));
    assert!(service
        .abstract_text
        .as_deref()
        .unwrap()
        .starts_with("Map Server maintained by Acme Corporation."));
    assert_eq!(
        service.keyword_list.as_deref(),
        Some(&["bird".to_string(), "roadrunner".to_string(), "ambush".to_string()][..])
    );
    assert_eq!(service.online_resource.as_deref(), Some("http://hostname/"));
    assert_eq!(service.fees.as_deref(), Some("none"));
    assert_eq!(service.access_constraints.as_deref(), Some("none"));
    assert_eq!(service.layer_limit, Some(16));
    assert_eq!(service.max_width, Some(2048));
    assert_eq!(service.max_height, Some(2048));
}

#[test]
fn test_contact_information() {
    let caps = decode();
    let contact = caps
        .service
        .as_ref()
        .and_then(|s| s.contact_information.as_ref())
        .unwrap();
    let person = contact.contact_person_primary.as_ref().unwrap();
    assert_eq!(person.contact_person.as_deref(), Some("Jeff Smith"));
    assert_eq!(person.contact_organization.as_deref(), Some("NASA"));
    assert_eq!(contact.contact_position.as_deref(), Some("Computer Scientist"));

    let address = contact.contact_address.as_ref().unwrap();
    assert_eq!(address.address_type.as_deref(), Some("postal"));
    assert_eq!(address.city.as_deref(), Some("Greenbelt"));
    assert_eq!(address.post_code.as_deref(), Some("20771"));
    assert_eq!(contact.contact_facsimile_telephone, None);
    assert_eq!(
        contact.contact_electronic_mail_address.as_deref(),
        Some("user@host.com")
    );
}

// ============================================================================
// Capability
// ============================================================================

#[test]
fn test_requests() {
    let caps = decode();
    let capability = caps.capability.as_ref().unwrap();
    let request = capability.request.as_ref().unwrap();

    let get_capabilities = request.get_capabilities.as_ref().unwrap();
    assert_eq!(get_capabilities.format, vec!["text/xml"]);
    assert_eq!(get_capabilities.get_url(), Some("http://hostname/path?"));
    assert_eq!(get_capabilities.post_url(), Some("http://hostname/path?"));

    let get_map = request.get_map.as_ref().unwrap();
    assert_eq!(get_map.format, vec!["image/gif", "image/png", "image/jpeg"]);
    assert_eq!(get_map.dcp_type.len(), 1);
    assert_eq!(get_map.post_url(), None);

    assert_eq!(request.get_feature_info.as_ref().unwrap().format.len(), 3);
    assert!(request.describe_layer.is_none());

    let names: Vec<_> = request.operations().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["GetCapabilities", "GetMap", "GetFeatureInfo"]);
}

#[test]
fn test_exception_formats() {
    let caps = decode();
    assert_eq!(
        caps.capability.as_ref().unwrap().exception.as_deref(),
        Some(&["XML".to_string(), "INIMAGE".to_string(), "BLANK".to_string()][..])
    );
}

#[test]
fn test_vendor_extension_is_ignored() {
    let caps = decode();
    assert!(caps.find_layer("not_a_layer").is_none());
    assert!(caps.capability.as_ref().unwrap().user_defined_symbolization.is_none());
}

// ============================================================================
// Layer tree
// ============================================================================

#[test]
fn test_layer_tree_shape() {
    let caps = decode();
    let root = caps.root_layer().unwrap();
    assert_eq!(root.name, None);
    assert_eq!(root.title.as_deref(), Some("Acme Corp. Map Server"));
    assert_eq!(root.layer.len(), 4);
    assert_eq!(caps.layers().len(), 10);

    let named: Vec<_> = caps
        .layers()
        .into_iter()
        .filter_map(|l| l.name.as_deref())
        .collect();
    assert_eq!(
        named,
        vec![
            "ROADS_RIVERS",
            "ROADS_1M",
            "RIVERS_1M",
            "Clouds",
            "Temperature",
            "Pressure",
            "ozone_image",
            "population"
        ]
    );
}

#[test]
fn test_root_layer_defaults() {
    let caps = decode();
    let root = caps.root_layer().unwrap();
    assert!(!root.queryable);
    assert!(!root.opaque);
    assert!(!root.no_subsets);
    assert_eq!(root.cascaded, None);
    assert_eq!(root.crs, vec!["CRS:84"]);
    assert_eq!(root.ex_geographic_bounding_box, Some([-180.0, -90.0, 180.0, 90.0]));
    assert_eq!(root.authority_url.len(), 1);
    assert_eq!(root.authority_url[0].name.as_deref(), Some("DIF_ID"));
}

#[test]
fn test_roads_rivers_own_properties() {
    let caps = decode();
    let roads = layer(&caps, "ROADS_RIVERS");

    assert!(roads.queryable);
    assert_eq!(roads.crs, vec!["EPSG:26986", "CRS:84"]);

    let [west, south, east, north] = roads.ex_geographic_bounding_box.unwrap();
    assert_approx_eq!(west, -71.63, 1e-9);
    assert_approx_eq!(south, 41.75, 1e-9);
    assert_approx_eq!(east, -70.78, 1e-9);
    assert_approx_eq!(north, 42.90, 1e-9);

    assert_eq!(roads.bounding_box.len(), 2);
    assert_eq!(roads.bounding_box[0].crs.as_deref(), Some("CRS:84"));
    assert_eq!(roads.bounding_box[0].res, [Some(0.01), Some(0.01)]);
    assert_eq!(
        roads.bounding_box[1].extent,
        [Some(189000.0), Some(834000.0), Some(285000.0), Some(962000.0)]
    );

    let attribution = roads.attribution.as_ref().unwrap();
    assert_eq!(attribution.title.as_deref(), Some("State College University"));
    let logo = attribution.logo_url.as_ref().unwrap();
    assert_eq!(logo.size, [Some(100), Some(100)]);
    assert_eq!(logo.format.as_deref(), Some("image/gif"));

    assert_eq!(roads.identifier, vec!["123456"]);
    assert_eq!(roads.feature_list_url.len(), 1);
    assert_eq!(roads.feature_list_url[0].format.as_deref(), Some("XML"));

    assert_eq!(style_names(roads), vec!["USGS"]);
    let usgs = &roads.style[0];
    assert_eq!(usgs.legend_url[0].size, [Some(72), Some(72)]);
    assert_eq!(
        usgs.style_sheet_url.as_ref().and_then(|s| s.format.as_deref()),
        Some("text/xsl")
    );
    assert_eq!(roads.min_scale_denominator, Some(1000.0));
    assert_eq!(roads.max_scale_denominator, Some(250000.0));
}

#[test]
fn test_inherited_properties() {
    let caps = decode();
    let roads = layer(&caps, "ROADS_RIVERS");
    let roads_1m = layer(&caps, "ROADS_1M");

    assert!(roads_1m.queryable);
    assert_eq!(style_names(roads_1m), vec!["ATLAS", "USGS"]);
    assert_eq!(roads_1m.crs, roads.crs);
    assert_eq!(roads_1m.authority_url.len(), 1);
    assert_eq!(roads_1m.bounding_box, roads.bounding_box);
    assert_eq!(roads_1m.ex_geographic_bounding_box, roads.ex_geographic_bounding_box);
    assert_eq!(roads_1m.attribution, roads.attribution);
    assert_eq!(roads_1m.min_scale_denominator, Some(1000.0));
    assert_eq!(roads_1m.max_scale_denominator, Some(250000.0));

    // Identifiers and metadata are never inherited.
    assert_eq!(roads_1m.identifier, vec!["123456"]);
    assert_eq!(roads_1m.metadata_url.len(), 2);
    assert_eq!(roads_1m.metadata_url[1].metadata_type.as_deref(), Some("ISO19115:2003"));
    assert!(roads_1m.feature_list_url.is_empty());

    let rivers = layer(&caps, "RIVERS_1M");
    assert!(rivers.queryable);
    assert_eq!(style_names(rivers), vec!["USGS"]);
    assert!(rivers.identifier.is_empty());
}

#[test]
fn test_dimensions() {
    let caps = decode();
    let weather = caps
        .layers()
        .into_iter()
        .find(|l| l.title.as_deref() == Some("Weather Forecast Data"))
        .unwrap();
    assert!(!weather.queryable);
    assert_eq!(weather.crs, vec!["CRS:84"]);
    assert_eq!(weather.dimension.len(), 1);
    let time = &weather.dimension[0];
    assert_eq!(time.name.as_deref(), Some("time"));
    assert_eq!(time.default.as_deref(), Some("2000-08-22"));
    assert_eq!(time.values.as_deref(), Some("1999-01-01/2000-08-22/P1D"));

    let clouds = layer(&caps, "Clouds");
    assert_eq!(clouds.dimension, weather.dimension);
    assert!(!clouds.queryable);

    let pressure = layer(&caps, "Pressure");
    assert_eq!(pressure.dimension.len(), 1);
    let elevation = &pressure.dimension[0];
    assert_eq!(elevation.name.as_deref(), Some("elevation"));
    assert_eq!(elevation.unit_symbol, None);
    assert_eq!(elevation.multiple_values, Some(true));
    assert_eq!(elevation.nearest_value, Some(false));
    assert_eq!(elevation.values.as_deref(), Some("0,1000,3000,5000,10000"));
}

#[test]
fn test_layer_flags() {
    let caps = decode();
    let ozone = layer(&caps, "ozone_image");
    assert!(ozone.opaque);
    assert!(ozone.no_subsets);
    assert!(!ozone.queryable);
    assert_eq!(ozone.fixed_width, Some(512));
    assert_eq!(ozone.fixed_height, Some(256));

    let population = layer(&caps, "population");
    assert_eq!(population.cascaded, Some(1));
    assert!(!population.opaque);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_json_uses_element_names() {
    let caps = decode();
    let json: serde_json::Value = serde_json::from_str(&caps.to_json().unwrap()).unwrap();

    assert_eq!(json["version"], "1.3.0");
    assert_eq!(json["Service"]["Title"], "Acme Corp. Map Server");
    assert_eq!(json["Service"]["KeywordList"][1], "roadrunner");
    let roads = &json["Capability"]["Layer"]["Layer"][0];
    assert_eq!(roads["Name"], "ROADS_RIVERS");
    assert_eq!(roads["queryable"], true);
    assert_eq!(roads["EX_GeographicBoundingBox"][0], -71.63);
    assert_eq!(roads["Style"][0]["LegendURL"][0]["size"][0], 72);
    assert!(roads.get("SRS").is_none());
}

#[test]
fn test_json_round_trip() {
    let caps = decode();
    let json = caps.to_json().unwrap();
    let back: WmsCapabilities = serde_json::from_str(&json).unwrap();
    assert_eq!(back, caps);
}
