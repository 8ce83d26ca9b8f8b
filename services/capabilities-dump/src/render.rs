//! Output formats.

use std::fmt;

use wms_capabilities::{Layer, WmsCapabilities};

/// JSON rendering of the whole document.
pub fn json(caps: &WmsCapabilities, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(caps)
    } else {
        serde_json::to_string_pretty(caps)
    }
}

/// Service summary followed by the layer tree, one layer per line.
pub fn tree(caps: &WmsCapabilities) -> String {
    LayerTree(caps).to_string()
}

struct LayerTree<'a>(&'a WmsCapabilities);

impl fmt::Display for LayerTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let caps = self.0;
        let title = caps
            .service
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .unwrap_or("(untitled)");
        writeln!(f, "{} (WMS {})", title, caps.version)?;

        if let Some(request) = caps.capability.as_ref().and_then(|c| c.request.as_ref()) {
            for (name, operation) in request.operations() {
                write!(f, "  {}: {}", name, operation.format.join(", "))?;
                if let Some(url) = operation.get_url() {
                    write!(f, " <{}>", url)?;
                }
                writeln!(f)?;
            }
        }

        match caps.root_layer() {
            Some(root) => write_layer(f, root, 0),
            None => Ok(()),
        }
    }
}

fn write_layer(f: &mut fmt::Formatter<'_>, layer: &Layer, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    let name = layer.name.as_deref().unwrap_or("-");
    write!(f, "{}- {}", indent, name)?;
    if let Some(title) = &layer.title {
        write!(f, " \"{}\"", title)?;
    }

    let flags = layer_flags(layer);
    if !flags.is_empty() {
        write!(f, " [{}]", flags.join(", "))?;
    }

    let systems: Vec<_> = layer.reference_systems().collect();
    if !systems.is_empty() {
        write!(f, " {}", systems.join(" "))?;
    }

    let styles: Vec<_> = layer.style.iter().filter_map(|s| s.name.as_deref()).collect();
    if !styles.is_empty() {
        write!(f, " styles={}", styles.join(","))?;
    }
    writeln!(f)?;

    for child in &layer.layer {
        write_layer(f, child, depth + 1)?;
    }
    Ok(())
}

fn layer_flags(layer: &Layer) -> Vec<String> {
    let mut flags = Vec::new();
    if layer.queryable {
        flags.push("queryable".to_string());
    }
    if layer.opaque {
        flags.push("opaque".to_string());
    }
    if layer.no_subsets {
        flags.push("noSubsets".to_string());
    }
    if let Some(cascaded) = layer.cascaded {
        flags.push(format!("cascaded={}", cascaded));
    }
    match (layer.fixed_width, layer.fixed_height) {
        (None, None) => {}
        (width, height) => flags.push(format!(
            "fixed={}x{}",
            width.map_or_else(|| "?".to_string(), |w| w.to_string()),
            height.map_or_else(|| "?".to_string(), |h| h.to_string())
        )),
    }
    flags
}
