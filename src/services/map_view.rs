use std::fmt::Write;

const TEMPLATE: &str = include_str!("map_template.html");

/// A point of interest drawn on the map.
#[derive(Debug, Clone)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub popup: String,
    pub tooltip: Option<String>,
    pub color: &'static str,
}

/// A drawn path with a popup label.
#[derive(Debug, Clone)]
pub struct MapPolyline {
    pub coords: Vec<(f64, f64)>,
    pub color: &'static str,
    pub popup: String,
}

/// Assembles markers and polylines into a standalone Leaflet HTML document.
pub struct MapView {
    center: (f64, f64),
    zoom: u32,
    markers: Vec<Marker>,
    polylines: Vec<MapPolyline>,
}

impl MapView {
    pub fn new(center: (f64, f64), zoom: u32) -> Self {
        Self {
            center,
            zoom,
            markers: Vec::new(),
            polylines: Vec::new(),
        }
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn add_polyline(&mut self, line: MapPolyline) {
        self.polylines.push(line);
    }

    /// Renders the map document. Polylines with fewer than two coordinates
    /// are skipped.
    pub fn render(&self) -> String {
        let mut layers = String::new();

        for marker in &self.markers {
            let _ = write!(
                layers,
                "  L.circleMarker([{:.6}, {:.6}], {{radius: 7, color: '{}', fillColor: '{}', fillOpacity: 0.9}}).addTo(map).bindPopup('{}')",
                marker.lat,
                marker.lon,
                marker.color,
                marker.color,
                escape_js(&marker.popup),
            );
            if let Some(tooltip) = &marker.tooltip {
                let _ = write!(layers, ".bindTooltip('{}')", escape_js(tooltip));
            }
            layers.push_str(";\n");
        }

        for line in &self.polylines {
            if line.coords.len() < 2 {
                continue;
            }
            let latlngs = line
                .coords
                .iter()
                .map(|(lat, lon)| format!("[{lat:.6}, {lon:.6}]"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                layers,
                "  L.polyline([{}], {{color: '{}', weight: 4}}).addTo(map).bindPopup('{}');",
                latlngs,
                line.color,
                escape_js(&line.popup),
            );
        }

        TEMPLATE
            .replace("{{CENTER_LAT}}", &format!("{:.6}", self.center.0))
            .replace("{{CENTER_LON}}", &format!("{:.6}", self.center.1))
            .replace("{{ZOOM}}", &self.zoom.to_string())
            .replace("{{LAYERS}}", &layers)
    }
}

/// Escapes text for embedding in a single-quoted JS string literal.
fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace("</", "<\\/")
}
