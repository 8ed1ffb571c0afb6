//! Image dimension probing.
//!
//! Raster formats are probed with the `image` crate, reading only the
//! header. SVG has no pixel size, so its root element's `width`/`height`
//! attributes are used, falling back to the `viewBox`.

use std::io::Cursor;

use image::ImageReader;
use serde::Serialize;
use tracing::debug;

/// Result of probing an image for its size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImageProbe {
    /// Width in pixels
    pub width: Option<u32>,

    /// Height in pixels
    pub height: Option<u32>,

    /// Whether a viewer could render the file
    pub previewable: bool,
}

/// Probe image dimensions from file contents.
pub fn probe_dimensions(data: &[u8], extension: &str) -> ImageProbe {
    match raster_dimensions(data) {
        Ok((width, height)) => ImageProbe {
            width: Some(width),
            height: Some(height),
            previewable: true,
        },
        Err(message) => {
            if extension.eq_ignore_ascii_case("svg") {
                return svg_dimensions(&String::from_utf8_lossy(data));
            }
            debug!(extension, %message, "Could not read image dimensions");
            ImageProbe::default()
        }
    }
}

fn raster_dimensions(data: &[u8]) -> Result<(u32, u32), String> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .into_dimensions()
        .map_err(|e| e.to_string())
}

/// Size of an SVG document from its root element.
///
/// The document counts as previewable even when no size can be read.
pub fn svg_dimensions(text: &str) -> ImageProbe {
    let mut probe = ImageProbe {
        previewable: true,
        ..ImageProbe::default()
    };
    let Some(tag) = root_tag(text) else {
        return probe;
    };

    let width = svg_attribute(tag, "width").and_then(parse_leading_number);
    let height = svg_attribute(tag, "height").and_then(parse_leading_number);
    if let (Some(width), Some(height)) = (width, height) {
        probe.width = Some(width as u32);
        probe.height = Some(height as u32);
        return probe;
    }

    if let Some(view_box) = svg_attribute(tag, "viewbox") {
        let parts: Vec<f64> = view_box
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .unwrap_or_default();
        if let [_, _, width, height] = parts[..] {
            probe.width = Some(width as u32);
            probe.height = Some(height as u32);
        }
    }

    probe
}

/// The `<svg ...>` start tag, without the angle brackets.
fn root_tag(text: &str) -> Option<&str> {
    let start = text.to_ascii_lowercase().find("<svg")?;
    let end = text[start..].find('>')?;
    Some(&text[start + 1..start + end])
}

/// Value of an attribute in a start tag; `name` must be lowercase.
fn svg_attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with `tag`
    let lower = tag.to_ascii_lowercase();
    let mut search = 0;

    while let Some(found) = lower[search..].find(name) {
        let start = search + found;
        search = start + name.len();

        let at_boundary = lower[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if !at_boundary {
            continue;
        }

        let Some(rest) = lower[search..].trim_start().strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };

        let value_start = lower.len() - rest.len() + 1;
        let value_len = tag[value_start..].find(quote)?;
        return Some(&tag[value_start..value_start + value_len]);
    }

    None
}

/// Parse the numeric prefix of a length such as `"120.5px"`.
fn parse_leading_number(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0)))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse().ok()
}
