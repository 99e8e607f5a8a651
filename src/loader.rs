//! Image sources: fetched raster files, rasterized SVG and colour-grid sprites.
//!
//! Fetch and decode failures are logged and reported as `None`; an image
//! element holding no data simply draws nothing.

use crate::config::ImagesConfig;
use crate::draw::css;
use crate::error::EaselError;
use std::fs;
use std::io::Cursor;
use std::time::Duration;
use url::Url;

/// Produces encoded image bytes for image elements.
pub trait ImageLoader: Send {
    /// Reads the raw bytes behind `source` (URL or filesystem path).
    fn fetch(&self, source: &str) -> Option<Vec<u8>>;

    /// Loads `source` as drawable bytes, rasterizing SVG to PNG at
    /// `width` x `height` (non-positive dimensions mean natural size).
    fn load(&self, source: &str, width: i32, height: i32) -> Option<Vec<u8>> {
        let data = self.fetch(source)?;
        if is_svg(source) {
            svg_to_png(&data, width, height)
        } else {
            Some(data)
        }
    }
}

/// Loader for `http(s)://` and `file://` URLs and plain filesystem paths.
pub struct WebImageLoader {
    client: Option<reqwest::blocking::Client>,
}

impl WebImageLoader {
    pub fn new(config: &ImagesConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| log::warn!("HTTP client unavailable, web sprites disabled: {}", err))
            .ok();
        Self { client }
    }

    fn fetch_http(&self, url: Url) -> Option<Vec<u8>> {
        let client = self.client.as_ref()?;
        let response = client
            .get(url.clone())
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|err| log::warn!("Could not fetch {}: {}", url, err))
            .ok()?;
        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|err| log::warn!("Could not read body of {}: {}", url, err))
            .ok()
    }
}

impl Default for WebImageLoader {
    fn default() -> Self {
        Self::new(&ImagesConfig::default())
    }
}

impl ImageLoader for WebImageLoader {
    fn fetch(&self, source: &str) -> Option<Vec<u8>> {
        let url = match Url::parse(source) {
            Ok(url) => url,
            Err(_) => return read_file(source),
        };
        match url.scheme() {
            "http" | "https" => self.fetch_http(url),
            "file" => {
                let path = url.to_file_path().ok()?;
                read_file(&path.to_string_lossy())
            }
            other => {
                log::warn!("Unsupported image URL scheme '{}' in {}", other, source);
                None
            }
        }
    }
}

fn read_file(path: &str) -> Option<Vec<u8>> {
    fs::read(path)
        .map_err(|err| log::warn!("Could not read image {}: {}", path, err))
        .ok()
}

/// Returns `true` when `source` names an SVG document.
pub fn is_svg(source: &str) -> bool {
    let path = Url::parse(source)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| source.to_string());
    path.to_ascii_lowercase().ends_with(".svg")
}

/// Rasterizes SVG data to PNG.
///
/// With both dimensions positive the image is stretched to them; with one
/// positive the other follows the document's aspect ratio; otherwise the
/// document's own size is used.
pub fn svg_to_png(data: &[u8], width: i32, height: i32) -> Option<Vec<u8>> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())
        .map_err(|err| log::warn!("Could not parse SVG: {}", err))
        .ok()?;
    let size = tree.size();
    let (natural_w, natural_h) = (size.width(), size.height());
    let (target_w, target_h) = match (width > 0, height > 0) {
        (true, true) => (width as f32, height as f32),
        (true, false) => (width as f32, width as f32 * natural_h / natural_w),
        (false, true) => (height as f32 * natural_w / natural_h, height as f32),
        (false, false) => (natural_w, natural_h),
    };
    let (pixel_w, pixel_h) = (target_w.round().max(1.0) as u32, target_h.round().max(1.0) as u32);

    let mut pixmap = tiny_skia::Pixmap::new(pixel_w, pixel_h)?;
    let transform = tiny_skia::Transform::from_scale(
        pixel_w as f32 / natural_w,
        pixel_h as f32 / natural_h,
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|err| log::warn!("Could not encode rasterized SVG: {}", err))
        .ok()
}

/// Encodes a grid of CSS colours (rows of pixels) as a PNG.
///
/// The image is as wide as the first row; missing cells in shorter rows are
/// transparent, as are cells that are not valid colours.
///
/// # Errors
/// Returns [`EaselError::Sprite`] for an empty grid or if encoding fails.
pub fn sprite_to_png<R, S>(rows: &[R]) -> Result<Vec<u8>, EaselError>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let width = rows.first().map_or(0, |row| row.as_ref().len());
    if width == 0 {
        return Err(EaselError::Sprite("sprite data has no pixels".to_string()));
    }
    let image = image::RgbaImage::from_fn(width as u32, rows.len() as u32, |x, y| {
        let pixel = rows[y as usize]
            .as_ref()
            .get(x as usize)
            .map_or(css::TRANSPARENT_PIXEL, |color| css::to_pixel(color.as_ref()));
        let [a, r, g, b] = pixel.to_be_bytes();
        image::Rgba([r, g, b, a])
    });

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|err| EaselError::Sprite(err.to_string()))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use std::io::Write;

    const SQUARE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20"><rect width="10" height="20" fill="red"/></svg>"#;

    #[test]
    fn svg_detection_ignores_case_and_query() {
        assert!(is_svg("https://example.com/cards/ace_of_spades.svg"));
        assert!(is_svg("https://example.com/a.SVG?v=2"));
        assert!(is_svg("sprites/hero.svg"));
        assert!(!is_svg("https://example.com/a.png"));
    }

    #[test]
    fn sprite_grid_becomes_png_pixels() {
        let png = sprite_to_png(&[vec!["red", "#00ff00"], vec!["blue"]]).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 255, 0, 255]);
        assert_eq!(decoded.get_pixel(0, 1).0, [0, 0, 255, 255]);
        assert_eq!(decoded.get_pixel(1, 1).0[3], 0);
    }

    #[test]
    fn empty_sprite_is_rejected() {
        let rows: Vec<Vec<&str>> = Vec::new();
        assert!(matches!(sprite_to_png(&rows), Err(EaselError::Sprite(_))));
    }

    #[test]
    fn svg_is_rasterized_to_requested_size() {
        let png = svg_to_png(SQUARE_SVG.as_bytes(), 30, 0).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.dimensions(), (30, 60));
        assert_eq!(decoded.get_pixel(15, 30).0, [255, 0, 0, 255]);

        let natural = image::load_from_memory(&svg_to_png(SQUARE_SVG.as_bytes(), 0, 0).unwrap())
            .unwrap();
        assert_eq!(natural.dimensions(), (10, 20));
    }

    #[test]
    fn invalid_svg_yields_nothing() {
        assert!(svg_to_png(b"<not-svg", 10, 10).is_none());
    }

    #[test]
    fn local_files_load_and_missing_files_do_not() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.svg");
        fs::File::create(&path)
            .unwrap()
            .write_all(SQUARE_SVG.as_bytes())
            .unwrap();

        let loader = WebImageLoader::default();
        let source = path.to_string_lossy().to_string();
        let png = loader.load(&source, 5, 10).unwrap();
        assert_eq!(image::load_from_memory(&png).unwrap().dimensions(), (5, 10));

        let file_url = Url::from_file_path(&path).unwrap().to_string();
        assert!(loader.fetch(&file_url).is_some());
        assert!(loader.fetch(&dir.path().join("missing.png").to_string_lossy()).is_none());
        assert!(loader.fetch("ftp://example.com/a.png").is_none());
    }
}
