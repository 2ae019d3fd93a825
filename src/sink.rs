//! Display sinks for rendered charts.

use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::PathBuf;

use crate::error::Result;

/// Receives each rendered chart once, in pipeline order.
pub trait DisplaySink {
    /// `name` is a short, file-safe identifier such as `top_skills`.
    fn show(&mut self, name: &str, image: &RgbaImage) -> Result<()>;
}

/// Writes charts as PNG files, optionally opening each in the system viewer.
pub struct PngFileSink {
    dir: PathBuf,
    open_viewer: bool,
    written: Vec<PathBuf>,
}

impl PngFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            open_viewer: false,
            written: Vec::new(),
        }
    }

    pub fn with_viewer(mut self, open_viewer: bool) -> Self {
        self.open_viewer = open_viewer;
        self
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DisplaySink for PngFileSink {
    fn show(&mut self, name: &str, image: &RgbaImage) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.png", name));
        image.save_with_format(&path, ImageFormat::Png)?;
        tracing::info!(path = %path.display(), "chart written");

        if self.open_viewer {
            if let Err(e) = open::that(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not open chart viewer");
            }
        }
        self.written.push(path);
        Ok(())
    }
}

/// Keeps charts in memory.
#[derive(Default)]
pub struct MemorySink {
    pub images: Vec<(String, RgbaImage)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<&str> {
        self.images.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&RgbaImage> {
        self.images.iter().find(|(n, _)| n == name).map(|(_, img)| img)
    }
}

impl DisplaySink for MemorySink {
    fn show(&mut self, name: &str, image: &RgbaImage) -> Result<()> {
        self.images.push((name.to_string(), image.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_png_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let mut sink = PngFileSink::new(&out);
        let img = RgbaImage::from_pixel(4, 3, Rgba([255, 0, 0, 255]));

        sink.show("top_skills", &img).unwrap();

        let path = out.join("top_skills.png");
        assert_eq!(sink.written(), &[path.clone()]);
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(*decoded.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        let img = RgbaImage::new(1, 1);
        sink.show("a", &img).unwrap();
        sink.show("b", &img).unwrap();
        assert_eq!(sink.names(), vec!["a", "b"]);
        assert!(sink.get("b").is_some());
        assert!(sink.get("c").is_none());
    }
}
