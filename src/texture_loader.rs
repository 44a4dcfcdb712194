use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::debug;
use crate::error::LoadError;
use crate::layer::{ImageSource, Layer};
use crate::slide::Slide;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Source of slide images. `placeholder` stands in for any image that
/// fails to load.
pub trait ImageLoader {
    type Image;

    fn load(&mut self, path: &Path) -> Result<Self::Image, LoadError>;
    fn placeholder(&mut self) -> Result<Self::Image, LoadError>;
}

// --- Build one layer per slide, substituting the placeholder on failure ---
pub fn load_layers<L: ImageLoader>(
    loader: &mut L,
    slides: &[Slide],
    active_index: usize,
    scale_transition: bool,
) -> Result<Vec<Layer<L::Image>>, LoadError> {
    slides
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let (image, source) = match loader.load(&slide.image) {
                Ok(image) => (image, ImageSource::Original),
                Err(_) => (loader.placeholder()?, ImageSource::Placeholder),
            };
            Ok(Layer::new(slide, image, source, i == active_index, scale_transition))
        })
        .collect()
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .map_err(|source| LoadError::ReadDir { path: dir_path.to_path_buf(), source })?;

    for entry in entries {
        let entry = entry.map_err(|source| LoadError::ReadDir { path: dir_path.to_path_buf(), source })?;
        let path = entry.path();
        if path.is_file() && is_image_path(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(LoadError::NoImages(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Loads textures through raylib. Needs the window to exist.
pub struct TextureLoader<'a> {
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
    placeholder_path: PathBuf,
}

impl<'a> TextureLoader<'a> {
    pub fn new(rl: &'a mut RaylibHandle, thread: &'a RaylibThread, placeholder_path: PathBuf) -> Self {
        Self { rl, thread, placeholder_path }
    }
}

impl ImageLoader for TextureLoader<'_> {
    type Image = Texture2D;

    fn load(&mut self, path: &Path) -> Result<Texture2D, LoadError> {
        load_texture_with_exif_rotation(self.rl, self.thread, path)
    }

    fn placeholder(&mut self) -> Result<Texture2D, LoadError> {
        let path = self.placeholder_path.clone();
        if let Ok(texture) = load_texture_with_exif_rotation(self.rl, self.thread, &path) {
            return Ok(texture);
        }

        // No placeholder on disk: generate a neutral checkerboard
        let image = Image::gen_image_checked(
            640, 360, 40, 40,
            Color::new(40, 40, 40, 255),
            Color::new(60, 60, 60, 255),
        );
        self.rl
            .load_texture_from_image(self.thread, &image)
            .map_err(|e| LoadError::Texture { path, reason: e.to_string() })
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, LoadError> {
    let file_bytes = fs::read(image_path)
        .map_err(|source| LoadError::ReadFile { path: image_path.to_path_buf(), source })?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(image_path, &file_bytes)
    } else {
        1
    };

    // Extension hint is required when loading from memory
    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| LoadError::Decode { path: image_path.to_path_buf(), reason: e.to_string() })?;

    // 1 = normal, 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW. Flips are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| LoadError::Texture { path: image_path.to_path_buf(), reason: e.to_string() })?;

    // Texture is on the GPU now, drop the CPU copy
    drop(image);

    Ok(texture)
}

fn exif_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(&orientation) = values.first() {
                        return orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            debug!(path = ?image_path, error = %e, "no usable EXIF data");
            1
        }
    }
}
