use std::path::{Path, PathBuf};
use rand::seq::SliceRandom;
use crate::constants::*;

/// One carousel entry. Immutable once built; `id` is the stable identity
/// used to key render layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: u32,
    pub image: PathBuf,
}

impl Slide {
    pub fn new(id: u32, image: impl Into<PathBuf>) -> Self {
        Self { id, image: image.into() }
    }

    /// Built-in list: `c1.jpeg` .. `c6.jpeg` under the asset directory.
    pub fn defaults(asset_dir: &Path) -> Vec<Slide> {
        (1..=DEFAULT_SLIDE_COUNT)
            .map(|id| Slide::new(id, asset_dir.join(format!("c{}.jpeg", id))))
            .collect()
    }

    /// Numbers slides 1..=n in the order the paths are given.
    pub fn from_paths(paths: Vec<PathBuf>) -> Vec<Slide> {
        paths
            .into_iter()
            .zip(1..)
            .map(|(path, id)| Slide::new(id, path))
            .collect()
    }

    pub fn alt_text(&self) -> String {
        format!("Product image {}", self.id)
    }
}

// Order is randomized once; ids travel with their images.
pub fn shuffle_slides(slides: &mut [Slide]) {
    slides.shuffle(&mut rand::rng());
}
