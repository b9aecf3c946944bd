use crate::domain::model::ItemColorKey;
use crate::domain::ports::ImageProbe;
use std::path::{Path, PathBuf};

/// Default probe: asks the filesystem. Probe failures (permissions, I/O) are
/// logged and treated as "does not exist" so a bad asset never fails the run.
pub struct FsProbe;

impl ImageProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        match path.try_exists() {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!("Could not probe image candidate {:?}: {}", path, e);
                false
            }
        }
    }
}

/// Locates the image asset for a product by ordered candidate probing: the
/// full 13-character key is preferred over the 10-character item code, and
/// extensions are tried in their configured order for each stem.
pub struct ImageResolver<P: ImageProbe = FsProbe> {
    image_dir: PathBuf,
    extensions: Vec<String>,
    probe: P,
}

impl ImageResolver<FsProbe> {
    pub fn new(image_dir: impl Into<PathBuf>, extensions: &[String]) -> Self {
        Self::with_probe(image_dir, extensions, FsProbe)
    }
}

impl<P: ImageProbe> ImageResolver<P> {
    pub fn with_probe(image_dir: impl Into<PathBuf>, extensions: &[String], probe: P) -> Self {
        Self {
            image_dir: image_dir.into(),
            extensions: extensions.to_vec(),
            probe,
        }
    }

    /// Ranked candidate filenames, highest priority first.
    pub fn candidates(&self, key: &ItemColorKey) -> Vec<String> {
        [key.as_str(), key.item_code()]
            .iter()
            .flat_map(|stem| {
                self.extensions
                    .iter()
                    .map(move |ext| format!("{}.{}", stem, ext))
            })
            .collect()
    }

    /// First candidate that exists in the image directory, or `None`. The
    /// returned name is relative to the directory.
    pub fn resolve(&self, key: &ItemColorKey) -> Option<String> {
        self.candidates(key)
            .into_iter()
            .find(|name| self.probe.exists(&self.image_dir.join(name)))
    }
}
