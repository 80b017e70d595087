//! Process-wide font resource.
//!
//! The render pipeline draws all text with one font. It is loaded on first use, shared
//! read-only afterwards, and never reloaded: a failed load stays failed for the life of the
//! process.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, OnceLock};

use crate::foundation::error::{CanvasError, CanvasResult};

/// Logical name of the font every render uses.
pub const FONT_NAME: &str = "Inter";
/// Weight of the cached face.
pub const FONT_WEIGHT: u16 = 400;
/// Environment variable overriding the font file.
pub const FONT_ENV: &str = "TERMCANVAS_FONT";

/// Font file shipped next to the crate, when present.
pub fn bundled_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("fonts")
        .join("Inter-Regular.ttf")
}

/// Decoded font bytes plus a font database holding only that face.
#[derive(Clone)]
pub struct FontAsset {
    family: String,
    data: Arc<Vec<u8>>,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("name", &FONT_NAME)
            .field("family", &self.family)
            .field("weight", &FONT_WEIGHT)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontAsset {
    /// Parse `data` as a TrueType/OpenType font.
    pub fn from_bytes(data: Vec<u8>) -> CanvasResult<Self> {
        let data = Arc::new(data);
        let mut db = usvg::fontdb::Database::new();
        db.load_font_source(usvg::fontdb::Source::Binary(data.clone()));
        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| CanvasError::font_load("font data contains no usable face"))?;

        Ok(Self {
            family,
            data,
            fontdb: Arc::new(db),
        })
    }

    /// Logical font name (always [`FONT_NAME`]).
    pub fn name(&self) -> &'static str {
        FONT_NAME
    }

    /// Family name recorded in the font data. Vector documents reference the font by this name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// CSS weight of the cached face.
    pub fn weight(&self) -> u16 {
        FONT_WEIGHT
    }

    /// Raw font bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Font database used when rasterizing vector documents.
    pub(crate) fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        self.fontdb.clone()
    }

    /// Unvalidated asset for tests that never shape text.
    #[cfg(test)]
    pub(crate) fn from_raw(family: &str, data: Vec<u8>) -> Self {
        Self {
            family: family.to_owned(),
            data: Arc::new(data),
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }
}

/// Where the font cache loads its asset from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSource {
    /// A specific font file.
    File(PathBuf),
    /// `$TERMCANVAS_FONT`, then the bundled `Inter-Regular.ttf`, then an installed `Inter`
    /// face, then any installed sans-serif face.
    #[default]
    Default,
}

impl FontSource {
    /// Load and validate the font. Performs blocking IO.
    pub fn load(&self) -> CanvasResult<FontAsset> {
        match self {
            Self::File(path) => load_file(path),
            Self::Default => {
                if let Some(path) = std::env::var_os(FONT_ENV) {
                    return load_file(Path::new(&path));
                }
                let bundled = bundled_font_path();
                if bundled.is_file() {
                    return load_file(&bundled);
                }
                load_system()
            }
        }
    }
}

fn load_file(path: &Path) -> CanvasResult<FontAsset> {
    let bytes = std::fs::read(path)
        .map_err(|e| CanvasError::font_load(format!("read '{}': {e}", path.display())))?;
    FontAsset::from_bytes(bytes)
        .map_err(|e| CanvasError::font_load(format!("'{}': {e}", path.display())))
}

fn load_system() -> CanvasResult<FontAsset> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let preferred = [
        usvg::fontdb::Family::Name(FONT_NAME),
        usvg::fontdb::Family::SansSerif,
    ];
    let id = preferred
        .iter()
        .find_map(|family| {
            db.query(&usvg::fontdb::Query {
                families: std::slice::from_ref(family),
                weight: usvg::fontdb::Weight(FONT_WEIGHT),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            })
        })
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| {
            CanvasError::font_load(format!(
                "no font found: set {FONT_ENV} or install '{}'",
                bundled_font_path().display()
            ))
        })?;

    let bytes = db
        .with_face_data(id, |data, _index| data.to_vec())
        .ok_or_else(|| CanvasError::font_load("installed font face could not be read"))?;
    FontAsset::from_bytes(bytes)
}

type FontLoader = Box<dyn Fn() -> CanvasResult<FontAsset> + Send + Sync>;

/// Single-flight, load-once font store.
///
/// Concurrent first callers block on one load and all observe the same asset. A failed load is
/// remembered and returned to every later caller.
pub struct FontCache {
    loader: FontLoader,
    slot: OnceLock<Result<FontAsset, String>>,
}

impl std::fmt::Debug for FontCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCache")
            .field("slot", &self.slot.get())
            .finish_non_exhaustive()
    }
}

static GLOBAL: LazyLock<Arc<FontCache>> =
    LazyLock::new(|| Arc::new(FontCache::new(FontSource::Default)));

impl FontCache {
    /// Cache loading from `source`.
    pub fn new(source: FontSource) -> Self {
        Self::with_loader(move || source.load())
    }

    /// Cache loading with a custom loader.
    pub fn with_loader(loader: impl Fn() -> CanvasResult<FontAsset> + Send + Sync + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            slot: OnceLock::new(),
        }
    }

    /// The process-wide cache used by [`crate::render_to_bytes`] and friends.
    pub fn global() -> Arc<FontCache> {
        GLOBAL.clone()
    }

    /// The font, loading it on the first call.
    pub fn get(&self) -> CanvasResult<FontAsset> {
        let slot = self.slot.get_or_init(|| {
            let started = std::time::Instant::now();
            match (self.loader)() {
                Ok(font) => {
                    tracing::debug!(
                        family = font.family(),
                        bytes = font.data().len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "font loaded"
                    );
                    Ok(font)
                }
                Err(e) => {
                    tracing::error!(error = %e, "font load failed; rendering is disabled for this process");
                    Err(e.to_string())
                }
            }
        });
        match slot {
            Ok(font) => Ok(font.clone()),
            Err(msg) => Err(CanvasError::font_load(msg.clone())),
        }
    }

    /// `true` once a load has completed (successfully or not).
    pub fn is_settled(&self) -> bool {
        self.slot.get().is_some()
    }
}

/// Font from the process-wide cache.
pub fn get_font() -> CanvasResult<FontAsset> {
    FontCache::global().get()
}

/// Real font for tests that shape text, if this machine has one.
#[cfg(test)]
pub(crate) fn test_font() -> Option<FontAsset> {
    static FONT: OnceLock<Option<FontAsset>> = OnceLock::new();
    FONT.get_or_init(|| FontSource::Default.load().ok()).clone()
}

#[cfg(test)]
#[path = "../../tests/unit/render/font.rs"]
mod tests;
