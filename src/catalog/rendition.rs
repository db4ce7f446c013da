//! Rendition model for compiled asset containers
//!
//! A rendition is one concrete, renderable variant of a logical asset
//! name: a specific scale/state/layer combination as yielded by the
//! rendition source. These types carry the raw decoded payloads into
//! the extraction pipeline; they never touch the container's byte
//! format themselves.

use std::fmt;
use image::DynamicImage;

/// Scale factor of a rendition (1x, 2x or 3x)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scale {
    /// Base density (1x)
    Single,
    /// Double density (2x, "retina")
    Double,
    /// Triple density (3x)
    Triple,
}

impl Scale {
    /// All scales in ascending order, the order traversal requests them
    pub fn all() -> [Scale; 3] {
        [Scale::Single, Scale::Double, Scale::Triple]
    }

    /// Numeric scale factor
    pub fn factor(&self) -> u32 {
        match self {
            Scale::Single => 1,
            Scale::Double => 2,
            Scale::Triple => 3,
        }
    }

    /// Conventional filename suffix for this scale ("" for 1x)
    pub fn suffix(&self) -> &'static str {
        match self {
            Scale::Single => "",
            Scale::Double => "@2x",
            Scale::Triple => "@3x",
        }
    }
}

/// Presentation state a rendition was authored for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationState {
    /// Default state
    #[default]
    Normal,
    /// Pressed/highlighted state
    Pressed,
    /// Inactive/background state
    Inactive,
    /// Selected state
    Selected,
}

impl PresentationState {
    /// Filename suffix describing this state ("" for the normal state)
    pub fn suffix(&self) -> &'static str {
        match self {
            PresentationState::Normal => "",
            PresentationState::Pressed => "_pressed",
            PresentationState::Inactive => "_inactive",
            PresentationState::Selected => "_selected",
        }
    }
}

/// One drawable layer of a layered rendition
///
/// Layers are stacked bottom-to-top; the offsets place the layer's
/// raster on the composite canvas.
#[derive(Clone)]
pub struct Layer {
    /// Decoded raster for this layer
    pub image: DynamicImage,
    /// Horizontal placement on the composite canvas (pixels from left)
    pub offset_x: u32,
    /// Vertical placement on the composite canvas (pixels from top)
    pub offset_y: u32,
}

impl Layer {
    /// Create a layer positioned at the given canvas offset
    pub fn new(image: DynamicImage, offset_x: u32, offset_y: u32) -> Self {
        Layer { image, offset_x, offset_y }
    }

    /// Create a layer anchored at the canvas origin
    pub fn at_origin(image: DynamicImage) -> Self {
        Layer::new(image, 0, 0)
    }
}

/// Glyph weight descriptor carried by vector documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GlyphWeight {
    Ultralight,
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

impl GlyphWeight {
    /// Lowercase descriptor used in synthesized filenames
    pub fn descriptor(&self) -> &'static str {
        match self {
            GlyphWeight::Ultralight => "ultralight",
            GlyphWeight::Thin => "thin",
            GlyphWeight::Light => "light",
            GlyphWeight::Regular => "regular",
            GlyphWeight::Medium => "medium",
            GlyphWeight::Semibold => "semibold",
            GlyphWeight::Bold => "bold",
            GlyphWeight::Heavy => "heavy",
            GlyphWeight::Black => "black",
        }
    }
}

/// Glyph size class descriptor carried by vector documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GlyphSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl GlyphSize {
    /// Single-letter descriptor used in synthesized filenames
    pub fn descriptor(&self) -> &'static str {
        match self {
            GlyphSize::Small => "S",
            GlyphSize::Medium => "M",
            GlyphSize::Large => "L",
        }
    }
}

/// Rendering mode descriptor carried by vector documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderingMode {
    #[default]
    Automatic,
    Template,
    Multicolor,
    Hierarchical,
}

impl RenderingMode {
    /// Descriptor used in synthesized filenames ("" for automatic)
    pub fn descriptor(&self) -> &'static str {
        match self {
            RenderingMode::Automatic => "",
            RenderingMode::Template => "-template",
            RenderingMode::Multicolor => "-multicolor",
            RenderingMode::Hierarchical => "-hierarchical",
        }
    }
}

/// A vector document attached to a rendition
///
/// The byte stream is already encoded by the source's renderer; an
/// empty stream means the renderer was not available for this entry.
#[derive(Clone)]
pub struct VectorDocument {
    /// Encoded vector byte stream (PDF)
    pub data: Vec<u8>,
    /// Glyph weight the document was authored for
    pub weight: GlyphWeight,
    /// Glyph size class the document was authored for
    pub size: GlyphSize,
    /// Rendering mode the document was authored for
    pub mode: RenderingMode,
}

impl VectorDocument {
    /// Create a vector document with default glyph descriptors
    pub fn new(data: Vec<u8>) -> Self {
        VectorDocument {
            data,
            weight: GlyphWeight::default(),
            size: GlyphSize::default(),
            mode: RenderingMode::default(),
        }
    }
}

/// One raw variant yielded by the rendition source
///
/// All payload fields are optional; which ones are present drives the
/// classification into an extraction path. The source owns decoding,
/// this type only carries the results.
#[derive(Clone)]
pub struct Rendition {
    /// Logical asset name
    pub name: String,
    /// Scale the variant was authored for
    pub scale: Scale,
    /// Presentation state the variant was authored for
    pub state: PresentationState,
    /// Decoded raster, when the variant is image-backed
    pub image: Option<DynamicImage>,
    /// Ordered layer stack, bottom first, when the variant is layered
    pub layers: Option<Vec<Layer>>,
    /// Vector document, when the variant is vector-backed
    pub vector: Option<VectorDocument>,
    /// Raw byte payload, when the variant is data-backed
    pub data: Option<Vec<u8>>,
}

impl Rendition {
    /// Create an empty rendition shell for the given name and scale
    pub fn new(name: &str, scale: Scale) -> Self {
        Rendition {
            name: name.to_string(),
            scale,
            state: PresentationState::default(),
            image: None,
            layers: None,
            vector: None,
            data: None,
        }
    }

    /// Create an image-backed rendition
    pub fn with_image(name: &str, scale: Scale, image: DynamicImage) -> Self {
        let mut rendition = Rendition::new(name, scale);
        rendition.image = Some(image);
        rendition
    }

    /// Create a data-backed rendition
    pub fn with_data(name: &str, data: Vec<u8>) -> Self {
        let mut rendition = Rendition::new(name, Scale::Single);
        rendition.data = Some(data);
        rendition
    }

    /// Whether the rendition carries a non-empty raw data payload
    pub fn has_data_payload(&self) -> bool {
        self.data.as_ref().map(|d| !d.is_empty()).unwrap_or(false)
    }
}

/// Composite key addressing a rendition inside a theme store
///
/// Theme stores are the legacy keyed encoding: renditions are addressed
/// by (name, scale, state) tuples instead of a direct name+scale image
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenditionKey {
    /// Logical asset name
    pub name: String,
    /// Scale component of the key
    pub scale: Scale,
    /// Presentation state component of the key
    pub state: PresentationState,
}

impl RenditionKey {
    /// Create a key for the given name at the given scale
    pub fn new(name: &str, scale: Scale, state: PresentationState) -> Self {
        RenditionKey {
            name: name.to_string(),
            scale,
            state,
        }
    }
}

impl fmt::Display for RenditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, self.scale.suffix(), self.state.suffix())
    }
}
