//! Mesh data types.

/// Half-open pixel box `[x1, x2) x [y1, y2)` in output space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadBox {
    /// Left edge, inclusive.
    pub x1: u32,
    /// Top edge, inclusive.
    pub y1: u32,
    /// Right edge, exclusive.
    pub x2: u32,
    /// Bottom edge, exclusive.
    pub y2: u32,
}

impl QuadBox {
    /// Creates a box from its corners.
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box width in pixels.
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    /// Box height in pixels.
    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// True when the box covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }
}

/// One bilinear patch: an output box and its four source-space corners.
///
/// Corners are ordered northwest, southwest, southeast, northeast, i.e.
/// counterclockwise from the top-left in image coordinates. A degenerate
/// patch repeats a single corner four times; the warp then paints the box
/// with that one source point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Destination pixel box.
    pub dst: QuadBox,
    /// Source corner mappings in NW, SW, SE, NE order.
    pub src: [(f64, f64); 4],
}

/// A gap-free, overlap-free set of quads tiling an output rectangle.
///
/// Quads appear in row-major order over the generator's top-level grid
/// with a deterministic order inside each cell, but consumers should rely
/// only on the coverage guarantee, not on emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    quads: Vec<Quad>,
    width: u32,
    height: u32,
}

impl Mesh {
    pub(crate) fn from_parts(quads: Vec<Quad>, width: u32, height: u32) -> Self {
        Self {
            quads,
            width,
            height,
        }
    }

    /// The quads, in emission order.
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Number of quads.
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// True when the transform was undefined on the whole rectangle.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Width of the output rectangle the mesh was built for.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the output rectangle the mesh was built for.
    pub fn height(&self) -> u32 {
        self.height
    }
}
