//! Background grid generation.
//!
//! The canvas background is a double mesh: thin primary lines every cell,
//! heavier secondary lines every `factor` cells. Lines are emitted as SVG
//! path command strings the UI feeds straight into a path element, one
//! string per mesh so each can carry its own stroke style.

/// Grid spacing and subdivision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridOptions {
    /// Cell size in canvas units, before zoom.
    pub spacing: f32,
    /// Every `factor`-th line belongs to the secondary (heavier) mesh.
    pub factor: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            spacing: 10.0,
            factor: 5,
        }
    }
}

/// SVG commands for the two meshes of the grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridMesh {
    pub primary: String,
    pub secondary: String,
}

impl GridMesh {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// Generate the double-mesh grid for the visible viewport.
///
/// The grid is infinite: pan and zoom select which world-space grid lines
/// fall inside the `width` x `height` viewport. Secondary lines stay pinned
/// to world coordinates that are multiples of `spacing * factor`, so panning
/// never changes which lines are heavy. Returns an empty mesh when the
/// effective spacing drops below 4 pixels, where the grid would collapse
/// into noise, and for non-finite viewport values, which have no meaningful
/// line positions.
pub fn generate_grid_mesh(
    width: f32,
    height: f32,
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
    options: GridOptions,
) -> GridMesh {
    // NaN or infinite inputs would never terminate the line loops below
    let viewport = [width, height, zoom, pan_x, pan_y];
    if viewport.iter().any(|v| !v.is_finite()) {
        return GridMesh::default();
    }
    let effective_spacing = options.spacing * zoom;
    if !effective_spacing.is_finite() || effective_spacing < 4.0 {
        return GridMesh::default();
    }
    let factor = i64::from(options.factor.max(1));

    let mut mesh = GridMesh::default();

    // Vertical lines: world line k sits at screen x = pan + k * spacing
    let mut k = ((0.0 - pan_x) / effective_spacing).ceil() as i64;
    loop {
        let x = pan_x + k as f32 * effective_spacing;
        if x >= width + effective_spacing {
            break;
        }
        let target = if k.rem_euclid(factor) == 0 {
            &mut mesh.secondary
        } else {
            &mut mesh.primary
        };
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(&format!("M {} 0 L {} {}", x, x, height));
        k += 1;
    }

    // Horizontal lines
    let mut k = ((0.0 - pan_y) / effective_spacing).ceil() as i64;
    loop {
        let y = pan_y + k as f32 * effective_spacing;
        if y >= height + effective_spacing {
            break;
        }
        let target = if k.rem_euclid(factor) == 0 {
            &mut mesh.secondary
        } else {
            &mut mesh.primary
        };
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(&format!("M 0 {} L {} {}", y, width, y));
        k += 1;
    }

    mesh
}
