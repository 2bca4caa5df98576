use crate::foundation::core::Canvas;
use crate::foundation::error::HengeResult;
use crate::render::surface::Surface;

/// Drawing layers, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Theme gradient and cross-fades.
    Background,
    /// The ring.
    Sprites,
    /// View labels and the clock.
    Text,
    /// Hotspot overlay; blank unless enabled.
    Debug,
}

impl LayerKind {
    /// Compose order, bottom first.
    pub const Z_ORDER: [LayerKind; 4] = [
        LayerKind::Background,
        LayerKind::Sprites,
        LayerKind::Text,
        LayerKind::Debug,
    ];

    fn slot(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Sprites => 1,
            Self::Text => 2,
            Self::Debug => 3,
        }
    }
}

/// Independently clearable layers plus the visible surface they are merged into.
#[derive(Debug)]
pub struct LayeredCompositor {
    canvas: Canvas,
    layers: [Surface; 4],
    visible: Surface,
}

impl LayeredCompositor {
    /// All layers transparent.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            layers: std::array::from_fn(|_| Surface::new(canvas)),
            visible: Surface::new(canvas),
        }
    }

    /// Shared size of every layer.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Read access to one layer.
    pub fn layer(&self, kind: LayerKind) -> &Surface {
        &self.layers[kind.slot()]
    }

    /// Draw target for one layer.
    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Surface {
        &mut self.layers[kind.slot()]
    }

    /// Clears one layer without touching the others.
    pub fn clear(&mut self, kind: LayerKind) {
        self.layers[kind.slot()].clear();
    }

    /// Result of the last [`LayeredCompositor::compose`].
    pub fn visible(&self) -> &Surface {
        &self.visible
    }

    /// Merges all layers into the visible surface in z-order.
    pub fn compose(&mut self) -> HengeResult<&Surface> {
        self.visible.clear();
        for kind in LayerKind::Z_ORDER {
            let layer = &self.layers[kind.slot()];
            if layer.is_blank() {
                continue;
            }
            self.visible.blit_over(layer, 1.0)?;
        }
        Ok(&self.visible)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
