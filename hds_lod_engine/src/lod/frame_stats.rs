/// Per-frame counters.

use std::fmt;

/// What one frame did, for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Triangles dropped because two corners share a representative
    pub collapsed: usize,
    /// Triangles dropped by view-frustum culling
    pub culled: usize,
    /// Triangles written to the index list
    pub rendered: usize,
    /// Proxy table entries repaired this frame
    pub proxy_updates: usize,
    /// Node tests evaluated by the boundary update
    pub tests: usize,
    /// Node tests answered from the per-frame memo
    pub tests_saved: usize,
}

impl FrameStats {
    /// Triangles examined by the resolver.
    pub fn triangles(&self) -> usize {
        self.collapsed + self.culled + self.rendered
    }

    /// Rendered share of the examined triangles, in percent.
    pub fn rendered_percent(&self) -> f64 {
        match self.triangles() {
            0 => 0.0,
            total => 100.0 * self.rendered as f64 / total as f64,
        }
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "collapsed {} culled {} rendered {} [{:.0}%] ({} proxy updates, {} tests, {} saved)",
            self.collapsed,
            self.culled,
            self.rendered,
            self.rendered_percent(),
            self.proxy_updates,
            self.tests,
            self.tests_saved,
        )
    }
}
