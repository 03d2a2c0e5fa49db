use crate::foundation::error::MapResult;
use crate::raster::layer::RasterLayer;

/// Highest frame counter value before the cache forces a rebuild.
pub const LAST_REUSE_FRAME: u8 = 5;

/// Cached base layer plus the frame window that bounds how long it is reused.
///
/// Counter 0 means "rebuild on the next render"; a rebuild moves it to 1 and every reuse
/// advances it, wrapping back to 0 after [`LAST_REUSE_FRAME`].
#[derive(Clone, Debug, Default)]
pub struct FrameCache {
    base: Option<RasterLayer>,
    frame_counter: u8,
    fingerprint: Option<u64>,
    rebuilds: u64,
}

impl FrameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_counter(&self) -> u8 {
        self.frame_counter
    }

    /// Total number of base-layer rebuilds since construction.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Force the next render to rebuild the base layer.
    pub fn reset(&mut self) {
        self.frame_counter = 0;
        self.base = None;
        self.fingerprint = None;
    }

    /// A working copy of the base layer, rebuilt with `build` when the window expired, nothing
    /// is cached yet or the base inputs changed. The flag reports whether `build` ran.
    pub(crate) fn base_for(
        &mut self,
        fingerprint: u64,
        build: impl FnOnce() -> MapResult<RasterLayer>,
    ) -> MapResult<(RasterLayer, bool)> {
        let stale = self.fingerprint.is_some_and(|fp| fp != fingerprint);
        if let Some(base) = self.base.as_ref()
            && self.frame_counter != 0
            && !stale
        {
            let layer = base.clone();
            self.frame_counter += 1;
            if self.frame_counter > LAST_REUSE_FRAME {
                self.frame_counter = 0;
            }
            tracing::trace!(frame_counter = self.frame_counter, "reused base layer");
            return Ok((layer, false));
        }

        if stale {
            tracing::debug!("base inputs changed, rebuilding");
        }
        let layer = build()?;
        self.base = Some(layer.clone());
        self.fingerprint = Some(fingerprint);
        self.frame_counter = 1;
        self.rebuilds += 1;
        tracing::debug!(rebuilds = self.rebuilds, "rebuilt base layer");
        Ok((layer, true))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/cache.rs"]
mod tests;
