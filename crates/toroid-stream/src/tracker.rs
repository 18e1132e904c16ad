use toroid_core::{ChunkCoord, MoveOutcome, ToroidalWindow};
use tracing::debug;

use crate::config::StreamConfig;
use crate::loader::{load_pending, ChunkLoader, LoadReport};

/// Chunk coordinate containing a continuous world position.
///
/// Positions are floored, so `-0.5` with a width of 8 belongs to chunk `-1`.
/// Non-finite positions map to saturated chunk coordinates: infinities become
/// `i64::MAX` / `i64::MIN` and NaN becomes `0`.
///
/// # Examples
///
/// ```
/// use toroid_stream::chunk_of;
///
/// assert_eq!(chunk_of(17.5, 8), 2);
/// assert_eq!(chunk_of(-0.5, 8), -1);
/// ```
pub fn chunk_of(position: f64, chunk_width: u32) -> i64 {
    (position / f64::from(chunk_width)).floor() as i64
}

/// Keeps a window centered on the chunk under a moving viewpoint.
#[derive(Debug, Clone)]
pub struct ViewpointTracker {
    window: ToroidalWindow,
    chunk_width: u32,
    load_budget: usize,
}

impl ViewpointTracker {
    /// Track `window` with chunks `chunk_width` world units wide.
    ///
    /// A width of 0 is rejected, as it is by [`StreamConfig::from_env`].
    pub fn new(window: ToroidalWindow, chunk_width: u32) -> anyhow::Result<Self> {
        if chunk_width == 0 {
            anyhow::bail!("chunk width must be positive");
        }
        Ok(Self {
            window,
            chunk_width,
            load_budget: 0,
        })
    }

    /// Build the window described by `config` and track it.
    pub fn from_config(config: &StreamConfig) -> anyhow::Result<Self> {
        let window = ToroidalWindow::from_config(&config.window())?;
        Ok(Self::new(window, config.chunk_width)?.with_load_budget(config.load_budget))
    }

    /// Limit how many chunks [`tick`](Self::tick) loads per call; 0 means no limit.
    pub fn with_load_budget(mut self, load_budget: usize) -> Self {
        self.load_budget = load_budget;
        self
    }

    pub fn window(&self) -> &ToroidalWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut ToroidalWindow {
        &mut self.window
    }

    pub fn into_window(self) -> ToroidalWindow {
        self.window
    }

    pub fn chunk_width(&self) -> u32 {
        self.chunk_width
    }

    /// Chunk under the world position `(px, pz)`.
    pub fn chunk_at(&self, px: f64, pz: f64) -> ChunkCoord {
        ChunkCoord::new(chunk_of(px, self.chunk_width), chunk_of(pz, self.chunk_width))
    }

    /// Recenter the window on the chunk under `(px, pz)`.
    pub fn update(&mut self, px: f64, pz: f64) -> MoveOutcome {
        let target = self.chunk_at(px, pz);
        let previous = self.window.center();
        let outcome = self.window.set_center(target.x, target.y);
        if outcome != MoveOutcome::Unchanged {
            debug!(%previous, center = %target, ?outcome, "viewpoint changed chunk");
        }
        outcome
    }

    /// Recenter on `(px, pz)`, then load pending chunks within the budget.
    pub fn tick<L>(&mut self, px: f64, pz: f64, loader: &mut L) -> (MoveOutcome, LoadReport)
    where
        L: ChunkLoader + ?Sized,
    {
        let outcome = self.update(px, pz);
        let report = load_pending(&mut self.window, loader, self.load_budget);
        (outcome, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;

    #[test]
    fn test_chunk_of() {
        assert_eq!(chunk_of(0.0, 8), 0);
        assert_eq!(chunk_of(7.99, 8), 0);
        assert_eq!(chunk_of(8.0, 8), 1);
        assert_eq!(chunk_of(-0.01, 8), -1);
        assert_eq!(chunk_of(-8.0, 8), -1);
        assert_eq!(chunk_of(-8.01, 8), -2);
    }

    #[test]
    fn test_chunk_of_non_finite() {
        assert_eq!(chunk_of(f64::INFINITY, 8), i64::MAX);
        assert_eq!(chunk_of(f64::NEG_INFINITY, 8), i64::MIN);
        assert_eq!(chunk_of(f64::NAN, 8), 0);
    }

    #[test]
    fn test_zero_chunk_width_rejected() {
        let window = ToroidalWindow::new(1).unwrap();
        assert!(ViewpointTracker::new(window, 0).is_err());

        let config = StreamConfig {
            chunk_width: 0,
            ..StreamConfig::default()
        };
        assert!(ViewpointTracker::from_config(&config).is_err());
    }

    #[test]
    fn test_update_at_infinity_stays_in_range() {
        let window = ToroidalWindow::new(1).unwrap();
        let mut tracker = ViewpointTracker::new(window, 8).unwrap();
        assert_eq!(tracker.update(f64::INFINITY, 0.0), MoveOutcome::Rebuilt);
        assert_eq!(tracker.window().center(), ChunkCoord::new(i64::MAX - 1, 0));
        assert!(tracker.window().get(i64::MAX, 0).is_some());
    }

    #[test]
    fn test_update_follows_viewpoint() {
        let window = ToroidalWindow::new(2).unwrap();
        let mut tracker = ViewpointTracker::new(window, 8).unwrap();

        assert_eq!(tracker.update(3.0, 5.0), MoveOutcome::Unchanged);
        assert_eq!(
            tracker.update(9.0, 5.0),
            MoveOutcome::Incremental { refreshed: 5 }
        );
        assert_eq!(tracker.window().center(), ChunkCoord::new(1, 0));

        assert_eq!(tracker.update(-100.0, 5.0), MoveOutcome::Rebuilt);
        assert_eq!(tracker.window().center(), ChunkCoord::new(-13, 0));
    }

    #[test]
    fn test_tick_loads_entered_chunks() {
        let window = ToroidalWindow::new(1).unwrap();
        let mut tracker = ViewpointTracker::new(window, 4).unwrap().with_load_budget(2);
        let mut loader = |_: ChunkCoord| -> Result<(), LoadError> { Ok(()) };

        let (outcome, report) = tracker.tick(0.0, 0.0, &mut loader);
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.remaining, 7);

        tracker.window_mut().iter_mut().for_each(|chunk| chunk.set_loaded(true));
        let (outcome, report) = tracker.tick(4.5, 0.0, &mut loader);
        assert_eq!(outcome, MoveOutcome::Incremental { refreshed: 3 });
        assert_eq!(report.loaded, 2);
        assert_eq!(report.remaining, 1);
    }

    #[test]
    fn test_from_config() {
        let config = StreamConfig {
            half: 3,
            chunk_width: 16,
            load_budget: 5,
        };
        let tracker = ViewpointTracker::from_config(&config).unwrap();
        assert_eq!(tracker.window().size(), 7);
        assert_eq!(tracker.chunk_width(), 16);

        let config = StreamConfig {
            half: -1,
            ..StreamConfig::default()
        };
        assert!(ViewpointTracker::from_config(&config).is_err());
    }
}
