//! Build observation hooks.
//!
//! The builder reports each completed stage to an optional observer, in
//! addition to emitting `tracing` events. Observers choose how much they
//! want to hear through [`BuildObserver::verbosity`].
//!
//! # Example
//!
//! ```
//! use terrain_mesh::observer::{CallbackObserver, EventLevel};
//! use terrain_mesh::{Heightfield, TerrainBuilder};
//!
//! let hf = Heightfield::from_rows(&[[0.0, 1.0], [2.0, 3.0]]).unwrap();
//! let mut observer = CallbackObserver::new(EventLevel::Verbose, |event| {
//!     println!("[{:?}] {}", event.level, event.message);
//! });
//!
//! let solid = TerrainBuilder::new(&hf)
//!     .with_observer(&mut observer)
//!     .build()
//!     .unwrap();
//! assert_eq!(solid.mesh().vertex_count(), 8);
//! ```

use std::time::Duration;

use crate::solid::WallSide;

/// How detailed an event is.
///
/// Ordered from least to most detailed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    /// Stage summaries a user would want to see.
    Info,
    /// Per-stage detail for troubleshooting.
    Verbose,
}

/// Pipeline stage an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    /// Raster shape and parameter checks.
    Validate,
    /// Terrain vertex generation.
    VertexGrid,
    /// Top-surface triangulation.
    TopSurface,
    /// Base vertices and faces.
    Base,
    /// One wall ribbon.
    Wall(WallSide),
    /// Final concatenation.
    Assembly,
}

/// A single observation from the builder.
#[derive(Debug, Clone)]
pub struct BuildEvent {
    pub stage: BuildStage,
    pub level: EventLevel,
    /// Human-readable description.
    pub message: String,
    /// Vertices produced by the stage.
    pub vertices: usize,
    /// Triangles produced by the stage.
    pub faces: usize,
    /// Time spent in the stage.
    pub elapsed: Duration,
}

/// Receiver for build events.
pub trait BuildObserver {
    /// Most detailed level this observer wants. Events above it are not
    /// delivered.
    fn verbosity(&self) -> EventLevel {
        EventLevel::Info
    }

    fn on_event(&mut self, event: &BuildEvent);
}

/// Boxed callback for [`CallbackObserver`].
pub type ObserverCallback<'a> = Box<dyn FnMut(&BuildEvent) + Send + 'a>;

/// Observer forwarding events to a closure.
pub struct CallbackObserver<'a> {
    verbosity: EventLevel,
    callback: ObserverCallback<'a>,
}

impl<'a> CallbackObserver<'a> {
    pub fn new(verbosity: EventLevel, callback: impl FnMut(&BuildEvent) + Send + 'a) -> Self {
        Self {
            verbosity,
            callback: Box::new(callback),
        }
    }
}

impl BuildObserver for CallbackObserver<'_> {
    fn verbosity(&self) -> EventLevel {
        self.verbosity
    }

    fn on_event(&mut self, event: &BuildEvent) {
        (self.callback)(event)
    }
}

/// Observer that records every delivered event.
#[derive(Debug, Clone)]
pub struct EventLog {
    verbosity: EventLevel,
    events: Vec<BuildEvent>,
}

impl EventLog {
    pub fn new(verbosity: EventLevel) -> Self {
        Self {
            verbosity,
            events: Vec::new(),
        }
    }

    /// Events in delivery order.
    pub fn events(&self) -> &[BuildEvent] {
        &self.events
    }

    /// Total time across recorded stages.
    pub fn total_elapsed(&self) -> Duration {
        self.events.iter().map(|e| e.elapsed).sum()
    }
}

impl BuildObserver for EventLog {
    fn verbosity(&self) -> EventLevel {
        self.verbosity
    }

    fn on_event(&mut self, event: &BuildEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(level: EventLevel) -> BuildEvent {
        BuildEvent {
            stage: BuildStage::Assembly,
            level,
            message: "done".into(),
            vertices: 8,
            faces: 12,
            elapsed: Duration::from_millis(2),
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(EventLevel::Info < EventLevel::Verbose);
    }

    #[test]
    fn test_callback_observer_forwards() {
        let mut seen = Vec::new();
        {
            let mut observer =
                CallbackObserver::new(EventLevel::Info, |e: &BuildEvent| seen.push(e.faces));
            observer.on_event(&event(EventLevel::Info));
            assert_eq!(observer.verbosity(), EventLevel::Info);
        }
        assert_eq!(seen, vec![12]);
    }

    #[test]
    fn test_event_log_records() {
        let mut log = EventLog::new(EventLevel::Verbose);
        log.on_event(&event(EventLevel::Info));
        log.on_event(&event(EventLevel::Verbose));
        assert_eq!(log.events().len(), 2);
        assert_eq!(log.total_elapsed(), Duration::from_millis(4));
    }
}
