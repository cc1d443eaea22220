#![deny(missing_docs)]
//! State machine for drawing corresponding feature lines.
//!
//! A pair is drawn as one drag on the source canvas followed by one drag on
//! the destination canvas. The UI forwards its mouse events as
//! [`AnnotationEvent`]s and draws whatever the returned [`Transition`] asks
//! for; all interaction state lives in the [`Annotator`].
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use linemorph_annotate::{AnnotationEvent, Annotator, Canvas};
//!
//! let mut annotator = Annotator::new();
//! let events = [
//!     AnnotationEvent::BeginPair,
//!     AnnotationEvent::Press { canvas: Canvas::Source, point: DVec2::new(0.0, 0.0) },
//!     AnnotationEvent::Release { canvas: Canvas::Source, point: DVec2::new(5.0, 0.0) },
//!     AnnotationEvent::Press { canvas: Canvas::Destination, point: DVec2::new(1.0, 1.0) },
//!     AnnotationEvent::Release { canvas: Canvas::Destination, point: DVec2::new(6.0, 2.0) },
//! ];
//! for event in events {
//!     annotator.handle(event).unwrap();
//! }
//! assert_eq!(annotator.pairs().len(), 1);
//! ```

use glam::DVec2;
use linemorph_imgproc::morph::{FeatureLine, FeatureLinePair};
use linemorph_imgproc::MorphError;

/// Errors raised while annotating.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AnnotateError {
    /// The drawn segment is not a valid feature line, e.g. a click without drag.
    #[error("invalid feature line: {0}")]
    Geometry(#[from] MorphError),
}

/// The image a mouse event happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canvas {
    /// The source image.
    Source,
    /// The destination image.
    Destination,
}

/// Input events forwarded by the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnotationEvent {
    /// Start drawing a new line pair.
    BeginPair,
    /// Mouse button pressed.
    Press {
        /// Canvas under the pointer.
        canvas: Canvas,
        /// Pointer position in image coordinates.
        point: DVec2,
    },
    /// Pointer moved.
    Move {
        /// Canvas under the pointer.
        canvas: Canvas,
        /// Pointer position in image coordinates.
        point: DVec2,
    },
    /// Mouse button released.
    Release {
        /// Canvas under the pointer.
        canvas: Canvas,
        /// Pointer position in image coordinates.
        point: DVec2,
    },
    /// Abandon the pair being drawn.
    Cancel,
}

/// Where the annotator is within drawing a pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnotationState {
    /// Not drawing.
    Idle,
    /// Waiting for the press that starts the source line.
    AwaitingSourceStart,
    /// Dragging the source line.
    DraggingSource {
        /// Where the drag started.
        start: DVec2,
    },
    /// Source line done, waiting for the press that starts the destination line.
    AwaitingDestStart {
        /// The finished source line.
        source: FeatureLine,
    },
    /// Dragging the destination line.
    DraggingDest {
        /// The finished source line.
        source: FeatureLine,
        /// Where the drag started.
        start: DVec2,
    },
}

/// What the UI should do after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// The event does not apply to the current state.
    Ignored,
    /// The state changed with nothing to draw.
    StateChanged(AnnotationState),
    /// Draw a temporary segment while dragging.
    Preview {
        /// Canvas to draw on.
        canvas: Canvas,
        /// Drag start.
        start: DVec2,
        /// Current pointer position.
        end: DVec2,
    },
    /// The source line is final; draw it permanently.
    SourceLineCompleted(FeatureLine),
    /// The destination line is final and the pair was stored.
    PairCompleted(FeatureLinePair),
}

/// Owns the interaction state and the pairs drawn so far.
#[derive(Debug, Clone)]
pub struct Annotator {
    state: AnnotationState,
    pairs: Vec<FeatureLinePair>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator {
    /// Create an idle annotator with no pairs.
    pub fn new() -> Self {
        Self {
            state: AnnotationState::Idle,
            pairs: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> AnnotationState {
        self.state
    }

    /// Completed pairs, in drawing order.
    pub fn pairs(&self) -> &[FeatureLinePair] {
        &self.pairs
    }

    /// Consume the annotator and return the completed pairs.
    pub fn into_pairs(self) -> Vec<FeatureLinePair> {
        self.pairs
    }

    /// Feed one event to the state machine.
    ///
    /// # Errors
    ///
    /// Releasing a drag that forms a zero-length line returns
    /// [`AnnotateError::Geometry`]; the annotator then waits for that line
    /// to be drawn again.
    pub fn handle(&mut self, event: AnnotationEvent) -> Result<Transition, AnnotateError> {
        use AnnotationEvent as E;
        use AnnotationState as S;

        let transition = match (self.state, event) {
            (S::Idle, E::BeginPair) => self.enter(S::AwaitingSourceStart),
            (S::Idle, _) | (_, E::BeginPair) => Transition::Ignored,
            (_, E::Cancel) => self.enter(S::Idle),

            (S::AwaitingSourceStart, E::Press { canvas, point }) if canvas == Canvas::Source => {
                self.enter(S::DraggingSource { start: point })
            }
            (S::DraggingSource { start }, E::Move { canvas, point }) if canvas == Canvas::Source => {
                Transition::Preview {
                    canvas,
                    start,
                    end: point,
                }
            }
            (S::DraggingSource { start }, E::Release { canvas, point })
                if canvas == Canvas::Source =>
            {
                let line = match FeatureLine::from_endpoints(start, point) {
                    Ok(line) => line,
                    Err(err) => {
                        self.enter(S::AwaitingSourceStart);
                        return Err(err.into());
                    }
                };
                self.enter(S::AwaitingDestStart { source: line });
                Transition::SourceLineCompleted(line)
            }

            (S::AwaitingDestStart { source }, E::Press { canvas, point })
                if canvas == Canvas::Destination =>
            {
                self.enter(S::DraggingDest {
                    source,
                    start: point,
                })
            }
            (S::DraggingDest { start, .. }, E::Move { canvas, point })
                if canvas == Canvas::Destination =>
            {
                Transition::Preview {
                    canvas,
                    start,
                    end: point,
                }
            }
            (S::DraggingDest { source, start }, E::Release { canvas, point })
                if canvas == Canvas::Destination =>
            {
                let dest = match FeatureLine::from_endpoints(start, point) {
                    Ok(line) => line,
                    Err(err) => {
                        self.enter(S::AwaitingDestStart { source });
                        return Err(err.into());
                    }
                };
                let pair = FeatureLinePair::new(source, dest);
                self.pairs.push(pair);
                self.enter(S::Idle);
                log::debug!("feature line pair #{} completed", self.pairs.len());
                Transition::PairCompleted(pair)
            }

            _ => Transition::Ignored,
        };

        Ok(transition)
    }

    fn enter(&mut self, state: AnnotationState) -> Transition {
        log::trace!("annotation state {:?} -> {:?}", self.state, state);
        self.state = state;
        Transition::StateChanged(state)
    }
}
