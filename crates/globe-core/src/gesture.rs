//! Pointer gesture tracking: raw pointer events in, drag offsets out.

/// Cursor feedback requested by the tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
}

/// Raw pointer input in client (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Enter,
}

/// Client-space rectangle of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        !self.is_empty()
            && x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSession {
    pub active: bool,
    pub origin_client_x: f64,
    pub accumulated_offset: f64,
}

#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    session: PointerSession,
    hovered: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        if self.session.active {
            GesturePhase::Dragging
        } else {
            GesturePhase::Idle
        }
    }

    pub fn session(&self) -> &PointerSession {
        &self.session
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Live drag offset while a session is active.
    pub fn drag_delta(&self) -> Option<f64> {
        self.session
            .active
            .then_some(self.session.accumulated_offset)
    }

    /// Feed one pointer event. Returns the cursor to apply when it changes.
    ///
    /// `resume_offset` is the current drag angle expressed in pixels so a new
    /// grab continues from the visible orientation.
    pub fn handle(
        &mut self,
        input: PointerInput,
        bounds: Option<SurfaceBounds>,
        resume_offset: f64,
    ) -> Option<Cursor> {
        match input {
            PointerInput::Down { x, y } => {
                let Some(b) = bounds else {
                    return None;
                };
                if b.is_empty() || !b.contains(x, y) || !x.is_finite() {
                    return None;
                }
                let resume = if resume_offset.is_finite() {
                    resume_offset
                } else {
                    0.0
                };
                self.session = PointerSession {
                    active: true,
                    origin_client_x: x - resume,
                    accumulated_offset: resume,
                };
                self.hovered = true;
                Some(Cursor::Grabbing)
            }
            PointerInput::Move { x, .. } => {
                if self.session.active && x.is_finite() {
                    self.session.accumulated_offset = x - self.session.origin_client_x;
                }
                None
            }
            PointerInput::Up => self.release(),
            PointerInput::Leave => {
                self.hovered = false;
                self.release()
            }
            PointerInput::Enter => {
                self.hovered = true;
                None
            }
        }
    }

    fn release(&mut self) -> Option<Cursor> {
        if !self.session.active {
            return None;
        }
        // The last offset stays frozen in the session as the decay seed.
        self.session.active = false;
        Some(Cursor::Grab)
    }
}
