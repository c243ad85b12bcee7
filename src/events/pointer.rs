use globe_core::PointerInput;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
    Enter,
    Cancel,
}

impl PointerKind {
    pub const ALL: [PointerKind; 6] = [
        PointerKind::Down,
        PointerKind::Move,
        PointerKind::Up,
        PointerKind::Leave,
        PointerKind::Enter,
        PointerKind::Cancel,
    ];

    pub fn event_name(self) -> &'static str {
        match self {
            PointerKind::Down => "pointerdown",
            PointerKind::Move => "pointermove",
            PointerKind::Up => "pointerup",
            PointerKind::Leave => "pointerleave",
            PointerKind::Enter => "pointerenter",
            PointerKind::Cancel => "pointercancel",
        }
    }

    /// Translate a DOM event into engine input (client coordinates).
    pub fn input(self, ev: &web::Event) -> Option<PointerInput> {
        let mouse = ev.dyn_ref::<web::MouseEvent>()?;
        let x = mouse.client_x() as f64;
        let y = mouse.client_y() as f64;
        Some(match self {
            PointerKind::Down => PointerInput::Down { x, y },
            PointerKind::Move => PointerInput::Move { x, y },
            PointerKind::Up => PointerInput::Up,
            PointerKind::Leave => PointerInput::Leave,
            PointerKind::Enter => PointerInput::Enter,
            // The browser took the pointer over (scroll, gesture): end like a leave
            PointerKind::Cancel => PointerInput::Leave,
        })
    }
}
