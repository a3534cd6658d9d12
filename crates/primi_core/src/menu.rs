/// The draw actions offered for an image.
///
/// Ids and titles are fixed at build time; the id is the value click
/// dispatch reports back, the draw mode is what goes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Primitive,
    Triangle,
}

impl MenuAction {
    /// Every registered action, in menu order.
    pub const ALL: [MenuAction; 2] = [MenuAction::Primitive, MenuAction::Triangle];

    pub fn id(self) -> &'static str {
        match self {
            MenuAction::Primitive => "primitive-draw",
            MenuAction::Triangle => "triangle-draw",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MenuAction::Primitive => "draw with primitive",
            MenuAction::Triangle => "draw with triangle",
        }
    }

    /// Rendering style sent to the server in the `draw` form field.
    pub fn draw_mode(self) -> &'static str {
        match self {
            MenuAction::Primitive => "primitive",
            MenuAction::Triangle => "triangle",
        }
    }

    /// Resolves a clicked action id back to its menu entry.
    pub fn from_id(id: &str) -> Option<MenuAction> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}
