use std::cell::RefCell;
use std::rc::Rc;

use duo_wire::{CanvasSize, RectangleCommand, TextCommand};

use crate::font::FontHandle;

/// A concrete drawing target that recorded commands are replayed onto.
///
/// There is one method per [`DrawCommand`](duo_wire::DrawCommand) variant;
/// a replayer matches on the command and calls the corresponding method
/// with the command's own arguments, so a surface can never be asked to do
/// anything outside this set.
pub trait Surface {
    /// Logical dimensions of the surface
    fn canvas(&self) -> CanvasSize;

    /// Fill and/or outline the inclusive corner span of `rect`
    fn rectangle(&mut self, rect: &RectangleCommand);

    /// Draw `text` with an already-resolved font
    fn text(&mut self, text: &TextCommand, font: &FontHandle);
}

/// A surface shared between a recorder (for live preview) and its owner
pub type SharedSurface = Rc<RefCell<dyn Surface>>;
