/// A high-level action produced by the keyboard for one processed frame.
///
/// The scene state consumes actions, never raw key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Stop the render loop.
    Quit,
    /// Append a layer to the tower.
    AddLayer,
    /// Remove the top layer of the tower.
    RemoveLayer,
    /// Change the camera orbit angle by the given radians.
    RotateCamera(f32),
}
