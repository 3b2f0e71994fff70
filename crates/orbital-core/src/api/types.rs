use bytemuck::{Pod, Zeroable};

/// An audio cue emitted by the session.
/// The numeric value maps to a sound in the UI's audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Cue(pub u32);

impl Cue {
    pub const ORBITAL_ADD: Cue = Cue(1);
    pub const ORBITAL_REMOVE: Cue = Cue(2);
    pub const ERROR: Cue = Cue(3);
    pub const SUCCESS: Cue = Cue(4);
    pub const UNDO: Cue = Cue(5);
    pub const SWITCH: Cue = Cue(6);
}

/// A stats event communicated to the UI as four floats.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StatEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl StatEvent {
    pub const FLOATS: usize = 4;

    /// a = electrons placed, b = total electrons, c = bond order.
    pub const PROGRESS: f32 = 1.0;
    /// a = unpaired electrons, b = 1 if paramagnetic, c = stability tier index.
    pub const MAGNETISM: f32 = 2.0;
    /// a = 1 if the check passed, 0 otherwise.
    pub const CHECKED: f32 = 3.0;
    /// a = request id of a hint that just settled, b = 1 if the fallback was used.
    pub const HINT: f32 = 4.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<StatEvent>(), StatEvent::FLOATS * 4);
        let events = [StatEvent { kind: StatEvent::PROGRESS, a: 3.0, b: 16.0, c: 0.5 }];
        let floats: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(floats, &[1.0, 3.0, 16.0, 0.5]);
    }
}
