/// Flat stats buffer read by the UI.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32):
/// ```text
/// [Header: 12 floats]
/// [Occupancy: orbital_count × 1 float, configuration order]
/// ```

use crate::engine::stats::DerivedStats;
use crate::placement::{Feedback, FeedbackKind};
use crate::api::session::Session;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_ORBITAL_COUNT: usize = 1;
pub const HEADER_ELECTRONS_PLACED: usize = 2;
pub const HEADER_TOTAL_ELECTRONS: usize = 3;
pub const HEADER_BONDING: usize = 4;
pub const HEADER_ANTIBONDING: usize = 5;
pub const HEADER_BOND_ORDER: usize = 6;
pub const HEADER_UNPAIRED: usize = 7;
pub const HEADER_PARAMAGNETIC: usize = 8;
pub const HEADER_STABILITY_TIER: usize = 9;
pub const HEADER_HISTORY_DEPTH: usize = 10;
/// 0 = none, 1 = success, 2 = error, 3 = info.
pub const HEADER_FEEDBACK_KIND: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Buffer layout for a given orbital count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsLayout {
    pub orbital_count: usize,
    /// Offset (in floats) where occupancy data begins.
    pub occupancy_offset: usize,
    pub total_floats: usize,
}

impl StatsLayout {
    pub fn new(orbital_count: usize) -> Self {
        Self {
            orbital_count,
            occupancy_offset: HEADER_FLOATS,
            total_floats: HEADER_FLOATS + orbital_count,
        }
    }

    /// Rewrite `buf` with the session's current state.
    pub fn write(&self, session: &Session, buf: &mut Vec<f32>) {
        let stats = session.stats();
        buf.clear();
        buf.resize(self.total_floats, 0.0);
        write_header(buf, &stats, session, self.orbital_count);

        for (slot, orbital) in buf[self.occupancy_offset..]
            .iter_mut()
            .zip(session.configuration().iter())
        {
            *slot = orbital.electrons() as f32;
        }
    }
}

fn write_header(buf: &mut [f32], stats: &DerivedStats, session: &Session, orbital_count: usize) {
    buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    buf[HEADER_ORBITAL_COUNT] = orbital_count as f32;
    buf[HEADER_ELECTRONS_PLACED] = stats.electrons_placed as f32;
    buf[HEADER_TOTAL_ELECTRONS] = session.molecule().total_electrons as f32;
    buf[HEADER_BONDING] = stats.bonding_electrons as f32;
    buf[HEADER_ANTIBONDING] = stats.antibonding_electrons as f32;
    buf[HEADER_BOND_ORDER] = stats.bond_order as f32;
    buf[HEADER_UNPAIRED] = stats.unpaired_electrons as f32;
    buf[HEADER_PARAMAGNETIC] = if stats.is_paramagnetic { 1.0 } else { 0.0 };
    buf[HEADER_STABILITY_TIER] = stats.stability.index() as f32;
    buf[HEADER_HISTORY_DEPTH] = session.history_len() as f32;
    buf[HEADER_FEEDBACK_KIND] = feedback_code(session.feedback());
}

fn feedback_code(feedback: Option<&Feedback>) -> f32 {
    match feedback.map(|f| f.kind) {
        None => 0.0,
        Some(FeedbackKind::Success) => 1.0,
        Some(FeedbackKind::Error) => 2.0,
        Some(FeedbackKind::Info) => 3.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_offsets() {
        let layout = StatsLayout::new(10);
        assert_eq!(layout.occupancy_offset, HEADER_FLOATS);
        assert_eq!(layout.total_floats, 22);
    }

    #[test]
    fn write_reflects_session() {
        let mut session = Session::offline().unwrap();
        session.auto_fill();
        let layout = StatsLayout::new(session.configuration().len());
        let mut buf = Vec::new();
        layout.write(&session, &mut buf);

        assert_eq!(buf.len(), layout.total_floats);
        assert_eq!(buf[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(buf[HEADER_ELECTRONS_PLACED], 16.0);
        assert_eq!(buf[HEADER_TOTAL_ELECTRONS], 16.0);
        assert_eq!(buf[HEADER_BOND_ORDER], 2.0);
        assert_eq!(buf[HEADER_UNPAIRED], 2.0);
        assert_eq!(buf[HEADER_PARAMAGNETIC], 1.0);
        assert_eq!(buf[HEADER_HISTORY_DEPTH], 1.0);
        assert_eq!(buf[HEADER_FEEDBACK_KIND], 0.0);
        // σ1s first, σ*2p last
        assert_eq!(buf[layout.occupancy_offset], 2.0);
        assert_eq!(buf[layout.total_floats - 1], 0.0);
    }
}
