//! Game event kinds sent to the host.

/// Heading changed. `a` = -1 left, 0 none, 1 right.
pub const HEADING: f32 = 1.0;
/// Crash sequence started.
pub const CRASH: f32 = 2.0;
/// Crash sequence finished, control is back.
pub const RECOVERED: f32 = 3.0;
/// Opponent car spawned. `a` = x.
pub const CAR_SPAWNED: f32 = 4.0;

/// Tween completion ID marking the end of the crash sequence.
pub(crate) const RECOVERY_DONE: u32 = 1;
