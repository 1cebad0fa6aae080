//! Browser-independent show logic. Everything here builds and is tested on
//! the host; the wasm glue only feeds it timestamps and input events.
pub mod color;
pub mod confetti;
pub mod emitter;
pub mod ephemeral;
pub mod gate;
pub mod reactive;

pub use confetti::ConfettiField;
pub use emitter::{BurstConfig, BurstQueue, EffectEmitter, ScheduledBurst};
pub use ephemeral::{Cadence, CometSky, DecorSpec, ElementId, EphemeralRegistry};
pub use gate::{AttemptSource, HintState, PlayAttempt, PlaybackGate, Settled, UnlockState};
pub use reactive::{loudness_from_bytes, FrameParams, PointField, SurfaceSize, SurfaceTracker};
