// extensions/mod.rs
//
// Optional extension modules for the engine.
// Decoupled from Entity/Scene storage: games opt in through EngineContext::tweens.

pub mod tween;

pub use tween::{TweenState, Tween, TweenChain, TweenId, TweenTarget, TweenLoop};
