//! Pure rules: dice, intent routing, and combat math.

pub mod combat;
pub mod dice;
pub mod router;
