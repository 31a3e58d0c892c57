pub mod gacha;
pub mod general;
