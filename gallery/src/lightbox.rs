use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Keys the lightbox reacts to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowRight,
    ArrowLeft,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unbound key: {0}")]
pub struct UnboundKey(pub String);

impl FromStr for LightboxKey {
    type Err = UnboundKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Escape" | "Esc" | "escape" | "esc" => Ok(LightboxKey::Escape),
            "ArrowRight" | "Right" | "right" => Ok(LightboxKey::ArrowRight),
            "ArrowLeft" | "Left" | "left" => Ok(LightboxKey::ArrowLeft),
            other => Err(UnboundKey(other.to_string())),
        }
    }
}

impl fmt::Display for LightboxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LightboxKey::Escape => "Escape",
            LightboxKey::ArrowRight => "ArrowRight",
            LightboxKey::ArrowLeft => "ArrowLeft",
        };
        write!(f, "{}", s)
    }
}
