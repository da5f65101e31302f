use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    Office,
    Home,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Office => "office",
            Self::Home => "home",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            "office" => Some(Self::Office),
            "home" => Some(Self::Home),
            _ => None,
        }
    }
}

/// User preferences. A stored snapshot may omit any field; missing fields
/// take their defaults when the snapshot is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub username: String,
    pub role: String,
    pub theme: Theme,
    pub notifications: bool,
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: "Administrator".to_string(),
            role: "Project Manager".to_string(),
            theme: Theme::Dark,
            notifications: true,
            sound: true,
        }
    }
}
