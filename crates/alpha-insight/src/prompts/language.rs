//! Output language for the generated report

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the model is asked to write its recommendation in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    /// Chinese (Simplified)
    #[default]
    Chinese,
}

impl Language {
    /// Get ISO 639-1 language code
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    /// Name as it appears inside the prompt
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "Chinese",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    /// Parse from ISO 639-1 code or common name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "zh" | "chinese" | "中文" | "zh-cn" | "zh-hans" => Ok(Language::Chinese),
            other => Err(format!("unsupported language '{other}' (expected en or zh)")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("en".parse::<Language>(), Ok(Language::English));
        assert_eq!("English".parse::<Language>(), Ok(Language::English));
        assert_eq!("zh-CN".parse::<Language>(), Ok(Language::Chinese));
        assert_eq!("中文".parse::<Language>(), Ok(Language::Chinese));
        assert!("ja".parse::<Language>().is_err());
    }

    #[test]
    fn test_default_is_chinese() {
        assert_eq!(Language::default(), Language::Chinese);
        assert_eq!(Language::default().name(), "Chinese");
    }
}
