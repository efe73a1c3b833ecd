//! Bilingual message handling.
//!
//! The roster API returns messages in English and Arabic. Everything the console
//! shows is resolved in the user's selected language and falls back to the other
//! language, then to a built-in string, so there is always something to display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

/// Display language selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Ar => write!(f, "ar"),
        }
    }
}

impl FromStr for Language {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ar" | "arabic" => Ok(Language::Ar),
            _ => Err(ConsoleError::Config(format!(
                "unknown language '{s}', expected 'en' or 'ar'"
            ))),
        }
    }
}

/// A message pair as sent by the backend (`messageEn` / `messageAr`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BilingualMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

impl BilingualMessage {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: non_blank(en.into()),
            ar: non_blank(ar.into()),
        }
    }

    /// Message known only in English (transport errors, client-side text).
    pub fn english(en: impl Into<String>) -> Self {
        Self {
            en: non_blank(en.into()),
            ar: None,
        }
    }

    pub fn from_text(text: UiText) -> Self {
        Self::new(text.en, text.ar)
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_none() && self.ar.is_none()
    }

    /// Resolve in `lang`, falling back to the other language.
    pub fn resolve(&self, lang: Language) -> Option<&str> {
        let (primary, secondary) = match lang {
            Language::En => (&self.en, &self.ar),
            Language::Ar => (&self.ar, &self.en),
        };
        primary.as_deref().or(secondary.as_deref())
    }

    /// Resolve in `lang`, falling back to the other language and then to `fallback`.
    pub fn resolve_or(&self, lang: Language, fallback: UiText) -> String {
        self.resolve(lang)
            .map(str::to_string)
            .unwrap_or_else(|| fallback.get(lang).to_string())
    }
}

impl fmt::Display for BilingualMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve_or(Language::En, text::REQUEST_FAILED))
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// A built-in UI string with both translations baked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiText {
    pub en: &'static str,
    pub ar: &'static str,
}

impl UiText {
    pub const fn new(en: &'static str, ar: &'static str) -> Self {
        Self { en, ar }
    }

    pub fn get(&self, lang: Language) -> &'static str {
        match lang {
            Language::En => self.en,
            Language::Ar if self.ar.is_empty() => self.en,
            Language::Ar => self.ar,
        }
    }
}

/// Built-in strings used by the views.
pub mod text {
    use super::UiText;

    pub const LOADING: UiText = UiText::new("Loading...", "جارٍ التحميل...");
    pub const NO_DATA: UiText = UiText::new("No data found", "لا توجد بيانات");
    pub const REQUEST_FAILED: UiText = UiText::new("Request failed", "فشل الطلب");
    pub const NOT_FOUND: UiText = UiText::new("Record not found", "السجل غير موجود");
    pub const FORBIDDEN: UiText = UiText::new(
        "You do not have permission to view this record",
        "ليس لديك صلاحية لعرض هذا السجل",
    );
    pub const BACK_TO_LIST: UiText = UiText::new("Back to list", "العودة إلى القائمة");
    pub const TIMEOUT: UiText = UiText::new("The request timed out", "انتهت مهلة الطلب");
    pub const REASON_REQUIRED: UiText = UiText::new("A reason is required", "السبب مطلوب");
    pub const DELETED: UiText = UiText::new("Deleted successfully", "تم الحذف بنجاح");
    pub const LOGGED_IN: UiText = UiText::new("Logged in", "تم تسجيل الدخول");
    pub const CREDENTIALS_REQUIRED: UiText = UiText::new(
        "Email and password are required",
        "البريد الإلكتروني وكلمة المرور مطلوبان",
    );
    pub const LOGGED_OUT: UiText = UiText::new("Logged out", "تم تسجيل الخروج");
    pub const PREVIOUS: UiText = UiText::new("Previous", "السابق");
    pub const NEXT: UiText = UiText::new("Next", "التالي");
    pub const SHOWING: UiText = UiText::new("Showing", "عرض");
    pub const OF: UiText = UiText::new("of", "من");
}
