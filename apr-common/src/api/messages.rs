//! Localized user-facing messages
//!
//! Built-in English and Arabic tables keyed by [`BusinessCode`].

use super::codes::BusinessCode;

/// Supported message locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Ar,
}

impl Locale {
    /// Parse a language tag such as `ar`, `ar-SA` or `en_US`
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match primary.as_str() {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }
}

/// Message lookup with a configured fallback locale
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    default_locale: Locale,
}

impl MessageCatalog {
    pub fn new(default_locale: Locale) -> Self {
        Self { default_locale }
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Pick a locale from an `Accept-Language` header value
    ///
    /// Takes the first supported tag in header order; quality weights are not
    /// re-ranked.
    pub fn resolve_locale(&self, accept_language: Option<&str>) -> Locale {
        accept_language
            .into_iter()
            .flat_map(|header| header.split(','))
            .filter_map(|entry| entry.split(';').next())
            .find_map(Locale::from_tag)
            .unwrap_or(self.default_locale)
    }

    pub fn message(&self, code: BusinessCode, locale: Locale) -> String {
        let text = match locale {
            Locale::En => english(code),
            Locale::Ar => arabic(code),
        };
        text.to_string()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new(Locale::En)
    }
}

fn english(code: BusinessCode) -> &'static str {
    match code {
        BusinessCode::TaskListSuccess => "Report tasks fetched successfully",
        BusinessCode::TaskCreateSuccess => "Report tasks saved successfully",
        BusinessCode::TaskGetSuccess => "Report task fetched successfully",
        BusinessCode::TaskUpdateSuccess => "Report task updated successfully",
        BusinessCode::TaskDeleteSuccess => "Report tasks deleted successfully",
        BusinessCode::TaskNotFound => "Report task not found",
        BusinessCode::TaskListFailed => "Failed to fetch report tasks",
        BusinessCode::TaskGetFailed => "Failed to fetch report task",
        BusinessCode::TaskCreationFailed => "Failed to save report tasks",
        BusinessCode::TaskUpdateFailed => "Failed to update report task",
        BusinessCode::TaskDeletionFailed => "Failed to delete report tasks",
        BusinessCode::TaskUnauthorizedAccess => "You are not authorized to modify report tasks",
        BusinessCode::SettingListSuccess => "Report settings fetched successfully",
        BusinessCode::SettingCreateSuccess => "Report settings saved successfully",
        BusinessCode::SettingGetSuccess => "Report setting fetched successfully",
        BusinessCode::SettingUpdateSuccess => "Report setting updated successfully",
        BusinessCode::SettingDeleteSuccess => "Report settings deleted successfully",
        BusinessCode::SettingNotFound => "Report setting not found",
        BusinessCode::SettingListFailed => "Failed to fetch report settings",
        BusinessCode::SettingGetFailed => "Failed to fetch report setting",
        BusinessCode::SettingCreationFailed => "Failed to save report settings",
        BusinessCode::SettingUpdateFailed => "Failed to update report setting",
        BusinessCode::SettingDeletionFailed => "Failed to delete report settings",
        BusinessCode::SettingUnauthorizedAccess => {
            "You are not authorized to modify report settings"
        }
        BusinessCode::InvalidRequest => "The request is invalid",
    }
}

fn arabic(code: BusinessCode) -> &'static str {
    match code {
        BusinessCode::TaskListSuccess => "تم جلب مهام التقرير بنجاح",
        BusinessCode::TaskCreateSuccess => "تم حفظ مهام التقرير بنجاح",
        BusinessCode::TaskGetSuccess => "تم جلب مهمة التقرير بنجاح",
        BusinessCode::TaskUpdateSuccess => "تم تحديث مهمة التقرير بنجاح",
        BusinessCode::TaskDeleteSuccess => "تم حذف مهام التقرير بنجاح",
        BusinessCode::TaskNotFound => "مهمة التقرير غير موجودة",
        BusinessCode::TaskListFailed => "فشل جلب مهام التقرير",
        BusinessCode::TaskGetFailed => "فشل جلب مهمة التقرير",
        BusinessCode::TaskCreationFailed => "فشل حفظ مهام التقرير",
        BusinessCode::TaskUpdateFailed => "فشل تحديث مهمة التقرير",
        BusinessCode::TaskDeletionFailed => "فشل حذف مهام التقرير",
        BusinessCode::TaskUnauthorizedAccess => "غير مصرح لك بتعديل مهام التقرير",
        BusinessCode::SettingListSuccess => "تم جلب إعدادات التقرير بنجاح",
        BusinessCode::SettingCreateSuccess => "تم حفظ إعدادات التقرير بنجاح",
        BusinessCode::SettingGetSuccess => "تم جلب إعداد التقرير بنجاح",
        BusinessCode::SettingUpdateSuccess => "تم تحديث إعداد التقرير بنجاح",
        BusinessCode::SettingDeleteSuccess => "تم حذف إعدادات التقرير بنجاح",
        BusinessCode::SettingNotFound => "إعداد التقرير غير موجود",
        BusinessCode::SettingListFailed => "فشل جلب إعدادات التقرير",
        BusinessCode::SettingGetFailed => "فشل جلب إعداد التقرير",
        BusinessCode::SettingCreationFailed => "فشل حفظ إعدادات التقرير",
        BusinessCode::SettingUpdateFailed => "فشل تحديث إعداد التقرير",
        BusinessCode::SettingDeletionFailed => "فشل حذف إعدادات التقرير",
        BusinessCode::SettingUnauthorizedAccess => "غير مصرح لك بتعديل إعدادات التقرير",
        BusinessCode::InvalidRequest => "الطلب غير صالح",
    }
}
