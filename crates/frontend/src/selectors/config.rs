use contracts::domain::a001_product::Product;
use serde::Deserialize;

pub const DEFAULT_SELECTED_CLASS: &str = "selected";

/// Параметры создания селекторов, передаваемые страницей
///
/// Имена полей в стиле JS (`selectedClass`, `enableHistory`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Id исходного контрола вариантов, который скрывается и обновляется
    pub element: String,
    /// Исходник шаблона; без него используется встроенный
    #[serde(default)]
    pub template: Option<String>,
    pub product: Product,
    #[serde(default = "default_selected_class")]
    pub selected_class: String,
    #[serde(default)]
    pub enable_history: bool,
}

fn default_selected_class() -> String {
    DEFAULT_SELECTED_CLASS.to_string()
}

impl SelectorConfig {
    pub fn new(element: impl Into<String>, product: Product) -> Self {
        Self {
            element: element.into(),
            template: None,
            product,
            selected_class: default_selected_class(),
            enable_history: false,
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_selected_class(mut self, class: impl Into<String>) -> Self {
        self.selected_class = class.into();
        self
    }

    pub fn with_history(mut self, enabled: bool) -> Self {
        self.enable_history = enabled;
        self
    }
}
