use crate::domain::common::{deserialize_numeric_id, AggregateId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// ID Types
// ============================================================================

/// Идентификатор товара витрины
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        u64::from_string(s).map(ProductId::new)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_numeric_id(deserializer).map(ProductId)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Идентификатор варианта товара (значение нативного `<select>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VariantId(pub u64);

impl VariantId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl AggregateId for VariantId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        u64::from_string(s).map(VariantId::new)
    }
}

impl<'de> Deserialize<'de> for VariantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_numeric_id(deserializer).map(VariantId)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Variant
// ============================================================================

/// Вариант товара: одна покупаемая комбинация значений опций
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VariantData")]
pub struct Variant {
    pub id: VariantId,
    pub title: String,
    /// Значения опций в порядке опций товара
    pub options: Vec<String>,
    pub available: bool,
    /// Цена в минимальных единицах валюты
    pub price: Option<i64>,
    pub sku: Option<String>,
}

/// Сырой вариант из JSON витрины: значения приходят массивом `options`
/// или полями `option1`..`option3`
#[derive(Deserialize)]
struct VariantData {
    id: VariantId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    option1: Option<String>,
    #[serde(default)]
    option2: Option<String>,
    #[serde(default)]
    option3: Option<String>,
    #[serde(default)]
    available: bool,
    #[serde(default)]
    price: Option<i64>,
    #[serde(default)]
    sku: Option<String>,
}

impl From<VariantData> for Variant {
    fn from(data: VariantData) -> Self {
        let options = match data.options {
            Some(options) => options,
            None => [data.option1, data.option2, data.option3]
                .into_iter()
                .map_while(|value| value)
                .collect(),
        };

        Self {
            id: data.id,
            title: data.title,
            options,
            available: data.available,
            price: data.price,
            sku: data.sku,
        }
    }
}

impl Variant {
    /// Совпадает ли кортеж значений с опциями варианта (строго, с учётом порядка)
    pub fn matches<S: AsRef<str>>(&self, selected: &[S]) -> bool {
        self.options.len() == selected.len()
            && self
                .options
                .iter()
                .zip(selected)
                .all(|(own, wanted)| own == wanted.as_ref())
    }
}

// ============================================================================
// Product
// ============================================================================

/// Измерение вариативности товара (Размер, Цвет, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductOption {
    pub name: String,
    /// Позиция опции, начиная с 1
    pub position: usize,
    pub values: Vec<String>,
}

/// Товар витрины с вариантами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProductData")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub handle: String,
    pub options: Vec<ProductOption>,
    pub variants: Vec<Variant>,
}

#[derive(Deserialize)]
struct ProductData {
    id: ProductId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    handle: String,
    #[serde(default)]
    options: Vec<OptionData>,
    #[serde(default)]
    variants: Vec<Variant>,
}

/// Опция приходит либо именем (`{{ product | json }}`), либо объектом
/// (`/products/<handle>.js`)
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionData {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        values: Vec<String>,
    },
}

impl From<ProductData> for Product {
    fn from(data: ProductData) -> Self {
        let options = data
            .options
            .into_iter()
            .enumerate()
            .map(|(index, option)| {
                let (name, values) = match option {
                    OptionData::Name(name) => (name, Vec::new()),
                    OptionData::Detailed { name, values } => (name, values),
                };
                let values = if values.is_empty() {
                    distinct_values_at(&data.variants, index)
                } else {
                    values
                };
                ProductOption {
                    name,
                    position: index + 1,
                    values,
                }
            })
            .collect();

        Self {
            id: data.id,
            title: data.title,
            handle: data.handle,
            options,
            variants: data.variants,
        }
    }
}

/// Уникальные значения опции `index` в порядке первого появления
fn distinct_values_at(variants: &[Variant], index: usize) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for value in variants.iter().filter_map(|v| v.options.get(index)) {
        if !values.contains(value) {
            values.push(value.clone());
        }
    }
    values
}

impl Product {
    /// Разобрать товар из JSON витрины
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    /// Возможные значения опции по индексу (пусто для несуществующего индекса)
    pub fn option_values(&self, index: usize) -> &[String] {
        self.options
            .get(index)
            .map(|o| o.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variant_by_id(&self, id: VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Вариант, чей кортеж опций точно совпадает с выбранным.
    ///
    /// Неполный кортеж не совпадает ни с чем.
    pub fn variant_for<S: AsRef<str>>(&self, selected: &[S]) -> Option<&Variant> {
        if selected.len() != self.options.len() {
            return None;
        }
        self.variants.iter().find(|v| v.matches(selected))
    }

    /// Первый доступный к покупке вариант в порядке списка
    pub fn first_available(&self) -> Option<&Variant> {
        self.variants.iter().find(|v| v.available)
    }
}
