use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Serialize;
use std::fmt;
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + fmt::Debug
{
    /// Преобразовать ID в строку
    fn as_string(&self) -> String;

    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for u64 {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<u64>()
            .map_err(|e| format!("Invalid u64: {}", e))
    }
}

/// Десериализация числового ID из числа, целого float (JS number) или строки.
///
/// Витрина отдаёт ID числами, но из JS они приходят как f64, а из URL строкой.
pub fn deserialize_numeric_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct NumericIdVisitor;

    impl<'de> Visitor<'de> for NumericIdVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer id or its string form")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("negative id {}", v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64 {
                Ok(v as u64)
            } else {
                Err(E::custom(format!("id {} is not a non-negative integer", v)))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            u64::from_string(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(NumericIdVisitor)
}
