use super::host::DomHost;
use super::query::with_variant;
use contracts::domain::a001_product::Variant;

/// Отражает выбранный вариант в параметре `variant` адресной строки
#[derive(Debug, Clone, Copy)]
pub struct HistoryState {
    supported: bool,
}

impl HistoryState {
    pub fn new<H: DomHost>(host: &H) -> Self {
        Self {
            supported: host.supports_history(),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn on_selection<H: DomHost>(&self, host: &H, variant: &Variant) {
        if !self.supported {
            return;
        }
        let search = match with_variant(&host.location_search(), &variant.id.to_string()) {
            Ok(search) => search,
            Err(err) => {
                log::warn!("failed to encode variant {}: {}", variant.id, err);
                return;
            }
        };
        if let Err(err) = host.replace_search(&search) {
            log::warn!("failed to write variant {} to history: {}", variant.id, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::memory_dom::MemoryDom;
    use contracts::domain::a001_product::VariantId;

    fn variant(id: u64) -> Variant {
        Variant {
            id: VariantId(id),
            title: String::new(),
            options: vec![],
            available: true,
            price: None,
            sku: None,
        }
    }

    #[test]
    fn test_writes_param_when_supported() {
        let dom = MemoryDom::with_control("select").with_search("?ref=home");
        let history = HistoryState::new(&dom);
        assert!(history.is_supported());
        history.on_selection(&dom, &variant(12));
        assert_eq!(dom.location_search(), "?ref=home&variant=12");
        assert_eq!(dom.url_writes(), vec!["?ref=home&variant=12".to_string()]);
    }

    #[test]
    fn test_keeps_other_params_as_written() {
        let dom = MemoryDom::with_control("select")
            .with_search("?utm=a&filter[color]=red&variant=1&utm=b&q=a%20b");
        let history = HistoryState::new(&dom);
        history.on_selection(&dom, &variant(12));
        assert_eq!(
            dom.location_search(),
            "?utm=a&filter[color]=red&variant=12&utm=b&q=a%20b"
        );
    }

    #[test]
    fn test_noop_when_unsupported() {
        let dom = MemoryDom::with_control("select").without_history();
        let history = HistoryState::new(&dom);
        history.on_selection(&dom, &variant(12));
        assert!(dom.url_writes().is_empty());
        assert_eq!(dom.location_search(), "");
    }
}
