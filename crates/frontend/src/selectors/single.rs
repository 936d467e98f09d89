//! One option dimension (Size, Color, ...) rendered as clickable values.
//!
//! The selector keeps no selection state of its own: the selected value is
//! whichever rendered node carries the selected class.

use super::host::DomHost;
use super::template::SelectorTemplate;
use contracts::domain::a001_product::ProductId;
use minijinja::context;

pub const OPTIONS_CLASS: &str = "options";
pub const VALUE_ATTRIBUTE: &str = "data-value";

/// Which value node to mark as selected.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<N> {
    /// Position among the selector's value nodes
    ByIndex(usize),
    ByNode(N),
}

#[derive(Debug, Clone)]
pub struct SingleOptionSelector {
    id: String,
    name: String,
    values: Vec<String>,
    product_id: ProductId,
    selected_class: String,
}

impl SingleOptionSelector {
    /// `index` is the zero-based option position; the id is `option{index + 1}`.
    pub fn new(
        index: usize,
        name: impl Into<String>,
        values: Vec<String>,
        product_id: ProductId,
        selected_class: impl Into<String>,
    ) -> Self {
        Self {
            id: option_id(index),
            name: name.into(),
            values,
            product_id,
            selected_class: selected_class.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Id of the rendered container: `selector-{product_id}-{option_id}`.
    pub fn dom_id(&self) -> String {
        format!("selector-{}-{}", self.product_id, self.id)
    }

    pub fn build_selector(&self, template: &SelectorTemplate) -> Result<String, minijinja::Error> {
        template.render(context! {
            option_id => &self.id,
            option_name => &self.name,
            option_values => &self.values,
            product_id => self.product_id.value(),
        })
    }

    pub fn element<H: DomHost>(&self, host: &H) -> Option<H::Node> {
        host.element_by_id(&self.dom_id())
    }

    /// Value nodes: children of `.options`, or of the container itself when
    /// the markup has no `.options` wrapper.
    pub fn value_nodes<H: DomHost>(&self, host: &H) -> Vec<H::Node> {
        let Some(root) = self.element(host) else {
            return Vec::new();
        };
        match host.first_with_class(&root, OPTIONS_CLASS) {
            Some(options) => host.children(&options),
            None => host.children(&root),
        }
    }

    pub fn current_selection<H: DomHost>(&self, host: &H) -> Option<H::Node> {
        self.value_nodes(host)
            .into_iter()
            .find(|node| has_class_token(&host.class_name(node), &self.selected_class))
    }

    pub fn selected_value<H: DomHost>(&self, host: &H) -> Option<String> {
        self.current_selection(host)
            .and_then(|node| host.attribute(&node, VALUE_ATTRIBUTE))
    }

    /// Remove the selected class from every value node carrying it.
    pub fn clear_selection<H: DomHost>(&self, host: &H) {
        for node in self.value_nodes(host) {
            let class_name = host.class_name(&node);
            if has_class_token(&class_name, &self.selected_class) {
                host.set_class_name(&node, &remove_class_token(&class_name, &self.selected_class));
            }
        }
    }

    /// Mark a value node as selected. Returns `false` for an index past the
    /// last value node.
    pub fn make_selection<H: DomHost>(&self, host: &H, selection: Selection<H::Node>) -> bool {
        let node = match selection {
            Selection::ByNode(node) => node,
            Selection::ByIndex(index) => match self.value_nodes(host).into_iter().nth(index) {
                Some(node) => node,
                None => return false,
            },
        };
        let class_name = host.class_name(&node);
        host.set_class_name(&node, &append_class_token(&class_name, &self.selected_class));
        true
    }
}

pub fn option_id(index: usize) -> String {
    format!("option{}", index + 1)
}

pub fn has_class_token(class_name: &str, token: &str) -> bool {
    class_name.split_whitespace().any(|t| t == token)
}

/// Drop every occurrence of `token`, matching whole tokens only.
pub fn remove_class_token(class_name: &str, token: &str) -> String {
    class_name
        .split_whitespace()
        .filter(|t| *t != token)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn append_class_token(class_name: &str, token: &str) -> String {
    if has_class_token(class_name, token) {
        return class_name.split_whitespace().collect::<Vec<_>>().join(" ");
    }
    class_name
        .split_whitespace()
        .chain(std::iter::once(token))
        .collect::<Vec<_>>()
        .join(" ")
}
