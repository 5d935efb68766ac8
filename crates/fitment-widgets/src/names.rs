//! Where a product's display name comes from.

use fitment_ledger::{Ledger, ProductId};

/// Page metadata that may carry the product title.
pub trait ProductNameSource {
    /// The product title element's text.
    fn page_title(&self) -> Option<String>;

    /// The `og:title` meta tag.
    fn og_title(&self) -> Option<String>;
}

/// Fixed page metadata.
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub og_title: Option<String>,
}

impl ProductNameSource for PageMeta {
    fn page_title(&self) -> Option<String> {
        self.title.clone()
    }

    fn og_title(&self) -> Option<String> {
        self.og_title.clone()
    }
}

/// Resolve a product name: page title, then `og:title`, then the name
/// already in the ledger, then `Product {id}`.
pub fn resolve_product_name(
    source: &dyn ProductNameSource,
    ledger: &Ledger,
    product_id: &ProductId,
) -> String {
    let non_blank = |s: String| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };
    source
        .page_title()
        .and_then(non_blank)
        .or_else(|| source.og_title().and_then(non_blank))
        .or_else(|| {
            ledger
                .product(product_id)
                .map(|p| p.product_name.clone())
                .and_then(non_blank)
        })
        .unwrap_or_else(|| product_id.fallback_name())
}
