//! Keeping host cart line quantities in step with the ledger.

use std::fmt;

use fitment_ledger::{Action, Change, ProductId};
use serde::{Deserialize, Serialize};

use crate::WidgetError;

/// Which control the host cart should treat as the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityHint {
    Plus,
    Minus,
    Set,
}

impl QuantityHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for QuantityHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product's line in the host cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    /// 1-based line number used by the host's update call.
    pub line: usize,
    pub quantity: u32,
}

/// An absolute quantity to push to a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineUpdate {
    pub product_id: ProductId,
    pub line: usize,
    pub quantity: u32,
    /// `None` when the line is being emptied.
    pub hint: Option<QuantityHint>,
}

/// Port to the host cart's line-item API.
pub trait CartLineBridge {
    /// The cart line holding a product, if any.
    fn line_for(&self, product_id: &ProductId) -> Option<CartLine>;

    /// Set a line's quantity. Zero removes the line.
    fn update_quantity(
        &mut self,
        line: usize,
        quantity: u32,
        hint: Option<QuantityHint>,
    ) -> Result<(), WidgetError>;
}

impl<B: CartLineBridge + ?Sized> CartLineBridge for &mut B {
    fn line_for(&self, product_id: &ProductId) -> Option<CartLine> {
        (**self).line_for(product_id)
    }

    fn update_quantity(
        &mut self,
        line: usize,
        quantity: u32,
        hint: Option<QuantityHint>,
    ) -> Result<(), WidgetError> {
        (**self).update_quantity(line, quantity, hint)
    }
}

/// Work out the line update that mirrors a ledger change.
///
/// A product with no car types left empties its line. Otherwise the line
/// follows the change but never drops below 1. Returns `None` when nothing
/// would change.
pub fn plan_line_update(change: &Change, line: CartLine) -> Option<LineUpdate> {
    if change.is_noop() {
        return None;
    }
    let current = i64::from(line.quantity);
    let (quantity, hint) = if change.product_removed() {
        (0, None)
    } else {
        match change.action {
            Action::Add | Action::Increase => (current + change.delta(), Some(QuantityHint::Plus)),
            Action::Decrease => ((current - 1).max(1), Some(QuantityHint::Minus)),
            Action::SetQuantity => ((current + change.delta()).max(1), Some(QuantityHint::Set)),
            Action::Remove => (
                (current - i64::from(change.before)).max(1),
                Some(QuantityHint::Minus),
            ),
        }
    };
    let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
    if quantity == line.quantity {
        return None;
    }
    Some(LineUpdate {
        product_id: change.product_id.clone(),
        line: line.line,
        quantity,
        hint,
    })
}

/// In-memory cart, for tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct MemoryCart {
    lines: Vec<(ProductId, u32)>,
    updates: Vec<LineUpdate>,
}

impl MemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line (or add to an existing one).
    pub fn with_line(mut self, product_id: impl Into<ProductId>, quantity: u32) -> Self {
        let product_id = product_id.into();
        match self.lines.iter_mut().find(|(p, _)| *p == product_id) {
            Some((_, q)) => *q += quantity,
            None => self.lines.push((product_id, quantity)),
        }
        self
    }

    pub fn quantity(&self, product_id: &ProductId) -> Option<u32> {
        self.line_for(product_id).map(|l| l.quantity)
    }

    /// Every update applied, oldest first.
    pub fn updates(&self) -> &[LineUpdate] {
        &self.updates
    }
}

impl CartLineBridge for MemoryCart {
    fn line_for(&self, product_id: &ProductId) -> Option<CartLine> {
        self.lines
            .iter()
            .position(|(p, _)| p == product_id)
            .map(|i| CartLine {
                line: i + 1,
                quantity: self.lines[i].1,
            })
    }

    fn update_quantity(
        &mut self,
        line: usize,
        quantity: u32,
        hint: Option<QuantityHint>,
    ) -> Result<(), WidgetError> {
        let index = line
            .checked_sub(1)
            .filter(|i| *i < self.lines.len())
            .ok_or_else(|| WidgetError::Bridge(format!("no cart line {}", line)))?;
        self.updates.push(LineUpdate {
            product_id: self.lines[index].0.clone(),
            line,
            quantity,
            hint,
        });
        if quantity == 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].1 = quantity;
        }
        Ok(())
    }
}
