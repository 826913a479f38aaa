//! Cart lines and the pure bookkeeping over them
use super::catalog::Product;

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Eq, PartialEq)]
pub struct CartLine {
    #[n(0)]
    pub product: Product, // snapshot taken when the line was created
    #[n(1)]
    pub quantity: u64,
}

/// Ordered cart lines, at most one per product id.
///
/// Item count and total are derived from `lines` on demand and never stored.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartLine {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }
    /// Exact in `u128`: a `u64` price times a `u64` quantity cannot overflow it.
    pub fn subtotal(&self) -> u128 {
        u128::from(self.product.price) * u128::from(self.quantity)
    }
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from previously persisted lines. Zero-quantity lines are
    /// dropped and repeated ids are folded into the first occurrence.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut state = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match state.position(&line.product.id) {
                Some(idx) => {
                    let existing = &mut state.lines[idx];
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => state.lines.push(line),
            }
        }
        state
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product.id == product_id)
    }

    /// Increment an existing line or append a new one. Returns the new quantity.
    pub fn add(&mut self, product: Product) -> u64 {
        match self.position(&product.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines.push(CartLine::new(product));
                1
            }
        }
    }

    pub fn remove(&mut self, product_id: &str) -> Option<CartLine> {
        let idx = self.position(product_id)?;
        Some(self.lines.remove(idx))
    }

    /// Set an existing line's quantity. The caller removes the line for
    /// quantities of zero; this returns `None` when no line matches.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u64) -> Option<u64> {
        debug_assert!(quantity > 0);
        let idx = self.position(product_id)?;
        self.lines[idx].quantity = quantity;
        Some(quantity)
    }

    pub fn item_count(&self) -> u128 {
        self.lines
            .iter()
            .map(|line| u128::from(line.quantity))
            .sum()
    }

    pub fn total(&self) -> u128 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}
