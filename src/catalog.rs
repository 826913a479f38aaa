//! Static product catalog and the queries the storefront runs against it
use super::error::CatalogError;
use std::fmt;
use std::str::FromStr;

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Category {
    #[n(0)]
    Men,
    #[n(1)]
    Women,
    #[n(2)]
    Kids,
    #[n(3)]
    Footwear,
    #[n(4)]
    Accessories,
    #[n(5)]
    Electronics,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Men,
        Category::Women,
        Category::Kids,
        Category::Footwear,
        Category::Accessories,
        Category::Electronics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
            Category::Kids => "kids",
            Category::Footwear => "footwear",
            Category::Accessories => "accessories",
            Category::Electronics => "electronics",
        }
    }

    /// Maps a category card heading such as "Men's Clothing" or "Kids Wear"
    /// onto a category. `None` means the filter shows every product.
    pub fn from_filter_label(label: &str) -> Option<Self> {
        let normalised: String = label
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        match normalised.as_str() {
            "men" | "mens" | "mensclothing" | "menclothing" => Some(Category::Men),
            "women" | "womens" | "womensclothing" | "womenclothing" => Some(Category::Women),
            "kids" | "kidswear" => Some(Category::Kids),
            "footwear" => Some(Category::Footwear),
            "accessories" => Some(Category::Accessories),
            "electronics" => Some(Category::Electronics),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Eq, PartialEq)]
pub struct Product {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub title: String,
    #[n(2)]
    pub description: String,
    #[n(3)]
    pub price: u64, // whole units of the storefront currency
    #[n(4)]
    pub image: String,
    #[n(5)]
    pub category: Category,
    #[n(6)]
    pub badge: Option<String>,
}

impl Product {
    pub fn new(id: &str, title: &str, price: u64, category: Category) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            price,
            image: String::new(),
            category,
            badge: None,
        }
    }
    pub fn set_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
    pub fn set_image(mut self, image: &str) -> Self {
        self.image = image.to_string();
        self
    }
    pub fn set_badge(mut self, badge: &str) -> Self {
        self.badge = Some(badge.to_string());
        self
    }

    /// Case-insensitive substring match against title and description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The eight products shipped with the storefront page.
    pub fn builtin() -> Self {
        let products = vec![
            Product::new("1", "Premium Cotton T-Shirt", 899, Category::Men)
                .set_description("Comfortable and stylish cotton t-shirt perfect for everyday wear")
                .set_image("https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=300&h=300&fit=crop")
                .set_badge("New"),
            Product::new("2", "Elegant Summer Dress", 2499, Category::Women)
                .set_description("Beautiful summer dress with floral patterns and comfortable fit")
                .set_image("https://images.unsplash.com/photo-1572804013309-59a88b7e92f1?w=300&h=300&fit=crop")
                .set_badge("Trending"),
            Product::new("3", "Kids Casual Wear Set", 1299, Category::Kids)
                .set_description("Adorable casual wear set for kids, comfortable and durable")
                .set_image("https://images.unsplash.com/photo-1554995207-c18c203602cb?w=300&h=300&fit=crop")
                .set_badge("Sale"),
            Product::new("4", "Running Shoes", 3999, Category::Footwear)
                .set_description("High-performance running shoes with advanced cushioning")
                .set_image("https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=300&h=300&fit=crop")
                .set_badge("Popular"),
            Product::new("5", "Leather Handbag", 3499, Category::Accessories)
                .set_description("Premium leather handbag with multiple compartments")
                .set_image("https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=300&h=300&fit=crop")
                .set_badge("Limited"),
            Product::new("6", "Smart Watch", 8999, Category::Electronics)
                .set_description("Feature-rich smartwatch with health tracking capabilities")
                .set_image("https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=300&h=300&fit=crop")
                .set_badge("New"),
            Product::new("7", "Denim Jacket", 2799, Category::Men)
                .set_description("Classic denim jacket with modern fit and premium quality")
                .set_image("https://images.unsplash.com/photo-1551028719-00167b16eac5?w=300&h=300&fit=crop")
                .set_badge("Hot"),
            Product::new("8", "Yoga Pants", 1599, Category::Women)
                .set_description("Comfortable and flexible yoga pants for active lifestyle")
                .set_image("https://images.unsplash.com/photo-1506629905607-d405b7a30db6?w=300&h=300&fit=crop")
                .set_badge("Best Seller"),
        ];

        Self::new(products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn get(&self, product_id: &str) -> Result<&Product, CatalogError> {
        self.find(product_id)
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_string()))
    }

    /// Add a product at runtime. Ids stay unique across the catalog.
    pub fn insert(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.find(&product.id).is_some() {
            return Err(CatalogError::DuplicateProduct(product.id));
        }
        self.products.push(product);
        Ok(())
    }

    /// `None` returns the full catalog.
    pub fn filter(&self, category: Option<Category>) -> Vec<&Product> {
        match category {
            Some(category) => self
                .products
                .iter()
                .filter(|p| p.category == category)
                .collect(),
            None => self.products.iter().collect(),
        }
    }

    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.matches(query)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_unique_ids() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn filter_labels_from_category_cards() {
        assert_eq!(Category::from_filter_label("Men's Clothing"), Some(Category::Men));
        assert_eq!(Category::from_filter_label("Women's Clothing"), Some(Category::Women));
        assert_eq!(Category::from_filter_label("Kids Wear"), Some(Category::Kids));
        assert_eq!(Category::from_filter_label("Electronics"), Some(Category::Electronics));
        assert_eq!(Category::from_filter_label("Home & Kitchen"), None);
    }

    #[test]
    fn category_parses_from_its_name() {
        assert_eq!("footwear".parse::<Category>(), Ok(Category::Footwear));
        assert_eq!(
            "shoes".parse::<Category>(),
            Err(CatalogError::UnknownCategory("shoes".into()))
        );
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let catalog = Catalog::builtin();

        let ids: Vec<&str> = catalog.search("COTTON").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);

        // "health tracking" only appears in the smart watch description
        let ids: Vec<&str> = catalog.search("health").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["6"]);

        assert_eq!(catalog.search("").len(), catalog.len());
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut catalog = Catalog::builtin();
        let dup = Product::new("1", "Another Shirt", 10, Category::Men);

        assert_eq!(
            catalog.insert(dup),
            Err(CatalogError::DuplicateProduct("1".into()))
        );
        assert_eq!(catalog.len(), 8);
    }
}
