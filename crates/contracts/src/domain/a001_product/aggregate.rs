use serde::{Deserialize, Serialize};

/// Товар (таблица products)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub msku: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Данные для создания товара (без id и служебных дат)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    pub msku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), String> {
        if self.sku.trim().is_empty() {
            return Err("SKU is required".into());
        }
        if self.name.trim().is_empty() {
            return Err("Product name is required".into());
        }
        Ok(())
    }
}

/// Частичное обновление товара
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub msku: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<NewProduct> for ProductUpdate {
    fn from(p: NewProduct) -> Self {
        Self {
            sku: Some(p.sku),
            msku: Some(p.msku),
            name: Some(p.name),
            description: p.description,
        }
    }
}

/// Краткая ссылка на товар для вложенных выборок
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: String,
    pub sku: String,
    pub msku: String,
    pub name: String,
}

impl From<&Product> for ProductRef {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            sku: p.sku.clone(),
            msku: p.msku.clone(),
            name: p.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_sku_and_name() {
        let mut p = NewProduct {
            sku: "GLD".into(),
            msku: "Golden Apple".into(),
            name: "Golden".into(),
            description: None,
        };
        assert!(p.validate().is_ok());
        p.sku = "  ".into();
        assert!(p.validate().is_err());
        p.sku = "GLD".into();
        p.name = String::new();
        assert!(p.validate().is_err());
    }
}
