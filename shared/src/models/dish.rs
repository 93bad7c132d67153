//! Dish Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

const MAX_PAGE: u32 = 10_000;

/// Dish visibility on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DishStatus {
    Available,
    Unavailable,
    Hidden,
}

impl DishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
            Self::Hidden => "Hidden",
        }
    }
}

/// Dish entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub status: DishStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / update dish payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDishBody {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DishStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Dish list query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishListParams {
    pub page: u32,
    pub limit: u32,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub search: Option<String>,
    pub status: Option<DishStatus>,
    pub from_price: Option<f64>,
    pub to_price: Option<f64>,
}

impl Default for DishListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 5,
            sort_by: None,
            sort_order: None,
            search: None,
            status: None,
            from_price: None,
            to_price: None,
        }
    }
}

impl DishListParams {
    /// Validate paging bounds and the price filter.
    ///
    /// A `from_price` of exactly zero is always accepted; otherwise both bounds
    /// must be present and ordered.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.page == 0 || self.page > MAX_PAGE {
            errors.push(FieldError::new("page", "Page must be between 1 and 10000"));
        }
        if self.limit == 0 || self.limit > MAX_PAGE {
            errors.push(FieldError::new("limit", "Limit must be between 1 and 10000"));
        }

        let price_ok = match (self.from_price, self.to_price) {
            (None, None) => true,
            (Some(from), _) if from == 0.0 => true,
            (Some(from), Some(to)) => from <= to,
            _ => false,
        };
        if !price_ok {
            errors.push(FieldError::new(
                "toPrice",
                "From price must be less than to price",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Query pairs in wire order, skipping unset filters
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(sort_by) = &self.sort_by {
            query.push(("sortBy".to_string(), sort_by.clone()));
        }
        if let Some(order) = self.sort_order {
            query.push(("sortOrder".to_string(), order.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(from) = self.from_price {
            query.push(("fromPrice".to_string(), from.to_string()));
        }
        if let Some(to) = self.to_price {
            query.push(("toPrice".to_string(), to.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(DishListParams::default().validate().is_ok());
    }

    #[test]
    fn price_range_must_be_ordered() {
        let params = DishListParams {
            from_price: Some(50.0),
            to_price: Some(10.0),
            ..Default::default()
        };
        let errors = params.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "toPrice");
    }

    #[test]
    fn zero_from_price_is_always_accepted() {
        let params = DishListParams {
            from_price: Some(0.0),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn lone_to_price_is_rejected() {
        let params = DishListParams {
            to_price: Some(20.0),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn paging_bounds_are_checked() {
        let params = DishListParams {
            page: 0,
            limit: 10_001,
            ..Default::default()
        };
        let fields: Vec<_> = params
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["page", "limit"]);
    }

    #[test]
    fn query_skips_unset_filters() {
        let params = DishListParams {
            search: Some("pho".into()),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "5".to_string()),
                ("sortOrder".to_string(), "desc".to_string()),
                ("search".to_string(), "pho".to_string()),
            ]
        );
    }
}
