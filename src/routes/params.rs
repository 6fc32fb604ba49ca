use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// Page number, default 1
    pub page: Option<i64>,
    /// Items per page, default 20, at most 100
    pub per_page: Option<i64>,
    /// Only orders in this status (name or numeric code)
    pub status: Option<String>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// The status filter in the shape the status validator expects.
    pub fn status_value(&self) -> Option<Value> {
        let raw = self.status.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some(match raw.parse::<i64>() {
            Ok(code) => Value::from(code),
            Err(_) => Value::from(raw),
        })
    }
}
