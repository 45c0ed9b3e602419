use super::types::ListParams;

/// Renders the ORDER BY / LIMIT / OFFSET tail of the ad listing query.
/// Columns come from the `SortField` whitelist, never from request text.
pub struct FilterOrder;

impl FilterOrder {
    pub fn generate(table_alias: &str, params: &ListParams) -> String {
        let dir = params.order.to_sql();
        // id breaks ties so paging stays stable across equal sort keys
        format!(
            "ORDER BY {alias}.\"{col}\" {dir}, {alias}.\"id\" {dir} LIMIT {limit} OFFSET {offset}",
            alias = table_alias,
            col = params.sort.column(),
            dir = dir,
            limit = params.limit,
            offset = params.offset(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{SortDirection, SortField};

    #[test]
    fn default_order_is_newest_first() {
        let sql = FilterOrder::generate("a", &ListParams::default());
        assert_eq!(
            sql,
            "ORDER BY a.\"created_at\" DESC, a.\"id\" DESC LIMIT 10 OFFSET 0"
        );
    }

    #[test]
    fn page_offsets_by_limit() {
        let params = ListParams {
            page: 2,
            limit: 25,
            sort: SortField::Title,
            order: SortDirection::Asc,
        };
        assert_eq!(
            FilterOrder::generate("a", &params),
            "ORDER BY a.\"title\" ASC, a.\"id\" ASC LIMIT 25 OFFSET 25"
        );
    }
}
