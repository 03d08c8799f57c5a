use crate::model::{CartLine, CartMembership, ProductRecord};

/// Recomputes cart membership for every record from `lines`.
///
/// Only `membership` changes; catalog fields, `loading` and `error` are carried
/// over untouched. Running it twice with the same lines gives the same list.
pub fn reconcile(records: &[ProductRecord], lines: &[CartLine]) -> Vec<ProductRecord> {
    records.iter().cloned().map(|record| overlay(record, lines)).collect()
}

/// Membership of a single record.
pub fn overlay(mut record: ProductRecord, lines: &[CartLine]) -> ProductRecord {
    record.membership = lines
        .iter()
        .find(|line| line.merchandise.id == *record.merchandise_id())
        .map(|line| CartMembership::InCart(line.id.clone()))
        .unwrap_or(CartMembership::Absent);
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(id: &str, title: &str) -> ProductRecord {
        let mut record = ProductRecord::placeholder(id.into());
        record.loading = false;
        record.title = title.to_string();
        record.price_label = "USD 1.00".to_string();
        record
    }

    #[test]
    fn test_marks_records_with_matching_lines() {
        let records = vec![loaded("a", "A"), loaded("b", "B")];
        let lines = vec![
            CartLine::new("line-9", "other"),
            CartLine::new("line-2", "b"),
        ];

        let synced = reconcile(&records, &lines);

        assert!(!synced[0].is_in_cart());
        assert_eq!(synced[0].cart_line_id(), None);
        assert!(synced[1].is_in_cart());
        assert_eq!(synced[1].cart_line_id(), Some("line-2"));
    }

    #[test]
    fn test_overlay_leaves_catalog_fields_alone() {
        let mut failed = ProductRecord::placeholder("a".into());
        failed.loading = false;
        failed.error = "Failed to load product".to_string();
        let pending = ProductRecord::placeholder("b".into());

        let synced = reconcile(
            &[failed.clone(), pending.clone()],
            &[CartLine::new("l1", "a"), CartLine::new("l2", "b")],
        );

        assert_eq!(synced[0].error, failed.error);
        assert!(!synced[0].loading);
        assert!(synced[1].loading);
        assert_eq!(synced[1].title, "");
        assert_eq!(synced[1].cart_line_id(), Some("l2"));
    }

    #[test]
    fn test_lines_leaving_the_cart_clear_membership() {
        let mut record = loaded("a", "A");
        record.membership = CartMembership::InCart("l1".into());

        let synced = reconcile(&[record], &[]);

        assert_eq!(synced[0].membership, CartMembership::Absent);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let records = vec![loaded("a", "A"), loaded("b", "B"), loaded("c", "C")];
        let lines = vec![CartLine::new("l1", "c"), CartLine::new("l2", "a")];

        let once = reconcile(&records, &lines);
        let twice = reconcile(&once, &lines);

        assert_eq!(once, twice);
    }
}
