use crate::schema::ChannelTable;

/// Number rows 1..N in their current order, replacing any previous numbering.
pub fn reindex(table: &mut ChannelTable) {
    for (i, row) in table.rows.iter_mut().enumerate() {
        row.location = i + 1;
    }
}

/// Owned variant of [`reindex`].
pub fn reindexed(mut table: ChannelTable) -> ChannelTable {
    reindex(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::baseline_row;

    fn table(n: usize) -> ChannelTable {
        let rows = (0..n).map(|i| baseline_row(146.0 + i as f64)).collect();
        ChannelTable::new("t", rows)
    }

    fn locations(t: &ChannelTable) -> Vec<usize> {
        t.rows.iter().map(|r| r.location).collect()
    }

    #[test]
    fn numbers_from_one_without_gaps() {
        for n in [0, 1, 7] {
            let t = reindexed(table(n));
            assert_eq!(locations(&t), (1..=n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn overwrites_stale_numbering_and_is_idempotent() {
        let mut t = table(3);
        t.rows[0].location = 42;
        t.rows[2].location = 7;
        t.rows.swap(0, 2);
        reindex(&mut t);
        assert_eq!(locations(&t), vec![1, 2, 3]);
        // row order is unchanged: the swapped row is now first
        assert_eq!(
            t.rows[0].get(crate::schema::Column::Frequency),
            Some(&crate::schema::Value::Number(148.0))
        );
        reindex(&mut t);
        assert_eq!(locations(&t), vec![1, 2, 3]);
    }
}
