use crate::series::{Column, Field, Series};

/// Append (or overwrite) `Revenue = Close * Volume`.
///
/// Series lacking either column come back untouched.
pub fn derive_revenue(mut series: Series) -> Series {
    let revenue: Column = match (series.column(Field::Close), series.column(Field::Volume)) {
        (Some(close), Some(volume)) => close
            .iter()
            .zip(volume.iter())
            .map(|(close, volume)| Some((*close)? * (*volume)?))
            .collect(),
        _ => return series,
    };
    series.put_column(Field::Revenue, revenue);
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::day;

    fn priced() -> Series {
        Series::new(vec![day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 3)])
            .unwrap()
            .with_column(Field::Close, vec![Some(10.0), None, Some(2.5)])
            .unwrap()
            .with_column(Field::Volume, vec![Some(3.0), Some(4.0), Some(100.0)])
            .unwrap()
    }

    #[test]
    fn test_revenue_is_close_times_volume() {
        let out = derive_revenue(priced());
        assert_eq!(
            out.column(Field::Revenue).unwrap(),
            &[Some(30.0), None, Some(250.0)]
        );
        assert_eq!(
            out.fields().collect::<Vec<_>>(),
            [Field::Close, Field::Volume, Field::Revenue]
        );
    }

    #[test]
    fn test_revenue_is_idempotent() {
        let once = derive_revenue(priced());
        let twice = derive_revenue(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_revenue_without_volume_is_a_no_op() {
        let series = Series::new(vec![day(2024, 1, 1)])
            .unwrap()
            .with_column(Field::Close, vec![Some(10.0)])
            .unwrap();
        assert_eq!(derive_revenue(series.clone()), series);

        let empty = Series::default();
        assert_eq!(derive_revenue(empty.clone()), empty);
    }
}
